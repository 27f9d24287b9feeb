use std::time::Duration;

use crate::config::dto::Config;
use crate::error::GoldError;
use crate::signals::dto::SignalEvent;
use crate::ta::types::IndicatorParams;

/// What each cycle fetches and how long it waits afterwards.
#[derive(Debug, Clone)]
pub struct WatchPlan {
    pub instrument: String,
    pub count: usize,
    pub granularity: String,
    pub interval: Duration,
    pub indicators: IndicatorParams,
}

impl From<&Config> for WatchPlan {
    fn from(config: &Config) -> Self {
        Self {
            instrument: config.settings.instrument.clone(),
            count: config.settings.count,
            granularity: config.settings.granularity.clone(),
            interval: config.interval(),
            indicators: config.settings.indicators.clone(),
        }
    }
}

#[derive(Debug)]
pub enum CycleOutcome {
    /// Candles fetched and evaluated; the signals that fired, in order.
    Evaluated(Vec<SignalEvent>),
    /// Fetch or detection failed; the cycle was abandoned.
    Failed(GoldError),
}

#[derive(Debug)]
pub struct CycleReport {
    pub outcome: CycleOutcome,
    pub delivered: usize,
    pub undelivered: usize,
}

impl CycleReport {
    pub fn failed(error: GoldError) -> Self {
        Self {
            outcome: CycleOutcome::Failed(error),
            delivered: 0,
            undelivered: 0,
        }
    }

    pub fn signals(&self) -> &[SignalEvent] {
        match &self.outcome {
            CycleOutcome::Evaluated(signals) => signals,
            CycleOutcome::Failed(_) => &[],
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self.outcome, CycleOutcome::Failed(_))
    }
}
