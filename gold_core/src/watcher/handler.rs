use log::{debug, error, info, warn};

use super::dto::{CycleOutcome, CycleReport, WatchPlan};
use super::sleeper::Sleeper;
use crate::candles::handler::CandleSource;
use crate::error::GoldResult;
use crate::notifier::handler::Notifier;
use crate::signals::dto::SignalEvent;
use crate::signals::handler::detect_signals;
use crate::ta::types::IndicatorFrame;

/// Fetch, detect, notify, sleep. Nothing survives from one cycle to the
/// next; every cycle refetches the full window and recomputes indicators.
pub struct Watcher<S, N, Z> {
    plan: WatchPlan,
    source: S,
    notifier: N,
    sleeper: Z,
}

impl<S, N, Z> Watcher<S, N, Z>
where
    S: CandleSource,
    N: Notifier,
    Z: Sleeper,
{
    pub fn new(plan: WatchPlan, source: S, notifier: N, sleeper: Z) -> Self {
        Self {
            plan,
            source,
            notifier,
            sleeper,
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn sleeper(&self) -> &Z {
        &self.sleeper
    }

    /// Fetch the latest window and run the rule engine over it.
    pub async fn evaluate(&self) -> GoldResult<Vec<SignalEvent>> {
        let series = self
            .source
            .fetch(&self.plan.instrument, self.plan.count, &self.plan.granularity)
            .await?;

        match series.latest() {
            Some(latest) => info!(
                "Fetched {} candles for {} (latest {} close {})",
                series.len(),
                self.plan.instrument,
                latest
                    .timestamp()
                    .map(|t| t.to_rfc3339())
                    .unwrap_or_else(|| latest.time.clone()),
                latest.close
            ),
            None => warn!("Provider returned no candles for {}", self.plan.instrument),
        }

        let frame = IndicatorFrame::compute(&series, &self.plan.indicators);
        if let Some(row) = frame.latest() {
            debug!(
                "RSI {:?} | MACD {:?} / {:?} ({:?}) | BB {:?} < {:?} < {:?}",
                row.rsi, row.macd, row.macd_signal, row.macd_diff, row.bb_lower, row.bb_mid, row.bb_upper
            );
        }

        detect_signals(&frame)
    }

    /// One cycle. Errors are logged and folded into the report.
    pub async fn run_cycle(&self) -> CycleReport {
        info!("Cycle start: {}", self.plan.instrument);

        let signals = match self.evaluate().await {
            Ok(signals) => signals,
            Err(e) => {
                error!("Cycle aborted: {}", e);
                return CycleReport::failed(e);
            }
        };

        info!("{} signal(s) detected", signals.len());

        let mut delivered = 0;
        let mut undelivered = 0;

        for signal in &signals {
            let title = signal.title(&self.plan.instrument);
            if self.notifier.notify(&title, &signal.content()).await {
                delivered += 1;
            } else {
                undelivered += 1;
            }
        }

        CycleReport {
            outcome: CycleOutcome::Evaluated(signals),
            delivered,
            undelivered,
        }
    }

    /// Run `cycles` cycles, sleeping the configured interval after each.
    pub async fn run_cycles(&self, cycles: usize) -> Vec<CycleReport> {
        let mut reports = Vec::with_capacity(cycles);
        for _ in 0..cycles {
            reports.push(self.run_cycle().await);
            self.sleeper.sleep(self.plan.interval).await;
        }
        reports
    }

    /// Run until the process is killed.
    pub async fn run(&self) {
        info!(
            "Watching {} ({} x {}) every {:?}",
            self.plan.instrument, self.plan.count, self.plan.granularity, self.plan.interval
        );

        loop {
            self.run_cycle().await;
            self.sleeper.sleep(self.plan.interval).await;
        }
    }
}
