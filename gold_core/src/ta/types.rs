use serde::{Deserialize, Serialize};

/// Window lengths for every indicator the signal rules read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndicatorParams {
    pub rsi_window: usize,
    pub macd_fast: usize,
    pub macd_slow: usize,
    pub macd_signal: usize,
    pub bollinger_window: usize,
    pub bollinger_dev: f64,
}

impl Default for IndicatorParams {
    fn default() -> Self {
        Self {
            rsi_window: 14,
            macd_fast: 12,
            macd_slow: 26,
            macd_signal: 9,
            bollinger_window: 20,
            bollinger_dev: 2.0,
        }
    }
}

impl IndicatorParams {
    /// Bars needed before the first row has every indicator defined.
    pub fn min_bars(&self) -> usize {
        let macd = self.macd_slow.max(self.macd_fast) + self.macd_signal.saturating_sub(1);
        self.rsi_window.max(macd).max(self.bollinger_window)
    }

    pub fn validate(&self) -> Result<(), String> {
        let windows = [
            ("rsi_window", self.rsi_window),
            ("macd_fast", self.macd_fast),
            ("macd_slow", self.macd_slow),
            ("macd_signal", self.macd_signal),
            ("bollinger_window", self.bollinger_window),
        ];

        if let Some((name, _)) = windows.iter().find(|(_, w)| *w == 0) {
            return Err(format!("{} must be greater than zero", name));
        }

        if self.macd_fast >= self.macd_slow {
            return Err(format!(
                "macd_fast ({}) must be shorter than macd_slow ({})",
                self.macd_fast, self.macd_slow
            ));
        }

        if !self.bollinger_dev.is_finite() || self.bollinger_dev <= 0.0 {
            return Err("bollinger_dev must be a positive number".to_string());
        }

        Ok(())
    }
}

/// One candle plus the indicator values computed up to and including it.
/// `None` marks a value still inside its warm-up window.
#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorRow {
    pub time: String,
    pub close: f64,
    pub rsi: Option<f64>,
    pub macd: Option<f64>,
    pub macd_signal: Option<f64>,
    pub macd_diff: Option<f64>,
    pub bb_mid: Option<f64>,
    pub bb_upper: Option<f64>,
    pub bb_lower: Option<f64>,
}

impl IndicatorRow {
    /// Values every rule reads, or `None` while any of them is undefined.
    pub fn readings(&self) -> Option<Readings> {
        Some(Readings {
            close: self.close,
            rsi: self.rsi?,
            macd: self.macd?,
            macd_signal: self.macd_signal?,
            macd_diff: self.macd_diff?,
            bb_mid: self.bb_mid?,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Readings {
    pub close: f64,
    pub rsi: f64,
    pub macd: f64,
    pub macd_signal: f64,
    pub macd_diff: f64,
    pub bb_mid: f64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct IndicatorFrame {
    rows: Vec<IndicatorRow>,
}

impl From<Vec<IndicatorRow>> for IndicatorFrame {
    fn from(rows: Vec<IndicatorRow>) -> Self {
        Self { rows }
    }
}

impl IndicatorFrame {
    pub fn rows(&self) -> &[IndicatorRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn latest(&self) -> Option<&IndicatorRow> {
        self.rows.last()
    }

    /// The last two rows as `(previous, latest)`.
    pub fn last_pair(&self) -> Option<(&IndicatorRow, &IndicatorRow)> {
        match self.rows.as_slice() {
            [.., previous, latest] => Some((previous, latest)),
            _ => None,
        }
    }
}
