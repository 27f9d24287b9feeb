use super::types::*;
use crate::candles::dto::CandleSeries;

/// Exponential smoothing with `adjust=False` semantics: the first defined
/// input seeds the average, undefined inputs hold the previous value.
/// Output stays `None` until `min_periods` defined inputs have been seen.
fn smooth(values: &[Option<f64>], alpha: f64, min_periods: usize) -> Vec<Option<f64>> {
    let mut out = Vec::with_capacity(values.len());
    let mut state: Option<f64> = None;
    let mut seen = 0usize;

    for value in values {
        if let Some(x) = *value {
            state = Some(match state {
                Some(prev) => alpha * x + (1.0 - alpha) * prev,
                None => x,
            });
            seen += 1;
        }

        out.push(if seen >= min_periods { state } else { None });
    }

    out
}

/// Calculate EMA over a span, defined once `span` values have been seen
pub fn calculate_ema(values: &[Option<f64>], span: usize) -> Vec<Option<f64>> {
    smooth(values, 2.0 / (span as f64 + 1.0), span)
}

/// Calculate RSI (Relative Strength Index)
pub fn calculate_rsi(closes: &[f64], window: usize) -> Vec<Option<f64>> {
    let mut ups = Vec::with_capacity(closes.len());
    let mut downs = Vec::with_capacity(closes.len());

    // The first bar has no predecessor and counts as an unchanged close
    for i in 0..closes.len() {
        let change = if i == 0 { 0.0 } else { closes[i] - closes[i - 1] };
        ups.push(Some(if change > 0.0 { change } else { 0.0 }));
        downs.push(Some(if change < 0.0 { -change } else { 0.0 }));
    }

    let alpha = 1.0 / window as f64;
    let avg_up = smooth(&ups, alpha, window);
    let avg_down = smooth(&downs, alpha, window);

    avg_up
        .iter()
        .zip(avg_down.iter())
        .map(|(up, down)| match (up, down) {
            (Some(_), Some(down)) if *down == 0.0 => Some(100.0),
            (Some(up), Some(down)) => Some(100.0 - 100.0 / (1.0 + up / down)),
            _ => None,
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct MacdSeries {
    pub macd: Vec<Option<f64>>,
    pub signal: Vec<Option<f64>>,
    pub diff: Vec<Option<f64>>,
}

/// Calculate MACD line, signal line and histogram
pub fn calculate_macd(closes: &[f64], fast: usize, slow: usize, signal: usize) -> MacdSeries {
    let prices: Vec<Option<f64>> = closes.iter().copied().map(Some).collect();
    let ema_fast = calculate_ema(&prices, fast);
    let ema_slow = calculate_ema(&prices, slow);

    let macd: Vec<Option<f64>> = ema_fast
        .iter()
        .zip(ema_slow.iter())
        .map(|(f, s)| Some((*f)? - (*s)?))
        .collect();

    let signal_line = calculate_ema(&macd, signal);

    let diff = macd
        .iter()
        .zip(signal_line.iter())
        .map(|(m, s)| Some((*m)? - (*s)?))
        .collect();

    MacdSeries {
        macd,
        signal: signal_line,
        diff,
    }
}

/// Calculate Simple Moving Average
pub fn calculate_sma(closes: &[f64], period: usize) -> Vec<Option<f64>> {
    (0..closes.len())
        .map(|i| {
            if i + 1 < period {
                return None;
            }
            let sum: f64 = closes[(i + 1 - period)..=i].iter().sum();
            Some(sum / period as f64)
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct BollingerSeries {
    pub lower: Vec<Option<f64>>,
    pub middle: Vec<Option<f64>>,
    pub upper: Vec<Option<f64>>,
}

/// Calculate Bollinger Bands (population standard deviation)
pub fn calculate_bollinger_bands(closes: &[f64], period: usize, std_dev: f64) -> BollingerSeries {
    let middle = calculate_sma(closes, period);
    let mut lower = Vec::with_capacity(closes.len());
    let mut upper = Vec::with_capacity(closes.len());

    for (i, sma) in middle.iter().enumerate() {
        match sma {
            Some(sma) => {
                let window = &closes[(i + 1 - period)..=i];
                let variance: f64 = window
                    .iter()
                    .map(|&price| (price - sma).powi(2))
                    .sum::<f64>()
                    / period as f64;
                let width = std_dev * variance.sqrt();

                lower.push(Some(sma - width));
                upper.push(Some(sma + width));
            }
            None => {
                lower.push(None);
                upper.push(None);
            }
        }
    }

    BollingerSeries {
        lower,
        middle,
        upper,
    }
}

impl IndicatorFrame {
    /// Recompute every indicator column from scratch over the series.
    pub fn compute(series: &CandleSeries, params: &IndicatorParams) -> Self {
        let closes = series.closes();

        let rsi = calculate_rsi(&closes, params.rsi_window);
        let macd = calculate_macd(
            &closes,
            params.macd_fast,
            params.macd_slow,
            params.macd_signal,
        );
        let bands =
            calculate_bollinger_bands(&closes, params.bollinger_window, params.bollinger_dev);

        let rows = series
            .candles()
            .iter()
            .enumerate()
            .map(|(i, candle)| IndicatorRow {
                time: candle.time.clone(),
                close: candle.close,
                rsi: rsi[i],
                macd: macd.macd[i],
                macd_signal: macd.signal[i],
                macd_diff: macd.diff[i],
                bb_mid: bands.middle[i],
                bb_upper: bands.upper[i],
                bb_lower: bands.lower[i],
            })
            .collect::<Vec<_>>();

        IndicatorFrame::from(rows)
    }
}
