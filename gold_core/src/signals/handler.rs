use super::dto::{SignalEvent, SignalKind};
use crate::error::{GoldError, GoldResult};
use crate::ta::types::{IndicatorFrame, Readings};

const RSI_HIGH: f64 = 60.0;
const RSI_LOW: f64 = 40.0;

fn holds(kind: SignalKind, latest: &Readings, previous: &Readings) -> bool {
    match kind {
        SignalKind::StrongShort => {
            latest.close < latest.bb_mid
                && latest.macd < latest.macd_signal
                && latest.macd_diff < 0.0
                && latest.rsi > RSI_HIGH
                && previous.rsi > latest.rsi
        }
        SignalKind::StrongLong => {
            latest.close > latest.bb_mid
                && latest.macd > latest.macd_signal
                && latest.macd_diff > 0.0
                && latest.rsi < RSI_LOW
                && previous.rsi < latest.rsi
        }
        SignalKind::MildShort => {
            latest.macd < latest.macd_signal
                && latest.rsi > RSI_HIGH
                && latest.close < latest.bb_mid
        }
        SignalKind::MildLong => {
            latest.macd > latest.macd_signal
                && latest.rsi > RSI_LOW
                && latest.close > latest.bb_mid
        }
    }
}

/// Evaluate every rule against the last two rows of the frame.
///
/// Rules are independent: any subset may fire, and events come back in
/// [`SignalKind::ALL`] order.
pub fn detect_signals(frame: &IndicatorFrame) -> GoldResult<Vec<SignalEvent>> {
    let (previous, latest) = frame.last_pair().ok_or(GoldError::InsufficientData {
        needed: 2,
        available: frame.len(),
    })?;

    let defined = frame
        .rows()
        .iter()
        .rev()
        .take_while(|row| row.readings().is_some())
        .count();

    let (previous, latest) = match (previous.readings(), latest.readings()) {
        (Some(previous), Some(latest)) => (previous, latest),
        _ => {
            return Err(GoldError::InsufficientData {
                needed: 2,
                available: defined,
            })
        }
    };

    let signals = SignalKind::ALL
        .iter()
        .filter(|kind| holds(**kind, &latest, &previous))
        .map(|kind| SignalEvent::at_close(*kind, latest.close))
        .collect();

    Ok(signals)
}
