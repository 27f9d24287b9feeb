use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::error::{GoldError, GoldResult};

#[derive(Debug, Deserialize)]
pub struct CandlesResponse {
    pub candles: Vec<CandleEntry>,
}

#[derive(Debug, Deserialize)]
pub struct CandleEntry {
    pub time: String,
    pub mid: MidPrice,
}

/// Mid prices arrive as decimal strings.
#[derive(Debug, Deserialize)]
pub struct MidPrice {
    pub o: String,
    pub h: String,
    pub l: String,
    pub c: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Candle {
    pub time: String,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

impl Candle {
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.time)
            .ok()
            .map(|t| t.with_timezone(&Utc))
    }
}

fn parse_price(field: &str, raw: &str, time: &str) -> GoldResult<f64> {
    raw.trim().parse::<f64>().map_err(|e| {
        GoldError::Parse(format!(
            "Invalid mid.{} value '{}' for candle {}: {}",
            field, raw, time, e
        ))
    })
}

impl TryFrom<CandleEntry> for Candle {
    type Error = GoldError;

    fn try_from(entry: CandleEntry) -> GoldResult<Self> {
        let open = parse_price("o", &entry.mid.o, &entry.time)?;
        let high = parse_price("h", &entry.mid.h, &entry.time)?;
        let low = parse_price("l", &entry.mid.l, &entry.time)?;
        let close = parse_price("c", &entry.mid.c, &entry.time)?;

        Ok(Candle {
            time: entry.time,
            open,
            high,
            low,
            close,
        })
    }
}

/// Bars for one instrument and granularity, oldest first, exactly as the
/// provider returned them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CandleSeries {
    candles: Vec<Candle>,
}

impl From<Vec<Candle>> for CandleSeries {
    fn from(candles: Vec<Candle>) -> Self {
        Self { candles }
    }
}

impl TryFrom<CandlesResponse> for CandleSeries {
    type Error = GoldError;

    fn try_from(response: CandlesResponse) -> GoldResult<Self> {
        let candles = response
            .candles
            .into_iter()
            .map(Candle::try_from)
            .collect::<GoldResult<Vec<_>>>()?;

        Ok(Self { candles })
    }
}

impl CandleSeries {
    pub fn candles(&self) -> &[Candle] {
        &self.candles
    }

    pub fn len(&self) -> usize {
        self.candles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candles.is_empty()
    }

    pub fn latest(&self) -> Option<&Candle> {
        self.candles.last()
    }

    pub fn closes(&self) -> Vec<f64> {
        self.candles.iter().map(|c| c.close).collect()
    }
}
