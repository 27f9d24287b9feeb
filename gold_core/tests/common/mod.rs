#![allow(dead_code)]

use async_trait::async_trait;
use gold_core::candles::dto::{Candle, CandleSeries};
use gold_core::candles::handler::CandleSource;
use gold_core::config::dto::{Config, Settings};
use gold_core::notifier::handler::Notifier;
use gold_core::watcher::sleeper::Sleeper;
use gold_core::{GoldError, GoldResult};
use reqwest::StatusCode;
use serde_json::{json, Value};
use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

/// Flat, then a jump, then a slow pullback: both short rules fire on the
/// last bar (close 1890).
pub fn pullback_closes() -> Vec<f64> {
    let mut closes = vec![1800.0; 129];
    closes.extend(std::iter::repeat(1900.0).take(11));
    closes.extend((1..=10).map(|k| 1900.0 - k as f64));
    closes
}

/// Accelerating rise: only the mild long rule fires.
pub fn accelerating_closes(count: usize) -> Vec<f64> {
    (0..count)
        .map(|t| {
            let t = t as f64;
            1900.0 + 0.5 * t + 0.01 * t * t
        })
        .collect()
}

/// Steady decline: no rule fires.
pub fn declining_closes(count: usize) -> Vec<f64> {
    (0..count).map(|t| 2000.0 - 0.5 * t as f64).collect()
}

fn bar_time(i: usize) -> String {
    format!("2024-05-01T{:02}:{:02}:00.000000000Z", 8 + i / 60, i % 60)
}

pub fn series(closes: &[f64]) -> CandleSeries {
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| Candle {
            time: bar_time(i),
            open: close,
            high: close + 0.5,
            low: close - 0.5,
            close,
        })
        .collect::<Vec<_>>()
        .into()
}

/// Candles payload in the provider's wire format.
pub fn candles_body(closes: &[f64]) -> Value {
    let candles: Vec<Value> = closes
        .iter()
        .enumerate()
        .map(|(i, close)| {
            json!({
                "complete": true,
                "volume": 42,
                "time": bar_time(i),
                "mid": {
                    "o": format!("{:.3}", close),
                    "h": format!("{:.3}", close + 0.5),
                    "l": format!("{:.3}", close - 0.5),
                    "c": format!("{:.3}", close),
                }
            })
        })
        .collect();

    json!({ "instrument": "XAU_USD", "granularity": "M1", "candles": candles })
}

pub fn test_config(server_uri: &str) -> Config {
    let mut config = Config::new("oanda-test-token", "push-test-token", Settings::default());
    config.oanda_url = server_uri.to_string();
    config.pushplus_url = format!("{}/send", server_uri);
    config
}

/// Hands out queued fetch results, one per call.
pub struct ScriptedSource {
    results: Mutex<VecDeque<GoldResult<CandleSeries>>>,
    pub calls: Mutex<Vec<(String, usize, String)>>,
}

impl ScriptedSource {
    pub fn new(results: Vec<GoldResult<CandleSeries>>) -> Self {
        Self {
            results: Mutex::new(results.into()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

pub fn upstream_failure() -> GoldError {
    GoldError::Status {
        status: StatusCode::SERVICE_UNAVAILABLE,
        body: "maintenance".to_string(),
    }
}

#[async_trait]
impl CandleSource for ScriptedSource {
    async fn fetch(
        &self,
        instrument: &str,
        count: usize,
        granularity: &str,
    ) -> GoldResult<CandleSeries> {
        self.calls
            .lock()
            .unwrap()
            .push((instrument.to_string(), count, granularity.to_string()));

        self.results
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(upstream_failure()))
    }
}

/// Records every delivery; fails the calls whose index is listed.
#[derive(Default)]
pub struct RecordingNotifier {
    pub fail_on: Vec<usize>,
    pub attempts: Mutex<Vec<(String, String)>>,
}

impl RecordingNotifier {
    pub fn failing_on(fail_on: Vec<usize>) -> Self {
        Self {
            fail_on,
            attempts: Mutex::new(Vec::new()),
        }
    }

    pub fn titles(&self) -> Vec<String> {
        self.attempts
            .lock()
            .unwrap()
            .iter()
            .map(|(title, _)| title.clone())
            .collect()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn deliver(&self, title: &str, content: &str) -> GoldResult<()> {
        let mut attempts = self.attempts.lock().unwrap();
        let index = attempts.len();
        attempts.push((title.to_string(), content.to_string()));

        if self.fail_on.contains(&index) {
            return Err(GoldError::Notify("push service unavailable".to_string()));
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct RecordingSleeper {
    pub naps: Mutex<Vec<Duration>>,
}

impl RecordingSleeper {
    pub fn naps(&self) -> Vec<Duration> {
        self.naps.lock().unwrap().clone()
    }
}

#[async_trait]
impl Sleeper for RecordingSleeper {
    async fn sleep(&self, duration: Duration) {
        self.naps.lock().unwrap().push(duration);
    }
}
