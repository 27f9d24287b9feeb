use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::ta::types::IndicatorParams;

pub const DEFAULT_OANDA_URL: &str = "https://api-fxpractice.oanda.com/v3";
pub const DEFAULT_PUSHPLUS_URL: &str = "http://www.pushplus.plus/send";
pub const DEFAULT_SETTINGS_PATH: &str = "assets/settings.ron";

/// Non-secret knobs, read from the RON settings file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub instrument: String,
    pub count: usize,
    pub granularity: String,
    pub interval_secs: u64,
    pub request_timeout_secs: u64,
    pub template: String,
    pub indicators: IndicatorParams,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            instrument: "XAU_USD".to_string(),
            count: 150,
            granularity: "M1".to_string(),
            interval_secs: 60,
            request_timeout_secs: 10,
            template: "markdown".to_string(),
            indicators: IndicatorParams::default(),
        }
    }
}

/// Everything the watcher needs, built once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub oanda_token: String,
    pub pushplus_token: String,
    pub oanda_url: String,
    pub pushplus_url: String,
    pub settings: Settings,
}

impl Config {
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.settings.interval_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.settings.request_timeout_secs)
    }
}
