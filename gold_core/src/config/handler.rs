use log::{info, warn};
use std::{env, fs, path::Path};

use super::dto::{Config, Settings, DEFAULT_OANDA_URL, DEFAULT_PUSHPLUS_URL, DEFAULT_SETTINGS_PATH};
use crate::error::{GoldError, GoldResult};

impl Settings {
    pub fn from_ron(source: &str) -> GoldResult<Self> {
        let settings: Settings = ron::de::from_str(source)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Read settings from `path`, falling back to defaults when the file
    /// does not exist.
    pub fn load(path: &Path) -> GoldResult<Self> {
        if !path.exists() {
            info!(
                "Settings file {} not found, using defaults",
                path.display()
            );
            return Ok(Settings::default());
        }

        let source = fs::read_to_string(path)?;
        Self::from_ron(&source)
    }

    pub fn validate(&self) -> GoldResult<()> {
        self.indicators.validate().map_err(GoldError::Config)?;

        if self.instrument.trim().is_empty() {
            return Err(GoldError::Config("instrument must not be empty".to_string()));
        }

        if self.granularity.trim().is_empty() {
            return Err(GoldError::Config("granularity must not be empty".to_string()));
        }

        let needed = self.indicators.min_bars() + 1;
        if self.count < needed {
            return Err(GoldError::Config(format!(
                "count ({}) must be at least {} for the configured indicator windows",
                self.count, needed
            )));
        }

        if self.request_timeout_secs == 0 {
            return Err(GoldError::Config(
                "request_timeout_secs must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }
}

fn token_from_env(name: &str) -> String {
    match env::var(name) {
        Ok(token) if !token.is_empty() => token,
        _ => {
            warn!("{} is not set; requests will not be authenticated", name);
            String::new()
        }
    }
}

impl Config {
    pub fn new(oanda_token: &str, pushplus_token: &str, settings: Settings) -> Self {
        Self {
            oanda_token: oanda_token.to_string(),
            pushplus_token: pushplus_token.to_string(),
            oanda_url: DEFAULT_OANDA_URL.to_string(),
            pushplus_url: DEFAULT_PUSHPLUS_URL.to_string(),
            settings,
        }
    }

    /// Build the configuration from the process environment and the
    /// settings file named by `GOLD_SETTINGS`.
    pub fn from_env() -> GoldResult<Self> {
        let settings_path =
            env::var("GOLD_SETTINGS").unwrap_or_else(|_| DEFAULT_SETTINGS_PATH.to_string());
        let settings = Settings::load(Path::new(&settings_path))?;

        let oanda_url = env::var("OANDA_URL").unwrap_or_else(|_| DEFAULT_OANDA_URL.to_string());
        let pushplus_url =
            env::var("PUSHPLUS_URL").unwrap_or_else(|_| DEFAULT_PUSHPLUS_URL.to_string());

        Ok(Self {
            oanda_token: token_from_env("OANDA_TOKEN"),
            pushplus_token: token_from_env("PUSHPLUS_TOKEN"),
            oanda_url: oanda_url.trim_end_matches('/').to_string(),
            pushplus_url,
            settings,
        })
    }
}
