use async_trait::async_trait;
use log::debug;
use reqwest::Client;

use super::dto::{CandleSeries, CandlesResponse};
use crate::config::dto::Config;
use crate::error::{GoldError, GoldResult};

#[async_trait]
pub trait CandleSource: Send + Sync {
    /// Fetch the most recent `count` bars for `instrument`, oldest first.
    async fn fetch(
        &self,
        instrument: &str,
        count: usize,
        granularity: &str,
    ) -> GoldResult<CandleSeries>;
}

/// Candle source backed by the OANDA v3 REST API, mid prices only.
#[derive(Clone)]
pub struct OandaClient {
    client: Client,
    base_url: String,
    token: String,
}

impl OandaClient {
    pub fn new(config: &Config) -> GoldResult<Self> {
        let client = Client::builder()
            .user_agent("gold-watcher/1.0")
            .timeout(config.request_timeout())
            .build()?;

        Ok(Self {
            client,
            base_url: config.oanda_url.clone(),
            token: config.oanda_token.clone(),
        })
    }
}

#[async_trait]
impl CandleSource for OandaClient {
    async fn fetch(
        &self,
        instrument: &str,
        count: usize,
        granularity: &str,
    ) -> GoldResult<CandleSeries> {
        let url = format!("{}/instruments/{}/candles", self.base_url, instrument);
        debug!("Requesting {} {} candles from {}", count, granularity, url);

        let response = self
            .client
            .get(&url)
            .header("Authorization", format!("Bearer {}", self.token))
            .query(&[
                ("count", count.to_string()),
                ("granularity", granularity.to_string()),
                ("price", "M".to_string()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read error body".to_string());
            return Err(GoldError::Status { status, body });
        }

        let body = response.text().await?;
        let payload: CandlesResponse = serde_json::from_str(&body)
            .map_err(|e| GoldError::Parse(format!("Failed to parse candles response: {}", e)))?;

        CandleSeries::try_from(payload)
    }
}
