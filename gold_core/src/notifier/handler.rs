use async_trait::async_trait;
use log::{error, info};
use reqwest::Client;

use super::dto::{PushRequest, PushResponse};
use crate::config::dto::Config;
use crate::error::{GoldError, GoldResult};

#[async_trait]
pub trait Notifier: Send + Sync {
    /// One delivery attempt. No retry.
    async fn deliver(&self, title: &str, content: &str) -> GoldResult<()>;

    /// Deliver and swallow the outcome: failures are logged and reported
    /// as `false`, never returned to the caller.
    async fn notify(&self, title: &str, content: &str) -> bool {
        match self.deliver(title, content).await {
            Ok(()) => {
                info!("Pushed: {}", content);
                true
            }
            Err(e) => {
                error!("Push failed for '{}': {}", title, e);
                false
            }
        }
    }
}

#[derive(Clone)]
pub struct PushPlusNotifier {
    client: Client,
    url: String,
    token: String,
    template: String,
}

impl PushPlusNotifier {
    pub fn new(config: &Config) -> GoldResult<Self> {
        let client = Client::builder()
            .user_agent("gold-watcher/1.0")
            .timeout(config.request_timeout())
            .build()?;

        Ok(Self {
            client,
            url: config.pushplus_url.clone(),
            token: config.pushplus_token.clone(),
            template: config.settings.template.clone(),
        })
    }
}

#[async_trait]
impl Notifier for PushPlusNotifier {
    async fn deliver(&self, title: &str, content: &str) -> GoldResult<()> {
        let request = PushRequest {
            token: &self.token,
            title,
            content,
            template: &self.template,
        };

        let response = self.client.post(&self.url).json(&request).send().await?;

        let status = response.status();
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Unable to read response body".to_string());

        if !status.is_success() {
            return Err(GoldError::Status { status, body });
        }

        // Plain-text replies carry no verdict; only a JSON envelope can reject
        match serde_json::from_str::<PushResponse>(&body) {
            Ok(reply) if !reply.is_accepted() => Err(GoldError::Notify(format!(
                "code {}: {}",
                reply.code, reply.msg
            ))),
            _ => Ok(()),
        }
    }
}
