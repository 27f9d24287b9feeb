use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GoldError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Unexpected status {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Insufficient data: need {needed} bars with defined indicators, have {available}")]
    InsufficientData { needed: usize, available: usize },

    #[error("Notification rejected: {0}")]
    Notify(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<ron::error::SpannedError> for GoldError {
    fn from(err: ron::error::SpannedError) -> Self {
        GoldError::Config(format!("Failed to parse settings file: {}", err))
    }
}

pub type GoldResult<T> = Result<T, GoldError>;
