use std::time::Duration;

use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DealError {
    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Failed to send HTTP request: {0}")]
    Http(String),

    #[error("Unexpected HTTP status {status} from {url}")]
    Status { url: String, status: StatusCode },

    #[error("Rate limited by {url}")]
    RateLimited {
        url: String,
        retry_after: Option<Duration>,
    },

    #[error("Failed to parse page: {0}")]
    Parse(String),

    #[error("Failed to deliver Discord webhook: {0}")]
    Webhook(String),
}

impl DealError {
    /// Whether retrying the same request could plausibly succeed.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        match self {
            DealError::Http(_) | DealError::RateLimited { .. } => true,
            DealError::Status { status, .. } => {
                *status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error()
            }
            _ => false,
        }
    }

    /// Server-requested wait before the next attempt, if any.
    #[must_use]
    pub fn retry_after(&self) -> Option<Duration> {
        match self {
            DealError::RateLimited { retry_after, .. } => *retry_after,
            _ => None,
        }
    }
}

impl From<reqwest::Error> for DealError {
    fn from(error: reqwest::Error) -> Self {
        DealError::Http(error.to_string())
    }
}

impl From<url::ParseError> for DealError {
    fn from(error: url::ParseError) -> Self {
        DealError::Parse(format!("invalid URL: {}", error))
    }
}
