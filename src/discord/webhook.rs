//! Deal notification sinks
//!
//! Delivers each scraped deal to a Discord webhook with retry logic for
//! rate limits and server errors.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, RETRY_AFTER};
use reqwest::{Client, StatusCode};
use tokio_retry::strategy::{ExponentialBackoff, jitter};
use tracing::{debug, info, warn};
use url::Url;

use crate::core::config::AppConfig;
use crate::core::models::{Deal, DealSource};
use crate::discord::payload::build_webhook_payload;
use crate::errors::DealError;

const MAX_RETRIES: usize = 3;
/// Backoff delays are 2, 4 and 8 times this many milliseconds, before jitter.
const DEFAULT_BACKOFF_FACTOR_MS: u64 = 250;
/// Upper bound on how long a `Retry-After` hint may delay the next attempt.
const MAX_RETRY_AFTER: Duration = Duration::from_secs(60);

#[async_trait]
pub trait DealNotifier: Send + Sync {
    async fn notify(&self, deal: &Deal, source: DealSource) -> Result<(), DealError>;

    /// Whether deals handed to this notifier actually leave the process.
    fn is_enabled(&self) -> bool {
        true
    }
}

/// Posts deals to a Discord "Execute Webhook" URL.
pub struct DiscordWebhook {
    client: Client,
    url: Url,
    backoff_factor_ms: u64,
}

impl DiscordWebhook {
    pub fn new(url: Url, config: &AppConfig) -> Result<Self, DealError> {
        let client = Client::builder().timeout(config.webhook_timeout).build()?;
        Ok(Self {
            client,
            url,
            backoff_factor_ms: DEFAULT_BACKOFF_FACTOR_MS,
        })
    }

    /// Scale the retry backoff; delays are 2, 4 and 8 times `factor_ms`.
    #[must_use]
    pub fn with_backoff_factor(mut self, factor_ms: u64) -> Self {
        self.backoff_factor_ms = factor_ms;
        self
    }

    async fn post_once(&self, deal: &Deal, source: DealSource) -> Result<(), DealError> {
        let payload = build_webhook_payload(deal, source);
        let response = self
            .client
            .post(self.url.clone())
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(DealError::RateLimited {
                url: redact_webhook(&self.url),
                retry_after: parse_retry_after(response.headers()),
            });
        }

        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "<failed to read body>".to_string());
        debug!(%status, body = %body, "Discord webhook rejected payload");
        Err(DealError::Status {
            url: redact_webhook(&self.url),
            status,
        })
    }
}

#[async_trait]
impl DealNotifier for DiscordWebhook {
    async fn notify(&self, deal: &Deal, source: DealSource) -> Result<(), DealError> {
        let mut backoff = ExponentialBackoff::from_millis(2)
            .factor(self.backoff_factor_ms)
            .map(jitter)
            .take(MAX_RETRIES);

        loop {
            let err = match self.post_once(deal, source).await {
                Ok(()) => {
                    info!(
                        "Successfully sent deal to Discord: {} (Source: {})",
                        deal.title, source
                    );
                    return Ok(());
                }
                Err(e) => e,
            };

            let delay = match backoff.next() {
                Some(delay) if err.is_transient() => delay,
                _ => return Err(DealError::Webhook(format!("{} (Source: {})", err, source))),
            };
            // Discord's rate-limit hint wins over our own backoff when longer.
            let delay = err.retry_after().map_or(delay, |wait| wait.max(delay));
            warn!(
                "Retrying Discord webhook for {} in {:?}: {}",
                deal.title, delay, err
            );
            tokio::time::sleep(delay).await;
        }
    }
}

/// Stand-in used when no webhook URL is configured; deals are dropped.
pub struct DisabledNotifier;

#[async_trait]
impl DealNotifier for DisabledNotifier {
    async fn notify(&self, _deal: &Deal, _source: DealSource) -> Result<(), DealError> {
        Ok(())
    }

    fn is_enabled(&self) -> bool {
        false
    }
}

/// Pick the notifier for this run, warning when deals will not be sent.
pub fn notifier_from_config(config: &AppConfig) -> Result<Box<dyn DealNotifier>, DealError> {
    match &config.discord_webhook_url {
        Some(url) => Ok(Box::new(DiscordWebhook::new(url.clone(), config)?)),
        None => {
            warn!(
                "DISCORD_WEBHOOK_URL environment variable not set. Deals will not be sent to Discord."
            );
            Ok(Box::new(DisabledNotifier))
        }
    }
}

/// Seconds from a `Retry-After` header; Discord sends fractional values.
#[must_use]
pub fn parse_retry_after(headers: &HeaderMap) -> Option<Duration> {
    let secs: f64 = headers.get(RETRY_AFTER)?.to_str().ok()?.trim().parse().ok()?;
    Duration::try_from_secs_f64(secs)
        .ok()
        .map(|wait| wait.min(MAX_RETRY_AFTER))
}

/// Webhook URLs embed their secret token in the path; keep it out of logs.
#[must_use]
pub fn redact_webhook(url: &Url) -> String {
    let mut segments: Vec<&str> = url
        .path_segments()
        .map(|s| s.collect())
        .unwrap_or_default();
    if segments.len() >= 2
        && let Some(token) = segments.last_mut()
    {
        *token = "***";
    }
    format!(
        "{}://{}/{}",
        url.scheme(),
        url.host_str().unwrap_or_default(),
        segments.join("/")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn redact_webhook_hides_token_segment() {
        let url = Url::parse("https://discord.com/api/webhooks/123/secret-token").unwrap();
        assert_eq!(
            redact_webhook(&url),
            "https://discord.com/api/webhooks/123/***"
        );
    }

    #[test]
    fn parse_retry_after_reads_fractional_seconds() {
        let mut headers = HeaderMap::new();
        headers.insert(RETRY_AFTER, "1.5".parse().unwrap());
        assert_eq!(
            parse_retry_after(&headers),
            Some(Duration::from_millis(1500))
        );

        headers.insert(RETRY_AFTER, "3600".parse().unwrap());
        assert_eq!(parse_retry_after(&headers), Some(MAX_RETRY_AFTER));

        headers.insert(RETRY_AFTER, "soon".parse().unwrap());
        assert_eq!(parse_retry_after(&headers), None);
        assert_eq!(parse_retry_after(&HeaderMap::new()), None);
    }

    #[test]
    fn notifier_from_config_without_url_is_disabled() {
        let notifier = notifier_from_config(&AppConfig::default()).unwrap();
        assert!(!notifier.is_enabled());
    }

    #[test]
    fn notifier_from_config_with_url_is_enabled() {
        let config = AppConfig {
            discord_webhook_url: Some(
                Url::parse("https://discord.com/api/webhooks/1/abc").unwrap(),
            ),
            ..AppConfig::default()
        };
        let notifier = notifier_from_config(&config).unwrap();
        assert!(notifier.is_enabled());
    }
}
