use std::collections::HashMap;
use std::env;
use std::time::Duration;

use url::Url;

use crate::errors::DealError;

pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/126.0.0.0 Safari/537.36";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub discord_webhook_url: Option<Url>,
    pub hotukdeals_max_pages: u32,
    pub latestdeals_max_pages: u32,
    pub request_timeout: Duration,
    pub webhook_timeout: Duration,
    pub min_page_delay: Duration,
    pub max_page_delay: Duration,
    pub user_agent: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            discord_webhook_url: None,
            hotukdeals_max_pages: 2,
            latestdeals_max_pages: 2,
            request_timeout: Duration::from_secs(15),
            webhook_timeout: Duration::from_secs(10),
            min_page_delay: Duration::from_secs(3),
            max_page_delay: Duration::from_secs(8),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, DealError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_map(vars: &HashMap<String, String>) -> Result<Self, DealError> {
        Self::from_lookup(|key| vars.get(key).cloned())
    }

    /// Builds the config from an arbitrary variable source. Blank values are
    /// treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, DealError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        let discord_webhook_url = get("DISCORD_WEBHOOK_URL")
            .map(|raw| parse_webhook_url(&raw))
            .transpose()?;

        let hotukdeals_max_pages = match get("HOTUKDEALS_MAX_PAGES") {
            Some(raw) => parse_page_budget("HOTUKDEALS_MAX_PAGES", &raw)?,
            None => defaults.hotukdeals_max_pages,
        };
        let latestdeals_max_pages = match get("LATESTDEALS_MAX_PAGES") {
            Some(raw) => parse_page_budget("LATESTDEALS_MAX_PAGES", &raw)?,
            None => defaults.latestdeals_max_pages,
        };

        let request_timeout = match get("REQUEST_TIMEOUT_SECS") {
            Some(raw) => parse_timeout("REQUEST_TIMEOUT_SECS", &raw)?,
            None => defaults.request_timeout,
        };
        let webhook_timeout = match get("WEBHOOK_TIMEOUT_SECS") {
            Some(raw) => parse_timeout("WEBHOOK_TIMEOUT_SECS", &raw)?,
            None => defaults.webhook_timeout,
        };
        let min_page_delay = match get("MIN_PAGE_DELAY_SECS") {
            Some(raw) => parse_seconds("MIN_PAGE_DELAY_SECS", &raw)?,
            None => defaults.min_page_delay,
        };
        let max_page_delay = match get("MAX_PAGE_DELAY_SECS") {
            Some(raw) => parse_seconds("MAX_PAGE_DELAY_SECS", &raw)?,
            None => defaults.max_page_delay,
        };
        if min_page_delay > max_page_delay {
            return Err(DealError::Config(format!(
                "MIN_PAGE_DELAY_SECS ({:?}) exceeds MAX_PAGE_DELAY_SECS ({:?})",
                min_page_delay, max_page_delay
            )));
        }

        Ok(Self {
            discord_webhook_url,
            hotukdeals_max_pages,
            latestdeals_max_pages,
            request_timeout,
            webhook_timeout,
            min_page_delay,
            max_page_delay,
            user_agent: get("SCRAPER_USER_AGENT").unwrap_or(defaults.user_agent),
        })
    }
}

/// Webhooks must be absolute http(s) URLs with a host; a value typed
/// without its scheme still parses as a URL, so check explicitly.
fn parse_webhook_url(raw: &str) -> Result<Url, DealError> {
    let url = Url::parse(raw.trim())
        .map_err(|e| DealError::Config(format!("DISCORD_WEBHOOK_URL: {}", e)))?;
    if !matches!(url.scheme(), "http" | "https") || url.host_str().is_none() {
        return Err(DealError::Config(format!(
            "DISCORD_WEBHOOK_URL: expected an http(s) URL with a host, got `{}`",
            raw.trim()
        )));
    }
    Ok(url)
}

fn parse_page_budget(key: &str, raw: &str) -> Result<u32, DealError> {
    let pages: u32 = raw
        .trim()
        .parse()
        .map_err(|e| DealError::Config(format!("{}: {}", key, e)))?;
    if pages == 0 {
        return Err(DealError::Config(format!("{}: must be at least 1", key)));
    }
    Ok(pages)
}

fn parse_seconds(key: &str, raw: &str) -> Result<Duration, DealError> {
    let secs: f64 = raw
        .trim()
        .parse()
        .map_err(|e| DealError::Config(format!("{}: {}", key, e)))?;
    Duration::try_from_secs_f64(secs).map_err(|e| DealError::Config(format!("{}: {}", key, e)))
}

fn parse_timeout(key: &str, raw: &str) -> Result<Duration, DealError> {
    let timeout = parse_seconds(key, raw)?;
    if timeout.is_zero() {
        return Err(DealError::Config(format!("{}: must be greater than 0", key)));
    }
    Ok(timeout)
}
