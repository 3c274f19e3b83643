//! Page fetching for the deal sites
//!
//! `PageFetcher` is the seam between the scrape loop and the network so the
//! loop can be driven from canned HTML in tests.

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::{ACCEPT, ACCEPT_LANGUAGE, CONNECTION, HeaderMap, HeaderValue, USER_AGENT};
use tracing::debug;
use url::Url;

use crate::core::config::AppConfig;
use crate::errors::DealError;

const BROWSER_ACCEPT: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,image/apng,*/*;q=0.8,application/signed-exchange;v=b3;q=0.9";

#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Returns the body of `url`; non-2xx responses are errors.
    async fn fetch(&self, url: &Url) -> Result<String, DealError>;
}

/// `reqwest`-backed fetcher that presents itself as a desktop browser.
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(config: &AppConfig) -> Result<Self, DealError> {
        let client = Client::builder()
            .default_headers(browser_headers(&config.user_agent)?)
            .timeout(config.request_timeout)
            .gzip(true)
            .brotli(true)
            .deflate(true)
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &Url) -> Result<String, DealError> {
        let response = self.client.get(url.clone()).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(DealError::Status {
                url: url.to_string(),
                status,
            });
        }

        let body = response.text().await?;
        debug!(url = %url, bytes = body.len(), "Fetched page");
        Ok(body)
    }
}

pub fn browser_headers(user_agent: &str) -> Result<HeaderMap, DealError> {
    let mut headers = HeaderMap::new();
    headers.insert(
        USER_AGENT,
        HeaderValue::from_str(user_agent)
            .map_err(|e| DealError::Config(format!("SCRAPER_USER_AGENT: {}", e)))?,
    );
    headers.insert(ACCEPT, HeaderValue::from_static(BROWSER_ACCEPT));
    headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));
    headers.insert(CONNECTION, HeaderValue::from_static("keep-alive"));
    Ok(headers)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn browser_headers_carry_user_agent_and_language() {
        let headers = browser_headers("TestAgent/1.0").unwrap();
        assert_eq!(headers.get(USER_AGENT).unwrap(), "TestAgent/1.0");
        assert_eq!(headers.get(ACCEPT_LANGUAGE).unwrap(), "en-US,en;q=0.9");
        assert!(headers.get(ACCEPT).unwrap().to_str().unwrap().starts_with("text/html"));
    }

    #[test]
    fn browser_headers_reject_control_characters() {
        assert!(matches!(
            browser_headers("bad\nagent"),
            Err(DealError::Config(_))
        ));
    }
}
