//! dealbot - scrapes UK deal aggregators and forwards new deals to Discord.
//!
//! Each run walks the listing pages of HotUKDeals and LatestDeals, extracts
//! every complete deal card and posts it as an embed to a Discord webhook.
//!
//! # Architecture
//!
//! The system uses:
//! - reqwest for page fetches and webhook delivery
//! - scraper for CSS-selector based HTML extraction
//! - tokio-retry for webhook retries on rate limits and server errors
//! - Tokio for the async runtime and polite page delays
//!
//! # Example
//!
//! ```no_run
//! use dealbot::core::config::AppConfig;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     dealbot::setup_logging();
//!
//!     let config = AppConfig::from_env()?;
//!     let summary = dealbot::app::run(&config).await?;
//!     println!("{}", summary.describe());
//!
//!     Ok(())
//! }
//! ```
pub mod app;
pub mod clients;
pub mod core;
pub mod discord;
pub mod errors;
pub mod scrape;

pub use errors::DealError;

/// Configure structured logging with JSON output.
///
/// The level defaults to `info` and can be overridden through `RUST_LOG`.
/// Calling this more than once is harmless; later calls are ignored.
///
/// # Example
///
/// ```
/// dealbot::setup_logging();
/// ```
pub fn setup_logging() {
    use tracing_subscriber::EnvFilter;
    use tracing_subscriber::prelude::*;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let fmt_layer = tracing_subscriber::fmt::layer().json().with_target(true);

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}
