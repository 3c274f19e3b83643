//! Deal-site scraping
//!
//! `hotukdeals` and `latestdeals` only read HTML; `runner` owns paging,
//! politeness delays and hand-off to the notifier.

pub mod hotukdeals;
pub mod html;
pub mod latestdeals;
pub mod runner;

use crate::core::models::{DealSource, ScrapedPage};
use crate::errors::DealError;

pub use runner::{ScrapeSettings, run_all, scrape_source};

/// Parse one listing page of `source`. `is_last_page` suppresses the
/// next-page lookup once the page budget is spent.
pub fn parse_page(
    source: DealSource,
    body: &str,
    is_last_page: bool,
) -> Result<ScrapedPage, DealError> {
    match source {
        DealSource::HotUkDeals => hotukdeals::parse_page(body, is_last_page),
        DealSource::LatestDeals => latestdeals::parse_page(body, is_last_page),
    }
}
