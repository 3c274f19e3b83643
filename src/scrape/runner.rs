use std::collections::HashSet;
use std::time::Duration;

use rand::Rng;
use tracing::{error, info, warn};
use url::Url;

use crate::clients::PageFetcher;
use crate::core::config::AppConfig;
use crate::core::models::{DealSource, SourceReport, StopReason};
use crate::discord::DealNotifier;
use crate::scrape::parse_page;

#[derive(Debug, Clone, Copy)]
pub struct ScrapeSettings {
    pub max_pages: u32,
    pub min_delay: Duration,
    pub max_delay: Duration,
}

impl ScrapeSettings {
    #[must_use]
    pub fn for_source(config: &AppConfig, source: DealSource) -> Self {
        let max_pages = match source {
            DealSource::HotUkDeals => config.hotukdeals_max_pages,
            DealSource::LatestDeals => config.latestdeals_max_pages,
        };
        Self {
            max_pages,
            min_delay: config.min_page_delay,
            max_delay: config.max_page_delay,
        }
    }

    /// Uniformly random pause between two page requests.
    #[must_use]
    pub fn page_delay(&self) -> Duration {
        if self.max_delay <= self.min_delay {
            return self.min_delay;
        }
        rand::rng().random_range(self.min_delay..=self.max_delay)
    }
}

/// Scrape up to `settings.max_pages` listing pages of `source`, notifying
/// each new deal as soon as its page is parsed.
pub async fn scrape_source(
    source: DealSource,
    fetcher: &dyn PageFetcher,
    notifier: &dyn DealNotifier,
    settings: ScrapeSettings,
) -> SourceReport {
    let mut report = SourceReport {
        source,
        pages_scraped: 0,
        deals: Vec::new(),
        notified: 0,
        stopped: StopReason::PageLimit,
    };
    let mut seen_links: HashSet<String> = HashSet::new();

    let mut current_url = match Url::parse(source.start_url()) {
        Ok(url) => url,
        Err(e) => {
            report.stopped = StopReason::FetchFailed(e.to_string());
            return report;
        }
    };
    let mut page_num: u32 = 1;

    while page_num <= settings.max_pages {
        info!("Scraping {} page {} from {}...", source, page_num, current_url);

        let is_last_page = page_num >= settings.max_pages;
        let page = match fetcher.fetch(&current_url).await {
            Ok(body) => parse_page(source, &body, is_last_page),
            Err(e) => Err(e),
        };
        let page = match page {
            Ok(page) => page,
            Err(e) => {
                error!("Error scraping {}: {}", source, e);
                report.stopped = StopReason::FetchFailed(e.to_string());
                break;
            }
        };
        report.pages_scraped = page_num;

        if page.cards_found == 0 {
            info!(
                "No more products found on {} page or end of results.",
                source
            );
            report.stopped = StopReason::NoDeals;
            break;
        }

        for deal in page.deals {
            if !seen_links.insert(deal.link.clone()) {
                continue;
            }
            match notifier.notify(&deal, source).await {
                Ok(()) if notifier.is_enabled() => report.notified += 1,
                Ok(()) => {}
                Err(e) => error!("Error sending to Discord webhook from {}: {}", source, e),
            }
            report.deals.push(deal);
        }

        if is_last_page {
            report.stopped = StopReason::PageLimit;
            break;
        }
        let Some(next_url) = page.next_url else {
            info!("{}: No more pages or pagination button not found.", source);
            report.stopped = StopReason::NoNextPage;
            break;
        };
        if next_url == current_url {
            warn!("{}: pagination points back to {}, stopping", source, next_url);
            report.stopped = StopReason::NoNextPage;
            break;
        }

        current_url = next_url;
        page_num += 1;
        tokio::time::sleep(settings.page_delay()).await;
    }

    report
}

/// Scrape every supported site in turn.
pub async fn run_all(
    config: &AppConfig,
    fetcher: &dyn PageFetcher,
    notifier: &dyn DealNotifier,
) -> Vec<SourceReport> {
    let mut reports = Vec::with_capacity(DealSource::ALL.len());
    for source in DealSource::ALL {
        info!("--- Scraping {} ---", source);
        let settings = ScrapeSettings::for_source(config, source);
        reports.push(scrape_source(source, fetcher, notifier, settings).await);
    }
    reports
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_delay_stays_within_bounds() {
        let settings = ScrapeSettings {
            max_pages: 1,
            min_delay: Duration::from_millis(10),
            max_delay: Duration::from_millis(20),
        };
        for _ in 0..100 {
            let d = settings.page_delay();
            assert!(d >= settings.min_delay && d <= settings.max_delay);
        }
    }

    #[test]
    fn page_delay_with_equal_bounds_is_fixed() {
        let settings = ScrapeSettings {
            max_pages: 1,
            min_delay: Duration::ZERO,
            max_delay: Duration::ZERO,
        };
        assert_eq!(settings.page_delay(), Duration::ZERO);
    }

    #[test]
    fn settings_pick_the_per_source_budget() {
        let config = AppConfig {
            hotukdeals_max_pages: 5,
            latestdeals_max_pages: 1,
            ..AppConfig::default()
        };
        assert_eq!(
            ScrapeSettings::for_source(&config, DealSource::HotUkDeals).max_pages,
            5
        );
        assert_eq!(
            ScrapeSettings::for_source(&config, DealSource::LatestDeals).max_pages,
            1
        );
    }
}
