//! One scraping pass over every deal site.

use tracing::{Instrument, info, info_span};
use uuid::Uuid;

use crate::clients::{HttpFetcher, PageFetcher};
use crate::core::config::AppConfig;
use crate::core::models::{DealSource, SourceReport};
use crate::discord::{DealNotifier, notifier_from_config};
use crate::errors::DealError;
use crate::scrape::run_all;

/// Totals for a finished run.
#[derive(Debug)]
pub struct RunSummary {
    pub run_id: Uuid,
    pub reports: Vec<SourceReport>,
}

impl RunSummary {
    #[must_use]
    pub fn total_deals(&self) -> usize {
        self.reports.iter().map(|r| r.deals.len()).sum()
    }

    #[must_use]
    pub fn deals_from(&self, source: DealSource) -> usize {
        self.reports
            .iter()
            .filter(|r| r.source == source)
            .map(|r| r.deals.len())
            .sum()
    }

    /// Human-readable closing line for the run log.
    #[must_use]
    pub fn describe(&self) -> String {
        if self.total_deals() == 0 {
            return "No new deals found from either HotUKDeals or LatestDeals in this run."
                .to_string();
        }
        format!(
            "Scraping complete. Found and attempted to send {} deals from HotUKDeals and {} deals from LatestDeals.",
            self.deals_from(DealSource::HotUkDeals),
            self.deals_from(DealSource::LatestDeals)
        )
    }
}

/// Run with the real HTTP fetcher and the notifier selected by `config`.
pub async fn run(config: &AppConfig) -> Result<RunSummary, DealError> {
    let fetcher = HttpFetcher::new(config)?;
    let notifier = notifier_from_config(config)?;
    Ok(run_with(config, &fetcher, notifier.as_ref()).await)
}

pub async fn run_with(
    config: &AppConfig,
    fetcher: &dyn PageFetcher,
    notifier: &dyn DealNotifier,
) -> RunSummary {
    let run_id = Uuid::new_v4();
    let span = info_span!("scrape_run", %run_id);

    async move {
        info!("Starting deal scraping from HotUKDeals and LatestDeals...");
        let reports = run_all(config, fetcher, notifier).await;
        for report in &reports {
            info!(
                source = %report.source,
                pages = report.pages_scraped,
                deals = report.deals.len(),
                notified = report.notified,
                stopped = ?report.stopped,
                "Finished source"
            );
        }
        let summary = RunSummary { run_id, reports };
        info!("{}", summary.describe());
        summary
    }
    .instrument(span)
    .await
}
