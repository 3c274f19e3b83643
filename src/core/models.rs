use serde::Serialize;
use url::Url;

/// Text used when a site exposes no discount figure on its listing cards.
pub const DISCOUNT_PLACEHOLDER: &str = "Check deal page for discount details";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum DealSource {
    HotUkDeals,
    LatestDeals,
}

impl DealSource {
    pub const ALL: [DealSource; 2] = [DealSource::HotUkDeals, DealSource::LatestDeals];

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            DealSource::HotUkDeals => "HotUKDeals",
            DealSource::LatestDeals => "LatestDeals",
        }
    }

    /// Scheme and host that relative links on this site resolve against.
    #[must_use]
    pub fn origin(self) -> &'static str {
        match self {
            DealSource::HotUkDeals => "https://www.hotukdeals.com",
            DealSource::LatestDeals => "https://www.latestdeals.co.uk",
        }
    }

    #[must_use]
    pub fn start_url(self) -> &'static str {
        match self {
            DealSource::HotUkDeals => "https://www.hotukdeals.com/",
            DealSource::LatestDeals => "https://www.latestdeals.co.uk/deals",
        }
    }

    #[must_use]
    pub fn embed_color(self) -> u32 {
        match self {
            DealSource::HotUkDeals => 0x00FF_A500,
            DealSource::LatestDeals => 0x001E_90FF,
        }
    }

    #[must_use]
    pub fn avatar_url(self) -> &'static str {
        match self {
            DealSource::HotUkDeals => "https://www.hotukdeals.com/favicon.ico",
            DealSource::LatestDeals => "https://www.latestdeals.co.uk/favicon.ico",
        }
    }
}

impl std::fmt::Display for DealSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Deal {
    pub title: String,
    pub price: String,
    pub link: String,
    pub image_url: Option<String>,
    /// Popularity line, e.g. "🔥 512° Heat" or "👍 14 Likes".
    pub metric_info: Option<String>,
    pub discount_info: Option<String>,
}

/// Deals found on a single listing page plus the link to the following page.
#[derive(Debug, Default)]
pub struct ScrapedPage {
    /// Number of deal cards on the page, including incomplete ones.
    pub cards_found: usize,
    pub deals: Vec<Deal>,
    pub next_url: Option<Url>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StopReason {
    PageLimit,
    NoDeals,
    NoNextPage,
    FetchFailed(String),
}

#[derive(Debug)]
pub struct SourceReport {
    pub source: DealSource,
    pub pages_scraped: u32,
    pub deals: Vec<Deal>,
    pub notified: usize,
    pub stopped: StopReason,
}
