//! Listing-page parser for hotukdeals.com.

use scraper::{ElementRef, Html};
use tracing::debug;

use crate::core::models::{DISCOUNT_PLACEHOLDER, Deal, DealSource, ScrapedPage};
use crate::errors::DealError;
use crate::scrape::html::{first_attr, first_image, first_text, resolve, selector};

const SOURCE: DealSource = DealSource::HotUkDeals;

pub fn parse_page(body: &str, is_last_page: bool) -> Result<ScrapedPage, DealError> {
    let document = Html::parse_document(body);

    let card_sel = selector(r#"div[data-deal-id][data-card-type="deal"]"#)?;
    let cards: Vec<ElementRef<'_>> = document.select(&card_sel).collect();

    let mut page = ScrapedPage {
        cards_found: cards.len(),
        ..ScrapedPage::default()
    };
    if cards.is_empty() {
        return Ok(page);
    }

    for card in cards {
        match parse_card(card)? {
            Some(deal) => page.deals.push(deal),
            None => debug!(
                deal_id = card.value().attr("data-deal-id").unwrap_or_default(),
                "Skipping HotUKDeals card without title, link or price"
            ),
        }
    }

    // Pagination is only followed while the caller still has page budget.
    if !is_last_page {
        let next_sel = selector("a.pagination-next")?;
        page.next_url = first_attr(document.root_element(), &next_sel, "href")
            .and_then(|href| resolve(SOURCE.origin(), &href));
    }

    Ok(page)
}

fn parse_card(card: ElementRef<'_>) -> Result<Option<Deal>, DealError> {
    let title_sel = selector("a.cept-deal-title")?;
    let price_sel = selector("span.thread-price")?;
    let heat_sel = selector("span.cept-vote-temp")?;
    let image_sel = selector("img.cept-img-loaded")?;

    let title = first_text(card, &title_sel);
    let link = first_attr(card, &title_sel, "href")
        .and_then(|href| resolve(SOURCE.origin(), &href))
        .map(String::from);
    let price = first_text(card, &price_sel);

    let (Some(title), Some(link), Some(price)) = (title, link, price) else {
        return Ok(None);
    };

    let heat = first_text(card, &heat_sel).unwrap_or_else(|| "N/A".to_string());

    Ok(Some(Deal {
        title,
        price,
        link,
        image_url: first_image(card, &image_sel),
        metric_info: Some(format!("🔥 {} Heat", heat)),
        discount_info: Some(DISCOUNT_PLACEHOLDER.to_string()),
    }))
}
