//! Listing-page parser for latestdeals.co.uk.

use scraper::{ElementRef, Html};
use tracing::debug;

use crate::core::models::{DISCOUNT_PLACEHOLDER, Deal, DealSource, ScrapedPage};
use crate::errors::DealError;
use crate::scrape::html::{attr, element_text, first_image, first_text, resolve, selector};

const SOURCE: DealSource = DealSource::LatestDeals;

pub fn parse_page(body: &str, is_last_page: bool) -> Result<ScrapedPage, DealError> {
    let document = Html::parse_document(body);

    let card_sel = selector("div.ld-card.ld-card--deal")?;
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
            None => debug!("Skipping LatestDeals card without title, link or price"),
        }
    }

    if !is_last_page {
        let next_sel = selector("li.pagination__item--next a.pagination__link")?;
        let href = document
            .select(&next_sel)
            .next()
            .and_then(|a| attr(a, "href"));
        page.next_url = href.and_then(|href| resolve(SOURCE.origin(), &href));
    }

    Ok(page)
}

fn parse_card(card: ElementRef<'_>) -> Result<Option<Deal>, DealError> {
    let anchor_sel = selector("h2.ld-card__title a.ld-card__link")?;
    let price_sel = selector("span.ld-card__price")?;
    let likes_sel = selector("span.js-likes-count")?;
    let image_sel = selector("img.ld-card__image")?;

    let Some(anchor) = card.select(&anchor_sel).next() else {
        return Ok(None);
    };

    let title = element_text(anchor);
    let link = attr(anchor, "href")
        .and_then(|href| resolve(SOURCE.origin(), &href))
        .map(String::from);
    let price = first_text(card, &price_sel);

    let (Some(title), Some(link), Some(price)) = (title, link, price) else {
        return Ok(None);
    };

    let likes = first_text(card, &likes_sel).unwrap_or_else(|| "0".to_string());

    Ok(Some(Deal {
        title,
        price,
        link,
        image_url: first_image(card, &image_sel),
        metric_info: Some(format!("👍 {} Likes", likes)),
        discount_info: Some(DISCOUNT_PLACEHOLDER.to_string()),
    }))
}
