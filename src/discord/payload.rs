//! Discord webhook message bodies.
//!
//! Builds the JSON that Discord's "Execute Webhook" endpoint expects: one
//! embed per deal with price, source and popularity fields.

use serde::Serialize;

use crate::core::models::{Deal, DealSource};

/// Discord rejects embeds whose title exceeds this many characters.
pub const EMBED_TITLE_LIMIT: usize = 256;
/// Discord rejects embed field values longer than this.
pub const FIELD_VALUE_LIMIT: usize = 1024;

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct WebhookPayload {
    pub username: String,
    pub avatar_url: String,
    pub embeds: Vec<Embed>,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Embed {
    pub title: String,
    pub url: String,
    pub color: u32,
    pub fields: Vec<EmbedField>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<EmbedThumbnail>,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct EmbedField {
    pub name: String,
    pub value: String,
    pub inline: bool,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct EmbedThumbnail {
    pub url: String,
}

impl EmbedField {
    fn new(name: &str, value: &str, inline: bool) -> Self {
        Self {
            name: name.to_string(),
            value: truncate_chars(value, FIELD_VALUE_LIMIT),
            inline,
        }
    }
}

/// Build the webhook body announcing `deal` on behalf of `source`.
///
/// # Examples
///
/// ```
/// use dealbot::core::models::{Deal, DealSource};
/// use dealbot::discord::payload::build_webhook_payload;
///
/// let deal = Deal {
///     title: "Cheap kettle".into(),
///     price: "£9.99".into(),
///     link: "https://www.hotukdeals.com/deals/kettle-1".into(),
///     image_url: None,
///     metric_info: None,
///     discount_info: None,
/// };
/// let payload = build_webhook_payload(&deal, DealSource::HotUkDeals);
/// assert_eq!(payload.username, "HotUKDeals Deal Bot");
/// ```
#[must_use]
pub fn build_webhook_payload(deal: &Deal, source: DealSource) -> WebhookPayload {
    let mut fields = vec![
        EmbedField::new("Price", &deal.price, true),
        EmbedField::new("Source", source.name(), true),
    ];

    if let Some(discount) = deal.discount_info.as_deref()
        && discount != "N/A"
    {
        fields.push(EmbedField::new("Discount Info", discount, false));
    }

    if let Some(metric) = deal.metric_info.as_deref() {
        fields.push(EmbedField::new("Popularity", metric, true));
    }

    let embed = Embed {
        title: truncate_chars(&deal.title, EMBED_TITLE_LIMIT),
        url: deal.link.clone(),
        color: source.embed_color(),
        fields,
        thumbnail: deal
            .image_url
            .as_ref()
            .filter(|u| !u.is_empty())
            .map(|url| EmbedThumbnail { url: url.clone() }),
    };

    WebhookPayload {
        username: format!("{} Deal Bot", source.name()),
        avatar_url: source.avatar_url().to_string(),
        embeds: vec![embed],
    }
}

/// Truncate to at most `limit` characters, marking the cut with an ellipsis.
#[must_use]
pub fn truncate_chars(text: &str, limit: usize) -> String {
    if text.chars().count() <= limit {
        return text.to_string();
    }
    let mut out: String = text.chars().take(limit.saturating_sub(1)).collect();
    out.push('…');
    out
}
