//! Small helpers over `scraper` shared by the per-site parsers.

use scraper::{ElementRef, Selector};
use tracing::debug;
use url::Url;

use crate::errors::DealError;

pub fn selector(css: &str) -> Result<Selector, DealError> {
    Selector::parse(css).map_err(|e| DealError::Parse(format!("bad selector `{}`: {}", css, e)))
}

/// Whitespace-collapsed text of an element, `None` when blank.
#[must_use]
pub fn element_text(element: ElementRef<'_>) -> Option<String> {
    let text = element
        .text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ");
    (!text.is_empty()).then_some(text)
}

#[must_use]
pub fn first_text(scope: ElementRef<'_>, selector: &Selector) -> Option<String> {
    scope.select(selector).next().and_then(element_text)
}

#[must_use]
pub fn attr(element: ElementRef<'_>, name: &str) -> Option<String> {
    element
        .value()
        .attr(name)
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

#[must_use]
pub fn first_attr(scope: ElementRef<'_>, selector: &Selector, name: &str) -> Option<String> {
    scope.select(selector).next().and_then(|el| attr(el, name))
}

/// Image URL of the first match, preferring `src` and falling back to the
/// lazy-load `data-src` attribute. Inline `data:` placeholders are ignored.
#[must_use]
pub fn first_image(scope: ElementRef<'_>, selector: &Selector) -> Option<String> {
    let img = scope.select(selector).next()?;
    ["src", "data-src"]
        .into_iter()
        .filter_map(|name| attr(img, name))
        .find(|v| !v.starts_with("data:"))
}

/// Links already starting with `http` pass through untouched; anything else
/// is resolved against `origin`.
pub fn absolutize(origin: &str, href: &str) -> Result<String, DealError> {
    let href = href.trim();
    if href.starts_with("http") {
        return Ok(href.to_string());
    }
    Ok(Url::parse(origin)?.join(href)?.to_string())
}

/// Like [`absolutize`], but a link that cannot be resolved is logged and
/// treated as absent.
#[must_use]
pub fn resolve(origin: &str, href: &str) -> Option<Url> {
    match absolutize(origin, href).and_then(|link| Ok(Url::parse(&link)?)) {
        Ok(url) => Some(url),
        Err(e) => {
            debug!(href, "Ignoring unresolvable link: {}", e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    #[test]
    fn absolutize_resolves_relative_links_against_origin() {
        assert_eq!(
            absolutize("https://www.hotukdeals.com", "/deals/foo-123").unwrap(),
            "https://www.hotukdeals.com/deals/foo-123"
        );
        assert_eq!(
            absolutize("https://www.hotukdeals.com", "https://other.example/x").unwrap(),
            "https://other.example/x"
        );
    }

    #[test]
    fn resolve_drops_malformed_links() {
        assert_eq!(resolve("https://www.hotukdeals.com", "//[bad"), None);
        assert_eq!(resolve("https://www.hotukdeals.com", "http://[bad"), None);
        assert_eq!(
            resolve("https://www.hotukdeals.com", "/?page=2").map(String::from),
            Some("https://www.hotukdeals.com/?page=2".to_string())
        );
    }

    #[test]
    fn element_text_collapses_whitespace() {
        let doc = Html::parse_fragment("<p>  £9.99 \n   <b>now</b>  </p>");
        let p = selector("p").unwrap();
        let el = doc.select(&p).next().unwrap();
        assert_eq!(element_text(el).as_deref(), Some("£9.99 now"));
    }

    #[test]
    fn first_image_skips_inline_placeholders() {
        let doc = Html::parse_fragment(
            r#"<div><img class="x" src="data:image/gif;base64,R0lGOD" data-src="https://img.example/a.jpg"></div>"#,
        );
        let root = doc.root_element();
        let img = selector("img.x").unwrap();
        assert_eq!(
            first_image(root, &img).as_deref(),
            Some("https://img.example/a.jpg")
        );
    }
}
