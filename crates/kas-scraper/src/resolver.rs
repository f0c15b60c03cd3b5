//! Locates the notice PDF on an auction detail page.

use reqwest::Url;
use scraper::Html;

use crate::error::ScraperError;
use crate::listing::{is_marker_link, resolve_link, ANCHORS};

/// Absolute URL of the first marker-labelled link on the detail page.
///
/// `page_url` only labels the error; relative links are resolved against
/// `origin` (the region's scheme and host).
///
/// # Errors
///
/// - [`ScraperError::MarkerLinkMissing`]: no anchor with the marker text and
///   an `href`; the auction is kept without a document.
/// - [`ScraperError::InvalidUrl`]: the link cannot be resolved.
pub fn resolve_pdf_url(doc: &Html, origin: &str, page_url: &str) -> Result<Url, ScraperError> {
    let href = doc
        .select(&ANCHORS)
        .filter(|a| is_marker_link(*a))
        .find_map(|a| a.value().attr("href"))
        .ok_or_else(|| ScraperError::MarkerLinkMissing {
            url: page_url.to_owned(),
        })?;

    resolve_link(origin, href)
}
