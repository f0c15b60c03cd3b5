//! Listing page parsing: page count and auction detail links.
//!
//! The portal renders pagination as `li.page-links-option` items whose
//! links carry a human readable `title` such as "Strona 5". Auction entries
//! are `div.article-summary` blocks; the link to the detail page is the one
//! whose own text contains [`MARKER_TEXT`] (the site offers no class or id
//! to tell it apart from the other links in the block).

use std::sync::LazyLock;

use kas_core::{RegionConfig, LISTING_QUERY};
use regex::Regex;
use reqwest::Url;
use scraper::{ElementRef, Html, Selector};

use crate::error::ScraperError;

/// Substring identifying document/detail links by their visible label.
pub const MARKER_TEXT: &str = "amoch";

static PAGE_LINKS: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("li.page-links-option a").expect("valid selector"));
static SUMMARIES: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("div.article-summary").expect("valid selector"));
pub(crate) static ANCHORS: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a").expect("valid selector"));
static DIGITS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+").expect("valid regex"));

/// Builds the URL of listing page `page` (1-based) for `region`.
///
/// # Errors
///
/// Returns [`ScraperError::InvalidUrl`] if the region origin is not a valid
/// URL base.
pub fn listing_url(region: &RegionConfig, page: u32) -> Result<Url, ScraperError> {
    let base = format!("{}{}", region.origin(), region.listing_path());
    let mut url = Url::parse(&base).map_err(|e| ScraperError::InvalidUrl {
        url: base.clone(),
        reason: e.to_string(),
    })?;

    url.query_pairs_mut()
        .extend_pairs(LISTING_QUERY)
        .append_pair("cur", &page.to_string());

    Ok(url)
}

/// Highest page number advertised by the pagination controls, or 1 when the
/// listing has none.
#[must_use]
pub fn parse_total_pages(doc: &Html) -> u32 {
    doc.select(&PAGE_LINKS)
        .filter_map(|link| {
            let label = link
                .value()
                .attr("title")
                .map_or_else(|| link.text().collect::<String>(), str::to_owned);
            DIGITS
                .find(&label)
                .and_then(|m| m.as_str().parse::<u32>().ok())
        })
        .fold(1, u32::max)
}

/// `href`s of the detail links of every auction summary, in document order.
#[must_use]
pub fn parse_auction_links(doc: &Html) -> Vec<String> {
    doc.select(&SUMMARIES)
        .flat_map(|summary| summary.select(&ANCHORS))
        .filter(|a| is_marker_link(*a))
        .filter_map(|a| a.value().attr("href"))
        .map(str::to_owned)
        .collect()
}

/// `true` when one of the anchor's own text nodes contains [`MARKER_TEXT`].
pub(crate) fn is_marker_link(anchor: ElementRef<'_>) -> bool {
    anchor
        .children()
        .filter_map(|node| node.value().as_text())
        .any(|text| text.contains(MARKER_TEXT))
}

/// Resolves a possibly relative link against the region origin.
///
/// # Errors
///
/// Returns [`ScraperError::InvalidUrl`] if either the origin or the joined
/// link does not parse.
pub(crate) fn resolve_link(origin: &str, href: &str) -> Result<Url, ScraperError> {
    let base = Url::parse(&format!("{origin}/")).map_err(|e| ScraperError::InvalidUrl {
        url: origin.to_owned(),
        reason: e.to_string(),
    })?;
    base.join(href.trim()).map_err(|e| ScraperError::InvalidUrl {
        url: href.to_owned(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
#[path = "listing_test.rs"]
mod tests;
