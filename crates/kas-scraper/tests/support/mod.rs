//! Fixtures shared by the integration tests: portal HTML and notice PDFs.

#![allow(dead_code)]

#[path = "../../src/pdf/testing.rs"]
mod pdf;

use kas_scraper::PageFetcher;
use pdf::TestPage;

/// Fetcher with short timeouts and no back-off sleeps.
pub fn test_fetcher(max_retries: u32) -> PageFetcher {
    PageFetcher::new("kas-test/0.1", 5, 5, max_retries, 0).expect("failed to build test PageFetcher")
}

/// A listing page advertising `total` pages, with one summary block per
/// auction id linking to `/aukcja/{id}`.
pub fn listing_html(total: u32, auction_ids: &[u32]) -> String {
    let mut pages: String = (1..=total)
        .rev()
        .map(|n| format!(r#"<li class="page-links-option"><a href="?cur={n}" title="Strona {n}">{n}</a></li>"#))
        .collect();
    pages.push_str(r#"<li class="page-links-option"><a href="?cur=2" title="Następna">»</a></li>"#);

    let summaries: String = auction_ids
        .iter()
        .map(|id| {
            format!(
                r#"<div class="article-summary">
                     <h3><a href="/aukcja/{id}/galeria">Zdjęcia</a></h3>
                     <p>Obwieszczenie o licytacji nr {id}</p>
                     <a href="/aukcja/{id}">Licytacja samochodu</a>
                   </div>"#
            )
        })
        .collect();

    format!(r#"<html><body><ul class="pagination">{pages}</ul>{summaries}</body></html>"#)
}

/// An auction detail page whose document link points at `pdf_href`.
pub fn auction_html(pdf_href: &str) -> String {
    format!(
        r#"<html><body>
             <a href="/ogloszenia">Powrót do listy</a>
             <a href="{pdf_href}">Obwieszczenie - samochód (PDF)</a>
           </body></html>"#
    )
}

/// An auction detail page without any document link.
pub fn auction_html_without_document() -> String {
    r#"<html><body><a href="/ogloszenia">Powrót do listy</a></body></html>"#.to_owned()
}

/// A one-page notice with a ruled two-row table: `header` over `value`
/// in the first column, `Lp.` over `1` in the second.
pub fn notice_pdf(header: &str, value: &str) -> Vec<u8> {
    TestPage::new()
        .grid(&[50, 300, 550], &[700, 650, 600])
        .text(55, 680, header)
        .text(305, 680, "Lp.")
        .text(55, 630, value)
        .text(305, 630, "1")
        .build()
}

/// A one-page notice with prose only.
pub fn prose_pdf() -> Vec<u8> {
    TestPage::new()
        .text(55, 700, "Naczelnik Urzędu Skarbowego zawiadamia o licytacji.")
        .build()
}
