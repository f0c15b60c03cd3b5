pub mod client;
pub mod crawler;
pub mod error;
pub mod listing;
pub mod pdf;
pub mod resolver;
pub(crate) mod retry;
pub mod tables;

pub use client::PageFetcher;
pub use crawler::AuctionCrawler;
pub use error::{PdfError, ScraperError};
pub use listing::{listing_url, parse_auction_links, parse_total_pages, MARKER_TEXT};
pub use resolver::resolve_pdf_url;
pub use tables::{extract_fields, fields_from_tables};
