//! Crawl of one region: listing pagination and per-auction enrichment.

use futures::stream::{self, Stream};
use futures::{FutureExt, TryStreamExt};
use kas_core::{AuctionRecord, RegionConfig};
use scraper::Html;

use crate::client::PageFetcher;
use crate::error::ScraperError;
use crate::listing::{listing_url, parse_auction_links, parse_total_pages, resolve_link};
use crate::resolver::resolve_pdf_url;
use crate::tables::extract_fields;

/// Position in the listing: the next page to fetch and, once page 1 has
/// been parsed, the page count it advertised.
#[derive(Debug, Clone, Copy)]
struct Cursor {
    page: u32,
    total: Option<u32>,
}

/// Crawls the auction listing of one region over a shared [`PageFetcher`].
#[derive(Clone, Copy)]
pub struct AuctionCrawler<'a> {
    fetcher: &'a PageFetcher,
    region: &'a RegionConfig,
    max_concurrent: usize,
}

impl<'a> AuctionCrawler<'a> {
    /// `max_concurrent` bounds how many auctions are processed at once
    /// (at least one).
    #[must_use]
    pub fn new(fetcher: &'a PageFetcher, region: &'a RegionConfig, max_concurrent: usize) -> Self {
        Self {
            fetcher,
            region,
            max_concurrent: max_concurrent.max(1),
        }
    }

    /// Auction detail URLs across all listing pages, in discovery order.
    ///
    /// Page 1 is fetched first to learn the page count; pages `2..=total`
    /// follow one at a time as the stream is polled. Links that cannot be
    /// resolved against the region origin are passed on as found.
    ///
    /// # Errors
    ///
    /// The stream yields the first listing-page fetch failure and ends.
    pub fn auction_urls(&self) -> impl Stream<Item = Result<String, ScraperError>> + 'a {
        let crawler = *self;
        let start = Cursor {
            page: 1,
            total: None,
        };
        stream::try_unfold(Some(start), move |cursor| async move {
            crawler.next_listing_page(cursor).await
        })
        .map_ok(|urls| stream::iter(urls.into_iter().map(Ok)))
        .try_flatten()
    }

    /// Crawls the whole region and returns one record per discovered
    /// auction, in discovery order.
    ///
    /// Up to `max_concurrent` auctions are in flight at once; a failing
    /// auction degrades its own record and never stops the crawl.
    ///
    /// # Errors
    ///
    /// Returns the error of the first listing page that could not be
    /// fetched; listing pages are required to discover the auctions.
    pub async fn crawl(&self) -> Result<Vec<AuctionRecord>, ScraperError> {
        self.crawl_with_progress(|_| {}).await
    }

    /// [`AuctionCrawler::crawl`], calling `on_record` with each record as it
    /// is finished, in discovery order.
    ///
    /// # Errors
    ///
    /// Same as [`AuctionCrawler::crawl`].
    pub async fn crawl_with_progress<F>(&self, on_record: F) -> Result<Vec<AuctionRecord>, ScraperError>
    where
        F: Fn(&AuctionRecord),
    {
        self.auction_urls()
            .map_ok(|url| self.collect_auction(url).map(Ok))
            .try_buffered(self.max_concurrent)
            .inspect_ok(|record| on_record(record))
            .try_collect()
            .await
    }

    /// Builds the record of one auction, enriching it as far as the detail
    /// page and its document allow.
    pub async fn collect_auction(&self, auction_url: String) -> AuctionRecord {
        let region = self.region.slug();
        let mut record = AuctionRecord::new(auction_url);

        let pdf_url = match self.locate_pdf(&record.auction_url).await {
            Ok(url) => url,
            Err(e) => {
                tracing::warn!(region, url = %record.auction_url, error = %e, "auction without document link");
                return record;
            }
        };
        record.pdf_url = Some(pdf_url.clone());

        let bytes = match self.fetcher.fetch_bytes(&pdf_url).await {
            Ok(Some(bytes)) => bytes,
            Ok(None) => return record,
            Err(e) => {
                tracing::warn!(region, url = %pdf_url, error = %e, "document download failed");
                return record;
            }
        };

        match tokio::task::spawn_blocking(move || extract_fields(&bytes)).await {
            Ok(fields) => {
                record.record_inspected_pdf(fields);
                tracing::debug!(region, url = %record.auction_url, "auction collected");
            }
            Err(e) => {
                tracing::warn!(region, url = %pdf_url, error = %e, "table extraction task failed");
            }
        }
        record
    }

    /// Fetches one listing page and advances the cursor; `None` once the
    /// last page has been read.
    async fn next_listing_page(
        &self,
        cursor: Option<Cursor>,
    ) -> Result<Option<(Vec<String>, Option<Cursor>)>, ScraperError> {
        let Some(Cursor { page, total }) = cursor else {
            return Ok(None);
        };

        let url = listing_url(self.region, page)?;
        let body = self.fetcher.fetch_text(url.as_str()).await?;
        let (advertised, hrefs) = {
            let doc = Html::parse_document(&body);
            (parse_total_pages(&doc), parse_auction_links(&doc))
        };
        let total = total.unwrap_or(advertised);

        let origin = self.region.origin();
        let urls: Vec<String> = hrefs
            .into_iter()
            .map(|href| resolve_link(&origin, &href).map_or(href, |u| u.to_string()))
            .collect();

        tracing::info!(
            region = self.region.slug(),
            page,
            total,
            auctions = urls.len(),
            "listing page parsed"
        );

        let next = (page < total).then_some(Cursor {
            page: page + 1,
            total: Some(total),
        });
        Ok(Some((urls, next)))
    }

    /// Absolute document URL found on the auction detail page.
    async fn locate_pdf(&self, auction_url: &str) -> Result<String, ScraperError> {
        let body = self.fetcher.fetch_text(auction_url).await?;
        let doc = Html::parse_document(&body);
        let url = resolve_pdf_url(&doc, &self.region.origin(), auction_url)?;
        Ok(url.to_string())
    }
}
