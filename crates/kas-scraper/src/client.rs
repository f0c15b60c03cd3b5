//! HTTP page fetcher shared by every request of one region crawl.

use std::time::Duration;

use reqwest::{Client, Response, StatusCode, Url};

use crate::error::ScraperError;
use crate::retry::retry_with_backoff;

/// Fetches listing pages, auction pages and notice PDFs over one
/// connection pool.
///
/// Transient failures (network errors, 5xx) are retried with exponential
/// backoff up to `max_retries` additional attempts. `reqwest::Client` is
/// internally reference-counted, so concurrent auction tasks share the
/// fetcher by reference.
pub struct PageFetcher {
    client: Client,
    listing_timeout: Duration,
    pdf_timeout: Duration,
    max_retries: u32,
    backoff_base_ms: u64,
}

impl PageFetcher {
    /// Creates a fetcher with its own connection pool.
    ///
    /// `listing_timeout_secs` bounds HTML page requests, `pdf_timeout_secs`
    /// bounds document downloads, which can be several megabytes.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        user_agent: &str,
        listing_timeout_secs: u64,
        pdf_timeout_secs: u64,
        max_retries: u32,
        backoff_base_ms: u64,
    ) -> Result<Self, ScraperError> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self {
            client,
            listing_timeout: Duration::from_secs(listing_timeout_secs),
            pdf_timeout: Duration::from_secs(pdf_timeout_secs),
            max_retries,
            backoff_base_ms,
        })
    }

    /// # Errors
    ///
    /// See [`PageFetcher::new`].
    pub fn from_app_config(config: &kas_core::AppConfig) -> Result<Self, ScraperError> {
        Self::new(
            &config.user_agent,
            config.listing_timeout_secs,
            config.pdf_timeout_secs,
            config.max_retries,
            config.retry_backoff_base_ms,
        )
    }

    /// Fetches an HTML page as text.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::NotFound`]: HTTP 404 (not retried).
    /// - [`ScraperError::UnexpectedStatus`]: other non-2xx, non-5xx status (not retried).
    /// - [`ScraperError::ServerStatus`]: 5xx after all retries exhausted.
    /// - [`ScraperError::Http`]: network or TLS failure after all retries exhausted.
    /// - [`ScraperError::InvalidUrl`]: `url` does not parse.
    pub async fn fetch_text(&self, url: &str) -> Result<String, ScraperError> {
        let url = parse_url(url)?;
        retry_with_backoff(self.max_retries, self.backoff_base_ms, || {
            let url = url.clone();
            async move {
                let response = self.send(url, self.listing_timeout).await?;
                Ok(response.text().await?)
            }
        })
        .await
    }

    /// Downloads a document.
    ///
    /// Returns `Ok(None)` when the server answers with a 4xx status: the
    /// document is missing on the portal, which is an expected outcome for
    /// withdrawn notices.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::ServerStatus`]: 5xx after all retries exhausted.
    /// - [`ScraperError::Http`]: network or TLS failure after all retries exhausted.
    /// - [`ScraperError::InvalidUrl`]: `url` does not parse.
    pub async fn fetch_bytes(&self, url: &str) -> Result<Option<Vec<u8>>, ScraperError> {
        let parsed = parse_url(url)?;
        let result = retry_with_backoff(self.max_retries, self.backoff_base_ms, || {
            let url = parsed.clone();
            async move {
                let response = self.send(url, self.pdf_timeout).await?;
                Ok(response.bytes().await?.to_vec())
            }
        })
        .await;

        match result {
            Ok(bytes) => Ok(Some(bytes)),
            Err(ScraperError::NotFound { .. }) => {
                tracing::info!(url, "document not found on server");
                Ok(None)
            }
            Err(ScraperError::UnexpectedStatus { status, .. }) if (400..500).contains(&status) => {
                tracing::info!(url, status, "document unavailable");
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }

    /// Sends one GET and maps the status line onto [`ScraperError`].
    async fn send(&self, url: Url, timeout: Duration) -> Result<Response, ScraperError> {
        let response = self.client.get(url).timeout(timeout).send().await?;
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let url = response.url().to_string();
        if status == StatusCode::NOT_FOUND {
            return Err(ScraperError::NotFound { url });
        }
        if status.is_server_error() {
            return Err(ScraperError::ServerStatus {
                status: status.as_u16(),
                url,
            });
        }
        Err(ScraperError::UnexpectedStatus {
            status: status.as_u16(),
            url,
        })
    }
}

fn parse_url(url: &str) -> Result<Url, ScraperError> {
    Url::parse(url).map_err(|e| ScraperError::InvalidUrl {
        url: url.to_owned(),
        reason: e.to_string(),
    })
}
