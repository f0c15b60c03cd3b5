use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScraperError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("server error {status} from {url}")]
    ServerStatus { status: u16, url: String },

    #[error("not found: {url}")]
    NotFound { url: String },

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("invalid URL \"{url}\": {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("no document link on auction page {url}")]
    MarkerLinkMissing { url: String },
}

/// Failures while reading the layout of a PDF page.
///
/// These never leave the table extractor; a document that cannot be read
/// simply contributes no fields.
#[derive(Debug, Error)]
pub enum PdfError {
    #[error("failed to load PDF: {0}")]
    Load(#[from] pdfplumber::PdfError),

    #[error("PDF has no pages")]
    NoPages,
}
