//! Auction records produced by a region crawl.
//!
//! A record always carries the auction detail URL. The PDF URL is present
//! once the detail page yielded a document link, and the four table fields
//! are present once that document was downloaded and inspected.

use std::collections::BTreeMap;

use serde::ser::{Serialize, SerializeMap, Serializer};

/// The fields read from the table on the first page of an auction notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AuctionField {
    ObjectDescription,
    EstimatedValue,
    OpeningPrice,
    Remarks,
}

impl AuctionField {
    pub const ALL: [Self; 4] = [
        Self::ObjectDescription,
        Self::EstimatedValue,
        Self::OpeningPrice,
        Self::Remarks,
    ];

    /// Column header as printed in the notice table.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::ObjectDescription => "Określenie ruchomości",
            Self::EstimatedValue => "Wartość szacunkowa",
            Self::OpeningPrice => "Cena wywołania",
            Self::Remarks => "Uwagi",
        }
    }

    /// Exact match against a normalised table header.
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.label() == label)
    }
}

impl std::fmt::Display for AuctionField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuctionRecord {
    pub auction_url: String,
    pub pdf_url: Option<String>,
    pub fields: BTreeMap<AuctionField, String>,
}

impl AuctionRecord {
    pub const AUCTION_URL: &'static str = "auction_url";
    pub const PDF_URL: &'static str = "pdf_url";

    /// Tabular column order: the two URLs followed by the table fields.
    pub const COLUMNS: [&'static str; 6] = [
        Self::AUCTION_URL,
        Self::PDF_URL,
        "Określenie ruchomości",
        "Wartość szacunkowa",
        "Cena wywołania",
        "Uwagi",
    ];

    #[must_use]
    pub fn new(auction_url: impl Into<String>) -> Self {
        Self {
            auction_url: auction_url.into(),
            pdf_url: None,
            fields: BTreeMap::new(),
        }
    }

    /// Stores the outcome of inspecting the downloaded PDF.
    ///
    /// Every field ends up present; fields the document did not provide are
    /// stored as empty strings.
    pub fn record_inspected_pdf(&mut self, mut found: BTreeMap<AuctionField, String>) {
        for field in AuctionField::ALL {
            let value = found.remove(&field).unwrap_or_default();
            self.fields.insert(field, value);
        }
    }

    #[must_use]
    pub fn field(&self, field: AuctionField) -> Option<&str> {
        self.fields.get(&field).map(String::as_str)
    }

    /// `true` when at least one table field carries text.
    #[must_use]
    pub fn has_field_values(&self) -> bool {
        self.fields.values().any(|v| !v.is_empty())
    }

    /// Row in [`Self::COLUMNS`] order; absent values become empty cells.
    #[must_use]
    pub fn to_row(&self) -> Vec<String> {
        let mut row = Vec::with_capacity(Self::COLUMNS.len());
        row.push(self.auction_url.clone());
        row.push(self.pdf_url.clone().unwrap_or_default());
        row.extend(
            AuctionField::ALL
                .iter()
                .map(|f| self.field(*f).unwrap_or_default().to_owned()),
        );
        row
    }
}

/// Serialises as a flat string map holding only the keys that are present.
impl Serialize for AuctionRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let len = 1 + usize::from(self.pdf_url.is_some()) + self.fields.len();
        let mut map = serializer.serialize_map(Some(len))?;
        map.serialize_entry(Self::AUCTION_URL, &self.auction_url)?;
        if let Some(pdf_url) = &self.pdf_url {
            map.serialize_entry(Self::PDF_URL, pdf_url)?;
        }
        for (field, value) in &self.fields {
            map.serialize_entry(field.label(), value)?;
        }
        map.end()
    }
}

/// Summary of a finished region crawl.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CrawlStats {
    pub records: usize,
    pub with_pdf: usize,
    pub with_values: usize,
}

impl CrawlStats {
    #[must_use]
    pub fn from_records(records: &[AuctionRecord]) -> Self {
        Self {
            records: records.len(),
            with_pdf: records.iter().filter(|r| r.pdf_url.is_some()).count(),
            with_values: records.iter().filter(|r| r.has_field_values()).count(),
        }
    }
}
