//! Table layout reader for the first page of a PDF.
//!
//! Auction notices are word-processor exports in which the item table is
//! drawn with ruling lines or thin filled rectangles. Page 1 is laid out by
//! `pdfplumber` and its lattice table finder rebuilds the grid of cells from
//! those rulings. Tables without rulings are not detected.

#[cfg(test)]
pub(crate) mod testing;

use pdfplumber::{Pdf, Strategy, TableSettings};

use crate::error::PdfError;

/// A ruled table, row by row from the top. `None` marks a grid position
/// with no cell of its own (a hole left by a spanning cell).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    pub rows: Vec<Vec<Option<String>>>,
}

/// Every ruled table on page 1 of `bytes`, top to bottom.
///
/// # Errors
///
/// - [`PdfError::Load`]: the document or its first page cannot be parsed.
/// - [`PdfError::NoPages`]: the page tree is empty.
pub fn first_page_tables(bytes: &[u8]) -> Result<Vec<Table>, PdfError> {
    let pdf = Pdf::open(bytes, None)?;
    if pdf.page_count() == 0 {
        return Err(PdfError::NoPages);
    }
    let page = pdf.page(0)?;
    let settings = TableSettings {
        strategy: Strategy::Lattice,
        ..TableSettings::default()
    };
    Ok(page
        .extract_tables(&settings)
        .into_iter()
        .map(|rows| Table { rows })
        .collect())
}
