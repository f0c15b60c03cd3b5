//! Maps the ruled tables of an auction notice onto the four known fields.

use std::collections::BTreeMap;

use kas_core::AuctionField;

use crate::pdf::{first_page_tables, Table};

/// Fields found in the first-page tables of `pdf_bytes`.
///
/// A document that cannot be read, or whose first page has no ruled
/// tables, yields an empty mapping.
pub fn extract_fields(pdf_bytes: &[u8]) -> BTreeMap<AuctionField, String> {
    match first_page_tables(pdf_bytes) {
        Ok(tables) => fields_from_tables(&tables),
        Err(e) => {
            tracing::debug!(error = %e, "unreadable PDF layout, no fields extracted");
            BTreeMap::new()
        }
    }
}

/// Pairs each table's header row with its second row, keeping only columns
/// whose header is a known field label.
///
/// Fragments of a field that recurs across tables are joined with a single
/// space in encounter order.
pub fn fields_from_tables(tables: &[Table]) -> BTreeMap<AuctionField, String> {
    let mut fragments: BTreeMap<AuctionField, Vec<String>> = BTreeMap::new();

    for table in tables {
        let [header, values, ..] = table.rows.as_slice() else {
            continue;
        };
        for (i, header_cell) in header.iter().enumerate() {
            let Some(field) = AuctionField::from_label(&normalise(header_cell.as_deref())) else {
                continue;
            };
            let value = values.get(i).and_then(Option::as_deref);
            fragments.entry(field).or_default().push(normalise(value));
        }
    }

    fragments
        .into_iter()
        .map(|(field, parts)| (field, parts.join(" ")))
        .collect()
}

fn normalise(cell: Option<&str>) -> String {
    cell.unwrap_or_default().replace('\n', " ").trim().to_owned()
}
