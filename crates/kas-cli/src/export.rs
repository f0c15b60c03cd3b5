//! Output sinks for crawled auction records.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::Context;
use clap::ValueEnum;
use kas_core::AuctionRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    Csv,
    Json,
}

impl OutputFormat {
    pub(crate) fn extension(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
        }
    }
}

/// Writes `records` to `path`, replacing any existing file.
///
/// # Errors
///
/// Returns an error if the file cannot be created or written.
pub(crate) fn write_records_file(
    path: &Path,
    format: OutputFormat,
    records: &[AuctionRecord],
) -> anyhow::Result<()> {
    let file = File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
    let writer = BufWriter::new(file);
    match format {
        OutputFormat::Csv => write_csv(writer, records),
        OutputFormat::Json => write_json(writer, records),
    }
    .with_context(|| format!("failed to write {}", path.display()))
}

/// One header row of [`AuctionRecord::COLUMNS`], then one row per record.
/// Absent values are written as empty cells.
pub(crate) fn write_csv<W: Write>(writer: W, records: &[AuctionRecord]) -> anyhow::Result<()> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(AuctionRecord::COLUMNS)?;
    for record in records {
        csv.write_record(record.to_row())?;
    }
    csv.flush()?;
    Ok(())
}

/// A pretty-printed JSON array; each record holds only its present keys.
pub(crate) fn write_json<W: Write>(mut writer: W, records: &[AuctionRecord]) -> anyhow::Result<()> {
    serde_json::to_writer_pretty(&mut writer, records)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}
