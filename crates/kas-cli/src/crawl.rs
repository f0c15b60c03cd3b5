//! Crawl command handlers.
//!
//! Each region gets its own fetcher and output file. A failed region is
//! logged and skipped so the remaining regions still run.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use indicatif::{ProgressBar, ProgressStyle};
use kas_core::{AppConfig, CrawlStats, RegionConfig};
use kas_scraper::{AuctionCrawler, PageFetcher};

use crate::export::{write_records_file, OutputFormat};

/// Regions from the configured regions file, or the built-in list when the
/// file does not exist.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or is invalid.
pub(crate) fn load_configured_regions(config: &AppConfig) -> anyhow::Result<Vec<RegionConfig>> {
    let path = &config.regions_path;
    if !path.exists() {
        tracing::info!(path = %path.display(), "regions file not found, using built-in regions");
        return Ok(kas_core::default_regions());
    }
    kas_core::load_regions(path)
        .with_context(|| format!("failed to load regions from {}", path.display()))
}

/// Prints one line per region: slug and listing URL of page 1.
///
/// # Errors
///
/// Returns an error if a region's origin is not a valid URL.
pub(crate) fn print_regions(regions: &[RegionConfig]) -> anyhow::Result<()> {
    for region in regions {
        let url = kas_scraper::listing_url(region, 1)?;
        println!("{}\t{url}", region.slug());
    }
    Ok(())
}

/// Crawls each region in turn and writes `{output_dir}/{slug}.{ext}`.
///
/// # Errors
///
/// Returns an error if the output directory cannot be created or every
/// region failed.
pub(crate) async fn run_crawl(
    config: &AppConfig,
    regions: &[RegionConfig],
    format: OutputFormat,
    output_dir: &Path,
) -> anyhow::Result<()> {
    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("failed to create output directory {}", output_dir.display()))?;

    let mut failed = 0usize;
    for region in regions {
        if let Err(e) = crawl_region(config, region, format, output_dir).await {
            failed += 1;
            tracing::error!(region = region.slug(), error = %format!("{e:#}"), "region crawl failed");
        }
    }

    if !regions.is_empty() && failed == regions.len() {
        anyhow::bail!("all {failed} selected regions failed");
    }
    Ok(())
}

async fn crawl_region(
    config: &AppConfig,
    region: &RegionConfig,
    format: OutputFormat,
    output_dir: &Path,
) -> anyhow::Result<PathBuf> {
    tracing::info!(region = region.slug(), "crawling region");
    let fetcher = PageFetcher::from_app_config(config).context("failed to build HTTP client")?;
    let progress = region_progress(region.slug())?;
    let crawled = AuctionCrawler::new(&fetcher, region, config.max_concurrent_auctions)
        .crawl_with_progress(|_| progress.inc(1))
        .await;
    progress.finish_and_clear();
    let records = crawled.with_context(|| format!("crawl of region '{}' failed", region.slug()))?;

    let path = output_dir.join(format!("{}.{}", region.slug(), format.extension()));
    write_records_file(&path, format, &records)?;

    let stats = CrawlStats::from_records(&records);
    tracing::info!(
        region = region.slug(),
        records = stats.records,
        with_pdf = stats.with_pdf,
        with_values = stats.with_values,
        path = %path.display(),
        "region crawl complete"
    );
    Ok(path)
}

/// Spinner counting finished auctions; the total is unknown until the
/// listing has been walked.
fn region_progress(slug: &str) -> anyhow::Result<ProgressBar> {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
            .template("{spinner:.cyan} {msg}: {pos} auctions ({elapsed})")?,
    );
    pb.set_message(slug.to_owned());
    pb.enable_steady_tick(Duration::from_millis(100));
    Ok(pb)
}
