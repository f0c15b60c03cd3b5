mod crawl;
mod export;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::export::OutputFormat;

#[derive(Debug, Parser)]
#[command(name = "kas-cli")]
#[command(about = "Crawls tax office auction notices into tabular files")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Crawl the auction listings and write one file per region.
    Crawl {
        /// Region slug to crawl (repeatable); every configured region when omitted.
        #[arg(long = "region", value_name = "SLUG")]
        regions: Vec<String>,
        /// Output file format.
        #[arg(long, value_enum, default_value_t = OutputFormat::Csv)]
        format: OutputFormat,
        /// Directory for the output files (overrides `KAS_OUTPUT_DIR`).
        #[arg(long, value_name = "DIR")]
        output_dir: Option<PathBuf>,
    },
    /// Print the configured regions with their first listing page URL.
    Regions,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    dotenvy::dotenv().ok();
    let config = kas_core::load_app_config_from_env()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let regions = crawl::load_configured_regions(&config)?;

    match cli.command {
        Commands::Crawl {
            regions: filter,
            format,
            output_dir,
        } => {
            let selected = kas_core::select_regions(&regions, &filter)?;
            let output_dir = output_dir.unwrap_or_else(|| config.output_dir.clone());
            crawl::run_crawl(&config, &selected, format, &output_dir).await
        }
        Commands::Regions => crawl::print_regions(&regions),
    }
}
