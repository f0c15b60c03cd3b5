use std::path::PathBuf;

/// Runtime settings for a crawl process, read from `KAS_*` environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub log_level: String,
    pub regions_path: PathBuf,
    pub output_dir: PathBuf,
    pub user_agent: String,
    pub listing_timeout_secs: u64,
    pub pdf_timeout_secs: u64,
    pub max_retries: u32,
    pub retry_backoff_base_ms: u64,
    pub max_concurrent_auctions: usize,
}
