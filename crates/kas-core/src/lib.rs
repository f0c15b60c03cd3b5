pub mod app_config;
pub mod auction;
pub mod config;
pub mod error;
pub mod regions;

pub use app_config::AppConfig;
pub use auction::{AuctionField, AuctionRecord, CrawlStats};
pub use config::{load_app_config, load_app_config_from_env};
pub use error::ConfigError;
pub use regions::{default_regions, load_regions, select_regions, RegionConfig, LISTING_QUERY};
