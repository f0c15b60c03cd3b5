use crate::app_config::AppConfig;
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but cannot be parsed.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but cannot be parsed.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Every setting has a default, so an empty environment yields a usable config.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let log_level = or_default("KAS_LOG_LEVEL", "info");
    let regions_path = PathBuf::from(or_default("KAS_REGIONS_PATH", "./config/regions.yaml"));
    let output_dir = PathBuf::from(or_default("KAS_OUTPUT_DIR", "./output"));
    let user_agent = or_default(
        "KAS_USER_AGENT",
        "kas-auctions/0.1 (auction-listing-crawler)",
    );

    let listing_timeout_secs: u64 = parse_var(
        "KAS_LISTING_TIMEOUT_SECS",
        &or_default("KAS_LISTING_TIMEOUT_SECS", "30"),
    )?;
    let pdf_timeout_secs: u64 = parse_var(
        "KAS_PDF_TIMEOUT_SECS",
        &or_default("KAS_PDF_TIMEOUT_SECS", "180"),
    )?;
    let max_retries: u32 = parse_var("KAS_MAX_RETRIES", &or_default("KAS_MAX_RETRIES", "3"))?;
    let retry_backoff_base_ms: u64 = parse_var(
        "KAS_RETRY_BACKOFF_BASE_MS",
        &or_default("KAS_RETRY_BACKOFF_BASE_MS", "500"),
    )?;
    let max_concurrent_auctions: usize = parse_var(
        "KAS_MAX_CONCURRENT_AUCTIONS",
        &or_default("KAS_MAX_CONCURRENT_AUCTIONS", "3"),
    )?;

    Ok(AppConfig {
        log_level,
        regions_path,
        output_dir,
        user_agent,
        listing_timeout_secs,
        pdf_timeout_secs,
        max_retries,
        retry_backoff_base_ms,
        max_concurrent_auctions: max_concurrent_auctions.max(1),
    })
}

/// Parse a raw env-var value, mapping failures to [`ConfigError::InvalidEnvVar`].
fn parse_var<T>(var: &str, raw: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
