use crate::app_config::AppConfig;
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a numeric env var cannot be parsed.
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
/// Returns `ConfigError` if a numeric env var cannot be parsed.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so tests can drive it with a plain
/// `HashMap` instead of mutating process state.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let stores_path = PathBuf::from(or_default("SHOPFEED_STORES_PATH", "./config.yaml"));
    let channels_path = PathBuf::from(or_default(
        "SHOPFEED_CHANNELS_PATH",
        "./channel_mappings.yaml",
    ));
    let feeds_dir = PathBuf::from(or_default("SHOPFEED_FEEDS_DIR", "./feeds"));
    let public_dir = PathBuf::from(or_default("SHOPFEED_PUBLIC_DIR", "./docs"));
    let log_level = or_default("SHOPFEED_LOG_LEVEL", "info");

    let request_timeout_secs = parse_u64("SHOPFEED_REQUEST_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("SHOPFEED_USER_AGENT", "shopfeed/0.1 (product-feeds)");
    let inter_request_delay_ms = parse_u64("SHOPFEED_INTER_REQUEST_DELAY_MS", "0")?;
    let max_retries = parse_u32("SHOPFEED_MAX_RETRIES", "0")?;
    let retry_backoff_base_secs = parse_u64("SHOPFEED_RETRY_BACKOFF_BASE_SECS", "5")?;
    let upload_delay_ms = parse_u64("SHOPFEED_UPLOAD_DELAY_MS", "600")?;
    let cdn_poll_delay_ms = parse_u64("SHOPFEED_CDN_POLL_DELAY_MS", "2000")?;

    Ok(AppConfig {
        stores_path,
        channels_path,
        feeds_dir,
        public_dir,
        log_level,
        request_timeout_secs,
        user_agent,
        inter_request_delay_ms,
        max_retries,
        retry_backoff_base_secs,
        upload_delay_ms,
        cdn_poll_delay_ms,
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
