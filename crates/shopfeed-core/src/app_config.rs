use std::path::PathBuf;

/// Process-wide settings resolved from the environment.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub stores_path: PathBuf,
    pub channels_path: PathBuf,
    pub feeds_dir: PathBuf,
    pub public_dir: PathBuf,
    pub log_level: String,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub inter_request_delay_ms: u64,
    pub max_retries: u32,
    pub retry_backoff_base_secs: u64,
    /// Fixed pause after each successful file upload.
    pub upload_delay_ms: u64,
    /// Wait before re-querying a freshly created file for its CDN URL.
    pub cdn_poll_delay_ms: u64,
}
