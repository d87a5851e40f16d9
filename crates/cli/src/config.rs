//! CLI configuration module

use std::path::PathBuf;

use clap::Args;

/// Storefront runtime settings, from flags, environment or `.env`.
#[derive(Debug, Args)]
pub struct StoreConfig {
    /// Directory the session state is persisted into
    #[arg(long, env = "BIKESTORE_DATA_DIR", default_value = ".bikestore")]
    pub data_dir: PathBuf,

    /// Directory downloaded artifacts are written into
    #[arg(long, env = "BIKESTORE_DOWNLOADS_DIR", default_value = "downloads")]
    pub downloads_dir: PathBuf,

    /// Log level filter when RUST_LOG is unset
    #[arg(long, env = "BIKESTORE_LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// Simulated email transport delay in milliseconds
    #[arg(long, env = "BIKESTORE_MAIL_DELAY_MS", default_value_t = 2000)]
    pub mail_delay_ms: u64,
}
