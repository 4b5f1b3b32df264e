//! Logging setup
//!
//! The terminal is owned by the TUI, so log output goes to a file in the data
//! directory instead of stderr.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Environment variable consulted after `RUST_LOG`
pub const LOG_ENV: &str = "TEECRAFT_LOG";

pub const LOG_FILE: &str = "teecraft.log";

/// Directory the log file is written to
pub fn log_dir() -> PathBuf {
    ProjectDirs::from("com", "teecraft", "teecraft")
        .map(|dirs| dirs.data_local_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from(".teecraft"))
}

/// Pick the filter directive: `RUST_LOG`, then `TEECRAFT_LOG`, then the configured level.
pub fn filter_directive(configured: &str) -> String {
    std::env::var("RUST_LOG")
        .or_else(|_| std::env::var(LOG_ENV))
        .unwrap_or_else(|_| format!("{}={}", env!("CARGO_CRATE_NAME"), configured))
}

/// Install the global file subscriber. Returns the log file path.
pub fn initialize_logging(configured_level: &str) -> Result<PathBuf> {
    let directory = log_dir();
    std::fs::create_dir_all(&directory)
        .with_context(|| format!("Failed to create log directory: {:?}", directory))?;
    let log_path = directory.join(LOG_FILE);
    let log_file = std::fs::File::create(&log_path)
        .with_context(|| format!("Failed to create log file: {:?}", log_path))?;

    let filter = EnvFilter::try_new(filter_directive(configured_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let file_layer = fmt::layer()
        .with_file(true)
        .with_line_number(true)
        .with_writer(log_file)
        .with_target(false)
        .with_ansi(false)
        .with_filter(filter);

    tracing_subscriber::registry()
        .with(file_layer)
        .try_init()
        .context("Failed to install log subscriber")?;

    Ok(log_path)
}
