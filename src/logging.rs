//! Logging configuration using the tracing ecosystem.
//!
//! Output goes to a daily rotating file so it never corrupts the terminal UI.
//! The `[logging]` config section picks the directory and level; `RUST_LOG`
//! still wins when set.

use std::path::PathBuf;

use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

use crate::config::LoggingConfig;

/// Base name of the rotating log files.
const LOG_FILE_PREFIX: &str = "clientdesk.log";

/// Initialize the logging system.
///
/// # Log Directory
///
/// `logging.directory` when set, otherwise:
/// - Linux: `~/.local/share/clientdesk/logs/`
/// - macOS: `~/Library/Application Support/clientdesk/logs/`
/// - Windows: `C:\Users\<User>\AppData\Local\clientdesk\logs\`
///
/// # Log Levels
///
/// - `debug` - requests, responses and state changes
/// - `trace` - every message applied to the screen state
///
/// # Errors
///
/// Returns an error if the log directory cannot be determined or created, or
/// if a global subscriber is already set.
pub fn init(config: &LoggingConfig) -> anyhow::Result<()> {
    let log_dir = resolve_directory(config)?;
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = RollingFileAppender::new(Rotation::DAILY, &log_dir, LOG_FILE_PREFIX);

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.filter_directive()));

    let subscriber = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(true)
                .with_file(true)
                .with_line_number(true),
        )
        .with(filter);

    tracing::subscriber::set_global_default(subscriber)?;

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        level = %config.level,
        "clientdesk starting up"
    );
    tracing::debug!(log_dir = %log_dir.display(), "Log directory");

    Ok(())
}

fn resolve_directory(config: &LoggingConfig) -> anyhow::Result<PathBuf> {
    if let Some(dir) = &config.directory {
        return Ok(dir.clone());
    }

    let base_dir = dirs::data_local_dir()
        .ok_or_else(|| anyhow::anyhow!("Could not determine local data directory"))?;
    Ok(base_dir.join("clientdesk").join("logs"))
}

/// Get the path where logs are stored, for display in the help screen.
pub fn log_directory(config: &LoggingConfig) -> Option<PathBuf> {
    resolve_directory(config).ok()
}

/// Log application shutdown.
pub fn shutdown() {
    tracing::info!("clientdesk shutting down");
}
