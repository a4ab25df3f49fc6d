//! File logging with daily rotation.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use std::time::{Duration, SystemTime};
use time::macros::format_description;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt;
use tracing_subscriber::fmt::time::OffsetTime;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

use crate::config::Config;

/// Prefix of every log file name.
pub const LOG_FILE_PREFIX: &str = "kaputt-filter";

/// Log files older than this are removed on startup.
const LOG_RETENTION: Duration = Duration::from_secs(2 * 24 * 60 * 60);

/// Install the global subscriber writing to `config.log_path`.
pub fn init(config: &Config) -> Result<()> {
    fs::create_dir_all(&config.log_path).with_context(|| {
        format!(
            "Failed to create log directory: {}",
            config.log_path.display()
        )
    })?;

    cleanup_old_logs(&config.log_path, LOG_RETENTION)?;

    let file_appender =
        RollingFileAppender::new(Rotation::DAILY, &config.log_path, LOG_FILE_PREFIX);

    let time_format = format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");
    let local_offset = time::UtcOffset::current_local_offset().unwrap_or(time::UtcOffset::UTC);
    let timer = OffsetTime::new(local_offset, time_format);

    let subscriber = tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(tracing::Level::DEBUG.into()))
        .with(
            fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false)
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .with_timer(timer),
        );

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow::anyhow!("Failed to set global subscriber: {}", e))?;

    tracing::info!("kaputt-filter {} logging started", env!("CARGO_PKG_VERSION"));
    Ok(())
}

/// Remove our log files last modified more than `retention` ago.
///
/// Returns the number of files removed.
pub fn cleanup_old_logs(log_path: &Path, retention: Duration) -> Result<usize> {
    if !log_path.exists() {
        return Ok(0);
    }
    let cutoff = SystemTime::now()
        .checked_sub(retention)
        .unwrap_or(SystemTime::UNIX_EPOCH);

    let mut removed = 0;
    for entry in fs::read_dir(log_path)? {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }
        let is_ours = path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.starts_with(LOG_FILE_PREFIX));
        if !is_ours {
            continue;
        }

        let modified = fs::metadata(&path).and_then(|m| m.modified());
        if matches!(modified, Ok(t) if t < cutoff) && fs::remove_file(&path).is_ok() {
            removed += 1;
        }
    }
    Ok(removed)
}
