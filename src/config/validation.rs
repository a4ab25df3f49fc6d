//! Configuration validation.

use anyhow::{bail, Result};
use std::path::Path;

use super::Config;

/// Validate configuration.
pub fn validate(config: &Config) -> Result<()> {
    check_path("log_path", &config.log_path)?;
    check_path("presets_dir", &config.presets_dir)?;
    check_file("filter_path", &config.filter_path)?;
    check_file("pool_path", &config.pool_path)?;
    Ok(())
}

fn check_path(key: &str, path: &Path) -> Result<()> {
    if path.as_os_str().is_empty() {
        bail!("{}: path cannot be empty", key);
    }
    if path.to_string_lossy().contains('\0') {
        bail!("Invalid {}: contains null character", key);
    }
    Ok(())
}

fn check_file(key: &str, path: &Path) -> Result<()> {
    check_path(key, path)?;
    if path.file_name().is_none() {
        bail!("{}: '{}' does not name a file", key, path.display());
    }
    Ok(())
}
