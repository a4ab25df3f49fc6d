//! Configuration data types.

use anyhow::Result;
use serde::Deserialize;
use std::path::{Path, PathBuf};

use super::validation;

/// Main configuration structure.
///
/// Relative paths are resolved against the directory of the config file by
/// [`Config::resolve_paths`].
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Enable debug logging to file
    pub debug: bool,

    /// Path to log directory
    pub log_path: PathBuf,

    /// Filter pipeline file
    pub filter_path: PathBuf,

    /// Content pool file
    pub pool_path: PathBuf,

    /// Directory of saved filter presets
    pub presets_dir: PathBuf,

    /// Fixed generator seed, for reproducible picks
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            debug: false,
            log_path: PathBuf::from("logs"),
            filter_path: PathBuf::from(DEFAULT_FILTER_FILE),
            pool_path: PathBuf::from(DEFAULT_POOL_FILE),
            presets_dir: PathBuf::from("presets"),
            seed: None,
        }
    }
}

/// File name of the filter pipeline next to the config file.
pub const DEFAULT_FILTER_FILE: &str = "filters.toml";

/// File name of the content pool next to the config file.
pub const DEFAULT_POOL_FILE: &str = "anims.toml";

impl Config {
    /// Validate configuration and return errors if invalid.
    pub fn validate(&self) -> Result<()> {
        validation::validate(self)
    }

    /// Make every relative path absolute against `config_dir`.
    pub fn resolve_paths(&mut self, config_dir: &Path) {
        for path in [
            &mut self.log_path,
            &mut self.filter_path,
            &mut self.pool_path,
            &mut self.presets_dir,
        ] {
            *path = resolve(config_dir, path);
        }
    }
}

/// Expand a leading `~` and join relative paths onto `base`.
fn resolve(base: &Path, path: &Path) -> PathBuf {
    if let Ok(rest) = path.strip_prefix("~") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_resolve_against_config_dir() {
        let mut config = Config::default();
        config.resolve_paths(Path::new("/etc/kaputt"));
        assert_eq!(config.log_path, PathBuf::from("/etc/kaputt/logs"));
        assert_eq!(config.filter_path, PathBuf::from("/etc/kaputt/filters.toml"));
        assert_eq!(config.pool_path, PathBuf::from("/etc/kaputt/anims.toml"));
        assert_eq!(config.presets_dir, PathBuf::from("/etc/kaputt/presets"));
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let mut config: Config = toml::from_str(
            r#"
debug = true
filter_path = "/srv/filters/main.toml"
seed = 42
"#,
        )
        .unwrap();
        config.resolve_paths(Path::new("/etc/kaputt"));
        assert!(config.debug);
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.filter_path, PathBuf::from("/srv/filters/main.toml"));
        assert_eq!(config.pool_path, PathBuf::from("/etc/kaputt/anims.toml"));
    }

    #[test]
    fn test_tilde_expands_to_home() {
        if let Some(home) = dirs::home_dir() {
            let resolved = resolve(Path::new("/etc/kaputt"), Path::new("~/kaputt/logs"));
            assert_eq!(resolved, home.join("kaputt/logs"));
        }
    }
}
