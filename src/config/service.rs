//! Configuration service for loading and generating config files.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::defaults;
use super::Config;

/// Configuration service.
pub struct ConfigService;

impl ConfigService {
    /// Default configuration directory, `~/.config/kaputt-filter`.
    pub fn default_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("kaputt-filter")
    }

    /// Default configuration file path.
    pub fn default_path() -> PathBuf {
        Self::default_dir().join("config.toml")
    }

    /// Load configuration from file.
    ///
    /// If `path` is `None`, uses the default path. A missing file is created
    /// with defaults first. Relative paths in the file are resolved against
    /// its directory, then the result is validated.
    pub fn load(path: Option<&Path>) -> Result<Config> {
        let path = path.map(PathBuf::from).unwrap_or_else(Self::default_path);

        if !path.exists() {
            Self::generate_at(&path)?;
        }

        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let mut config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        let config_dir = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        config.resolve_paths(&config_dir);

        config
            .validate()
            .with_context(|| format!("Invalid configuration in {}", path.display()))?;

        Ok(config)
    }

    /// Generate the default files at the default path.
    pub fn generate_default() -> Result<()> {
        Self::generate_at(&Self::default_path())
    }

    /// Write the default config to `path`, plus a sample filter and pool file
    /// next to it unless those already exist.
    pub fn generate_at(path: &Path) -> Result<()> {
        let dir = path.parent().unwrap_or_else(|| Path::new("."));
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create config directory: {}", dir.display()))?;

        write_file(path, defaults::CONFIG)?;

        for (name, content) in [
            (super::DEFAULT_FILTER_FILE, defaults::FILTER),
            (super::DEFAULT_POOL_FILE, defaults::POOL),
        ] {
            let target = dir.join(name);
            if target.exists() {
                debug!("Keeping existing {}", target.display());
                continue;
            }
            write_file(&target, content)?;
        }

        Ok(())
    }
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content).with_context(|| format!("Failed to write file: {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_writes_all_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        ConfigService::generate_at(&path).unwrap();

        assert!(path.exists());
        assert!(dir.path().join("nested/filters.toml").exists());
        assert!(dir.path().join("nested/anims.toml").exists());
    }

    #[test]
    fn test_generate_keeps_existing_filter() {
        let dir = tempfile::tempdir().unwrap();
        let filter = dir.path().join("filters.toml");
        fs::write(&filter, "taggers = []\n[tagexps]\n").unwrap();

        ConfigService::generate_at(&dir.path().join("config.toml")).unwrap();
        assert_eq!(
            fs::read_to_string(&filter).unwrap(),
            "taggers = []\n[tagexps]\n"
        );
    }

    #[test]
    fn test_load_creates_missing_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let config = ConfigService::load(Some(&path)).unwrap();

        assert!(path.exists());
        assert_eq!(config.filter_path, dir.path().join("filters.toml"));
        assert_eq!(config.log_path, dir.path().join("logs"));
    }

    #[test]
    fn test_load_reports_parse_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "debug = \"yes\"").unwrap();
        let err = ConfigService::load(Some(&path)).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }
}
