//! Named filter presets stored as files in the presets directory.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use tracing::info;

use crate::domain::FilterPipeline;

const PRESET_EXTENSION: &str = "toml";

/// Preset files `<dir>/<name>.toml`.
pub struct PresetStore {
    dir: PathBuf,
}

impl PresetStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Names of the saved presets, sorted. A missing directory has none.
    pub fn list(&self) -> Result<Vec<String>> {
        if !self.dir.exists() {
            return Ok(Vec::new());
        }
        let entries = fs::read_dir(&self.dir)
            .with_context(|| format!("Failed to read presets directory: {}", self.dir.display()))?;

        let mut names = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if !path.is_file() || path.extension().and_then(|e| e.to_str()) != Some(PRESET_EXTENSION) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                if is_valid_name(stem) {
                    names.push(stem.to_string());
                }
            }
        }
        names.sort();
        Ok(names)
    }

    /// File path of preset `name`.
    pub fn path(&self, name: &str) -> Result<PathBuf> {
        if !is_valid_name(name) {
            bail!(
                "Invalid preset name '{}': use letters, digits and underscores",
                name
            );
        }
        Ok(self.dir.join(format!("{}.{}", name, PRESET_EXTENSION)))
    }

    /// Save `pipeline` as preset `name`, replacing any preset of that name.
    pub fn save(&self, name: &str, pipeline: &FilterPipeline) -> Result<PathBuf> {
        let path = self.path(name)?;
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("Failed to create presets directory: {}", self.dir.display()))?;
        if !pipeline.save(&path) {
            bail!("Failed to write preset: {}", path.display());
        }
        info!("Saved preset {}", name);
        Ok(path)
    }

    /// Replace the contents of `pipeline` with preset `name`.
    ///
    /// Returns whether the preset loaded without skipped parts.
    pub fn load(&self, name: &str, pipeline: &mut FilterPipeline) -> Result<bool> {
        let path = self.path(name)?;
        if !path.is_file() {
            bail!("No preset named '{}'", name);
        }
        let clean = pipeline.load(&path, false);
        info!("Loaded preset {} (clean: {})", name, clean);
        Ok(clean)
    }
}

fn is_valid_name(name: &str) -> bool {
    !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RuleKind;

    #[test]
    fn test_save_list_load() {
        let dir = tempfile::tempdir().unwrap();
        let store = PresetStore::new(dir.path().join("presets"));
        assert!(store.list().unwrap().is_empty());

        let mut pipeline = FilterPipeline::with_seed(0);
        pipeline.add_tagger(RuleKind::Ragdoll).comment = "getup".to_string();
        store.save("combat_b", &pipeline).unwrap();
        store.save("combat_a", &FilterPipeline::with_seed(0)).unwrap();
        fs::write(store.dir().join("notes.txt"), "ignored").unwrap();

        assert_eq!(store.list().unwrap(), vec!["combat_a", "combat_b"]);

        let mut loaded = FilterPipeline::with_seed(0);
        loaded.add_tagger(RuleKind::Bleedout);
        assert!(store.load("combat_b", &mut loaded).unwrap());
        assert_eq!(loaded.taggers(), pipeline.taggers());
    }

    #[test]
    fn test_rejects_bad_names() {
        let store = PresetStore::new("/tmp/presets");
        for name in ["", "../escape", "has space", "dot.name"] {
            assert!(store.path(name).is_err(), "{:?} should be rejected", name);
        }
        assert!(store.path("Valid_1").is_ok());
    }

    #[test]
    fn test_load_missing_preset() {
        let dir = tempfile::tempdir().unwrap();
        let store = PresetStore::new(dir.path());
        let mut pipeline = FilterPipeline::with_seed(0);
        assert!(store.load("nothing", &mut pipeline).is_err());
    }
}
