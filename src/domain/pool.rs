//! Content pool: the tagged animation entries a pipeline picks from.
//!
//! The pipeline only reads pools through [`ContentPool`]. [`AnimPool`] is the
//! file-backed implementation used by the CLI, with per-entry custom tags that
//! override the defaults shipped with an animation.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::error::Result;
use super::tags::TagSet;

/// Read-only view of tagged entries.
pub trait ContentPool {
    /// Every entry with its effective (pre-expansion) tags.
    fn entries(&self) -> Box<dyn Iterator<Item = (&str, &TagSet)> + '_>;

    fn tags(&self, id: &str) -> Option<&TagSet>;
}

/// How `AnimPool::list` interprets its filter text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ListMode {
    /// Every entry
    #[default]
    None,
    /// Identifier contains the text, ignoring case
    Id,
    /// Entry carries every space-separated tag of the text
    Tag,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct PoolFile {
    #[serde(default)]
    anims: BTreeMap<String, TagSet>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    custom: BTreeMap<String, TagSet>,
}

/// Animation entries keyed by editor ID.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnimPool {
    defaults: BTreeMap<String, TagSet>,
    custom: BTreeMap<String, TagSet>,
}

impl AnimPool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let pool = Self::parse(&content)?;
        info!(
            "Loaded {} animation entries ({} with custom tags) from {}",
            pool.len(),
            pool.custom.len(),
            path.display()
        );
        Ok(pool)
    }

    pub fn parse(content: &str) -> Result<Self> {
        let file: PoolFile = toml::from_str(content)?;
        let mut pool = Self {
            defaults: file.anims,
            custom: BTreeMap::new(),
        };
        for (id, tags) in file.custom {
            if !pool.set_tags(&id, tags) {
                debug!("Dropping custom tags of unknown entry {}", id);
            }
        }
        Ok(pool)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        fs::write(path, self.to_toml_string()?)?;
        Ok(())
    }

    pub fn to_toml_string(&self) -> Result<String> {
        let file = PoolFile {
            anims: self.defaults.clone(),
            custom: self.custom.clone(),
        };
        Ok(toml::to_string_pretty(&file)?)
    }

    /// Register an entry with its default tags.
    pub fn insert(&mut self, id: impl Into<String>, tags: TagSet) {
        self.defaults.insert(id.into(), tags);
    }

    /// Override the tags of a known entry. Empty tags restore the defaults.
    pub fn set_tags(&mut self, id: &str, tags: TagSet) -> bool {
        if !self.defaults.contains_key(id) {
            return false;
        }
        if tags.is_empty() {
            self.custom.remove(id);
        } else {
            self.custom.insert(id.to_string(), tags);
        }
        true
    }

    pub fn has_custom_tags(&self, id: &str) -> bool {
        self.custom.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.defaults.len()
    }

    pub fn is_empty(&self) -> bool {
        self.defaults.is_empty()
    }

    /// Identifiers matching `filter` under `mode`, sorted.
    pub fn list(&self, filter: &str, mode: ListMode) -> Vec<&str> {
        let needle = filter.to_lowercase();
        let wanted = TagSet::split(filter);
        self.entries()
            .filter(|(id, tags)| match mode {
                ListMode::None => true,
                ListMode::Id => id.to_lowercase().contains(&needle),
                ListMode::Tag => wanted.is_subset(tags),
            })
            .map(|(id, _)| id)
            .collect()
    }
}

impl ContentPool for AnimPool {
    fn entries(&self) -> Box<dyn Iterator<Item = (&str, &TagSet)> + '_> {
        Box::new(self.defaults.iter().map(|(id, default)| {
            let tags = self.custom.get(id).unwrap_or(default);
            (id.as_str(), tags)
        }))
    }

    fn tags(&self, id: &str) -> Option<&TagSet> {
        self.custom.get(id).or_else(|| self.defaults.get(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const POOL: &str = r#"
[anims]
pa_KillMoveDecapSword = ["1hsword", "decap", "front"]
pa_KillMoveBackStab = ["1hdagger", "back", "sneak"]
pa_KillMoveGreatsword = ["2hsword", "front"]

[custom]
pa_KillMoveGreatsword = ["2hsword", "front", "bleedout"]
pa_Missing = ["x"]
"#;

    #[test]
    fn test_parse_applies_custom_tags() {
        let pool = AnimPool::parse(POOL).unwrap();
        assert_eq!(pool.len(), 3);
        assert!(pool.has_custom_tags("pa_KillMoveGreatsword"));
        assert!(!pool.has_custom_tags("pa_Missing"));
        assert!(pool.tags("pa_KillMoveGreatsword").unwrap().contains("bleedout"));
        assert!(pool.tags("pa_Missing").is_none());
    }

    #[test]
    fn test_set_and_restore_tags() {
        let mut pool = AnimPool::parse(POOL).unwrap();
        assert!(pool.set_tags("pa_KillMoveBackStab", TagSet::split("sneak")));
        assert_eq!(pool.tags("pa_KillMoveBackStab").unwrap().join(), "sneak");

        assert!(pool.set_tags("pa_KillMoveBackStab", TagSet::new()));
        assert_eq!(
            pool.tags("pa_KillMoveBackStab").unwrap().join(),
            "1hdagger back sneak"
        );
        assert!(!pool.set_tags("nope", TagSet::split("a")));
        assert!(pool.set_tags("pa_KillMoveGreatsword", TagSet::new()));
        assert!(!pool.has_custom_tags("pa_KillMoveGreatsword"));
    }

    #[test]
    fn test_list_modes() {
        let pool = AnimPool::parse(POOL).unwrap();
        assert_eq!(pool.list("", ListMode::None).len(), 3);
        assert_eq!(
            pool.list("decap", ListMode::Id),
            vec!["pa_KillMoveDecapSword"]
        );
        assert_eq!(
            pool.list("front", ListMode::Tag),
            vec!["pa_KillMoveDecapSword", "pa_KillMoveGreatsword"]
        );
        assert_eq!(
            pool.list("front bleedout", ListMode::Tag),
            vec!["pa_KillMoveGreatsword"]
        );
    }

    #[test]
    fn test_toml_roundtrip_keeps_custom_tags() {
        let pool = AnimPool::parse(POOL).unwrap();
        let reloaded = AnimPool::parse(&pool.to_toml_string().unwrap()).unwrap();
        assert_eq!(reloaded, pool);
    }
}
