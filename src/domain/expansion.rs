//! One-level tag expansion.
//!
//! An expansion `from -> to` gives every entry tagged `from` all tags of `to`
//! as well. Expansion runs once over the original tags only: tags added by an
//! expansion never trigger further expansions.

use std::collections::BTreeMap;

use super::tags::TagSet;

/// Expansion table keyed by source tag.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagExpansions(BTreeMap<String, TagSet>);

impl TagExpansions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace the expansion for `from`.
    pub fn insert(&mut self, from: impl Into<String>, to: TagSet) -> Option<TagSet> {
        self.0.insert(from.into(), to)
    }

    pub fn remove(&mut self, from: &str) -> Option<TagSet> {
        self.0.remove(from)
    }

    pub fn get(&self, from: &str) -> Option<&TagSet> {
        self.0.get(from)
    }

    /// Rename a source tag. Refused when `to` is already a source; an empty
    /// `to` removes the expansion instead.
    pub fn rename(&mut self, from: &str, to: &str) -> bool {
        if to.is_empty() {
            return self.0.remove(from).is_some();
        }
        if to.chars().any(char::is_whitespace) || self.0.contains_key(to) {
            return false;
        }
        match self.0.remove(from) {
            Some(tags) => {
                self.0.insert(to.to_string(), tags);
                true
            }
            None => false,
        }
    }

    /// Merge `other` in; its entries win on colliding source tags.
    pub fn extend(&mut self, other: TagExpansions) {
        self.0.extend(other.0);
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &TagSet)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Effective tags of an entry: its own tags plus every matching expansion.
    pub fn expand(&self, original: &TagSet) -> TagSet {
        let mut effective = original.clone();
        for (from, to) in &self.0 {
            if original.contains(from) {
                effective.merge(to);
            }
        }
        effective
    }

    pub(crate) fn as_map(&self) -> &BTreeMap<String, TagSet> {
        &self.0
    }
}

impl FromIterator<(String, TagSet)> for TagExpansions {
    fn from_iter<I: IntoIterator<Item = (String, TagSet)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
