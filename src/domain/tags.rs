//! Tag sets attached to pool entries and produced by taggers.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::error::{KaputtError, Result};

/// Set of case-sensitive tag tokens.
///
/// Backed by a `BTreeSet` so iteration, display and serialization are always
/// sorted. Tokens are never empty and never contain whitespace.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagSet(BTreeSet<String>);

impl TagSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a tag, rejecting tokens that could not survive a join/split.
    pub fn insert(&mut self, tag: impl Into<String>) -> Result<bool> {
        let tag = tag.into();
        validate_tag(&tag)?;
        Ok(self.0.insert(tag))
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.0.contains(tag)
    }

    pub fn remove(&mut self, tag: &str) -> bool {
        self.0.remove(tag)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Union `other` into `self`.
    pub fn merge(&mut self, other: &TagSet) {
        self.0.extend(other.0.iter().cloned());
    }

    /// True if every tag of `self` is in `other`.
    pub fn is_subset(&self, other: &TagSet) -> bool {
        self.0.is_subset(&other.0)
    }

    /// True if `self` and `other` share no tag.
    pub fn is_disjoint(&self, other: &TagSet) -> bool {
        self.0.is_disjoint(&other.0)
    }

    /// Sorted tags joined by single spaces.
    pub fn join(&self) -> String {
        self.iter().collect::<Vec<_>>().join(" ")
    }

    /// Split on whitespace and de-duplicate. Never fails since whitespace is the separator.
    pub fn split(text: &str) -> Self {
        Self(text.split_whitespace().map(str::to_string).collect())
    }

    /// Build from a list of tokens, validating each one.
    pub fn try_from_iter<I, S>(tags: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut set = Self::new();
        for tag in tags {
            set.insert(tag)?;
        }
        Ok(set)
    }
}

fn validate_tag(tag: &str) -> Result<()> {
    if tag.is_empty() || tag.chars().any(char::is_whitespace) {
        return Err(KaputtError::InvalidTag(tag.to_string()));
    }
    Ok(())
}

impl fmt::Display for TagSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.join())
    }
}

impl FromStr for TagSet {
    type Err = KaputtError;

    fn from_str(s: &str) -> Result<Self> {
        Ok(Self::split(s))
    }
}

impl<'a> IntoIterator for &'a TagSet {
    type Item = &'a String;
    type IntoIter = std::collections::btree_set::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl Serialize for TagSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_seq(self.0.iter())
    }
}

impl<'de> Deserialize<'de> for TagSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let tags = Vec::<String>::deserialize(deserializer)?;
        TagSet::try_from_iter(tags).map_err(serde::de::Error::custom)
    }
}
