//! JSON report printed by the `pick` command.

use serde::Serialize;

use crate::domain::{Selection, TagSet};

/// Result of one or more picks for an attacker/victim pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectionReport {
    pub attacker: String,
    pub victim: String,
    /// First pick, `null` when nothing passed the filter
    pub entry: Option<String>,
    pub required_tags: TagSet,
    pub banned_tags: TagSet,
    /// Number of pool entries admitted by the filter
    pub candidates: usize,
    /// Every pick, in order
    pub picks: Vec<Option<String>>,
}

impl SelectionReport {
    pub fn new(attacker: &str, victim: &str, selection: Selection, picks: Vec<Option<String>>) -> Self {
        Self {
            attacker: attacker.to_string(),
            victim: victim.to_string(),
            entry: selection.entry,
            required_tags: selection.filter.required_tags,
            banned_tags: selection.filter.banned_tags,
            candidates: selection.candidates,
            picks,
        }
    }

    pub fn is_selected(&self) -> bool {
        self.entry.is_some()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
