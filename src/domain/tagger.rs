//! Taggers: a rule bound to params plus conditional tag requirements.

use serde::{Deserialize, Serialize};
use toml::Table;

use super::actor::{ActorHandle, ActorQuery};
use super::error::{KaputtError, Result};
use super::rules::{RuleKind, RuleParams, RuleRegistry};
use super::tags::TagSet;

/// Required and banned tags contributed by a tagger, or accumulated by a pipeline.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaggerOutput {
    /// Every one of these must be present on an entry
    #[serde(rename = "req_tags")]
    pub required_tags: TagSet,

    /// None of these may be present on an entry
    #[serde(rename = "ban_tags")]
    pub banned_tags: TagSet,
}

impl TaggerOutput {
    pub fn new(required_tags: TagSet, banned_tags: TagSet) -> Self {
        Self {
            required_tags,
            banned_tags,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.required_tags.is_empty() && self.banned_tags.is_empty()
    }

    pub fn merge(&mut self, other: &TaggerOutput) {
        self.required_tags.merge(&other.required_tags);
        self.banned_tags.merge(&other.banned_tags);
    }

    /// Entry with `tags` is admissible under this filter.
    pub fn admits(&self, tags: &TagSet) -> bool {
        self.required_tags.is_subset(tags) && self.banned_tags.is_disjoint(tags)
    }
}

/// A rule instance and what to require or ban depending on its outcome.
#[derive(Debug, Clone, PartialEq)]
pub struct Tagger {
    pub params: RuleParams,
    pub comment: String,
    pub enable_true: bool,
    pub enable_false: bool,
    pub true_tags: TaggerOutput,
    pub false_tags: TaggerOutput,
}

impl Tagger {
    /// New tagger for `kind` with default params and both branches disabled.
    pub fn new(kind: RuleKind) -> Self {
        Self {
            params: kind.default_params(),
            comment: String::new(),
            enable_true: false,
            enable_false: false,
            true_tags: TaggerOutput::default(),
            false_tags: TaggerOutput::default(),
        }
    }

    pub fn rule(&self) -> RuleKind {
        self.params.kind()
    }

    /// Evaluate the rule and return the enabled branch's tags, or nothing.
    pub fn evaluate(
        &self,
        query: &dyn ActorQuery,
        attacker: ActorHandle,
        victim: ActorHandle,
    ) -> Result<TaggerOutput> {
        let passed = self.params.evaluate(query, attacker, victim)?;
        let output = match (passed, self.enable_true, self.enable_false) {
            (true, true, _) => self.true_tags.clone(),
            (false, _, true) => self.false_tags.clone(),
            _ => TaggerOutput::default(),
        };
        Ok(output)
    }

    /// Serializable form.
    pub fn to_record(&self) -> Result<TaggerRecord> {
        Ok(TaggerRecord {
            rule: self.params.name().to_string(),
            params: self.params.to_table()?,
            comment: self.comment.clone(),
            enable_true: self.enable_true,
            enable_false: self.enable_false,
            true_tags: self.true_tags.clone(),
            false_tags: self.false_tags.clone(),
        })
    }
}

impl TryFrom<TaggerRecord> for Tagger {
    type Error = KaputtError;

    /// Resolve the rule and validate its params.
    fn try_from(record: TaggerRecord) -> Result<Self> {
        let kind = RuleRegistry::lookup(&record.rule)?;
        let params = kind.parse_params(&record.params)?;
        Ok(Self {
            params,
            comment: record.comment,
            enable_true: record.enable_true,
            enable_false: record.enable_false,
            true_tags: record.true_tags,
            false_tags: record.false_tags,
        })
    }
}

/// A tagger as it appears in filter files, with untyped params.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaggerRecord {
    pub rule: String,
    pub comment: String,
    pub enable_true: bool,
    pub enable_false: bool,
    pub params: Table,
    pub true_tags: TaggerOutput,
    pub false_tags: TaggerOutput,
}

impl TaggerRecord {
    /// Parse one entry of the `taggers` array.
    pub fn from_value(value: toml::Value) -> Result<Self> {
        value
            .try_into()
            .map_err(|e: toml::de::Error| KaputtError::MalformedTagger(e.to_string()))
    }
}
