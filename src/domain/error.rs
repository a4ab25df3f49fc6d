//! Error types for kaputt-filter.

use thiserror::Error;

use super::actor::ActorHandle;

/// Main error type for the filter engine.
#[derive(Debug, Error)]
pub enum KaputtError {
    /// A tagger names a rule that is not in the catalog.
    #[error("Unknown rule: {0}")]
    UnknownRule(String),

    /// Params table does not have the shape of the rule's default params.
    #[error("Wrong parameters for rule type {rule}: {reason}")]
    InvalidParams { rule: String, reason: String },

    /// A tagger record is missing fields or has fields of the wrong type.
    #[error("Malformed tagger: {0}")]
    MalformedTagger(String),

    /// A tag expansion value is not a list of tags.
    #[error("Malformed tag expansion '{from}': {reason}")]
    MalformedExpansion { from: String, reason: String },

    /// A tag token is empty or contains whitespace.
    #[error("Invalid tag {0:?}: tags must be non-empty and contain no whitespace")]
    InvalidTag(String),

    /// The host could not resolve an actor handle during evaluation.
    #[error("Unknown actor: {0}")]
    UnknownActor(ActorHandle),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing error
    #[error("TOML parse error: {0}")]
    TomlDe(#[from] toml::de::Error),

    /// TOML serialization error
    #[error("TOML serialization error: {0}")]
    TomlSer(#[from] toml::ser::Error),
}

/// Result alias used throughout the domain layer.
pub type Result<T> = std::result::Result<T, KaputtError>;
