//! Domain layer containing the filter engine.
//!
//! This module contains:
//! - Tag sets and one-level tag expansion
//! - The rule catalog and its predicates
//! - Taggers and the filter pipeline
//! - Host query trait plus a snapshot-backed implementation
//! - Content pool and logger

pub mod actor;
mod error;
pub mod expansion;
pub mod logger;
pub mod pipeline;
pub mod pool;
pub mod rules;
pub mod tagger;
pub mod tags;
pub mod world;

pub use actor::{ActorFlags, ActorHandle, ActorQuery, Position, WeaponCategory};
pub use error::{KaputtError, Result};
pub use expansion::TagExpansions;
pub use pipeline::{FilterPipeline, Selection};
pub use pool::{AnimPool, ContentPool, ListMode};
pub use rules::{RuleKind, RuleParams, RuleRegistry};
pub use tagger::{Tagger, TaggerOutput, TaggerRecord};
pub use tags::TagSet;
pub use world::{ActorSnapshot, Scenario, SnapshotWorld};
