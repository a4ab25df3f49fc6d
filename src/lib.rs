//! kaputt-filter: rule-driven selection of paired killmove animations.
//!
//! Taggers evaluate rules against an attacker/victim pair and contribute
//! required and banned tags. The accumulated filter is applied to a pool of
//! tagged entries, after one-level tag expansion, and one admissible entry is
//! picked uniformly at random.

pub mod config;
pub mod domain;
pub mod service;
