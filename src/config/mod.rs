//! Configuration management module.
//!
//! Handles TOML configuration file loading, validation, and generation of the
//! default config, filter and pool files.

mod defaults;
mod service;
mod types;
mod validation;

pub use service::ConfigService;
pub use types::{Config, DEFAULT_FILTER_FILE, DEFAULT_POOL_FILE};
pub use validation::validate;
