//! CLI argument parsing and command definitions.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use kaputt_filter::domain::ListMode;

/// Rule-driven killmove animation filter
#[derive(Parser)]
#[command(
    name = "kaputt-filter",
    version,
    about = "Rule-driven killmove animation filter",
    long_about = "Evaluates tagger rules for an attacker/victim pair, builds a required/banned \
                  tag filter and picks a matching animation from a tagged pool."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to configuration file
    #[arg(long, short = 'c', global = true)]
    pub config: Option<PathBuf>,

    /// Filter file to use instead of the configured one
    #[arg(long, short = 'f', global = true)]
    pub filter: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,
}

/// How `list` matches its text
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum Mode {
    /// List every entry
    #[default]
    None,
    /// Entry identifier contains the text (case-insensitive)
    Id,
    /// Entry carries every space-separated tag of the text
    Tag,
}

impl From<Mode> for ListMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::None => ListMode::None,
            Mode::Id => ListMode::Id,
            Mode::Tag => ListMode::Tag,
        }
    }
}

/// Available subcommands
#[derive(Subcommand)]
pub enum Commands {
    /// Pick an animation for the pair described by a scenario file
    Pick {
        /// Scenario file with the attacker, the victim and nearby actors
        #[arg(long, short = 's')]
        scenario: PathBuf,

        /// Number of picks to draw
        #[arg(long, short = 'n', default_value_t = 1)]
        count: usize,
    },
    /// Generate default configuration, filter and pool files
    Init {
        /// Path where to create the configuration file
        #[arg(long, short = 'p')]
        path: Option<PathBuf>,
    },
    /// Validate configuration and filter files
    Check,
    /// List the rule catalog
    Rules,
    /// List pool entries with their tags
    List {
        /// Text to match
        #[arg(default_value = "")]
        text: String,

        /// How the text is matched
        #[arg(long, short = 'm', value_enum, default_value_t = Mode::None)]
        mode: Mode,
    },
    /// Override the tags of a pool entry; no tags restores its defaults
    Tag {
        /// Entry identifier
        id: String,

        /// New tags
        tags: Vec<String>,
    },
    /// List saved filter presets
    Presets,
    /// Save the active filter as a preset
    SavePreset {
        /// Preset name (letters, digits, underscores)
        name: String,
    },
    /// Replace the active filter with a preset
    LoadPreset {
        /// Preset name
        name: String,
    },
    /// Display version information
    Version,
}
