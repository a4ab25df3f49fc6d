//! kaputt-filter: rule-driven killmove animation filter
//!
//! A CLI around the filter engine: picks animations for scenario files,
//! validates filter files, and manages the animation pool and filter presets.

mod cli;

use std::process;

use anyhow::{bail, Context, Result};
use clap::Parser;

use cli::{Cli, Commands};
use kaputt_filter::config::{self, ConfigService};
use kaputt_filter::domain::{logger, ContentPool, RuleRegistry, Scenario, TagSet};
use kaputt_filter::service::{PresetStore, SelectionService};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = ConfigService::load(cli.config.as_deref())?;

    // Initialize logging if debug mode
    if cli.debug || config.debug {
        logger::init(&config)?;
    }

    match cli.command {
        Commands::Pick { scenario, count } => {
            let scene = Scenario::load(&scenario)
                .with_context(|| format!("Failed to load scenario: {}", scenario.display()))?;
            let mut service = SelectionService::new(config, cli.filter)?;
            let report = service.pick(&scene, count)?;
            println!("{}", report.to_json()?);
            if !report.is_selected() {
                process::exit(1);
            }
        }
        Commands::Init { path } => {
            let config_path = if let Some(p) = path {
                ConfigService::generate_at(&p)?;
                p
            } else {
                ConfigService::generate_default()?;
                ConfigService::default_path()
            };
            if !cli.quiet {
                eprintln!("Configuration file created at: {}", config_path.display());
            }
        }
        Commands::Check => {
            config::validate(&config)?;
            let service = SelectionService::new(config, cli.filter)?;
            if !service.is_clean() {
                bail!(
                    "Filter file {} has errors (run with --debug and see the log for details)",
                    service.filter_path().display()
                );
            }
            if !cli.quiet {
                eprintln!(
                    "Configuration is valid: {} taggers, {} tag expansions, {} animations.",
                    service.pipeline().taggers().len(),
                    service.pipeline().expansions().len(),
                    service.pool().len()
                );
            }
        }
        Commands::Rules => print_rules()?,
        Commands::List { text, mode } => {
            let service = SelectionService::new(config, cli.filter)?;
            let pool = service.pool();
            for id in pool.list(&text, mode.into()) {
                let tags = pool.tags(id).map(TagSet::join).unwrap_or_default();
                let marker = if pool.has_custom_tags(id) { " *" } else { "" };
                println!("{}\t{}{}", id, tags, marker);
            }
        }
        Commands::Tag { id, tags } => {
            let tags = TagSet::try_from_iter(tags)?;
            let mut service = SelectionService::new(config, cli.filter)?;
            if !service.pool_mut().set_tags(&id, tags) {
                bail!("Unknown animation: {}", id);
            }
            service.save_pool()?;
            if !cli.quiet {
                eprintln!("Updated tags of {}.", id);
            }
        }
        Commands::Presets => {
            let store = PresetStore::new(&config.presets_dir);
            for name in store.list()? {
                println!("{}", name);
            }
        }
        Commands::SavePreset { name } => {
            let store = PresetStore::new(&config.presets_dir);
            let service = SelectionService::new(config, cli.filter)?;
            let path = store.save(&name, service.pipeline())?;
            if !cli.quiet {
                eprintln!("Preset saved at: {}", path.display());
            }
        }
        Commands::LoadPreset { name } => {
            let store = PresetStore::new(&config.presets_dir);
            let mut service = SelectionService::new(config, cli.filter)?;
            let clean = store.load(&name, service.pipeline_mut())?;
            service.save_filter()?;
            if !clean {
                eprintln!("Warning: preset {} loaded with errors; skipped parts were dropped.", name);
            } else if !cli.quiet {
                eprintln!("Preset {} is now active.", name);
            }
        }
        Commands::Version => {
            println!("kaputt-filter {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}

/// Print every rule with its hint and default params.
fn print_rules() -> Result<()> {
    for kind in RuleRegistry::all() {
        let params = kind.default_params().to_table()?;
        let params = params
            .iter()
            .map(|(key, value)| format!("{} = {}", key, value))
            .collect::<Vec<_>>()
            .join(", ");
        println!("{}", kind.name());
        println!("    {}", kind.hint());
        println!("    params: {{ {} }}", params);
    }
    Ok(())
}
