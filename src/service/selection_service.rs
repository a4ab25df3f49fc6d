//! Selection service: owns the pipeline and pool loaded from the config.

use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Context, Result};
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::domain::{
    ActorHandle, ActorQuery, AnimPool, FilterPipeline, Scenario, Selection, SnapshotWorld,
};
use crate::service::report::SelectionReport;

/// Service for picking entries with the configured filter and pool.
pub struct SelectionService {
    config: Config,
    filter_path: PathBuf,
    pipeline: FilterPipeline,
    pool: AnimPool,
    clean: bool,
}

impl SelectionService {
    /// Load the filter and pool named by `config`.
    ///
    /// `filter_override` replaces `config.filter_path`. A partially loaded
    /// filter is kept and reported through [`SelectionService::is_clean`]; a
    /// missing or unparseable pool is an error.
    pub fn new(config: Config, filter_override: Option<PathBuf>) -> Result<Self> {
        let filter_path = filter_override.unwrap_or_else(|| config.filter_path.clone());
        let pipeline = match config.seed {
            Some(seed) => FilterPipeline::with_seed(seed),
            None => FilterPipeline::new(),
        };
        let mut service = Self {
            config,
            filter_path,
            pipeline,
            pool: AnimPool::new(),
            clean: false,
        };
        service.reload()?;
        Ok(service)
    }

    /// Reload the filter and pool files, keeping the generator state.
    ///
    /// Returns whether the filter loaded without skipped parts.
    pub fn reload(&mut self) -> Result<bool> {
        self.clean = self.pipeline.load(&self.filter_path, false);
        if !self.clean {
            warn!(
                "Filter file {} loaded with errors",
                self.filter_path.display()
            );
        }

        self.pool = AnimPool::load(&self.config.pool_path).with_context(|| {
            format!(
                "Failed to load pool file: {}",
                self.config.pool_path.display()
            )
        })?;

        info!(
            taggers = self.pipeline.taggers().len(),
            tagexps = self.pipeline.expansions().len(),
            entries = self.pool.len(),
            "Reloaded"
        );
        Ok(self.clean)
    }

    pub fn filter_path(&self) -> &Path {
        &self.filter_path
    }

    /// Whether the last load skipped nothing.
    pub fn is_clean(&self) -> bool {
        self.clean
    }

    pub fn pipeline(&self) -> &FilterPipeline {
        &self.pipeline
    }

    pub fn pipeline_mut(&mut self) -> &mut FilterPipeline {
        &mut self.pipeline
    }

    pub fn pool(&self) -> &AnimPool {
        &self.pool
    }

    pub fn pool_mut(&mut self) -> &mut AnimPool {
        &mut self.pool
    }

    /// Accumulate the filter for the pair and pick one entry.
    pub fn select(
        &mut self,
        query: &dyn ActorQuery,
        attacker: ActorHandle,
        victim: ActorHandle,
    ) -> Result<Selection> {
        Ok(self.pipeline.select(query, &self.pool, attacker, victim)?)
    }

    /// Run `count` picks for the pair described by `scenario`.
    ///
    /// The filter is accumulated once since the scene does not change between
    /// picks.
    pub fn pick(&mut self, scenario: &Scenario, count: usize) -> Result<SelectionReport> {
        if count == 0 {
            bail!("count must be at least 1");
        }
        let world = SnapshotWorld::from_scenario(scenario);
        let attacker = lookup(&world, &scenario.attacker)?;
        let victim = lookup(&world, &scenario.victim)?;
        debug!("Picking for {} -> {}", attacker, victim);

        let selection = self.select(&world, attacker, victim)?;
        let mut picks = vec![selection.entry.clone()];
        for _ in 1..count {
            let entry = self.pipeline.pick_entry(&self.pool, &selection.filter);
            picks.push(entry.map(str::to_string));
        }

        Ok(SelectionReport::new(
            &scenario.attacker,
            &scenario.victim,
            selection,
            picks,
        ))
    }

    /// Write the pipeline back to the filter file.
    pub fn save_filter(&self) -> Result<()> {
        if !self.pipeline.save(&self.filter_path) {
            bail!(
                "Failed to write filter file: {}",
                self.filter_path.display()
            );
        }
        Ok(())
    }

    /// Write the pool, including custom tags, back to the pool file.
    pub fn save_pool(&self) -> Result<()> {
        self.pool.save(&self.config.pool_path).with_context(|| {
            format!(
                "Failed to write pool file: {}",
                self.config.pool_path.display()
            )
        })
    }
}

fn lookup(world: &SnapshotWorld, name: &str) -> Result<ActorHandle> {
    world
        .handle(name)
        .ok_or_else(|| anyhow!("Actor '{}' is not defined in the scenario", name))
}
