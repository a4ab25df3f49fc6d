//! Filter pipeline: taggers, tag expansions and the selection generator.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use toml::{Table, Value};
use tracing::{debug, error, info, warn};

use super::actor::{ActorHandle, ActorQuery};
use super::error::{KaputtError, Result};
use super::expansion::TagExpansions;
use super::pool::ContentPool;
use super::rules::RuleKind;
use super::tagger::{Tagger, TaggerOutput, TaggerRecord};
use super::tags::TagSet;

/// Outcome of one selection call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Selection {
    /// Picked entry, or `None` if nothing passed the filter
    pub entry: Option<String>,
    /// Accumulated filter the entry was picked under
    pub filter: TaggerOutput,
    /// Number of entries that passed the filter
    pub candidates: usize,
}

/// Ordered taggers plus tag expansions.
///
/// The generator is seeded once when the pipeline is created and reused by
/// every pick; clearing or reloading the pipeline keeps it.
#[derive(Debug, Clone)]
pub struct FilterPipeline {
    taggers: Vec<Tagger>,
    expansions: TagExpansions,
    rng: StdRng,
}

impl Default for FilterPipeline {
    fn default() -> Self {
        Self::new()
    }
}

impl FilterPipeline {
    /// Empty pipeline seeded from OS entropy.
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Empty pipeline with a fixed seed, for reproducible picks.
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        Self {
            taggers: Vec::new(),
            expansions: TagExpansions::new(),
            rng,
        }
    }

    pub fn taggers(&self) -> &[Tagger] {
        &self.taggers
    }

    pub fn taggers_mut(&mut self) -> &mut Vec<Tagger> {
        &mut self.taggers
    }

    pub fn expansions(&self) -> &TagExpansions {
        &self.expansions
    }

    pub fn expansions_mut(&mut self) -> &mut TagExpansions {
        &mut self.expansions
    }

    /// Append a tagger for `kind` with default params.
    pub fn add_tagger(&mut self, kind: RuleKind) -> &mut Tagger {
        self.taggers.push(Tagger::new(kind));
        let last = self.taggers.len() - 1;
        &mut self.taggers[last]
    }

    pub fn remove_tagger(&mut self, index: usize) -> Option<Tagger> {
        (index < self.taggers.len()).then(|| self.taggers.remove(index))
    }

    /// Move the tagger at `from` so it ends up at `to`.
    pub fn move_tagger(&mut self, from: usize, to: usize) -> bool {
        if from >= self.taggers.len() || to >= self.taggers.len() {
            return false;
        }
        let tagger = self.taggers.remove(from);
        self.taggers.insert(to, tagger);
        true
    }

    pub fn clear(&mut self) {
        self.taggers.clear();
        self.expansions.clear();
    }

    /// Evaluate every tagger once, in order, and union their outputs.
    pub fn accumulate(
        &self,
        query: &dyn ActorQuery,
        attacker: ActorHandle,
        victim: ActorHandle,
    ) -> Result<TaggerOutput> {
        let mut result = TaggerOutput::default();
        for (i, tagger) in self.taggers.iter().enumerate() {
            let output = tagger.evaluate(query, attacker, victim)?;
            debug!(
                index = i,
                rule = tagger.rule().name(),
                required = %output.required_tags,
                banned = %output.banned_tags,
                "Tagger evaluated"
            );
            result.merge(&output);
        }
        Ok(result)
    }

    /// Pick a random entry of `pool` admitted by `filter`.
    pub fn pick_entry<'p>(
        &mut self,
        pool: &'p dyn ContentPool,
        filter: &TaggerOutput,
    ) -> Option<&'p str> {
        pick_entry(&mut self.rng, pool, filter, &self.expansions)
    }

    /// Accumulate the filter for this pair and pick an entry under it.
    pub fn select(
        &mut self,
        query: &dyn ActorQuery,
        pool: &dyn ContentPool,
        attacker: ActorHandle,
        victim: ActorHandle,
    ) -> Result<Selection> {
        let filter = self.accumulate(query, attacker, victim)?;
        let candidates = filter_candidates(pool, &filter, &self.expansions);
        let entry = choose(&mut self.rng, &candidates).map(str::to_string);

        info!(
            required = %filter.required_tags,
            banned = %filter.banned_tags,
            candidates = candidates.len(),
            entry = ?entry,
            "Selection done"
        );

        Ok(Selection {
            entry,
            filter,
            candidates: candidates.len(),
        })
    }

    /// Load a filter file. Without `append` the pipeline is cleared first.
    ///
    /// Returns `false` if the file could not be read, `tagexps` is missing or
    /// any entry was skipped; whatever parsed cleanly is kept either way.
    pub fn load(&mut self, path: &Path, append: bool) -> bool {
        if !append {
            self.clear();
        }
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                error!("Failed to read filter file {}: {}", path.display(), e);
                return false;
            }
        };
        info!("Parsing filter file {}", path.display());
        self.load_str(&content, append)
    }

    /// Same as [`FilterPipeline::load`] for in-memory content.
    pub fn load_str(&mut self, content: &str, append: bool) -> bool {
        if !append {
            self.clear();
        }
        let document: Table = match toml::from_str(content) {
            Ok(document) => document,
            Err(e) => {
                warn!("Failed to parse filter file. Error: {}", e);
                return false;
            }
        };

        let parsed = ParsedFilter::from_document(document);
        debug!(
            taggers = parsed.taggers.len(),
            tagexps = parsed.expansions.len(),
            clean = parsed.clean,
            "Filter file parsed"
        );
        self.taggers.extend(parsed.taggers);
        self.expansions.extend(parsed.expansions);
        parsed.clean
    }

    /// Write the pipeline to `path`. Returns `false` on failure.
    pub fn save(&self, path: &Path) -> bool {
        info!("Saving filter file {}.", path.display());
        let written = self
            .to_toml_string()
            .and_then(|content| fs::write(path, content).map_err(KaputtError::from));
        match written {
            Ok(()) => true,
            Err(e) => {
                error!("Failed to write at {}! {}", path.display(), e);
                false
            }
        }
    }

    pub fn to_toml_string(&self) -> Result<String> {
        let taggers = self
            .taggers
            .iter()
            .map(Tagger::to_record)
            .collect::<Result<Vec<_>>>()?;
        let file = FilterFile {
            taggers,
            tagexps: self.expansions.as_map(),
        };
        Ok(toml::to_string_pretty(&file)?)
    }
}

#[derive(Serialize)]
struct FilterFile<'a> {
    taggers: Vec<TaggerRecord>,
    tagexps: &'a BTreeMap<String, TagSet>,
}

/// Result of parsing a filter document entry by entry.
struct ParsedFilter {
    taggers: Vec<Tagger>,
    expansions: TagExpansions,
    clean: bool,
}

impl ParsedFilter {
    fn from_document(mut document: Table) -> Self {
        let mut parsed = Self {
            taggers: Vec::new(),
            expansions: TagExpansions::new(),
            clean: true,
        };

        match document.remove("taggers") {
            Some(Value::Array(entries)) => {
                for (i, entry) in entries.into_iter().enumerate() {
                    match parse_tagger(entry) {
                        Ok(tagger) => parsed.taggers.push(tagger),
                        Err(e) => {
                            warn!("Failed to parse one of the taggers (#{}). Error: {}", i, e);
                            parsed.clean = false;
                        }
                    }
                }
            }
            // A filter without taggers is still a complete file
            Some(_) => warn!(r#"Field "taggers" is not an array. Skipped."#),
            None => warn!(r#"Required "taggers" field unfulfilled. Skipped."#),
        }

        match document.remove("tagexps") {
            Some(Value::Table(entries)) => {
                for (from, to) in entries {
                    match parse_expansion(&from, to) {
                        Ok(to) => {
                            parsed.expansions.insert(from, to);
                        }
                        Err(e) => {
                            warn!("Failed to parse one of the tag expansions. Error: {}", e);
                            parsed.clean = false;
                        }
                    }
                }
            }
            Some(_) => {
                warn!(r#"Field "tagexps" is not a table. Skipped."#);
                parsed.clean = false;
            }
            None => {
                warn!(r#"Required "tagexps" field unfulfilled. Skipped."#);
                parsed.clean = false;
            }
        }

        parsed
    }
}

fn parse_tagger(entry: Value) -> Result<Tagger> {
    if !entry.is_table() {
        return Err(KaputtError::MalformedTagger("wrong data type".to_string()));
    }
    Tagger::try_from(TaggerRecord::from_value(entry)?)
}

fn parse_expansion(from: &str, to: Value) -> Result<TagSet> {
    let malformed = |reason: String| KaputtError::MalformedExpansion {
        from: from.to_string(),
        reason,
    };
    TagSet::new()
        .insert(from)
        .map_err(|e| malformed(e.to_string()))?;
    if !to.is_array() {
        return Err(malformed("wrong data type".to_string()));
    }
    to.try_into()
        .map_err(|e: toml::de::Error| malformed(e.to_string()))
}

/// Entries of `pool` whose expanded tags pass `filter`.
pub fn filter_candidates<'p>(
    pool: &'p dyn ContentPool,
    filter: &TaggerOutput,
    expansions: &TagExpansions,
) -> Vec<&'p str> {
    pool.entries()
        .filter(|(_, tags)| filter.admits(&expansions.expand(tags)))
        .map(|(id, _)| id)
        .collect()
}

/// Uniformly random admitted entry, or `None` when nothing passes.
pub fn pick_entry<'p, R: Rng + ?Sized>(
    rng: &mut R,
    pool: &'p dyn ContentPool,
    filter: &TaggerOutput,
    expansions: &TagExpansions,
) -> Option<&'p str> {
    let candidates = filter_candidates(pool, filter, expansions);
    choose(rng, &candidates)
}

fn choose<'p, R: Rng + ?Sized>(rng: &mut R, candidates: &[&'p str]) -> Option<&'p str> {
    if candidates.is_empty() {
        return None;
    }
    Some(candidates[rng.gen_range(0..candidates.len())])
}
