//! Snapshot world: an [`ActorQuery`] backed by a scenario file.
//!
//! Used by the `pick` command and by tests in place of a live host.
//!
//! ```toml
//! attacker = "player"
//! victim = "bandit"
//!
//! [actors.player]
//! player = true
//! weapon = "one_hand_sword"
//! hostile_to = ["bandit"]
//!
//! [actors.bandit]
//! position = [0.0, 100.0, 0.0]
//! heading = 180.0
//! bleedout = true
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use super::actor::{ActorFlags, ActorHandle, ActorQuery, Position, WeaponCategory};
use super::error::Result;

/// Scenario file contents.
#[derive(Debug, Clone, Deserialize)]
pub struct Scenario {
    /// Name of the attacking actor
    pub attacker: String,

    /// Name of the victim actor
    pub victim: String,

    /// All actors of the scene, keyed by name
    #[serde(default)]
    pub actors: BTreeMap<String, ActorSnapshot>,
}

impl Scenario {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }
}

/// State of one actor at the time of the event.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ActorSnapshot {
    pub loaded: bool,
    pub dead: bool,
    pub paired_animation: bool,
    pub mounted: bool,
    pub bleedout: bool,
    pub ragdoll: bool,
    pub protected: bool,
    pub essential: bool,
    pub player: bool,
    pub position: [f32; 3],
    /// Degrees clockwise from +Y
    pub heading: f32,
    pub hostile_to: Vec<String>,
    pub weapon: Option<WeaponCategory>,
    pub perks: Vec<String>,
    pub skeleton: Option<String>,
}

impl Default for ActorSnapshot {
    fn default() -> Self {
        Self {
            loaded: true,
            dead: false,
            paired_animation: false,
            mounted: false,
            bleedout: false,
            ragdoll: false,
            protected: false,
            essential: false,
            player: false,
            position: [0.0; 3],
            heading: 0.0,
            hostile_to: Vec::new(),
            weapon: None,
            perks: Vec::new(),
            skeleton: None,
        }
    }
}

/// Immutable actor table. Handles are indices into the table.
#[derive(Debug, Clone, Default)]
pub struct SnapshotWorld {
    names: Vec<String>,
    actors: Vec<ActorSnapshot>,
}

impl SnapshotWorld {
    pub fn new(actors: BTreeMap<String, ActorSnapshot>) -> Self {
        let (names, actors) = actors.into_iter().unzip();
        Self { names, actors }
    }

    pub fn from_scenario(scenario: &Scenario) -> Self {
        Self::new(scenario.actors.clone())
    }

    /// Handle of the actor called `name`.
    pub fn handle(&self, name: &str) -> Option<ActorHandle> {
        self.names
            .iter()
            .position(|n| n == name)
            .map(|i| ActorHandle(i as u32))
    }

    pub fn name(&self, actor: ActorHandle) -> Option<&str> {
        self.names.get(actor.0 as usize).map(String::as_str)
    }

    fn get(&self, actor: ActorHandle) -> Option<&ActorSnapshot> {
        self.actors.get(actor.0 as usize)
    }
}

impl ActorQuery for SnapshotWorld {
    fn flags(&self, actor: ActorHandle) -> Option<ActorFlags> {
        self.get(actor).map(|a| ActorFlags {
            loaded: a.loaded,
            dead: a.dead,
            in_paired_animation: a.paired_animation,
            mounted: a.mounted,
            bleeding_out: a.bleedout,
            ragdolling: a.ragdoll,
            protected: a.protected,
            essential: a.essential,
        })
    }

    fn position(&self, actor: ActorHandle) -> Option<Position> {
        self.get(actor)
            .map(|a| Position::new(a.position[0], a.position[1], a.position[2]))
    }

    fn heading(&self, actor: ActorHandle) -> Option<f32> {
        self.get(actor).map(|a| a.heading)
    }

    fn is_player(&self, actor: ActorHandle) -> bool {
        self.get(actor).is_some_and(|a| a.player)
    }

    fn player(&self) -> Option<ActorHandle> {
        self.actors
            .iter()
            .position(|a| a.player)
            .map(|i| ActorHandle(i as u32))
    }

    fn is_hostile(&self, actor: ActorHandle, other: ActorHandle) -> bool {
        let (Some(a), Some(b)) = (self.get(actor), self.get(other)) else {
            return false;
        };
        let (Some(a_name), Some(b_name)) = (self.name(actor), self.name(other)) else {
            return false;
        };
        a.hostile_to.iter().any(|n| n == b_name) || b.hostile_to.iter().any(|n| n == a_name)
    }

    fn actors_within(&self, center: Position, radius: f32) -> Vec<ActorHandle> {
        let mut found: Vec<(f32, ActorHandle)> = self
            .actors
            .iter()
            .enumerate()
            .filter(|(_, a)| a.loaded && !a.player)
            .filter_map(|(i, a)| {
                let pos = Position::new(a.position[0], a.position[1], a.position[2]);
                let dist = pos.distance(&center);
                (dist < radius).then_some((dist, ActorHandle(i as u32)))
            })
            .collect();
        found.sort_by(|a, b| a.0.total_cmp(&b.0));
        found.into_iter().map(|(_, h)| h).collect()
    }

    fn equipped_weapon(&self, actor: ActorHandle) -> Option<WeaponCategory> {
        self.get(actor).and_then(|a| a.weapon)
    }

    fn has_perk(&self, actor: ActorHandle, perk: &str) -> bool {
        self.get(actor)
            .is_some_and(|a| a.perks.iter().any(|p| p == perk))
    }

    fn skeleton_path(&self, actor: ActorHandle) -> Option<String> {
        self.get(actor).and_then(|a| a.skeleton.clone())
    }
}
