//! Read-only view of host actor state.
//!
//! The engine never owns actors. Rules receive two opaque [`ActorHandle`]s and
//! read whatever they need through [`ActorQuery`] at evaluation time.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::{KaputtError, Result};

/// Opaque reference to an actor owned by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ActorHandle(pub u32);

impl fmt::Display for ActorHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:08X}", self.0)
    }
}

/// World-space position in game units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Position {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn distance(&self, other: &Position) -> f32 {
        let (dx, dy, dz) = (other.x - self.x, other.y - self.y, other.z - self.z);
        (dx * dx + dy * dy + dz * dz).sqrt()
    }
}

/// Point-in-time state flags of a single actor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActorFlags {
    pub loaded: bool,
    pub dead: bool,
    pub in_paired_animation: bool,
    pub mounted: bool,
    pub bleeding_out: bool,
    pub ragdolling: bool,
    pub protected: bool,
    pub essential: bool,
}

/// Equipped weapon category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeaponCategory {
    HandToHand,
    OneHandSword,
    OneHandDagger,
    OneHandAxe,
    OneHandMace,
    TwoHandSword,
    TwoHandAxe,
    Bow,
    Staff,
    Crossbow,
}

/// Query capability the host provides to the engine.
///
/// Every call is a fresh read; implementations must not assume the engine
/// caches anything between evaluations.
pub trait ActorQuery {
    /// State flags, or `None` if the handle does not resolve.
    fn flags(&self, actor: ActorHandle) -> Option<ActorFlags>;

    fn position(&self, actor: ActorHandle) -> Option<Position>;

    /// Facing heading in degrees, clockwise, 0 along +Y.
    fn heading(&self, actor: ActorHandle) -> Option<f32>;

    fn is_player(&self, actor: ActorHandle) -> bool;

    /// The player actor, if present.
    fn player(&self) -> Option<ActorHandle>;

    fn is_hostile(&self, actor: ActorHandle, other: ActorHandle) -> bool;

    /// Loaded non-player actors within `radius` of `center`, nearest first.
    fn actors_within(&self, center: Position, radius: f32) -> Vec<ActorHandle>;

    fn equipped_weapon(&self, actor: ActorHandle) -> Option<WeaponCategory>;

    fn has_perk(&self, actor: ActorHandle, perk: &str) -> bool;

    /// Skeleton model asset path, as the host reports it.
    fn skeleton_path(&self, actor: ActorHandle) -> Option<String>;
}

/// Flags of `actor`, failing if the host does not know it.
pub fn require_flags(query: &dyn ActorQuery, actor: ActorHandle) -> Result<ActorFlags> {
    query.flags(actor).ok_or(KaputtError::UnknownActor(actor))
}

pub fn require_position(query: &dyn ActorQuery, actor: ActorHandle) -> Result<Position> {
    query.position(actor).ok_or(KaputtError::UnknownActor(actor))
}

pub fn require_heading(query: &dyn ActorQuery, actor: ActorHandle) -> Result<f32> {
    query.heading(actor).ok_or(KaputtError::UnknownActor(actor))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance() {
        let a = Position::new(0.0, 0.0, 0.0);
        let b = Position::new(3.0, 4.0, 0.0);
        assert!((a.distance(&b) - 5.0).abs() < 1e-5);
    }

    #[test]
    fn test_handle_display() {
        assert_eq!(ActorHandle(0x14).to_string(), "00000014");
    }
}
