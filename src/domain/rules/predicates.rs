//! Predicate implementations behind the rule catalog.

use tracing::debug;

use super::skeleton::skeleton_name;
use crate::domain::actor::{
    require_flags, require_heading, require_position, ActorHandle, ActorQuery, Position,
    WeaponCategory,
};
use crate::domain::error::Result;

/// Loaded, alive, not in a paired animation and not mounted.
pub fn playable(query: &dyn ActorQuery, actor: ActorHandle) -> Result<bool> {
    let flags = require_flags(query, actor)?;
    Ok(flags.loaded && !flags.dead && !flags.in_paired_animation && !flags.mounted)
}

pub fn bleedout(query: &dyn ActorQuery, actor: ActorHandle) -> Result<bool> {
    Ok(require_flags(query, actor)?.bleeding_out)
}

pub fn ragdoll(query: &dyn ActorQuery, actor: ActorHandle) -> Result<bool> {
    Ok(require_flags(query, actor)?.ragdolling)
}

pub fn essential(query: &dyn ActorQuery, actor: ActorHandle) -> Result<bool> {
    Ok(require_flags(query, actor)?.essential)
}

/// Victim is protected and the attacker is not the player.
pub fn protected(query: &dyn ActorQuery, attacker: ActorHandle, victim: ActorHandle) -> Result<bool> {
    require_flags(query, attacker)?;
    let victim_flags = require_flags(query, victim)?;
    Ok(!query.is_player(attacker) && victim_flags.protected)
}

/// Bearing of `target` seen from `origin` facing `heading`, in `[-180, 180)`.
pub fn relative_bearing(origin: Position, heading: f32, target: Position) -> f32 {
    let (dx, dy) = (target.x - origin.x, target.y - origin.y);
    let absolute = dx.atan2(dy).to_degrees();
    (absolute - heading + 180.0).rem_euclid(360.0) - 180.0
}

/// `angle` in `[min, max)`, also trying `angle ± 360` so ranges may cross ±180.
pub fn angle_in_range(angle: f32, min: f32, max: f32) -> bool {
    [angle - 360.0, angle, angle + 360.0]
        .iter()
        .any(|a| min <= *a && *a < max)
}

/// Attacker lies within `[min, max)` degrees of the victim's facing.
pub fn relative_angle(
    query: &dyn ActorQuery,
    attacker: ActorHandle,
    victim: ActorHandle,
    min: f32,
    max: f32,
) -> Result<bool> {
    let origin = require_position(query, victim)?;
    let heading = require_heading(query, victim)?;
    let target = require_position(query, attacker)?;

    let bearing = relative_bearing(origin, heading, target);
    debug!(bearing, min, max, "Relative angle");
    Ok(angle_in_range(bearing, min, max))
}

/// No living actor hostile to the attacker other than the victim within `range`.
///
/// The player is checked on its own because hosts do not list it among the
/// loaded actors.
pub fn last_hostile(
    query: &dyn ActorQuery,
    attacker: ActorHandle,
    victim: ActorHandle,
    range: f32,
) -> Result<bool> {
    let origin = require_position(query, attacker)?;
    require_flags(query, victim)?;

    let is_live_hostile = |other: ActorHandle| {
        query.flags(other).is_some_and(|f| !f.dead) && query.is_hostile(other, attacker)
    };

    for other in query.actors_within(origin, range) {
        if other == victim || other == attacker {
            continue;
        }
        if is_live_hostile(other) {
            debug!(%other, "Another hostile is in range");
            return Ok(false);
        }
    }

    if let Some(player) = query.player() {
        if player != attacker && player != victim && is_live_hostile(player) {
            let in_range = query
                .position(player)
                .is_some_and(|pos| pos.distance(&origin) < range);
            if in_range {
                debug!("Player is a hostile in range");
                return Ok(false);
            }
        }
    }

    Ok(true)
}

/// Skeleton of `actor` maps to `name`.
pub fn skeleton(query: &dyn ActorQuery, actor: ActorHandle, name: &str) -> Result<bool> {
    require_flags(query, actor)?;
    let Some(path) = query.skeleton_path(actor) else {
        return Ok(false);
    };
    Ok(skeleton_name(&path) == Some(name))
}

pub fn weapon_type(
    query: &dyn ActorQuery,
    actor: ActorHandle,
    weapons: &[WeaponCategory],
) -> Result<bool> {
    require_flags(query, actor)?;
    Ok(query
        .equipped_weapon(actor)
        .is_some_and(|w| weapons.contains(&w)))
}

pub fn has_perk(query: &dyn ActorQuery, actor: ActorHandle, perk: &str) -> Result<bool> {
    require_flags(query, actor)?;
    Ok(!perk.is_empty() && query.has_perk(actor, perk))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_bearing_cardinal() {
        let origin = Position::default();
        // Facing +Y
        assert!((relative_bearing(origin, 0.0, Position::new(0.0, 10.0, 0.0))).abs() < 1e-3);
        assert!((relative_bearing(origin, 0.0, Position::new(10.0, 0.0, 0.0)) - 90.0).abs() < 1e-3);
        assert!((relative_bearing(origin, 0.0, Position::new(-10.0, 0.0, 0.0)) + 90.0).abs() < 1e-3);
        assert!((relative_bearing(origin, 0.0, Position::new(0.0, -10.0, 0.0)) + 180.0).abs() < 1e-3);
    }

    #[test]
    fn test_relative_bearing_accounts_for_heading() {
        // Facing +X, target at +X is straight ahead
        let b = relative_bearing(Position::default(), 90.0, Position::new(10.0, 0.0, 0.0));
        assert!(b.abs() < 1e-3);
        // Facing +X, target at +Y is 90 degrees counter-clockwise
        let b = relative_bearing(Position::default(), 90.0, Position::new(0.0, 10.0, 0.0));
        assert!((b + 90.0).abs() < 1e-3);
    }

    #[test]
    fn test_angle_in_range_half_open() {
        assert!(angle_in_range(-45.0, -45.0, 45.0));
        assert!(angle_in_range(0.0, -45.0, 45.0));
        assert!(!angle_in_range(45.0, -45.0, 45.0));
    }

    #[test]
    fn test_angle_in_range_wraps() {
        // Behind the victim: 135..225 covers -180..-135 and 135..180
        assert!(angle_in_range(-170.0, 135.0, 225.0));
        assert!(angle_in_range(170.0, 135.0, 225.0));
        assert!(!angle_in_range(0.0, 135.0, 225.0));
        assert!(!angle_in_range(-170.0, -360.0, -300.0));
        assert!(angle_in_range(10.0, -360.0, -340.0));
    }
}
