//! Typed parameter records, one shape per rule type.
//!
//! The `Default` impls are the canonical defaults written into new taggers
//! and used as the reference shape when validating loaded params.

use serde::{Deserialize, Serialize};

use crate::domain::actor::{ActorHandle, WeaponCategory};

/// Params of `Unconditional`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnconditionalParams {
    pub value: bool,
}

impl Default for UnconditionalParams {
    fn default() -> Self {
        Self { value: true }
    }
}

/// Params of rules that inspect a single actor.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActorParams {
    /// Inspect the attacker instead of the victim
    pub check_attacker: bool,
}

/// Placeholder params of rules without knobs. The flag is not read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DummyParams {
    pub dummy: bool,
}

impl Default for DummyParams {
    fn default() -> Self {
        Self { dummy: true }
    }
}

/// Params of `Relative Angle`, in degrees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AngleParams {
    pub angle_min: f32,
    pub angle_max: f32,
}

impl Default for AngleParams {
    fn default() -> Self {
        Self {
            angle_min: -45.0,
            angle_max: 45.0,
        }
    }
}

/// Params of `Last Hostile`. 1024 units is about 15 m.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RangeParams {
    pub range: f32,
}

impl Default for RangeParams {
    fn default() -> Self {
        Self { range: 1024.0 }
    }
}

/// Params of `Skeleton`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SkeletonParams {
    pub check_attacker: bool,
    /// Symbolic skeleton name, e.g. `"draugr"`
    pub skeleton: String,
}

/// Params of `Weapon Type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeaponParams {
    pub check_attacker: bool,
    pub weapons: Vec<WeaponCategory>,
}

impl Default for WeaponParams {
    fn default() -> Self {
        Self {
            check_attacker: true,
            weapons: vec![WeaponCategory::OneHandSword],
        }
    }
}

/// Params of `Has Perk`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerkParams {
    pub check_attacker: bool,
    /// Perk editor ID
    pub perk: String,
}

impl Default for PerkParams {
    fn default() -> Self {
        Self {
            check_attacker: true,
            perk: String::new(),
        }
    }
}

/// Pick the inspected actor.
pub(crate) fn subject(
    check_attacker: bool,
    attacker: ActorHandle,
    victim: ActorHandle,
) -> ActorHandle {
    if check_attacker {
        attacker
    } else {
        victim
    }
}
