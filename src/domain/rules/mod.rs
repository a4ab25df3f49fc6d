//! Rule catalog.
//!
//! A rule is a named predicate over (params, attacker, victim). The catalog is
//! closed: [`RuleKind`] lists every rule and [`RuleParams`] carries the typed
//! params of one of them. Untyped params tables coming from filter files are
//! shape-checked against the rule's defaults before they are converted, so
//! evaluation only ever sees typed records.

mod params;
mod predicates;
mod shape;
pub mod skeleton;

use std::fmt;

use serde::de::DeserializeOwned;
use serde::Serialize;
use toml::{Table, Value};

use super::actor::{ActorHandle, ActorQuery};
use super::error::{KaputtError, Result};

pub use params::{
    ActorParams, AngleParams, DummyParams, PerkParams, RangeParams, SkeletonParams,
    UnconditionalParams, WeaponParams,
};

use params::subject;
use shape::same_shape;

/// Every rule type in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleKind {
    Unconditional,
    Playable,
    Bleedout,
    Ragdoll,
    Protected,
    Essential,
    RelativeAngle,
    LastHostile,
    Skeleton,
    WeaponType,
    HasPerk,
}

impl RuleKind {
    /// Catalog order, as listed to authors.
    pub const ALL: [RuleKind; 11] = [
        RuleKind::Unconditional,
        RuleKind::Playable,
        RuleKind::Bleedout,
        RuleKind::Ragdoll,
        RuleKind::Protected,
        RuleKind::Essential,
        RuleKind::RelativeAngle,
        RuleKind::LastHostile,
        RuleKind::Skeleton,
        RuleKind::WeaponType,
        RuleKind::HasPerk,
    ];

    /// Stable registry key written to filter files.
    pub fn name(self) -> &'static str {
        match self {
            RuleKind::Unconditional => "Unconditional",
            RuleKind::Playable => "Animation Playable",
            RuleKind::Bleedout => "Bleedout",
            RuleKind::Ragdoll => "Ragdoll",
            RuleKind::Protected => "Protected",
            RuleKind::Essential => "Essential",
            RuleKind::RelativeAngle => "Relative Angle",
            RuleKind::LastHostile => "Last Hostile",
            RuleKind::Skeleton => "Skeleton",
            RuleKind::WeaponType => "Weapon Type",
            RuleKind::HasPerk => "Has Perk",
        }
    }

    pub fn hint(self) -> &'static str {
        match self {
            RuleKind::Unconditional => "Always returns `value`.",
            RuleKind::Playable => {
                "True if actor can play paired animations, \
                 i.e. loaded, alive, not already playing animation, and not mounted."
            }
            RuleKind::Bleedout => "True if actor is bleeding out.",
            RuleKind::Ragdoll => "True if actor is ragdolling.",
            RuleKind::Protected => "True if victim is protected and attacker is not player.",
            RuleKind::Essential => "True if actor is essential.",
            RuleKind::RelativeAngle => {
                "True if the attacker is between 2 angles relative to the victim's facing. \
                 Ranges from -360 to 360 deg clockwise, 0 being straight ahead."
            }
            RuleKind::LastHostile => {
                "True if the victim is the last hostile actor within certain distance \
                 (1024 ~= 15 m/48')."
            }
            RuleKind::Skeleton => "True if the actor's skeleton matches. For race checks.",
            RuleKind::WeaponType => "True if the actor's equipped weapon is one of `weapons`.",
            RuleKind::HasPerk => "True if the actor has the perk with the given editor ID.",
        }
    }

    pub fn default_params(self) -> RuleParams {
        match self {
            RuleKind::Unconditional => RuleParams::Unconditional(Default::default()),
            RuleKind::Playable => RuleParams::Playable(Default::default()),
            RuleKind::Bleedout => RuleParams::Bleedout(Default::default()),
            RuleKind::Ragdoll => RuleParams::Ragdoll(Default::default()),
            RuleKind::Protected => RuleParams::Protected(Default::default()),
            RuleKind::Essential => RuleParams::Essential(Default::default()),
            RuleKind::RelativeAngle => RuleParams::RelativeAngle(Default::default()),
            RuleKind::LastHostile => RuleParams::LastHostile(Default::default()),
            RuleKind::Skeleton => RuleParams::Skeleton(Default::default()),
            RuleKind::WeaponType => RuleParams::WeaponType(Default::default()),
            RuleKind::HasPerk => RuleParams::HasPerk(Default::default()),
        }
    }

    /// Shape-only check of an untyped params table against the defaults.
    pub fn validate(self, table: &Table) -> bool {
        self.check_shape(table).is_ok()
    }

    fn check_shape(self, table: &Table) -> Result<()> {
        let reference = self.default_params().to_table()?;
        same_shape(table, &reference).map_err(|reason| self.invalid(reason))
    }

    /// Validate an untyped params table and convert it to the typed record.
    pub fn parse_params(self, table: &Table) -> Result<RuleParams> {
        self.check_shape(table)?;
        Ok(match self {
            RuleKind::Unconditional => RuleParams::Unconditional(self.typed(table)?),
            RuleKind::Playable => RuleParams::Playable(self.typed(table)?),
            RuleKind::Bleedout => RuleParams::Bleedout(self.typed(table)?),
            RuleKind::Ragdoll => RuleParams::Ragdoll(self.typed(table)?),
            RuleKind::Protected => RuleParams::Protected(self.typed(table)?),
            RuleKind::Essential => RuleParams::Essential(self.typed(table)?),
            RuleKind::RelativeAngle => RuleParams::RelativeAngle(self.typed(table)?),
            RuleKind::LastHostile => RuleParams::LastHostile(self.typed(table)?),
            RuleKind::Skeleton => RuleParams::Skeleton(self.typed(table)?),
            RuleKind::WeaponType => RuleParams::WeaponType(self.typed(table)?),
            RuleKind::HasPerk => RuleParams::HasPerk(self.typed(table)?),
        })
    }

    fn typed<T: DeserializeOwned>(self, table: &Table) -> Result<T> {
        Value::Table(table.clone())
            .try_into()
            .map_err(|e: toml::de::Error| self.invalid(e.message().to_string()))
    }

    fn invalid(self, reason: String) -> KaputtError {
        KaputtError::InvalidParams {
            rule: self.name().to_string(),
            reason,
        }
    }
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Name-to-rule lookup over the fixed catalog.
pub struct RuleRegistry;

impl RuleRegistry {
    /// Resolve a case-sensitive rule name.
    pub fn lookup(name: &str) -> Result<RuleKind> {
        RuleKind::ALL
            .into_iter()
            .find(|kind| kind.name() == name)
            .ok_or_else(|| KaputtError::UnknownRule(name.to_string()))
    }

    pub fn all() -> &'static [RuleKind] {
        &RuleKind::ALL
    }
}

/// Typed params of one rule; the variant names the rule.
#[derive(Debug, Clone, PartialEq)]
pub enum RuleParams {
    Unconditional(UnconditionalParams),
    Playable(ActorParams),
    Bleedout(ActorParams),
    Ragdoll(ActorParams),
    Protected(DummyParams),
    Essential(ActorParams),
    RelativeAngle(AngleParams),
    LastHostile(RangeParams),
    Skeleton(SkeletonParams),
    WeaponType(WeaponParams),
    HasPerk(PerkParams),
}

impl RuleParams {
    pub fn kind(&self) -> RuleKind {
        match self {
            RuleParams::Unconditional(_) => RuleKind::Unconditional,
            RuleParams::Playable(_) => RuleKind::Playable,
            RuleParams::Bleedout(_) => RuleKind::Bleedout,
            RuleParams::Ragdoll(_) => RuleKind::Ragdoll,
            RuleParams::Protected(_) => RuleKind::Protected,
            RuleParams::Essential(_) => RuleKind::Essential,
            RuleParams::RelativeAngle(_) => RuleKind::RelativeAngle,
            RuleParams::LastHostile(_) => RuleKind::LastHostile,
            RuleParams::Skeleton(_) => RuleKind::Skeleton,
            RuleParams::WeaponType(_) => RuleKind::WeaponType,
            RuleParams::HasPerk(_) => RuleKind::HasPerk,
        }
    }

    pub fn name(&self) -> &'static str {
        self.kind().name()
    }

    /// Untyped form, as written to filter files.
    pub fn to_table(&self) -> Result<Table> {
        match self {
            RuleParams::Unconditional(p) => table_of(p),
            RuleParams::Playable(p)
            | RuleParams::Bleedout(p)
            | RuleParams::Ragdoll(p)
            | RuleParams::Essential(p) => table_of(p),
            RuleParams::Protected(p) => table_of(p),
            RuleParams::RelativeAngle(p) => table_of(p),
            RuleParams::LastHostile(p) => table_of(p),
            RuleParams::Skeleton(p) => table_of(p),
            RuleParams::WeaponType(p) => table_of(p),
            RuleParams::HasPerk(p) => table_of(p),
        }
    }

    /// Run the predicate against the host's current state.
    pub fn evaluate(
        &self,
        query: &dyn ActorQuery,
        attacker: ActorHandle,
        victim: ActorHandle,
    ) -> Result<bool> {
        match self {
            RuleParams::Unconditional(p) => Ok(p.value),
            RuleParams::Playable(p) => {
                predicates::playable(query, subject(p.check_attacker, attacker, victim))
            }
            RuleParams::Bleedout(p) => {
                predicates::bleedout(query, subject(p.check_attacker, attacker, victim))
            }
            RuleParams::Ragdoll(p) => {
                predicates::ragdoll(query, subject(p.check_attacker, attacker, victim))
            }
            RuleParams::Protected(_) => predicates::protected(query, attacker, victim),
            RuleParams::Essential(p) => {
                predicates::essential(query, subject(p.check_attacker, attacker, victim))
            }
            RuleParams::RelativeAngle(p) => {
                predicates::relative_angle(query, attacker, victim, p.angle_min, p.angle_max)
            }
            RuleParams::LastHostile(p) => {
                predicates::last_hostile(query, attacker, victim, p.range)
            }
            RuleParams::Skeleton(p) => predicates::skeleton(
                query,
                subject(p.check_attacker, attacker, victim),
                &p.skeleton,
            ),
            RuleParams::WeaponType(p) => predicates::weapon_type(
                query,
                subject(p.check_attacker, attacker, victim),
                &p.weapons,
            ),
            RuleParams::HasPerk(p) => predicates::has_perk(
                query,
                subject(p.check_attacker, attacker, victim),
                &p.perk,
            ),
        }
    }
}

fn table_of<T: Serialize>(params: &T) -> Result<Table> {
    match Value::try_from(params)? {
        Value::Table(table) => Ok(table),
        _ => Ok(Table::new()),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::domain::actor::WeaponCategory;
    use crate::domain::world::{ActorSnapshot, SnapshotWorld};

    fn params(src: &str) -> Table {
        toml::from_str(src).unwrap()
    }

    fn world(actors: Vec<(&str, ActorSnapshot)>) -> SnapshotWorld {
        SnapshotWorld::new(
            actors
                .into_iter()
                .map(|(n, a)| (n.to_string(), a))
                .collect::<BTreeMap<_, _>>(),
        )
    }

    fn player() -> ActorSnapshot {
        ActorSnapshot {
            player: true,
            hostile_to: vec!["victim".to_string()],
            ..Default::default()
        }
    }

    fn victim_at(y: f32) -> ActorSnapshot {
        ActorSnapshot {
            position: [0.0, y, 0.0],
            ..Default::default()
        }
    }

    #[test]
    fn test_lookup() {
        assert_eq!(
            RuleRegistry::lookup("Animation Playable").unwrap(),
            RuleKind::Playable
        );
        assert!(matches!(
            RuleRegistry::lookup("bleedout"),
            Err(KaputtError::UnknownRule(name)) if name == "bleedout"
        ));
    }

    #[test]
    fn test_names_are_unique() {
        let mut names: Vec<_> = RuleRegistry::all().iter().map(|k| k.name()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), RuleKind::ALL.len());
    }

    #[test]
    fn test_defaults_validate_and_roundtrip() {
        for kind in RuleKind::ALL {
            let defaults = kind.default_params();
            assert_eq!(defaults.kind(), kind);
            let table = defaults.to_table().unwrap();
            assert!(kind.validate(&table), "{} defaults should validate", kind);
            assert_eq!(kind.parse_params(&table).unwrap(), defaults);
        }
    }

    #[test]
    fn test_default_values() {
        assert_eq!(
            RuleKind::RelativeAngle.default_params(),
            RuleParams::RelativeAngle(AngleParams {
                angle_min: -45.0,
                angle_max: 45.0
            })
        );
        assert_eq!(
            RuleKind::Protected.default_params(),
            RuleParams::Protected(DummyParams { dummy: true })
        );
        assert!(RuleKind::Protected.validate(&params("dummy = false")));
        assert!(!RuleKind::Protected.validate(&Table::new()));
    }

    #[test]
    fn test_validate_rejects_other_shapes() {
        let angle = params("angle_min = -45.0\nangle_max = 45.0");
        assert!(RuleKind::RelativeAngle.validate(&angle));
        assert!(!RuleKind::LastHostile.validate(&angle));
        assert!(!RuleKind::Bleedout.validate(&angle));
        assert!(!RuleKind::Bleedout.validate(&params("check_attacker = 1")));
    }

    #[test]
    fn test_parse_params_accepts_any_values() {
        let parsed = RuleKind::LastHostile
            .parse_params(&params("range = 4096"))
            .unwrap();
        assert_eq!(
            parsed,
            RuleParams::LastHostile(RangeParams { range: 4096.0 })
        );
    }

    #[test]
    fn test_parse_params_reports_rule() {
        let err = RuleKind::Skeleton
            .parse_params(&params("check_attacker = false"))
            .unwrap_err();
        match err {
            KaputtError::InvalidParams { rule, reason } => {
                assert_eq!(rule, "Skeleton");
                assert!(reason.contains("skeleton"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_parse_params_rejects_unknown_weapon() {
        let err = RuleKind::WeaponType
            .parse_params(&params("check_attacker = true\nweapons = [\"spoon\"]"))
            .unwrap_err();
        assert!(matches!(err, KaputtError::InvalidParams { .. }));
    }

    #[test]
    fn test_check_attacker_selects_subject() {
        let w = world(vec![
            ("attacker", ActorSnapshot { bleedout: true, ..Default::default() }),
            ("victim", ActorSnapshot::default()),
        ]);
        let (a, v) = (w.handle("attacker").unwrap(), w.handle("victim").unwrap());

        let victim_rule = RuleParams::Bleedout(ActorParams { check_attacker: false });
        let attacker_rule = RuleParams::Bleedout(ActorParams { check_attacker: true });
        assert!(!victim_rule.evaluate(&w, a, v).unwrap());
        assert!(attacker_rule.evaluate(&w, a, v).unwrap());
    }

    #[test]
    fn test_playable() {
        let w = world(vec![
            ("attacker", ActorSnapshot::default()),
            ("mounted", ActorSnapshot { mounted: true, ..Default::default() }),
            ("dead", ActorSnapshot { dead: true, ..Default::default() }),
            ("busy", ActorSnapshot { paired_animation: true, ..Default::default() }),
            ("unloaded", ActorSnapshot { loaded: false, ..Default::default() }),
            ("victim", ActorSnapshot::default()),
        ]);
        let a = w.handle("attacker").unwrap();
        let rule = RuleKind::Playable.default_params();
        assert!(rule.evaluate(&w, a, w.handle("victim").unwrap()).unwrap());
        for name in ["mounted", "dead", "busy", "unloaded"] {
            assert!(
                !rule.evaluate(&w, a, w.handle(name).unwrap()).unwrap(),
                "{} should not be playable",
                name
            );
        }
    }

    #[test]
    fn test_protected_ignores_player_attacks() {
        let w = world(vec![
            ("player", player()),
            ("npc", ActorSnapshot::default()),
            ("victim", ActorSnapshot { protected: true, ..Default::default() }),
        ]);
        let v = w.handle("victim").unwrap();
        let rule = RuleKind::Protected.default_params();
        assert!(!rule.evaluate(&w, w.handle("player").unwrap(), v).unwrap());
        assert!(rule.evaluate(&w, w.handle("npc").unwrap(), v).unwrap());
    }

    #[test]
    fn test_essential_and_ragdoll() {
        let w = world(vec![
            ("attacker", ActorSnapshot::default()),
            ("victim", ActorSnapshot { essential: true, ragdoll: true, ..Default::default() }),
        ]);
        let (a, v) = (w.handle("attacker").unwrap(), w.handle("victim").unwrap());
        assert!(RuleKind::Essential.default_params().evaluate(&w, a, v).unwrap());
        assert!(RuleKind::Ragdoll.default_params().evaluate(&w, a, v).unwrap());
    }

    #[test]
    fn test_relative_angle_front_and_back() {
        // Victim at origin facing +Y
        let w = world(vec![
            ("front", victim_at(100.0)),
            ("back", victim_at(-100.0)),
            ("victim", ActorSnapshot::default()),
        ]);
        let v = w.handle("victim").unwrap();
        let front_rule = RuleKind::RelativeAngle.default_params();
        let back_rule = RuleParams::RelativeAngle(AngleParams {
            angle_min: 135.0,
            angle_max: 225.0,
        });

        let front = w.handle("front").unwrap();
        let back = w.handle("back").unwrap();
        assert!(front_rule.evaluate(&w, front, v).unwrap());
        assert!(!front_rule.evaluate(&w, back, v).unwrap());
        assert!(back_rule.evaluate(&w, back, v).unwrap());
        assert!(!back_rule.evaluate(&w, front, v).unwrap());
    }

    #[test]
    fn test_last_hostile() {
        let mut actors = vec![
            ("player", player()),
            ("victim", victim_at(100.0)),
            (
                "guard",
                ActorSnapshot {
                    position: [0.0, 500.0, 0.0],
                    ..Default::default()
                },
            ),
        ];
        let w = world(actors.clone());
        let rule = RuleKind::LastHostile.default_params();
        let (p, v) = (w.handle("player").unwrap(), w.handle("victim").unwrap());
        assert!(rule.evaluate(&w, p, v).unwrap(), "guard is not hostile");

        actors.push((
            "bandit",
            ActorSnapshot {
                position: [0.0, 500.0, 0.0],
                hostile_to: vec!["player".to_string()],
                ..Default::default()
            },
        ));
        let w = world(actors.clone());
        let (p, v) = (w.handle("player").unwrap(), w.handle("victim").unwrap());
        assert!(!rule.evaluate(&w, p, v).unwrap(), "bandit is in range");

        let far = RuleParams::LastHostile(RangeParams { range: 200.0 });
        assert!(far.evaluate(&w, p, v).unwrap(), "bandit is out of range");
    }

    #[test]
    fn test_last_hostile_ignores_dead() {
        let w = world(vec![
            ("player", player()),
            ("victim", victim_at(100.0)),
            (
                "corpse",
                ActorSnapshot {
                    position: [0.0, 50.0, 0.0],
                    hostile_to: vec!["player".to_string()],
                    dead: true,
                    ..Default::default()
                },
            ),
        ]);
        let rule = RuleKind::LastHostile.default_params();
        let (p, v) = (w.handle("player").unwrap(), w.handle("victim").unwrap());
        assert!(rule.evaluate(&w, p, v).unwrap());
    }

    #[test]
    fn test_last_hostile_checks_player_separately() {
        // NPC attacker, hostile player standing nearby
        let w = world(vec![
            (
                "player",
                ActorSnapshot {
                    player: true,
                    position: [0.0, 300.0, 0.0],
                    hostile_to: vec!["attacker".to_string()],
                    ..Default::default()
                },
            ),
            ("attacker", ActorSnapshot::default()),
            ("victim", victim_at(100.0)),
        ]);
        let rule = RuleKind::LastHostile.default_params();
        let (a, v) = (w.handle("attacker").unwrap(), w.handle("victim").unwrap());
        assert!(!rule.evaluate(&w, a, v).unwrap());
    }

    #[test]
    fn test_skeleton_weapon_perk() {
        let w = world(vec![
            (
                "attacker",
                ActorSnapshot {
                    weapon: Some(WeaponCategory::TwoHandAxe),
                    perks: vec!["Decapitation".to_string()],
                    ..Default::default()
                },
            ),
            (
                "victim",
                ActorSnapshot {
                    skeleton: Some(r"Actors\Draugr\Character Assets\skeleton.nif".to_string()),
                    ..Default::default()
                },
            ),
        ]);
        let (a, v) = (w.handle("attacker").unwrap(), w.handle("victim").unwrap());

        let draugr = RuleParams::Skeleton(SkeletonParams {
            check_attacker: false,
            skeleton: "draugr".to_string(),
        });
        let troll = RuleParams::Skeleton(SkeletonParams {
            check_attacker: false,
            skeleton: "troll".to_string(),
        });
        assert!(draugr.evaluate(&w, a, v).unwrap());
        assert!(!troll.evaluate(&w, a, v).unwrap());

        let two_handed = RuleParams::WeaponType(WeaponParams {
            check_attacker: true,
            weapons: vec![WeaponCategory::TwoHandAxe, WeaponCategory::TwoHandSword],
        });
        assert!(two_handed.evaluate(&w, a, v).unwrap());
        assert!(!RuleKind::WeaponType.default_params().evaluate(&w, a, v).unwrap());

        let perk = RuleParams::HasPerk(PerkParams {
            check_attacker: true,
            perk: "Decapitation".to_string(),
        });
        assert!(perk.evaluate(&w, a, v).unwrap());
        assert!(!RuleKind::HasPerk.default_params().evaluate(&w, a, v).unwrap());
    }

    #[test]
    fn test_unknown_actor_is_an_error() {
        let w = world(vec![("attacker", ActorSnapshot::default())]);
        let a = w.handle("attacker").unwrap();
        let ghost = ActorHandle(42);
        let err = RuleKind::Bleedout
            .default_params()
            .evaluate(&w, a, ghost)
            .unwrap_err();
        assert!(matches!(err, KaputtError::UnknownActor(h) if h == ghost));

        // Constant rules never touch the host
        assert!(RuleKind::Unconditional
            .default_params()
            .evaluate(&w, a, ghost)
            .unwrap());
    }
}
