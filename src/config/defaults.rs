//! Commented default contents written by `init`.

pub(super) const CONFIG: &str = r#"# kaputt-filter configuration file

# Enable debug logging to file (default: false)
debug = false

# Path to log directory (default: logs next to this file)
# log_path = "logs"

# Filter pipeline: taggers and tag expansions (default: filters.toml next to this file)
# filter_path = "filters.toml"

# Tagged animation pool (default: anims.toml next to this file)
# pool_path = "anims.toml"

# Directory of saved filter presets (default: presets next to this file)
# presets_dir = "presets"

# Fixed random seed for reproducible picks (default: unset, seeded from the OS)
# seed = 42
"#;

pub(super) const FILTER: &str = r#"# kaputt-filter filter file
#
# Taggers run in order for every attacker/victim pair. Each one evaluates its
# rule; if the enabled branch matches, its req_tags must all be present on the
# picked animation and none of its ban_tags may be. Run `kaputt-filter rules`
# for the rule catalog and default params.

[[taggers]]
rule = "Bleedout"
comment = "Bleedout killmoves only on bleeding out victims"
enable_true = true
enable_false = true
params = { check_attacker = false }
true_tags = { req_tags = ["bleedout"], ban_tags = [] }
false_tags = { req_tags = [], ban_tags = ["bleedout"] }

[[taggers]]
rule = "Relative Angle"
comment = "Attacker stands behind the victim"
enable_true = true
enable_false = true
params = { angle_min = 135.0, angle_max = 225.0 }
true_tags = { req_tags = ["back"], ban_tags = [] }
false_tags = { req_tags = [], ban_tags = ["back"] }

[[taggers]]
rule = "Weapon Type"
comment = "Sword killmoves need a sword"
enable_true = false
enable_false = true
params = { check_attacker = true, weapons = ["one_hand_sword"] }
true_tags = { req_tags = [], ban_tags = [] }
false_tags = { req_tags = [], ban_tags = ["1hsword"] }

[[taggers]]
rule = "Weapon Type"
comment = "Dagger killmoves need a dagger"
enable_true = false
enable_false = true
params = { check_attacker = true, weapons = ["one_hand_dagger"] }
true_tags = { req_tags = [], ban_tags = [] }
false_tags = { req_tags = [], ban_tags = ["1hdagger"] }

[[taggers]]
rule = "Weapon Type"
comment = "Greatsword killmoves need a greatsword"
enable_true = false
enable_false = true
params = { check_attacker = true, weapons = ["two_hand_sword"] }
true_tags = { req_tags = [], ban_tags = [] }
false_tags = { req_tags = [], ban_tags = ["2hsword"] }

[[taggers]]
rule = "Weapon Type"
comment = "Unarmed killmoves need empty hands"
enable_true = false
enable_false = true
params = { check_attacker = true, weapons = ["hand_to_hand"] }
true_tags = { req_tags = [], ban_tags = [] }
false_tags = { req_tags = [], ban_tags = ["h2h"] }

[[taggers]]
rule = "Last Hostile"
comment = "Keep long killmoves for the last enemy"
enable_true = false
enable_false = true
params = { range = 1024.0 }
true_tags = { req_tags = [], ban_tags = [] }
false_tags = { req_tags = [], ban_tags = ["long"] }

[[taggers]]
rule = "Essential"
comment = "No decapitation of essential actors"
enable_true = true
enable_false = false
params = { check_attacker = false }
true_tags = { req_tags = [], ban_tags = ["decap"] }
false_tags = { req_tags = [], ban_tags = [] }

# One-level tag expansions: an animation tagged with the key also counts as
# tagged with every listed tag.
[tagexps]
sword = ["1hsword"]
decapitation = ["decap"]
"#;

pub(super) const POOL: &str = r#"# kaputt-filter animation pool
#
# [anims] holds the default tags of every animation. [custom] overrides the
# tags of an animation; remove its line to restore the defaults.

[anims]
pa_KillMove1HMDecap = ["sword", "decapitation", "front"]
pa_KillMove1HMStabA = ["1hsword", "front"]
pa_KillMove1HMBackStab = ["1hsword", "back", "sneak"]
pa_KillMove1HMBleedout = ["1hsword", "bleedout", "front"]
pa_KillMove2HMDecap = ["2hsword", "decap", "front", "long"]
pa_KillMove2HMSlash = ["2hsword", "front"]
pa_KillMoveDaggerBack = ["1hdagger", "back"]
pa_KillMoveH2HSuplex = ["h2h", "front", "long"]
pa_KillMoveH2HBleedout = ["h2h", "bleedout", "front"]

[custom]
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::domain::{AnimPool, FilterPipeline};

    #[test]
    fn test_default_config_parses() {
        let config: Config = toml::from_str(CONFIG).unwrap();
        assert!(!config.debug);
        assert!(config.seed.is_none());
    }

    #[test]
    fn test_default_filter_loads_cleanly() {
        let mut pipeline = FilterPipeline::with_seed(0);
        assert!(pipeline.load_str(FILTER, false));
        assert_eq!(pipeline.taggers().len(), 8);
        assert_eq!(pipeline.expansions().len(), 2);
    }

    #[test]
    fn test_default_pool_parses() {
        let pool = AnimPool::parse(POOL).unwrap();
        assert_eq!(pool.len(), 9);
    }
}
