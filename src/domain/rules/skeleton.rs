//! Skeleton asset path to symbolic race name lookup.

/// Vanilla and DLC skeleton models, lowercase, relative to `meshes\`.
const SKELETONS: &[(&str, &str)] = &[
    (r"actors\character\character assets\skeleton.nif", "character"),
    (r"actors\character\character assets female\skeleton_female.nif", "character"),
    (r"actors\ambient\chicken\character assets\skeleton.nif", "chicken"),
    (r"actors\ambient\hare\character assets\skeleton.nif", "hare"),
    (r"actors\atronachflame\character assets\skeleton.nif", "atronachflame"),
    (r"actors\atronachfrost\character assets\skeleton.nif", "atronachfrost"),
    (r"actors\atronachstorm\character assets\skeleton.nif", "atronachstorm"),
    (r"actors\bear\character assets\skeleton.nif", "bear"),
    (r"actors\canine\character assets dog\skeleton.nif", "dog"),
    (r"actors\canine\character assets wolf\skeleton.nif", "wolf"),
    (r"actors\chaurus\character assets\skeleton.nif", "chaurus"),
    (r"actors\chaurusflyer\character assets\skeleton.nif", "chaurusflyer"),
    (r"actors\deer\character assets\skeleton.nif", "deer"),
    (r"actors\dlc01\vampirelord\character assets\skeleton.nif", "vampirelord"),
    (r"actors\dlc02\benthiclurker\character assets\skeleton.nif", "lurker"),
    (r"actors\dlc02\boarriekling\character assets\skeleton.nif", "boar"),
    (r"actors\dlc02\netch\character assets\skeleton.nif", "netch"),
    (r"actors\dlc02\riekling\character assets\skeleton.nif", "riekling"),
    (r"actors\dlc02\scrib\character assets\skeleton.nif", "ashhopper"),
    (r"actors\dragon\character assets\skeleton.nif", "dragon"),
    (r"actors\dragonpriest\character assets\skeleton.nif", "dragonpriest"),
    (r"actors\draugr\character assets\skeleton.nif", "draugr"),
    (r"actors\draugr\character assets\skeletons.nif", "draugr"),
    (r"actors\dwarvenspherecenturion\character assets\skeleton.nif", "dwarvensphere"),
    (r"actors\dwarvenspider\character assets\skeleton.nif", "dwarvenspider"),
    (r"actors\dwarvensteamcenturion\character assets\skeleton.nif", "dwarvencenturion"),
    (r"actors\falmer\character assets\skeleton.nif", "falmer"),
    (r"actors\frostbitespider\character assets\skeleton.nif", "frostbitespider"),
    (r"actors\giant\character assets\skeleton.nif", "giant"),
    (r"actors\goat\character assets\skeleton.nif", "goat"),
    (r"actors\hagraven\character assets\skeleton.nif", "hagraven"),
    (r"actors\horker\character assets\skeleton.nif", "horker"),
    (r"actors\horse\character assets\skeleton.nif", "horse"),
    (r"actors\icewraith\character assets\skeleton.nif", "icewraith"),
    (r"actors\mammoth\character assets\skeleton.nif", "mammoth"),
    (r"actors\mudcrab\character assets\skeleton.nif", "mudcrab"),
    (r"actors\sabrecat\character assets\skeleton.nif", "sabrecat"),
    (r"actors\skeever\character assets\skeleton.nif", "skeever"),
    (r"actors\slaughterfish\character assets\skeleton.nif", "slaughterfish"),
    (r"actors\spriggan\character assets\skeleton.nif", "spriggan"),
    (r"actors\troll\character assets\skeleton.nif", "troll"),
    (r"actors\vampirebeast\character assets\skeleton.nif", "vampirelord"),
    (r"actors\werewolfbeast\character assets\skeleton.nif", "werewolf"),
    (r"actors\wisp\character assets\skeleton.nif", "wisp"),
    (r"actors\witchlight\character assets\skeleton.nif", "witchlight"),
];

/// Symbolic name of the skeleton at `path`.
///
/// Matching ignores case, slash direction and a leading `meshes\`.
pub fn skeleton_name(path: &str) -> Option<&'static str> {
    let normalized = path.trim().to_ascii_lowercase().replace('/', "\\");
    let normalized = normalized
        .strip_prefix("meshes\\")
        .unwrap_or(&normalized);

    SKELETONS
        .iter()
        .find(|(p, _)| *p == normalized)
        .map(|(_, name)| *name)
}

/// All distinct symbolic names, sorted.
pub fn known_skeletons() -> Vec<&'static str> {
    let mut names: Vec<_> = SKELETONS.iter().map(|(_, n)| *n).collect();
    names.sort_unstable();
    names.dedup();
    names
}
