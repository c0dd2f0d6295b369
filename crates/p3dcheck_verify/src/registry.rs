//! The property rule registry.
//!
//! Maps each recognized (lower-cased) property name to its ordered condition
//! chain. Built once at startup and read-only afterwards, so a single
//! instance is safe to share across loader workers.

use std::collections::HashMap;

use crate::condition::Condition;

/// Values accepted by the `class` property.
const CLASS_VALUES: &[&str] = &[
    "treehard",
    "treesoft",
    "bushhard",
    "bushsoft",
    "forest",
    "house",
    "church",
    "road",
    "thing",
    "land_decal",
    "thingx",
    "clutter",
    "bridge",
    "streetlamp",
    "housesimulated",
    "tower",
    "vehicle",
    "breakablehouseanimated",
    "pond",
    "man",
];

/// Values accepted by `damage` and its historical `dammage` spelling.
const DAMAGE_VALUES: &[&str] = &["building", "no", "tent", "tree", "wall", "wreck"];

/// Values accepted by the `map` property.
const MAP_VALUES: &[&str] = &[
    "building",
    "bunker",
    "bush",
    "busstop",
    "chapel",
    "church",
    "cross",
    "fence",
    "fortress",
    "fountain",
    "fuelstation",
    "hide",
    "hospital",
    "house",
    "lighthouse",
    "main road",
    "power lines",
    "powersolar",
    "powerwave",
    "powerwind",
    "quay",
    "railway",
    "road",
    "rock",
    "ruin",
    "shipwreck",
    "small tree",
    "stack",
    "tourism",
    "track",
    "transmitter",
    "tree",
    "view-tower",
    "wall",
    "watertower",
];

/// Values accepted by the `placement` property.
const PLACEMENT_VALUES: &[&str] = &["slope", "slopex", "slopez", "slopelandcontact"];

/// Values accepted by the `sbsource` property.
const SBSOURCE_VALUES: &[&str] = &[
    "explicit",
    "none",
    "shadow",
    "shadowvolume",
    "visual",
    "visualex",
];

/// Values accepted by the `shadow` property.
const SHADOW_VALUES: &[&str] = &["hybrid"];

/// Resolution band base of shadow volume LODs.
const SHADOW_VOLUME_BASE: f32 = 10000.0;

/// Resolution band base of shadow buffer LODs.
const SHADOW_BUFFER_BASE: f32 = 11000.0;

/// Boolean flags that belong on the geometry LOD.
const BOOLEAN_PROPERTIES: &[&str] = &[
    "aicovers",
    "autocenter",
    "buoyancy",
    "canbeoccluded",
    "canocclude",
    "forcenotalpha",
    "frequent",
    "keyframe",
    "prefershadowvolume",
];

/// Numeric values that belong on the geometry LOD.
const NUMBER_PROPERTIES: &[&str] = &[
    "armor",
    "drawimportance",
    "explosionshielding",
    "viewdensitycoef",
    "loddensitycoef",
    "mass",
    "shadowoffset",
];

fn boolean_rule() -> Vec<Condition> {
    vec![
        Condition::NotEmpty,
        Condition::IsBoolean,
        Condition::OnGeometryLod,
    ]
}

fn number_rule() -> Vec<Condition> {
    vec![
        Condition::NotEmpty,
        Condition::OnGeometryLod,
        Condition::IsNumber,
    ]
}

fn enum_rule(values: &'static [&'static str]) -> Vec<Condition> {
    vec![
        Condition::NotEmpty,
        Condition::OnGeometryLod,
        Condition::IsEnum(values),
    ]
}

/// Shadow LOD index properties accept either a shadow buffer or a shadow
/// volume reference; `-1` is the engine default and redundant to write out.
fn shadow_index_rule() -> Vec<Condition> {
    vec![
        Condition::NotEmpty,
        Condition::OnGeometryLod,
        Condition::ObsoleteValue("-1"),
        Condition::Either(
            Box::new(Condition::LodIndexRef {
                offset: SHADOW_BUFFER_BASE,
                required: false,
            }),
            Box::new(Condition::LodIndexRef {
                offset: SHADOW_VOLUME_BASE,
                required: false,
            }),
        ),
    ]
}

/// Name → condition chain mapping, immutable once built.
#[derive(Debug, Clone)]
pub struct Registry {
    rules: HashMap<&'static str, Vec<Condition>>,
}

impl Registry {
    /// Builds the standard rule set.
    #[must_use]
    pub fn standard() -> Self {
        let mut rules = HashMap::new();
        for name in BOOLEAN_PROPERTIES {
            rules.insert(*name, boolean_rule());
        }
        for name in NUMBER_PROPERTIES {
            rules.insert(*name, number_rule());
        }
        rules.insert("class", enum_rule(CLASS_VALUES));
        rules.insert("damage", enum_rule(DAMAGE_VALUES));
        rules.insert("dammage", enum_rule(DAMAGE_VALUES));
        rules.insert("map", enum_rule(MAP_VALUES));
        rules.insert("placement", enum_rule(PLACEMENT_VALUES));
        rules.insert("sbsource", enum_rule(SBSOURCE_VALUES));
        rules.insert(
            "lodnoshadow",
            vec![
                Condition::NotEmpty,
                Condition::IsBoolean,
                Condition::OnVisualLod,
            ],
        );
        rules.insert(
            "shadow",
            vec![
                Condition::NotEmpty,
                Condition::OnGeometryLod,
                Condition::PropertyAbsent("sbsource"),
                Condition::IsEnum(SHADOW_VALUES),
            ],
        );
        rules.insert("shadowlod", shadow_index_rule());
        rules.insert("shadowbufferlod", shadow_index_rule());
        rules.insert("shadowbufferlodvis", shadow_index_rule());
        rules.insert(
            "shadowvolumelod",
            vec![
                Condition::NotEmpty,
                Condition::OnGeometryLod,
                Condition::ObsoleteValue("-1"),
                Condition::LodIndexRef {
                    offset: SHADOW_VOLUME_BASE,
                    required: false,
                },
            ],
        );
        Self { rules }
    }

    /// The condition chain for a lower-cased property name, if registered.
    #[must_use]
    pub fn rule(&self, name: &str) -> Option<&[Condition]> {
        self.rules.get(name).map(Vec::as_slice)
    }

    /// Number of registered property names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether no rules are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
