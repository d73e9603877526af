//! Small hand-built manifest shared by the unit tests.

use crate::hash::ManifestHash;
use crate::manifest::{Manifest, MemoryManifest, Table};
use serde_json::{json, Value};

pub const FATEBRINGER: u32 = 2171478765;
pub const FATEBRINGER_ADEPT: u32 = 1216319404;
pub const ORNAMENT: u32 = 6001;
pub const GHOST_SHELL: u32 = 6002;
pub const RETIRED_PERK: u32 = 9001;

pub const ARROWHEAD_BRAKE: u32 = 1001;
pub const CORKSCREW_RIFLING: u32 = 1002;
pub const HAMMER_FORGED: u32 = 1003;
pub const IGNORED_BARREL: u32 = 1099;
pub const ACCURIZED_ROUNDS: u32 = 2001;
pub const RICOCHET_ROUNDS: u32 = 2002;
pub const EXPLOSIVE_PAYLOAD: u32 = 3001;
pub const FIREFLY: u32 = 3002;
pub const EYES_UP: u32 = 3_000_000_003;
pub const OPENING_SHOT: u32 = 4001;
pub const KILL_CLIP: u32 = 4002;
pub const FIREFLY_ALT: u32 = 4003;
pub const INTRINSIC_FRAME: u32 = 100;

const INTRINSIC_CATEGORY: u32 = 3956125808;

const PERKS: &[(u32, &str)] = &[
    (ARROWHEAD_BRAKE, "Arrowhead Brake"),
    (CORKSCREW_RIFLING, "Corkscrew Rifling"),
    (HAMMER_FORGED, "Hammer-Forged Rifling"),
    (IGNORED_BARREL, "Ignored Barrel"),
    (ACCURIZED_ROUNDS, "Accurized Rounds"),
    (RICOCHET_ROUNDS, "Ricochet Rounds"),
    (EXPLOSIVE_PAYLOAD, "Explosive Payload"),
    (FIREFLY, "Firefly"),
    (EYES_UP, "Eyes Up, Guardian"),
    (OPENING_SHOT, "Opening Shot"),
    (KILL_CLIP, "Kill Clip"),
    (FIREFLY_ALT, "Firefly"),
    (INTRINSIC_FRAME, "Adaptive Frame"),
    (RETIRED_PERK, "Retired Perk"),
];

fn plug_items(hashes: &[u32]) -> Value {
    Value::Array(
        hashes
            .iter()
            .map(|h| json!({ "plugItemHash": h }))
            .collect(),
    )
}

fn weapon(hash: u32, name: &str) -> Value {
    json!({
        "hash": hash,
        "displayProperties": { "name": name },
        "sockets": {
            "socketCategories": [
                { "socketCategoryHash": INTRINSIC_CATEGORY, "socketIndexes": [0] },
                { "socketCategoryHash": 4241085061u32, "socketIndexes": [1, 2, 3, 4] }
            ],
            "socketEntries": [
                { "reusablePlugItems": plug_items(&[INTRINSIC_FRAME]) },
                {
                    "reusablePlugItems": plug_items(&[ARROWHEAD_BRAKE]),
                    "randomizedPlugSetHash": 5001,
                    "reusablePlugSetHash": 5009
                },
                { "reusablePlugItems": [], "reusablePlugSetHash": 5002 },
                { "randomizedPlugSetHash": 5003 },
                { "reusablePlugItems": [], "randomizedPlugSetHash": 5004 }
            ]
        }
    })
}

/// Memory manifest with two weapon variants, their perks and plug sets
pub fn source() -> MemoryManifest {
    let mut source = MemoryManifest::new();

    for &(hash, name) in PERKS {
        source.insert(
            Table::InventoryItem,
            ManifestHash(hash),
            &json!({ "hash": hash, "displayProperties": { "name": name } }),
        );
    }

    source.insert(
        Table::InventoryItem,
        ManifestHash(FATEBRINGER),
        &weapon(FATEBRINGER, "Fatebringer"),
    );
    source.insert(
        Table::InventoryItem,
        ManifestHash(FATEBRINGER_ADEPT),
        &weapon(FATEBRINGER_ADEPT, "Fatebringer (Adept)"),
    );
    source.insert(
        Table::InventoryItem,
        ManifestHash(ORNAMENT),
        &json!({ "hash": ORNAMENT, "displayProperties": { "name": "Ornament" } }),
    );
    source.insert(
        Table::InventoryItem,
        ManifestHash(GHOST_SHELL),
        &json!({
            "hash": GHOST_SHELL,
            "displayProperties": { "name": "Ghost Shell" },
            "sockets": {
                "socketCategories": [
                    { "socketCategoryHash": INTRINSIC_CATEGORY, "socketIndexes": [0] }
                ],
                "socketEntries": [
                    { "reusablePlugItems": plug_items(&[INTRINSIC_FRAME]) }
                ]
            }
        }),
    );

    let plug_sets: &[(u32, &[u32])] = &[
        (5001, &[ARROWHEAD_BRAKE, CORKSCREW_RIFLING, HAMMER_FORGED]),
        (5002, &[ACCURIZED_ROUNDS, RICOCHET_ROUNDS]),
        (5003, &[EXPLOSIVE_PAYLOAD, FIREFLY, EYES_UP]),
        (5004, &[OPENING_SHOT, KILL_CLIP, FIREFLY_ALT]),
        (5009, &[IGNORED_BARREL]),
    ];
    for &(hash, plugs) in plug_sets {
        source.insert(
            Table::PlugSet,
            ManifestHash(hash),
            &json!({ "hash": hash, "reusablePlugItems": plug_items(plugs) }),
        );
    }

    source
}

pub fn manifest() -> Manifest {
    Manifest::new(source())
}
