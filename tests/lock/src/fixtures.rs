//! Recipe graphs and assertions shared by the lock tests.
//!
//! # Panics
//!
//! Helpers here panic on malformed fixtures. These are test-only invariants.

use std::num::NonZeroUsize;

use crucible_graph::recipe_graph::GraphRecords;
use crucible_graph::{ItemRecord, RecipeGraph};
use crucible_search::{Derivation, SearchPolicy, Traversal};

/// The canonical small scenario: one derivation of Brick, five nodes.
pub const BRICK_JSON: &str = r#"{
    "Water": {"tier": 0, "recipes": null},
    "Earth": {"tier": 0},
    "Fire": {"tier": 0},
    "Air": {"tier": 0},
    "Mud": {"tier": 1, "recipes": [["Water", "Earth"]]},
    "Brick": {"tier": 2, "recipes": [["Mud", "Fire"]]}
}"#;

/// Same-tier cross references with a potential cycle (Steam <-> Mist).
pub const VAPOR_JSON: &str = r#"{
    "Water": {"tier": 0}, "Fire": {"tier": 0}, "Earth": {"tier": 0},
    "Steam": {"tier": 1, "recipes": [["Water", "Fire"], ["Mist", "Fire"]]},
    "Mist": {"tier": 1, "recipes": [["Steam", "Water"], ["Water", "Earth"]]},
    "Cloud": {"tier": 2, "recipes": [["Steam", "Mist"], ["Cloud", "Water"]]}
}"#;

#[must_use]
pub fn brick_graph() -> RecipeGraph {
    RecipeGraph::from_json_str(BRICK_JSON).unwrap()
}

#[must_use]
pub fn vapor_graph() -> RecipeGraph {
    RecipeGraph::from_json_str(VAPOR_JSON).unwrap()
}

/// Name of item `index` at `tier` in a layered graph.
#[must_use]
pub fn layered_name(tier: u32, index: usize) -> String {
    if tier == 0 {
        format!("B{index}")
    } else {
        format!("T{tier}_{index}")
    }
}

/// Records for a layered graph: `width` base items, then `layers` tiers of
/// `width` items, each with `recipes` recipes drawn from the one or two
/// tiers below. Every recipe respects strict tier order.
#[must_use]
pub fn layered_records(layers: u32, width: usize, recipes: usize) -> GraphRecords {
    let mut records = GraphRecords::new();
    for index in 0..width {
        records.insert(
            layered_name(0, index),
            ItemRecord {
                tier: 0,
                recipes: Vec::new(),
            },
        );
    }
    for tier in 1..=layers {
        for index in 0..width {
            let item_recipes = (0..recipes)
                .map(|j| {
                    let b_tier = if tier >= 2 && j % 2 == 1 { tier - 2 } else { tier - 1 };
                    vec![
                        layered_name(tier - 1, (index + j) % width),
                        layered_name(b_tier, (index + 2 * j + 1) % width),
                    ]
                })
                .collect();
            records.insert(
                layered_name(tier, index),
                ItemRecord {
                    tier,
                    recipes: item_recipes,
                },
            );
        }
    }
    records
}

#[must_use]
pub fn layered_graph(layers: u32, width: usize, recipes: usize) -> RecipeGraph {
    RecipeGraph::from_records(&layered_records(layers, width, recipes))
}

/// Policy with an explicit worker count and optional quota.
#[must_use]
pub fn policy(traversal: Traversal, workers: usize, quota: usize) -> SearchPolicy {
    SearchPolicy {
        workers: NonZeroUsize::new(workers),
        ..SearchPolicy::new(traversal, NonZeroUsize::new(quota))
    }
}

/// Every ingredient of every non-base key has a strictly lower tier.
#[must_use]
pub fn is_tier_monotone(derivation: &Derivation, graph: &RecipeGraph) -> bool {
    derivation.iter().all(|(item, ingredients)| {
        let tier = graph.tier(item).unwrap();
        tier == 0
            || ingredients
                .iter()
                .all(|i| graph.tier(i).is_some_and(|t| t < tier))
    })
}

/// No key depends on itself through chosen recipes.
#[must_use]
pub fn is_acyclic(derivation: &Derivation) -> bool {
    derivation.iter().all(|(item, ingredients)| {
        ingredients
            .iter()
            .all(|ingredient| !derivation.reaches(ingredient, item))
    })
}
