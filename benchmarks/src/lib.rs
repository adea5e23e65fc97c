//! Shared helpers for crucible benchmark suites.

use std::num::NonZeroUsize;

use crucible_graph::recipe_graph::GraphRecords;
use crucible_graph::{ItemRecord, RecipeGraph};
use crucible_search::{BackoffPolicy, SearchPolicy, Traversal};

/// A named search workload.
pub struct Regime {
    pub name: &'static str,
    pub graph: RecipeGraph,
    pub target: String,
    pub policy: SearchPolicy,
}

/// Graph records with `layers` tiers of `width` items above `width` base
/// items. Item `i` at tier `t` gets `recipes` recipes whose ingredients are
/// spread over the tiers below by a fixed stride, so results are
/// reproducible across runs.
#[must_use]
pub fn synthetic_records(layers: u32, width: usize, recipes: usize) -> GraphRecords {
    let name = |tier: u32, index: usize| {
        if tier == 0 {
            format!("Base{index}")
        } else {
            format!("Item{tier}x{index}")
        }
    };
    let mut records = GraphRecords::new();
    for tier in 0..=layers {
        for index in 0..width {
            let item_recipes = if tier == 0 {
                Vec::new()
            } else {
                (0..recipes)
                    .map(|j| {
                        let lower = u32::try_from(j).map_or(0, |j| j % tier);
                        vec![
                            name(tier - 1, (index * 3 + j) % width),
                            name(lower, (index + 5 * j + 1) % width),
                        ]
                    })
                    .collect()
            };
            records.insert(
                name(tier, index),
                ItemRecord {
                    tier,
                    recipes: item_recipes,
                },
            );
        }
    }
    records
}

/// Name of the first item on the top tier of a synthetic graph.
#[must_use]
pub fn synthetic_target(layers: u32) -> String {
    format!("Item{layers}x0")
}

/// Built graph for [`synthetic_records`].
#[must_use]
pub fn synthetic_graph(layers: u32, width: usize, recipes: usize) -> RecipeGraph {
    RecipeGraph::from_records(&synthetic_records(layers, width, recipes))
}

fn policy(traversal: Traversal, quota: usize) -> SearchPolicy {
    SearchPolicy::new(traversal, NonZeroUsize::new(quota))
}

/// The benchmark workloads: exhaustive runs in both orders, a quota-bound
/// run on a deep graph, and a cramped frontier that forces drops.
#[must_use]
pub fn regimes() -> Vec<Regime> {
    vec![
        Regime {
            name: "exhaustive_bfs",
            graph: synthetic_graph(2, 5, 3),
            target: synthetic_target(2),
            policy: policy(Traversal::BreadthFirst, 0),
        },
        Regime {
            name: "exhaustive_dfs",
            graph: synthetic_graph(2, 5, 3),
            target: synthetic_target(2),
            policy: policy(Traversal::DepthFirst, 0),
        },
        Regime {
            name: "quota_deep",
            graph: synthetic_graph(4, 5, 3),
            target: synthetic_target(4),
            policy: policy(Traversal::DepthFirst, 50),
        },
        Regime {
            name: "frontier_pressure",
            graph: synthetic_graph(3, 5, 3),
            target: synthetic_target(3),
            policy: SearchPolicy {
                frontier_capacity: 8,
                backoff: BackoffPolicy {
                    attempts: 2,
                    ..BackoffPolicy::default()
                },
                ..policy(Traversal::BreadthFirst, 0)
            },
        },
    ]
}
