//! Lock tests for the observable properties of a search: trivial and
//! unknown targets, fingerprint identity, dedup, quota, completeness, tier
//! order, the Brick node count and quota-driven cancellation.

use std::collections::BTreeSet;
use std::sync::Arc;

use crucible_search::derivation::{fingerprint, is_complete};
use crucible_search::{search, Derivation, SearchPolicy, TerminationReason, Traversal};
use lock_tests::fixtures::{brick_graph, is_tier_monotone, layered_graph, layered_name, policy};
use proptest::prelude::*;

const BOTH: [Traversal; 2] = [Traversal::BreadthFirst, Traversal::DepthFirst];

#[test]
fn base_item_yields_single_empty_derivation() {
    let graph = brick_graph();
    for traversal in BOTH {
        let outcome = search(&graph, "Fire", &policy(traversal, 4, 0)).unwrap();
        assert_eq!(
            outcome.derivations,
            vec![Derivation::trivial(Arc::from("Fire"))]
        );
        assert_eq!(outcome.nodes_visited, 1);
        assert_eq!(outcome.termination, TerminationReason::TrivialTarget);
    }
}

#[test]
fn unknown_item_yields_nothing() {
    let outcome = search(&brick_graph(), "Philosopher's Stone", &SearchPolicy::default()).unwrap();
    assert!(outcome.derivations.is_empty());
    assert_eq!(outcome.nodes_visited, 0);
    assert_eq!(outcome.termination, TerminationReason::TargetNotFound);
}

#[test]
fn fingerprint_ignores_ingredient_order() {
    let a: Derivation = [("Brick", ["Mud", "Fire"])].into_iter().collect();
    let b: Derivation = [("Brick", ["Fire", "Mud"])].into_iter().collect();
    assert_eq!(fingerprint(&a), fingerprint(&b));
}

#[test]
fn brick_scenario() {
    let graph = brick_graph();
    let expected: Derivation = [("Brick", ["Mud", "Fire"]), ("Mud", ["Water", "Earth"])]
        .into_iter()
        .collect();
    for traversal in BOTH {
        for workers in [1, 4] {
            let outcome = search(&graph, "Brick", &policy(traversal, workers, 0)).unwrap();
            assert_eq!(outcome.derivations, vec![expected.clone()]);
            assert_eq!(outcome.nodes_visited, 5, "{traversal} with {workers} workers");
        }
    }
}

#[test]
fn unbounded_results_are_distinct_complete_and_tier_ordered() {
    let graph = layered_graph(2, 4, 3);
    let target = layered_name(2, 1);
    for traversal in BOTH {
        let outcome = search(&graph, &target, &policy(traversal, 4, 0)).unwrap();
        assert!(!outcome.derivations.is_empty());
        assert_eq!(
            outcome.fingerprints().len(),
            outcome.derivations.len(),
            "no two results share a fingerprint"
        );
        for derivation in &outcome.derivations {
            assert!(is_complete(derivation, &graph), "{derivation:?}");
            assert!(is_tier_monotone(derivation, &graph), "{derivation:?}");
            assert!(derivation.contains(&target));
        }
        assert_eq!(outcome.termination, TerminationReason::FrontierExhausted);
    }
}

#[test]
fn quota_cancels_large_search_with_exact_count() {
    let graph = layered_graph(3, 4, 3);
    let target = layered_name(3, 0);
    for traversal in BOTH {
        let outcome = search(&graph, &target, &policy(traversal, 4, 10)).unwrap();
        assert_eq!(outcome.derivations.len(), 10);
        assert_eq!(
            outcome.termination,
            TerminationReason::QuotaReached { quota: 10 }
        );
        let distinct: BTreeSet<_> = outcome.derivations.iter().map(fingerprint).collect();
        assert_eq!(distinct.len(), 10);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn quota_bounds_results_on_generated_graphs(
        layers in 1u32..=3,
        width in 2usize..=4,
        recipes in 1usize..=3,
        quota in 1usize..=6,
        depth_first in any::<bool>(),
        workers in 1usize..=3,
    ) {
        let graph = layered_graph(layers, width, recipes);
        let traversal = if depth_first { Traversal::DepthFirst } else { Traversal::BreadthFirst };
        let outcome = search(&graph, &layered_name(layers, 0), &policy(traversal, workers, quota)).unwrap();

        prop_assert!(outcome.derivations.len() <= quota);
        prop_assert!(!outcome.derivations.is_empty());
        prop_assert_eq!(outcome.fingerprints().len(), outcome.derivations.len());
        for derivation in &outcome.derivations {
            prop_assert!(is_complete(derivation, &graph));
        }
    }
}
