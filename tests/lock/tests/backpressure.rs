//! Lock tests: a tiny frontier drops states but the search still
//! terminates, and relaxed tier mode never produces a cyclic derivation.

use std::num::NonZeroUsize;
use std::time::Duration;

use crucible_search::derivation::is_complete;
use crucible_search::{search, BackoffPolicy, SearchPolicy, TerminationReason, TierRule, Traversal};
use lock_tests::fixtures::{is_acyclic, layered_graph, layered_name, policy, vapor_graph};

fn cramped(traversal: Traversal) -> SearchPolicy {
    SearchPolicy {
        workers: NonZeroUsize::new(1),
        frontier_capacity: 1,
        backoff: BackoffPolicy {
            attempts: 1,
            initial: Duration::from_millis(1),
            max: Duration::from_millis(1),
        },
        ..SearchPolicy::new(traversal, None)
    }
}

#[test]
fn full_frontier_drops_are_counted_and_search_terminates() {
    let graph = layered_graph(2, 4, 3);
    let target = layered_name(2, 0);
    let roomy = search(&graph, &target, &policy(Traversal::BreadthFirst, 1, 0)).unwrap();

    for traversal in [Traversal::BreadthFirst, Traversal::DepthFirst] {
        let outcome = search(&graph, &target, &cramped(traversal)).unwrap();
        assert!(outcome.stats.states_dropped > 0, "{traversal}");
        assert_eq!(outcome.termination, TerminationReason::FrontierExhausted);
        assert!(outcome.derivations.len() < roomy.derivations.len());
        assert!(outcome
            .derivations
            .iter()
            .all(|d| is_complete(d, &graph)));
        assert!(outcome.fingerprints().is_subset(&roomy.fingerprints()));
    }
}

#[test]
fn seeds_are_never_dropped() {
    let graph = layered_graph(2, 4, 3);
    let outcome = search(&graph, &layered_name(2, 1), &cramped(Traversal::BreadthFirst)).unwrap();
    assert_eq!(outcome.stats.seeded_states, 3);
    assert!(outcome.stats.frontier_high_water >= 3);
}

#[test]
fn strict_mode_rejects_same_tier_ingredients() {
    let graph = vapor_graph();
    let outcome = search(&graph, "Cloud", &policy(Traversal::BreadthFirst, 2, 0)).unwrap();
    let expected: crucible_search::Derivation = [
        ("Cloud", ["Steam", "Mist"]),
        ("Steam", ["Water", "Fire"]),
        ("Mist", ["Water", "Earth"]),
    ]
    .into_iter()
    .collect();
    assert_eq!(outcome.derivations, vec![expected]);
}

#[test]
fn relaxed_mode_admits_same_tier_without_cycles() {
    let graph = vapor_graph();
    for traversal in [Traversal::BreadthFirst, Traversal::DepthFirst] {
        let relaxed = SearchPolicy {
            tier_rule: TierRule::BelowTarget,
            ..policy(traversal, 2, 0)
        };
        let outcome = search(&graph, "Cloud", &relaxed).unwrap();
        assert_eq!(outcome.derivations.len(), 3, "{traversal}");
        for derivation in &outcome.derivations {
            assert!(is_acyclic(derivation), "{derivation:?}");
            assert!(is_complete(derivation, &graph), "{derivation:?}");
            assert!(!derivation.get("Cloud").unwrap().iter().any(|i| &**i == "Cloud"));
        }
    }
}
