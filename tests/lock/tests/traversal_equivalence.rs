//! Lock tests: breadth-first and depth-first agree on exhaustive runs, and
//! single-worker runs are reproducible.

use crucible_search::derivation::fingerprint;
use crucible_search::{search, Traversal};
use lock_tests::fixtures::{layered_graph, layered_name, policy};

#[test]
fn bfs_and_dfs_find_the_same_derivations() {
    let graph = layered_graph(2, 4, 3);
    for index in 0..4 {
        let target = layered_name(2, index);
        let bfs = search(&graph, &target, &policy(Traversal::BreadthFirst, 3, 0)).unwrap();
        let dfs = search(&graph, &target, &policy(Traversal::DepthFirst, 3, 0)).unwrap();
        assert_eq!(bfs.fingerprints(), dfs.fingerprints(), "target {target}");
    }
}

#[test]
fn worker_count_does_not_change_the_result_set() {
    let graph = layered_graph(3, 3, 2);
    let target = layered_name(3, 2);
    let single = search(&graph, &target, &policy(Traversal::BreadthFirst, 1, 0)).unwrap();
    for workers in [2, 4, 8] {
        let many = search(&graph, &target, &policy(Traversal::BreadthFirst, workers, 0)).unwrap();
        assert_eq!(single.fingerprints(), many.fingerprints());
        assert_eq!(single.nodes_visited, many.nodes_visited);
    }
}

#[test]
fn single_worker_runs_are_identical_in_order() {
    let graph = layered_graph(2, 4, 3);
    let target = layered_name(2, 3);
    for traversal in [Traversal::BreadthFirst, Traversal::DepthFirst] {
        let run = || -> Vec<_> {
            search(&graph, &target, &policy(traversal, 1, 0))
                .unwrap()
                .derivations
                .iter()
                .map(fingerprint)
                .collect()
        };
        let first = run();
        for _ in 0..5 {
            assert_eq!(run(), first);
        }
    }
}
