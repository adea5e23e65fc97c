//! Binary that runs a single-worker search over a fixed layered graph and
//! prints one fingerprint per line, in collection order, for cross-process
//! verification.
//!
//! Usage: `search_fixture <bfs|dfs>`

use crucible_search::derivation::fingerprint;
use crucible_search::search;
use lock_tests::fixtures::{layered_graph, layered_name, policy};

fn main() {
    let traversal = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "bfs".into())
        .parse()
        .expect("traversal must be bfs or dfs");
    let graph = layered_graph(2, 4, 3);
    let outcome = search(&graph, &layered_name(2, 0), &policy(traversal, 1, 0))
        .expect("fixture policy is valid");

    println!("nodes={}", outcome.nodes_visited);
    println!("results={}", outcome.derivations.len());
    for derivation in &outcome.derivations {
        println!("{}", fingerprint(derivation));
    }
}
