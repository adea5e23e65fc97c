//! Lock tests for the harness: load-once store, request/response facade
//! and the sanitizer fixpoint.

use std::sync::Arc;

use crucible_graph::recipe_graph::{read_records, write_records};
use crucible_graph::sanitize::sanitize;
use crucible_graph::RecipeGraph;
use crucible_harness::{run_search, GraphStore, RecipeRequest, RunError, RunnerConfig};
use lock_tests::fixtures::{layered_records, BRICK_JSON};

#[test]
fn concurrent_requests_share_one_loaded_graph() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("recipes.json");
    write_records(&path, &layered_records(2, 4, 3)).unwrap();

    let store = GraphStore::new(&path);
    let config = RunnerConfig::default();
    let (graphs, counts): (Vec<Arc<RecipeGraph>>, Vec<usize>) = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..6)
            .map(|n| {
                let (store, config) = (&store, &config);
                scope.spawn(move || {
                    let algorithm = if n % 2 == 0 { "bfs" } else { "dfs" };
                    let report =
                        run_search(store, &RecipeRequest::new("T2_0", algorithm, 0), config).unwrap();
                    (store.get().unwrap(), report.response.results.len())
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).unzip()
    });

    assert!(graphs.windows(2).all(|w| Arc::ptr_eq(&w[0], &w[1])));
    assert!(counts.windows(2).all(|w| w[0] == w[1]));
    assert!(counts[0] > 1);
}

#[test]
fn response_json_has_wire_shape() {
    let store = GraphStore::from_graph(RecipeGraph::from_json_str(BRICK_JSON).unwrap());
    let report = run_search(
        &store,
        &RecipeRequest::new("Brick", "dfs", 5),
        &RunnerConfig::default(),
    )
    .unwrap();
    let json = serde_json::to_value(&report.response).unwrap();

    assert_eq!(
        json["results"],
        serde_json::json!([{"Brick": ["Mud", "Fire"], "Mud": ["Water", "Earth"]}])
    );
    assert_eq!(json["visitedNode"], 5);
    assert!(json["duration"].as_f64().unwrap() >= 0.0);
    assert_eq!(report.summary["termination_reason"]["type"], "frontier_exhausted");
}

#[test]
fn request_errors_are_classified() {
    let store = GraphStore::from_graph(RecipeGraph::from_json_str(BRICK_JSON).unwrap());
    let request: RecipeRequest =
        serde_json::from_str(r#"{"element": "Brick", "algorithm": "ucs", "maxRecipe": 1}"#).unwrap();
    let err = run_search(&store, &request, &RunnerConfig::default()).unwrap_err();
    assert!(matches!(err, RunError::UnknownAlgorithm { ref name } if name == "ucs"));
    assert!(err.is_client_error());
}

#[test]
fn sanitizer_reaches_fixpoint() {
    let json = r#"{
        "A": {"tier": 0}, "B": {"tier": 0},
        "X": {"tier": 1, "recipes": [["A", "Ghost"]]},
        "Y": {"tier": 2, "recipes": [["X", "A"]]},
        "Z": {"tier": 3, "recipes": [["Y", "B"], ["A", "B"]]},
        "W": {"tier": 2, "recipes": [["W", "A"]]}
    }"#;
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("raw.json");
    std::fs::write(&path, json).unwrap();

    let mut records = read_records(&path).unwrap();
    let report = sanitize(&mut records);
    assert_eq!(report.dangling_removed, 1);
    assert_eq!(report.tier_removed, 1);
    assert_eq!(report.unreachable_removed, 2);
    assert_eq!(report.underivable_items, ["W", "X", "Y"]);
    assert_eq!(records["Z"].recipes, vec![vec!["A".to_string(), "B".to_string()]]);

    let graph = RecipeGraph::from_records(&records);
    let outcome = crucible_search::search(&graph, "Z", &crucible_search::SearchPolicy::default()).unwrap();
    assert_eq!(outcome.derivations.len(), 1);
}
