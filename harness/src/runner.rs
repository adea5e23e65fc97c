//! Harness runner: turns a [`RecipeRequest`] into a search and its response.
//!
//! # Pipeline
//!
//! ```text
//! request.traversal() → store.get() → config.policy()
//!   → crucible_search::search() → RunReport { response, stats, summary }
//! ```

use crucible_graph::RecipeGraph;
use crucible_search::{search, SearchStats, TerminationReason};
use tracing::info;

use crate::config::RunnerConfig;
use crate::error::RunError;
use crate::request::{RecipeRequest, RecipeResponse};
use crate::store::GraphStore;

/// Everything one request produced.
#[derive(Debug, Clone)]
pub struct RunReport {
    /// Wire response for the caller.
    pub response: RecipeResponse,
    pub stats: SearchStats,
    pub termination: TerminationReason,
    /// Search summary as JSON (counters and termination, no derivations).
    pub summary: serde_json::Value,
}

/// Serve `request` against the graph held by `store`.
///
/// The algorithm is checked before the graph is touched, so a bad request
/// never triggers a load.
///
/// # Errors
///
/// Returns [`RunError::UnknownAlgorithm`] for a bad algorithm name,
/// [`RunError::Graph`] if the graph cannot be loaded and
/// [`RunError::Search`] if the configured policy is invalid.
pub fn run_search(
    store: &GraphStore,
    request: &RecipeRequest,
    config: &RunnerConfig,
) -> Result<RunReport, RunError> {
    request.traversal()?;
    let graph = store.get()?;
    run_on_graph(&graph, request, config)
}

/// Serve `request` against an explicit graph.
///
/// # Errors
///
/// Same as [`run_search`], minus graph loading.
pub fn run_on_graph(
    graph: &RecipeGraph,
    request: &RecipeRequest,
    config: &RunnerConfig,
) -> Result<RunReport, RunError> {
    let traversal = request.traversal()?;
    let policy = config.policy(traversal, request.quota());
    let outcome = search(graph, &request.element, &policy)?;
    info!(
        element = request.element.trim(),
        algorithm = %traversal,
        max_recipe = request.max_recipe,
        results = outcome.derivations.len(),
        "recipe request served"
    );

    let summary = outcome.to_json_value();
    let stats = outcome.stats;
    let termination = outcome.termination;
    Ok(RunReport {
        response: RecipeResponse::from(outcome),
        stats,
        termination,
        summary,
    })
}
