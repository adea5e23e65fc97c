//! Typed harness errors.

use crucible_graph::GraphError;
use crucible_search::SearchError;

/// Failure to serve a recipe request.
///
/// Only [`RunError::UnknownAlgorithm`] is the caller's fault; the other
/// variants are configuration problems (graph missing or malformed, policy
/// rejected).
#[derive(Debug, thiserror::Error)]
pub enum RunError {
    /// The recipe graph could not be loaded.
    #[error(transparent)]
    Graph(#[from] GraphError),

    /// The search refused to start.
    #[error(transparent)]
    Search(#[from] SearchError),

    /// The request named an algorithm other than `bfs` or `dfs`.
    #[error("unknown algorithm {name:?} (expected \"bfs\" or \"dfs\")")]
    UnknownAlgorithm { name: String },
}

impl RunError {
    /// Whether the error was caused by the request rather than the service.
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::UnknownAlgorithm { .. })
    }
}
