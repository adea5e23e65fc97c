//! Request and response shapes of the recipe facade.

use std::num::NonZeroUsize;

use crucible_search::{Derivation, SearchOutcome, Traversal};
use serde::{Deserialize, Serialize};

use crate::error::RunError;

/// One recipe query: which element, which traversal, how many results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeRequest {
    pub element: String,
    /// `"bfs"` or `"dfs"`.
    pub algorithm: String,
    /// Maximum number of derivations; zero or negative means no limit.
    #[serde(rename = "maxRecipe", default)]
    pub max_recipe: i64,
}

impl RecipeRequest {
    #[must_use]
    pub fn new(element: impl Into<String>, algorithm: impl Into<String>, max_recipe: i64) -> Self {
        Self {
            element: element.into(),
            algorithm: algorithm.into(),
            max_recipe,
        }
    }

    /// Parsed traversal order.
    ///
    /// # Errors
    ///
    /// Returns [`RunError::UnknownAlgorithm`] for anything but `bfs`/`dfs`.
    pub fn traversal(&self) -> Result<Traversal, RunError> {
        self.algorithm
            .parse()
            .map_err(|_| RunError::UnknownAlgorithm {
                name: self.algorithm.clone(),
            })
    }

    /// Result quota; `None` for `max_recipe <= 0`.
    #[must_use]
    pub fn quota(&self) -> Option<NonZeroUsize> {
        usize::try_from(self.max_recipe)
            .ok()
            .and_then(NonZeroUsize::new)
    }
}

/// Derivations found, wall time in seconds, and nodes visited.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeResponse {
    pub results: Vec<Derivation>,
    pub duration: f64,
    #[serde(rename = "visitedNode")]
    pub visited_node: u64,
}

impl From<SearchOutcome> for RecipeResponse {
    fn from(outcome: SearchOutcome) -> Self {
        Self {
            duration: outcome.elapsed.as_secs_f64(),
            visited_node: outcome.nodes_visited,
            results: outcome.derivations,
        }
    }
}
