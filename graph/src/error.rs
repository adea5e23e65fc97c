//! Typed graph errors.
//!
//! Every variant is a configuration problem: the persisted graph is missing,
//! unreadable or not valid JSON. Callers treat these as fatal at startup;
//! no search ever sees a half-loaded graph.

use std::path::PathBuf;

/// Failure to load or persist a recipe graph.
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    /// The graph file could not be opened, read or written.
    #[error("recipe graph i/o failed for {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The graph bytes were not a valid `name -> {tier, recipes}` object.
    #[error("malformed recipe graph json: {0}")]
    Parse(#[from] serde_json::Error),
}
