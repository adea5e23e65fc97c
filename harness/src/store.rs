//! Load-once holder for the process-wide recipe graph.
//!
//! The graph is read from disk on the first [`GraphStore::get`] call and
//! shared as an `Arc` afterwards. Callers racing on the first load block
//! until it completes and then observe the same graph.

use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};

use crucible_graph::{GraphError, RecipeGraph};
use parking_lot::Mutex;

/// Default on-disk graph location.
pub const DEFAULT_GRAPH_PATH: &str = "./data/recipes_complete.json";

#[derive(Debug)]
pub struct GraphStore {
    path: PathBuf,
    graph: OnceLock<Arc<RecipeGraph>>,
    loading: Mutex<()>,
}

impl GraphStore {
    /// Store that will load `path` on first use.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            graph: OnceLock::new(),
            loading: Mutex::new(()),
        }
    }

    /// Store wrapping an already-built graph. [`GraphStore::get`] never
    /// touches the filesystem.
    #[must_use]
    pub fn from_graph(graph: RecipeGraph) -> Self {
        Self {
            path: PathBuf::new(),
            graph: OnceLock::from(Arc::new(graph)),
            loading: Mutex::new(()),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the graph has been loaded.
    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.graph.get().is_some()
    }

    /// The shared graph, loading it if this is the first call.
    ///
    /// A failed load is not cached; the error goes back to the caller,
    /// which is expected to treat it as fatal.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError`] if the file cannot be read or parsed.
    pub fn get(&self) -> Result<Arc<RecipeGraph>, GraphError> {
        if let Some(graph) = self.graph.get() {
            return Ok(Arc::clone(graph));
        }
        let _loading = self.loading.lock();
        if let Some(graph) = self.graph.get() {
            return Ok(Arc::clone(graph));
        }
        let graph = Arc::new(RecipeGraph::load(&self.path)?);
        Ok(Arc::clone(self.graph.get_or_init(|| graph)))
    }
}

impl Default for GraphStore {
    fn default() -> Self {
        Self::new(DEFAULT_GRAPH_PATH)
    }
}
