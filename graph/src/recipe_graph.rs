//! The recipe graph: read-only item table shared by every search.
//!
//! Names are interned as `Arc<str>` at construction time, so an ingredient
//! name inside a recipe points at the same allocation as the item key it
//! refers to. Derivations built by the search clone these `Arc`s instead of
//! copying strings.

use std::collections::{BTreeMap, HashMap};
use std::fs::File;
use std::io::{BufReader, BufWriter, Read};
use std::path::Path;
use std::sync::Arc;

use tracing::info;

use crate::error::GraphError;
use crate::hash::{canonical_hash, ContentHash, DOMAIN_RECIPE_GRAPH};
use crate::item::{Item, ItemRecord, Recipe, Tier};

/// Persisted graph form, keyed by item name in sorted order.
pub type GraphRecords = BTreeMap<String, ItemRecord>;

/// Immutable mapping from item name to [`Item`].
#[derive(Debug, Clone, Default)]
pub struct RecipeGraph {
    items: HashMap<Arc<str>, Item>,
}

impl RecipeGraph {
    /// Build a graph from persisted records.
    ///
    /// Ingredients that name no item are kept as-is; the search treats them
    /// as unknown and never completes a derivation through them.
    #[must_use]
    pub fn from_records(records: &GraphRecords) -> Self {
        let names: HashMap<&str, Arc<str>> = records
            .keys()
            .map(|name| (name.as_str(), Arc::<str>::from(name.as_str())))
            .collect();
        let intern = |name: &str| -> Arc<str> {
            names
                .get(name)
                .cloned()
                .unwrap_or_else(|| Arc::from(name))
        };

        let items = records
            .iter()
            .map(|(name, record)| {
                let key = intern(name.as_str());
                let recipes = record
                    .recipes
                    .iter()
                    .map(|ingredients| {
                        Recipe::new(ingredients.iter().map(|i| intern(i.as_str())).collect())
                    })
                    .collect();
                (Arc::clone(&key), Item::new(key, record.tier, recipes))
            })
            .collect();

        Self { items }
    }

    /// Parse a graph from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::Parse`] if the input is not a valid graph object.
    pub fn from_json_str(json: &str) -> Result<Self, GraphError> {
        let records: GraphRecords = serde_json::from_str(json)?;
        Ok(Self::from_records(&records))
    }

    /// Parse a graph from any reader.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::Parse`] on read or parse failure.
    pub fn from_reader(reader: impl Read) -> Result<Self, GraphError> {
        let records: GraphRecords = serde_json::from_reader(reader)?;
        Ok(Self::from_records(&records))
    }

    /// Load a graph from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::Io`] if the file cannot be opened and
    /// [`GraphError::Parse`] if its content is malformed.
    pub fn load(path: &Path) -> Result<Self, GraphError> {
        let records = read_records(path)?;
        let graph = Self::from_records(&records);
        info!(
            path = %path.display(),
            items = graph.len(),
            digest = %graph.digest()?,
            "recipe graph loaded"
        );
        Ok(graph)
    }

    /// Look up an item by name.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<&Item> {
        self.items.get(name)
    }

    /// Tier of a named item, if it exists.
    #[must_use]
    pub fn tier(&self, name: &str) -> Option<Tier> {
        self.lookup(name).map(Item::tier)
    }

    /// Whether the graph contains an item with this name.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.items.contains_key(name)
    }

    /// Number of items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the graph has no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterate over all items (unordered).
    pub fn items(&self) -> impl Iterator<Item = &Item> {
        self.items.values()
    }

    /// Convert back to the persisted form.
    #[must_use]
    pub fn to_records(&self) -> GraphRecords {
        self.items
            .values()
            .map(|item| {
                let recipes = item
                    .recipes()
                    .iter()
                    .map(|r| r.ingredients().iter().map(ToString::to_string).collect())
                    .collect();
                (
                    item.name().to_string(),
                    ItemRecord {
                        tier: item.tier(),
                        recipes,
                    },
                )
            })
            .collect()
    }

    /// Content hash of the graph.
    ///
    /// Computed over the compact JSON of [`RecipeGraph::to_records`]; the
    /// sorted record map makes the bytes independent of hash-map order.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::Parse`] if serialization fails.
    pub fn digest(&self) -> Result<ContentHash, GraphError> {
        let bytes = serde_json::to_vec(&self.to_records())?;
        Ok(canonical_hash(DOMAIN_RECIPE_GRAPH, &bytes))
    }
}

/// Read persisted records from a JSON file without building a graph.
///
/// # Errors
///
/// Returns [`GraphError::Io`] if the file cannot be opened and
/// [`GraphError::Parse`] if its content is malformed.
pub fn read_records(path: &Path) -> Result<GraphRecords, GraphError> {
    let file = File::open(path).map_err(|source| GraphError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(serde_json::from_reader(BufReader::new(file))?)
}

/// Write records as indented JSON, replacing any existing file.
///
/// # Errors
///
/// Returns [`GraphError::Io`] if the file cannot be created and
/// [`GraphError::Parse`] if serialization fails.
pub fn write_records(path: &Path, records: &GraphRecords) -> Result<(), GraphError> {
    let file = File::create(path).map_err(|source| GraphError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::to_writer_pretty(BufWriter::new(file), records)?;
    Ok(())
}
