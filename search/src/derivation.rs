//! Derivations, their fingerprints, and the completeness predicate.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crucible_graph::hash::{canonical_hash, ContentHash, DOMAIN_DERIVATION};
use crucible_graph::RecipeGraph;

/// A (partial or complete) crafting tree: item -> chosen ingredients.
///
/// Keys are kept sorted so iteration, serialization and the canonical form
/// are deterministic. A derivation is never mutated once it is part of a
/// search state; [`Derivation::with_entry`] returns a copy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Derivation {
    entries: BTreeMap<Arc<str>, Vec<Arc<str>>>,
}

impl Derivation {
    /// The one-entry derivation `{target: []}` returned for base or
    /// recipe-less targets.
    #[must_use]
    pub fn trivial(target: Arc<str>) -> Self {
        let mut entries = BTreeMap::new();
        entries.insert(target, Vec::new());
        Self { entries }
    }

    /// Copy of `self` with `item -> ingredients` added (or replaced).
    #[must_use]
    pub fn with_entry(&self, item: Arc<str>, ingredients: Vec<Arc<str>>) -> Self {
        let mut entries = self.entries.clone();
        entries.insert(item, ingredients);
        Self { entries }
    }

    /// Ingredients chosen for `item`, if it is a key.
    #[must_use]
    pub fn get(&self, item: &str) -> Option<&[Arc<str>]> {
        self.entries.get(item).map(Vec::as_slice)
    }

    /// Whether `item` already has a chosen recipe.
    #[must_use]
    pub fn contains(&self, item: &str) -> bool {
        self.entries.contains_key(item)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in item-name order.
    pub fn iter(&self) -> impl Iterator<Item = (&Arc<str>, &[Arc<str>])> {
        self.entries.iter().map(|(k, v)| (k, v.as_slice()))
    }

    /// Whether `to` is reachable from `from` by following chosen recipes.
    ///
    /// `reaches(x, x)` is always true. Used as the cycle guard in relaxed
    /// tier mode: giving `e` an ingredient `i` with `reaches(i, e)` would
    /// make `e` depend on itself.
    #[must_use]
    pub fn reaches(&self, from: &str, to: &str) -> bool {
        let mut stack = vec![from];
        let mut visited = BTreeSet::new();
        while let Some(current) = stack.pop() {
            if current == to {
                return true;
            }
            if !visited.insert(current) {
                continue;
            }
            if let Some(ingredients) = self.entries.get(current) {
                stack.extend(ingredients.iter().map(AsRef::as_ref));
            }
        }
        false
    }
}

impl<K, I, V> FromIterator<(K, I)> for Derivation
where
    K: Into<Arc<str>>,
    I: IntoIterator<Item = V>,
    V: Into<Arc<str>>,
{
    fn from_iter<T: IntoIterator<Item = (K, I)>>(iter: T) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into_iter().map(Into::into).collect()))
                .collect(),
        }
    }
}

/// Canonical text of a derivation: a JSON object of sorted items, each with
/// its sorted ingredients, e.g. `{"Brick":["Fire","Mud"],"Mud":["Earth","Water"]}`.
///
/// Two derivations with the same content produce the same text no matter
/// in which order their entries or ingredient pairs were built. Names are
/// JSON-quoted, so delimiter characters inside a name cannot make two
/// different derivations collide.
#[must_use]
pub fn canonical_form(derivation: &Derivation) -> String {
    let entries: serde_json::Map<String, serde_json::Value> = derivation
        .iter()
        .map(|(item, ingredients)| {
            let mut sorted: Vec<&str> = ingredients.iter().map(AsRef::as_ref).collect();
            sorted.sort_unstable();
            (item.to_string(), serde_json::Value::from(sorted))
        })
        .collect();
    serde_json::Value::Object(entries).to_string()
}

/// Dedup key of a derivation: domain-separated hash of its canonical form.
#[must_use]
pub fn fingerprint(derivation: &Derivation) -> ContentHash {
    canonical_hash(DOMAIN_DERIVATION, canonical_form(derivation).as_bytes())
}

/// Whether every non-base ingredient in `derivation` is itself resolved.
///
/// - keys of tier 0 are leaves and always pass;
/// - a key with no ingredients fails;
/// - an ingredient unknown to the graph fails;
/// - an ingredient of tier > 0 that is not a key fails.
#[must_use]
pub fn is_complete(derivation: &Derivation, graph: &RecipeGraph) -> bool {
    derivation.iter().all(|(item, ingredients)| {
        if graph.tier(item) == Some(0) {
            return true;
        }
        !ingredients.is_empty()
            && ingredients.iter().all(|ingredient| match graph.tier(ingredient) {
                None => false,
                Some(0) => true,
                Some(_) => derivation.contains(ingredient),
            })
    })
}
