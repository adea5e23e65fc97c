//! Items, recipes, and their persisted record form.

use std::sync::Arc;

use serde::{Deserialize, Deserializer, Serialize};

/// Item rank. Tier 0 items are base elements and are never expanded.
pub type Tier = u32;

/// One way to produce an item: an unordered pair of ingredient names.
///
/// The graph keeps recipes exactly as loaded. A recipe that does not have
/// exactly two ingredients is malformed; [`Recipe::pair`] returns `None` for
/// it and the search skips it at expansion time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recipe {
    ingredients: Box<[Arc<str>]>,
}

impl Recipe {
    #[must_use]
    pub fn new(ingredients: Vec<Arc<str>>) -> Self {
        Self {
            ingredients: ingredients.into_boxed_slice(),
        }
    }

    /// All ingredients in declaration order.
    #[must_use]
    pub fn ingredients(&self) -> &[Arc<str>] {
        &self.ingredients
    }

    /// The ingredient pair, or `None` if the recipe is malformed.
    #[must_use]
    pub fn pair(&self) -> Option<(&Arc<str>, &Arc<str>)> {
        match &*self.ingredients {
            [first, second] => Some((first, second)),
            _ => None,
        }
    }
}

/// A named node of the recipe graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    name: Arc<str>,
    tier: Tier,
    recipes: Vec<Recipe>,
}

impl Item {
    #[must_use]
    pub fn new(name: Arc<str>, tier: Tier, recipes: Vec<Recipe>) -> Self {
        Self {
            name,
            tier,
            recipes,
        }
    }

    #[must_use]
    pub fn name(&self) -> &Arc<str> {
        &self.name
    }

    #[must_use]
    pub fn tier(&self) -> Tier {
        self.tier
    }

    #[must_use]
    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    /// Base items (tier 0) are leaves of every derivation.
    #[must_use]
    pub fn is_base(&self) -> bool {
        self.tier == 0
    }
}

/// Persisted form of one item: `{"tier": 3, "recipes": [["Mud", "Fire"]]}`.
///
/// `recipes` may be absent or `null` in the input; both read as empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRecord {
    pub tier: Tier,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub recipes: Vec<Vec<String>>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<Vec<String>>>::deserialize(deserializer)?.unwrap_or_default())
}
