//! Graph sanitizer: remove recipes that can never appear in a valid derivation.
//!
//! Three passes, in order:
//!
//! 1. **Dangling** -- a recipe naming an ingredient that is not an item.
//! 2. **Tier** -- a recipe that is malformed (not exactly two ingredients) or
//!    uses an ingredient whose tier is not strictly lower than the item's.
//! 3. **Unreachable** -- fixpoint: an item of tier > 0 left with no recipes
//!    cannot be derived, so every recipe using it is removed as well, which
//!    may empty further items.
//!
//! Items themselves are never removed; an underivable item simply ends up
//! with an empty recipe list.

use std::collections::BTreeSet;

use tracing::{debug, info};

use crate::recipe_graph::GraphRecords;

/// Removal counts from one [`sanitize`] run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SanitizeReport {
    /// Recipes dropped because an ingredient is not an item.
    pub dangling_removed: usize,
    /// Recipes dropped for being malformed or violating tier order.
    pub tier_removed: usize,
    /// Recipes dropped because an ingredient became underivable.
    pub unreachable_removed: usize,
    /// Items of tier > 0 that ended with no recipes, in sorted order.
    pub underivable_items: Vec<String>,
}

impl SanitizeReport {
    /// Total recipes removed across all passes.
    #[must_use]
    pub fn total_removed(&self) -> usize {
        self.dangling_removed + self.tier_removed + self.unreachable_removed
    }
}

/// Clean `records` in place and report what was removed.
pub fn sanitize(records: &mut GraphRecords) -> SanitizeReport {
    let mut report = SanitizeReport::default();

    let known: BTreeSet<String> = records.keys().cloned().collect();
    for (name, record) in records.iter_mut() {
        let before = record.recipes.len();
        record.recipes.retain(|recipe| {
            let keep = recipe.iter().all(|ingredient| known.contains(ingredient));
            if !keep {
                debug!(item = %name, ?recipe, "removing recipe with unknown ingredient");
            }
            keep
        });
        report.dangling_removed += before - record.recipes.len();
    }

    let tiers: Vec<(String, u32)> = records
        .iter()
        .map(|(name, record)| (name.clone(), record.tier))
        .collect();
    let tier_of = |name: &str| {
        tiers
            .binary_search_by(|(n, _)| n.as_str().cmp(name))
            .ok()
            .map(|idx| tiers[idx].1)
    };
    for (name, record) in records.iter_mut() {
        let item_tier = record.tier;
        let before = record.recipes.len();
        record.recipes.retain(|recipe| {
            let keep = recipe.len() == 2
                && recipe
                    .iter()
                    .all(|ingredient| tier_of(ingredient).is_some_and(|t| t < item_tier));
            if !keep {
                debug!(item = %name, ?recipe, "removing malformed or tier-violating recipe");
            }
            keep
        });
        report.tier_removed += before - record.recipes.len();
    }

    let mut underivable: BTreeSet<String> = records
        .iter()
        .filter(|(_, record)| record.tier > 0 && record.recipes.is_empty())
        .map(|(name, _)| name.clone())
        .collect();
    let mut changed = true;
    while changed {
        changed = false;
        for (name, record) in records.iter_mut() {
            let before = record.recipes.len();
            record
                .recipes
                .retain(|recipe| !recipe.iter().any(|i| underivable.contains(i)));
            let removed = before - record.recipes.len();
            if removed == 0 {
                continue;
            }
            report.unreachable_removed += removed;
            if record.recipes.is_empty() && underivable.insert(name.clone()) {
                debug!(item = %name, "item became underivable");
                changed = true;
            }
        }
    }
    report.underivable_items = underivable.into_iter().collect();

    info!(
        dangling = report.dangling_removed,
        tier = report.tier_removed,
        unreachable = report.unreachable_removed,
        underivable_items = report.underivable_items.len(),
        "recipe graph sanitized"
    );
    report
}
