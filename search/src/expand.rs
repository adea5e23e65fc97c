//! One expansion step: pick the next pending item and branch on its recipes.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crucible_graph::{Item, Recipe, RecipeGraph, Tier};
use tracing::debug;

use crate::control::Control;
use crate::derivation::{is_complete, Derivation};
use crate::policy::{TierRule, Traversal};
use crate::state::{PendingSet, SearchState};

/// Nodes charged per recipe iterated (its two ingredients).
pub const NODES_PER_RECIPE: u64 = 2;

/// What an expansion step produced.
#[derive(Debug)]
pub enum Expansion {
    /// Nothing left pending and every ingredient is resolved.
    Complete(Derivation),
    /// No result and no children.
    DeadEnd,
    /// One child state per admissible recipe of the expanded item.
    Children(Vec<SearchState>),
    /// The search stopped while recipes were being iterated.
    Interrupted,
}

/// Expansion rules for one target.
#[derive(Debug)]
pub struct Expander<'g> {
    graph: &'g RecipeGraph,
    target: &'g Item,
    traversal: Traversal,
    tier_rule: TierRule,
}

impl<'g> Expander<'g> {
    #[must_use]
    pub fn new(
        graph: &'g RecipeGraph,
        target: &'g Item,
        traversal: Traversal,
        tier_rule: TierRule,
    ) -> Self {
        Self {
            graph,
            target,
            traversal,
            tier_rule,
        }
    }

    /// One state per admissible recipe of the target.
    ///
    /// Charges [`NODES_PER_RECIPE`] to `nodes` for every recipe considered,
    /// malformed and rejected ones included.
    pub fn initial_states(&self, nodes: &AtomicU64) -> Vec<SearchState> {
        let root = Derivation::default();
        self.target
            .recipes()
            .iter()
            .filter_map(|recipe| {
                nodes.fetch_add(NODES_PER_RECIPE, Ordering::Relaxed);
                self.branch(self.target, recipe, &root, &PendingSet::default())
            })
            .collect()
    }

    /// Expand `state` by one pending item.
    pub fn expand(
        &self,
        state: SearchState,
        nodes: &AtomicU64,
        control: &Control<'_>,
    ) -> Expansion {
        let derivation = state.derivation();
        let skip_resolved = |item: &str| derivation.contains(item);
        let Some((next, rest)) = state.pending().split_next(skip_resolved) else {
            return self.finish(state.into_derivation());
        };
        let Some(item) = self.graph.lookup(&next) else {
            return Expansion::DeadEnd;
        };

        let mut children = Vec::new();
        for recipe in item.recipes() {
            if !control.is_running() {
                return Expansion::Interrupted;
            }
            nodes.fetch_add(NODES_PER_RECIPE, Ordering::Relaxed);
            if let Some(child) = self.branch(item, recipe, derivation, &rest) {
                children.push(child);
            }
        }

        if children.is_empty() {
            Expansion::DeadEnd
        } else {
            Expansion::Children(children)
        }
    }

    fn finish(&self, derivation: Derivation) -> Expansion {
        if is_complete(&derivation, self.graph) {
            Expansion::Complete(derivation)
        } else {
            Expansion::DeadEnd
        }
    }

    /// Child state choosing `recipe` for `item`, if the recipe is admissible.
    fn branch(
        &self,
        item: &Item,
        recipe: &Recipe,
        derivation: &Derivation,
        rest: &PendingSet,
    ) -> Option<SearchState> {
        let Some((a, b)) = recipe.pair() else {
            debug!(
                item = %item.name(),
                ingredients = recipe.ingredients().len(),
                "skipping malformed recipe"
            );
            return None;
        };
        let tier_a = self.admits(item, a, derivation)?;
        let tier_b = self.admits(item, b, derivation)?;

        let next = derivation.with_entry(
            Arc::clone(item.name()),
            vec![Arc::clone(a), Arc::clone(b)],
        );
        let unresolved: Vec<Arc<str>> = [(a, tier_a), (b, tier_b)]
            .into_iter()
            .filter(|(name, tier)| *tier > 0 && !next.contains(name))
            .map(|(name, _)| Arc::clone(name))
            .collect();
        let mut pending = rest.clone();
        pending.extend(self.traversal, &unresolved);
        Some(SearchState::new(next, pending))
    }

    /// Tier of `ingredient` if it may be used to craft `item`.
    fn admits(
        &self,
        item: &Item,
        ingredient: &Arc<str>,
        derivation: &Derivation,
    ) -> Option<Tier> {
        let tier = self.graph.tier(ingredient)?;
        if ingredient == item.name() || ingredient == self.target.name() {
            return None;
        }
        let admitted = match self.tier_rule {
            TierRule::Strict => tier < item.tier(),
            TierRule::BelowTarget => {
                tier < self.target.tier() && !derivation.reaches(ingredient, item.name())
            }
        };
        admitted.then_some(tier)
    }
}
