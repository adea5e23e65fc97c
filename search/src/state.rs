//! Search states: a derivation plus the items still waiting for a recipe.

use std::collections::VecDeque;
use std::sync::Arc;

use crate::derivation::Derivation;
use crate::policy::Traversal;

/// Items awaiting a recipe choice, next item at the front.
///
/// Breadth-first appends new items at the back (FIFO); depth-first inserts
/// them at the front with sibling order preserved, so the first-declared
/// ingredient is resolved before its sibling and before older entries (LIFO).
/// An item is never pending twice.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PendingSet {
    items: VecDeque<Arc<str>>,
}

impl PendingSet {
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn contains(&self, item: &str) -> bool {
        self.items.iter().any(|i| &**i == item)
    }

    /// Items in expansion order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<str>> {
        self.items.iter()
    }

    /// Take the next item that `skip` does not reject.
    ///
    /// Returns the item and a copy of the set without it (and without any
    /// skipped items in front of it); `self` is left untouched.
    #[must_use]
    pub fn split_next(&self, skip: impl Fn(&str) -> bool) -> Option<(Arc<str>, PendingSet)> {
        let mut rest = self.items.clone();
        while let Some(next) = rest.pop_front() {
            if !skip(&*next) {
                return Some((next, Self { items: rest }));
            }
        }
        None
    }

    /// Add new items in traversal order, ignoring ones already pending.
    pub fn extend(&mut self, traversal: Traversal, new_items: &[Arc<str>]) {
        let fresh: Vec<&Arc<str>> = new_items
            .iter()
            .enumerate()
            .filter(|(idx, item)| {
                !self.contains(item) && !new_items[..*idx].contains(item)
            })
            .map(|(_, item)| item)
            .collect();
        match traversal {
            Traversal::BreadthFirst => self.items.extend(fresh.into_iter().cloned()),
            Traversal::DepthFirst => {
                for item in fresh.into_iter().rev() {
                    self.items.push_front(Arc::clone(item));
                }
            }
        }
    }
}

/// One unit of frontier work.
///
/// States are immutable once built; expansion always produces new states.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchState {
    derivation: Derivation,
    pending: PendingSet,
}

impl SearchState {
    #[must_use]
    pub fn new(derivation: Derivation, pending: PendingSet) -> Self {
        Self {
            derivation,
            pending,
        }
    }

    #[must_use]
    pub fn derivation(&self) -> &Derivation {
        &self.derivation
    }

    #[must_use]
    pub fn pending(&self) -> &PendingSet {
        &self.pending
    }

    #[must_use]
    pub fn into_derivation(self) -> Derivation {
        self.derivation
    }
}
