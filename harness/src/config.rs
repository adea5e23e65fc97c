//! Runner configuration: optional overrides applied on top of the search
//! policy defaults.

use std::num::NonZeroUsize;
use std::time::Duration;

use crucible_search::{SearchPolicy, TierRule, Traversal};

/// Overrides the runner applies to every search.
///
/// Per-request values (traversal, quota) come from the request itself;
/// everything here is process-wide. `None` keeps the policy default.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunnerConfig {
    /// Worker threads per search. `None` uses the available parallelism.
    pub workers: Option<NonZeroUsize>,
    /// Frontier capacity in states. `None` uses
    /// [`crucible_search::policy::DEFAULT_FRONTIER_CAPACITY`].
    pub frontier_capacity: Option<usize>,
    /// Tier admission rule. `None` uses [`TierRule::Strict`].
    pub tier_rule: Option<TierRule>,
    /// Progress log period. `None` disables progress logging.
    pub progress_interval: Option<Duration>,
}

impl RunnerConfig {
    /// The policy for one search with this configuration applied.
    #[must_use]
    pub fn policy(&self, traversal: Traversal, quota: Option<NonZeroUsize>) -> SearchPolicy {
        let defaults = SearchPolicy::new(traversal, quota);
        SearchPolicy {
            workers: self.workers.or(defaults.workers),
            frontier_capacity: self.frontier_capacity.unwrap_or(defaults.frontier_capacity),
            tier_rule: self.tier_rule.unwrap_or(defaults.tier_rule),
            progress_interval: self.progress_interval.or(defaults.progress_interval),
            ..defaults
        }
    }
}
