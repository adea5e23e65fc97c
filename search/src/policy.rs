//! Search policy types.

use std::num::NonZeroUsize;
use std::str::FromStr;
use std::time::Duration;

use crate::error::SearchError;

/// Default frontier capacity, in states.
pub const DEFAULT_FRONTIER_CAPACITY: usize = 100_000;

/// Order in which pending work is taken from the frontier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Traversal {
    /// FIFO frontier, FIFO pending set.
    #[default]
    BreadthFirst,
    /// LIFO frontier, LIFO pending set (first-declared ingredient resolved first).
    DepthFirst,
}

impl Traversal {
    /// Short wire name (`"bfs"` / `"dfs"`).
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::BreadthFirst => "bfs",
            Self::DepthFirst => "dfs",
        }
    }
}

impl FromStr for Traversal {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bfs" => Ok(Self::BreadthFirst),
            "dfs" => Ok(Self::DepthFirst),
            _ => Err(SearchError::UnknownTraversal { name: s.to_string() }),
        }
    }
}

impl std::fmt::Display for Traversal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which ingredient tiers a recipe may use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TierRule {
    /// Both ingredients must have a tier strictly below the item they produce.
    /// Guarantees termination without cycle detection.
    #[default]
    Strict,
    /// Both ingredients must have a tier strictly below the *target's* tier
    /// and must not already depend on the item being expanded.
    BelowTarget,
}

/// Retry schedule for pushing into a full frontier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackoffPolicy {
    /// Total push attempts before the state is dropped (>= 1).
    pub attempts: u32,
    /// Wait after the first failed attempt; doubled after each further failure.
    pub initial: Duration,
    /// Upper bound for a single wait.
    pub max: Duration,
}

impl Default for BackoffPolicy {
    fn default() -> Self {
        Self {
            attempts: 10,
            initial: Duration::from_millis(1),
            max: Duration::from_millis(500),
        }
    }
}

/// Search configuration.
///
/// One value drives one [`crate::search::search`] call; nothing in it is
/// mutated while the search runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchPolicy {
    /// Frontier and pending-set order.
    pub traversal: Traversal,
    /// Stop after this many distinct derivations. `None` runs to exhaustion.
    pub quota: Option<NonZeroUsize>,
    /// Worker thread count. `None` uses the available parallelism.
    pub workers: Option<NonZeroUsize>,
    /// Ingredient tier admission rule.
    pub tier_rule: TierRule,
    /// Maximum states held by the frontier.
    pub frontier_capacity: usize,
    /// Retry schedule when the frontier is full.
    pub backoff: BackoffPolicy,
    /// How long an idle worker waits on an empty frontier before re-checking.
    pub idle_wait: Duration,
    /// Progress log period. `None` disables the monitor thread.
    pub progress_interval: Option<Duration>,
}

impl SearchPolicy {
    /// Default policy with the given traversal order and quota.
    #[must_use]
    pub fn new(traversal: Traversal, quota: Option<NonZeroUsize>) -> Self {
        Self {
            traversal,
            quota,
            ..Self::default()
        }
    }

    /// Number of worker threads this policy will spawn.
    #[must_use]
    pub fn worker_count(&self) -> usize {
        self.workers
            .or_else(|| std::thread::available_parallelism().ok())
            .map_or(1, NonZeroUsize::get)
    }

    /// Reject values the engine cannot run with.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidPolicy`] for a zero frontier capacity,
    /// zero push attempts, an initial backoff above the maximum, or a zero
    /// idle wait or progress interval.
    pub fn validate(&self) -> Result<(), SearchError> {
        let invalid = |detail: &str| {
            Err(SearchError::InvalidPolicy {
                detail: detail.into(),
            })
        };
        if self.frontier_capacity == 0 {
            return invalid("frontier_capacity must be at least 1");
        }
        if self.backoff.attempts == 0 {
            return invalid("backoff.attempts must be at least 1");
        }
        if self.backoff.initial > self.backoff.max {
            return invalid("backoff.initial must not exceed backoff.max");
        }
        if self.idle_wait.is_zero() {
            return invalid("idle_wait must be non-zero");
        }
        if self.progress_interval.is_some_and(|d| d.is_zero()) {
            return invalid("progress_interval must be non-zero when set");
        }
        Ok(())
    }
}

impl Default for SearchPolicy {
    fn default() -> Self {
        Self {
            traversal: Traversal::BreadthFirst,
            quota: None,
            workers: None,
            tier_rule: TierRule::Strict,
            frontier_capacity: DEFAULT_FRONTIER_CAPACITY,
            backoff: BackoffPolicy::default(),
            idle_wait: Duration::from_millis(10),
            progress_interval: None,
        }
    }
}
