//! Search outcome, statistics and termination reasons.

use std::collections::BTreeSet;
use std::time::Duration;

use crucible_graph::hash::ContentHash;

use crate::derivation::{fingerprint, Derivation};

/// Why the search stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminationReason {
    /// The target is not in the graph. Nothing was explored.
    TargetNotFound,
    /// The target is base or has no recipes; answered without workers.
    TrivialTarget,
    /// The collector accepted `quota` distinct derivations.
    QuotaReached { quota: usize },
    /// The frontier emptied with no worker holding a state.
    FrontierExhausted,
}

impl TerminationReason {
    /// Stable snake-case tag used in JSON output and logs.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::TargetNotFound => "target_not_found",
            Self::TrivialTarget => "trivial_target",
            Self::QuotaReached { .. } => "quota_reached",
            Self::FrontierExhausted => "frontier_exhausted",
        }
    }
}

/// Counters gathered over one search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// States popped and processed by workers.
    pub expansions: u64,
    /// Steps that ended without a result or a child: an incomplete finished
    /// state, or a pending item with no admissible recipe.
    pub dead_ends: u64,
    /// Complete derivations whose fingerprint had already been collected.
    pub duplicates_suppressed: u64,
    /// Distinct complete derivations that arrived after the quota was met.
    pub late_discarded: u64,
    /// States discarded because the frontier stayed full.
    pub states_dropped: u64,
    /// Largest number of states queued at once.
    pub frontier_high_water: u64,
    /// Initial states built from the target's recipes.
    pub seeded_states: u64,
    /// Worker threads spawned.
    pub workers: u64,
}

/// Everything a search returns.
///
/// A search never fails at runtime: an unknown target, an exhausted
/// frontier and dropped states are all reported here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOutcome {
    /// Distinct complete derivations, in collection order.
    pub derivations: Vec<Derivation>,
    /// Wall time spent searching. Zero for an unknown target.
    pub elapsed: Duration,
    /// 1 for the target plus 2 per recipe iterated. Zero for an unknown
    /// target.
    pub nodes_visited: u64,
    pub stats: SearchStats,
    pub termination: TerminationReason,
}

impl SearchOutcome {
    /// Outcome for a target missing from the graph.
    #[must_use]
    pub fn not_found() -> Self {
        Self {
            derivations: Vec::new(),
            elapsed: Duration::ZERO,
            nodes_visited: 0,
            stats: SearchStats::default(),
            termination: TerminationReason::TargetNotFound,
        }
    }

    /// Returns `true` if the search stopped because the quota was met.
    #[must_use]
    pub fn is_quota_reached(&self) -> bool {
        matches!(self.termination, TerminationReason::QuotaReached { .. })
    }

    /// Fingerprints of all returned derivations.
    #[must_use]
    pub fn fingerprints(&self) -> BTreeSet<ContentHash> {
        self.derivations.iter().map(fingerprint).collect()
    }

    /// Summary of the run as JSON (derivation bodies excluded).
    #[must_use]
    pub fn to_json_value(&self) -> serde_json::Value {
        let mut termination = serde_json::json!({"type": self.termination.as_str()});
        if let TerminationReason::QuotaReached { quota } = self.termination {
            termination["quota"] = serde_json::json!(quota);
        }
        serde_json::json!({
            "elapsed_seconds": self.elapsed.as_secs_f64(),
            "nodes_visited": self.nodes_visited,
            "results": self.derivations.len(),
            "stats": stats_to_json(&self.stats),
            "termination_reason": termination,
        })
    }
}

fn stats_to_json(s: &SearchStats) -> serde_json::Value {
    serde_json::json!({
        "dead_ends": s.dead_ends,
        "duplicates_suppressed": s.duplicates_suppressed,
        "expansions": s.expansions,
        "frontier_high_water": s.frontier_high_water,
        "late_discarded": s.late_discarded,
        "seeded_states": s.seeded_states,
        "states_dropped": s.states_dropped,
        "workers": s.workers,
    })
}
