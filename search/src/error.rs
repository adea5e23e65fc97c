//! Typed search errors.
//!
//! `SearchError` represents pre-flight failures only. Runtime outcomes (an
//! unknown target, an exhausted frontier, dropped states, a reached quota)
//! are expressed via [`crate::outcome::TerminationReason`] and
//! [`crate::outcome::SearchStats`] on a successful [`crate::outcome::SearchOutcome`].

/// Typed failure for pre-flight search validation.
///
/// These errors are returned before any worker is spawned.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    /// A policy field holds a value the engine cannot run with.
    #[error("invalid search policy: {detail}")]
    InvalidPolicy { detail: String },

    /// A traversal name other than `bfs` or `dfs` was requested.
    #[error("unknown traversal order {name:?} (expected \"bfs\" or \"dfs\")")]
    UnknownTraversal { name: String },
}
