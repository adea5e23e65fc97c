//! Crucible Search: concurrent enumeration of crafting derivations.
//!
//! This crate provides the search layer. It depends only on `crucible_graph`;
//! it does NOT depend on `crucible_harness`.
//!
//! # Crate dependency graph
//!
//! ```text
//! crucible_graph  ←  crucible_search  ←  crucible_harness
//! (recipe table)     (frontier, workers)   (store, runner, cli)
//! ```
//!
//! # Key types
//!
//! - [`search::search`] -- entry point: one call, one scoped worker pool
//! - [`Derivation`] -- item → chosen ingredients; [`derivation::fingerprint`] dedups them
//! - [`SearchPolicy`] -- traversal order, quota, workers, tier rule, frontier bounds
//! - [`SearchOutcome`] -- results, node count, [`SearchStats`], [`TerminationReason`]
//!
//! # Threads
//!
//! Workers pop states from a bounded [`frontier::Frontier`] and push children
//! back; complete derivations go over a channel to one collector thread that
//! owns the result list. [`control::Control`] carries the single stop signal
//! (quota reached, or frontier exhausted with no worker active).

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod collector;
pub mod control;
pub mod derivation;
pub mod error;
pub mod expand;
pub mod frontier;
pub mod outcome;
pub mod policy;
pub mod search;
pub mod state;

pub use derivation::Derivation;
pub use error::SearchError;
pub use outcome::{SearchOutcome, SearchStats, TerminationReason};
pub use policy::{BackoffPolicy, SearchPolicy, TierRule, Traversal};
pub use search::search;
