//! Crucible Harness: process-level wiring around the search engine.
//!
//! The harness owns everything a caller touches: the load-once graph
//! store, the request/response facade, runner configuration and the
//! `crucible` CLI. It does NOT implement search logic; it delegates to
//! `crucible_search`.
//!
//! # Pipeline
//!
//! ```text
//! RecipeRequest → GraphStore::get() → RunnerConfig::policy()
//!   → crucible_search::search() → RecipeResponse
//! ```

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod cli;
pub mod config;
pub mod error;
pub mod request;
pub mod runner;
pub mod store;

pub use config::RunnerConfig;
pub use error::RunError;
pub use request::{RecipeRequest, RecipeResponse};
pub use runner::{run_on_graph, run_search, RunReport};
pub use store::GraphStore;
