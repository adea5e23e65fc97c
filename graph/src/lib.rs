//! Crucible Graph: the immutable recipe graph every search reads from.
//!
//! # API Surface
//!
//! - [`recipe_graph::RecipeGraph`] -- parsed, read-only item table (`lookup`, `tier`, `digest`)
//! - [`sanitize::sanitize`] -- drop recipes that can never take part in a valid derivation
//! - [`hash::canonical_hash`] -- domain-separated SHA-256 used for graph digests and
//!   derivation fingerprints
//!
//! # Module Dependency Direction
//!
//! `hash` ← `item` ← `recipe_graph` ← `sanitize`
//!
//! The graph is built once and never mutated afterwards. Sharing it between
//! threads is a matter of wrapping it in an `Arc`.

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod hash;
pub mod item;
pub mod recipe_graph;
pub mod sanitize;

pub use error::GraphError;
pub use item::{Item, ItemRecord, Recipe, Tier};
pub use recipe_graph::RecipeGraph;
