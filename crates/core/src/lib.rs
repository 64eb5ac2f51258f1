//! gc-hazard-core
//!
//! Core library for whole-program GC-reachability analysis of call graphs.
//!
//! This crate defines the call graph model, the loaders that build it from
//! compiler dumps, the annotation layer applied while loading, and the
//! reverse-propagation engine that computes which functions can reach a
//! garbage collection together with a witness call chain for each.
//!
//! The goal is to keep all substantive logic here so it is fully testable and
//! reusable from multiple frontends (CLI, build integration, etc.).

pub mod model;
pub mod graph;
pub mod analysis;
pub mod loader;
pub mod annotations;

/// Returns the library version as encoded at compile time.
///
/// Useful for tests and for frontends to report consistent version info.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
