//! Call graph loading: the format trait, the loader registry, and the
//! formats this crate ships.
//!
//! A loader turns one textual dump into a frozen
//! [`CallGraph`](crate::graph::CallGraph), applying the annotation filter
//! edge by edge while feeding the builder. Loading is all-or-nothing: the
//! first malformed record aborts with a line-numbered error, and the
//! engine never sees a partially loaded graph.

pub mod callgraph_text;
pub mod json_lines;

pub use callgraph_text::CallgraphTextLoader;
pub use json_lines::JsonLinesLoader;

use std::collections::HashMap;

use thiserror::Error;

use crate::annotations::AnnotationFilter;
use crate::graph::CallGraph;

/// Errors raised while parsing a call graph dump.
///
/// Lines are numbered from 1, matching what editors display.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The line did not match any record shape the format knows.
    #[error("line {line}: malformed record: {reason}")]
    Malformed { line: usize, reason: String },
    /// An edge or tag referenced a function id that was never declared.
    #[error("line {line}: unknown function id #{id}")]
    UnknownId { line: usize, id: u32 },
    /// A function id was declared twice.
    #[error("line {line}: duplicate declaration of function id #{id}")]
    DuplicateId { line: usize, id: u32 },
    /// A JSON-lines record failed to deserialize.
    #[error("line {line}: invalid call record: {source}")]
    Record {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
}

/// Trait implemented by call graph input formats.
pub trait GraphLoader: Send + Sync {
    /// Parse `input` into a frozen graph, applying `filter` per edge.
    fn load(&self, input: &str, filter: &AnnotationFilter) -> Result<CallGraph, LoadError>;

    /// Short name of this format, as selected by frontends.
    fn name(&self) -> &'static str;
}

/// Registry of available loaders. Frontends select one by name.
#[derive(Default)]
pub struct LoaderRegistry {
    loaders: HashMap<String, Box<dyn GraphLoader>>,
}

impl LoaderRegistry {
    pub fn new() -> Self {
        Self {
            loaders: HashMap::new(),
        }
    }

    /// Register a loader under its own name.
    pub fn register<L: GraphLoader + 'static>(&mut self, loader: L) -> &mut Self {
        self.loaders.insert(loader.name().to_string(), Box::new(loader));
        self
    }

    /// Look up a loader by name.
    pub fn get(&self, name: &str) -> Option<&dyn GraphLoader> {
        self.loaders.get(name).map(|loader| loader.as_ref())
    }

    /// Names of all registered loaders, sorted for stable listings.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.loaders.keys().cloned().collect();
        names.sort();
        names
    }
}

/// Registry populated with the formats this crate ships.
pub fn default_loader_registry() -> LoaderRegistry {
    let mut registry = LoaderRegistry::new();
    registry.register(CallgraphTextLoader);
    registry.register(JsonLinesLoader);
    registry
}
