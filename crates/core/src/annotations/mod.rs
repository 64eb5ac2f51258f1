//! Annotation lists applied while loading call graphs.
//!
//! Extracted call graphs are rarely clean: some functions look like
//! collector calls but are known-safe, and some trigger collections
//! through paths the extractor cannot see. Annotations patch both cases
//! at load time, before the graph is frozen: calls into an ignored
//! function are dropped entirely, and calls into a forced function are
//! marked GC-triggering regardless of what the dump says.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Raw annotation file contents.
///
/// Frontends parse this from YAML or JSON; both lists default to empty so
/// a file may carry either one alone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotationConfig {
    /// Calls into these functions are dropped at load time.
    #[serde(default)]
    pub ignore_functions: Vec<String>,
    /// Calls into these functions are forced to GC-triggering.
    #[serde(default)]
    pub treat_as_gc: Vec<String>,
}

/// The annotation file contradicts itself.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AnnotationError {
    /// A function cannot be both dropped and forced to GC-triggering.
    #[error("'{0}' is listed in both ignore_functions and treat_as_gc")]
    Contradiction(String),
}

impl AnnotationConfig {
    /// Reject configs that list a function on both sides.
    pub fn validate(&self) -> Result<(), AnnotationError> {
        let ignored: FxHashSet<&str> = self.ignore_functions.iter().map(String::as_str).collect();
        for name in &self.treat_as_gc {
            if ignored.contains(name.as_str()) {
                return Err(AnnotationError::Contradiction(name.clone()));
            }
        }
        Ok(())
    }

    /// Validate and build the lookup form consulted per edge by loaders.
    pub fn compile(self) -> Result<AnnotationFilter, AnnotationError> {
        self.validate()?;
        Ok(AnnotationFilter {
            ignored: self.ignore_functions.into_iter().collect(),
            forced: self.treat_as_gc.into_iter().collect(),
        })
    }
}

/// Compiled annotation lookups.
#[derive(Debug, Clone, Default)]
pub struct AnnotationFilter {
    ignored: FxHashSet<String>,
    forced: FxHashSet<String>,
}

impl AnnotationFilter {
    /// A filter that passes every call site through untouched.
    pub fn empty() -> Self {
        Self::default()
    }

    /// True when calls into `callee` should be dropped.
    pub fn is_ignored(&self, callee: &str) -> bool {
        self.ignored.contains(callee)
    }

    /// True when calls into `callee` should be treated as GC-triggering.
    pub fn forces_gc(&self, callee: &str) -> bool {
        self.forced.contains(callee)
    }
}
