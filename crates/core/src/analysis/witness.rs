//! Witness chain reconstruction over the origin forest.
//!
//! A chain starts at a GC-reaching function and follows origins until it
//! reaches a collector entry point: `[f, origin(f), origin(origin(f)), ..]`.
//! Origins are assigned once and only point at earlier-discovered
//! functions, so on a consistent analysis the walk always terminates. The
//! iterator still bounds the walk by the size of the discovered set; going
//! past that bound means the origin map was corrupted, and the walk stops
//! with an error carrying the partial chain rather than returning it as if
//! it were complete.

use petgraph::graph::NodeIndex;
use thiserror::Error;

use super::{GcReachability, Origin};

/// The origin map failed an invariant mid-walk.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error(
    "witness chain for '{function}' is inconsistent: {reason} (walked {} of at most {limit}: {})",
    .partial.len(),
    .partial.join(" -> ")
)]
pub struct ConsistencyError {
    /// The function the chain was requested for.
    pub function: String,
    /// Which invariant broke.
    pub reason: &'static str,
    /// Longest chain a consistent origin forest could produce.
    pub limit: usize,
    /// Names walked before the walk was abandoned.
    pub partial: Vec<String>,
}

/// Lazy walk of one witness chain.
///
/// Yields function names starting with the requested function and ending
/// at a collector entry point. Cheap to recreate, so streaming consumers
/// can restart at will; [`WitnessChain::into_names`] materializes the
/// whole chain in one go.
#[derive(Clone)]
pub struct WitnessChain<'a> {
    analysis: &'a GcReachability,
    start: NodeIndex,
    current: Option<NodeIndex>,
    steps: usize,
    limit: usize,
}

impl<'a> WitnessChain<'a> {
    pub(super) fn new(analysis: &'a GcReachability, start: NodeIndex) -> Self {
        Self {
            analysis,
            start,
            current: Some(start),
            steps: 0,
            limit: analysis.chain_bound(),
        }
    }

    /// Materialize the full chain, front to back.
    pub fn into_names(self) -> Result<Vec<&'a str>, ConsistencyError> {
        self.collect()
    }

    fn inconsistency(&self, reason: &'static str) -> ConsistencyError {
        ConsistencyError {
            function: self.analysis.graph().name(self.start).to_string(),
            reason,
            limit: self.limit,
            partial: self.prefix(self.steps),
        }
    }

    /// Re-walk the first `n` names from the start. Only used to build
    /// error context, so the happy path allocates nothing per step.
    fn prefix(&self, n: usize) -> Vec<String> {
        let mut names = Vec::with_capacity(n);
        let mut cursor = Some(self.start);
        while let Some(idx) = cursor {
            if names.len() == n {
                break;
            }
            names.push(self.analysis.graph().name(idx).to_string());
            cursor = match self.analysis.origin(idx) {
                Some(Origin::Via(pred)) => Some(pred),
                _ => None,
            };
        }
        names
    }
}

impl<'a> Iterator for WitnessChain<'a> {
    type Item = Result<&'a str, ConsistencyError>;

    fn next(&mut self) -> Option<Self::Item> {
        let idx = self.current?;
        if self.steps >= self.limit {
            self.current = None;
            return Some(Err(self.inconsistency("walk exceeded the discovered set")));
        }
        let origin = match self.analysis.origin(idx) {
            Some(origin) => origin,
            None => {
                self.current = None;
                return Some(Err(self.inconsistency("walk reached an undiscovered function")));
            }
        };
        self.steps += 1;
        self.current = match origin {
            Origin::Via(pred) => Some(pred),
            Origin::Direct => None,
        };
        Some(Ok(self.analysis.graph().name(idx)))
    }
}
