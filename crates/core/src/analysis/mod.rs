//! The GC-reachability closure.
//!
//! Seeds collector entry points from GC-triggering call sites, then
//! propagates "can reach a collection" callee-to-caller across every
//! unsuppressed edge until nothing new is discovered. Alongside the
//! reachable set it records, for each discovered function, the single
//! callee through which it was first reached; those origins form a forest
//! that the witness chains walk. Functions whose only collector calls are
//! suppressed never propagate and are collected into a separate audit set.

pub mod witness;

pub use witness::{ConsistencyError, WitnessChain};

use std::collections::VecDeque;

use petgraph::graph::NodeIndex;
use rustc_hash::FxHashSet;
use serde::Serialize;

use crate::graph::CallGraph;
use crate::model::EdgeRole;

/// How a function entered the GC-reaching set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    /// Collector entry point: callee of an unsuppressed GC-triggering
    /// call site. Witness chains end here.
    Direct,
    /// First discovered through an unsuppressed call into the given
    /// already-reaching function.
    Via(NodeIndex),
}

/// Aggregate counts over one analysis, for reports and summaries.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisSummary {
    pub functions: usize,
    pub call_sites: usize,
    pub gc_functions: usize,
    pub collector_entries: usize,
    pub suppressed_functions: usize,
}

/// Result of the whole-program closure.
///
/// Owns the frozen graph plus the per-function origin map, the discovery
/// order, and the suppressed audit set. Everything here is immutable once
/// [`GcReachability::compute`] returns.
#[derive(Debug)]
pub struct GcReachability {
    graph: CallGraph,
    origins: Vec<Option<Origin>>,
    discovered: Vec<NodeIndex>,
    suppressed: Vec<NodeIndex>,
}

impl GcReachability {
    /// Run the closure over a frozen call graph.
    ///
    /// One sweep over all call sites seeds the worklist with collector
    /// entries and collects the suppressed audit set; a reverse BFS then
    /// propagates GC-reaching status across unsuppressed edges. Each
    /// function's origin is assigned exactly once, on first discovery, so
    /// the walk visits every node and edge at most once and terminates on
    /// cyclic graphs.
    pub fn compute(graph: CallGraph) -> Self {
        let mut origins: Vec<Option<Origin>> = vec![None; graph.node_count()];
        let mut discovered: Vec<NodeIndex> = Vec::new();
        let mut suppressed: Vec<NodeIndex> = Vec::new();
        let mut suppressed_seen: FxHashSet<NodeIndex> = FxHashSet::default();
        let mut queue: VecDeque<NodeIndex> = VecDeque::new();

        for (caller, callee, flags) in graph.edges() {
            if flags.is_suppressed_call() && suppressed_seen.insert(caller) {
                suppressed.push(caller);
            }
            if flags.is_direct_trigger() && origins[callee.index()].is_none() {
                origins[callee.index()] = Some(Origin::Direct);
                discovered.push(callee);
                queue.push_back(callee);
            }
        }
        log::debug!(
            "seeded {} collector entries, {} suppressed witnesses",
            queue.len(),
            suppressed.len()
        );

        while let Some(reached) = queue.pop_front() {
            for (caller, flags) in graph.callers_of(reached) {
                if flags.classify() != EdgeRole::Propagates {
                    continue;
                }
                if origins[caller.index()].is_none() {
                    origins[caller.index()] = Some(Origin::Via(reached));
                    discovered.push(caller);
                    queue.push_back(caller);
                }
            }
        }
        log::debug!("closure discovered {} GC-reaching functions", discovered.len());

        GcReachability {
            graph,
            origins,
            discovered,
            suppressed,
        }
    }

    /// The graph this analysis was computed over.
    pub fn graph(&self) -> &CallGraph {
        &self.graph
    }

    /// How the given node entered the GC-reaching set, if it did.
    pub fn origin(&self, idx: NodeIndex) -> Option<Origin> {
        self.origins[idx.index()]
    }

    /// True when the named function can reach a collection.
    pub fn is_gc_reaching(&self, name: &str) -> bool {
        self.graph
            .lookup(name)
            .is_some_and(|idx| self.origins[idx.index()].is_some())
    }

    /// True when the named function has at least one suppressed collector
    /// call.
    pub fn has_suppressed_call(&self, name: &str) -> bool {
        self.graph
            .lookup(name)
            .is_some_and(|idx| self.suppressed.contains(&idx))
    }

    /// Every discovered function with its origin, in discovery order.
    pub fn discovered(&self) -> impl Iterator<Item = (NodeIndex, Origin)> + '_ {
        self.discovered
            .iter()
            .filter_map(|&idx| self.origins[idx.index()].map(|origin| (idx, origin)))
    }

    /// GC-reaching function names, in discovery order.
    pub fn gc_functions(&self) -> impl Iterator<Item = &str> + '_ {
        self.discovered.iter().map(|&idx| self.graph.name(idx))
    }

    /// Functions with suppressed collector calls, in input order.
    pub fn suppressed_functions(&self) -> impl Iterator<Item = &str> + '_ {
        self.suppressed.iter().map(|&idx| self.graph.name(idx))
    }

    /// Witness chain for the named function, or `None` when it cannot
    /// reach a collection (or never appeared in the graph).
    pub fn witness_chain(&self, name: &str) -> Option<WitnessChain<'_>> {
        let idx = self.graph.lookup(name)?;
        self.origins[idx.index()]?;
        Some(WitnessChain::new(self, idx))
    }

    /// Aggregate counts for reports.
    pub fn summary(&self) -> AnalysisSummary {
        let collector_entries = self
            .discovered
            .iter()
            .filter(|&&idx| matches!(self.origins[idx.index()], Some(Origin::Direct)))
            .count();
        AnalysisSummary {
            functions: self.graph.node_count(),
            call_sites: self.graph.edge_count(),
            gc_functions: self.discovered.len(),
            collector_entries,
            suppressed_functions: self.suppressed.len(),
        }
    }

    /// Upper bound for witness chain length: a consistent origin forest
    /// can never produce a chain longer than the discovered set.
    pub(crate) fn chain_bound(&self) -> usize {
        self.discovered.len()
    }
}
