//! Call graph storage: an append-only builder and the immutable frozen
//! graph the engine consumes.
//!
//! Functions are interned on first mention, so loaders never pre-register
//! names. Edges keep their per-call-site flags, and duplicates are
//! preserved: two call sites between the same pair of functions are two
//! edges. Propagation walks the graph callee-to-caller, so the frozen form
//! exposes incoming-edge iteration.

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use rustc_hash::FxHashMap;

use crate::model::EdgeFlags;

/// Accumulates functions and call sites, then freezes into a [`CallGraph`].
///
/// This is the explicit replacement for ambient load-time collections: a
/// loader owns a builder, feeds it records, and hands the frozen graph to
/// the engine. Once frozen the graph is never mutated again.
#[derive(Debug, Default)]
pub struct CallGraphBuilder {
    graph: DiGraph<String, EdgeFlags>,
    index: FxHashMap<String, NodeIndex>,
}

impl CallGraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Intern a function by name, creating its node on first mention.
    ///
    /// Node indices follow first-mention order, which keeps downstream
    /// iteration deterministic for a given input.
    pub fn intern(&mut self, name: &str) -> NodeIndex {
        if let Some(&idx) = self.index.get(name) {
            return idx;
        }
        let idx = self.graph.add_node(name.to_string());
        self.index.insert(name.to_string(), idx);
        idx
    }

    /// Record one call site. Both endpoints are interned if unseen.
    pub fn add_edge(&mut self, caller: &str, callee: &str, flags: EdgeFlags) {
        let from = self.intern(caller);
        let to = self.intern(callee);
        self.graph.add_edge(from, to, flags);
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Freeze into the immutable form consumed by the engine.
    pub fn finish(self) -> CallGraph {
        CallGraph {
            graph: self.graph,
            index: self.index,
        }
    }
}

/// Immutable whole-program call graph.
///
/// Lookup is by exact function name; traversal is by node index. All
/// accessors are read-only, so the engine can hold the graph for the
/// lifetime of an analysis without copying it.
#[derive(Debug)]
pub struct CallGraph {
    graph: DiGraph<String, EdgeFlags>,
    index: FxHashMap<String, NodeIndex>,
}

impl CallGraph {
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Resolve a function name to its node, if the graph ever saw it.
    pub fn lookup(&self, name: &str) -> Option<NodeIndex> {
        self.index.get(name).copied()
    }

    /// Display name for a node.
    pub fn name(&self, idx: NodeIndex) -> &str {
        &self.graph[idx]
    }

    /// Every recorded call into `callee`, as `(caller, flags)` pairs.
    ///
    /// Duplicate call sites yield one pair each.
    pub fn callers_of(&self, callee: NodeIndex) -> impl Iterator<Item = (NodeIndex, EdgeFlags)> + '_ {
        self.graph
            .edges_directed(callee, Direction::Incoming)
            .map(|edge| (edge.source(), *edge.weight()))
    }

    /// Every call site in the graph, as `(caller, callee, flags)`.
    pub fn edges(&self) -> impl Iterator<Item = (NodeIndex, NodeIndex, EdgeFlags)> + '_ {
        self.graph
            .edge_references()
            .map(|edge| (edge.source(), edge.target(), *edge.weight()))
    }

    /// All function names, in interning order.
    pub fn functions(&self) -> impl Iterator<Item = &str> + '_ {
        self.graph.node_indices().map(|idx| self.graph[idx].as_str())
    }
}
