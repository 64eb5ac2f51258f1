//! Core data model for call graph edges.
//!
//! A function is identified purely by its (mangled or display) name; the
//! graph layer interns names into node indices. What the analysis actually
//! cares about lives on the edges: every call site carries two flags set by
//! the loaders from the upstream dump and the annotation layer.

use serde::{Deserialize, Serialize};

/// Per-call-site flags recorded on every edge of the call graph.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeFlags {
    /// The callee is a collector entry point: this call can start a
    /// garbage collection directly.
    pub triggers_gc: bool,
    /// The call site sits inside a scope annotated as GC-suppressed.
    pub suppressed: bool,
}

/// Role a call site plays during reverse propagation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeRole {
    /// Unsuppressed: carries GC-reaching status from callee to caller.
    Propagates,
    /// Suppressed call that would have triggered a collection. Audited
    /// separately, never propagated.
    SuppressedWitness,
    /// Suppressed and harmless; contributes nothing to either result set.
    Inert,
}

impl EdgeFlags {
    pub fn new(triggers_gc: bool, suppressed: bool) -> Self {
        Self {
            triggers_gc,
            suppressed,
        }
    }

    /// A plain call site: no collection, not suppressed.
    pub fn call() -> Self {
        Self::default()
    }

    /// A call site whose callee is a collector entry point.
    pub fn gc_call() -> Self {
        Self {
            triggers_gc: true,
            suppressed: false,
        }
    }

    /// Marks this call site as sitting in a GC-suppressed scope.
    pub fn suppressed(mut self) -> Self {
        self.suppressed = true;
        self
    }

    /// Classify this call site for the propagation step.
    ///
    /// Suppression wins over triggering: a suppressed collector call is a
    /// [`EdgeRole::SuppressedWitness`], never a propagation path.
    pub fn classify(self) -> EdgeRole {
        if !self.suppressed {
            EdgeRole::Propagates
        } else if self.triggers_gc {
            EdgeRole::SuppressedWitness
        } else {
            EdgeRole::Inert
        }
    }

    /// True when this call would trigger a collection but is suppressed.
    pub fn is_suppressed_call(self) -> bool {
        self.triggers_gc && self.suppressed
    }

    /// True when this call marks its callee as a live collector entry.
    pub fn is_direct_trigger(self) -> bool {
        self.triggers_gc && !self.suppressed
    }
}
