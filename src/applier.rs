//! Declarative input interface for external graph appliers
//!
//! The core never touches system state. Whatever reconciles a graph against
//! a real host (package manager, init system, config writer) implements
//! [`Applier`] and is passed in by the embedding process.

use crate::graph::ResourceGraph;

/// Consumes a finished resource graph and reconciles it against live state.
///
/// The graph is a set: appliers must not rely on iteration order, only on
/// identity keys, ensure states, and ordering tags.
pub trait Applier {
    /// Failure type of the underlying reconciliation mechanism
    type Error;

    /// Apply the graph to the target system
    fn apply(&mut self, graph: &ResourceGraph) -> std::result::Result<(), Self::Error>;
}
