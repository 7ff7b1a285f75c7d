//! Graph construction errors.

use cuesheet_core::NodeId;

/// Errors raised while building a graph template.
///
/// These cover structural integrity of the builder API only. Topology
/// mistakes (cycles, unreachable nodes) are not detected; they are the
/// author's responsibility.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    /// A node with the same name was already registered
    #[error("Duplicate node: {name}")]
    DuplicateNode {
        /// Name of the offending node
        name: String,
    },

    /// An edge or entry declaration names a node that was never registered
    #[error("Unknown node: {id}")]
    UnknownNode {
        /// The unregistered id
        id: NodeId,
    },

    /// `build` was called without declaring an entry node
    #[error("No entry node declared")]
    MissingEntry,
}
