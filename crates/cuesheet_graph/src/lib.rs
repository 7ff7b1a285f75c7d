//! CUESHEET Graph Templates
//!
//! Immutable, shared descriptions of event graphs: typed edges, node
//! templates, and the lifecycle contract every node type implements.
//! Templates carry no live state; the runtime clones per-cursor copies.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod contract;
pub mod edge;
pub mod error;
pub mod template;

pub use contract::{EventNode, NullScope, Payload, PullScope};
pub use edge::{Edge, PortKind};
pub use error::GraphError;
pub use template::{GraphBuilder, GraphTemplate, NodeTemplate};
