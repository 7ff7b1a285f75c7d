//! Typed edges between node templates.

use cuesheet_core::NodeId;
use serde::{Deserialize, Serialize};

/// Kind of an output port
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PortKind {
    /// Normal flow. A node may emit zero, one, or many Control successors
    /// on a given evaluation; more than one means a fork.
    Control,
    /// The producer exposes an opaque correlation handle (sound, timer).
    ValueId,
    /// The producer exposes a richer immutable value (captured input).
    ValuePayload,
}

/// A typed output connection from a node template
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    /// Output port index, ordered within the owning node
    pub port: u16,
    /// Port kind
    pub kind: PortKind,
    /// Target node template
    pub target: NodeId,
}

impl Edge {
    /// Create a Control edge
    #[must_use]
    pub const fn control(port: u16, target: NodeId) -> Self {
        Self {
            port,
            kind: PortKind::Control,
            target,
        }
    }

    /// Create a ValueId edge
    #[must_use]
    pub const fn value_id(port: u16, target: NodeId) -> Self {
        Self {
            port,
            kind: PortKind::ValueId,
            target,
        }
    }

    /// Create a ValuePayload edge
    #[must_use]
    pub const fn value_payload(port: u16, target: NodeId) -> Self {
        Self {
            port,
            kind: PortKind::ValuePayload,
            target,
        }
    }

    /// Whether this edge carries normal flow
    #[must_use]
    pub const fn is_control(&self) -> bool {
        matches!(self.kind, PortKind::Control)
    }
}
