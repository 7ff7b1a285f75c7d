//! Cursor records: one live position of execution within a graph.

use cuesheet_core::{Frame, InstanceId, NodeId};
use cuesheet_graph::{EventNode, PullScope};

/// Where a cursor is in the node lifecycle.
///
/// `Entered` means the cursor arrived this tick or later; `start` has not
/// run. `Started` means `start` ran on an earlier tick and the node is in
/// its update loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Phase {
    Entered,
    Started,
}

/// A boxed runtime node plus the engine-side end guard.
///
/// The contract requires node `end` implementations to be idempotent; the
/// engine additionally tracks whether it already dispatched `end` so a
/// pulled-early producer is not re-ended by normal scheduling.
#[derive(Debug)]
pub(crate) struct RuntimeNode {
    node: Box<dyn EventNode>,
    ended: bool,
}

impl RuntimeNode {
    pub(crate) fn new(node: Box<dyn EventNode>) -> Self {
        Self { node, ended: false }
    }

    pub(crate) fn node(&self) -> &dyn EventNode {
        self.node.as_ref()
    }

    pub(crate) fn node_mut(&mut self) -> &mut dyn EventNode {
        self.node.as_mut()
    }

    pub(crate) fn ended(&self) -> bool {
        self.ended
    }

    /// Dispatch `end` if it has not fired yet. Returns whether it fired now.
    pub(crate) fn fire_end(&mut self, ctx: &mut dyn PullScope) -> bool {
        if self.ended {
            return false;
        }
        self.ended = true;
        self.node.end(ctx);
        true
    }
}

/// One live position of execution, owned by exactly one engine instance.
///
/// `node` is `None` only while the node is temporarily detached for a
/// lifecycle call or after the cursor retired; retired cursors are swept at
/// the end of the tick that retired them.
#[derive(Debug)]
pub(crate) struct Cursor {
    pub instance: InstanceId,
    pub node_id: NodeId,
    pub node: Option<RuntimeNode>,
    pub phase: Phase,
    pub entered_at: Frame,
    pub started_at: Option<Frame>,
    pub retired: bool,
}

impl Cursor {
    pub(crate) fn new(
        instance: InstanceId,
        node_id: NodeId,
        node: RuntimeNode,
        entered_at: Frame,
    ) -> Self {
        Self {
            instance,
            node_id,
            node: Some(node),
            phase: Phase::Entered,
            entered_at,
            started_at: None,
            retired: false,
        }
    }

    /// Re-point this cursor at a freshly entered node, keeping its table
    /// slot (and therefore its fairness position) stable.
    pub(crate) fn reenter(&mut self, node_id: NodeId, node: RuntimeNode, frame: Frame) {
        self.node_id = node_id;
        self.node = Some(node);
        self.phase = Phase::Entered;
        self.entered_at = frame;
        self.started_at = None;
    }
}
