//! The lifecycle contract every node type implements.
//!
//! The engine knows nothing about what a node does; it only drives this
//! contract. Nodes call back into external collaborators (audio, UI, quest
//! systems) from inside these methods.

use cuesheet_core::{Frame, Handle, InstanceId, NodeId};

use crate::edge::Edge;

/// Immutable value carried over a `ValuePayload` pull
pub type Payload = serde_json::Value;

/// Context handed to node lifecycle methods.
///
/// Exposes where the node is running and the lazy pull operations for
/// values produced upstream. The engine provides the live implementation;
/// [`NullScope`] serves for testing nodes in isolation.
pub trait PullScope {
    /// Engine instance this node is running under
    fn instance(&self) -> InstanceId;

    /// Current frame
    fn frame(&self) -> Frame;

    /// Pull the correlation handle produced by the upstream node whose
    /// `ValueId` edge targets this node.
    ///
    /// Fires the producer's `end` early if it has not fired yet. Returns
    /// [`Handle::INVALID`] when no producer is resolvable.
    fn pull_handle(&mut self) -> Handle;

    /// Pull the payloads produced by the upstream node whose `ValuePayload`
    /// edge targets this node.
    ///
    /// Fires the producer's `end` early if it has not fired yet. Returns an
    /// empty vector when no producer is resolvable.
    fn pull_payloads(&mut self) -> Vec<Payload>;
}

/// One step in an event graph.
///
/// Per-cursor state machine: `Entered → Started → (update loop, 0..n ticks)
/// → Ended → Branched`. A node that just started does not also get `update`
/// called the same tick; the one-tick lag lets downstream systems that were
/// just notified settle before being polled.
pub trait EventNode: Send {
    /// Short name for logging and diagnostics
    fn kind(&self) -> &'static str;

    /// Deep-copy the mutable working fields into a fresh runtime copy.
    ///
    /// Never copies edge or topology data; that stays with the shared
    /// template. Called once each time a cursor enters the node.
    fn boxed_clone(&self) -> Box<dyn EventNode>;

    /// Invoked exactly once when a cursor first arrives. Setup only: a
    /// multi-tick node must not produce its final side effect here.
    fn start(&mut self, ctx: &mut dyn PullScope) {
        let _ = ctx;
    }

    /// Invoked once per tick after `start`, beginning the tick after the
    /// one `start` ran in. Returns `true` when finished; `false` leaves the
    /// cursor parked until next tick.
    fn update(&mut self, ctx: &mut dyn PullScope) -> bool {
        let _ = ctx;
        true
    }

    /// Invoked once, immediately after `update` first returns `true`.
    /// Performs the node's actual effect.
    ///
    /// Must be idempotent under repeated calls: the pull protocol may fire
    /// it early, so implementations guard with an "already produced" flag.
    fn end(&mut self, ctx: &mut dyn PullScope) {
        let _ = ctx;
    }

    /// Invoked once, right after `end`. Appends zero or more targets drawn
    /// from this node's `Control` edges. More than one entry forks the
    /// branch; zero entries terminate it.
    ///
    /// The default follows every `Control` edge in port order.
    fn next(&self, edges: &[Edge], out: &mut Vec<NodeId>) {
        out.extend(edges.iter().filter(|e| e.is_control()).map(|e| e.target));
    }

    /// Correlation handle this node exposes over a `ValueId` edge, if any
    fn value_handle(&self) -> Handle {
        Handle::INVALID
    }

    /// Payloads this node exposes over a `ValuePayload` edge, if any
    fn value_payload(&self, out: &mut Vec<Payload>) {
        let _ = out;
    }
}

impl std::fmt::Debug for dyn EventNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "EventNode({})", self.kind())
    }
}

/// Inert scope for unit-testing node implementations.
///
/// Pulls always resolve to defaults.
#[derive(Debug, Clone, Copy)]
pub struct NullScope {
    instance: InstanceId,
    frame: Frame,
}

impl NullScope {
    /// Create a null scope at frame zero
    #[must_use]
    pub fn new() -> Self {
        Self {
            instance: InstanceId::first(),
            frame: Frame::zero(),
        }
    }

    /// Create a null scope at a given frame
    #[must_use]
    pub fn at_frame(frame: Frame) -> Self {
        Self {
            instance: InstanceId::first(),
            frame,
        }
    }
}

impl Default for NullScope {
    fn default() -> Self {
        Self::new()
    }
}

impl PullScope for NullScope {
    fn instance(&self) -> InstanceId {
        self.instance
    }

    fn frame(&self) -> Frame {
        self.frame
    }

    fn pull_handle(&mut self) -> Handle {
        Handle::INVALID
    }

    fn pull_payloads(&mut self) -> Vec<Payload> {
        Vec::new()
    }
}
