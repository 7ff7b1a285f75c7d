//! Lazy pull resolution across value edges.
//!
//! Value edges are consumed, not produced, by the forward scheduling walk.
//! A consumer pulls on demand: the producer is resolved through the
//! template's value-source index, located among this play's materialized
//! node instances (visited arena first, then live cursors), ended early if
//! needed, and read. Unresolvable pulls yield defaults, never errors.

use cuesheet_core::{Frame, Handle, InstanceId, NodeId};
use cuesheet_graph::{GraphTemplate, Payload, PortKind, PullScope};
use indexmap::IndexMap;
use tracing::trace;

use crate::cursor::{Cursor, RuntimeNode};

/// Live [`PullScope`] handed to node lifecycle calls.
///
/// Borrows the pieces of engine state a pull needs. The node being driven
/// is detached from its slot while its method runs, so a self-referential
/// pull resolves to the default instead of aliasing.
pub(crate) struct EngineScope<'a> {
    pub graph: &'a GraphTemplate,
    pub instance: InstanceId,
    pub node_id: NodeId,
    pub frame: Frame,
    pub visited: &'a mut IndexMap<NodeId, RuntimeNode>,
    pub cursors: &'a mut [Cursor],
}

impl EngineScope<'_> {
    /// Detach the producer from its slot, fire its `end` if it has not
    /// fired, read a value, and reattach.
    fn with_producer<T>(
        &mut self,
        producer: NodeId,
        read: impl FnOnce(&RuntimeNode) -> T,
    ) -> Option<T> {
        if let Some(mut node) = self.visited.swap_remove(&producer) {
            self.end_detached(producer, &mut node);
            let value = read(&node);
            self.visited.insert(producer, node);
            return Some(value);
        }

        let slot = self.cursors.iter().position(|c| {
            !c.retired && c.instance == self.instance && c.node_id == producer && c.node.is_some()
        })?;
        let mut node = self.cursors[slot].node.take()?;
        self.end_detached(producer, &mut node);
        let value = read(&node);
        self.cursors[slot].node = Some(node);
        Some(value)
    }

    fn end_detached(&mut self, producer: NodeId, node: &mut RuntimeNode) {
        if node.ended() {
            return;
        }
        // The producer's own end may pull in turn; give it a scope of its own.
        let mut scope = EngineScope {
            graph: self.graph,
            instance: self.instance,
            node_id: producer,
            frame: self.frame,
            visited: &mut *self.visited,
            cursors: &mut *self.cursors,
        };
        node.fire_end(&mut scope);
        trace!(instance = %self.instance, node = %producer, "producer ended early by pull");
    }
}

impl PullScope for EngineScope<'_> {
    fn instance(&self) -> InstanceId {
        self.instance
    }

    fn frame(&self) -> Frame {
        self.frame
    }

    fn pull_handle(&mut self) -> Handle {
        let Some(producer) = self.graph.value_source(self.node_id, PortKind::ValueId) else {
            return Handle::INVALID;
        };
        self.with_producer(producer, |node| node.node().value_handle())
            .unwrap_or(Handle::INVALID)
    }

    fn pull_payloads(&mut self) -> Vec<Payload> {
        let Some(producer) = self.graph.value_source(self.node_id, PortKind::ValuePayload) else {
            return Vec::new();
        };
        self.with_producer(producer, |node| {
            let mut out = Vec::new();
            node.node().value_payload(&mut out);
            out
        })
        .unwrap_or_default()
    }
}
