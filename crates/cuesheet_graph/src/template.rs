//! Immutable graph templates and their builder.
//!
//! A template is the shared, authored description of a graph: node
//! templates, typed edges, a declared entry, and a precomputed index from
//! value consumers back to their producers. Templates are shared across all
//! concurrently running plays (`Arc<GraphTemplate>`) and never mutated
//! after `build`.

use cuesheet_core::NodeId;
use indexmap::IndexMap;

use crate::contract::EventNode;
use crate::edge::{Edge, PortKind};
use crate::error::GraphError;

/// Immutable description of one node: identity, behavior prototype, and
/// ordered outgoing edges.
pub struct NodeTemplate {
    id: NodeId,
    name: String,
    edges: Vec<Edge>,
    prototype: Box<dyn EventNode>,
}

impl NodeTemplate {
    /// Node id
    #[must_use]
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Authored name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Behavior kind, for logging
    #[must_use]
    pub fn kind(&self) -> &'static str {
        self.prototype.kind()
    }

    /// Outgoing edges in port order
    #[must_use]
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Clone the prototype into a fresh runtime copy.
    ///
    /// The copy owns the node's mutable working fields; topology stays here.
    #[must_use]
    pub fn instantiate(&self) -> Box<dyn EventNode> {
        self.prototype.boxed_clone()
    }
}

impl std::fmt::Debug for NodeTemplate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NodeTemplate")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("kind", &self.kind())
            .field("edges", &self.edges)
            .finish()
    }
}

/// Immutable, shared description of an event graph
#[derive(Debug)]
pub struct GraphTemplate {
    nodes: IndexMap<NodeId, NodeTemplate>,
    entry: NodeId,
    /// (consumer, kind) -> producer, built from ValueId/ValuePayload edges
    value_sources: IndexMap<(NodeId, PortKind), NodeId>,
}

impl GraphTemplate {
    /// Declared entry node
    #[must_use]
    pub fn entry(&self) -> NodeId {
        self.entry
    }

    /// Get a node template by id
    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<&NodeTemplate> {
        self.nodes.get(&id)
    }

    /// Whether the graph contains a node
    #[must_use]
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// Number of node templates
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the graph has no nodes
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterate node templates in registration order
    pub fn nodes(&self) -> impl Iterator<Item = &NodeTemplate> {
        self.nodes.values()
    }

    /// Producer of the value the given consumer pulls over edges of `kind`
    #[must_use]
    pub fn value_source(&self, consumer: NodeId, kind: PortKind) -> Option<NodeId> {
        self.value_sources.get(&(consumer, kind)).copied()
    }
}

/// Builder for [`GraphTemplate`]
///
/// Registers node behaviors under stable names, wires typed edges, and
/// seals the result. Port indices are assigned in wiring order per node.
pub struct GraphBuilder {
    nodes: IndexMap<NodeId, NodeTemplate>,
    entry: Option<NodeId>,
}

impl GraphBuilder {
    /// Create an empty builder
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: IndexMap::new(),
            entry: None,
        }
    }

    /// Register a node behavior under a stable name
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::DuplicateNode`] if the name was already used.
    pub fn add_node(
        &mut self,
        name: &str,
        prototype: impl EventNode + 'static,
    ) -> Result<NodeId, GraphError> {
        let id = NodeId::from_name(name);
        if self.nodes.contains_key(&id) {
            return Err(GraphError::DuplicateNode {
                name: name.to_string(),
            });
        }

        self.nodes.insert(
            id,
            NodeTemplate {
                id,
                name: name.to_string(),
                edges: Vec::new(),
                prototype: Box::new(prototype),
            },
        );
        Ok(id)
    }

    /// Wire a Control edge from one node to another
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::UnknownNode`] if either endpoint is
    /// unregistered.
    pub fn control(&mut self, from: NodeId, to: NodeId) -> Result<(), GraphError> {
        self.wire(from, to, PortKind::Control)
    }

    /// Wire a ValueId edge from a producer to a consumer
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::UnknownNode`] if either endpoint is
    /// unregistered.
    pub fn value_id(&mut self, producer: NodeId, consumer: NodeId) -> Result<(), GraphError> {
        self.wire(producer, consumer, PortKind::ValueId)
    }

    /// Wire a ValuePayload edge from a producer to a consumer
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::UnknownNode`] if either endpoint is
    /// unregistered.
    pub fn value_payload(&mut self, producer: NodeId, consumer: NodeId) -> Result<(), GraphError> {
        self.wire(producer, consumer, PortKind::ValuePayload)
    }

    fn wire(&mut self, from: NodeId, to: NodeId, kind: PortKind) -> Result<(), GraphError> {
        if !self.nodes.contains_key(&to) {
            return Err(GraphError::UnknownNode { id: to });
        }
        let node = self
            .nodes
            .get_mut(&from)
            .ok_or(GraphError::UnknownNode { id: from })?;

        let port = node.edges.len() as u16;
        node.edges.push(Edge { port, kind, target: to });
        Ok(())
    }

    /// Declare the entry node
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::UnknownNode`] if the node is unregistered.
    pub fn entry(&mut self, id: NodeId) -> Result<(), GraphError> {
        if !self.nodes.contains_key(&id) {
            return Err(GraphError::UnknownNode { id });
        }
        self.entry = Some(id);
        Ok(())
    }

    /// Seal the template
    ///
    /// Precomputes the value-source index so the pull protocol resolves
    /// producers in O(1).
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::MissingEntry`] if no entry was declared.
    pub fn build(self) -> Result<GraphTemplate, GraphError> {
        let entry = self.entry.ok_or(GraphError::MissingEntry)?;

        let mut value_sources = IndexMap::new();
        for node in self.nodes.values() {
            for edge in &node.edges {
                if !edge.is_control() {
                    value_sources.insert((edge.target, edge.kind), node.id);
                }
            }
        }

        Ok(GraphTemplate {
            nodes: self.nodes,
            entry,
            value_sources,
        })
    }
}

impl Default for GraphBuilder {
    fn default() -> Self {
        Self::new()
    }
}
