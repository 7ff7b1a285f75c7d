//! Unique identifiers for CUESHEET entities.
//!
//! Node templates are identified by UUIDs; engine instances are identified
//! by nonzero integers handed out sequentially by the engine.

use std::num::NonZeroU64;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Node identifier - identifies a node template within a graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(Uuid);

impl NodeId {
    /// Create a new random NodeId
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create from UUID bytes
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(Uuid::from_bytes(bytes))
    }

    /// Create from name (for named nodes)
    ///
    /// The same name always yields the same id, so authored graphs can
    /// reference nodes stably across builds.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        Self(Uuid::new_v5(&Uuid::NAMESPACE_DNS, name.as_bytes()))
    }

    /// Get as UUID
    #[must_use]
    pub const fn as_uuid(&self) -> Uuid {
        self.0
    }

    /// Get as bytes
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 16] {
        self.0.as_bytes()
    }
}

impl Default for NodeId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "node_{}", self.0)
    }
}

/// Instance identifier - identifies one play of a graph
///
/// Always nonzero: the legacy "0 = invalid" sentinel is unrepresentable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct InstanceId(NonZeroU64);

impl InstanceId {
    /// Create from a raw value, rejecting zero
    #[must_use]
    pub const fn from_raw(value: u64) -> Option<Self> {
        match NonZeroU64::new(value) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }

    /// The first id an engine hands out
    #[must_use]
    pub const fn first() -> Self {
        Self(NonZeroU64::MIN)
    }

    /// The id following this one
    #[must_use]
    pub const fn next(&self) -> Self {
        Self(self.0.saturating_add(1))
    }

    /// Get the raw value (never zero)
    #[must_use]
    pub const fn as_u64(&self) -> u64 {
        self.0.get()
    }
}

impl std::fmt::Display for InstanceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "play_{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_id_creation() {
        let id = NodeId::new();
        assert_ne!(id, NodeId::new());
    }

    #[test]
    fn test_node_id_from_bytes() {
        let bytes = [1u8; 16];
        let id = NodeId::from_bytes(bytes);
        assert_eq!(id.as_bytes(), &bytes);
    }

    #[test]
    fn test_node_id_from_name() {
        let id1 = NodeId::from_name("intro_fade");
        let id2 = NodeId::from_name("intro_fade");
        assert_eq!(id1, id2);

        let id3 = NodeId::from_name("intro_music");
        assert_ne!(id1, id3);
    }

    #[test]
    fn test_node_id_display() {
        let id = NodeId::new();
        let s = format!("{}", id);
        assert!(s.starts_with("node_"));
    }

    #[test]
    fn test_instance_id_rejects_zero() {
        assert!(InstanceId::from_raw(0).is_none());
        assert!(InstanceId::from_raw(1).is_some());
    }

    #[test]
    fn test_instance_id_sequence() {
        let first = InstanceId::first();
        assert_eq!(first.as_u64(), 1);
        assert_eq!(first.next().as_u64(), 2);
    }

    #[test]
    fn test_instance_id_display() {
        let id = InstanceId::first();
        assert_eq!(format!("{}", id), "play_1");
    }

    #[test]
    fn test_instance_id_ord() {
        let a = InstanceId::first();
        let b = a.next();
        assert!(a < b);
    }
}
