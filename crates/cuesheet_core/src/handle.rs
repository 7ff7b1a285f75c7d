//! Opaque correlation handles for the `ValueId` pull channel.
//!
//! A handle identifies some resource owned by an external collaborator
//! (a playing sound, a running timer). The engine never interprets it.

use serde::{Deserialize, Serialize};

/// Opaque correlation handle produced by an upstream node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Handle(u64);

impl Handle {
    /// The invalid handle, returned when a pull cannot be resolved
    pub const INVALID: Handle = Handle(0);

    /// Create from a raw value
    #[must_use]
    pub const fn from_raw(value: u64) -> Self {
        Self(value)
    }

    /// Get the raw value
    #[must_use]
    pub const fn as_u64(&self) -> u64 {
        self.0
    }

    /// Whether this handle refers to anything
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.0 != 0
    }
}

impl Default for Handle {
    fn default() -> Self {
        Self::INVALID
    }
}

impl std::fmt::Display for Handle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_valid() {
            write!(f, "handle_{}", self.0)
        } else {
            write!(f, "handle_invalid")
        }
    }
}
