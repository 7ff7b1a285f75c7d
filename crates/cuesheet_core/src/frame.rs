//! Frame counter for the tick-driven scheduler.
//!
//! The engine is quantized to frames; wall clock time never enters
//! scheduling decisions.

use serde::{Deserialize, Serialize};

/// Frame number - monotonically increasing tick counter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Frame(u64);

impl Frame {
    /// Create a new frame counter at zero
    #[must_use]
    pub const fn zero() -> Self {
        Self(0)
    }

    /// Create from raw value
    #[must_use]
    pub const fn from_raw(value: u64) -> Self {
        Self(value)
    }

    /// Get raw value
    #[must_use]
    pub const fn as_u64(&self) -> u64 {
        self.0
    }

    /// Advance to the next frame
    pub fn increment(&mut self) {
        self.0 += 1;
    }

    /// Create the frame after this one
    #[must_use]
    pub const fn incremented(&self) -> Self {
        Self(self.0 + 1)
    }

    /// Frames elapsed since an earlier frame
    #[must_use]
    pub const fn since(&self, earlier: Frame) -> u64 {
        self.0.saturating_sub(earlier.0)
    }
}

impl Default for Frame {
    fn default() -> Self {
        Self::zero()
    }
}

impl std::fmt::Display for Frame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "F{}", self.0)
    }
}

impl From<u64> for Frame {
    fn from(value: u64) -> Self {
        Self(value)
    }
}
