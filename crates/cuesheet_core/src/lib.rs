//! CUESHEET Core Types
//!
//! This crate contains pure types and logic with no I/O.
//! All types are serializable and cheap to copy.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod frame;
pub mod handle;
pub mod id;

// Re-exports
pub use error::{CueError, CueResult};
pub use frame::Frame;
pub use handle::Handle;
pub use id::{InstanceId, NodeId};
