//! CUESHEET Stock Nodes
//!
//! Reference node implementations for common flow shapes: pass-through,
//! delays, branch selection, termination, and callback-driven producers
//! and consumers for the pull channel. Game-specific nodes live with the
//! game; these exercise every hook of the lifecycle contract.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod flow;
pub mod value;

pub use flow::{Delay, Halt, Relay, Switch};
pub use value::{Effect, HandleSink, HandleSource, PayloadSource};
