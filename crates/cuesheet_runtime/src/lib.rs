//! CUESHEET Runtime
//!
//! The live half of the engine: cursor table, per-frame scheduler tick,
//! fork/termination bookkeeping, and the lazy pull protocol. Single
//! threaded and cooperative; suspension is purely `update() -> false`.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod engine;
pub mod stats;

mod cursor;
mod pull;

pub use engine::EventEngine;
pub use stats::RuntimeStats;
