//! Callback-driven producers and consumers for the pull channel.
//!
//! External collaborators (audio, timers, input capture) are reached
//! through plain callbacks so these nodes stay engine-agnostic. Every node
//! here guards its `end` with a produced flag: the pull protocol may fire
//! `end` early, and the effect must happen at most once per instance.

use std::sync::Arc;

use cuesheet_core::Handle;
use cuesheet_graph::{EventNode, Payload, PullScope};

/// Runs a callback once when the node ends.
pub struct Effect {
    action: Arc<dyn Fn() + Send + Sync>,
    fired: bool,
}

impl Effect {
    /// Create an effect node from a callback
    #[must_use]
    pub fn new(action: impl Fn() + Send + Sync + 'static) -> Self {
        Self {
            action: Arc::new(action),
            fired: false,
        }
    }
}

impl EventNode for Effect {
    fn kind(&self) -> &'static str {
        "effect"
    }

    fn boxed_clone(&self) -> Box<dyn EventNode> {
        Box::new(Self {
            action: Arc::clone(&self.action),
            fired: false,
        })
    }

    fn end(&mut self, _ctx: &mut dyn PullScope) {
        if self.fired {
            return;
        }
        self.fired = true;
        (self.action)();
    }
}

/// Produces a correlation handle on end and exposes it over `ValueId`.
///
/// The callback typically starts something (a sound, a timer) on an
/// external collaborator and returns the handle that names it.
pub struct HandleSource {
    produce: Arc<dyn Fn() -> Handle + Send + Sync>,
    produced: Option<Handle>,
}

impl HandleSource {
    /// Create a handle source from a callback
    #[must_use]
    pub fn new(produce: impl Fn() -> Handle + Send + Sync + 'static) -> Self {
        Self {
            produce: Arc::new(produce),
            produced: None,
        }
    }
}

impl EventNode for HandleSource {
    fn kind(&self) -> &'static str {
        "handle_source"
    }

    fn boxed_clone(&self) -> Box<dyn EventNode> {
        Box::new(Self {
            produce: Arc::clone(&self.produce),
            produced: None,
        })
    }

    fn end(&mut self, _ctx: &mut dyn PullScope) {
        if self.produced.is_none() {
            self.produced = Some((self.produce)());
        }
    }

    fn value_handle(&self) -> Handle {
        self.produced.unwrap_or(Handle::INVALID)
    }
}

/// Produces payloads on end and exposes them over `ValuePayload`.
pub struct PayloadSource {
    produce: Arc<dyn Fn() -> Vec<Payload> + Send + Sync>,
    produced: Option<Vec<Payload>>,
}

impl PayloadSource {
    /// Create a payload source from a callback
    #[must_use]
    pub fn new(produce: impl Fn() -> Vec<Payload> + Send + Sync + 'static) -> Self {
        Self {
            produce: Arc::new(produce),
            produced: None,
        }
    }
}

impl EventNode for PayloadSource {
    fn kind(&self) -> &'static str {
        "payload_source"
    }

    fn boxed_clone(&self) -> Box<dyn EventNode> {
        Box::new(Self {
            produce: Arc::clone(&self.produce),
            produced: None,
        })
    }

    fn end(&mut self, _ctx: &mut dyn PullScope) {
        if self.produced.is_none() {
            self.produced = Some((self.produce)());
        }
    }

    fn value_payload(&self, out: &mut Vec<Payload>) {
        if let Some(produced) = &self.produced {
            out.extend(produced.iter().cloned());
        }
    }
}

/// Pulls the upstream handle on end and hands it to a callback.
///
/// The "stop timer X" pattern: retrieves the handle an upstream
/// [`HandleSource`] produced earlier in the same play, without any forward
/// value propagation.
pub struct HandleSink {
    consume: Arc<dyn Fn(Handle) + Send + Sync>,
    fired: bool,
}

impl HandleSink {
    /// Create a handle sink from a callback
    #[must_use]
    pub fn new(consume: impl Fn(Handle) + Send + Sync + 'static) -> Self {
        Self {
            consume: Arc::new(consume),
            fired: false,
        }
    }
}

impl EventNode for HandleSink {
    fn kind(&self) -> &'static str {
        "handle_sink"
    }

    fn boxed_clone(&self) -> Box<dyn EventNode> {
        Box::new(Self {
            consume: Arc::clone(&self.consume),
            fired: false,
        })
    }

    fn end(&mut self, ctx: &mut dyn PullScope) {
        if self.fired {
            return;
        }
        self.fired = true;
        (self.consume)(ctx.pull_handle());
    }
}
