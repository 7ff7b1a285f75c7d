//! Flow-shaping nodes: pass-through, delay, branch selection, termination.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use cuesheet_core::NodeId;
use cuesheet_graph::{Edge, EventNode, PullScope};

/// Single-tick pass-through.
///
/// Finishes on its first update and follows every Control edge, so a relay
/// with several Control edges is a fork point.
#[derive(Debug, Clone, Copy)]
pub struct Relay;

impl Relay {
    /// Create a relay
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Default for Relay {
    fn default() -> Self {
        Self::new()
    }
}

impl EventNode for Relay {
    fn kind(&self) -> &'static str {
        "relay"
    }

    fn boxed_clone(&self) -> Box<dyn EventNode> {
        Box::new(*self)
    }
}

/// Parks its cursor for a fixed number of ticks.
#[derive(Debug, Clone, Copy)]
pub struct Delay {
    total: u64,
    remaining: u64,
}

impl Delay {
    /// Wait for `frames` update ticks before finishing
    #[must_use]
    pub fn frames(frames: u64) -> Self {
        Self {
            total: frames,
            remaining: frames,
        }
    }
}

impl EventNode for Delay {
    fn kind(&self) -> &'static str {
        "delay"
    }

    fn boxed_clone(&self) -> Box<dyn EventNode> {
        // Fresh copies start with the full delay.
        Box::new(Self::frames(self.total))
    }

    fn update(&mut self, _ctx: &mut dyn PullScope) -> bool {
        if self.remaining == 0 {
            return true;
        }
        self.remaining -= 1;
        self.remaining == 0
    }
}

/// Follows exactly one Control edge, chosen by a shared selector.
///
/// The selector is typically written by game code between ticks (a dialogue
/// choice, a comparison result). An out-of-range selection terminates the
/// branch rather than erroring.
pub struct Switch {
    selector: Arc<AtomicUsize>,
}

impl Switch {
    /// Create a switch driven by the given selector
    #[must_use]
    pub fn new(selector: Arc<AtomicUsize>) -> Self {
        Self { selector }
    }
}

impl EventNode for Switch {
    fn kind(&self) -> &'static str {
        "switch"
    }

    fn boxed_clone(&self) -> Box<dyn EventNode> {
        Box::new(Self {
            selector: Arc::clone(&self.selector),
        })
    }

    fn next(&self, edges: &[Edge], out: &mut Vec<NodeId>) {
        let chosen = self.selector.load(Ordering::Relaxed);
        if let Some(edge) = edges.iter().filter(|e| e.is_control()).nth(chosen) {
            out.push(edge.target);
        }
    }
}

/// Terminates its branch regardless of wired edges.
#[derive(Debug, Clone, Copy)]
pub struct Halt;

impl Halt {
    /// Create a halt
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Default for Halt {
    fn default() -> Self {
        Self::new()
    }
}

impl EventNode for Halt {
    fn kind(&self) -> &'static str {
        "halt"
    }

    fn boxed_clone(&self) -> Box<dyn EventNode> {
        Box::new(*self)
    }

    fn next(&self, _edges: &[Edge], _out: &mut Vec<NodeId>) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use cuesheet_graph::NullScope;

    fn control_edges(n: u16) -> (Vec<Edge>, Vec<NodeId>) {
        let targets: Vec<_> = (0..n)
            .map(|i| NodeId::from_name(&format!("t{}", i)))
            .collect();
        let edges = targets
            .iter()
            .enumerate()
            .map(|(i, &t)| Edge::control(i as u16, t))
            .collect();
        (edges, targets)
    }

    #[test]
    fn test_relay_finishes_first_update() {
        let mut relay = Relay::new();
        let mut scope = NullScope::new();
        assert!(relay.update(&mut scope));
    }

    #[test]
    fn test_relay_forks_over_all_control_edges() {
        let (edges, targets) = control_edges(3);
        let mut out = Vec::new();
        Relay::new().next(&edges, &mut out);
        assert_eq!(out, targets);
    }

    #[test]
    fn test_delay_parks_for_n_ticks() {
        let mut delay = Delay::frames(3);
        let mut scope = NullScope::new();
        assert!(!delay.update(&mut scope));
        assert!(!delay.update(&mut scope));
        assert!(delay.update(&mut scope));
    }

    #[test]
    fn test_delay_zero_finishes_immediately() {
        let mut delay = Delay::frames(0);
        let mut scope = NullScope::new();
        assert!(delay.update(&mut scope));
    }

    #[test]
    fn test_delay_clone_resets_countdown() {
        let mut delay = Delay::frames(2);
        let mut scope = NullScope::new();
        assert!(!delay.update(&mut scope));

        // The clone restarts from the template's full count, ignoring the
        // tick already consumed above.
        let mut fresh = delay.boxed_clone();
        assert!(!fresh.update(&mut scope));
        assert!(fresh.update(&mut scope));
    }

    #[test]
    fn test_switch_picks_selected_edge() {
        let selector = Arc::new(AtomicUsize::new(1));
        let switch = Switch::new(Arc::clone(&selector));
        let (edges, targets) = control_edges(3);

        let mut out = Vec::new();
        switch.next(&edges, &mut out);
        assert_eq!(out, vec![targets[1]]);

        selector.store(2, Ordering::Relaxed);
        out.clear();
        switch.next(&edges, &mut out);
        assert_eq!(out, vec![targets[2]]);
    }

    #[test]
    fn test_switch_out_of_range_terminates() {
        let switch = Switch::new(Arc::new(AtomicUsize::new(9)));
        let (edges, _) = control_edges(2);

        let mut out = Vec::new();
        switch.next(&edges, &mut out);
        assert!(out.is_empty());
    }

    #[test]
    fn test_switch_skips_value_edges() {
        let selector = Arc::new(AtomicUsize::new(0));
        let switch = Switch::new(selector);

        let value_target = NodeId::from_name("value_target");
        let control_target = NodeId::from_name("control_target");
        let edges = vec![
            Edge::value_id(0, value_target),
            Edge::control(1, control_target),
        ];

        let mut out = Vec::new();
        switch.next(&edges, &mut out);
        assert_eq!(out, vec![control_target]);
    }

    #[test]
    fn test_halt_emits_nothing() {
        let (edges, _) = control_edges(2);
        let mut out = Vec::new();
        Halt::new().next(&edges, &mut out);
        assert!(out.is_empty());
    }
}
