//! The event engine: instance table, cursor table, and the scheduler tick.
//!
//! The engine owns every running play. Each tick advances the frame counter
//! and steps every cursor that existed when the tick began: cursors in
//! `Entered` phase run `start`, cursors in `Started` phase run `update` and,
//! on completion, `end` plus successor resolution. Cursors spawned during a
//! tick are not stepped until the next one, which gives every node exactly
//! one full frame between arrival and `start`.

use std::sync::Arc;

use cuesheet_core::{CueError, CueResult, Frame, InstanceId, NodeId};
use cuesheet_graph::GraphTemplate;
use indexmap::IndexMap;
use tracing::{debug, trace, warn};

use crate::cursor::{Cursor, Phase, RuntimeNode};
use crate::pull::EngineScope;
use crate::stats::RuntimeStats;

/// One running play of a graph.
#[derive(Debug)]
struct Instance {
    graph: Arc<GraphTemplate>,
    /// Live branch count; the instance is removed when it reaches zero.
    branches: u32,
    /// Completed node instances, kept for the pull protocol. Keyed by
    /// template id; re-executing a node overwrites the earlier copy.
    visited: IndexMap<NodeId, RuntimeNode>,
}

/// Tick-driven executor for event graphs.
///
/// Single threaded: the host calls [`tick`](Self::tick) once per frame from
/// its main loop and uses [`play`](Self::play) / [`stop`](Self::stop)
/// between ticks. Templates are shared; each play instantiates its own node
/// copies.
#[derive(Debug)]
pub struct EventEngine {
    instances: IndexMap<InstanceId, Instance>,
    cursors: Vec<Cursor>,
    next_instance: InstanceId,
    paused: bool,
    frame: Frame,
    stats: RuntimeStats,
    /// Successor scratch buffer, reused across steps.
    scratch: Vec<NodeId>,
}

impl EventEngine {
    /// Create an idle engine
    #[must_use]
    pub fn new() -> Self {
        Self {
            instances: IndexMap::new(),
            cursors: Vec::new(),
            next_instance: InstanceId::first(),
            paused: false,
            frame: Frame::zero(),
            stats: RuntimeStats::new(),
            scratch: Vec::new(),
        }
    }

    /// Start a play of `graph` at its declared entry node.
    ///
    /// The entry cursor starts on the next tick, not immediately.
    ///
    /// # Errors
    ///
    /// Returns [`CueError::NotFound`] if the entry node is missing from the
    /// template, which cannot happen for templates sealed by the builder.
    pub fn play(&mut self, graph: Arc<GraphTemplate>) -> CueResult<InstanceId> {
        let entry = graph.entry();
        self.play_from(graph, entry)
    }

    /// Start a play of `graph` at an arbitrary node.
    ///
    /// # Errors
    ///
    /// Returns [`CueError::NotFound`] if `entry` is not a node of `graph`.
    pub fn play_from(
        &mut self,
        graph: Arc<GraphTemplate>,
        entry: NodeId,
    ) -> CueResult<InstanceId> {
        let template = graph.node(entry).ok_or_else(|| CueError::NotFound {
            kind: "Node".to_string(),
            id: entry.to_string(),
        })?;
        let node = RuntimeNode::new(template.instantiate());

        let id = self.next_instance;
        self.next_instance = id.next();

        self.cursors.push(Cursor::new(id, entry, node, self.frame));
        self.instances.insert(
            id,
            Instance {
                graph,
                branches: 1,
                visited: IndexMap::new(),
            },
        );
        self.stats.record_instance_started();
        debug!(instance = %id, entry = %entry, "play");
        Ok(id)
    }

    /// Whether a play (or, with `None`, any play) is still running
    #[must_use]
    pub fn is_playing(&self, id: Option<InstanceId>) -> bool {
        match id {
            Some(id) => self.instances.contains_key(&id),
            None => !self.instances.is_empty(),
        }
    }

    /// Stop a play immediately, removing every branch it owns.
    ///
    /// Non-cooperative: in-flight nodes are dropped without running `end`.
    /// Stopping an unknown or already finished instance is a no-op.
    pub fn stop(&mut self, id: InstanceId) {
        if self.instances.shift_remove(&id).is_some() {
            self.cursors.retain(|c| c.instance != id);
            self.stats.record_instance_cancelled();
            debug!(instance = %id, "stopped");
        }
    }

    /// Advance every running play by one frame.
    ///
    /// Does nothing while paused. Only cursors present when the tick began
    /// are stepped; cursors created by forks or completions this tick wait
    /// for the next one.
    pub fn tick(&mut self) {
        if self.paused {
            return;
        }
        self.frame.increment();

        let present = self.cursors.len();
        for idx in 0..present {
            self.step(idx);
        }
        self.cursors.retain(|c| !c.retired);
        self.stats.record_tick();
    }

    fn step(&mut self, idx: usize) {
        if self.cursors[idx].retired {
            return;
        }
        match self.cursors[idx].phase {
            Phase::Entered => self.step_entered(idx),
            Phase::Started => self.step_started(idx),
        }
    }

    /// First tick after arrival: run `start` and enter the update loop.
    fn step_entered(&mut self, idx: usize) {
        let Self {
            instances,
            cursors,
            frame,
            stats,
            ..
        } = self;

        let instance_id = cursors[idx].instance;
        let node_id = cursors[idx].node_id;
        let Some(mut node) = cursors[idx].node.take() else {
            return;
        };
        let Some(inst) = instances.get_mut(&instance_id) else {
            cursors[idx].node = Some(node);
            return;
        };
        let graph = Arc::clone(&inst.graph);

        {
            let mut scope = EngineScope {
                graph: &graph,
                instance: instance_id,
                node_id,
                frame: *frame,
                visited: &mut inst.visited,
                cursors: cursors.as_mut_slice(),
            };
            node.node_mut().start(&mut scope);
        }
        stats.record_node_started();
        trace!(instance = %instance_id, node = %node_id, "start");

        let cursor = &mut cursors[idx];
        cursor.node = Some(node);
        cursor.phase = Phase::Started;
        cursor.started_at = Some(*frame);
    }

    /// Update loop tick: run `update` and, when it reports completion, end
    /// the node and advance the cursor along its successors.
    fn step_started(&mut self, idx: usize) {
        let Self {
            instances,
            cursors,
            frame,
            stats,
            scratch,
            ..
        } = self;

        let instance_id = cursors[idx].instance;
        let node_id = cursors[idx].node_id;
        let Some(mut node) = cursors[idx].node.take() else {
            return;
        };
        let Some(inst) = instances.get_mut(&instance_id) else {
            cursors[idx].node = Some(node);
            return;
        };
        let graph = Arc::clone(&inst.graph);

        let finished = {
            let mut scope = EngineScope {
                graph: &graph,
                instance: instance_id,
                node_id,
                frame: *frame,
                visited: &mut inst.visited,
                cursors: cursors.as_mut_slice(),
            };
            node.node_mut().update(&mut scope)
        };
        if !finished {
            cursors[idx].node = Some(node);
            return;
        }

        // End may be a no-op here if a consumer already pulled this node.
        {
            let mut scope = EngineScope {
                graph: &graph,
                instance: instance_id,
                node_id,
                frame: *frame,
                visited: &mut inst.visited,
                cursors: cursors.as_mut_slice(),
            };
            node.fire_end(&mut scope);
        }
        stats.record_node_completed();
        trace!(instance = %instance_id, node = %node_id, "completed");

        scratch.clear();
        let edges = graph.node(node_id).map(|t| t.edges()).unwrap_or(&[]);
        node.node().next(edges, scratch);
        scratch.retain(|successor| {
            let known = graph.contains(*successor);
            if !known {
                warn!(instance = %instance_id, node = %node_id, successor = %successor,
                    "skipping successor missing from template");
            }
            known
        });

        inst.visited.insert(node_id, node);

        if scratch.is_empty() {
            cursors[idx].retired = true;
            stats.record_branch_retired();
            trace!(instance = %instance_id, node = %node_id, "branch retired");

            inst.branches -= 1;
            if inst.branches == 0 {
                instances.shift_remove(&instance_id);
                stats.record_instance_finished();
                debug!(instance = %instance_id, "finished");
            }
            return;
        }

        // First successor reuses this cursor's slot; the rest fork.
        let first = scratch[0];
        if let Some(template) = graph.node(first) {
            cursors[idx].reenter(first, RuntimeNode::new(template.instantiate()), *frame);
        }
        for &target in scratch.iter().skip(1) {
            if let Some(template) = graph.node(target) {
                cursors.push(Cursor::new(
                    instance_id,
                    target,
                    RuntimeNode::new(template.instantiate()),
                    *frame,
                ));
            }
        }
        if scratch.len() > 1 {
            inst.branches += (scratch.len() - 1) as u32;
            stats.record_fork();
            trace!(instance = %instance_id, node = %node_id,
                branches = scratch.len(), "fork");
        }
    }

    /// Freeze the scheduler; ticks become no-ops until [`resume`](Self::resume)
    pub fn pause(&mut self) {
        self.paused = true;
    }

    /// Unfreeze the scheduler
    pub fn resume(&mut self) {
        self.paused = false;
    }

    /// Whether the scheduler is paused
    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Current frame counter
    #[must_use]
    pub fn frame(&self) -> Frame {
        self.frame
    }

    /// Live branch count of a play, zero if it is not running
    #[must_use]
    pub fn branch_count(&self, id: InstanceId) -> u32 {
        self.instances.get(&id).map_or(0, |inst| inst.branches)
    }

    /// Number of running plays
    #[must_use]
    pub fn instance_count(&self) -> usize {
        self.instances.len()
    }

    /// Number of live cursors across all plays
    #[must_use]
    pub fn cursor_count(&self) -> usize {
        self.cursors.len()
    }

    /// Execution counters
    #[must_use]
    pub fn stats(&self) -> &RuntimeStats {
        &self.stats
    }

    /// Drop every play and reset the frame counter and counters
    pub fn reset(&mut self) {
        self.instances.clear();
        self.cursors.clear();
        self.next_instance = InstanceId::first();
        self.paused = false;
        self.frame = Frame::zero();
        self.stats.reset();
    }
}

impl Default for EventEngine {
    fn default() -> Self {
        Self::new()
    }
}
