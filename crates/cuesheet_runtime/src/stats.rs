//! Runtime counters for observability.
//!
//! Monotonic counters only; live gauges (cursor and instance counts) come
//! from the engine itself.

/// Runtime execution counters
#[derive(Debug, Clone, Default)]
pub struct RuntimeStats {
    /// Ticks executed (paused frames do not count)
    pub ticks: u64,
    /// Node instances that ran `start`
    pub nodes_started: u64,
    /// Node instances that finished their update loop
    pub nodes_completed: u64,
    /// Fork events (a node emitting two or more successors)
    pub forks: u64,
    /// Branches that terminated by emitting zero successors
    pub branches_retired: u64,
    /// Instances created by `play`
    pub instances_started: u64,
    /// Instances that finished by running out of branches
    pub instances_finished: u64,
    /// Instances removed by `stop`
    pub instances_cancelled: u64,
}

impl RuntimeStats {
    /// Create zeroed counters
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a scheduler tick
    pub fn record_tick(&mut self) {
        self.ticks += 1;
    }

    /// Record a node `start`
    pub fn record_node_started(&mut self) {
        self.nodes_started += 1;
    }

    /// Record a node `end`
    pub fn record_node_completed(&mut self) {
        self.nodes_completed += 1;
    }

    /// Record a fork
    pub fn record_fork(&mut self) {
        self.forks += 1;
    }

    /// Record a branch termination
    pub fn record_branch_retired(&mut self) {
        self.branches_retired += 1;
    }

    /// Record an instance created by `play`
    pub fn record_instance_started(&mut self) {
        self.instances_started += 1;
    }

    /// Record an instance finishing normally
    pub fn record_instance_finished(&mut self) {
        self.instances_finished += 1;
    }

    /// Record an instance cancelled by `stop`
    pub fn record_instance_cancelled(&mut self) {
        self.instances_cancelled += 1;
    }

    /// Reset all counters
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
