/*!
 * CPU Scheduler
 * Deterministic, step-wise scheduling engine driven one tick at a time
 */

use super::types::{Process, ProcessDefinition, SchedulerResult};
use crate::core::config::SimConfig;
use crate::core::types::{Pid, Ticks};
use crate::metrics::SchedulingMetrics;
use crate::scheduler::{
    ProcessTable, SchedulerControl, SchedulerPolicy, SchedulerPolicyControl, SchedulerStats,
    SjfMode, TimeQuantum,
};
use serde::{Deserialize, Serialize};
use tracing::info;

mod operations;
mod policy;
mod stats;

/// What happened during a single tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickOutcome {
    /// Clock value after the tick
    pub time: Ticks,
    /// Process that held the CPU for this tick
    pub ran: Option<Pid>,
    /// Process that finished during this tick
    pub completed: Option<Pid>,
    /// Round Robin slice expired and the process was sent back to Waiting
    pub preempted: bool,
}

impl TickOutcome {
    fn idle(time: Ticks) -> Self {
        Self {
            time,
            ran: None,
            completed: None,
            preempted: false,
        }
    }

    #[inline]
    pub fn is_idle(&self) -> bool {
        self.ran.is_none()
    }
}

/// CPU Scheduler
///
/// Owns the process table and the simulated clock. Every public mutation
/// either validates and commits fully or is rejected before touching state,
/// so callers only need to serialize their calls.
#[derive(Debug, Clone)]
pub struct Scheduler {
    processes: Vec<Process>,
    clock: Ticks,
    policy: SchedulerPolicy,
    quantum: TimeQuantum,
    sjf_mode: SjfMode,

    // Ticks the running process has used of its Round Robin slice
    slice_used: u64,

    next_pid: Pid,
}

impl Scheduler {
    /// Create new scheduler with policy
    pub fn new(policy: SchedulerPolicy) -> Self {
        Self::with_quantum(policy, TimeQuantum::default())
    }

    /// Create scheduler with custom quantum
    pub fn with_quantum(policy: SchedulerPolicy, quantum: TimeQuantum) -> Self {
        info!(policy = %policy, quantum = quantum.ticks(), "Scheduler initialized");

        Self {
            processes: Vec::new(),
            clock: 0,
            policy,
            quantum,
            sjf_mode: SjfMode::default(),
            slice_used: 0,
            next_pid: 1,
        }
    }

    /// Scheduler with policy, quantum and SJF mode taken from `config`
    pub fn from_config(config: &SimConfig) -> Self {
        Self::with_quantum(config.scheduler_policy, config.quantum).with_sjf_mode(config.sjf_mode)
    }

    /// Fix the shortest-job-first preemption rule for this instance
    pub fn with_sjf_mode(mut self, mode: SjfMode) -> Self {
        self.sjf_mode = mode;
        self
    }

    pub fn sjf_mode(&self) -> SjfMode {
        self.sjf_mode
    }

    /// Replace the process table with the four-process demo workload
    pub fn load_example_set(&mut self) -> Vec<Pid> {
        self.clear_all();
        ProcessDefinition::example_set()
            .into_iter()
            .map(|definition| self.insert(definition))
            .collect()
    }
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new(SchedulerPolicy::default())
    }
}

impl ProcessTable for Scheduler {
    fn add_process(&mut self, definition: ProcessDefinition) -> SchedulerResult<Pid> {
        Scheduler::add_process(self, definition)
    }

    fn remove_process(&mut self, pid: Pid) -> bool {
        Scheduler::remove_process(self, pid)
    }

    fn clear_all(&mut self) {
        Scheduler::clear_all(self)
    }

    fn reset_timing(&mut self) {
        Scheduler::reset_timing(self)
    }
}

impl SchedulerControl for Scheduler {
    fn tick(&mut self) -> TickOutcome {
        Scheduler::tick(self)
    }

    fn now(&self) -> Ticks {
        Scheduler::now(self)
    }

    fn running_pid(&self) -> Option<Pid> {
        self.running().map(|p| p.id)
    }
}

impl SchedulerPolicyControl for Scheduler {
    fn set_policy(&mut self, policy: SchedulerPolicy) {
        Scheduler::set_policy(self, policy)
    }

    fn policy(&self) -> SchedulerPolicy {
        Scheduler::policy(self)
    }

    fn set_quantum(&mut self, ticks: u64) -> SchedulerResult<()> {
        Scheduler::set_quantum(self, ticks)
    }

    fn quantum(&self) -> TimeQuantum {
        Scheduler::quantum(self)
    }
}

impl SchedulerStats for Scheduler {
    fn metrics(&self) -> SchedulingMetrics {
        Scheduler::metrics(self)
    }
}
