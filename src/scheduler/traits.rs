/*!
 * Scheduler Traits
 * Interface definitions the presentation layer drives
 */

use super::types::{SchedulerPolicy, TimeQuantum};
use crate::core::types::{Pid, Ticks};
use crate::metrics::SchedulingMetrics;
use crate::process::scheduler::TickOutcome;
use crate::process::types::{ProcessDefinition, SchedulerResult};

/// Process table maintenance
pub trait ProcessTable {
    /// Register a new process in the Waiting state, returning its id
    fn add_process(&mut self, definition: ProcessDefinition) -> SchedulerResult<Pid>;

    /// Remove a process; unknown ids are a no-op returning false
    fn remove_process(&mut self, pid: Pid) -> bool;

    /// Drop every process and rewind the clock
    fn clear_all(&mut self);

    /// Rewind the clock and timing fields, keeping the process definitions
    fn reset_timing(&mut self);
}

/// Clock control
pub trait SchedulerControl {
    /// Advance simulated time by one tick
    fn tick(&mut self) -> TickOutcome;

    /// Current simulated time
    fn now(&self) -> Ticks;

    /// Process holding the CPU, if any
    fn running_pid(&self) -> Option<Pid>;
}

/// Scheduler policy management
pub trait SchedulerPolicyControl {
    fn set_policy(&mut self, policy: SchedulerPolicy);

    fn policy(&self) -> SchedulerPolicy;

    /// Set the Round Robin time slice; zero is rejected
    fn set_quantum(&mut self, ticks: u64) -> SchedulerResult<()>;

    fn quantum(&self) -> TimeQuantum;
}

/// Scheduler statistics
pub trait SchedulerStats {
    fn metrics(&self) -> SchedulingMetrics;
}

/// Combined scheduler interface
pub trait SchedulerSurface:
    ProcessTable + SchedulerControl + SchedulerPolicyControl + SchedulerStats
{
}

// Blanket implementation for any type that implements all component traits
impl<T> SchedulerSurface for T where
    T: ProcessTable + SchedulerControl + SchedulerPolicyControl + SchedulerStats
{
}
