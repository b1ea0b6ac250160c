/*!
 * Process Types
 * Common types for process scheduling
 */

use crate::core::errors::SchedulerError;
use crate::core::types::{Pid, Priority, Ticks};
use serde::{Deserialize, Serialize};

/// Process operation result
pub type SchedulerResult<T> = Result<T, SchedulerError>;

/// Process state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProcessState {
    /// Arrived (or not yet arrived) and not holding the CPU
    Waiting,
    /// Holding the CPU for the current tick
    Running,
    /// Finished; timing fields are frozen
    Completed,
}

/// Caller-supplied process definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessDefinition {
    pub name: String,
    pub arrival_time: Ticks,
    pub burst_time: Ticks,
    pub priority: Priority,
}

impl ProcessDefinition {
    pub fn new(name: impl Into<String>, arrival_time: Ticks, burst_time: Ticks, priority: Priority) -> Self {
        Self {
            name: name.into(),
            arrival_time,
            burst_time,
            priority,
        }
    }

    /// Reject definitions that could never be scheduled
    pub fn validate(&self) -> SchedulerResult<()> {
        if self.name.trim().is_empty() {
            return Err(SchedulerError::InvalidName);
        }
        if self.burst_time == 0 {
            return Err(SchedulerError::InvalidBurstTime);
        }
        Ok(())
    }

    /// The classic four-process teaching workload
    pub fn example_set() -> Vec<ProcessDefinition> {
        vec![
            Self::new("P1", 0, 8, 3),
            Self::new("P2", 1, 4, 1),
            Self::new("P3", 2, 9, 4),
            Self::new("P4", 3, 5, 2),
        ]
    }
}

/// Simulated process with live timing state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Process {
    pub id: Pid,
    pub name: String,
    pub arrival_time: Ticks,
    pub burst_time: Ticks,
    pub priority: Priority,
    pub remaining_time: Ticks,
    pub waiting_time: Ticks,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub turnaround_time: Option<Ticks>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completion_time: Option<Ticks>,
    pub state: ProcessState,
}

impl Process {
    pub fn new(id: Pid, definition: ProcessDefinition) -> Self {
        Self {
            id,
            name: definition.name,
            arrival_time: definition.arrival_time,
            burst_time: definition.burst_time,
            priority: definition.priority,
            remaining_time: definition.burst_time,
            waiting_time: 0,
            turnaround_time: None,
            completion_time: None,
            state: ProcessState::Waiting,
        }
    }

    /// Restore timing fields, keeping identity and definition
    pub fn reset_timing(&mut self) {
        self.remaining_time = self.burst_time;
        self.waiting_time = 0;
        self.turnaround_time = None;
        self.completion_time = None;
        self.state = ProcessState::Waiting;
    }

    /// Arrived by `now` and not yet completed
    #[inline]
    pub fn is_eligible(&self, now: Ticks) -> bool {
        self.arrival_time <= now && self.state != ProcessState::Completed
    }

    #[inline]
    pub fn is_completed(&self) -> bool {
        self.state == ProcessState::Completed
    }

    /// Freeze completion timing. Called exactly once, when remaining time hits zero.
    pub(crate) fn complete(&mut self, now: Ticks) {
        debug_assert_eq!(self.remaining_time, 0, "process {} completed with work left", self.id);
        debug_assert!(now >= self.arrival_time + self.burst_time);

        let turnaround = now - self.arrival_time;
        self.state = ProcessState::Completed;
        self.completion_time = Some(now);
        self.turnaround_time = Some(turnaround);
        self.waiting_time = turnaround - self.burst_time;
    }

    pub fn definition(&self) -> ProcessDefinition {
        ProcessDefinition::new(self.name.clone(), self.arrival_time, self.burst_time, self.priority)
    }
}
