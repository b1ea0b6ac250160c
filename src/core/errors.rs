/*!
 * Error Types
 * Centralized error handling with thiserror, miette, and serde support
 */

use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

// Re-export MemoryError from memory module
pub use crate::memory::MemoryError;

/// Broad classification shared by every engine error
///
/// None of these are fatal: a validation failure is rejected before any
/// state is touched, and resource exhaustion is an ordinary negative result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Bad caller input (size, name, quantum, policy)
    Validation,
    /// No block large enough / nothing eligible
    ResourceExhausted,
    /// Internal bookkeeping no longer satisfies its invariants
    Corruption,
}

/// Scheduler-related errors with serialization support
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum SchedulerError {
    #[error("Invalid quantum: {0} (must be at least 1 tick)")]
    #[diagnostic(
        code(scheduler::invalid_quantum),
        help("Round Robin needs a time slice of one tick or more.")
    )]
    InvalidQuantum(u64),

    #[error("Invalid burst time: a process needs at least 1 tick of CPU")]
    #[diagnostic(
        code(scheduler::invalid_burst_time),
        help("Burst time is the total CPU demand and must be positive.")
    )]
    InvalidBurstTime,

    #[error("Invalid process name: name must not be blank")]
    #[diagnostic(code(scheduler::invalid_name), help("Give the process a visible name such as P1."))]
    InvalidName,

    #[error("Invalid scheduling policy '{0}'. Valid: fcfs, round_robin, priority, sjf")]
    #[diagnostic(
        code(scheduler::invalid_policy),
        help("Use FCFS, RoundRobin, Priority or SJF scheduling policy.")
    )]
    InvalidPolicy(String),

    #[error("Invalid SJF mode '{0}'. Valid: preemptive, non_preemptive")]
    #[diagnostic(code(scheduler::invalid_sjf_mode))]
    InvalidSjfMode(String),
}

impl SchedulerError {
    /// Every scheduler error is a caller-correctable validation problem
    pub const fn kind(&self) -> ErrorKind {
        ErrorKind::Validation
    }
}

/// Configuration loading errors
#[derive(Error, Debug, Diagnostic)]
pub enum ConfigError {
    #[error("Invalid value '{value}' for {key}: {reason}")]
    #[diagnostic(code(config::invalid_value))]
    InvalidValue {
        key: &'static str,
        value: String,
        reason: String,
    },

    #[error("Malformed configuration document: {0}")]
    #[diagnostic(code(config::malformed), help("Expected a JSON object with SimConfig fields."))]
    Malformed(#[from] serde_json::Error),

    #[error(transparent)]
    #[diagnostic(code(config::scheduler))]
    Scheduler(#[from] SchedulerError),

    #[error(transparent)]
    #[diagnostic(code(config::memory))]
    Memory(#[from] MemoryError),
}

pub type ConfigResult<T> = Result<T, ConfigError>;
