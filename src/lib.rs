/*!
 * OS Simulation Kernel
 * Tick-driven CPU scheduler and contiguous memory allocator exposed as a library
 */

pub mod core;
pub mod memory;
pub mod metrics;
pub mod monitoring;
pub mod process;
pub mod scheduler;

// Re-exports
pub use core::{ConfigError, ErrorKind, SchedulerError, SimConfig};
pub use memory::{
    Allocation, AllocationPolicy, AllocationRequest, Allocator, MemoryBlock, MemoryError,
    MemoryManager, MemoryResult,
};
pub use metrics::{
    AllocationMetrics, PerformanceRating, SchedulingAnalysis, SchedulingMetrics, Suggestion,
};
pub use monitoring::{init_tracing, span_run};
pub use process::{Process, ProcessDefinition, ProcessState, Scheduler, SchedulerResult, TickOutcome};
pub use scheduler::{SchedulerPolicy, SchedulerPolicy as Policy, SjfMode, TimeQuantum};
