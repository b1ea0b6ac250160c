/*!
 * Process Module
 * Process model, live scheduling engine and batch reference schedulers
 */

pub mod batch;
pub mod scheduler;
pub mod types;

pub use scheduler::{Scheduler, TickOutcome};
pub use types::{Process, ProcessDefinition, ProcessState, SchedulerResult};
