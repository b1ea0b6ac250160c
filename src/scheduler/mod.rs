/*!
 * Scheduler Module
 * Scheduling policies, quantum configuration and selection functions
 */

pub mod selection;
pub mod traits;
pub mod types;

// Re-export public API
pub use selection::SelectionRules;
pub use traits::{
    ProcessTable, SchedulerControl, SchedulerPolicyControl, SchedulerStats, SchedulerSurface,
};
pub use types::{SchedulerPolicy, SchedulerPolicy as Policy, SjfMode, TimeQuantum};
