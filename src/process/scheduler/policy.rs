/*!
 * Scheduler Policy Management
 * Handle dynamic policy and quantum changes
 */

use super::Scheduler;
use crate::process::types::SchedulerResult;
use crate::scheduler::{SchedulerPolicy, TimeQuantum};
use tracing::{info, warn};

impl Scheduler {
    /// Change scheduling policy
    ///
    /// Processes keep their state; the next tick selects under the new policy.
    pub fn set_policy(&mut self, new_policy: SchedulerPolicy) {
        if new_policy == self.policy {
            return;
        }

        info!(from = %self.policy, to = %new_policy, "Changing scheduler policy");
        self.policy = new_policy;
        self.slice_used = 0;
    }

    /// Set Round Robin time quantum
    pub fn set_quantum(&mut self, ticks: u64) -> SchedulerResult<()> {
        let quantum = TimeQuantum::new(ticks).inspect_err(|e| {
            warn!(ticks, error = %e, "Rejected time quantum");
        })?;

        self.quantum = quantum;
        self.slice_used = 0;
        info!(ticks, "Time quantum updated");
        Ok(())
    }

    /// Get current scheduling policy
    pub fn policy(&self) -> SchedulerPolicy {
        self.policy
    }

    pub fn quantum(&self) -> TimeQuantum {
        self.quantum
    }
}
