/*!
 * Scheduler Statistics
 */

use super::Scheduler;
use crate::metrics::SchedulingMetrics;

impl Scheduler {
    /// Snapshot metrics over the current process table
    pub fn metrics(&self) -> SchedulingMetrics {
        SchedulingMetrics::from_processes(&self.processes)
    }
}
