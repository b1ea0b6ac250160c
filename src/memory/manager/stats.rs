/*!
 * Memory Statistics
 */

use super::MemoryManager;
use crate::core::types::Size;
use crate::metrics::AllocationMetrics;

impl MemoryManager {
    /// Snapshot metrics over the current blocks and request log
    pub fn metrics(&self) -> AllocationMetrics {
        AllocationMetrics::compute(&self.blocks, &self.requests, self.capacity)
    }

    /// Get memory info as (total, used, available)
    pub fn info(&self) -> (Size, Size, Size) {
        let used: Size = self
            .blocks
            .iter()
            .filter(|b| b.allocated)
            .map(|b| b.size)
            .sum();
        (self.capacity, used, self.capacity - used)
    }
}
