/*!
 * Memory Management
 *
 * Contiguous allocator over a fixed simulated address space.
 *
 * ## Model
 *
 * - Memory is an ordered list of blocks tiling `[0, capacity)` with no gaps
 *   or overlaps. Reset leaves a single free block.
 * - **Fit selection**: First-Fit, Best-Fit or Worst-Fit over free blocks.
 * - **Block splitting**: the chosen block becomes an allocated prefix plus
 *   an optional free remainder right after it.
 * - **Coalescing**: every release merges adjacent free neighbours.
 * - **Request log**: each attempt past validation is recorded, successful
 *   or not; releasing a request removes its entry.
 */

mod allocator;
mod free_list;
mod stats;

pub use free_list::{coalesce_free_blocks, verify_partition};

use super::types::{
    AllocationPolicy, AllocationRequest, MemoryBlock, MemoryError, MemoryResult,
};
use crate::core::config::SimConfig;
use crate::core::types::{BlockId, RequestId, Size};
use tracing::info;

/// Default simulated memory size
pub const DEFAULT_CAPACITY: Size = 1024;

/// Memory manager
#[derive(Debug, Clone)]
pub struct MemoryManager {
    pub(super) capacity: Size,
    // Always sorted by start address
    pub(super) blocks: Vec<MemoryBlock>,
    pub(super) requests: Vec<AllocationRequest>,
    pub(super) policy: AllocationPolicy,
    pub(super) next_block_id: BlockId,
    pub(super) next_request_id: RequestId,
}

impl MemoryManager {
    pub fn new() -> Self {
        Self::fresh(DEFAULT_CAPACITY)
    }

    /// Create memory manager with custom capacity
    pub fn with_capacity(total: Size) -> MemoryResult<Self> {
        if total == 0 {
            return Err(MemoryError::InvalidCapacity);
        }
        Ok(Self::fresh(total))
    }

    pub fn from_config(config: &SimConfig) -> MemoryResult<Self> {
        Ok(Self::with_capacity(config.memory_capacity)?.with_policy(config.allocation_policy))
    }

    pub fn with_policy(mut self, policy: AllocationPolicy) -> Self {
        self.policy = policy;
        self
    }

    fn fresh(total: Size) -> Self {
        info!(capacity = total, "Memory manager initialized");
        Self {
            capacity: total,
            blocks: vec![MemoryBlock::free(1, 0, total)],
            requests: Vec::new(),
            policy: AllocationPolicy::default(),
            next_block_id: 2,
            next_request_id: 1,
        }
    }

    /// Discard every block and request, leaving one free block of `capacity`
    pub fn reset_memory(&mut self, capacity: Size) -> MemoryResult<()> {
        if capacity == 0 {
            return Err(MemoryError::InvalidCapacity);
        }

        let policy = self.policy;
        *self = Self::fresh(capacity);
        self.policy = policy;
        Ok(())
    }

    /// Change the fit strategy used by subsequent allocations
    pub fn set_policy(&mut self, policy: AllocationPolicy) {
        if policy != self.policy {
            info!(from = %self.policy, to = %policy, "Changing allocation policy");
            self.policy = policy;
        }
    }

    pub fn policy(&self) -> AllocationPolicy {
        self.policy
    }

    pub fn capacity(&self) -> Size {
        self.capacity
    }

    /// Blocks in start-address order
    pub fn blocks(&self) -> &[MemoryBlock] {
        &self.blocks
    }

    pub fn block(&self, id: BlockId) -> Option<&MemoryBlock> {
        self.blocks.iter().find(|b| b.id == id)
    }

    pub fn free_blocks(&self) -> impl Iterator<Item = &MemoryBlock> {
        self.blocks.iter().filter(|b| b.is_free())
    }

    /// Allocation log, oldest first
    pub fn requests(&self) -> &[AllocationRequest] {
        &self.requests
    }

    /// Check the partition invariant over the current block list
    pub fn verify_partition(&self) -> MemoryResult<()> {
        verify_partition(&self.blocks, self.capacity)
    }

    /// Reset and replay the demo workload (System, Browser, Editor, Player) with First-Fit
    pub fn load_example_requests(&mut self) -> MemoryResult<()> {
        const EXAMPLE: [(&str, Size); 4] =
            [("System", 128), ("Browser", 256), ("Editor", 64), ("Player", 192)];

        let policy = self.policy;
        self.reset_memory(self.capacity)?;
        self.policy = AllocationPolicy::FirstFit;

        let mut result = Ok(());
        for (name, size) in EXAMPLE {
            if let Err(e) = self.allocate(name, size) {
                result = Err(e);
                break;
            }
        }

        self.policy = policy;
        result
    }
}

impl Default for MemoryManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_manager_initialization() {
        let mem = MemoryManager::new();
        assert_eq!(mem.capacity(), 1024);
        assert_eq!(mem.blocks(), [MemoryBlock::free(1, 0, 1024)]);
        assert!(mem.requests().is_empty());
    }

    #[test]
    fn test_zero_capacity_rejected() {
        assert_eq!(MemoryManager::with_capacity(0).unwrap_err(), MemoryError::InvalidCapacity);

        let mut mem = MemoryManager::new();
        assert!(mem.reset_memory(0).is_err());
        assert_eq!(mem.capacity(), 1024);
    }

    #[test]
    fn test_reset_keeps_policy() {
        let mut mem = MemoryManager::new().with_policy(AllocationPolicy::BestFit);
        mem.allocate("A", 100).unwrap();
        mem.reset_memory(2048).unwrap();

        assert_eq!(mem.policy(), AllocationPolicy::BestFit);
        assert_eq!(mem.blocks(), [MemoryBlock::free(1, 0, 2048)]);
        assert!(mem.requests().is_empty());
    }

    #[test]
    fn test_example_requests() {
        let mut mem = MemoryManager::new().with_policy(AllocationPolicy::WorstFit);
        mem.load_example_requests().unwrap();

        let layout: Vec<_> = mem.blocks().iter().map(|b| (b.start, b.size, b.allocated)).collect();
        assert_eq!(
            layout,
            [(0, 128, true), (128, 256, true), (384, 64, true), (448, 192, true), (640, 384, false)]
        );
        assert_eq!(mem.requests().len(), 4);
        assert_eq!(mem.policy(), AllocationPolicy::WorstFit);
    }
}
