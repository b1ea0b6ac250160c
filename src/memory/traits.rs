/*!
 * Memory Traits
 * Allocator surface exposed to the presentation layer
 */

use super::types::*;
use crate::core::types::{RequestId, Size};
use crate::metrics::AllocationMetrics;

/// Memory allocator interface
pub trait Allocator {
    /// Allocate memory for a named requester
    fn allocate(&mut self, name: &str, size: Size) -> MemoryResult<Allocation>;

    /// Release a request's block; unknown requests are a no-op returning false
    fn deallocate(&mut self, request_id: RequestId) -> bool;
}

/// Allocator configuration
pub trait MemoryControl {
    /// Replace all memory with one free block of `capacity`
    fn reset_memory(&mut self, capacity: Size) -> MemoryResult<()>;

    fn set_policy(&mut self, policy: AllocationPolicy);

    fn policy(&self) -> AllocationPolicy;
}

/// Memory statistics provider
pub trait MemoryInfo {
    /// Blocks in start-address order
    fn blocks(&self) -> &[MemoryBlock];

    fn requests(&self) -> &[AllocationRequest];

    fn metrics(&self) -> AllocationMetrics;
}

/// Combined allocator interface
pub trait MemorySurface: Allocator + MemoryControl + MemoryInfo {}

impl<T> MemorySurface for T where T: Allocator + MemoryControl + MemoryInfo {}

impl Allocator for super::MemoryManager {
    fn allocate(&mut self, name: &str, size: Size) -> MemoryResult<Allocation> {
        super::MemoryManager::allocate(self, name, size)
    }

    fn deallocate(&mut self, request_id: RequestId) -> bool {
        super::MemoryManager::deallocate(self, request_id)
    }
}

impl MemoryControl for super::MemoryManager {
    fn reset_memory(&mut self, capacity: Size) -> MemoryResult<()> {
        super::MemoryManager::reset_memory(self, capacity)
    }

    fn set_policy(&mut self, policy: AllocationPolicy) {
        super::MemoryManager::set_policy(self, policy)
    }

    fn policy(&self) -> AllocationPolicy {
        super::MemoryManager::policy(self)
    }
}

impl MemoryInfo for super::MemoryManager {
    fn blocks(&self) -> &[MemoryBlock] {
        super::MemoryManager::blocks(self)
    }

    fn requests(&self) -> &[AllocationRequest] {
        super::MemoryManager::requests(self)
    }

    fn metrics(&self) -> AllocationMetrics {
        super::MemoryManager::metrics(self)
    }
}
