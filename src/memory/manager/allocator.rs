/*!
 * Memory Allocator Implementation
 * Allocation and deallocation logic
 */

use super::super::types::{
    Allocation, AllocationRequest, BlockOwner, MemoryBlock, MemoryError, MemoryResult,
};
use super::free_list::coalesce_free_blocks;
use super::MemoryManager;
use crate::core::types::{RequestId, Size};
use tracing::{debug, info, warn};

impl MemoryManager {
    fn validate_request(&self, name: &str, size: Size) -> MemoryResult<()> {
        if name.trim().is_empty() {
            return Err(MemoryError::InvalidName);
        }
        if size == 0 {
            return Err(MemoryError::InvalidSize { size });
        }
        if size > self.capacity {
            return Err(MemoryError::ExceedsCapacity {
                requested: size,
                capacity: self.capacity,
            });
        }
        Ok(())
    }

    /// Allocate `size` bytes for `name` using the active fit policy
    ///
    /// Validation failures leave no trace. A request that passes validation
    /// is always logged, with `allocated = false` when no block fits.
    pub fn allocate(&mut self, name: &str, size: Size) -> MemoryResult<Allocation> {
        if let Err(e) = self.validate_request(name, size) {
            warn!(name, size, reason = e.reason(), "Rejected allocation request");
            return Err(e);
        }

        let request_id = self.next_request_id;
        self.next_request_id += 1;

        let Some(idx) = self.policy.choose(&self.blocks, size) else {
            self.requests.push(AllocationRequest {
                id: request_id,
                process_name: name.to_string(),
                size,
                allocated: false,
                block_id: None,
            });
            warn!(
                name,
                size,
                request_id,
                policy = %self.policy,
                "Allocation failed: no block large enough"
            );
            return Err(MemoryError::NoBlockLargeEnough {
                requested: size,
                request_id,
            });
        };

        let chosen = &self.blocks[idx];
        let (start, chosen_size) = (chosen.start, chosen.size);

        let block_id = self.next_block_id;
        self.next_block_id += 1;
        let owner = BlockOwner {
            request_id,
            name: name.to_string(),
        };
        self.blocks[idx] = MemoryBlock::allocated(block_id, start, size, owner);

        // Split: leftover space becomes a free block right after the allocation
        if chosen_size > size {
            let remainder_id = self.next_block_id;
            self.next_block_id += 1;
            self.blocks.insert(
                idx + 1,
                MemoryBlock::free(remainder_id, start + size, chosen_size - size),
            );
            debug!(
                block_id,
                remainder_id,
                kept = size,
                remainder = chosen_size - size,
                "Split block"
            );
        }

        self.requests.push(AllocationRequest {
            id: request_id,
            process_name: name.to_string(),
            size,
            allocated: true,
            block_id: Some(block_id),
        });

        debug_assert!(self.verify_partition().is_ok(), "{:?}", self.verify_partition());
        info!(
            name,
            size,
            request_id,
            block_id,
            start,
            policy = %self.policy,
            "Allocated block"
        );

        Ok(Allocation {
            request_id,
            block_id,
            start,
            size,
        })
    }

    /// Release the block held by `request_id` and coalesce free neighbours
    ///
    /// Unknown, failed or already released requests are a no-op and return
    /// `false`.
    pub fn deallocate(&mut self, request_id: RequestId) -> bool {
        let Some(pos) = self
            .requests
            .iter()
            .position(|r| r.id == request_id && r.allocated)
        else {
            warn!(request_id, "Deallocate ignored: no live allocation for request");
            return false;
        };

        let Some(block) = self
            .blocks
            .iter_mut()
            .find(|b| b.allocated && b.owned_by(request_id))
        else {
            warn!(request_id, "Allocated request has no owning block");
            return false;
        };

        let (block_id, size) = (block.id, block.size);
        block.release();

        let merged = coalesce_free_blocks(&mut self.blocks);
        let request = self.requests.remove(pos);

        debug_assert!(self.verify_partition().is_ok(), "{:?}", self.verify_partition());
        info!(
            request_id,
            name = %request.process_name,
            block_id,
            size,
            merged,
            "Deallocated block"
        );
        true
    }
}
