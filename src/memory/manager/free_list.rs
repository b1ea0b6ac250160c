/*!
 * Free Block Management
 * Fit selection, coalescing and partition checking over the block list
 */

use super::super::types::{AllocationPolicy, MemoryBlock, MemoryError, MemoryResult};
use crate::core::types::Size;
use std::cmp::Reverse;
use std::collections::HashSet;

impl AllocationPolicy {
    /// Choose a free block for `size` bytes
    ///
    /// `blocks` must be in start-address order. Returns the index of the
    /// chosen block; ties resolve to the lowest start address.
    pub fn choose(&self, blocks: &[MemoryBlock], size: Size) -> Option<usize> {
        let mut candidates = blocks
            .iter()
            .enumerate()
            .filter(|(_, b)| b.is_free() && b.size >= size);

        let chosen = match self {
            Self::FirstFit => candidates.next(),
            Self::BestFit => candidates.min_by_key(|(_, b)| (b.size, b.start)),
            Self::WorstFit => candidates.max_by_key(|(_, b)| (b.size, Reverse(b.start))),
        };

        chosen.map(|(idx, _)| idx)
    }
}

/// Merge every run of adjacent free blocks
///
/// Blocks are first put in start-address order, so the result does not
/// depend on the input order. The leftmost block of a run keeps its id and
/// absorbs the sizes of the rest.
pub fn coalesce_free_blocks(blocks: &mut Vec<MemoryBlock>) -> usize {
    blocks.sort_by_key(|b| b.start);

    let before = blocks.len();
    let mut merged: Vec<MemoryBlock> = Vec::with_capacity(before);

    for block in blocks.drain(..) {
        match merged.last_mut() {
            Some(last) if last.is_free() && block.is_free() && last.end() == block.start => {
                last.size += block.size;
            }
            _ => merged.push(block),
        }
    }

    *blocks = merged;
    before - blocks.len()
}

/// Check that `blocks` tile `[0, capacity)` exactly, in start order
pub fn verify_partition(blocks: &[MemoryBlock], capacity: Size) -> MemoryResult<()> {
    let violation = |msg: String| Err(MemoryError::PartitionViolation(msg));

    let mut cursor = 0;
    let mut ids = HashSet::with_capacity(blocks.len());

    for block in blocks {
        if block.start != cursor {
            return violation(format!(
                "block {} starts at {} but previous block ends at {}",
                block.id, block.start, cursor
            ));
        }
        if block.size == 0 {
            return violation(format!("block {} is empty", block.id));
        }
        if block.allocated != block.owner.is_some() {
            return violation(format!("block {} owner does not match allocation flag", block.id));
        }
        if !ids.insert(block.id) {
            return violation(format!("duplicate block id {}", block.id));
        }
        cursor = block.end();
    }

    if cursor != capacity {
        return violation(format!("blocks cover {} of {} bytes", cursor, capacity));
    }
    Ok(())
}
