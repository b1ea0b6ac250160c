/*!
 * Allocation Metrics
 * Utilization, fragmentation and request statistics for the allocator
 */

use super::percentage;
use crate::core::types::{round2, Size};
use crate::memory::types::{AllocationRequest, MemoryBlock};
use serde::{Deserialize, Serialize};
use std::fmt;

/// External fragmentation as a percentage of free memory
///
/// `(free - largest) / free * 100`, or 0 when nothing is free.
pub fn external_fragmentation(total_free: Size, largest_free: Size) -> f64 {
    percentage(total_free.saturating_sub(largest_free) as f64, total_free as f64)
}

/// Population variance (divides by `n`), 0 for an empty sample
pub fn population_variance(samples: &[f64]) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }
    let n = samples.len() as f64;
    let mean = samples.iter().sum::<f64>() / n;
    samples.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n
}

/// Overall allocator health band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PerformanceRating {
    Excellent,
    Good,
    Fair,
    NeedsImprovement,
}

impl PerformanceRating {
    pub fn from_score(score: f64) -> Self {
        match score {
            s if s >= 80.0 => Self::Excellent,
            s if s >= 60.0 => Self::Good,
            s if s >= 40.0 => Self::Fair,
            _ => Self::NeedsImprovement,
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Excellent => "excellent",
            Self::Good => "good",
            Self::Fair => "fair",
            Self::NeedsImprovement => "needs_improvement",
        }
    }
}

impl fmt::Display for PerformanceRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How urgently a [`Suggestion`] should be shown
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionLevel {
    Hint,
    Advice,
    Warning,
}

/// Tuning advice derived from an allocator snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Suggestion {
    /// Success rate below 80%
    LowSuccessRate,
    /// External fragmentation above 50%
    SevereFragmentation,
    /// Utilization below 50% with at least one request logged
    LowUtilization,
    /// More than 5 free blocks
    TooManyFreeBlocks,
}

impl Suggestion {
    pub const LOW_SUCCESS_RATE: f64 = 80.0;
    pub const SEVERE_FRAGMENTATION: f64 = 50.0;
    pub const LOW_UTILIZATION: f64 = 50.0;
    pub const MAX_FREE_BLOCKS: usize = 5;

    pub const fn level(&self) -> SuggestionLevel {
        match self {
            Self::SevereFragmentation => SuggestionLevel::Warning,
            Self::LowSuccessRate | Self::TooManyFreeBlocks => SuggestionLevel::Advice,
            Self::LowUtilization => SuggestionLevel::Hint,
        }
    }

    pub const fn message(&self) -> &'static str {
        match self {
            Self::LowSuccessRate => {
                "allocation success rate is low; try another fit policy or more memory"
            }
            Self::SevereFragmentation => {
                "external fragmentation is severe; compact memory or move to paging"
            }
            Self::LowUtilization => "memory utilization is low; shrink memory or add processes",
            Self::TooManyFreeBlocks => "too many free blocks; memory is splintering",
        }
    }
}

impl fmt::Display for Suggestion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Allocator snapshot
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AllocationMetrics {
    // Request log
    pub total_requests: usize,
    pub successful_allocations: usize,
    pub failed_allocations: usize,
    pub success_rate: f64,

    // Occupancy
    pub capacity: Size,
    pub allocated_bytes: Size,
    pub free_bytes: Size,
    pub memory_utilization: f64,

    // Free space shape
    pub free_block_count: usize,
    pub largest_free_block: Size,
    pub average_free_block_size: f64,
    pub external_fragmentation: f64,

    // Allocated block sizes
    pub allocated_block_count: usize,
    pub average_allocation_size: f64,
    pub smallest_allocation: Size,
    pub largest_allocation: Size,
    pub allocation_variance: f64,
}

impl AllocationMetrics {
    pub fn compute(blocks: &[MemoryBlock], requests: &[AllocationRequest], capacity: Size) -> Self {
        let total_requests = requests.len();
        let successful_allocations = requests.iter().filter(|r| r.allocated).count();

        let (free, used): (Vec<&MemoryBlock>, Vec<&MemoryBlock>) =
            blocks.iter().partition(|b| b.is_free());

        let free_bytes: Size = free.iter().map(|b| b.size).sum();
        let allocated_bytes: Size = used.iter().map(|b| b.size).sum();
        let largest_free_block = free.iter().map(|b| b.size).max().unwrap_or(0);

        let sizes: Vec<f64> = used.iter().map(|b| b.size as f64).collect();
        let average_allocation_size = if sizes.is_empty() {
            0.0
        } else {
            allocated_bytes as f64 / sizes.len() as f64
        };

        Self {
            total_requests,
            successful_allocations,
            failed_allocations: total_requests - successful_allocations,
            success_rate: percentage(successful_allocations as f64, total_requests as f64),
            capacity,
            allocated_bytes,
            free_bytes,
            memory_utilization: percentage(allocated_bytes as f64, capacity as f64),
            free_block_count: free.len(),
            largest_free_block,
            average_free_block_size: if free.is_empty() {
                0.0
            } else {
                free_bytes as f64 / free.len() as f64
            },
            external_fragmentation: external_fragmentation(free_bytes, largest_free_block),
            allocated_block_count: used.len(),
            average_allocation_size,
            smallest_allocation: used.iter().map(|b| b.size).min().unwrap_or(0),
            largest_allocation: used.iter().map(|b| b.size).max().unwrap_or(0),
            allocation_variance: population_variance(&sizes),
        }
    }

    /// Weighted health score in `[0, 100]`
    ///
    /// 40% success rate, 30% utilization, 30% absence of fragmentation.
    pub fn score(&self) -> f64 {
        self.success_rate * 0.4
            + self.memory_utilization * 0.3
            + (100.0 - self.external_fragmentation) * 0.3
    }

    pub fn rating(&self) -> PerformanceRating {
        PerformanceRating::from_score(self.score())
    }

    /// Advice triggered by this snapshot, in a fixed order
    pub fn suggestions(&self) -> Vec<Suggestion> {
        let rules = [
            (self.success_rate < Suggestion::LOW_SUCCESS_RATE, Suggestion::LowSuccessRate),
            (
                self.external_fragmentation > Suggestion::SEVERE_FRAGMENTATION,
                Suggestion::SevereFragmentation,
            ),
            (
                self.memory_utilization < Suggestion::LOW_UTILIZATION && self.total_requests > 0,
                Suggestion::LowUtilization,
            ),
            (
                self.free_block_count > Suggestion::MAX_FREE_BLOCKS,
                Suggestion::TooManyFreeBlocks,
            ),
        ];
        rules
            .into_iter()
            .filter_map(|(triggered, suggestion)| triggered.then_some(suggestion))
            .collect()
    }

    pub fn rounded(&self) -> Self {
        Self {
            success_rate: round2(self.success_rate),
            memory_utilization: round2(self.memory_utilization),
            average_free_block_size: round2(self.average_free_block_size),
            external_fragmentation: round2(self.external_fragmentation),
            average_allocation_size: round2(self.average_allocation_size),
            allocation_variance: round2(self.allocation_variance),
            ..*self
        }
    }
}
