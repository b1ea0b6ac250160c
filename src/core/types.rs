/*!
 * Core Types
 * Common types used across both simulation engines
 */

/// Process ID type
pub type Pid = u32;

/// Memory block identifier
pub type BlockId = u64;

/// Allocation request identifier
pub type RequestId = u64;

/// Simulated time in whole ticks
pub type Ticks = u64;

/// Address type for simulated memory
pub type Address = usize;

/// Size type for simulated memory
pub type Size = usize;

/// Scheduling priority (lower value runs first)
pub type Priority = i32;

/// Round a ratio to two decimal places for display
///
/// Metrics are always computed on unrounded values; this is only applied
/// when a snapshot is prepared for presentation.
#[inline]
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
