/*!
 * Metrics Module
 * Pure, side-effect-free reducers over engine snapshots
 *
 * Nothing here is stored: every snapshot is recomputed on demand from the
 * current process table or block list. Values are unrounded; call
 * `rounded()` on a snapshot before presenting it.
 */

pub mod allocation;
pub mod scheduling;

pub use allocation::{
    external_fragmentation, population_variance, AllocationMetrics, PerformanceRating, Suggestion,
    SuggestionLevel,
};
pub use scheduling::{
    SchedulingAnalysis, SchedulingMetrics, ThroughputBand, UtilizationBand, WaitingBand,
};

/// `part / whole` as a percentage, 0 when `whole` is 0
#[inline]
pub fn percentage(part: f64, whole: f64) -> f64 {
    if whole == 0.0 {
        0.0
    } else {
        part / whole * 100.0
    }
}
