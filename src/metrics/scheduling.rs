/*!
 * Scheduling Metrics
 */

use super::percentage;
use crate::core::types::round2;
use crate::process::types::Process;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Average waiting time band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WaitingBand {
    /// Under 5 ticks
    Excellent,
    /// Under 10 ticks
    Good,
    NeedsOptimization,
}

impl WaitingBand {
    pub fn from_average(average_waiting_time: f64) -> Self {
        match average_waiting_time {
            w if w < 5.0 => Self::Excellent,
            w if w < 10.0 => Self::Good,
            _ => Self::NeedsOptimization,
        }
    }
}

/// CPU utilization band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UtilizationBand {
    /// Above 80%
    Efficient,
    /// Above 60%
    Moderate,
    Low,
}

impl UtilizationBand {
    pub fn from_percent(cpu_utilization: f64) -> Self {
        match cpu_utilization {
            u if u > 80.0 => Self::Efficient,
            u if u > 60.0 => Self::Moderate,
            _ => Self::Low,
        }
    }
}

/// Throughput band, in completions per tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThroughputBand {
    /// Above 0.5
    High,
    /// Above 0.2
    Medium,
    Low,
}

impl ThroughputBand {
    pub fn from_rate(throughput: f64) -> Self {
        match throughput {
            t if t > 0.5 => Self::High,
            t if t > 0.2 => Self::Medium,
            _ => Self::Low,
        }
    }
}

/// Qualitative reading of a [`SchedulingMetrics`] snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchedulingAnalysis {
    pub waiting: WaitingBand,
    pub utilization: UtilizationBand,
    pub throughput: ThroughputBand,
}

impl fmt::Display for SchedulingAnalysis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "waiting={:?} utilization={:?} throughput={:?}",
            self.waiting, self.utilization, self.throughput
        )
    }
}

/// Scheduling performance snapshot
///
/// Averages cover completed processes only.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SchedulingMetrics {
    pub total_processes: usize,
    pub completed: usize,
    pub average_waiting_time: f64,
    pub average_turnaround_time: f64,
    /// Completed processes per tick, up to the last completion
    pub throughput: f64,
    /// Busy share of the timeline up to the last completion (percent)
    pub cpu_utilization: f64,
}

impl SchedulingMetrics {
    pub fn from_processes(processes: &[Process]) -> Self {
        let completed: Vec<&Process> = processes.iter().filter(|p| p.is_completed()).collect();
        let mut metrics = Self {
            total_processes: processes.len(),
            completed: completed.len(),
            ..Self::default()
        };

        if completed.is_empty() {
            return metrics;
        }

        let count = completed.len() as f64;
        let total_waiting: u64 = completed.iter().map(|p| p.waiting_time).sum();
        let total_turnaround: u64 = completed.iter().filter_map(|p| p.turnaround_time).sum();
        let total_burst: u64 = completed.iter().map(|p| p.burst_time).sum();
        let last_completion = completed
            .iter()
            .filter_map(|p| p.completion_time)
            .max()
            .unwrap_or(0) as f64;

        metrics.average_waiting_time = total_waiting as f64 / count;
        metrics.average_turnaround_time = total_turnaround as f64 / count;
        if last_completion > 0.0 {
            metrics.throughput = count / last_completion;
        }
        metrics.cpu_utilization = percentage(total_burst as f64, last_completion);
        metrics
    }

    /// Band the snapshot; `None` until at least one process has completed
    ///
    /// Bands are taken on the values as given, so call this on
    /// [`Self::rounded`] to band the figures a user sees.
    pub fn analysis(&self) -> Option<SchedulingAnalysis> {
        if self.completed == 0 {
            return None;
        }
        Some(SchedulingAnalysis {
            waiting: WaitingBand::from_average(self.average_waiting_time),
            utilization: UtilizationBand::from_percent(self.cpu_utilization),
            throughput: ThroughputBand::from_rate(self.throughput),
        })
    }

    /// Display copy with every ratio rounded to two decimals
    pub fn rounded(&self) -> Self {
        Self {
            average_waiting_time: round2(self.average_waiting_time),
            average_turnaround_time: round2(self.average_turnaround_time),
            throughput: round2(self.throughput),
            cpu_utilization: round2(self.cpu_utilization),
            ..*self
        }
    }
}
