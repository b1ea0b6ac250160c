/*!
 * Scheduler Types
 * Domain types for scheduling policy configuration
 */

use crate::core::errors::SchedulerError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Scheduler policy configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SchedulerPolicy {
    /// First come, first served: earliest arrival runs first
    #[default]
    Fcfs,
    /// Round-robin with fixed time quantum
    RoundRobin,
    /// Lowest priority value runs first
    Priority,
    /// Shortest job first (see [`SjfMode`] for the preemption rule)
    ShortestJobFirst,
}

impl SchedulerPolicy {
    pub const ALL: [SchedulerPolicy; 4] = [
        Self::Fcfs,
        Self::RoundRobin,
        Self::Priority,
        Self::ShortestJobFirst,
    ];

    /// Convert to string representation
    #[inline(always)]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Fcfs => "fcfs",
            Self::RoundRobin => "round_robin",
            Self::Priority => "priority",
            Self::ShortestJobFirst => "sjf",
        }
    }

    /// Whether the policy consults the quantum counter
    #[inline]
    pub const fn uses_quantum(&self) -> bool {
        matches!(self, Self::RoundRobin)
    }
}

impl FromStr for SchedulerPolicy {
    type Err = SchedulerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "fcfs" | "fifo" | "first_come_first_served" => Ok(Self::Fcfs),
            "round_robin" | "roundrobin" | "rr" => Ok(Self::RoundRobin),
            "priority" | "prio" => Ok(Self::Priority),
            "sjf" | "shortest_job_first" | "srtf" => Ok(Self::ShortestJobFirst),
            _ => Err(SchedulerError::InvalidPolicy(s.to_string())),
        }
    }
}

impl fmt::Display for SchedulerPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for SchedulerPolicy {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for SchedulerPolicy {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Preemption rule for shortest-job-first, fixed per engine instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SjfMode {
    /// Shortest remaining time, recomputed every tick
    #[default]
    Preemptive,
    /// The running process keeps the CPU until it completes
    NonPreemptive,
}

impl FromStr for SjfMode {
    type Err = SchedulerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "preemptive" | "srtf" => Ok(Self::Preemptive),
            "non_preemptive" | "nonpreemptive" | "non-preemptive" => Ok(Self::NonPreemptive),
            _ => Err(SchedulerError::InvalidSjfMode(s.to_string())),
        }
    }
}

/// Round Robin time slice, in ticks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TimeQuantum(u64);

impl TimeQuantum {
    pub const DEFAULT_TICKS: u64 = 2;

    /// Create new time quantum
    pub fn new(ticks: u64) -> Result<Self, SchedulerError> {
        if ticks == 0 {
            return Err(SchedulerError::InvalidQuantum(ticks));
        }
        Ok(Self(ticks))
    }

    #[inline(always)]
    pub const fn ticks(&self) -> u64 {
        self.0
    }
}

impl Default for TimeQuantum {
    fn default() -> Self {
        Self(Self::DEFAULT_TICKS)
    }
}

impl<'de> Deserialize<'de> for TimeQuantum {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let ticks = u64::deserialize(deserializer)?;
        Self::new(ticks).map_err(serde::de::Error::custom)
    }
}
