/*!
 * Simulation Configuration
 *
 * Runtime configuration for both engines and the demo driver. Values come
 * from defaults, a JSON document, or `SIM_*` environment variables.
 */

use super::errors::{ConfigError, ConfigResult, SchedulerError};
use super::types::{Size, Ticks};
use crate::memory::{AllocationPolicy, MemoryError, DEFAULT_CAPACITY};
use crate::scheduler::{SchedulerPolicy, SjfMode, TimeQuantum};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::time::Duration;

/// Simulation configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Wall-clock pause between ticks in the demo driver
    pub tick_interval_ms: u64,
    pub memory_capacity: Size,
    pub quantum: TimeQuantum,
    pub scheduler_policy: SchedulerPolicy,
    pub allocation_policy: AllocationPolicy,
    pub sjf_mode: SjfMode,
    /// Upper bound on ticks the driver will run
    pub max_ticks: Ticks,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: 1000,
            memory_capacity: DEFAULT_CAPACITY,
            quantum: TimeQuantum::default(),
            scheduler_policy: SchedulerPolicy::default(),
            allocation_policy: AllocationPolicy::default(),
            sjf_mode: SjfMode::default(),
            max_ticks: 1000,
        }
    }
}

impl SimConfig {
    pub const ENV_TICK_INTERVAL_MS: &'static str = "SIM_TICK_INTERVAL_MS";
    pub const ENV_MEMORY_CAPACITY: &'static str = "SIM_MEMORY_CAPACITY";
    pub const ENV_QUANTUM: &'static str = "SIM_QUANTUM";
    pub const ENV_SCHEDULER_POLICY: &'static str = "SIM_SCHEDULER_POLICY";
    pub const ENV_ALLOCATION_POLICY: &'static str = "SIM_ALLOCATION_POLICY";
    pub const ENV_SJF_MODE: &'static str = "SIM_SJF_MODE";
    pub const ENV_MAX_TICKS: &'static str = "SIM_MAX_TICKS";

    /// Defaults overridden by any `SIM_*` variables present in the environment
    pub fn from_env() -> ConfigResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden through an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(v) = lookup(Self::ENV_TICK_INTERVAL_MS) {
            config.tick_interval_ms = parse_number(Self::ENV_TICK_INTERVAL_MS, &v)?;
        }
        if let Some(v) = lookup(Self::ENV_MEMORY_CAPACITY) {
            config.memory_capacity = parse_number(Self::ENV_MEMORY_CAPACITY, &v)?;
        }
        if let Some(v) = lookup(Self::ENV_QUANTUM) {
            config.quantum = TimeQuantum::new(parse_number(Self::ENV_QUANTUM, &v)?)?;
        }
        if let Some(v) = lookup(Self::ENV_SCHEDULER_POLICY) {
            config.scheduler_policy = v.parse()?;
        }
        if let Some(v) = lookup(Self::ENV_ALLOCATION_POLICY) {
            config.allocation_policy = v.parse()?;
        }
        if let Some(v) = lookup(Self::ENV_SJF_MODE) {
            config.sjf_mode = v.parse()?;
        }
        if let Some(v) = lookup(Self::ENV_MAX_TICKS) {
            config.max_ticks = parse_number(Self::ENV_MAX_TICKS, &v)?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Parse a JSON document; missing fields keep their defaults
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.quantum.ticks() == 0 {
            return Err(SchedulerError::InvalidQuantum(0).into());
        }
        if self.memory_capacity == 0 {
            return Err(MemoryError::InvalidCapacity.into());
        }
        // tokio::time::interval panics on a zero period
        if self.tick_interval_ms == 0 {
            return Err(ConfigError::InvalidValue {
                key: "tick_interval_ms",
                value: "0".into(),
                reason: "tick interval must be at least 1 ms".into(),
            });
        }
        Ok(())
    }

    #[inline]
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }
}

fn parse_number<T>(key: &'static str, value: &str) -> ConfigResult<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse()
        .map_err(|e: T::Err| ConfigError::InvalidValue {
            key,
            value: value.to_string(),
            reason: e.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryManager;
    use crate::process::Scheduler;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = SimConfig::default();
        assert_eq!(config.tick_interval(), Duration::from_secs(1));
        assert_eq!(config.memory_capacity, 1024);
        assert_eq!(config.quantum.ticks(), 2);
        assert_eq!(config.scheduler_policy, SchedulerPolicy::Fcfs);
        assert_eq!(config.allocation_policy, AllocationPolicy::FirstFit);
        assert_eq!(config.sjf_mode, SjfMode::Preemptive);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_lookup_overrides() {
        let config = SimConfig::from_lookup(lookup(&[
            ("SIM_QUANTUM", "3"),
            ("SIM_SCHEDULER_POLICY", "rr"),
            ("SIM_ALLOCATION_POLICY", "best_fit"),
            ("SIM_MEMORY_CAPACITY", " 2048 "),
        ]))
        .unwrap();

        assert_eq!(config.quantum.ticks(), 3);
        assert_eq!(config.scheduler_policy, SchedulerPolicy::RoundRobin);
        assert_eq!(config.allocation_policy, AllocationPolicy::BestFit);
        assert_eq!(config.memory_capacity, 2048);
        assert_eq!(config.max_ticks, 1000);
    }

    #[test]
    fn test_lookup_rejects_bad_values() {
        assert!(matches!(
            SimConfig::from_lookup(lookup(&[("SIM_QUANTUM", "0")])),
            Err(ConfigError::Scheduler(SchedulerError::InvalidQuantum(0)))
        ));
        assert!(matches!(
            SimConfig::from_lookup(lookup(&[("SIM_MAX_TICKS", "many")])),
            Err(ConfigError::InvalidValue { key: "SIM_MAX_TICKS", .. })
        ));
        assert!(matches!(
            SimConfig::from_lookup(lookup(&[("SIM_ALLOCATION_POLICY", "next_fit")])),
            Err(ConfigError::Memory(MemoryError::InvalidPolicy(_)))
        ));
        assert!(matches!(
            SimConfig::from_lookup(lookup(&[("SIM_MEMORY_CAPACITY", "0")])),
            Err(ConfigError::Memory(MemoryError::InvalidCapacity))
        ));
    }

    #[test]
    fn test_from_json_partial_document() {
        let config = SimConfig::from_json(r#"{"scheduler_policy":"sjf","sjf_mode":"non_preemptive"}"#)
            .unwrap();
        assert_eq!(config.scheduler_policy, SchedulerPolicy::ShortestJobFirst);
        assert_eq!(config.sjf_mode, SjfMode::NonPreemptive);
        assert_eq!(config.quantum, TimeQuantum::default());
    }

    #[test]
    fn test_engines_follow_config() {
        let config = SimConfig::from_json(
            r#"{"scheduler_policy":"sjf","sjf_mode":"non_preemptive","allocation_policy":"worst_fit","memory_capacity":512}"#,
        )
        .unwrap();

        let scheduler = Scheduler::from_config(&config);
        assert_eq!(scheduler.policy(), SchedulerPolicy::ShortestJobFirst);
        assert_eq!(scheduler.sjf_mode(), SjfMode::NonPreemptive);

        let memory = MemoryManager::from_config(&config).unwrap();
        assert_eq!(memory.policy(), AllocationPolicy::WorstFit);
        assert_eq!(memory.capacity(), 512);
    }

    #[test]
    fn test_from_json_rejects_zero_quantum() {
        assert!(matches!(
            SimConfig::from_json(r#"{"quantum":0}"#),
            Err(ConfigError::Malformed(_))
        ));
        assert!(SimConfig::from_json("not json").is_err());
        assert!(matches!(
            SimConfig::from_json(r#"{"tick_interval_ms":0}"#),
            Err(ConfigError::InvalidValue { key: "tick_interval_ms", .. })
        ));
    }
}
