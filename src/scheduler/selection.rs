/*!
 * Process Selection
 * Pure per-tick selection functions for every scheduling policy
 *
 * Every policy shares the same deterministic tie-break: earliest arrival
 * time, then lowest process id.
 */

use super::types::{SchedulerPolicy, SjfMode, TimeQuantum};
use crate::core::types::{Pid, Ticks};
use crate::process::types::{Process, ProcessState};

/// Engine-side inputs a policy may consult besides the candidates
#[derive(Debug, Clone, Copy)]
pub struct SelectionRules {
    pub sjf_mode: SjfMode,
    pub quantum: TimeQuantum,
    /// Ticks the currently running process has used of its slice
    pub slice_used: u64,
}

impl Default for SelectionRules {
    fn default() -> Self {
        Self {
            sjf_mode: SjfMode::default(),
            quantum: TimeQuantum::default(),
            slice_used: 0,
        }
    }
}

#[inline]
fn tie_break(process: &Process) -> (Ticks, Pid) {
    (process.arrival_time, process.id)
}

#[inline]
fn runnable<'a>(eligible: &'a [&'a Process]) -> impl Iterator<Item = &'a Process> + 'a {
    eligible.iter().copied().filter(|p| p.remaining_time > 0)
}

fn running<'a>(eligible: &'a [&'a Process]) -> Option<&'a Process> {
    runnable(eligible).find(|p| p.state == ProcessState::Running)
}

fn earliest_arrival<'a>(candidates: impl Iterator<Item = &'a Process>) -> Option<&'a Process> {
    candidates.min_by_key(|p| tie_break(p))
}

fn shortest_remaining<'a>(candidates: impl Iterator<Item = &'a Process>) -> Option<&'a Process> {
    candidates.min_by_key(|p| (p.remaining_time, tie_break(p)))
}

impl SchedulerPolicy {
    /// Pick the process to run for the next tick
    ///
    /// `eligible` holds every arrived, non-completed process. Returns `None`
    /// when none of them has work left.
    pub fn select(&self, eligible: &[&Process], rules: SelectionRules) -> Option<Pid> {
        let chosen = match self {
            Self::Fcfs => earliest_arrival(runnable(eligible)),
            Self::Priority => runnable(eligible).min_by_key(|p| (p.priority, tie_break(p))),
            Self::ShortestJobFirst => match rules.sjf_mode {
                SjfMode::Preemptive => shortest_remaining(runnable(eligible)),
                SjfMode::NonPreemptive => {
                    running(eligible).or_else(|| shortest_remaining(runnable(eligible)))
                }
            },
            Self::RoundRobin => {
                let current = running(eligible);
                match current {
                    Some(p) if rules.slice_used < rules.quantum.ticks() => Some(p),
                    _ => earliest_arrival(
                        runnable(eligible).filter(|p| p.state != ProcessState::Running),
                    )
                    .or(current),
                }
            }
        };

        chosen.map(|p| p.id)
    }
}
