/*!
 * Scheduler Core Operations
 * Add, remove, reset and tick
 */

use super::{Scheduler, TickOutcome};
use crate::core::types::{Pid, Ticks};
use crate::process::types::{Process, ProcessDefinition, ProcessState, SchedulerResult};
use crate::scheduler::SelectionRules;
use tracing::{debug, info, trace, warn};

impl Scheduler {
    /// Add process to scheduler
    pub fn add_process(&mut self, definition: ProcessDefinition) -> SchedulerResult<Pid> {
        if let Err(e) = definition.validate() {
            warn!(name = %definition.name, error = %e, "Rejected process definition");
            return Err(e);
        }
        Ok(self.insert(definition))
    }

    pub(super) fn insert(&mut self, definition: ProcessDefinition) -> Pid {
        let pid = self.next_pid;
        self.next_pid += 1;

        info!(
            pid,
            name = %definition.name,
            arrival = definition.arrival_time,
            burst = definition.burst_time,
            priority = definition.priority,
            "Process added to scheduler"
        );
        self.processes.push(Process::new(pid, definition));
        pid
    }

    /// Remove process from scheduler
    pub fn remove_process(&mut self, pid: Pid) -> bool {
        let Some(pos) = self.processes.iter().position(|p| p.id == pid) else {
            debug!(pid, "Remove ignored: process not in scheduler");
            return false;
        };

        let removed = self.processes.remove(pos);
        if removed.state == ProcessState::Running {
            self.slice_used = 0;
        }
        info!(pid, name = %removed.name, "Process removed from scheduler");
        true
    }

    /// Drop all processes and rewind the clock
    pub fn clear_all(&mut self) {
        let count = self.processes.len();
        self.processes.clear();
        self.clock = 0;
        self.slice_used = 0;
        info!(count, "Scheduler cleared");
    }

    /// Rewind the clock and every timing field, keeping definitions and ids
    pub fn reset_timing(&mut self) {
        for process in &mut self.processes {
            process.reset_timing();
        }
        self.clock = 0;
        self.slice_used = 0;
        info!(processes = self.processes.len(), "Scheduler timing reset");
    }

    /// Advance the simulated clock by one tick
    ///
    /// The tick covers the interval `[now, now + 1)`: only processes that
    /// arrived by `now` may run in it, so a process can never finish sooner
    /// than `arrival + burst`.
    ///
    /// An empty process table makes this a no-op: the clock does not move.
    pub fn tick(&mut self) -> TickOutcome {
        if self.processes.is_empty() {
            return TickOutcome::idle(self.clock);
        }

        let start = self.clock;
        let now = start.saturating_add(1);
        self.clock = now;

        let mut outcome = TickOutcome::idle(now);

        let selected = {
            let eligible: Vec<&Process> =
                self.processes.iter().filter(|p| p.is_eligible(start)).collect();
            if eligible.is_empty() {
                trace!(time = now, "Idle tick: no eligible process");
                return outcome;
            }

            let rules = SelectionRules {
                sjf_mode: self.sjf_mode,
                quantum: self.quantum,
                slice_used: self.slice_used,
            };
            self.policy.select(&eligible, rules)
        };

        let Some(selected) = selected else {
            trace!(time = now, "Idle tick: nothing selectable");
            return outcome;
        };

        // Context switch starts a fresh slice
        let previous = self.running().map(|p| p.id);
        if previous != Some(selected) {
            self.slice_used = 0;
            if let Some(prev) = previous {
                debug!(time = now, from = prev, to = selected, "Context switch");
            }
        }

        let quantum = self.quantum.ticks();
        let round_robin = self.policy.uses_quantum();

        for process in &mut self.processes {
            if process.id == selected {
                process.state = ProcessState::Running;
                process.remaining_time -= 1;
                outcome.ran = Some(selected);

                if process.remaining_time == 0 {
                    process.complete(now);
                    self.slice_used = 0;
                    outcome.completed = Some(selected);
                    info!(
                        pid = selected,
                        name = %process.name,
                        completion = now,
                        turnaround = ?process.turnaround_time,
                        waiting = process.waiting_time,
                        "Process completed"
                    );
                } else if round_robin {
                    self.slice_used += 1;
                    if self.slice_used >= quantum {
                        process.state = ProcessState::Waiting;
                        self.slice_used = 0;
                        outcome.preempted = true;
                        debug!(pid = selected, time = now, "Quantum expired");
                    }
                }
            } else if process.state == ProcessState::Running {
                process.state = ProcessState::Waiting;
            }
        }

        for process in &mut self.processes {
            if process.id != selected
                && process.is_eligible(start)
                && process.state == ProcessState::Waiting
                && process.remaining_time > 0
            {
                process.waiting_time += 1;
            }
        }

        debug_assert!(
            self.processes
                .iter()
                .filter(|p| p.state == ProcessState::Running)
                .count()
                <= 1,
            "more than one process Running after tick {now}"
        );
        debug!(time = now, pid = selected, policy = %self.policy, "Tick");

        outcome
    }

    /// Tick until every process completes or `max_ticks` elapse
    ///
    /// Returns the number of ticks taken.
    pub fn run_until_idle(&mut self, max_ticks: Ticks) -> Ticks {
        let mut ticks = 0;
        while ticks < max_ticks && !self.is_finished() {
            self.tick();
            ticks += 1;
        }
        ticks
    }

    /// Current simulated time
    pub fn now(&self) -> Ticks {
        self.clock
    }

    /// All processes in insertion order
    pub fn processes(&self) -> &[Process] {
        &self.processes
    }

    pub fn process(&self, pid: Pid) -> Option<&Process> {
        self.processes.iter().find(|p| p.id == pid)
    }

    /// Arrived, waiting processes that still need CPU
    pub fn ready_queue(&self) -> Vec<&Process> {
        self.processes
            .iter()
            .filter(|p| {
                p.arrival_time <= self.clock
                    && p.state == ProcessState::Waiting
                    && p.remaining_time > 0
            })
            .collect()
    }

    /// Process holding the CPU
    pub fn running(&self) -> Option<&Process> {
        self.processes.iter().find(|p| p.state == ProcessState::Running)
    }

    pub fn completed(&self) -> Vec<&Process> {
        self.processes.iter().filter(|p| p.is_completed()).collect()
    }

    /// Every process has completed (vacuously true when empty)
    pub fn is_finished(&self) -> bool {
        self.processes.iter().all(Process::is_completed)
    }

    pub fn len(&self) -> usize {
        self.processes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.processes.is_empty()
    }
}
