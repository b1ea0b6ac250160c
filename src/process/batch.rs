/*!
 * Batch Schedulers
 * One-shot, non-preemptive reference schedules computed from definitions
 *
 * These do not tick. They lay every process out back to back and are
 * handy to cross-check the live engine.
 */

use super::types::{Process, ProcessDefinition, ProcessState, SchedulerResult};
use crate::core::types::{Pid, Ticks};

fn instantiate(definitions: &[ProcessDefinition]) -> SchedulerResult<Vec<Process>> {
    definitions
        .iter()
        .zip(1..)
        .map(|(definition, pid): (&ProcessDefinition, Pid)| {
            definition.validate()?;
            Ok(Process::new(pid, definition.clone()))
        })
        .collect()
}

fn run_to_completion(mut process: Process, clock: Ticks) -> Process {
    let start = clock.max(process.arrival_time);
    process.state = ProcessState::Running;
    process.remaining_time = 0;
    process.complete(start + process.burst_time);
    process
}

/// First come, first served. Returns processes in execution order.
pub fn fcfs(definitions: &[ProcessDefinition]) -> SchedulerResult<Vec<Process>> {
    let mut pending = instantiate(definitions)?;
    pending.sort_by_key(|p| (p.arrival_time, p.id));

    let mut clock = 0;
    Ok(pending
        .into_iter()
        .map(|process| {
            let done = run_to_completion(process, clock);
            clock = done.completion_time.unwrap_or(clock);
            done
        })
        .collect())
}

/// Non-preemptive shortest job first. Returns processes in execution order.
///
/// When nothing has arrived the clock jumps to the next arrival.
pub fn sjf(definitions: &[ProcessDefinition]) -> SchedulerResult<Vec<Process>> {
    let mut pending = instantiate(definitions)?;
    let mut order = Vec::with_capacity(pending.len());
    let mut clock = 0;

    while !pending.is_empty() {
        let next = pending
            .iter()
            .enumerate()
            .filter(|(_, p)| p.arrival_time <= clock)
            .min_by_key(|(_, p)| (p.burst_time, p.arrival_time, p.id))
            .map(|(idx, _)| idx);

        let Some(idx) = next else {
            clock = pending.iter().map(|p| p.arrival_time).min().unwrap_or(clock);
            continue;
        };

        let done = run_to_completion(pending.swap_remove(idx), clock);
        clock = done.completion_time.unwrap_or(clock);
        order.push(done);
    }

    Ok(order)
}
