/*!
 * OS Simulation - Demo Driver
 *
 * Runs the four-process example workload on a real-time tick, then replays
 * the example allocation workload, and prints both metric snapshots as JSON.
 *
 * Configuration comes from `SIM_*` environment variables (see `SimConfig`).
 */

use anyhow::Context;
use serde::Serialize;
use tokio::time::MissedTickBehavior;
use tracing::{info, warn};

use os_sim_kernel::{
    init_tracing, span_run, AllocationMetrics, MemoryError, MemoryManager, PerformanceRating,
    Process, Scheduler, SchedulingAnalysis, SchedulingMetrics, SimConfig, Suggestion,
};

#[derive(Serialize)]
struct SchedulingReport {
    policy: String,
    finished: bool,
    ticks: u64,
    processes: Vec<Process>,
    metrics: SchedulingMetrics,
    analysis: Option<SchedulingAnalysis>,
}

#[derive(Serialize)]
struct AllocationReport {
    policy: String,
    metrics: AllocationMetrics,
    rating: PerformanceRating,
    suggestions: Vec<Suggestion>,
}

#[derive(Serialize)]
struct Report {
    config: SimConfig,
    scheduling: SchedulingReport,
    allocation: AllocationReport,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = SimConfig::from_env().context("invalid SIM_* configuration")?;
    info!(?config, "OS simulation starting");

    let scheduling = run_scheduler(&config).await;
    let allocation = run_allocator(&config).context("allocation demo failed")?;

    let report = Report {
        config,
        scheduling,
        allocation,
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

async fn run_scheduler(config: &SimConfig) -> SchedulingReport {
    let mut scheduler = Scheduler::from_config(config);
    let pids = scheduler.load_example_set();

    let run = span_run("scheduler");
    run.record_operations(pids.len());

    let mut interval = tokio::time::interval(config.tick_interval());
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    while !scheduler.is_finished() && scheduler.now() < config.max_ticks {
        tokio::select! {
            _ = interval.tick() => {
                let outcome = scheduler.tick();
                if let Some(pid) = outcome.completed {
                    info!(pid, time = outcome.time, "Process completed");
                }
            }
            _ = &mut shutdown => {
                warn!(time = scheduler.now(), "Interrupted, reporting partial run");
                break;
            }
        }
    }
    run.record_ticks(scheduler.now());

    let metrics = scheduler.metrics();
    SchedulingReport {
        policy: scheduler.policy().to_string(),
        finished: scheduler.is_finished(),
        ticks: scheduler.now(),
        processes: scheduler.processes().to_vec(),
        analysis: metrics.analysis(),
        metrics: metrics.rounded(),
    }
}

fn run_allocator(config: &SimConfig) -> Result<AllocationReport, MemoryError> {
    let mut memory = MemoryManager::from_config(config)?;
    let run = span_run("memory");
    let _entered = run.enter();

    memory.load_example_requests()?;

    // Punch a hole, then let the configured policy choose where to land
    let browser = memory
        .requests()
        .iter()
        .find(|r| r.process_name == "Browser")
        .map(|r| r.id);
    if let Some(id) = browser {
        memory.deallocate(id);
    }
    for (name, size) in [("Terminal", 100), ("Compiler", 300), ("Database", 4096)] {
        if let Err(e) = memory.allocate(name, size) {
            warn!(name, size, reason = e.reason(), "Demo allocation rejected");
        }
    }
    run.record_operations(memory.requests().len());

    let metrics = memory.metrics();
    let suggestions = metrics.suggestions();
    for suggestion in &suggestions {
        info!(level = ?suggestion.level(), "{suggestion}");
    }
    Ok(AllocationReport {
        policy: memory.policy().to_string(),
        rating: metrics.rating(),
        suggestions,
        metrics: metrics.rounded(),
    })
}
