/*!
 * Engine Benchmarks
 *
 * Tick throughput per scheduling policy and allocation churn per fit policy
 */

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use os_sim_kernel::memory::{AllocationPolicy, MemoryManager};
use os_sim_kernel::process::{ProcessDefinition, Scheduler};
use os_sim_kernel::scheduler::Policy;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn workload(count: usize) -> Vec<ProcessDefinition> {
    let mut rng = StdRng::seed_from_u64(42);
    (0..count)
        .map(|i| {
            ProcessDefinition::new(
                format!("P{}", i + 1),
                rng.gen_range(0..count as u64),
                rng.gen_range(1..20),
                rng.gen_range(0..8),
            )
        })
        .collect()
}

fn bench_run_to_completion(c: &mut Criterion) {
    let mut group = c.benchmark_group("run_to_completion");
    let definitions = workload(64);

    for policy in Policy::ALL {
        group.bench_with_input(
            BenchmarkId::from_parameter(policy),
            &definitions,
            |b, definitions| {
                b.iter(|| {
                    let mut scheduler = Scheduler::new(policy);
                    for definition in definitions {
                        scheduler.add_process(definition.clone()).ok();
                    }
                    black_box(scheduler.run_until_idle(100_000))
                });
            },
        );
    }

    group.finish();
}

fn bench_allocation_churn(c: &mut Criterion) {
    let mut group = c.benchmark_group("allocation_churn");

    let mut rng = StdRng::seed_from_u64(7);
    let sizes: Vec<usize> = (0..512).map(|_| rng.gen_range(1..256)).collect();

    for policy in AllocationPolicy::ALL {
        group.bench_with_input(BenchmarkId::from_parameter(policy), &sizes, |b, sizes| {
            b.iter(|| {
                let mut mem = MemoryManager::with_capacity(16 * 1024)
                    .map(|m| m.with_policy(policy))
                    .unwrap_or_default();
                let mut live = Vec::new();
                for (i, &size) in sizes.iter().enumerate() {
                    if let Ok(allocation) = mem.allocate("bench", size) {
                        live.push(allocation.request_id);
                    }
                    // Release every third allocation to keep holes around
                    if i % 3 == 2 && !live.is_empty() {
                        let victim = live.swap_remove(i % live.len());
                        mem.deallocate(victim);
                    }
                }
                black_box(mem.metrics())
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_run_to_completion, bench_allocation_churn);
criterion_main!(benches);
