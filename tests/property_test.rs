/*!
 * Property Tests
 * Invariants that must hold for arbitrary workloads
 */

use os_sim_kernel::memory::{
    coalesce_free_blocks, verify_partition, AllocationPolicy, BlockOwner, MemoryBlock,
    MemoryManager,
};
use os_sim_kernel::process::{ProcessDefinition, ProcessState, Scheduler};
use os_sim_kernel::scheduler::{Policy, SjfMode, TimeQuantum};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    Allocate(usize),
    /// Index into the live request list, modulo its length
    Release(usize),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => (1usize..400).prop_map(Op::Allocate),
        2 => any::<usize>().prop_map(Op::Release),
    ]
}

fn allocation_policy() -> impl Strategy<Value = AllocationPolicy> {
    prop::sample::select(AllocationPolicy::ALL.to_vec())
}

fn scheduler_policy() -> impl Strategy<Value = Policy> {
    prop::sample::select(Policy::ALL.to_vec())
}

fn definitions() -> impl Strategy<Value = Vec<ProcessDefinition>> {
    prop::collection::vec((0u64..10, 1u64..10, 0i32..5), 1..8).prop_map(|rows| {
        rows.into_iter()
            .enumerate()
            .map(|(i, (arrival, burst, priority))| {
                ProcessDefinition::new(format!("P{}", i + 1), arrival, burst, priority)
            })
            .collect()
    })
}

/// A valid partition of `[0, sum(sizes))` with arbitrary allocation flags
fn partition() -> impl Strategy<Value = Vec<MemoryBlock>> {
    prop::collection::vec((1usize..64, any::<bool>()), 1..20).prop_map(|rows| {
        let mut start = 0;
        rows.into_iter()
            .zip(1u64..)
            .map(|((size, allocated), id)| {
                let block = if allocated {
                    let owner = BlockOwner {
                        request_id: id,
                        name: format!("R{id}"),
                    };
                    MemoryBlock::allocated(id, start, size, owner)
                } else {
                    MemoryBlock::free(id, start, size)
                };
                start += size;
                block
            })
            .collect()
    })
}

fn live_requests(mem: &MemoryManager) -> Vec<u64> {
    mem.requests().iter().filter(|r| r.allocated).map(|r| r.id).collect()
}

proptest! {
    #[test]
    fn prop_partition_holds_after_any_sequence(
        capacity in 1usize..2048,
        policy in allocation_policy(),
        ops in prop::collection::vec(op(), 0..60),
    ) {
        let mut mem = MemoryManager::with_capacity(capacity).unwrap().with_policy(policy);

        for op in ops {
            match op {
                Op::Allocate(size) => {
                    let _ = mem.allocate("p", size);
                }
                Op::Release(pick) => {
                    let live = live_requests(&mem);
                    if !live.is_empty() {
                        prop_assert!(mem.deallocate(live[pick % live.len()]));
                    }
                }
            }
            prop_assert!(verify_partition(mem.blocks(), capacity).is_ok());
            // Coalescing leaves no two free blocks adjacent
            prop_assert!(mem.blocks().windows(2).all(|w| w[0].allocated || w[1].allocated));
        }
    }

    #[test]
    fn prop_deallocate_is_idempotent(
        policy in allocation_policy(),
        sizes in prop::collection::vec(1usize..200, 1..10),
        pick in any::<usize>(),
    ) {
        let mut mem = MemoryManager::new().with_policy(policy);
        for size in sizes {
            let _ = mem.allocate("p", size);
        }
        let live = live_requests(&mem);
        prop_assume!(!live.is_empty());
        let target = live[pick % live.len()];

        prop_assert!(mem.deallocate(target));
        let blocks = mem.blocks().to_vec();
        let requests = mem.requests().to_vec();

        prop_assert!(!mem.deallocate(target));
        prop_assert_eq!(mem.blocks(), blocks.as_slice());
        prop_assert_eq!(mem.requests(), requests.as_slice());
    }

    #[test]
    fn prop_coalescing_is_order_independent(
        (blocks, shuffled) in partition().prop_flat_map(|blocks| {
            let shuffled = Just(blocks.clone()).prop_shuffle();
            (Just(blocks), shuffled)
        }),
    ) {
        let capacity: usize = blocks.iter().map(|b| b.size).sum();
        let mut ordered = blocks;
        let mut shuffled = shuffled;

        coalesce_free_blocks(&mut ordered);
        coalesce_free_blocks(&mut shuffled);

        prop_assert_eq!(&ordered, &shuffled);
        prop_assert!(verify_partition(&ordered, capacity).is_ok());
    }

    #[test]
    fn prop_every_policy_completes_consistently(
        workload in definitions(),
        policy in scheduler_policy(),
        quantum in 1u64..5,
        non_preemptive in any::<bool>(),
    ) {
        let mode = if non_preemptive { SjfMode::NonPreemptive } else { SjfMode::Preemptive };
        let mut scheduler = Scheduler::with_quantum(policy, TimeQuantum::new(quantum).unwrap())
            .with_sjf_mode(mode);
        for definition in workload {
            scheduler.add_process(definition).unwrap();
        }

        let mut busy = 0;
        while !scheduler.is_finished() {
            prop_assert!(scheduler.now() < 1000);
            if scheduler.tick().ran.is_some() {
                busy += 1;
            }
            let running = scheduler
                .processes()
                .iter()
                .filter(|p| p.state == ProcessState::Running)
                .count();
            prop_assert!(running <= 1);
        }

        let total_burst: u64 = scheduler.processes().iter().map(|p| p.burst_time).sum();
        prop_assert_eq!(busy, total_burst);

        for p in scheduler.processes() {
            let completion = p.completion_time.unwrap();
            let turnaround = p.turnaround_time.unwrap();
            prop_assert_eq!(p.remaining_time, 0);
            prop_assert!(completion >= p.arrival_time + p.burst_time);
            prop_assert_eq!(turnaround, completion - p.arrival_time);
            prop_assert_eq!(p.waiting_time, turnaround - p.burst_time);
        }
    }
}
