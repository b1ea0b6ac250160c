/*!
 * Fit Policy Tests
 * How First-Fit, Best-Fit and Worst-Fit place the same request
 */

use os_sim_kernel::memory::{AllocationPolicy, MemoryManager};
use pretty_assertions::assert_eq;

/// Memory with free holes of 100, 500, 200 and 300 bytes separated by
/// 10-byte allocated spacers
fn holes(policy: AllocationPolicy) -> MemoryManager {
    let mut mem = MemoryManager::with_capacity(1140).unwrap();
    let mut fillers = Vec::new();
    for (i, size) in [100, 500, 200, 300].into_iter().enumerate() {
        fillers.push(mem.allocate(&format!("fill{i}"), size).unwrap().request_id);
        mem.allocate(&format!("spacer{i}"), 10).unwrap();
    }
    for id in fillers {
        mem.deallocate(id);
    }
    mem.set_policy(policy);
    mem
}

fn landing(policy: AllocationPolicy) -> (usize, usize) {
    let mut mem = holes(policy);
    let allocation = mem.allocate("R", 150).unwrap();
    let hole = mem
        .blocks()
        .iter()
        .find(|b| b.start == allocation.start + 150)
        .map(|b| b.size)
        .unwrap_or(0);
    (allocation.start, hole + 150)
}

#[test]
fn test_policies_diverge_on_same_request() {
    // Each tuple is (start, size of the hole the request landed in)
    assert_eq!(landing(AllocationPolicy::FirstFit), (110, 500));
    assert_eq!(landing(AllocationPolicy::BestFit), (620, 200));
    assert_eq!(landing(AllocationPolicy::WorstFit), (110, 500));
}

#[test]
fn test_layout_after_hole_setup() {
    let mem = holes(AllocationPolicy::FirstFit);
    let free: Vec<_> = mem.free_blocks().map(|b| (b.start, b.size)).collect();
    assert_eq!(free, [(0, 100), (110, 500), (620, 200), (830, 300)]);
}

#[test]
fn test_best_fit_keeps_large_hole_intact() {
    let mut first = holes(AllocationPolicy::FirstFit);
    let mut best = holes(AllocationPolicy::BestFit);

    first.allocate("R", 150).unwrap();
    best.allocate("R", 150).unwrap();

    assert_eq!(first.metrics().largest_free_block, 350);
    assert_eq!(best.metrics().largest_free_block, 500);
}

#[test]
fn test_policy_change_keeps_layout() {
    let mut mem = holes(AllocationPolicy::FirstFit);
    let before = mem.blocks().to_vec();
    mem.set_policy(AllocationPolicy::WorstFit);
    assert_eq!(mem.blocks(), before.as_slice());
}
