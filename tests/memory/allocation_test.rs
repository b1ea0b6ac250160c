/*!
 * Allocation Tests
 * Split, release and coalescing behaviour of the contiguous allocator
 */

use os_sim_kernel::core::ErrorKind;
use os_sim_kernel::memory::{MemoryError, MemoryManager, MemorySurface};
use os_sim_kernel::SimConfig;
use pretty_assertions::assert_eq;

fn layout(mem: &MemoryManager) -> Vec<(usize, usize, bool)> {
    mem.blocks().iter().map(|b| (b.start, b.size, b.allocated)).collect()
}

#[test]
fn test_first_allocation_splits_initial_block() {
    let mut mem = MemoryManager::new();
    assert_eq!(layout(&mem), [(0, 1024, false)]);

    let a = mem.allocate("A", 128).unwrap();
    assert_eq!((a.start, a.size), (0, 128));
    assert_eq!(layout(&mem), [(0, 128, true), (128, 896, false)]);
}

#[test]
fn test_request_larger_than_memory_is_rejected_up_front() {
    let mut mem = MemoryManager::new();
    mem.allocate("A", 128).unwrap();

    let err = mem.allocate("B", 2048).unwrap_err();
    assert_eq!(err.reason(), "exceeds capacity");
    assert_eq!(err.kind(), ErrorKind::Validation);
    assert_eq!(mem.requests().len(), 1);
}

#[test]
fn test_fragmented_memory_reports_no_block_large_enough() {
    let mut mem = MemoryManager::new();
    let a = mem.allocate("A", 400).unwrap();
    mem.allocate("B", 224).unwrap();
    mem.allocate("C", 400).unwrap();
    mem.deallocate(a.request_id);

    // 400 bytes free in total, but not 500 in one piece
    let err = mem.allocate("D", 500).unwrap_err();
    assert_eq!(err.reason(), "no block large enough");
    assert_eq!(err.kind(), ErrorKind::ResourceExhausted);
    assert!(matches!(err, MemoryError::NoBlockLargeEnough { requested: 500, .. }));

    let failed = mem.requests().last().unwrap();
    assert_eq!((failed.process_name.as_str(), failed.allocated), ("D", false));
}

#[test]
fn test_release_merges_with_both_neighbours() {
    let mut mem = MemoryManager::with_capacity(300).unwrap();
    let a = mem.allocate("A", 100).unwrap();
    let b = mem.allocate("B", 100).unwrap();
    let c = mem.allocate("C", 100).unwrap();

    mem.deallocate(a.request_id);
    mem.deallocate(c.request_id);
    assert_eq!(layout(&mem), [(0, 100, false), (100, 100, true), (200, 100, false)]);

    mem.deallocate(b.request_id);
    assert_eq!(layout(&mem), [(0, 300, false)]);
    assert!(mem.verify_partition().is_ok());
}

#[test]
fn test_deallocate_twice_is_noop() {
    let mut mem = MemoryManager::new();
    let a = mem.allocate("A", 64).unwrap();
    mem.allocate("B", 64).unwrap();

    assert!(mem.deallocate(a.request_id));
    let snapshot = (mem.blocks().to_vec(), mem.requests().to_vec());

    assert!(!mem.deallocate(a.request_id));
    assert_eq!((mem.blocks().to_vec(), mem.requests().to_vec()), snapshot);
}

#[test]
fn test_example_workload_layout() {
    let mut mem = MemoryManager::new();
    mem.load_example_requests().unwrap();

    let names: Vec<_> = mem
        .blocks()
        .iter()
        .map(|b| b.owner.as_ref().map(|o| o.name.as_str()))
        .collect();
    assert_eq!(
        names,
        [Some("System"), Some("Browser"), Some("Editor"), Some("Player"), None]
    );

    let (total, used, available) = mem.info();
    assert_eq!((total, used, available), (1024, 640, 384));
}

#[test]
fn test_from_config() {
    let config = SimConfig::from_json(r#"{"memory_capacity":512,"allocation_policy":"worst_fit"}"#)
        .unwrap();
    let mem = MemoryManager::from_config(&config).unwrap();
    assert_eq!(mem.capacity(), 512);
    assert_eq!(mem.policy().as_str(), "worst_fit");
}

fn churn<M: MemorySurface>(memory: &mut M) -> usize {
    memory.reset_memory(256).unwrap();
    let first = memory.allocate("X", 200).unwrap();
    assert!(memory.allocate("Y", 100).is_err());
    memory.deallocate(first.request_id);
    memory.allocate("Y", 100).unwrap();
    memory.blocks().len()
}

#[test]
fn test_surface_trait_drives_allocator() {
    let mut mem = MemoryManager::new();
    assert_eq!(churn(&mut mem), 2);
    assert_eq!(mem.metrics().total_requests, 2);
}
