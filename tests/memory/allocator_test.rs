/*!
 * Memory Allocator Tests
 * Grants, releases and release-policy behavior
 */

use devos_kernel::{MemoryAllocator, MemoryError, MemoryPressure, ReleasePolicy};
use pretty_assertions::assert_eq;

#[test]
fn test_allocator_initialization() {
    let alloc = MemoryAllocator::new(4096).unwrap();
    assert_eq!(alloc.total(), 4096);
    assert_eq!(alloc.free(), 4096);
    assert_eq!(alloc.used(), 0);
    assert_eq!(alloc.policy(), ReleasePolicy::Strict);
}

#[test]
fn test_grant_and_release_cycle() {
    let mut alloc = MemoryAllocator::new(4096).unwrap();

    assert!(alloc.allocate(1024));
    assert!(alloc.allocate(1024));
    assert_eq!(alloc.free(), 2048);

    assert_eq!(alloc.release(1024), Ok(1024));
    assert_eq!(alloc.free(), 3072);
    assert_eq!(alloc.used(), 1024);
}

#[test]
fn test_refused_grant_leaves_state_unchanged() {
    let mut alloc = MemoryAllocator::new(1024).unwrap();
    assert!(alloc.allocate(1024));

    assert!(!alloc.can_allocate(1));
    assert!(!alloc.allocate(1024));
    assert_eq!(
        alloc.try_allocate(512),
        Err(MemoryError::InsufficientMemory {
            requested: 512,
            free: 0,
            total: 1024,
        })
    );
    assert_eq!(alloc.free(), 0);
}

#[test]
fn test_unmatched_release_per_policy() {
    let mut strict = MemoryAllocator::with_policy(1024, ReleasePolicy::Strict).unwrap();
    assert!(strict.release(1).is_err());
    assert_eq!(strict.free(), 1024);

    let mut clamp = MemoryAllocator::with_policy(1024, ReleasePolicy::Clamp).unwrap();
    assert!(clamp.allocate(100));
    assert_eq!(clamp.release(500), Ok(100));
    assert_eq!(clamp.free(), 1024);

    let mut permissive = MemoryAllocator::with_policy(1024, ReleasePolicy::Permissive).unwrap();
    assert_eq!(permissive.release(1024), Ok(1024));
    assert_eq!(permissive.free(), 2048);
}

#[test]
fn test_pressure_tracks_usage() {
    let mut alloc = MemoryAllocator::new(4096).unwrap();
    assert_eq!(alloc.pressure(), MemoryPressure::Low);

    assert!(alloc.allocate(3072));
    assert_eq!(alloc.pressure(), MemoryPressure::Medium);

    assert!(alloc.allocate(1024));
    assert_eq!(alloc.pressure(), MemoryPressure::Critical);

    let stats = alloc.stats();
    assert_eq!(stats.used_memory, 4096);
    assert_eq!(stats.usage_percentage, 100.0);
}
