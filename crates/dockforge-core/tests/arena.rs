//! Arena generational handle tests.
//!
//! These tests verify correct behavior of the generational arena,
//! including generation counter increments, stale-handle rejection,
//! and slot reuse.

use dockforge_core::alloc::{Arena, Handle};

#[test]
fn test_insert_and_get() {
    let mut arena = Arena::new();

    let a = arena.insert(42);
    let b = arena.insert(100);

    assert_eq!(arena.get(a), Some(&42));
    assert_eq!(arena.get(b), Some(&100));
}

#[test]
fn test_get_mut() {
    let mut arena = Arena::new();

    let handle = arena.insert(42);
    if let Some(value) = arena.get_mut(handle) {
        *value = 100;
    }

    assert_eq!(arena.get(handle), Some(&100));
}

#[test]
fn test_out_of_range_handle_returns_none() {
    let arena = Arena::<i32>::new();
    assert_eq!(arena.get(Handle::new(0, 999)), None);
}

#[test]
fn test_generation_increments_on_reuse() {
    let mut arena = Arena::new();

    let first = arena.insert("a");
    arena.remove(first);
    let second = arena.insert("b");
    arena.remove(second);
    let third = arena.insert("c");

    assert_eq!(first.index(), third.index());
    assert_eq!(third.generation(), 2);
    assert!(!arena.contains(first));
    assert!(!arena.contains(second));
    assert_eq!(arena.get(third), Some(&"c"));
}

#[test]
fn test_double_remove_is_rejected() {
    let mut arena = Arena::new();
    let handle = arena.insert(7);
    assert_eq!(arena.remove(handle), Some(7));
    assert_eq!(arena.remove(handle), None);
    assert!(arena.is_empty());
}

#[test]
fn test_handles_are_ordered_by_slot() {
    let mut arena = Arena::new();
    let handles: Vec<_> = (0..5).map(|i| arena.insert(i)).collect();
    let collected: Vec<_> = arena.handles().collect();
    assert_eq!(handles, collected);
}
