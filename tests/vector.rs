// Vector integration suite.
//
// Invariants exercised:
// - len <= capacity after every push and pop.
// - Elements come back in insertion order by index.
// - Growth doubles on overflow; shrink halves below a quarter.
// - realloc(0) is indistinguishable from a never-allocated vector.
use chain_collections::Vector;

// Test: the capacity-4 walkthrough.
// Verifies: the fifth push doubles to 8; four pops shrink once, at len 1.
#[test]
fn capacity_four_walkthrough() {
    let mut v = Vector::with_capacity(4);
    for i in 1..=4 {
        v.push_back(i).unwrap();
    }
    assert_eq!(v.capacity(), 4);
    v.push_back(5).unwrap();
    assert_eq!(v.capacity(), 8);

    let mut caps = Vec::new();
    for _ in 0..4 {
        v.pop_back().unwrap();
        caps.push(v.capacity());
    }
    assert_eq!(caps, vec![8, 8, 8, 4]);
    assert_eq!(v.len(), 1);
    assert!(v.capacity() >= v.len());
    assert_eq!(v[0], 1);
}

// Test: explicit grow, then shrink below len.
// Verifies: prefix kept, count truncated.
#[test]
fn init_grow_shrink_deinit() {
    let mut v = Vector::with_capacity(4);
    v.push_back(10).unwrap();
    v.push_back(20).unwrap();

    v.realloc(8).unwrap();
    assert_eq!((v.capacity(), v.len()), (8, 2));
    assert_eq!(v.as_slice(), &[10, 20]);

    v.realloc(1).unwrap();
    assert_eq!((v.capacity(), v.len()), (1, 1));
    assert_eq!(v.as_slice(), &[10]);

    v.deinit();
    assert_eq!((v.capacity(), v.len()), (0, 0));
    assert!(!v.is_allocated());
}

// Test: realloc(0) versus a fresh vector.
#[test]
fn realloc_zero_matches_fresh() {
    let mut v = Vector::with_capacity(16);
    for i in 0..10 {
        v.push_back(i).unwrap();
    }
    v.realloc(0).unwrap();
    let fresh: Vector<i32> = Vector::new();
    assert_eq!(v.capacity(), fresh.capacity());
    assert_eq!(v.len(), fresh.len());
    assert_eq!(v.is_allocated(), fresh.is_allocated());
}

// Test: pop on empty.
// Verifies: reports absence, state unchanged, repeatable.
#[test]
fn pop_empty_reports_absence() {
    let mut v: Vector<String> = Vector::new();
    assert!(v.pop_back().is_none());
    assert!(v.pop_back().is_none());
    assert_eq!(v.capacity(), 0);
}

// Test: explicit eviction of resource-owning elements on truncation.
#[test]
fn truncation_hands_back_owned_elements() {
    let mut v = Vector::new();
    for name in ["gpu0", "gpu1", "gpu2"] {
        v.push_back(name.to_string()).unwrap();
    }
    let mut released = Vec::new();
    v.realloc_with(1, |dev| released.push(dev)).unwrap();
    assert_eq!(released, ["gpu1", "gpu2"]);
    assert_eq!(v.as_slice(), ["gpu0"]);
}
