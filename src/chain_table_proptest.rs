#![cfg(test)]

// Property tests for ChainTable kept inside the crate so they can check
// chain placement against the private bucket layout.

use crate::chain_table::{ChainTable, Handle};
use crate::hash::{KeyHasher, ShiftHash};
use proptest::prelude::*;
use std::collections::{BTreeSet, HashMap};

prop_compose! {
    fn arb_key()(k in proptest::collection::vec(0u8..4, 0..4)) -> Vec<u8> { k }
}

#[derive(Clone, Debug)]
enum Op {
    Emplace(Vec<u8>, i32),
    Delete(Vec<u8>),
    Search(Vec<u8>),
    Find(Vec<u8>),
    Mutate(Vec<u8>, i32),
    RemoveHandle(Vec<u8>),
}

prop_compose! {
    fn arb_ops()(ops in proptest::collection::vec(
        prop_oneof![
            (arb_key(), any::<i32>()).prop_map(|(k, v)| Op::Emplace(k, v)),
            arb_key().prop_map(Op::Delete),
            arb_key().prop_map(Op::Search),
            arb_key().prop_map(Op::Find),
            (arb_key(), any::<i32>()).prop_map(|(k, d)| Op::Mutate(k, d)),
            arb_key().prop_map(Op::RemoveHandle),
        ], 1..120)) -> Vec<Op> { ops }
}

fn check_structure<H: KeyHasher>(
    sut: &ChainTable<i32, H>,
    model: &HashMap<Vec<u8>, i32>,
    hasher: &H,
) -> Result<(), TestCaseError> {
    prop_assert_eq!(sut.len(), model.len());
    prop_assert_eq!(sut.is_empty(), model.is_empty());
    let mut seen = BTreeSet::new();
    let mut total = 0;
    for b in 0..sut.bucket_count() {
        for key in sut.bucket_keys(b) {
            prop_assert_eq!(hasher.fingerprint(key) as usize % sut.bucket_count(), b);
            prop_assert!(seen.insert(key.to_vec()), "duplicate key in chains");
            total += 1;
        }
    }
    prop_assert_eq!(total, model.len());
    Ok(())
}

fn run_ops<H: KeyHasher>(
    mut sut: ChainTable<i32, H>,
    hasher: H,
    ops: Vec<Op>,
) -> Result<(), TestCaseError> {
    let mut model: HashMap<Vec<u8>, i32> = HashMap::new();
    let mut stale: Vec<Handle> = Vec::new();

    for op in ops {
        match op {
            Op::Emplace(k, v) => {
                let prev = sut.emplace_bytes(&k, v).expect("emplace ok");
                prop_assert_eq!(prev, model.insert(k, v));
            }
            Op::Delete(k) => {
                let before = sut.len();
                let got = sut.delete_bytes(&k);
                prop_assert_eq!(got, model.remove(&k));
                if got.is_some() {
                    prop_assert_eq!(sut.len(), before - 1);
                    prop_assert!(sut.search_bytes(&k).is_none());
                } else {
                    prop_assert_eq!(sut.len(), before);
                }
            }
            Op::Search(k) => {
                prop_assert_eq!(sut.search_bytes(&k), model.get(&k));
                prop_assert_eq!(sut.has_bytes(&k), model.contains_key(&k));
            }
            Op::Find(k) => {
                let h = sut.find_bytes(&k);
                prop_assert_eq!(h.is_some(), model.contains_key(&k));
                if let Some(h) = h {
                    prop_assert_eq!(h.key(&sut), Some(k.as_slice()));
                    prop_assert_eq!(h.value(&sut), model.get(&k));
                }
            }
            Op::Mutate(k, d) => {
                if let Some(h) = sut.find_bytes(&k) {
                    let v = h.value_mut(&mut sut).expect("live handle resolves");
                    *v = v.saturating_add(d);
                    if let Some(mv) = model.get_mut(&k) {
                        *mv = mv.saturating_add(d);
                    }
                } else {
                    prop_assert!(!model.contains_key(&k));
                }
            }
            Op::RemoveHandle(k) => {
                if let Some(h) = sut.find_bytes(&k) {
                    let (kk, vv) = sut.remove(h).expect("handle valid for removal");
                    prop_assert_eq!(&*kk, k.as_slice());
                    prop_assert_eq!(Some(vv), model.remove(&k));
                    stale.push(h);
                }
            }
        }

        // Post-conditions after each op
        for &h in &stale {
            prop_assert!(h.value(&sut).is_none());
        }
        check_structure(&sut, &model, &hasher)?;
    }
    Ok(())
}

// Collision variant using a constant hasher to stress chain unlinking.
#[derive(Clone, Copy, Default)]
struct ConstHash;
impl KeyHasher for ConstHash {
    fn fingerprint(&self, _key: &[u8]) -> u32 {
        0
    }
}

proptest! {
    #[test]
    fn prop_state_machine(buckets in 1usize..8, ops in arb_ops()) {
        let sut = ChainTable::with_hasher(buckets, ShiftHash).expect("nonzero buckets");
        run_ops(sut, ShiftHash, ops)?;
    }

    #[test]
    fn prop_state_machine_with_collisions(buckets in 1usize..4, ops in arb_ops()) {
        let sut = ChainTable::with_hasher(buckets, ConstHash).expect("nonzero buckets");
        run_ops(sut, ConstHash, ops)?;
    }

    /// Inserting n distinct keys and deleting them all empties every chain.
    #[test]
    fn prop_insert_delete_round_trip(
        keys in proptest::collection::btree_set(proptest::collection::vec(any::<u8>(), 0..6), 0..40),
        buckets in 1usize..16,
    ) {
        let mut t: ChainTable<usize> = ChainTable::new(buckets).expect("nonzero buckets");
        for (i, k) in keys.iter().enumerate() {
            prop_assert_eq!(t.emplace_bytes(k, i).expect("emplace ok"), None);
        }
        prop_assert_eq!(t.len(), keys.len());
        for k in &keys {
            prop_assert!(t.delete_bytes(k).is_some());
        }
        prop_assert_eq!(t.len(), 0);
        for b in 0..t.bucket_count() {
            prop_assert_eq!(t.chain_len(b), 0);
        }
    }
}
