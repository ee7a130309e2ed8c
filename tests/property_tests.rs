//! Property-based tests using proptest
//!
//! These tests generate random sequences of operations, apply them to every heap
//! and compare the results against a simple model and against each other.

use heap_priority_queue::{
    BinaryArrayHeap, Error, Handle, LinkedHeap, PriorityQueue, TernaryArrayHeap,
};
use itertools::Itertools;
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    Insert(i32),
    RemoveMin,
    /// Removes the entry of a live handle picked by this index.
    Remove(usize),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => (-50i32..50).prop_map(Op::Insert),
        2 => Just(Op::RemoveMin),
        1 => any::<usize>().prop_map(Op::Remove),
    ]
}

fn insert_or_remove_min() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => (-50i32..50).prop_map(Op::Insert),
        2 => Just(Op::RemoveMin),
    ]
}

fn fail(err: Error) -> TestCaseError {
    TestCaseError::fail(err.to_string())
}

/// Applies `ops` to `queue` while checking it against a model after every step.
///
/// Every inserted value is the index of its insert operation. Returns the keys
/// of all removed entries in removal order.
fn run_checked<Q>(mut queue: Q, ops: &[Op]) -> Result<Vec<i32>, TestCaseError>
where
    Q: PriorityQueue<i32, usize>,
{
    let mut live: Vec<(i32, usize, Handle)> = Vec::new();
    let mut removed = Vec::new();
    let mut dead = Vec::new();

    for (id, op) in ops.iter().enumerate() {
        match *op {
            Op::Insert(key) => {
                let handle = queue.insert(key, id).map_err(fail)?;
                live.push((key, id, handle));
            }
            Op::RemoveMin => {
                let expected = live.iter().map(|&(key, _, _)| key).min();
                let entry = queue.remove_min();
                prop_assert_eq!(entry.as_ref().map(|e| *e.key()), expected);
                if let Some(entry) = entry {
                    let pos = live.iter().position(|&(_, id, _)| id == *entry.value());
                    prop_assert!(pos.is_some(), "removed an entry that was never inserted");
                    let (key, _, handle) = live.swap_remove(pos.unwrap_or_default());
                    prop_assert_eq!(key, *entry.key());
                    removed.push(key);
                    dead.push(handle);
                }
            }
            Op::Remove(pick) => {
                if live.is_empty() {
                    continue;
                }
                let (key, id, handle) = live.swap_remove(pick % live.len());
                let entry = queue.remove(handle).map_err(fail)?;
                prop_assert_eq!(entry.into_parts(), (key, id));
                removed.push(key);
                dead.push(handle);
            }
        }
        prop_assert_eq!(queue.len(), live.len());
        prop_assert_eq!(queue.is_empty(), live.is_empty());
        prop_assert_eq!(
            queue.min().map(|e| *e.key()),
            live.iter().map(|&(key, _, _)| key).min()
        );
    }

    for &(key, id, handle) in live.iter() {
        let entry = queue.get(handle).map_err(fail)?;
        prop_assert_eq!((*entry.key(), *entry.value()), (key, id));
    }
    for &handle in dead.iter() {
        prop_assert_eq!(queue.get(handle).err(), Some(Error::StaleHandle));
        prop_assert!(!queue.contains(handle));
    }
    Ok(removed)
}

fn insert_all<Q: PriorityQueue<i32, usize>>(mut queue: Q, keys: &[i32]) -> Q {
    for (id, &key) in keys.iter().enumerate() {
        queue.insert(key, id).expect("integer keys are always admitted");
    }
    queue
}

fn drain_keys<Q: PriorityQueue<i32, usize>>(queue: Q) -> Vec<i32> {
    queue.drain_min().map(|entry| *entry.key()).collect()
}

proptest! {
    #[test]
    fn binary_matches_model(ops in prop::collection::vec(op(), 0..200)) {
        run_checked(BinaryArrayHeap::new(), &ops)?;
    }

    #[test]
    fn ternary_matches_model(ops in prop::collection::vec(op(), 0..200)) {
        run_checked(TernaryArrayHeap::new(), &ops)?;
    }

    #[test]
    fn linked_matches_model(ops in prop::collection::vec(op(), 0..200)) {
        run_checked(LinkedHeap::new(), &ops)?;
    }

    #[test]
    fn variants_agree(ops in prop::collection::vec(insert_or_remove_min(), 0..200)) {
        let binary = run_checked(BinaryArrayHeap::new(), &ops)?;
        let ternary = run_checked(TernaryArrayHeap::new(), &ops)?;
        let linked = run_checked(LinkedHeap::new(), &ops)?;
        prop_assert_eq!(&binary, &ternary);
        prop_assert_eq!(&binary, &linked);
    }

    #[test]
    fn round_trip_is_sorted(keys in prop::collection::vec(any::<i32>(), 0..300)) {
        let mut sorted = keys.clone();
        sorted.sort();
        for drained in [
            drain_keys(insert_all(BinaryArrayHeap::new(), &keys)),
            drain_keys(insert_all(TernaryArrayHeap::new(), &keys)),
            drain_keys(insert_all(LinkedHeap::new(), &keys)),
        ] {
            prop_assert!(drained.iter().tuple_windows().all(|(a, b)| a <= b));
            prop_assert_eq!(&drained, &sorted);
        }
    }

    #[test]
    fn heapify_matches_inserts(keys in prop::collection::vec(-20i32..20, 0..300)) {
        let values = (0..keys.len()).collect::<Vec<_>>();
        let binary = BinaryArrayHeap::from_vecs(keys.clone(), values.clone()).map_err(fail)?;
        let ternary = TernaryArrayHeap::from_vecs(keys.clone(), values).map_err(fail)?;
        prop_assert_eq!(binary.len(), keys.len());
        prop_assert_eq!(ternary.len(), keys.len());

        let inserted = drain_keys(insert_all(BinaryArrayHeap::new(), &keys));
        prop_assert_eq!(drain_keys(binary), inserted.clone());
        prop_assert_eq!(drain_keys(ternary), inserted);
    }
}
