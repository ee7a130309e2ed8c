#![deny(unused_imports)]
#![deny(missing_docs)]
#![cfg_attr(all(feature = "bench", test), feature(test))]

//! Heap based priority queues for Rust.
//!
//! This crate provides three interchangeable implementations of the same
//! addressable priority queue contract, the `PriorityQueue` trait:
//!
//! - `BinaryArrayHeap`: a binary heap stored densely within an array.
//! - `TernaryArrayHeap`: the same heap with a branching factor of three.
//!   Both are aliases of the generic `ArrayHeap` that works for any branching factor.
//! - `LinkedHeap`: a complete binary tree of explicitly linked nodes that restores the
//!   heap order by exchanging whole nodes instead of their entries.
//!
//! Inserting an entry returns a `Handle` that addresses it until it leaves the heap.
//! Using a handle afterwards fails with `Error::StaleHandle`.
//!
//! Keys are ranked by a `Comparator` which defaults to the natural order of the key type.
//! Keys that the comparator cannot compare with themselves are rejected on insertion.
//!
//! # Example
//!
//! ```rust
//! use heap_priority_queue::{LinkedHeap, PriorityQueue, TernaryArrayHeap};
//!
//! fn drain<Q: PriorityQueue<i32, char>>(mut queue: Q) -> Vec<i32> {
//!     for (key, value) in [(5, 'e'), (3, 'c'), (8, 'h'), (1, 'a')] {
//!         queue.insert(key, value).unwrap();
//!     }
//!     queue.drain_min().map(|entry| *entry.key()).collect()
//! }
//!
//! assert_eq!(drain(TernaryArrayHeap::new()), vec![1, 3, 5, 8]);
//! assert_eq!(drain(LinkedHeap::new()), vec![1, 3, 5, 8]);
//! ```

#[cfg(all(feature = "bench", test))]
extern crate test;

mod array_heap;
mod comparator;
mod entry;
mod linked_heap;
pub mod path;
mod stack;

pub use array_heap::{ArrayHeap, BinaryArrayHeap, TernaryArrayHeap};
pub use comparator::{from_fn, Comparator, FnComparator, NaturalOrder, PartialOrder, ReverseOrder};
pub use entry::{Entry, Handle};
pub use linked_heap::LinkedHeap;
pub use stack::PriorityStack;

use std::marker::PhantomData;

/// Errors that can be caused while using the heaps of this crate.
#[derive(Debug, Copy, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// Caused by `insert` when the comparator cannot order the key with itself.
    ///
    /// The heap is left unmodified.
    #[error("incompatible key: the comparator does not order the key consistently")]
    IncompatibleKey,

    /// Caused when using a handle whose entry has already been removed from the heap.
    #[error("stale handle: the entry is no longer stored within the heap")]
    StaleHandle,
}

/// Generic `Result` type for heap methods.
pub type Result<T> = ::std::result::Result<T, Error>;

/// The contract shared by all heaps of this crate.
///
/// All implementations are min-heaps with respect to their `Comparator`:
/// `min` and `remove_min` surface the entry with the smallest key.
/// Among equal keys no particular order is guaranteed.
pub trait PriorityQueue<K, V> {
    /// Returns the number of entries stored in this queue.
    fn len(&self) -> usize;

    /// Returns true if this queue is empty.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Inserts `value` with the associated `key` and returns a handle to the new entry.
    ///
    /// Fails with `Error::IncompatibleKey` if the comparator does not admit the key.
    fn insert(&mut self, key: K, value: V) -> Result<Handle>;

    /// Returns a reference to the entry with the minimum key or `None` if empty.
    fn min(&self) -> Option<&Entry<K, V>>;

    /// Removes the entry with the minimum key and returns it or `None` if empty.
    fn remove_min(&mut self) -> Option<Entry<K, V>>;

    /// Returns a reference to the entry associated with the given handle.
    fn get(&self, handle: Handle) -> Result<&Entry<K, V>>;

    /// Returns true if the entry associated with the given handle is still stored.
    fn contains(&self, handle: Handle) -> bool {
        self.get(handle).is_ok()
    }

    /// Removes the entry associated with the given handle and returns it.
    fn remove(&mut self, handle: Handle) -> Result<Entry<K, V>>;

    /// Iterate over the entries of this queue in a sorted-by-min order. Drains the queue.
    fn drain_min(self) -> DrainMin<Self, K, V>
    where
        Self: Sized,
    {
        DrainMin {
            queue: self,
            marker: PhantomData,
        }
    }
}

/// Iterator over entries stored within a queue in a sorted-by-min order. Drains the queue.
#[derive(Debug)]
pub struct DrainMin<Q, K, V> {
    queue: Q,
    marker: PhantomData<fn() -> (K, V)>,
}

impl<Q, K, V> Iterator for DrainMin<Q, K, V>
where
    Q: PriorityQueue<K, V>,
{
    type Item = Entry<K, V>;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.queue.remove_min()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.queue.len();
        (len, Some(len))
    }
}

impl<Q, K, V> ExactSizeIterator for DrainMin<Q, K, V> where Q: PriorityQueue<K, V> {}
