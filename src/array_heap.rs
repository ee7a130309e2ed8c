//! An addressable d-ary heap stored densely within an array.
//!
//! The tree shape is implicit in the array indices: the parent of the entry at index `j`
//! is found at `(j - 1) / D` and its children occupy `D * j + 1 ..= D * j + D`.
//!
//! Entries themselves live within a `Stash` so that handles stay stable while the
//! heap order is restored by exchanging array slots.

use std::cmp::{self, Ordering};

use log::{debug, trace};
use stash::Stash;

use crate::comparator::{Comparator, NaturalOrder};
use crate::entry::{Entry, Handle, Serials};
use crate::{Error, PriorityQueue, Result};

/// Index of an entry within the stash of an `ArrayHeap`.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
struct SlotId(usize);

impl From<usize> for SlotId {
    fn from(val: usize) -> SlotId {
        SlotId(val)
    }
}

impl From<SlotId> for usize {
    fn from(id: SlotId) -> usize {
        id.0
    }
}

#[derive(Debug, Clone)]
struct Slot<K, V> {
    entry: Entry<K, V>,
    serial: u64,
    /// Current index of this slot within the heap order.
    pos: usize,
}

/// An addressable heap with branching factor `D` stored within an array.
///
/// Use the `BinaryArrayHeap` and `TernaryArrayHeap` aliases for the common
/// branching factors. `D` must be at least two.
#[derive(Debug, Clone)]
pub struct ArrayHeap<K, V, const D: usize, C = NaturalOrder> {
    /// Slots in heap order: index `0` holds the minimum.
    order: Vec<SlotId>,
    slots: Stash<Slot<K, V>, SlotId>,
    serials: Serials,
    cmp: C,
}

/// An `ArrayHeap` where every entry has up to two children.
pub type BinaryArrayHeap<K, V, C = NaturalOrder> = ArrayHeap<K, V, 2, C>;

/// An `ArrayHeap` where every entry has up to three children.
///
/// Shallower than the binary heap which makes bulk construction and draining cheaper
/// at the cost of one more comparison per level when sifting down.
pub type TernaryArrayHeap<K, V, C = NaturalOrder> = ArrayHeap<K, V, 3, C>;

impl<K, V, const D: usize> ArrayHeap<K, V, D, NaturalOrder>
where
    K: Ord,
{
    /// Creates a new empty heap ordered by the natural order of `K`.
    #[inline]
    pub fn new() -> Self {
        Self::with_comparator(NaturalOrder)
    }

    /// Builds a heap from parallel sequences of keys and values in linear time.
    ///
    /// Surplus elements of the longer sequence are ignored.
    pub fn from_vecs(keys: Vec<K>, values: Vec<V>) -> Result<Self> {
        Self::from_pairs_with(keys.into_iter().zip(values), NaturalOrder)
    }
}

impl<K, V, const D: usize> Default for ArrayHeap<K, V, D, NaturalOrder>
where
    K: Ord,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, const D: usize, C> ArrayHeap<K, V, D, C>
where
    C: Comparator<K>,
{
    const BRANCHING: usize = {
        assert!(D >= 2, "an array heap needs a branching factor of at least two");
        D
    };

    /// Creates a new empty heap ordered by the given comparator.
    #[inline]
    pub fn with_comparator(cmp: C) -> Self {
        ArrayHeap {
            order: Vec::new(),
            slots: Stash::default(),
            serials: Serials::default(),
            cmp: cmp,
        }
    }

    /// Builds a heap from the given key/value pairs in linear time.
    ///
    /// Fails with `Error::IncompatibleKey` before building anything
    /// if any of the keys is not admitted by the comparator.
    pub fn from_pairs_with<I>(pairs: I, cmp: C) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
    {
        let pairs = pairs.into_iter().collect::<Vec<_>>();
        let mut heap = Self::with_comparator(cmp);
        for (key, _) in pairs.iter() {
            heap.admit(key)?;
        }
        heap.order.reserve(pairs.len());
        for (key, value) in pairs {
            let pos = heap.order.len();
            let id = heap.put(Entry::new(key, value), pos);
            heap.order.push(id);
        }
        heap.heapify();
        Ok(heap)
    }

    /// Returns a reference to the comparator of this heap.
    #[inline]
    pub fn comparator(&self) -> &C {
        &self.cmp
    }

    /// Iterate over the entries of this heap in unspecified order.
    pub fn entries<'a>(&'a self) -> impl Iterator<Item = &'a Entry<K, V>> + 'a {
        self.order.iter().map(move |&id| &self.slot(id).entry)
    }

    #[inline]
    fn parent(pos: usize) -> usize {
        (pos - 1) / Self::BRANCHING
    }

    #[inline]
    fn first_child(pos: usize) -> usize {
        Self::BRANCHING * pos + 1
    }

    /// Returns the slot associated with the given id.
    /// Note that this won't fail on usage for a correct implementation of `ArrayHeap`.
    #[inline]
    fn slot(&self, id: SlotId) -> &Slot<K, V> {
        self.slots.get(id).expect("heap order refers to an empty slot")
    }

    #[inline]
    fn slot_mut(&mut self, id: SlotId) -> &mut Slot<K, V> {
        self.slots.get_mut(id).expect("heap order refers to an empty slot")
    }

    #[inline]
    fn key_at(&self, pos: usize) -> &K {
        self.slot(self.order[pos]).entry.key()
    }

    #[inline]
    fn compare_at(&self, i: usize, j: usize) -> Ordering {
        self.cmp.compare(self.key_at(i), self.key_at(j))
    }

    fn admit(&self, key: &K) -> Result<()> {
        match self.cmp.admits(key) {
            true => Ok(()),
            false => {
                debug!("array heap rejected a key its comparator cannot order");
                Err(Error::IncompatibleKey)
            }
        }
    }

    fn put(&mut self, entry: Entry<K, V>, pos: usize) -> SlotId {
        let serial = self.serials.next();
        self.slots.put(Slot {
            entry: entry,
            serial: serial,
            pos: pos,
        })
    }

    /// Resolves a handle to the slot it addresses.
    fn lookup(&self, handle: Handle) -> Result<SlotId> {
        let id = SlotId(handle.slot());
        match self.slots.get(id) {
            Some(slot) if slot.serial == handle.serial() => Ok(id),
            _ => {
                debug!("array heap was used with stale handle {:?}", handle);
                Err(Error::StaleHandle)
            }
        }
    }

    /// Exchanges the slots at the heap positions `i` and `j`.
    #[inline]
    fn swap(&mut self, i: usize, j: usize) {
        self.order.swap(i, j);
        let (id_i, id_j) = (self.order[i], self.order[j]);
        self.slot_mut(id_i).pos = i;
        self.slot_mut(id_j).pos = j;
    }

    /// Moves the entry at `pos` towards the root while it is smaller than its parent.
    ///
    /// Returns the final position of the entry.
    fn up_heap(&mut self, mut pos: usize) -> usize {
        while pos > 0 {
            let parent = Self::parent(pos);
            if self.compare_at(pos, parent) != Ordering::Less {
                break;
            }
            self.swap(pos, parent);
            pos = parent;
        }
        pos
    }

    /// Moves the entry at `pos` away from the root while any child is smaller.
    ///
    /// Ties between children are resolved towards the leftmost one.
    fn down_heap(&mut self, mut pos: usize) {
        let len = self.order.len();
        loop {
            let first = Self::first_child(pos);
            if first >= len {
                return;
            }
            let end = cmp::min(first + Self::BRANCHING, len);
            let mut smallest = first;
            for child in first + 1..end {
                if self.compare_at(child, smallest) == Ordering::Less {
                    smallest = child;
                }
            }
            if self.compare_at(smallest, pos) != Ordering::Less {
                return;
            }
            self.swap(pos, smallest);
            pos = smallest;
        }
    }

    /// Restores the heap order of the whole array bottom-up.
    fn heapify(&mut self) {
        let len = self.order.len();
        trace!("heapifying {} entries with branching factor {}", len, D);
        if len < 2 {
            return;
        }
        for pos in (0..=Self::parent(len - 1)).rev() {
            self.down_heap(pos);
        }
    }

    /// Removes the entry at heap position `pos` by moving the last entry into its place.
    fn remove_at(&mut self, pos: usize) -> Entry<K, V> {
        let last = self.order.len() - 1;
        self.swap(pos, last);
        let id = self.order.pop().expect("removal from an empty heap");
        if pos < self.order.len() {
            let pos = self.up_heap(pos);
            self.down_heap(pos);
        }
        self.slots
            .take(id)
            .expect("heap order refers to an empty slot")
            .entry
    }
}

impl<K, V, const D: usize, C> PriorityQueue<K, V> for ArrayHeap<K, V, D, C>
where
    C: Comparator<K>,
{
    #[inline]
    fn len(&self) -> usize {
        self.order.len()
    }

    fn insert(&mut self, key: K, value: V) -> Result<Handle> {
        self.admit(&key)?;
        let pos = self.order.len();
        let id = self.put(Entry::new(key, value), pos);
        let handle = Handle::new(id.into(), self.slot(id).serial);
        self.order.push(id);
        self.up_heap(pos);
        Ok(handle)
    }

    #[inline]
    fn min(&self) -> Option<&Entry<K, V>> {
        self.order.first().map(|&id| &self.slot(id).entry)
    }

    fn remove_min(&mut self) -> Option<Entry<K, V>> {
        match self.order.is_empty() {
            true => None,
            false => Some(self.remove_at(0)),
        }
    }

    fn get(&self, handle: Handle) -> Result<&Entry<K, V>> {
        self.lookup(handle).map(|id| &self.slot(id).entry)
    }

    fn remove(&mut self, handle: Handle) -> Result<Entry<K, V>> {
        let id = self.lookup(handle)?;
        let pos = self.slot(id).pos;
        Ok(self.remove_at(pos))
    }
}


#[cfg(all(feature = "bench", test))]
mod bench {
    use super::*;
    use rand::seq::SliceRandom;
    use rand::thread_rng;
    use test::{black_box, Bencher};

    fn setup_sample() -> Vec<i64> {
        let mut sample = (0..100_000).map(|i| i % 1000).collect::<Vec<i64>>();
        sample.shuffle(&mut thread_rng());
        sample
    }

    fn build<const D: usize>(sample: &[i64]) -> ArrayHeap<i64, i64, D> {
        ArrayHeap::from_vecs(sample.to_vec(), sample.to_vec()).unwrap()
    }

    #[bench]
    fn binary_heapify(bencher: &mut Bencher) {
        let sample = setup_sample();
        bencher.iter(|| black_box(build::<2>(&sample)));
    }

    #[bench]
    fn ternary_heapify(bencher: &mut Bencher) {
        let sample = setup_sample();
        bencher.iter(|| black_box(build::<3>(&sample)));
    }

    #[bench]
    fn binary_insert(bencher: &mut Bencher) {
        let sample = setup_sample();
        bencher.iter(|| {
            let mut heap = BinaryArrayHeap::new();
            for &key in sample.iter() {
                black_box(heap.insert(key, ()).unwrap());
            }
        });
    }

    #[bench]
    fn binary_drain(bencher: &mut Bencher) {
        let heap = build::<2>(&setup_sample());
        bencher.iter(|| {
            let mut heap = heap.clone();
            while let Some(_) = black_box(heap.remove_min()) {}
        });
    }

    #[bench]
    fn ternary_drain(bencher: &mut Bencher) {
        let heap = build::<3>(&setup_sample());
        bencher.iter(|| {
            let mut heap = heap.clone();
            while let Some(_) = black_box(heap.remove_min()) {}
        });
    }
}
