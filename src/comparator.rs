//! Total-order comparators used to rank keys within the heaps of this crate.
//!
//! Every heap is parameterized over a `Comparator` that decides which of two keys
//! has the higher priority. The smaller key (as reported by the comparator) is
//! always the one that surfaces first.
//!
//! By default heaps use `NaturalOrder` which simply delegates to the `Ord`
//! implementation of the key type.

use std::cmp::Ordering;
use std::fmt;
use std::marker::PhantomData;

/// Compares two keys and thereby defines the priority order of a heap.
///
/// Implementations must be reflexive: comparing a key with itself yields
/// `Ordering::Equal`. Heaps use this property to decide whether a key is
/// admissible at all, see `admits`.
pub trait Comparator<K: ?Sized> {
    /// Compares `a` with `b`.
    fn compare(&self, a: &K, b: &K) -> Ordering;

    /// Returns `true` if `key` can be ordered consistently by this comparator.
    fn admits(&self, key: &K) -> bool {
        self.compare(key, key) == Ordering::Equal
    }
}

/// Orders keys by their `Ord` implementation.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct NaturalOrder;

impl<K> Comparator<K> for NaturalOrder
where
    K: Ord + ?Sized,
{
    #[inline]
    fn compare(&self, a: &K, b: &K) -> Ordering {
        a.cmp(b)
    }
}

/// Orders keys by the reverse of their `Ord` implementation.
///
/// Turns any heap of this crate into a max-priority queue.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct ReverseOrder;

impl<K> Comparator<K> for ReverseOrder
where
    K: Ord + ?Sized,
{
    #[inline]
    fn compare(&self, a: &K, b: &K) -> Ordering {
        b.cmp(a)
    }
}

/// Orders keys by their `PartialOrd` implementation.
///
/// Pairs without an order compare as `Ordering::Less`. Keys that are not
/// equal to themselves, such as a floating point `NaN`, are thus never admitted.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct PartialOrder;

impl<K> Comparator<K> for PartialOrder
where
    K: PartialOrd + ?Sized,
{
    #[inline]
    fn compare(&self, a: &K, b: &K) -> Ordering {
        a.partial_cmp(b).unwrap_or(Ordering::Less)
    }
}

/// Wraps a closure as a `Comparator`.
///
/// Created by `from_fn`.
pub struct FnComparator<F, K: ?Sized> {
    cmp: F,
    marker: PhantomData<fn(&K, &K)>,
}

impl<F: Clone, K: ?Sized> Clone for FnComparator<F, K> {
    fn clone(&self) -> Self {
        FnComparator {
            cmp: self.cmp.clone(),
            marker: PhantomData,
        }
    }
}

impl<F: Copy, K: ?Sized> Copy for FnComparator<F, K> {}

impl<F, K: ?Sized> fmt::Debug for FnComparator<F, K> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("FnComparator").finish()
    }
}

impl<F, K> Comparator<K> for FnComparator<F, K>
where
    F: Fn(&K, &K) -> Ordering,
    K: ?Sized,
{
    #[inline]
    fn compare(&self, a: &K, b: &K) -> Ordering {
        (self.cmp)(a, b)
    }
}

/// Creates a `Comparator` from the given closure.
///
/// # Example
///
/// ```rust
/// use heap_priority_queue::{from_fn, BinaryArrayHeap, PriorityQueue};
///
/// let by_len = from_fn(|a: &&str, b: &&str| a.len().cmp(&b.len()));
/// let mut heap = BinaryArrayHeap::with_comparator(by_len);
/// heap.insert("three", 3).unwrap();
/// heap.insert("one", 1).unwrap();
/// assert_eq!(heap.min().map(|e| *e.value()), Some(1));
/// ```
pub fn from_fn<K, F>(cmp: F) -> FnComparator<F, K>
where
    F: Fn(&K, &K) -> Ordering,
    K: ?Sized,
{
    FnComparator {
        cmp: cmp,
        marker: PhantomData,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn natural_and_reverse() {
        assert_eq!(NaturalOrder.compare(&1, &2), Ordering::Less);
        assert_eq!(ReverseOrder.compare(&1, &2), Ordering::Greater);
        assert_eq!(NaturalOrder.compare("b", "a"), Ordering::Greater);
        assert!(NaturalOrder.admits(&42));
        assert!(ReverseOrder.admits(&42));
    }

    #[test]
    fn partial_order_rejects_nan() {
        assert_eq!(PartialOrder.compare(&1.5, &2.5), Ordering::Less);
        assert_eq!(PartialOrder.compare(&2.5, &2.5), Ordering::Equal);
        assert!(PartialOrder.admits(&0.0));
        assert!(!PartialOrder.admits(&::std::f64::NAN));
    }

    #[test]
    fn closure_comparator() {
        let by_abs = from_fn(|a: &i32, b: &i32| a.abs().cmp(&b.abs()));
        assert_eq!(by_abs.compare(&-5, &3), Ordering::Greater);
        assert_eq!(by_abs.compare(&-3, &3), Ordering::Equal);
        assert!(by_abs.admits(&-7));
    }

    #[test]
    fn irreflexive_closure_is_not_admitted() {
        let broken = from_fn(|_: &u8, _: &u8| Ordering::Less);
        assert!(!broken.admits(&0));
    }
}
