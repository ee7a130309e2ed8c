//! A last-in first-out stack on top of any `PriorityQueue`.

use std::marker::PhantomData;

use crate::array_heap::BinaryArrayHeap;
use crate::entry::{Entry, Handle};
use crate::{PriorityQueue, Result};

/// A stack that stores its elements within a priority queue.
///
/// Every pushed element is keyed with the negated length of the stack at the time
/// of pushing, so the newest element always carries the smallest key.
/// The backing queue must rank `i64` keys by their natural order.
///
/// # Example
///
/// ```rust
/// use heap_priority_queue::{LinkedHeap, PriorityStack};
///
/// let mut stack = PriorityStack::with_queue(LinkedHeap::new());
/// stack.push('a').unwrap();
/// stack.push('b').unwrap();
/// assert_eq!(stack.pop(), Some('b'));
/// assert_eq!(stack.top(), Some(&'a'));
/// ```
#[derive(Debug, Clone)]
pub struct PriorityStack<E, Q = BinaryArrayHeap<i64, E>> {
    queue: Q,
    marker: PhantomData<fn() -> E>,
}

impl<E> PriorityStack<E, BinaryArrayHeap<i64, E>> {
    /// Creates a new empty stack backed by a binary array heap.
    pub fn new() -> Self {
        Self::with_queue(BinaryArrayHeap::new())
    }
}

impl<E> Default for PriorityStack<E, BinaryArrayHeap<i64, E>> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E, Q> PriorityStack<E, Q>
where
    Q: PriorityQueue<i64, E>,
{
    /// Creates a new stack on top of the given empty queue.
    pub fn with_queue(queue: Q) -> Self {
        debug_assert!(queue.is_empty(), "a stack must start from an empty queue");
        PriorityStack {
            queue: queue,
            marker: PhantomData,
        }
    }

    /// Returns the number of elements on this stack.
    #[inline]
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Returns true if this stack is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Pushes `elem` on top of this stack.
    ///
    /// Returns the handle of the entry within the backing queue.
    pub fn push(&mut self, elem: E) -> Result<Handle> {
        let key = -(self.queue.len() as i64);
        self.queue.insert(key, elem)
    }

    /// Returns a reference to the element on top of this stack if not empty.
    #[inline]
    pub fn top(&self) -> Option<&E> {
        self.queue.min().map(Entry::value)
    }

    /// Removes the element on top of this stack and returns it.
    #[inline]
    pub fn pop(&mut self) -> Option<E> {
        self.queue.remove_min().map(Entry::into_value)
    }

    /// Returns the backing queue.
    pub fn into_inner(self) -> Q {
        self.queue
    }
}
