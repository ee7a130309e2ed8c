//! Navigation within an implicitly indexed complete binary tree.
//!
//! The nodes of a complete binary tree can be numbered level by level, left to right,
//! starting with `1` at the root. The children of the node at index `i` are found at
//! `2 * i` (left) and `2 * i + 1` (right), its parent at `i / 2`.
//!
//! The binary digits of an index below its leading one spell out the route from the
//! root to that index: a `0` descends left, a `1` descends right.
//!
//! ```text
//!             1
//!         /       \
//!        2         3
//!      /   \     /   \
//!     4     5   6     7
//! ```

/// A single move from a node down to one of its children.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Step {
    /// Descend to the left child.
    Left,
    /// Descend to the right child.
    Right,
}

impl Step {
    /// Returns the step towards the sibling side.
    #[inline]
    pub fn opposite(self) -> Step {
        match self {
            Step::Left => Step::Right,
            Step::Right => Step::Left,
        }
    }
}

/// Returns the moves leading from the root down to the node at the given 1-based `index`.
///
/// Returns `None` for index `0` which does not address any node.
///
/// # Example
///
/// ```rust
/// use heap_priority_queue::path::{path_to, Step};
///
/// assert_eq!(path_to(1).unwrap().count(), 0);
/// assert_eq!(path_to(4).unwrap().collect::<Vec<_>>(), vec![Step::Left, Step::Left]);
/// assert_eq!(path_to(6).unwrap().collect::<Vec<_>>(), vec![Step::Right, Step::Left]);
/// assert!(path_to(0).is_none());
/// ```
pub fn path_to(index: usize) -> Option<Path> {
    match index {
        0 => None,
        _ => Some(Path {
            index: index,
            remaining: depth(index),
        }),
    }
}

/// Returns the side on which the node at `index` hangs below its parent.
///
/// Returns `None` for the root and for index `0`.
#[inline]
pub fn side_of(index: usize) -> Option<Step> {
    match index {
        0 | 1 => None,
        _ if index % 2 == 0 => Some(Step::Left),
        _ => Some(Step::Right),
    }
}

/// Returns the 1-based index of the parent of the node at `index`.
///
/// The root and index `0` have no parent.
#[inline]
pub fn parent_of(index: usize) -> Option<usize> {
    match index {
        0 | 1 => None,
        _ => Some(index / 2),
    }
}

/// Returns the depth of the node at the non-zero `index`, the root having depth `0`.
#[inline]
fn depth(index: usize) -> u32 {
    debug_assert!(index != 0);
    usize::BITS - 1 - index.leading_zeros()
}

/// Iterator over the moves from the root down to a node.
///
/// Created by `path_to`.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Path {
    index: usize,
    remaining: u32,
}

impl Iterator for Path {
    type Item = Step;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        match self.remaining {
            0 => None,
            _ => {
                self.remaining -= 1;
                match (self.index >> self.remaining) & 1 {
                    0 => Some(Step::Left),
                    _ => Some(Step::Right),
                }
            }
        }
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.remaining as usize;
        (len, Some(len))
    }
}

impl ExactSizeIterator for Path {}

#[cfg(test)]
mod tests {
    use super::*;
    use super::Step::*;

    fn steps(index: usize) -> Vec<Step> {
        path_to(index).expect("non-zero index").collect()
    }

    #[test]
    fn root_has_empty_path() {
        assert_eq!(steps(1), vec![]);
        assert_eq!(path_to(1).map(|p| p.len()), Some(0));
    }

    #[test]
    fn zero_has_no_path() {
        assert_eq!(path_to(0), None);
        assert_eq!(side_of(0), None);
        assert_eq!(parent_of(0), None);
    }

    #[test]
    fn first_levels() {
        assert_eq!(steps(2), vec![Left]);
        assert_eq!(steps(3), vec![Right]);
        assert_eq!(steps(4), vec![Left, Left]);
        assert_eq!(steps(5), vec![Left, Right]);
        assert_eq!(steps(6), vec![Right, Left]);
        assert_eq!(steps(7), vec![Right, Right]);
        assert_eq!(steps(8), vec![Left, Left, Left]);
        assert_eq!(steps(13), vec![Right, Left, Right]);
    }

    #[test]
    fn path_length_is_depth() {
        for index in 1..1025usize {
            let expected = (index as f64).log2().floor() as usize;
            assert_eq!(steps(index).len(), expected, "index {}", index);
        }
    }

    #[test]
    fn last_step_is_side() {
        for index in 2..512usize {
            assert_eq!(steps(index).last().copied(), side_of(index));
        }
    }

    #[test]
    fn path_extends_parent_path() {
        for index in 2..512usize {
            let parent = parent_of(index).expect("non-root index");
            let mut expected = steps(parent);
            expected.push(side_of(index).expect("non-root index"));
            assert_eq!(steps(index), expected);
        }
    }

    #[test]
    fn largest_index() {
        let path = path_to(usize::MAX).expect("non-zero index");
        assert_eq!(path.len(), (usize::BITS - 1) as usize);
        assert!(path.into_iter().all(|step| step == Right));
    }
}
