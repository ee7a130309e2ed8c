//! A heap stored as a complete binary tree of explicitly linked nodes.
//!
//! Nodes live within a `Stash` and refer to their parent and children by id.
//! The heap order is restored by exchanging whole nodes between tree positions
//! instead of exchanging their entries, so a node keeps its id (and thus every
//! handle to it stays valid) wherever it moves within the tree.
//!
//! Although the tree is linked, it is navigated as if it were stored within an
//! array: the node at 1-based index `i` is reached by following `path::path_to(i)`
//! from the root.

use std::cmp::Ordering;

use log::{debug, trace};
use stash::Stash;

use crate::comparator::{Comparator, NaturalOrder};
use crate::entry::{Entry, Handle, Serials};
use crate::path::{self, Step};
use crate::{Error, PriorityQueue, Result};

/// Index of a node within the stash of a `LinkedHeap`.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
struct NodeId(usize);

impl From<usize> for NodeId {
    fn from(val: usize) -> NodeId {
        NodeId(val)
    }
}

impl From<NodeId> for usize {
    fn from(id: NodeId) -> usize {
        id.0
    }
}

/// The tree neighbourhood of a node.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
struct Links {
    parent: Option<NodeId>,
    left: Option<NodeId>,
    right: Option<NodeId>,
}

impl Links {
    #[inline]
    fn child(&self, step: Step) -> Option<NodeId> {
        match step {
            Step::Left => self.left,
            Step::Right => self.right,
        }
    }

    #[inline]
    fn child_mut(&mut self, step: Step) -> &mut Option<NodeId> {
        match step {
            Step::Left => &mut self.left,
            Step::Right => &mut self.right,
        }
    }

    #[inline]
    fn children(self) -> impl Iterator<Item = NodeId> {
        self.left.into_iter().chain(self.right)
    }
}

#[derive(Debug, Clone)]
struct Node<K, V> {
    entry: Entry<K, V>,
    serial: u64,
    links: Links,
}

/// An addressable heap stored as a complete binary tree of linked nodes.
///
/// Offers the same contract as the array heaps plus navigation along the tree
/// through handles: `root`, `parent`, `left` and `right`.
#[derive(Debug, Clone)]
pub struct LinkedHeap<K, V, C = NaturalOrder> {
    root: Option<NodeId>,
    /// Number of nodes in the tree; cannot be derived from the links without a traversal.
    len: usize,
    nodes: Stash<Node<K, V>, NodeId>,
    serials: Serials,
    cmp: C,
}

impl<K, V> LinkedHeap<K, V, NaturalOrder>
where
    K: Ord,
{
    /// Creates a new empty heap ordered by the natural order of `K`.
    #[inline]
    pub fn new() -> Self {
        Self::with_comparator(NaturalOrder)
    }
}

impl<K, V> Default for LinkedHeap<K, V, NaturalOrder>
where
    K: Ord,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, C> LinkedHeap<K, V, C>
where
    C: Comparator<K>,
{
    /// Creates a new empty heap ordered by the given comparator.
    #[inline]
    pub fn with_comparator(cmp: C) -> Self {
        LinkedHeap {
            root: None,
            len: 0,
            nodes: Stash::default(),
            serials: Serials::default(),
            cmp: cmp,
        }
    }

    /// Returns a reference to the comparator of this heap.
    #[inline]
    pub fn comparator(&self) -> &C {
        &self.cmp
    }

    /// Returns a handle to the root node, which holds the minimum, or `None` if empty.
    pub fn root(&self) -> Option<Handle> {
        self.root.map(|id| self.handle_of(id))
    }

    /// Returns true if the node of the given handle is the root of the tree.
    pub fn is_root(&self, handle: Handle) -> Result<bool> {
        self.lookup(handle).map(|id| self.root == Some(id))
    }

    /// Returns a handle to the parent of the given node or `None` for the root.
    pub fn parent(&self, handle: Handle) -> Result<Option<Handle>> {
        let id = self.lookup(handle)?;
        Ok(self.node(id).links.parent.map(|id| self.handle_of(id)))
    }

    /// Returns a handle to the left child of the given node if there is one.
    pub fn left(&self, handle: Handle) -> Result<Option<Handle>> {
        self.child_of(handle, Step::Left)
    }

    /// Returns a handle to the right child of the given node if there is one.
    pub fn right(&self, handle: Handle) -> Result<Option<Handle>> {
        self.child_of(handle, Step::Right)
    }

    /// Iterate over the entries of this heap in unspecified order.
    pub fn entries<'a>(&'a self) -> impl Iterator<Item = &'a Entry<K, V>> + 'a {
        self.nodes.values().map(|node| &node.entry)
    }

    fn child_of(&self, handle: Handle, step: Step) -> Result<Option<Handle>> {
        let id = self.lookup(handle)?;
        Ok(self.node(id).links.child(step).map(|id| self.handle_of(id)))
    }

    /// Returns a reference to the `Node` that is associated with the given id.
    /// Note that this won't fail on usage for a correct implementation of `LinkedHeap`.
    #[inline]
    fn node(&self, id: NodeId) -> &Node<K, V> {
        self.nodes.get(id).expect("tree links refer to a removed node")
    }

    #[inline]
    fn node_mut(&mut self, id: NodeId) -> &mut Node<K, V> {
        self.nodes.get_mut(id).expect("tree links refer to a removed node")
    }

    #[inline]
    fn handle_of(&self, id: NodeId) -> Handle {
        Handle::new(id.into(), self.node(id).serial)
    }

    /// Resolves a handle to the node it addresses.
    ///
    /// Removed nodes leave the stash, and a slot reused by a later node carries
    /// a different serial, so stale handles never resolve.
    fn lookup(&self, handle: Handle) -> Result<NodeId> {
        let id = NodeId(handle.slot());
        match self.nodes.get(id) {
            Some(node) if node.serial == handle.serial() => Ok(id),
            _ => {
                debug!("linked heap was used with stale handle {:?}", handle);
                Err(Error::StaleHandle)
            }
        }
    }

    fn admit(&self, key: &K) -> Result<()> {
        match self.cmp.admits(key) {
            true => Ok(()),
            false => {
                debug!("linked heap rejected a key its comparator cannot order");
                Err(Error::IncompatibleKey)
            }
        }
    }

    #[inline]
    fn compare(&self, a: NodeId, b: NodeId) -> Ordering {
        self.cmp.compare(self.node(a).entry.key(), self.node(b).entry.key())
    }

    /// Returns the node at the given 1-based implicit index if there is one.
    fn node_at(&self, index: usize) -> Option<NodeId> {
        path::path_to(index)?.fold(self.root, |node, step| {
            node.and_then(|id| self.node(id).links.child(step))
        })
    }

    /// Returns the node at the given index which must lie within `1..=len`.
    fn occupied_at(&self, index: usize) -> NodeId {
        debug_assert!(index >= 1 && index <= self.len);
        self.node_at(index)
            .expect("complete tree has a node at every index up to its length")
    }

    /// Returns the parent of `id` together with the side `id` hangs on.
    fn side_in_parent(&self, id: NodeId) -> Option<(NodeId, Step)> {
        self.node(id).links.parent.map(|parent| {
            match self.node(parent).links.left == Some(id) {
                true => (parent, Step::Left),
                false => {
                    debug_assert_eq!(self.node(parent).links.right, Some(id));
                    (parent, Step::Right)
                }
            }
        })
    }

    /// Makes `child` hang below `parent` on `side`, or makes it the root if there is no parent.
    fn replace_child(&mut self, slot: Option<(NodeId, Step)>, child: NodeId) {
        match slot {
            Some((parent, side)) => *self.node_mut(parent).links.child_mut(side) = Some(child),
            None => self.root = Some(child),
        }
    }

    /// Links a new node into the next free position of the tree.
    fn attach(&mut self, node: Node<K, V>) -> NodeId {
        let index = self.len + 1;
        let id = self.nodes.put(node);
        match (path::parent_of(index), path::side_of(index)) {
            (Some(parent_index), Some(side)) => {
                let parent = self.occupied_at(parent_index);
                debug_assert!(self.node(parent).links.child(side).is_none());
                *self.node_mut(parent).links.child_mut(side) = Some(id);
                self.node_mut(id).links.parent = Some(parent);
            }
            _ => {
                debug_assert!(self.root.is_none());
                self.root = Some(id);
            }
        }
        self.len = index;
        id
    }

    /// Unlinks the leaf `id` from the tree and returns its node.
    fn detach_leaf(&mut self, id: NodeId) -> Node<K, V> {
        debug_assert!(self.node(id).links.children().next().is_none());
        match self.side_in_parent(id) {
            Some((parent, side)) => *self.node_mut(parent).links.child_mut(side) = None,
            None => self.root = None,
        }
        self.len -= 1;
        self.nodes.take(id).expect("detached leaf is stored")
    }

    /// Exchanges the tree positions of the nodes `a` and `b`.
    ///
    /// Both nodes keep their ids and entries; only the links of the two nodes,
    /// of their parents and of their children change.
    fn swap_nodes(&mut self, a: NodeId, b: NodeId) {
        if a == b {
            return;
        }
        trace!("exchanging linked heap nodes {:?} and {:?}", a, b);

        // For adjacent nodes `upper` is always the parent of `lower`.
        let (upper, lower) = match self.node(a).links.parent == Some(b) {
            true => (b, a),
            false => (a, b),
        };
        let upper_slot = self.side_in_parent(upper);
        let lower_slot = self.side_in_parent(lower);
        let upper_links = self.node(upper).links;
        let lower_links = self.node(lower).links;

        match lower_slot {
            Some((parent, side)) if parent == upper => {
                let mut moved_up = upper_links;
                *moved_up.child_mut(side) = Some(upper);
                self.node_mut(lower).links = moved_up;
                self.node_mut(upper).links = Links {
                    parent: Some(lower),
                    ..lower_links
                };
                if let Some(sibling) = upper_links.child(side.opposite()) {
                    self.node_mut(sibling).links.parent = Some(lower);
                }
            }
            _ => {
                self.node_mut(lower).links = upper_links;
                self.node_mut(upper).links = lower_links;
                for child in upper_links.children() {
                    self.node_mut(child).links.parent = Some(lower);
                }
                self.replace_child(lower_slot, upper);
            }
        }
        for child in lower_links.children() {
            self.node_mut(child).links.parent = Some(upper);
        }
        self.replace_child(upper_slot, lower);

        debug_assert!(self.node(a).links.parent != Some(a));
        debug_assert!(self.node(b).links.parent != Some(b));
    }

    /// Moves the node `id` towards the root while its key is smaller than its parent's.
    fn up_heap(&mut self, id: NodeId) {
        while let Some(parent) = self.node(id).links.parent {
            if self.compare(id, parent) != Ordering::Less {
                break;
            }
            self.swap_nodes(id, parent);
        }
    }

    /// Moves the node `id` away from the root while any child has a smaller key.
    ///
    /// Ties between the children are resolved towards the left one.
    fn down_heap(&mut self, id: NodeId) {
        loop {
            let links = self.node(id).links;
            let smallest = match (links.left, links.right) {
                (Some(left), Some(right)) => match self.compare(right, left) {
                    Ordering::Less => right,
                    _ => left,
                },
                (Some(left), None) => left,
                (None, right) => {
                    debug_assert!(right.is_none(), "complete tree has no lone right child");
                    return;
                }
            };
            if self.compare(smallest, id) != Ordering::Less {
                return;
            }
            self.swap_nodes(id, smallest);
        }
    }

    /// Removes the node `id` by moving the last node of the tree into its position.
    fn remove_node(&mut self, id: NodeId) -> Entry<K, V> {
        let last = self.occupied_at(self.len);
        self.swap_nodes(id, last);
        let node = self.detach_leaf(id);
        if last != id {
            self.up_heap(last);
            self.down_heap(last);
        }
        node.entry
    }
}

impl<K, V, C> PriorityQueue<K, V> for LinkedHeap<K, V, C>
where
    C: Comparator<K>,
{
    #[inline]
    fn len(&self) -> usize {
        self.len
    }

    fn insert(&mut self, key: K, value: V) -> Result<Handle> {
        self.admit(&key)?;
        let serial = self.serials.next();
        let id = self.attach(Node {
            entry: Entry::new(key, value),
            serial: serial,
            links: Links::default(),
        });
        self.up_heap(id);
        Ok(Handle::new(id.into(), serial))
    }

    #[inline]
    fn min(&self) -> Option<&Entry<K, V>> {
        self.root.map(|id| &self.node(id).entry)
    }

    fn remove_min(&mut self) -> Option<Entry<K, V>> {
        let root = self.root?;
        Some(self.remove_node(root))
    }

    fn get(&self, handle: Handle) -> Result<&Entry<K, V>> {
        self.lookup(handle).map(|id| &self.node(id).entry)
    }

    fn remove(&mut self, handle: Handle) -> Result<Entry<K, V>> {
        let id = self.lookup(handle)?;
        Ok(self.remove_node(id))
    }
}
