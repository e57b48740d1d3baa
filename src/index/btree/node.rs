//! Node types stored in the tree arena.
//!
//! A [`Node`] is either a [`LeafNode`] holding records or an
//! [`InternalNode`] holding separator keys and child links. Links between
//! nodes (`parent`, `next`, `children`) are [`NodeId`]s into the arena owned
//! by [`BPlusTree`](super::BPlusTree); they never own the node they name.

use crate::common::NodeId;
use crate::index::btree::KeyValue;

/// A leaf: sorted records plus a forward link along the sibling chain.
#[derive(Debug, Clone)]
pub struct LeafNode<K, V> {
    /// Records, sorted ascending by key.
    pub(crate) entries: Vec<KeyValue<K, V>>,

    /// Next leaf in key order, `None` at the rightmost leaf.
    pub(crate) next: Option<NodeId>,

    /// Owning internal node, `None` only while this leaf is the root.
    pub(crate) parent: Option<NodeId>,
}

impl<K: Ord, V> LeafNode<K, V> {
    pub(crate) fn new(parent: Option<NodeId>) -> Self {
        Self {
            entries: Vec::new(),
            next: None,
            parent,
        }
    }

    /// Records in key order.
    pub fn entries(&self) -> &[KeyValue<K, V>] {
        &self.entries
    }

    /// Next leaf along the sibling chain.
    pub fn next(&self) -> Option<NodeId> {
        self.next
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Index of the first entry with `entry.key >= key` (`bisect_left`).
    pub fn lower_bound(&self, key: &K) -> usize {
        self.entries.partition_point(|kv| kv.key() < key)
    }

    /// Index of the first entry with `entry.key > key` (`bisect_right`).
    ///
    /// New records are inserted here, after any equal keys.
    pub fn upper_bound(&self, key: &K) -> usize {
        self.entries.partition_point(|kv| kv.key() <= key)
    }

    /// Insert a record at its right-biased sorted position.
    pub(crate) fn insert(&mut self, entry: KeyValue<K, V>) {
        let pos = self.upper_bound(entry.key());
        self.entries.insert(pos, entry);
    }
}

/// An internal node: `separators.len() + 1` children.
///
/// Child `i` holds keys in `[separators[i - 1], separators[i]]`. A key equal
/// to a separator is routed to the right of it.
#[derive(Debug, Clone)]
pub struct InternalNode<K> {
    pub(crate) separators: Vec<K>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) parent: Option<NodeId>,
}

impl<K: Ord> InternalNode<K> {
    pub(crate) fn new(parent: Option<NodeId>) -> Self {
        Self {
            separators: Vec::new(),
            children: Vec::new(),
            parent,
        }
    }

    /// Separator keys, non-decreasing.
    pub fn separators(&self) -> &[K] {
        &self.separators
    }

    /// Child links, one more than [`separators`](Self::separators).
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Child to follow for `key`: index of the first separator strictly
    /// greater than `key` (`bisect_right`).
    pub fn child_index(&self, key: &K) -> usize {
        self.separators.partition_point(|sep| sep <= key)
    }

    /// Leftmost child that may hold `key` (`bisect_left`).
    ///
    /// Differs from [`child_index`](Self::child_index) only when `key` equals
    /// a separator: a copy-up leaf split can leave equal keys on the left.
    pub fn child_index_left(&self, key: &K) -> usize {
        self.separators.partition_point(|sep| sep < key)
    }

    /// Slot of `child` in this node, if it is one of its children.
    pub fn position_of(&self, child: NodeId) -> Option<usize> {
        self.children.iter().position(|&c| c == child)
    }
}

/// A node in the arena.
#[derive(Debug, Clone)]
pub enum Node<K, V> {
    Leaf(LeafNode<K, V>),
    Internal(InternalNode<K>),
}

impl<K, V> Node<K, V> {
    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf(_))
    }

    /// Owning internal node; `None` for the root.
    pub fn parent(&self) -> Option<NodeId> {
        match self {
            Node::Leaf(leaf) => leaf.parent,
            Node::Internal(internal) => internal.parent,
        }
    }

    pub(crate) fn set_parent(&mut self, parent: Option<NodeId>) {
        match self {
            Node::Leaf(leaf) => leaf.parent = parent,
            Node::Internal(internal) => internal.parent = parent,
        }
    }

    pub fn as_leaf(&self) -> Option<&LeafNode<K, V>> {
        match self {
            Node::Leaf(leaf) => Some(leaf),
            Node::Internal(_) => None,
        }
    }

    pub fn as_internal(&self) -> Option<&InternalNode<K>> {
        match self {
            Node::Internal(internal) => Some(internal),
            Node::Leaf(_) => None,
        }
    }

    pub(crate) fn as_leaf_mut(&mut self) -> Option<&mut LeafNode<K, V>> {
        match self {
            Node::Leaf(leaf) => Some(leaf),
            Node::Internal(_) => None,
        }
    }

    pub(crate) fn as_internal_mut(&mut self) -> Option<&mut InternalNode<K>> {
        match self {
            Node::Internal(internal) => Some(internal),
            Node::Leaf(_) => None,
        }
    }
}
