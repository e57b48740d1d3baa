//! In-order traversal along the sibling chain.

use std::iter::FusedIterator;

use crate::common::NodeId;
use crate::index::btree::node::Node;
use crate::index::btree::{BPlusTree, KeyValue};

impl<K, V> BPlusTree<K, V> {
    /// Every record in key order.
    pub fn traverse(&self) -> Vec<&KeyValue<K, V>> {
        self.iter().collect()
    }

    /// Iterate over every record in key order, starting at the leftmost leaf.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            tree: self,
            leaf: Some(self.leftmost_leaf),
            index: 0,
            remaining: self.len,
        }
    }

    /// Iterate over leaf ids along the sibling chain.
    pub fn leaves(&self) -> Leaves<'_, K, V> {
        Leaves {
            tree: self,
            next: Some(self.leftmost_leaf),
        }
    }

    fn leaf_entries(&self, id: NodeId) -> Option<(&[KeyValue<K, V>], Option<NodeId>)> {
        match self.nodes.get(id.0)? {
            Node::Leaf(leaf) => Some((&leaf.entries, leaf.next)),
            Node::Internal(_) => None,
        }
    }
}

/// Iterator over records, see [`BPlusTree::iter`].
pub struct Iter<'a, K, V> {
    tree: &'a BPlusTree<K, V>,
    leaf: Option<NodeId>,
    index: usize,
    remaining: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = &'a KeyValue<K, V>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let (entries, next) = self.tree.leaf_entries(self.leaf?)?;
            if let Some(kv) = entries.get(self.index) {
                self.index += 1;
                self.remaining = self.remaining.saturating_sub(1);
                return Some(kv);
            }
            self.leaf = next;
            self.index = 0;
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<K, V> FusedIterator for Iter<'_, K, V> {}

impl<'a, K, V> IntoIterator for &'a BPlusTree<K, V> {
    type Item = &'a KeyValue<K, V>;
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over leaf ids, see [`BPlusTree::leaves`].
pub struct Leaves<'a, K, V> {
    tree: &'a BPlusTree<K, V>,
    next: Option<NodeId>,
}

impl<K, V> Iterator for Leaves<'_, K, V> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.next?;
        self.next = self.tree.leaf_entries(current).and_then(|(_, next)| next);
        Some(current)
    }
}
