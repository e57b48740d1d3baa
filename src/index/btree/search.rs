//! Point and range search.
//!
//! Every query descends once (twice for a closed range) and then walks the
//! sibling chain. Positions inside the tree are [`Cursor`]s: a leaf plus an
//! index into its entries, where `index == leaf.len()` means "just past this
//! leaf".

use crate::common::{Error, NodeId, Result};
use crate::index::btree::node::Node;
use crate::index::btree::{BPlusTree, KeyValue};

/// A position between two records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Cursor {
    pub(crate) leaf: NodeId,
    pub(crate) index: usize,
}

/// How an internal node routes a key equal to one of its separators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Bias {
    /// `bisect_left`: to the leftmost child that may hold the key.
    Left,
    /// `bisect_right`: to the right of the equal separator.
    Right,
}

impl<K: Ord + Clone, V> BPlusTree<K, V> {
    /// Search by optional bounds, both inclusive.
    ///
    /// - `min == max`: one record with that key, if any (see [`get`](Self::get))
    /// - only `min`: every record with `key >= min`
    /// - only `max`: every record with `key <= max`
    /// - both: every record with `min <= key <= max`
    ///
    /// An empty result is not an error.
    ///
    /// # Errors
    /// - `Error::Param` if both bounds are `None`
    /// - `Error::Range` if `min > max`
    ///
    /// # Example
    /// ```
    /// use bptindex::{BPlusTree, Error};
    ///
    /// let mut tree = BPlusTree::new(4, 4)?;
    /// for k in 1..=10 {
    ///     tree.insert(k, ());
    /// }
    /// assert_eq!(tree.search(Some(&3), Some(&5))?.len(), 3);
    /// assert_eq!(tree.search(Some(&8), None)?.len(), 3);
    /// assert!(tree.search(Some(&42), Some(&42))?.is_empty());
    /// assert_eq!(tree.search(Some(&5), Some(&3)), Err(Error::Range));
    /// # Ok::<(), bptindex::Error>(())
    /// ```
    pub fn search(&self, min: Option<&K>, max: Option<&K>) -> Result<Vec<&KeyValue<K, V>>> {
        match (min, max) {
            (None, None) => Err(Error::Param),
            (Some(min), Some(max)) if min > max => Err(Error::Range),
            (Some(min), Some(max)) if min == max => Ok(self.point(min).into_iter().collect()),
            (Some(min), Some(max)) => Ok(self.range(min, max)),
            (Some(min), None) => Ok(self.range_from(min)),
            (None, Some(max)) => Ok(self.range_to(max)),
        }
    }

    /// Value of a record with `key`.
    ///
    /// The lookup descends right of separators equal to `key` and returns the
    /// first match in that leaf. With duplicates spread over several leaves
    /// this is not necessarily the first-inserted one; use
    /// [`range`](Self::range) to get all of them.
    pub fn get(&self, key: &K) -> Option<&V> {
        self.point(key).map(KeyValue::value)
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.point(key).is_some()
    }

    /// Records with `min <= key <= max`, in key order. Empty if `min > max`.
    pub fn range(&self, min: &K, max: &K) -> Vec<&KeyValue<K, V>> {
        if min > max {
            return Vec::new();
        }
        let start = self.lower_bound(min);
        let end = self.upper_bound(max);
        self.collect_between(start, Some(end))
    }

    /// Records with `key >= min`, in key order.
    pub fn range_from(&self, min: &K) -> Vec<&KeyValue<K, V>> {
        self.collect_between(self.lower_bound(min), None)
    }

    /// Records with `key <= max`, in key order, scanned from the leftmost
    /// leaf.
    pub fn range_to(&self, max: &K) -> Vec<&KeyValue<K, V>> {
        self.iter().take_while(|kv| kv.key() <= max).collect()
    }

    /// Record with `key` in the leaf that insert routing picks for it.
    ///
    /// Descends right of equal separators, then takes the first equal entry
    /// of that leaf. No sibling walk.
    fn point(&self, key: &K) -> Option<&KeyValue<K, V>> {
        let leaf = self.leaf(self.find_leaf(key, Bias::Right));
        leaf.entries
            .get(leaf.lower_bound(key))
            .filter(|kv| kv.key() == key)
    }

    /// Position of the first record with `record.key >= key`.
    pub(crate) fn lower_bound(&self, key: &K) -> Cursor {
        let leaf = self.find_leaf(key, Bias::Left);
        Cursor {
            leaf,
            index: self.leaf(leaf).lower_bound(key),
        }
    }

    /// Position of the first record with `record.key > key`.
    pub(crate) fn upper_bound(&self, key: &K) -> Cursor {
        let leaf = self.find_leaf(key, Bias::Right);
        Cursor {
            leaf,
            index: self.leaf(leaf).upper_bound(key),
        }
    }

    fn find_leaf(&self, key: &K, bias: Bias) -> NodeId {
        let mut current = self.root;
        while let Node::Internal(internal) = &self.nodes[current.0] {
            let slot = match bias {
                Bias::Left => internal.child_index_left(key),
                Bias::Right => internal.child_index(key),
            };
            current = internal.children[slot];
        }
        current
    }

    /// Records from `start` up to (not including) `end`, following the
    /// sibling chain. `None` collects to the end of the chain.
    fn collect_between(&self, start: Cursor, end: Option<Cursor>) -> Vec<&KeyValue<K, V>> {
        let mut out = Vec::new();
        let mut current = Some(start.leaf);
        let mut from = start.index;

        while let Some(leaf_id) = current {
            let entries = &self.leaf(leaf_id).entries;
            match end {
                Some(end) if end.leaf == leaf_id => {
                    if from < end.index {
                        out.extend(&entries[from..end.index]);
                    }
                    break;
                }
                _ => out.extend(&entries[from..]),
            }
            current = self.leaf(leaf_id).next;
            from = 0;
        }
        out
    }
}
