//! Structural statistics for a tree.

use std::fmt;

/// Counters of structural work done by inserts.
///
/// The tree updates these under `&mut self`, so plain integers suffice.
/// [`BPlusTree::stats`](super::BPlusTree::stats) hands out a copy that can be
/// printed, compared, etc.
///
/// # Example
/// ```
/// use bptindex::BPlusTree;
///
/// let mut tree = BPlusTree::new(4, 4).unwrap();
/// for k in 0..5 {
///     tree.insert(k, ());
/// }
/// let stats = tree.stats();
/// assert_eq!(stats.inserts, 5);
/// assert_eq!(stats.leaf_splits, 1);
/// println!("{}", stats);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TreeStats {
    /// Records inserted.
    pub inserts: u64,

    /// Leaf splits (copy-up).
    pub leaf_splits: u64,

    /// Internal node splits (push-up), proactive or propagated.
    pub internal_splits: u64,

    /// Splits that created a new root. Equals the height gained.
    pub root_splits: u64,
}

impl TreeStats {
    /// Total node splits of either kind.
    pub fn total_splits(&self) -> u64 {
        self.leaf_splits + self.internal_splits
    }

    /// Average splits per insert (0.0 when nothing was inserted).
    pub fn splits_per_insert(&self) -> f64 {
        if self.inserts == 0 {
            0.0
        } else {
            self.total_splits() as f64 / self.inserts as f64
        }
    }
}

impl fmt::Display for TreeStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Stats {{ inserts: {}, leaf_splits: {}, internal_splits: {}, root_splits: {} }}",
            self.inserts, self.leaf_splits, self.internal_splits, self.root_splits
        )
    }
}
