//! A B+ tree behind a readers-writer lock.
//!
//! The tree itself is single-threaded. [`SharedBPlusTree`] serialises writers
//! and lets readers run together while no insert is in flight.

use std::sync::Arc;

use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::common::{Result, TreeConfig};
use crate::index::btree::{BPlusTree, KeyValue, TreeStats};

/// Cloneable, thread-safe handle to a [`BPlusTree`].
///
/// # Thread Safety
/// - `insert`: write lock, one writer at a time
/// - `search`, `get`, `traverse`, `len`, `stats`: read lock, shared
///
/// Read methods return owned copies so no guard escapes. Use
/// [`read`](Self::read) / [`write`](Self::write) to hold a guard across
/// several calls.
///
/// # Example
/// ```
/// use bptindex::SharedBPlusTree;
/// use std::thread;
///
/// let tree = SharedBPlusTree::new(8, 8)?;
/// let writer = tree.clone();
/// thread::spawn(move || writer.insert(1, "one")).join().unwrap();
/// assert_eq!(tree.get(&1), Some("one"));
/// # Ok::<(), bptindex::Error>(())
/// ```
pub struct SharedBPlusTree<K, V> {
    inner: Arc<RwLock<BPlusTree<K, V>>>,
}

impl<K: Ord + Clone, V> SharedBPlusTree<K, V> {
    /// Create an empty shared tree.
    ///
    /// # Errors
    /// - `Error::Config` for the same reasons as [`BPlusTree::new`]
    pub fn new(fanout: usize, leaf_capacity: usize) -> Result<Self> {
        Ok(Self::from_tree(BPlusTree::new(fanout, leaf_capacity)?))
    }

    /// # Errors
    /// - `Error::Config` if the config does not validate
    pub fn with_config(config: TreeConfig) -> Result<Self> {
        Ok(Self::from_tree(BPlusTree::with_config(config)?))
    }

    /// Wrap an existing tree.
    pub fn from_tree(tree: BPlusTree<K, V>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(tree)),
        }
    }

    pub fn insert(&self, key: K, value: V) {
        self.inner.write().insert(key, value);
    }

    /// Owned copy of [`BPlusTree::search`].
    ///
    /// # Errors
    /// - `Error::Param` if both bounds are `None`
    /// - `Error::Range` if `min > max`
    pub fn search(&self, min: Option<&K>, max: Option<&K>) -> Result<Vec<KeyValue<K, V>>>
    where
        V: Clone,
    {
        let tree = self.inner.read();
        let found = tree.search(min, max)?;
        Ok(found.into_iter().cloned().collect())
    }

    pub fn get(&self, key: &K) -> Option<V>
    where
        V: Clone,
    {
        self.inner.read().get(key).cloned()
    }

    /// Owned copy of every record in key order.
    pub fn traverse(&self) -> Vec<KeyValue<K, V>>
    where
        V: Clone,
    {
        self.inner.read().iter().cloned().collect()
    }
}

impl<K, V> SharedBPlusTree<K, V> {
    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    pub fn stats(&self) -> TreeStats {
        self.inner.read().stats()
    }

    /// Hold the read lock.
    pub fn read(&self) -> RwLockReadGuard<'_, BPlusTree<K, V>> {
        self.inner.read()
    }

    /// Hold the write lock.
    pub fn write(&self) -> RwLockWriteGuard<'_, BPlusTree<K, V>> {
        self.inner.write()
    }
}

impl<K, V> Clone for SharedBPlusTree<K, V> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}
