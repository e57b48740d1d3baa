//! Leaf-level records.

use std::fmt;

/// An ordered `(key, value)` pair stored in a leaf.
///
/// Immutable once created: fields are only readable. Ordering between
/// entries is by key alone; entries with equal keys keep the order in which
/// they were inserted.
///
/// # Example
/// ```
/// use bptindex::KeyValue;
///
/// let kv = KeyValue::new(10, "ten");
/// assert_eq!(*kv.key(), 10);
/// assert_eq!(*kv.value(), "ten");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyValue<K, V> {
    key: K,
    value: V,
}

impl<K, V> KeyValue<K, V> {
    /// Create a new record.
    #[inline]
    pub fn new(key: K, value: V) -> Self {
        Self { key, value }
    }

    #[inline]
    pub fn key(&self) -> &K {
        &self.key
    }

    #[inline]
    pub fn value(&self) -> &V {
        &self.value
    }

    /// Consume the record, returning its parts.
    pub fn into_parts(self) -> (K, V) {
        (self.key, self.value)
    }
}

impl<K, V> From<(K, V)> for KeyValue<K, V> {
    fn from((key, value): (K, V)) -> Self {
        Self::new(key, value)
    }
}

impl<K: fmt::Display, V: fmt::Display> fmt::Display for KeyValue<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.key, self.value)
    }
}
