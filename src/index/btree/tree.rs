//! The B+ tree: arena, insertion and node splitting.
//!
//! Search lives in [`search`](super::search), traversal in
//! [`iter`](super::iter) and the consistency check in
//! [`verify`](super::verify); all of them only read the arena built here.

use crate::common::{NodeId, Result, TreeConfig};
use crate::index::btree::node::{InternalNode, LeafNode, Node};
use crate::index::btree::{KeyValue, TreeStats};

/// An in-memory B+ tree over `K -> V`.
///
/// # Architecture
/// ```text
///                 ┌─────────────────┐
///                 │ Internal [30]   │  root (parent = None)
///                 └───┬─────────┬───┘
///           ┌─────────┘         └─────────┐
///   ┌───────▼───────┐             ┌───────▼───────┐
///   │ Leaf [10, 20] │ ──next────▶ │ Leaf [30, 40] │ ──next──▶ None
///   └───────────────┘             └───────────────┘
///     leftmost_leaf
/// ```
/// Every node lives in `nodes: Vec<Node>` and is named by its [`NodeId`].
/// Parent and sibling links are ids, so there are no ownership cycles.
///
/// # Capacity
/// - a leaf holds at most `L` entries once `insert` returns
/// - an internal node holds at most `M - 1` separators (`M` children)
///
/// # Usage
/// ```
/// use bptindex::BPlusTree;
///
/// let mut tree = BPlusTree::new(4, 4)?;
/// for k in [10, 17, 9, 33] {
///     tree.insert(k, k * 2);
/// }
/// assert_eq!(tree.get(&17), Some(&34));
///
/// let keys: Vec<i32> = tree.traverse().iter().map(|kv| *kv.key()).collect();
/// assert_eq!(keys, vec![9, 10, 17, 33]);
/// # Ok::<(), bptindex::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct BPlusTree<K, V> {
    /// Arena owning every node. Nodes are never removed.
    pub(crate) nodes: Vec<Node<K, V>>,

    /// The only node without a parent.
    pub(crate) root: NodeId,

    /// Start of the sibling chain. Splits keep the left half in place, so
    /// this never changes after construction.
    pub(crate) leftmost_leaf: NodeId,

    pub(crate) config: TreeConfig,

    /// Number of records stored.
    pub(crate) len: usize,

    pub(crate) stats: TreeStats,
}

impl<K: Ord + Clone, V> BPlusTree<K, V> {
    /// Create an empty tree with internal fan-out `fanout` (`M`) and leaf
    /// capacity `leaf_capacity` (`L`).
    ///
    /// # Errors
    /// - `Error::Config` if `leaf_capacity > fanout`, `fanout <= 3`,
    ///   or either parameter is zero
    pub fn new(fanout: usize, leaf_capacity: usize) -> Result<Self> {
        Self::with_config(TreeConfig::new(fanout, leaf_capacity))
    }

    /// Create an empty tree from a [`TreeConfig`].
    ///
    /// # Errors
    /// - `Error::Config` if the config does not validate
    pub fn with_config(config: TreeConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::empty(config))
    }

    /// A single empty root leaf. `config` must already be valid.
    fn empty(config: TreeConfig) -> Self {
        let root = NodeId::new(0);
        Self {
            nodes: vec![Node::Leaf(LeafNode::new(None))],
            root,
            leftmost_leaf: root,
            config,
            len: 0,
            stats: TreeStats::default(),
        }
    }

    // ========================================================================
    // Public API: Insert
    // ========================================================================

    /// Insert a record. Equal keys are kept, after the existing ones.
    pub fn insert(&mut self, key: K, value: V) {
        self.insert_entry(KeyValue::new(key, value));
    }

    /// Insert an already built [`KeyValue`].
    pub fn insert_entry(&mut self, entry: KeyValue<K, V>) {
        let leaf_id = self.descend_for_insert(entry.key());
        let capacity = self.config.leaf_capacity;

        let leaf = self.leaf_mut(leaf_id);
        leaf.insert(entry);
        let overflow = leaf.len() > capacity;

        self.len += 1;
        self.stats.inserts += 1;

        if overflow {
            self.split_leaf(leaf_id);
        }
    }

    /// Walk from the root to the leaf that receives `key`.
    ///
    /// A full internal node met on the way is split before the descent goes
    /// through it, so the leaf's parent always has room for one more
    /// separator.
    fn descend_for_insert(&mut self, key: &K) -> NodeId {
        let mut current = self.root;
        let mut depth = 0usize;

        loop {
            let internal = match &self.nodes[current.0] {
                Node::Leaf(_) => break,
                Node::Internal(internal) => internal,
            };

            if internal.separators.len() >= self.config.max_separators() {
                let (promoted, right) = self.split_internal(current);
                let go_right = *key >= promoted;
                self.promote(current, promoted, right);
                if go_right {
                    current = right;
                }
                continue;
            }

            current = internal.children[internal.child_index(key)];
            depth += 1;
        }

        tracing::trace!(leaf = %current, depth, "insert descent reached leaf");
        current
    }

    // ========================================================================
    // Splitting
    // ========================================================================

    /// Split an overflowing leaf at `(L + 1) / 2` and copy the new leaf's
    /// first key up into the parent.
    fn split_leaf(&mut self, leaf_id: NodeId) {
        let mid = self.config.leaf_split_point();
        let new_id = NodeId::new(self.nodes.len());

        let leaf = self.leaf_mut(leaf_id);
        let moved = leaf.entries.split_off(mid);
        let mut new_leaf = LeafNode::new(leaf.parent);
        new_leaf.next = leaf.next.replace(new_id);
        new_leaf.entries = moved;

        // The right half is non-empty: it holds L + 1 - mid >= 1 entries.
        let promoted = new_leaf.entries[0].key().clone();
        self.nodes.push(Node::Leaf(new_leaf));
        self.stats.leaf_splits += 1;

        tracing::debug!(leaf = %leaf_id, new_leaf = %new_id, "split leaf");
        self.promote(leaf_id, promoted, new_id);
    }

    /// Split an internal node at `M / 2`.
    ///
    /// The new right node takes `separators[mid..]` and `children[mid..]`;
    /// the split node keeps `separators[..mid - 1]` and `children[..mid]`.
    /// `separators[mid - 1]` is removed from both halves and returned for the
    /// caller to push up. The parent is not touched.
    fn split_internal(&mut self, node_id: NodeId) -> (K, NodeId) {
        let mid = self.config.internal_split_point();
        let new_id = NodeId::new(self.nodes.len());

        let node = self.internal_mut(node_id);
        let mut new_node = InternalNode::new(node.parent);
        new_node.separators = node.separators.split_off(mid);
        new_node.children = node.children.split_off(mid);
        // mid >= 2 because M >= 4, so there is a separator to pop.
        let promoted = match node.separators.pop() {
            Some(separator) => separator,
            None => unreachable!("internal split of {node_id} with no separator left"),
        };

        for &child in &new_node.children {
            self.nodes[child.0].set_parent(Some(new_id));
        }
        self.nodes.push(Node::Internal(new_node));
        self.stats.internal_splits += 1;

        tracing::debug!(node = %node_id, new_node = %new_id, "split internal node");
        (promoted, new_id)
    }

    /// Insert `separator` into the parent of `left`, with `right` as the
    /// child immediately after `left`.
    ///
    /// Creates a new root when `left` has no parent. If the parent then holds
    /// more than `M - 1` separators it is split and its own promoted key goes
    /// one level up, until some ancestor has room.
    fn promote(&mut self, left: NodeId, separator: K, right: NodeId) {
        let max_separators = self.config.max_separators();
        let (mut left, mut separator, mut right) = (left, separator, right);

        loop {
            let Some(parent_id) = self.nodes[left.0].parent() else {
                self.grow_root(left, separator, right);
                return;
            };

            let parent = self.internal_mut(parent_id);
            let slot = match parent.position_of(left) {
                Some(slot) => slot,
                None => unreachable!("{left} is not a child of its parent {parent_id}"),
            };
            parent.separators.insert(slot, separator);
            parent.children.insert(slot + 1, right);
            let overflow = parent.separators.len() > max_separators;
            self.nodes[right.0].set_parent(Some(parent_id));

            if !overflow {
                return;
            }

            let (next_separator, next_right) = self.split_internal(parent_id);
            left = parent_id;
            separator = next_separator;
            right = next_right;
        }
    }

    /// Put a new internal root above `left` and `right`.
    fn grow_root(&mut self, left: NodeId, separator: K, right: NodeId) {
        let root_id = NodeId::new(self.nodes.len());
        let mut root = InternalNode::new(None);
        root.separators.push(separator);
        root.children.extend([left, right]);

        self.nodes.push(Node::Internal(root));
        self.nodes[left.0].set_parent(Some(root_id));
        self.nodes[right.0].set_parent(Some(root_id));
        self.root = root_id;
        self.stats.root_splits += 1;

        tracing::debug!(root = %root_id, height = self.height(), "tree grew a new root");
    }

    // ========================================================================
    // Arena access
    // ========================================================================

    pub(crate) fn leaf(&self, id: NodeId) -> &LeafNode<K, V> {
        match self.nodes[id.0].as_leaf() {
            Some(leaf) => leaf,
            None => unreachable!("{id} is not a leaf"),
        }
    }

    fn leaf_mut(&mut self, id: NodeId) -> &mut LeafNode<K, V> {
        match self.nodes[id.0].as_leaf_mut() {
            Some(leaf) => leaf,
            None => unreachable!("{id} is not a leaf"),
        }
    }

    fn internal_mut(&mut self, id: NodeId) -> &mut InternalNode<K> {
        match self.nodes[id.0].as_internal_mut() {
            Some(internal) => internal,
            None => unreachable!("{id} is not an internal node"),
        }
    }
}

impl<K, V> BPlusTree<K, V> {
    // ========================================================================
    // Public API: Stats and info
    // ========================================================================

    /// Number of records stored.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of node levels on any root-to-leaf path.
    ///
    /// A tree whose root is a leaf has height 1.
    pub fn height(&self) -> usize {
        let mut height = 1;
        let mut current = self.root;
        while let Node::Internal(internal) = &self.nodes[current.0] {
            current = internal.children[0];
            height += 1;
        }
        height
    }

    /// Number of nodes in the arena (leaves and internal nodes).
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Internal fan-out `M`.
    pub fn fanout(&self) -> usize {
        self.config.fanout
    }

    /// Leaf capacity `L`.
    pub fn leaf_capacity(&self) -> usize {
        self.config.leaf_capacity
    }

    pub fn config(&self) -> &TreeConfig {
        &self.config
    }

    /// Snapshot of the split counters.
    pub fn stats(&self) -> TreeStats {
        self.stats
    }

    pub fn reset_stats(&mut self) {
        self.stats = TreeStats::default();
    }

    // ========================================================================
    // Public API: Node access (read-only)
    // ========================================================================

    /// Id of the root node.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Id of the first leaf of the sibling chain.
    pub fn leftmost_leaf(&self) -> NodeId {
        self.leftmost_leaf
    }

    /// Look up a node by id. Ids stay valid for the life of the tree.
    pub fn node(&self, id: NodeId) -> Option<&Node<K, V>> {
        self.nodes.get(id.0)
    }
}

impl<K: Ord + Clone, V> Default for BPlusTree<K, V> {
    fn default() -> Self {
        Self::empty(TreeConfig::default())
    }
}
