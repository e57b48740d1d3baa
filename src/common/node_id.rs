//! Node identifier type.

use std::fmt;

/// Identifies a node in a tree's arena.
///
/// Using `usize` because:
/// 1. Nodes are stored in `Vec<Node>`
/// 2. Direct indexing without casting: `nodes[node_id.0]`
/// 3. Nodes are never freed, so an id stays valid for the tree's lifetime
///
/// Parent and sibling links are plain `NodeId`s; the arena owns the nodes.
///
/// # Example
/// ```
/// use bptindex::NodeId;
///
/// let node_id = NodeId::new(5);
/// assert_eq!(node_id.index(), 5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

impl NodeId {
    /// Create a new NodeId.
    #[inline]
    pub fn new(id: usize) -> Self {
        NodeId(id)
    }

    /// Position of the node in the arena.
    #[inline]
    pub fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Node({})", self.0)
    }
}
