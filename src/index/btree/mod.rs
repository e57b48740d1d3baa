//! B+ tree index.
//!
//! # Components
//! - [`BPlusTree`] - The tree: arena of nodes, insert, search, traversal
//! - [`Node`] / [`LeafNode`] / [`InternalNode`] - Arena node types
//! - [`KeyValue`] - A leaf record
//! - [`TreeStats`] - Split counters
//! - [`VerifyReport`] - Result of the structural consistency check
//!
//! # Splits
//! ```text
//! leaf, L = 4, mid = (L + 1) / 2 = 2         internal, M = 4, mid = M / 2 = 2
//!
//!   [1 2 3 4 5]                                [a b c] / c0 c1 c2 c3
//!        │  copy-up 3                               │  push-up b
//!        ▼                                          ▼
//!      [3]                                         [b]
//!     /   \                                       /   \
//! [1 2] → [3 4 5]                          [a]/c0 c1   [c]/c2 c3
//! ```

mod iter;
mod key_value;
mod node;
mod search;
mod stats;
mod tree;
mod verify;

pub use iter::{Iter, Leaves};
pub use key_value::KeyValue;
pub use node::{InternalNode, LeafNode, Node};
pub use stats::TreeStats;
pub use tree::BPlusTree;
pub use verify::{VerifyCounts, VerifyFinding, VerifyReport};
