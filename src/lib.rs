//! bptindex - An in-memory B+ tree ordered index.
//!
//! # Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                           bptindex                              │
//! ├─────────────────────────────────────────────────────────────────┤
//! │  ┌─────────────────────────────────────────────────────────┐   │
//! │  │        SharedBPlusTree (index/)  [optional]             │   │
//! │  │      Arc<RwLock<BPlusTree>>: one writer, many readers    │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! │                              ↓                                  │
//! │  ┌─────────────────────────────────────────────────────────┐   │
//! │  │              BPlusTree (index/btree/)                    │   │
//! │  │   insert + split propagation │ point / range search      │   │
//! │  │   ┌─────────────────────────────────────────────────┐   │   │
//! │  │   │  arena: Vec<Node>   Node = Leaf | Internal      │   │   │
//! │  │   │  parent / next links are NodeIds                 │   │   │
//! │  │   └─────────────────────────────────────────────────┘   │   │
//! │  │        traverse / iter │ verify │ TreeStats              │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! │                              ↓                                  │
//! │  ┌─────────────────────────────────────────────────────────┐   │
//! │  │           Common (common/)                               │   │
//! │  │        TreeConfig + Error + NodeId                       │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//! - [`common`] - Shared primitives (NodeId, Error, config)
//! - [`index`] - The B+ tree and its shared handle
//!
//! # Quick Start
//! ```
//! use bptindex::BPlusTree;
//!
//! // Internal fan-out 4, leaf capacity 4
//! let mut tree = BPlusTree::new(4, 4).unwrap();
//! for k in [10, 17, 9, 33, 33, 50] {
//!     tree.insert(k, format!("v{k}"));
//! }
//!
//! let hits = tree.search(Some(&10), Some(&33)).unwrap();
//! assert_eq!(hits.len(), 4);
//! assert_eq!(tree.get(&50).map(String::as_str), Some("v50"));
//! ```

pub mod common;
pub mod index;

// Re-export commonly used items at crate root for convenience
pub use common::config::{DEFAULT_FANOUT, DEFAULT_LEAF_CAPACITY, MIN_FANOUT};
pub use common::{ConfigError, Error, NodeId, Result, TreeConfig};

pub use index::btree::{
    BPlusTree, InternalNode, KeyValue, LeafNode, Node, TreeStats, VerifyReport,
};
pub use index::SharedBPlusTree;
