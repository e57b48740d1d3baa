//! Index structures.
//!
//! - [`btree`] - The single-threaded B+ tree
//! - [`SharedBPlusTree`] - A lock-protected handle for concurrent callers

pub mod btree;
mod shared;

pub use shared::SharedBPlusTree;
