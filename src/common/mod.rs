//! Common types and utilities shared across bptindex.
//!
//! This module contains fundamental primitives used throughout the codebase:
//! - Configuration constants and [`TreeConfig`]
//! - Error types
//! - Identifiers ([`NodeId`])

pub mod config;
pub mod error;
mod node_id;

pub use config::TreeConfig;
pub use error::{ConfigError, Error, Result};
pub use node_id::NodeId;
