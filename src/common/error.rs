//! Error types for bptindex.

use thiserror::Error;

/// Convenient Result type alias.
///
/// Instead of writing `Result<T, Error>` everywhere, we can write `Result<T>`.
/// This is a common Rust pattern (see `std::io::Result`).
pub type Result<T> = std::result::Result<T, Error>;

/// All possible errors returned by the index.
///
/// Every error is reported synchronously by the call that caused it and
/// leaves the tree unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Construction parameters were rejected. No tree is produced.
    #[error("invalid tree configuration: {0}")]
    Config(#[from] ConfigError),

    /// The lower search bound is greater than the upper bound.
    #[error("upper bound must be greater than or equal to lower bound")]
    Range,

    /// A search was issued without any bound.
    #[error("a search needs at least one bound")]
    Param,
}

/// Why a `(fanout, leaf_capacity)` pair was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Internal fan-out `M` was zero.
    #[error("fanout must be a positive integer")]
    ZeroFanout,

    /// Leaf capacity `L` was zero.
    #[error("leaf capacity must be a positive integer")]
    ZeroLeafCapacity,

    /// Internal fan-out `M` must be greater than 3.
    #[error("fanout must be greater than 3, got {fanout}")]
    FanoutTooSmall { fanout: usize },

    /// Leaf capacity `L` must not exceed the internal fan-out `M`.
    #[error("leaf capacity {leaf_capacity} must be less than or equal to fanout {fanout}")]
    LeafCapacityExceedsFanout { leaf_capacity: usize, fanout: usize },
}
