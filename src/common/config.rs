//! Configuration for bptindex trees.

use crate::common::error::{ConfigError, Result};

/// Default maximum number of children per internal node (`M`).
pub const DEFAULT_FANOUT: usize = 64;

/// Default maximum number of entries per leaf (`L`).
pub const DEFAULT_LEAF_CAPACITY: usize = 64;

/// Smallest accepted internal fan-out.
///
/// With `M = 3` an internal split would leave a half with no separator.
pub const MIN_FANOUT: usize = 4;

/// Fan-out parameters of a tree.
///
/// # Invariants (after [`TreeConfig::validate`])
/// - `fanout >= MIN_FANOUT`
/// - `1 <= leaf_capacity <= fanout`
///
/// # Example
/// ```
/// use bptindex::TreeConfig;
///
/// let config = TreeConfig::new(4, 4);
/// assert!(config.validate().is_ok());
/// assert!(TreeConfig::new(4, 5).validate().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreeConfig {
    /// Maximum children per internal node (`M`). Max separators is `M - 1`.
    pub fanout: usize,

    /// Maximum entries per leaf (`L`).
    pub leaf_capacity: usize,
}

impl TreeConfig {
    /// Create a config. Nothing is checked until [`validate`](Self::validate).
    pub fn new(fanout: usize, leaf_capacity: usize) -> Self {
        Self {
            fanout,
            leaf_capacity,
        }
    }

    /// Check the parameters.
    ///
    /// # Errors
    /// - `Error::Config` if either parameter is zero, if `fanout <= 3`,
    ///   or if `leaf_capacity > fanout`.
    pub fn validate(&self) -> Result<()> {
        if self.fanout == 0 {
            return Err(ConfigError::ZeroFanout.into());
        }
        if self.leaf_capacity == 0 {
            return Err(ConfigError::ZeroLeafCapacity.into());
        }
        if self.fanout < MIN_FANOUT {
            return Err(ConfigError::FanoutTooSmall {
                fanout: self.fanout,
            }
            .into());
        }
        if self.leaf_capacity > self.fanout {
            return Err(ConfigError::LeafCapacityExceedsFanout {
                leaf_capacity: self.leaf_capacity,
                fanout: self.fanout,
            }
            .into());
        }
        Ok(())
    }

    /// Maximum separators an internal node may hold once an insert returns.
    #[inline]
    pub fn max_separators(&self) -> usize {
        self.fanout - 1
    }

    /// Split point of an overflowing leaf (`(L + 1) / 2`).
    #[inline]
    pub fn leaf_split_point(&self) -> usize {
        (self.leaf_capacity + 1) / 2
    }

    /// Split point of a full internal node (`M / 2`).
    #[inline]
    pub fn internal_split_point(&self) -> usize {
        self.fanout / 2
    }
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self::new(DEFAULT_FANOUT, DEFAULT_LEAF_CAPACITY)
    }
}
