//! Configuration for buffer pool retention.
//!
//! - [`PoolConfig`] - Bounds on how many spare blocks a [`BufferPool`] keeps
//!   and how large a block may be to be kept at all.
//!
//! # Example
//!
//! ```
//! use padbuf::{BufferPool, PoolConfig};
//!
//! let config = PoolConfig::new(8, 64 * 1024)?;
//! let pool = BufferPool::with_config(config)?;
//! assert!(pool.is_empty());
//!
//! # Ok::<(), padbuf::PaddedError>(())
//! ```
//!
//! [`BufferPool`]: crate::BufferPool

use crate::error::PaddedError;
use crate::util::WORD;

/// Default number of spare blocks retained by a pool.
pub const DEFAULT_MAX_BLOCKS: usize = 16;

/// Default size limit for a retained block (4 MiB).
pub const DEFAULT_MAX_BLOCK_SIZE: usize = 4 * 1024 * 1024;

/// Retention limits for a [`BufferPool`](crate::BufferPool).
///
/// Blocks released beyond `max_blocks`, or larger than `max_block_size`
/// bytes (padding, header word and capacity included), are dropped instead
/// of being kept for reuse.
///
/// # Example
///
/// ```
/// use padbuf::PoolConfig;
///
/// let config = PoolConfig::default()
///     .with_max_blocks(4)
///     .with_max_block_size(1 << 20);
/// assert_eq!(config.max_blocks(), 4);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PoolConfig {
    max_blocks: usize,
    max_block_size: usize,
}

impl PoolConfig {
    /// Creates a new configuration.
    ///
    /// # Errors
    ///
    /// Returns [`PaddedError::InvalidConfig`] if:
    /// - `max_blocks` is zero
    /// - `max_block_size` cannot hold a single header word
    pub fn new(max_blocks: usize, max_block_size: usize) -> Result<Self, PaddedError> {
        if max_blocks == 0 {
            return Err(PaddedError::InvalidConfig {
                message: "max_blocks must be non-zero",
            });
        }

        if max_block_size < WORD {
            return Err(PaddedError::InvalidConfig {
                message: "max_block_size must hold at least one header word",
            });
        }

        Ok(Self {
            max_blocks,
            max_block_size,
        })
    }

    /// Sets the maximum number of retained spare blocks.
    ///
    /// Note: This does not validate the configuration. Use [`PoolConfig::validate`]
    /// to check if the configuration is valid.
    pub fn with_max_blocks(mut self, max_blocks: usize) -> Self {
        self.max_blocks = max_blocks;
        self
    }

    /// Sets the maximum size of a retained block in bytes.
    ///
    /// Note: This does not validate the configuration. Use [`PoolConfig::validate`]
    /// to check if the configuration is valid.
    pub fn with_max_block_size(mut self, max_block_size: usize) -> Self {
        self.max_block_size = max_block_size;
        self
    }

    /// Returns the maximum number of retained spare blocks.
    pub fn max_blocks(&self) -> usize {
        self.max_blocks
    }

    /// Returns the maximum size of a retained block.
    pub fn max_block_size(&self) -> usize {
        self.max_block_size
    }

    /// Validates the current configuration.
    ///
    /// # Example
    ///
    /// ```
    /// use padbuf::PoolConfig;
    ///
    /// let config = PoolConfig::default().with_max_blocks(0);
    /// assert!(config.validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<(), PaddedError> {
        Self::new(self.max_blocks, self.max_block_size).map(|_| ())
    }
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            max_blocks: DEFAULT_MAX_BLOCKS,
            max_block_size: DEFAULT_MAX_BLOCK_SIZE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = PoolConfig::default();
        assert_eq!(config.max_blocks(), DEFAULT_MAX_BLOCKS);
        assert_eq!(config.max_block_size(), DEFAULT_MAX_BLOCK_SIZE);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_pattern() {
        let config = PoolConfig::default()
            .with_max_blocks(2)
            .with_max_block_size(4096);

        assert_eq!(config.max_blocks(), 2);
        assert_eq!(config.max_block_size(), 4096);
    }

    #[test]
    fn test_invalid_config_zero_blocks() {
        let result = PoolConfig::new(0, 4096);
        assert!(matches!(result, Err(PaddedError::InvalidConfig { .. })));
    }

    #[test]
    fn test_invalid_config_block_smaller_than_word() {
        let result = PoolConfig::new(4, WORD - 1);
        assert!(result.is_err());
        assert!(PoolConfig::new(4, WORD).is_ok());
    }
}
