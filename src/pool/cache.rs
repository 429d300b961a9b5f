//! Shared cache of spare backing blocks.

use std::fmt;

use parking_lot::Mutex;
use tracing::{debug, trace};

use super::stats::{Counters, PoolStats};
use crate::config::PoolConfig;
use crate::error::PaddedError;
use crate::padded::PaddedBuffer;
use crate::util::{WORD, block_size, round_to_word};

/// Byte written over released blocks in debug builds.
pub const POISON_BYTE: u8 = 0xA5;

/// A thread-safe pool of padded buffer allocations.
///
/// Releasing a buffer hands its whole backing block (header word, padding,
/// content and capacity) to the pool. A later [`acquire`](Self::acquire)
/// that fits in a spare block reuses it instead of allocating.
///
/// The pool is an ordinary value: share it through `&BufferPool` or an
/// `Arc` and drop it to free every spare block.
///
/// # Example
///
/// ```
/// use padbuf::BufferPool;
///
/// let pool = BufferPool::new();
///
/// let buf = pool.acquire(128, 256, 64);
/// let ptr = buf.as_ptr();
/// pool.release(buf);
///
/// let buf = pool.acquire(64, 128, 64);
/// assert_eq!(buf.as_ptr(), ptr);
/// assert_eq!(pool.stats().hits, 1);
/// ```
pub struct BufferPool {
    config: PoolConfig,
    spares: Mutex<Vec<Box<[u8]>>>,
    counters: Counters,
}

impl BufferPool {
    /// Creates an empty pool with the default [`PoolConfig`].
    pub fn new() -> Self {
        Self {
            config: PoolConfig::default(),
            spares: Mutex::new(Vec::new()),
            counters: Counters::default(),
        }
    }

    /// Creates an empty pool with custom retention limits.
    ///
    /// # Errors
    ///
    /// Returns [`PaddedError::InvalidConfig`] if `config` does not validate.
    pub fn with_config(config: PoolConfig) -> Result<Self, PaddedError> {
        config.validate()?;
        Ok(Self {
            config,
            spares: Mutex::new(Vec::with_capacity(config.max_blocks())),
            counters: Counters::default(),
        })
    }

    /// Returns the pool's retention limits.
    pub fn config(&self) -> &PoolConfig {
        &self.config
    }

    /// Returns a buffer laid out exactly like
    /// [`PaddedBuffer::new(len, cap, pad)`](PaddedBuffer::new).
    ///
    /// The smallest spare block that holds the padding, the header word and
    /// `cap` bytes is reused when there is one; its bytes are not zeroed.
    /// Otherwise a fresh buffer is allocated.
    ///
    /// # Panics
    ///
    /// Panics if `len > cap` or the total block size overflows `usize`.
    pub fn acquire(&self, len: usize, cap: usize, pad: usize) -> PaddedBuffer {
        assert!(len <= cap, "length {} exceeds capacity {}", len, cap);
        self.acquire_unchecked(len, cap, pad)
    }

    /// Like [`acquire`](Self::acquire), but reports `len > cap` as an error.
    pub fn try_acquire(
        &self,
        len: usize,
        cap: usize,
        pad: usize,
    ) -> Result<PaddedBuffer, PaddedError> {
        if len > cap {
            return Err(PaddedError::LengthExceedsCapacity { len, cap });
        }
        Ok(self.acquire_unchecked(len, cap, pad))
    }

    fn acquire_unchecked(&self, len: usize, cap: usize, pad: usize) -> PaddedBuffer {
        let pad = round_to_word(pad);
        let need = block_size(&[pad, cap, WORD]);

        match self.take(need) {
            Some(block) => {
                self.counters.hit();
                trace!(need, block = block.len(), "reusing spare block");
                PaddedBuffer::from_block(block, len, cap, pad)
            }
            None => {
                self.counters.miss();
                trace!(need, "no spare block fits, allocating");
                PaddedBuffer::new(len, cap, pad)
            }
        }
    }

    /// Removes the smallest spare block of at least `min` bytes.
    fn take(&self, min: usize) -> Option<Box<[u8]>> {
        let mut spares = self.spares.lock();
        let index = spares
            .iter()
            .enumerate()
            .filter(|(_, block)| block.len() >= min)
            .min_by_key(|(_, block)| block.len())
            .map(|(index, _)| index)?;
        Some(spares.swap_remove(index))
    }

    /// Returns `buf`'s backing block to the pool.
    ///
    /// The whole block is kept, including padding the buffer had already
    /// consumed and capacity beyond its current length. Blocks over the
    /// configured size, or released while the pool is full, are dropped.
    ///
    /// In debug builds the block is overwritten with [`POISON_BYTE`] so that
    /// stale content never leaks silently into the next acquirer.
    pub fn release(&self, buf: PaddedBuffer) {
        let mut block = buf.into_block();

        if block.len() > self.config.max_block_size() {
            self.counters.discard();
            debug!(
                size = block.len(),
                max = self.config.max_block_size(),
                "released block too large, dropping"
            );
            return;
        }

        poison(&mut block);

        let mut spares = self.spares.lock();
        if spares.len() >= self.config.max_blocks() {
            drop(spares);
            self.counters.discard();
            debug!(max = self.config.max_blocks(), "pool full, dropping released block");
            return;
        }
        spares.push(block);
        drop(spares);

        self.counters.release();
    }

    /// Returns the number of spare blocks currently held.
    pub fn len(&self) -> usize {
        self.spares.lock().len()
    }

    /// Returns true if the pool holds no spare blocks.
    pub fn is_empty(&self) -> bool {
        self.spares.lock().is_empty()
    }

    /// Drops every spare block.
    pub fn clear(&self) {
        self.spares.lock().clear();
    }

    /// Returns a snapshot of the pool's counters.
    pub fn stats(&self) -> PoolStats {
        self.counters.snapshot()
    }
}

impl Default for BufferPool {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for BufferPool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BufferPool")
            .field("config", &self.config)
            .field("spares", &self.len())
            .field("stats", &self.stats())
            .finish()
    }
}

fn poison(block: &mut [u8]) {
    if cfg!(debug_assertions) {
        block.fill(POISON_BYTE);
    }
}
