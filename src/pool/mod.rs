//! Buffer pooling.
//!
//! This module recycles the backing blocks of released [`PaddedBuffer`]s,
//! padding and trailing capacity included, for later allocation requests.
//!
//! - [`BufferPool`] - Thread-safe cache of spare blocks
//! - [`PoolStats`] - Counter snapshot
//!
//! [`PaddedBuffer`]: crate::PaddedBuffer

mod cache;
mod stats;

pub use cache::{BufferPool, POISON_BYTE};
pub use stats::PoolStats;
