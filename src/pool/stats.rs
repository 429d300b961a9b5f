//! Pool counters.

use std::sync::atomic::{AtomicU64, Ordering};

/// Snapshot of a [`BufferPool`](crate::BufferPool)'s counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PoolStats {
    /// Acquisitions served from a spare block.
    pub hits: u64,
    /// Acquisitions that had to allocate.
    pub misses: u64,
    /// Blocks accepted back as spares.
    pub released: u64,
    /// Released blocks dropped because of the retention limits.
    pub discarded: u64,
}

impl PoolStats {
    /// Fraction of acquisitions served from spare blocks, 0.0 when none happened.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

#[derive(Debug, Default)]
pub(crate) struct Counters {
    hits: AtomicU64,
    misses: AtomicU64,
    released: AtomicU64,
    discarded: AtomicU64,
}

impl Counters {
    pub(crate) fn hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn release(&self) {
        self.released.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn discard(&self) {
        self.discarded.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn snapshot(&self) -> PoolStats {
        PoolStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            released: self.released.load(Ordering::Relaxed),
            discarded: self.discarded.load(Ordering::Relaxed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot() {
        let counters = Counters::default();
        counters.hit();
        counters.miss();
        counters.miss();
        counters.discard();

        let stats = counters.snapshot();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 2);
        assert_eq!(stats.released, 0);
        assert_eq!(stats.discarded, 1);
    }

    #[test]
    fn test_hit_rate() {
        assert_eq!(PoolStats::default().hit_rate(), 0.0);

        let stats = PoolStats {
            hits: 3,
            misses: 1,
            ..PoolStats::default()
        };
        assert_eq!(stats.hit_rate(), 0.75);
    }
}
