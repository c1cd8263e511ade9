//! Store statistics.
//!
//! Counters are atomic so that reads, which only borrow the store shared,
//! can still be recorded.
//!
//! # Usage
//!
//! ```rust
//! use stagekv_core::Store;
//!
//! let mut store = Store::new();
//! store.begin_transaction().unwrap();
//! store.put("a", 1).unwrap();
//! store.commit().unwrap();
//!
//! let stats = store.stats().snapshot();
//! assert_eq!(stats.writes, 1);
//! assert_eq!(stats.transactions_committed, 1);
//! ```

use std::sync::atomic::{AtomicU64, Ordering};

/// Store statistics.
///
/// All counters are monotonically increasing.
#[derive(Debug, Default)]
pub struct StoreStats {
    /// Total number of `get` calls.
    reads: AtomicU64,
    /// Total number of accepted `put` calls.
    writes: AtomicU64,
    /// Total number of transactions (or nested layers) begun.
    transactions_begun: AtomicU64,
    /// Total number of successful commits.
    transactions_committed: AtomicU64,
    /// Total number of successful rollbacks.
    transactions_rolled_back: AtomicU64,
    /// Total number of operations rejected with an error.
    rejected: AtomicU64,
}

impl StoreStats {
    /// Creates a new stats instance.
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record_read(&self) {
        self.reads.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_write(&self) {
        self.writes.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_begin(&self) {
        self.transactions_begun.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_commit(&self) {
        self.transactions_committed.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_rollback(&self) {
        self.transactions_rolled_back.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_rejected(&self) {
        self.rejected.fetch_add(1, Ordering::Relaxed);
    }

    /// Returns the total number of reads.
    pub fn reads(&self) -> u64 {
        self.reads.load(Ordering::Relaxed)
    }

    /// Returns the total number of accepted writes.
    pub fn writes(&self) -> u64 {
        self.writes.load(Ordering::Relaxed)
    }

    /// Returns the total number of transactions begun.
    pub fn transactions_begun(&self) -> u64 {
        self.transactions_begun.load(Ordering::Relaxed)
    }

    /// Returns the total number of commits.
    pub fn transactions_committed(&self) -> u64 {
        self.transactions_committed.load(Ordering::Relaxed)
    }

    /// Returns the total number of rollbacks.
    pub fn transactions_rolled_back(&self) -> u64 {
        self.transactions_rolled_back.load(Ordering::Relaxed)
    }

    /// Returns the total number of rejected operations.
    pub fn rejected(&self) -> u64 {
        self.rejected.load(Ordering::Relaxed)
    }

    /// Returns a snapshot of all stats.
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            reads: self.reads(),
            writes: self.writes(),
            transactions_begun: self.transactions_begun(),
            transactions_committed: self.transactions_committed(),
            transactions_rolled_back: self.transactions_rolled_back(),
            rejected: self.rejected(),
        }
    }
}

/// A point-in-time snapshot of store statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StatsSnapshot {
    /// Total number of reads.
    pub reads: u64,
    /// Total number of accepted writes.
    pub writes: u64,
    /// Total number of transactions begun.
    pub transactions_begun: u64,
    /// Total number of commits.
    pub transactions_committed: u64,
    /// Total number of rollbacks.
    pub transactions_rolled_back: u64,
    /// Total number of rejected operations.
    pub rejected: u64,
}
