//! Stress tests for StageKV.
//!
//! These helpers drive a [`SharedStore`] from several threads at once.

use stagekv_core::{CoreError, SharedStore};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

/// Result of a stress test run.
#[derive(Debug, Clone)]
pub struct StressTestResult {
    /// Total operations performed.
    pub total_ops: usize,
    /// Successful operations.
    pub successful_ops: usize,
    /// Operations rejected by the store.
    pub failed_ops: usize,
    /// Total duration.
    pub duration: Duration,
}

impl StressTestResult {
    /// Creates a new result.
    pub fn new(successful: usize, failed: usize, duration: Duration) -> Self {
        Self {
            total_ops: successful + failed,
            successful_ops: successful,
            failed_ops: failed,
            duration,
        }
    }

    /// Returns operations per second.
    pub fn ops_per_second(&self) -> f64 {
        let secs = self.duration.as_secs_f64();
        if secs > 0.0 {
            self.total_ops as f64 / secs
        } else {
            0.0
        }
    }
}

/// Configuration for stress tests.
#[derive(Debug, Clone)]
pub struct StressConfig {
    /// Transactions per thread.
    pub transactions: usize,
    /// Number of concurrent threads.
    pub threads: usize,
    /// Number of distinct keys.
    pub key_count: usize,
}

impl Default for StressConfig {
    fn default() -> Self {
        Self {
            transactions: 1_000,
            threads: 4,
            key_count: 16,
        }
    }
}

/// Runs concurrent transfer transactions between keys.
///
/// Every transaction moves one unit from one key to another inside a single
/// closure transaction, so the sum over all keys stays zero.
pub fn stress_concurrent_transfers(store: &SharedStore, config: &StressConfig) -> StressTestResult {
    let successful = Arc::new(AtomicUsize::new(0));
    let failed = Arc::new(AtomicUsize::new(0));
    let key_count = config.key_count.max(2);

    let start = Instant::now();

    let handles: Vec<_> = (0..config.threads)
        .map(|t| {
            let store = store.clone();
            let successful = Arc::clone(&successful);
            let failed = Arc::clone(&failed);
            let transactions = config.transactions;

            thread::spawn(move || {
                for i in 0..transactions {
                    let from = format!("k{}", (t + i) % key_count);
                    let to = format!("k{}", (t + i + 1) % key_count);

                    let result = store.transaction(|tx| {
                        let a = tx.get(&from);
                        let b = tx.get(&to);
                        tx.put(from.as_str(), a - 1)?;
                        tx.put(to.as_str(), b + 1)?;
                        Ok::<(), CoreError>(())
                    });

                    match result {
                        Ok(()) => successful.fetch_add(1, Ordering::Relaxed),
                        Err(_) => failed.fetch_add(1, Ordering::Relaxed),
                    };
                }
            })
        })
        .collect();

    for handle in handles {
        let _ = handle.join();
    }

    StressTestResult::new(
        successful.load(Ordering::Relaxed),
        failed.load(Ordering::Relaxed),
        start.elapsed(),
    )
}

/// Runs threads that race to open the store-wide transaction by hand.
///
/// Losers observe `TransactionAlreadyActive` and count as failed.
pub fn stress_begin_contention(store: &SharedStore, config: &StressConfig) -> StressTestResult {
    let successful = Arc::new(AtomicUsize::new(0));
    let failed = Arc::new(AtomicUsize::new(0));

    let start = Instant::now();

    let handles: Vec<_> = (0..config.threads)
        .map(|t| {
            let store = store.clone();
            let successful = Arc::clone(&successful);
            let failed = Arc::clone(&failed);
            let transactions = config.transactions;

            thread::spawn(move || {
                for i in 0..transactions {
                    match store.begin_transaction() {
                        Ok(()) => {
                            let key = format!("t{t}");
                            let committed = store.put(key, i as i64).and_then(|()| store.commit());
                            match committed {
                                Ok(()) => successful.fetch_add(1, Ordering::Relaxed),
                                Err(_) => failed.fetch_add(1, Ordering::Relaxed),
                            };
                        }
                        Err(_) => {
                            failed.fetch_add(1, Ordering::Relaxed);
                        }
                    }
                }
            })
        })
        .collect();

    for handle in handles {
        let _ = handle.join();
    }

    StressTestResult::new(
        successful.load(Ordering::Relaxed),
        failed.load(Ordering::Relaxed),
        start.elapsed(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transfers_preserve_total() {
        let store = SharedStore::new();
        let config = StressConfig {
            transactions: 200,
            threads: 4,
            key_count: 5,
        };

        let result = stress_concurrent_transfers(&store, &config);

        assert_eq!(result.successful_ops, 800);
        assert_eq!(result.failed_ops, 0);
        let total: i64 = (0..5).map(|i| store.get(&format!("k{i}"))).sum();
        assert_eq!(total, 0);
    }

    #[test]
    fn begin_contention_accounts_for_every_attempt() {
        let store = SharedStore::new();
        let config = StressConfig {
            transactions: 100,
            threads: 4,
            key_count: 1,
        };

        let result = stress_begin_contention(&store, &config);

        assert_eq!(result.total_ops, 400);
        assert!(result.successful_ops >= 1);
        assert!(!store.status().is_active());
    }
}
