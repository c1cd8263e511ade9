//! Thread-safe store handle.

use crate::config::Config;
use crate::error::{CoreError, CoreResult};
use crate::stats::StatsSnapshot;
use crate::store::{Store, Transaction};
use crate::types::{TransactionStatus, Value};
use parking_lot::Mutex;
use std::sync::Arc;

/// A cloneable, thread-safe handle to one [`Store`].
///
/// Every operation holds a single lock over the base state, the overlay and
/// the status for its whole duration, so a commit is never observed half
/// applied.
///
/// There is one transaction per store, not per handle. A `begin_transaction`
/// while it is open fails fast with `TransactionAlreadyActive` instead of
/// waiting.
#[derive(Clone, Default)]
pub struct SharedStore {
    inner: Arc<Mutex<Store>>,
}

impl SharedStore {
    /// Creates a handle to a new empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::from_store(Store::new())
    }

    /// Creates a handle to a new store with a custom configuration.
    #[must_use]
    pub fn with_config(config: Config) -> Self {
        Self::from_store(Store::with_config(config))
    }

    /// Wraps an existing store.
    #[must_use]
    pub fn from_store(store: Store) -> Self {
        Self {
            inner: Arc::new(Mutex::new(store)),
        }
    }

    /// Reads the value of a key. See [`Store::get`].
    pub fn get(&self, key: &str) -> Value {
        self.inner.lock().get(key)
    }

    /// Stages a write. See [`Store::put`].
    pub fn put(&self, key: impl Into<String>, value: Value) -> CoreResult<()> {
        self.inner.lock().put(key, value)
    }

    /// Opens a transaction. See [`Store::begin_transaction`].
    pub fn begin_transaction(&self) -> CoreResult<()> {
        self.inner.lock().begin_transaction()
    }

    /// Commits the innermost transaction. See [`Store::commit`].
    pub fn commit(&self) -> CoreResult<()> {
        self.inner.lock().commit()
    }

    /// Discards the innermost transaction. See [`Store::rollback`].
    pub fn rollback(&self) -> CoreResult<()> {
        self.inner.lock().rollback()
    }

    /// Executes a function within a transaction while holding the lock.
    ///
    /// No other handle can read or write until the function returns and the
    /// transaction is committed (on `Ok`) or rolled back (on `Err`). A panic
    /// in the function rolls the transaction back before the lock is
    /// released, so the store is left `Idle` for the other handles.
    pub fn transaction<F, T, E>(&self, f: F) -> Result<T, E>
    where
        F: FnOnce(&mut Transaction<'_>) -> Result<T, E>,
        E: From<CoreError>,
    {
        self.inner.lock().transaction(f)
    }

    /// Returns whether a transaction is open.
    #[must_use]
    pub fn status(&self) -> TransactionStatus {
        self.inner.lock().status()
    }

    /// Returns the number of open transaction levels.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.inner.lock().depth()
    }

    /// Returns a snapshot of the operation counters.
    #[must_use]
    pub fn stats(&self) -> StatsSnapshot {
        self.inner.lock().stats().snapshot()
    }

    /// Runs a function with shared access to the underlying store.
    pub fn with_store<R>(&self, f: impl FnOnce(&Store) -> R) -> R {
        f(&self.inner.lock())
    }
}

impl std::fmt::Debug for SharedStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.inner.try_lock() {
            Some(store) => f.debug_tuple("SharedStore").field(&*store).finish(),
            None => f.debug_tuple("SharedStore").field(&"<locked>").finish(),
        }
    }
}
