//! The transactional store.

use crate::config::Config;
use crate::error::{CoreError, CoreResult};
use crate::stats::StoreStats;
use crate::transaction::{MergeTarget, OverlayStack};
use crate::types::{TransactionStatus, Value, DEFAULT_VALUE};
use std::collections::HashMap;
use tracing::{debug, trace};

/// An in-memory key-value store with a transactional overlay.
///
/// `Store` owns:
/// - the committed base state, changed only by an outermost commit
/// - the overlay of writes staged by the open transaction
/// - the configuration deciding whether transactions nest
///
/// Writes are only accepted inside a transaction. While a transaction is
/// open, reads see its staged writes before the base state. Keys that hold
/// nothing read as [`DEFAULT_VALUE`].
///
/// # Example
///
/// ```rust
/// use stagekv_core::{CoreError, Store};
///
/// let mut store = Store::new();
/// assert_eq!(store.get("A"), 0);
/// assert_eq!(store.put("A", 5), Err(CoreError::NoActiveTransaction));
///
/// store.begin_transaction()?;
/// store.put("A", 5)?;
/// assert_eq!(store.get("A"), 5);
/// store.put("A", 6)?;
/// store.commit()?;
/// assert_eq!(store.get("A"), 6);
/// # Ok::<(), CoreError>(())
/// ```
pub struct Store {
    /// Configuration.
    config: Config,
    /// Committed key -> value state.
    base: HashMap<String, Value>,
    /// Staged writes of the open transaction(s).
    overlay: OverlayStack,
    /// Operation counters.
    stats: StoreStats,
}

impl Store {
    /// Creates an empty store with the default single-level configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Creates an empty store with a custom configuration.
    #[must_use]
    pub fn with_config(config: Config) -> Self {
        Self {
            config,
            base: HashMap::new(),
            overlay: OverlayStack::new(),
            stats: StoreStats::new(),
        }
    }

    /// Reads the value of a key.
    ///
    /// Resolution order: the open overlay layers from the top down, then the
    /// committed base, then [`DEFAULT_VALUE`]. Never fails.
    pub fn get(&self, key: &str) -> Value {
        if self.config.track_stats {
            self.stats.record_read();
        }

        let value = self
            .overlay
            .resolve(key)
            .or_else(|| self.base.get(key).copied())
            .unwrap_or(DEFAULT_VALUE);

        trace!(key, value, "get");
        value
    }

    /// Stages a write in the open transaction.
    ///
    /// Overwrites any value previously staged for the key at the current
    /// level. The base state is untouched until commit.
    ///
    /// # Errors
    ///
    /// Returns `NoActiveTransaction` if no transaction is open.
    pub fn put(&mut self, key: impl Into<String>, value: Value) -> CoreResult<()> {
        let Some(top) = self.overlay.top_mut() else {
            return Err(self.reject("put", CoreError::NoActiveTransaction));
        };

        let key = key.into();
        trace!(key = %key, value, "put");
        top.put(key, value);

        if self.config.track_stats {
            self.stats.record_write();
        }
        Ok(())
    }

    /// Opens a transaction.
    ///
    /// In single-level mode this moves the store from `Idle` to `Active`
    /// with an empty overlay. In nested mode it opens a new layer above any
    /// already open.
    ///
    /// # Errors
    ///
    /// Returns `TransactionAlreadyActive` if a transaction is open in
    /// single-level mode, or if the nested depth limit is reached. The open
    /// overlay is left intact.
    pub fn begin_transaction(&mut self) -> CoreResult<()> {
        if let Some(limit) = self.config.depth_limit() {
            if self.overlay.depth() >= limit {
                return Err(
                    self.reject("begin_transaction", CoreError::TransactionAlreadyActive)
                );
            }
        }

        self.overlay.push();

        if self.config.track_stats {
            self.stats.record_begin();
        }
        debug!(depth = self.overlay.depth(), "transaction begun");
        Ok(())
    }

    /// Commits the innermost open transaction.
    ///
    /// Its staged writes overwrite the matching keys of the level below: the
    /// enclosing layer in nested mode, otherwise the base state. Other keys
    /// are untouched. The merge happens in a single step.
    ///
    /// # Errors
    ///
    /// Returns `NoActiveTransaction` if no transaction is open.
    pub fn commit(&mut self) -> CoreResult<()> {
        let Some((target, writes)) = self.overlay.commit_top(&mut self.base) else {
            return Err(self.reject("commit", CoreError::NoActiveTransaction));
        };

        if self.config.track_stats {
            self.stats.record_commit();
        }
        match target {
            MergeTarget::Base => debug!(writes, "transaction committed"),
            MergeTarget::Parent => debug!(
                writes,
                depth = self.overlay.depth(),
                "nested transaction merged into parent"
            ),
        }
        Ok(())
    }

    /// Discards the innermost open transaction.
    ///
    /// The base state and any enclosing layers are untouched.
    ///
    /// # Errors
    ///
    /// Returns `NoActiveTransaction` if no transaction is open.
    pub fn rollback(&mut self) -> CoreResult<()> {
        let Some(discarded) = self.overlay.pop() else {
            return Err(self.reject("rollback", CoreError::NoActiveTransaction));
        };

        if self.config.track_stats {
            self.stats.record_rollback();
        }
        debug!(
            writes = discarded.len(),
            depth = self.overlay.depth(),
            "transaction rolled back"
        );
        Ok(())
    }

    /// Executes a function within a transaction.
    ///
    /// The function receives a [`Transaction`] handle that can read and
    /// stage writes but cannot close levels. If it returns `Ok`, the level
    /// opened here is committed. If it returns `Err` or panics, that level
    /// is rolled back. Enclosing levels opened by the caller stay open.
    ///
    /// # Errors
    ///
    /// Returns the error from `begin_transaction`, from the function, or
    /// from the final commit.
    pub fn transaction<F, T, E>(&mut self, f: F) -> Result<T, E>
    where
        F: FnOnce(&mut Transaction<'_>) -> Result<T, E>,
        E: From<CoreError>,
    {
        self.begin_transaction()?;
        let mut txn = Transaction {
            store: self,
            finished: false,
        };

        match f(&mut txn) {
            Ok(value) => {
                txn.finish(Self::commit)?;
                Ok(value)
            }
            Err(err) => {
                txn.finish(Self::rollback)?;
                Err(err)
            }
        }
    }

    /// Returns whether a transaction is open.
    #[must_use]
    pub fn status(&self) -> TransactionStatus {
        if self.overlay.is_empty() {
            TransactionStatus::Idle
        } else {
            TransactionStatus::Active
        }
    }

    /// Returns true if a transaction is open.
    #[must_use]
    pub fn in_transaction(&self) -> bool {
        self.status().is_active()
    }

    /// Returns the number of open transaction levels.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.overlay.depth()
    }

    /// Returns the number of distinct keys with staged writes.
    #[must_use]
    pub fn pending_len(&self) -> usize {
        self.overlay.pending_len()
    }

    /// Returns the number of keys in the committed base state.
    #[must_use]
    pub fn committed_len(&self) -> usize {
        self.base.len()
    }

    /// Returns the committed base state, sorted by key.
    #[must_use]
    pub fn committed(&self) -> Vec<(&str, Value)> {
        let mut entries: Vec<_> = self.base.iter().map(|(k, v)| (k.as_str(), *v)).collect();
        entries.sort_unstable_by_key(|(k, _)| *k);
        entries
    }

    /// Returns the effective staged writes, sorted by key.
    ///
    /// Where layers disagree the innermost value is reported.
    #[must_use]
    pub fn pending(&self) -> Vec<(&str, Value)> {
        let mut entries: Vec<_> = self.overlay.flattened().into_iter().collect();
        entries.sort_unstable_by_key(|(k, _)| *k);
        entries
    }

    /// Returns the store configuration.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns the operation counters.
    #[must_use]
    pub fn stats(&self) -> &StoreStats {
        &self.stats
    }

    fn reject(&self, op: &'static str, err: CoreError) -> CoreError {
        if self.config.track_stats {
            self.stats.record_rejected();
        }
        debug!(op, error = %err, "operation rejected");
        err
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store")
            .field("mode", &self.config.mode)
            .field("status", &self.status())
            .field("depth", &self.depth())
            .field("committed_len", &self.committed_len())
            .field("pending_len", &self.pending_len())
            .finish_non_exhaustive()
    }
}

/// A transaction opened by [`Store::transaction`].
///
/// Only reads and staged writes are exposed. The level is closed by
/// `Store::transaction` once the closure returns, or rolled back when the
/// handle is dropped during unwinding.
pub struct Transaction<'s> {
    store: &'s mut Store,
    finished: bool,
}

impl Transaction<'_> {
    /// Reads a key as the open transaction sees it.
    pub fn get(&self, key: &str) -> Value {
        self.store.get(key)
    }

    /// Stages a write in this transaction's level.
    ///
    /// # Errors
    ///
    /// Returns `NoActiveTransaction` if the level is no longer open.
    pub fn put(&mut self, key: impl Into<String>, value: Value) -> CoreResult<()> {
        self.store.put(key, value)
    }

    /// Returns the number of open transaction levels, including this one.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.store.depth()
    }

    fn finish(&mut self, close: fn(&mut Store) -> CoreResult<()>) -> CoreResult<()> {
        self.finished = true;
        close(self.store)
    }
}

impl Drop for Transaction<'_> {
    fn drop(&mut self) {
        if !self.finished && self.store.rollback().is_ok() {
            debug!(depth = self.store.depth(), "transaction rolled back on unwind");
        }
    }
}

impl std::fmt::Debug for Transaction<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Transaction")
            .field("depth", &self.depth())
            .finish_non_exhaustive()
    }
}
