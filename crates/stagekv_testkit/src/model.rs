//! Reference model of the store.
//!
//! The model keeps a full copy of the visible state per open level instead
//! of sparse overlays. It is slow but obviously correct, which makes it a
//! useful oracle for property tests.

use stagekv_core::{Config, CoreError, CoreResult, TransactionMode, Value, DEFAULT_VALUE};
use std::collections::BTreeMap;

/// Copy-on-begin model of a transactional store.
#[derive(Debug, Clone, Default)]
pub struct ModelStore {
    committed: BTreeMap<String, Value>,
    /// One full view per open level, innermost last.
    views: Vec<BTreeMap<String, Value>>,
    depth_limit: Option<usize>,
}

impl ModelStore {
    /// Creates a model matching the given store configuration.
    pub fn new(config: &Config) -> Self {
        let depth_limit = match config.mode {
            TransactionMode::SingleLevel => Some(1),
            TransactionMode::Nested => config.max_depth.map(|d| d.max(1)),
        };
        Self {
            committed: BTreeMap::new(),
            views: Vec::new(),
            depth_limit,
        }
    }

    /// Reads a key.
    pub fn get(&self, key: &str) -> Value {
        self.views
            .last()
            .unwrap_or(&self.committed)
            .get(key)
            .copied()
            .unwrap_or(DEFAULT_VALUE)
    }

    /// Writes a key in the innermost view.
    pub fn put(&mut self, key: &str, value: Value) -> CoreResult<()> {
        let view = self.views.last_mut().ok_or(CoreError::NoActiveTransaction)?;
        view.insert(key.to_string(), value);
        Ok(())
    }

    /// Opens a level by copying the currently visible state.
    pub fn begin(&mut self) -> CoreResult<()> {
        if self.depth_limit.is_some_and(|limit| self.views.len() >= limit) {
            return Err(CoreError::TransactionAlreadyActive);
        }
        let current = self.views.last().unwrap_or(&self.committed).clone();
        self.views.push(current);
        Ok(())
    }

    /// Replaces the level below with the innermost view.
    pub fn commit(&mut self) -> CoreResult<()> {
        let view = self.views.pop().ok_or(CoreError::NoActiveTransaction)?;
        match self.views.last_mut() {
            Some(parent) => *parent = view,
            None => self.committed = view,
        }
        Ok(())
    }

    /// Drops the innermost view.
    pub fn rollback(&mut self) -> CoreResult<()> {
        self.views
            .pop()
            .map(|_| ())
            .ok_or(CoreError::NoActiveTransaction)
    }

    /// Returns the number of open levels.
    pub fn depth(&self) -> usize {
        self.views.len()
    }

    /// Returns the committed state.
    pub fn committed(&self) -> &BTreeMap<String, Value> {
        &self.committed
    }
}
