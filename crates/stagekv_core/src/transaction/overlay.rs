//! A single layer of staged writes.

use crate::types::Value;
use std::collections::HashMap;

/// Writes staged by one transaction level.
///
/// An overlay only ever records puts. Keys are never removed from the
/// store, so there is no tombstone variant.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct Overlay {
    /// Pending writes: key -> staged value.
    writes: HashMap<String, Value>,
}

impl Overlay {
    /// Creates an empty overlay.
    #[must_use]
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Stages a write, replacing any earlier staged value for the key.
    pub(crate) fn put(&mut self, key: String, value: Value) {
        self.writes.insert(key, value);
    }

    /// Returns the staged value for a key, if any.
    #[must_use]
    pub(crate) fn get(&self, key: &str) -> Option<Value> {
        self.writes.get(key).copied()
    }

    /// Returns the number of staged keys.
    #[must_use]
    pub(crate) fn len(&self) -> usize {
        self.writes.len()
    }

    /// Returns all staged writes.
    pub(crate) fn iter(&self) -> impl Iterator<Item = (&str, Value)> {
        self.writes.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Folds a higher layer into this one. Its values win on conflict.
    pub(crate) fn absorb(&mut self, upper: Overlay) {
        self.writes.extend(upper.writes);
    }

    /// Consumes the overlay, yielding its writes.
    #[must_use]
    pub(crate) fn into_writes(self) -> HashMap<String, Value> {
        self.writes
    }
}
