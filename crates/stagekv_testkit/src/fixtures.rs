//! Test fixtures and store helpers.
//!
//! Provides convenience functions for setting up stores and replaying
//! generated operations against them.

use crate::generators::Operation;
use crate::model::ModelStore;
use stagekv_core::{Config, CoreError, Store, Value};

/// Creates a single-level store whose base holds `entries`.
///
/// # Panics
///
/// Panics if the store rejects the seeding transaction.
pub fn store_with(entries: &[(&str, Value)]) -> Store {
    seeded(Config::default(), entries)
}

/// Creates a nested-mode store whose base holds `entries`.
///
/// # Panics
///
/// Panics if the store rejects the seeding transaction.
pub fn nested_store_with(entries: &[(&str, Value)]) -> Store {
    seeded(Config::nested(), entries)
}

fn seeded(config: Config, entries: &[(&str, Value)]) -> Store {
    let mut store = Store::with_config(config);
    store
        .transaction(|tx| {
            for (key, value) in entries {
                tx.put(*key, *value)?;
            }
            Ok::<(), CoreError>(())
        })
        .expect("Failed to seed store");
    store
}

/// Observable result of one operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// A read returned this value.
    Read(Value),
    /// A mutation succeeded.
    Done,
    /// The operation was rejected.
    Rejected(CoreError),
}

impl From<Result<(), CoreError>> for Outcome {
    fn from(result: Result<(), CoreError>) -> Self {
        match result {
            Ok(()) => Self::Done,
            Err(err) => Self::Rejected(err),
        }
    }
}

/// Applies one operation to a store.
pub fn apply(store: &mut Store, op: &Operation) -> Outcome {
    match op {
        Operation::Get { key } => Outcome::Read(store.get(key)),
        Operation::Put { key, value } => store.put(key.as_str(), *value).into(),
        Operation::Begin => store.begin_transaction().into(),
        Operation::Commit => store.commit().into(),
        Operation::Rollback => store.rollback().into(),
    }
}

/// Applies one operation to the reference model.
pub fn apply_model(model: &mut ModelStore, op: &Operation) -> Outcome {
    match op {
        Operation::Get { key } => Outcome::Read(model.get(key)),
        Operation::Put { key, value } => model.put(key, *value).into(),
        Operation::Begin => model.begin().into(),
        Operation::Commit => model.commit().into(),
        Operation::Rollback => model.rollback().into(),
    }
}

/// Replays operations on a store, collecting every outcome.
pub fn replay(store: &mut Store, ops: &[Operation]) -> Vec<Outcome> {
    ops.iter().map(|op| apply(store, op)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_with_seeds_base() {
        let store = store_with(&[("a", 1), ("b", 2)]);
        assert_eq!(store.committed(), vec![("a", 1), ("b", 2)]);
        assert!(!store.in_transaction());
    }

    #[test]
    fn replay_reports_rejections() {
        let mut store = store_with(&[]);
        let outcomes = replay(
            &mut store,
            &[
                Operation::Commit,
                Operation::Begin,
                Operation::Put {
                    key: "a".into(),
                    value: 3,
                },
                Operation::Get { key: "a".into() },
            ],
        );

        assert_eq!(
            outcomes,
            vec![
                Outcome::Rejected(CoreError::NoActiveTransaction),
                Outcome::Done,
                Outcome::Done,
                Outcome::Read(3),
            ]
        );
    }
}
