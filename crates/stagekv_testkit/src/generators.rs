//! Property-based test generators using proptest.
//!
//! Keys are drawn from a small alphabet so that generated operation
//! sequences revisit the same keys often.

use proptest::prelude::*;
use stagekv_core::Value;

/// Strategy for generating keys.
pub fn key_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        4 => prop::string::string_regex("[A-E]").expect("Invalid regex"),
        1 => prop::string::string_regex("[a-z0-9_]{0,12}").expect("Invalid regex"),
    ]
}

/// Strategy for generating values, including the default value.
pub fn value_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        1 => Just(0),
        4 => -100i64..100,
        1 => any::<i64>(),
    ]
}

/// A single store operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    /// Read a key.
    Get {
        /// Key to read.
        key: String,
    },
    /// Stage a write.
    Put {
        /// Key to write.
        key: String,
        /// Value to write.
        value: Value,
    },
    /// Open a transaction.
    Begin,
    /// Commit the innermost transaction.
    Commit,
    /// Roll back the innermost transaction.
    Rollback,
}

/// Strategy for generating store operations.
pub fn operation_strategy() -> impl Strategy<Value = Operation> {
    prop_oneof![
        3 => key_strategy().prop_map(|key| Operation::Get { key }),
        4 => (key_strategy(), value_strategy())
            .prop_map(|(key, value)| Operation::Put { key, value }),
        2 => Just(Operation::Begin),
        1 => Just(Operation::Commit),
        1 => Just(Operation::Rollback),
    ]
}

/// Strategy for generating a sequence of operations.
pub fn operations_strategy(
    min_ops: usize,
    max_ops: usize,
) -> impl Strategy<Value = Vec<Operation>> {
    prop::collection::vec(operation_strategy(), min_ops..max_ops)
}

/// Configuration for property tests.
#[derive(Debug, Clone)]
pub struct PropTestConfig {
    /// Number of test cases to run.
    pub cases: u32,
    /// Maximum shrink iterations.
    pub max_shrink_iters: u32,
}

impl Default for PropTestConfig {
    fn default() -> Self {
        Self {
            cases: 256,
            max_shrink_iters: 1000,
        }
    }
}

impl PropTestConfig {
    /// Creates a configuration for quick tests.
    #[must_use]
    pub fn quick() -> Self {
        Self {
            cases: 32,
            max_shrink_iters: 100,
        }
    }

    /// Converts to proptest config.
    #[must_use]
    pub fn to_proptest_config(&self) -> ProptestConfig {
        ProptestConfig {
            cases: self.cases,
            max_shrink_iters: self.max_shrink_iters,
            ..ProptestConfig::default()
        }
    }
}
