//! Core type definitions for StageKV.

use std::fmt;

/// Value type stored under each key.
pub type Value = i64;

/// Value returned by reads of keys that hold nothing.
///
/// An explicit write of this value cannot be told apart from absence.
pub const DEFAULT_VALUE: Value = 0;

/// Whether a transaction is currently open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TransactionStatus {
    /// No transaction is open. Writes are rejected.
    #[default]
    Idle,
    /// A transaction is open. Reads consult the overlay first.
    Active,
}

impl TransactionStatus {
    /// Returns true if a transaction is open.
    #[must_use]
    pub const fn is_active(self) -> bool {
        matches!(self, Self::Active)
    }
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => f.write_str("idle"),
            Self::Active => f.write_str("active"),
        }
    }
}
