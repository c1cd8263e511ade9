//! Error types for StageKV core.

use thiserror::Error;

/// Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur in StageKV core operations.
///
/// Both variants report a violated precondition on the transaction status.
/// The store is left unchanged whenever one is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CoreError {
    /// A write, commit, or rollback was attempted with no open transaction.
    #[error("no active transaction")]
    NoActiveTransaction,

    /// A transaction was begun while one is already open (or, in nested
    /// mode, while the configured depth limit is reached).
    #[error("transaction already active")]
    TransactionAlreadyActive,
}

impl CoreError {
    /// Returns a short, stable name for the error kind.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::NoActiveTransaction => "NoActiveTransaction",
            Self::TransactionAlreadyActive => "TransactionAlreadyActive",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        assert_eq!(
            CoreError::NoActiveTransaction.to_string(),
            "no active transaction"
        );
        assert_eq!(
            CoreError::TransactionAlreadyActive.to_string(),
            "transaction already active"
        );
    }

    #[test]
    fn kind_names() {
        assert_eq!(CoreError::NoActiveTransaction.kind(), "NoActiveTransaction");
        assert_eq!(
            CoreError::TransactionAlreadyActive.kind(),
            "TransactionAlreadyActive"
        );
    }
}
