//! # StageKV Core
//!
//! Transactional in-memory key-value engine.
//!
//! This crate provides:
//! - A committed base state of string keys and integer values
//! - A transactional overlay that shadows the base while open
//! - Atomic commit and rollback of the overlay
//! - Optional nested transactions as a stack of overlay layers
//! - A lock-guarded handle for sharing one store across threads
//!
//! ## Example
//!
//! ```rust
//! use stagekv_core::{CoreError, Store};
//!
//! let mut store = Store::new();
//! assert_eq!(store.get("B"), 0);
//!
//! store.begin_transaction()?;
//! store.put("B", 10)?;
//! store.rollback()?;
//! assert_eq!(store.get("B"), 0);
//!
//! assert_eq!(store.rollback(), Err(CoreError::NoActiveTransaction));
//! # Ok::<(), CoreError>(())
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod error;
mod shared;
mod stats;
mod store;
mod transaction;
mod types;

pub use config::{Config, TransactionMode};
pub use error::{CoreError, CoreResult};
pub use shared::SharedStore;
pub use stats::{StatsSnapshot, StoreStats};
pub use store::{Store, Transaction};
pub use types::{TransactionStatus, Value, DEFAULT_VALUE};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
