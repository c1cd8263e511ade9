//! # StageKV Testkit
//!
//! Test utilities for StageKV.
//!
//! This crate provides:
//! - Store fixtures and operation replay helpers
//! - Property-based test generators using proptest
//! - A copy-on-begin reference model to check the store against
//! - Concurrent stress helpers for the shared store handle
//!
//! ## Usage
//!
//! ```rust
//! use stagekv_testkit::prelude::*;
//!
//! let store = store_with(&[("A", 6)]);
//! assert_eq!(store.get("A"), 6);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod fixtures;
pub mod generators;
pub mod model;
pub mod stress;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::fixtures::*;
    pub use crate::generators::*;
    pub use crate::model::*;
    pub use crate::stress::*;
}

pub use fixtures::*;
pub use generators::*;
pub use model::*;
pub use stress::*;
