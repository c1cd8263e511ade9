//! Transactional overlay.
//!
//! Uncommitted writes live in an [`OverlayStack`] above the committed base
//! state:
//! - **Shadowing**: reads consult the open layers before the base
//! - **Atomic commit**: a layer is detached and merged in one step
//! - **Discard**: rollback drops the top layer, leaving everything else as it was
//!
//! In single-level mode the stack holds at most one layer.

mod overlay;
mod stack;

pub(crate) use stack::{MergeTarget, OverlayStack};
