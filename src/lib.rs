//! djrun - locate the nearest Django project and hand off to the
//! management tool.
//!
//! The search ascends from a starting directory toward the filesystem root,
//! matching each directory against a module-existence heuristic; a marker
//! file redirects the remaining search into a full scan of that subtree.
//! This exposes the modules as a library so integration tests can drive the
//! locator directly; the `dj` binary is a thin wrapper around them.

pub mod cli;
pub mod config;
pub mod error;
pub mod listing;
pub mod locate;
pub mod manage;
pub mod pymod;
pub mod walk;

// Re-exports for ergonomics
pub use error::{LocateError, Result};
pub use locate::{LocateOptions, locate};
