//! # Storage Layer
//!
//! The builder persists through a plain key/value store, the same shape as a
//! browser's local storage. [`KeyValueBackend`] is that store; everything
//! above it only ever reads and writes whole string values.
//!
//! ## Layers
//!
//! - [`KeyValueBackend`]: raw I/O. Two implementations:
//!   - [`fs_backend::FsBackend`]: one file per key under a root directory,
//!     written atomically (tmp file then rename).
//!   - [`mem_backend::MemBackend`]: in-memory, for tests. Can simulate write
//!     failures.
//! - [`persistence::Persistence`]: knows which keys hold what and how to turn
//!   them back into a [`Document`](crate::model::Document).
//! - [`sink::FileSink`]: where export files go.
//!
//! ## Keys
//!
//! | Key | Value |
//! |-----|-------|
//! | `website-builder-pages` | JSON array of pages |
//! | `website-builder-current-page` | id of the open page, as plain text |
//! | `website-builder-tour-completed` | `"true"` once the onboarding tour was seen |
//!
//! ## Storage Layout
//!
//! ```text
//! <data_dir>/
//! ├── website-builder-pages
//! ├── website-builder-current-page
//! └── website-builder-tour-completed
//! ```
//!
//! ## Failure Model
//!
//! Writes are the only place the builder can fail for reasons outside the
//! document. The API saves *before* swapping in the new document, so a
//! failed write leaves memory and disk agreeing on the previous state. A
//! save touches two keys; when the second write fails the first is put back.
//! Reads never fail the caller: unreadable or corrupt data is logged and
//! treated as absent, which means a fresh default document.

use crate::error::Result;

pub mod fs_backend;
pub mod mem_backend;
pub mod persistence;
pub mod sink;

/// Abstract interface for raw key/value I/O.
///
/// All methods take `&self`; implementations use interior mutability.
pub trait KeyValueBackend {
    /// Returns `Ok(None)` when the key was never written or was removed.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Overwrites the value. MUST be atomic: a reader sees either the old or
    /// the new value, never a partial write.
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<()>;
}
