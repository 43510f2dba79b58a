//! File-backed key-value store for casper
//!
//! Implements the [`casper_core::Store`] contract over a YAML or JSON
//! document on disk, with atomic, locked writes.

pub mod error;
pub mod file;
pub mod io;

pub use error::{Error, Result};
pub use file::FileStore;
