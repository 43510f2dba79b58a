//! Error types for casper-store

use std::path::PathBuf;

/// Result type for casper-store operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in casper-store operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("reading file {path} failed: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("writing file {path} failed: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Lock acquisition failed for {path}")]
    LockFailed { path: PathBuf },

    #[error(transparent)]
    Core(#[from] casper_core::Error),
}

impl Error {
    pub fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Read {
            path: path.into(),
            source,
        }
    }

    pub fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Write {
            path: path.into(),
            source,
        }
    }
}
