//! Error types for casper-core

use std::fmt;

/// Result type for casper-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error reported by a store backend
pub type BackendError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Store operation that failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreOp {
    List,
    Put,
    Delete,
}

impl fmt::Display for StoreOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::List => f.write_str("list"),
            Self::Put => f.write_str("put"),
            Self::Delete => f.write_str("delete"),
        }
    }
}

/// Errors that can occur in casper-core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A leaf or mapping key that has no flat string form
    #[error("Unsupported value at '{path}': {kind}")]
    UnsupportedValue { path: String, kind: String },

    /// A store call failed; `key` is the key (or prefix, for list) involved
    #[error("Store {op} failed for key '{key}': {source}")]
    Store {
        op: StoreOp,
        key: String,
        #[source]
        source: BackendError,
    },

    /// A key holds a value and is also the parent of other keys
    #[error("Key '{key}' holds a value and also has children")]
    KeyConflict { key: String },

    #[error("Failed to parse {format} content: {message}")]
    Parse { format: String, message: String },

    #[error("Unsupported format: {0}")]
    UnknownFormat(String),

    #[error("Render error: {message}")]
    Render { message: String },
}

impl Error {
    pub fn unsupported(path: impl Into<String>, kind: impl Into<String>) -> Self {
        Self::UnsupportedValue {
            path: path.into(),
            kind: kind.into(),
        }
    }

    pub fn store(op: StoreOp, key: impl Into<String>, source: BackendError) -> Self {
        Self::Store {
            op,
            key: key.into(),
            source,
        }
    }

    pub fn parse(format: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Parse {
            format: format.into(),
            message: message.into(),
        }
    }

    pub fn render(message: impl Into<String>) -> Self {
        Self::Render {
            message: message.into(),
        }
    }
}
