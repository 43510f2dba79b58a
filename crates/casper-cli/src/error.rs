//! Error types for casper-cli

use std::path::PathBuf;

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors that can occur in CLI operations
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Error from casper-core
    #[error(transparent)]
    Core(#[from] casper_core::Error),

    /// Error from casper-source
    #[error(transparent)]
    Source(#[from] casper_source::Error),

    /// Error from casper-store
    #[error(transparent)]
    Store(#[from] casper_store::Error),

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// Interactive prompt error
    #[error("Interactive prompt error: {0}")]
    Dialoguer(#[from] dialoguer::Error),

    /// Project config file could not be read or decoded
    #[error("invalid config {path}: {message}")]
    Config { path: PathBuf, message: String },

    /// Failure inside a named stage of a command
    #[error("{stage} failed: {source}")]
    Stage {
        stage: &'static str,
        #[source]
        source: Box<CliError>,
    },

    /// User-facing error with a message
    #[error("{message}")]
    User { message: String },
}

impl CliError {
    /// Create a new user error with the given message
    pub fn user(message: impl Into<String>) -> Self {
        Self::User {
            message: message.into(),
        }
    }

    /// Attribute this error to a command stage
    pub fn during(self, stage: &'static str) -> Self {
        Self::Stage {
            stage,
            source: Box::new(self),
        }
    }
}
