//! Error types for casper-source

use std::path::PathBuf;

/// Result type for casper-source operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while resolving sources or rendering templates
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Descriptor could not be understood
    #[error("invalid source: {descriptor}: {message}")]
    SourceFormat { descriptor: String, message: String },

    /// Descriptor names a scheme with no source behind it
    #[error("invalid source format {scheme}")]
    UnknownScheme { scheme: String },

    #[error("reading source {path} failed: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A source file does not hold a mapping at the top level
    #[error("source {path} must contain a mapping of values")]
    NotAMapping { path: PathBuf },

    /// Template references a value no source provides
    #[error("template references missing value '{name}'")]
    MissingValue { name: String },

    #[error(transparent)]
    Core(#[from] casper_core::Error),
}

impl Error {
    pub fn source_format(descriptor: impl Into<String>, message: impl Into<String>) -> Self {
        Self::SourceFormat {
            descriptor: descriptor.into(),
            message: message.into(),
        }
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
