//! Project configuration file
//!
//! `casper.yaml` describes where the template and its values come from and
//! which store to reconcile:
//!
//! ```yaml
//! template: template.yaml
//! format: yaml
//! sources:
//!   - file://values.yaml
//!   - env=prod
//! storage:
//!   type: file
//!   path: output.yaml
//!   ignore: _ignore
//! ```
//!
//! Every field is optional.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use casper_core::{DEFAULT_IGNORE_MARKER, Format};
use serde::Deserialize;

use crate::error::{CliError, Result};

/// Config file looked up in the working directory when none is given
pub const DEFAULT_CONFIG: &str = "casper.yaml";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Template file
    pub template: PathBuf,
    /// Format the rendered template is decoded as
    pub format: Format,
    /// Source descriptors, lowest precedence first
    pub sources: Vec<String>,
    pub storage: StorageConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            template: PathBuf::from("template.yaml"),
            format: Format::Yaml,
            sources: Vec::new(),
            storage: StorageConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StorageConfig {
    /// Backend name; only `file` is supported
    #[serde(rename = "type")]
    pub kind: String,
    /// Document path for the `file` backend
    pub path: PathBuf,
    /// Marker value that protects a subtree; empty disables it
    pub ignore: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            kind: "file".to_string(),
            path: PathBuf::from("output.yaml"),
            ignore: DEFAULT_IGNORE_MARKER.to_string(),
        }
    }
}

impl Config {
    fn parse(path: &Path, content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content).map_err(|e| CliError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Load the config and the directory its relative paths are based on.
    ///
    /// An explicit path must exist. Without one, `casper.yaml` in the
    /// working directory is used when present, defaults otherwise.
    pub fn discover(explicit: Option<&Path>) -> Result<(Self, PathBuf)> {
        let path = explicit.unwrap_or_else(|| Path::new(DEFAULT_CONFIG));
        let base = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));

        match fs::read_to_string(path) {
            Ok(content) => Ok((Self::parse(path, &content)?, base)),
            Err(e) if explicit.is_none() && e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!("No {} found, using defaults", DEFAULT_CONFIG);
                Ok((Self::default(), base))
            }
            Err(e) => Err(CliError::Config {
                path: path.to_path_buf(),
                message: e.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn partial_config_keeps_defaults() {
        let config = Config::parse(
            Path::new("casper.yaml"),
            "sources: [a=1]\nstorage:\n  path: kv.json\n",
        )
        .unwrap();

        assert_eq!(config.template, PathBuf::from("template.yaml"));
        assert_eq!(config.format, Format::Yaml);
        assert_eq!(config.sources, vec!["a=1".to_string()]);
        assert_eq!(config.storage.kind, "file");
        assert_eq!(config.storage.path, PathBuf::from("kv.json"));
        assert_eq!(config.storage.ignore, "_ignore");
    }

    #[test]
    fn format_is_read_by_name() {
        let config = Config::parse(Path::new("c.yaml"), "format: json\n").unwrap();
        assert_eq!(config.format, Format::Json);
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let err = Config::parse(Path::new("c.yaml"), "templte: t.yaml\n").unwrap_err();
        assert!(err.to_string().starts_with("invalid config c.yaml"));
    }

    #[test]
    fn explicit_missing_config_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("absent.yaml");
        assert!(Config::discover(Some(&path)).is_err());
    }

    #[test]
    fn base_is_config_directory() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("casper.yaml");
        fs::write(&path, "template: t.yaml\n").unwrap();

        let (config, base) = Config::discover(Some(&path)).unwrap();
        assert_eq!(config.template, PathBuf::from("t.yaml"));
        assert_eq!(base, dir.path());
    }
}
