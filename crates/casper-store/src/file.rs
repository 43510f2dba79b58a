//! Store backed by a single document file
//!
//! The file holds the whole key space as one nested YAML or JSON document.
//! Listing flattens it; every put or delete rewrites it atomically.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use casper_core::{BackendError, Format, PairSet, Store, flatten, unflatten};

use crate::error::{Error, Result};
use crate::io::write_atomic;

/// Key-value store kept in a YAML or JSON file
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
    format: Format,
}

impl FileStore {
    /// Open a store at `path`, choosing the format from the extension
    /// (YAML unless the file ends in `.json`).
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let format = path
            .extension()
            .and_then(|e| e.to_str())
            .and_then(Format::from_extension)
            .unwrap_or_default();
        Self { path, format }
    }

    pub fn with_format(path: impl Into<PathBuf>, format: Format) -> Self {
        Self {
            path: path.into(),
            format,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn format(&self) -> Format {
        self.format
    }

    /// Read and flatten the whole file. A missing file is an error.
    pub fn load(&self) -> Result<PairSet> {
        let content = fs::read_to_string(&self.path).map_err(|e| Error::read(&self.path, e))?;
        let doc = self.format.parse(&content)?;
        Ok(flatten(&doc)?)
    }

    /// Replace the file with the document for `pairs`.
    pub fn save(&self, pairs: &PairSet) -> Result<()> {
        let mut content = self.format.serialize(&unflatten(pairs)?)?;
        if !content.ends_with('\n') {
            content.push('\n');
        }
        write_atomic(&self.path, content.as_bytes())?;
        tracing::debug!(path = %self.path.display(), pairs = pairs.len(), "Saved file store");
        Ok(())
    }

    fn load_or_empty(&self) -> Result<PairSet> {
        match self.load() {
            Err(Error::Read { source, .. }) if source.kind() == io::ErrorKind::NotFound => {
                Ok(PairSet::new())
            }
            other => other,
        }
    }
}

impl Store for FileStore {
    fn list(&self, prefix: &str) -> std::result::Result<PairSet, BackendError> {
        Ok(self.load()?.with_prefix(prefix))
    }

    fn put(&mut self, key: &str, value: &str) -> std::result::Result<(), BackendError> {
        let mut pairs = self.load_or_empty()?;
        // a new leaf replaces whatever subtree or parent leaf was there
        pairs.clear_path(key);
        pairs.insert(key, value);
        self.save(&pairs)?;
        Ok(())
    }

    fn delete(&mut self, key: &str) -> std::result::Result<(), BackendError> {
        let mut pairs = self.load_or_empty()?;
        if pairs.remove(key).is_some() {
            self.save(&pairs)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn format_follows_extension() {
        assert_eq!(FileStore::new("out.json").format(), Format::Json);
        assert_eq!(FileStore::new("out.yml").format(), Format::Yaml);
        assert_eq!(FileStore::new("out.txt").format(), Format::Yaml);
    }

    #[test]
    fn list_of_missing_file_fails_with_path() {
        let store = FileStore::new("missing-store.yaml");
        let err = store.list("").unwrap_err();
        assert!(err.to_string().contains("reading file missing-store.yaml failed"));
    }

    #[test]
    fn put_creates_missing_file() {
        let dir = TempDir::new().unwrap();
        let mut store = FileStore::new(dir.path().join("store.yaml"));

        store.put("app/name", "web").unwrap();

        assert_eq!(
            fs::read_to_string(store.path()).unwrap(),
            "app:\n  name: web\n"
        );
    }

    #[test]
    fn delete_of_absent_key_leaves_file_alone() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("store.yaml");
        fs::write(&path, "# hand written\nkey: value\n").unwrap();

        let mut store = FileStore::new(&path);
        store.delete("other").unwrap();

        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "# hand written\nkey: value\n"
        );
    }
}
