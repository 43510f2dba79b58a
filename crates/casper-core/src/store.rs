//! Remote store contract
//!
//! The engine needs only three operations from a key-value backend. Any
//! service that can list by prefix, put a key, and delete a key can be
//! reconciled.

use crate::error::BackendError;
use crate::pair::PairSet;

/// Minimal key-value store capability
pub trait Store {
    /// All pairs whose key starts with `prefix`.
    fn list(&self, prefix: &str) -> Result<PairSet, BackendError>;

    /// Create or overwrite `key`.
    fn put(&mut self, key: &str, value: &str) -> Result<(), BackendError>;

    /// Delete `key`. Deleting a missing key is not an error.
    fn delete(&mut self, key: &str) -> Result<(), BackendError>;
}

impl<S: Store + ?Sized> Store for &mut S {
    fn list(&self, prefix: &str) -> Result<PairSet, BackendError> {
        (**self).list(prefix)
    }

    fn put(&mut self, key: &str, value: &str) -> Result<(), BackendError> {
        (**self).put(key, value)
    }

    fn delete(&mut self, key: &str) -> Result<(), BackendError> {
        (**self).delete(key)
    }
}

impl<S: Store + ?Sized> Store for Box<S> {
    fn list(&self, prefix: &str) -> Result<PairSet, BackendError> {
        (**self).list(prefix)
    }

    fn put(&mut self, key: &str, value: &str) -> Result<(), BackendError> {
        (**self).put(key, value)
    }

    fn delete(&mut self, key: &str) -> Result<(), BackendError> {
        (**self).delete(key)
    }
}

/// Store held entirely in memory
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    pairs: PairSet,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_pairs(pairs: PairSet) -> Self {
        Self { pairs }
    }

    pub fn pairs(&self) -> &PairSet {
        &self.pairs
    }
}

impl Store for MemoryStore {
    fn list(&self, prefix: &str) -> Result<PairSet, BackendError> {
        Ok(self.pairs.with_prefix(prefix))
    }

    fn put(&mut self, key: &str, value: &str) -> Result<(), BackendError> {
        self.pairs.insert(key, value);
        Ok(())
    }

    fn delete(&mut self, key: &str) -> Result<(), BackendError> {
        self.pairs.remove(key);
        Ok(())
    }
}
