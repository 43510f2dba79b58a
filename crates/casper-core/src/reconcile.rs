//! The fetch / diff / push pipeline
//!
//! One invocation lists the store once, flattens both sides, diffs, filters
//! ignored subtrees, and then either renders or applies the result.

use serde_yaml::Value;

use crate::apply::apply;
use crate::diff::ChangeSet;
use crate::error::{Error, Result, StoreOp};
use crate::flatten::flatten;
use crate::format::Format;
use crate::ignore::{DEFAULT_IGNORE_MARKER, filter_ignored};
use crate::pair::PairSet;
use crate::render::render;
use crate::store::Store;

/// Drives reconciliation of a desired document against a store
#[derive(Debug, Clone)]
pub struct Reconciler {
    ignore_marker: String,
}

impl Default for Reconciler {
    fn default() -> Self {
        Self::new(DEFAULT_IGNORE_MARKER)
    }
}

impl Reconciler {
    pub fn new(ignore_marker: impl Into<String>) -> Self {
        Self {
            ignore_marker: ignore_marker.into(),
        }
    }

    pub fn ignore_marker(&self) -> &str {
        &self.ignore_marker
    }

    /// Snapshot everything in the store.
    pub fn snapshot<S: Store + ?Sized>(&self, store: &S) -> Result<PairSet> {
        let pairs = store
            .list("")
            .map_err(|e| Error::store(StoreOp::List, "", e))?;
        tracing::debug!(pairs = pairs.len(), "Listed remote store");
        Ok(pairs)
    }

    /// Render the whole store as a document.
    pub fn fetch<S: Store + ?Sized>(&self, store: &S, format: Format) -> Result<String> {
        render(&self.snapshot(store)?, format)
    }

    /// Changes needed to make the store match `desired`, ignored subtrees
    /// removed. With `key`, only the change for that exact key is kept.
    pub fn changes<S: Store + ?Sized>(
        &self,
        store: &S,
        desired: &Value,
        key: Option<&str>,
    ) -> Result<ChangeSet> {
        let remote = self.snapshot(store)?;
        let desired = flatten(desired)?;
        Ok(self.changes_between(&remote, &desired, key))
    }

    /// Same as [`Reconciler::changes`] over already-flattened sides.
    pub fn changes_between(
        &self,
        remote: &PairSet,
        desired: &PairSet,
        key: Option<&str>,
    ) -> ChangeSet {
        let changes = filter_ignored(
            ChangeSet::compute(remote, desired),
            desired,
            &self.ignore_marker,
        );
        match key {
            Some(k) => changes.for_key(k),
            None => changes,
        }
    }

    /// Apply previously computed changes.
    pub fn push<S: Store + ?Sized>(&self, changes: &ChangeSet, store: &mut S) -> Result<()> {
        apply(changes, store)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn yaml(s: &str) -> Value {
        serde_yaml::from_str(s).unwrap()
    }

    #[test]
    fn push_then_diff_is_empty() {
        let mut store = MemoryStore::with_pairs(
            [("key1", "val1"), ("key2", "val2"), ("stale", "x")]
                .into_iter()
                .collect(),
        );
        let desired = yaml("key1: val1a\nkey2: val2\nnested:\n  a: b\n");
        let reconciler = Reconciler::default();

        let changes = reconciler.changes(&store, &desired, None).unwrap();
        assert_eq!(changes.len(), 3);

        reconciler.push(&changes, &mut store).unwrap();
        assert!(reconciler.changes(&store, &desired, None).unwrap().is_empty());
    }

    #[test]
    fn ignored_subtree_survives_push() {
        let mut store = MemoryStore::with_pairs(
            [("external/token", "secret"), ("mine", "old")]
                .into_iter()
                .collect(),
        );
        let desired = yaml("external: _ignore\nmine: new\n");
        let reconciler = Reconciler::default();

        let changes = reconciler.changes(&store, &desired, None).unwrap();
        reconciler.push(&changes, &mut store).unwrap();

        assert_eq!(store.pairs().get("external/token"), Some("secret"));
        assert_eq!(store.pairs().get("external"), None);
        assert_eq!(store.pairs().get("mine"), Some("new"));
    }

    #[test]
    fn scoped_to_key() {
        let store = MemoryStore::with_pairs([("a", "1"), ("b", "2")].into_iter().collect());
        let desired = yaml("a: 10\nb: 20\n");

        let changes = Reconciler::default()
            .changes(&store, &desired, Some("a"))
            .unwrap();
        assert_eq!(changes.len(), 1);
    }

    #[test]
    fn fetch_renders_store() {
        let store = MemoryStore::with_pairs([("app/name", "web")].into_iter().collect());
        let out = Reconciler::default().fetch(&store, Format::JsonRaw).unwrap();
        assert_eq!(out, r#"{"app":{"name":"web"}}"#);
    }
}
