//! Replaying a change set against a store
//!
//! Changes are applied one at a time in key order. The first failure stops
//! the run; changes applied before it stay applied. The returned error names
//! the key that failed so the remainder can be reconciled by hand.

use crate::diff::{Change, ChangeSet};
use crate::error::{Error, Result, StoreOp};
use crate::store::Store;

/// Apply every change to `store`, stopping at the first failure.
pub fn apply<S: Store + ?Sized>(changes: &ChangeSet, store: &mut S) -> Result<()> {
    for (applied, change) in changes.iter().enumerate() {
        if let Err(e) = apply_one(change, store) {
            tracing::warn!(
                key = change.key(),
                applied,
                remaining = changes.len() - applied,
                "Stopping after failed change"
            );
            return Err(e);
        }
    }
    tracing::debug!(count = changes.len(), "Applied change set");
    Ok(())
}

fn apply_one<S: Store + ?Sized>(change: &Change, store: &mut S) -> Result<()> {
    match change {
        Change::Add { key, value } | Change::Update { key, new: value, .. } => {
            tracing::info!(key = key.as_str(), "put");
            store
                .put(key, value)
                .map_err(|e| Error::store(StoreOp::Put, key.as_str(), e))
        }
        Change::Remove { key, .. } => {
            tracing::info!(key = key.as_str(), "delete");
            store
                .delete(key)
                .map_err(|e| Error::store(StoreOp::Delete, key.as_str(), e))
        }
    }
}
