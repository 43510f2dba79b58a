//! Ignore-marker filtering
//!
//! A desired pair whose value equals the ignore marker is a directive: the
//! subtree at that key is owned by someone else. Every change at or beneath
//! the key is dropped, so the subtree is never created, updated, or removed.
//! The filter inspects computed changes and therefore runs after the diff.

use crate::diff::ChangeSet;
use crate::key;
use crate::pair::PairSet;

/// Marker value used when none is configured
pub const DEFAULT_IGNORE_MARKER: &str = "_ignore";

/// Drop changes at or beneath any key that `desired` marks with `marker`.
///
/// Prefix matching is segment-wise: `a/b` covers `a/b/c` but not `a/bc`.
/// An empty marker disables filtering.
///
/// ```
/// use casper_core::{ChangeSet, PairSet, filter_ignored};
///
/// let remote: PairSet = [("a/b/c", "x")].into_iter().collect();
/// let desired: PairSet = [("a/b", "_ignore")].into_iter().collect();
///
/// let changes = ChangeSet::compute(&remote, &desired);
/// assert_eq!(changes.len(), 2);
/// assert!(filter_ignored(changes, &desired, "_ignore").is_empty());
/// ```
pub fn filter_ignored(mut changes: ChangeSet, desired: &PairSet, marker: &str) -> ChangeSet {
    if marker.is_empty() {
        return changes;
    }

    let ignored: Vec<&str> = desired.keys_with_value(marker).collect();
    if ignored.is_empty() {
        return changes;
    }

    let before = changes.len();
    changes.retain(|c| !ignored.iter().any(|prefix| key::is_within(c.key(), prefix)));

    let dropped = before - changes.len();
    if dropped > 0 {
        tracing::debug!(
            prefixes = ?ignored,
            dropped,
            "Dropped changes under ignored keys"
        );
    }
    changes
}
