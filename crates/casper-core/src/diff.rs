//! Change computation between a remote and a desired pair set

use std::cmp::Ordering;

use serde::Serialize;

use crate::pair::PairSet;

/// A single change to bring the remote store in line with the desired state
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "op", rename_all = "lowercase")]
pub enum Change {
    /// Key present in desired, absent remotely
    Add { key: String, value: String },
    /// Key present on both sides with different values
    Update {
        key: String,
        old: String,
        new: String,
    },
    /// Key present remotely, absent in desired
    Remove { key: String, value: String },
}

impl Change {
    pub fn key(&self) -> &str {
        match self {
            Self::Add { key, .. } | Self::Update { key, .. } | Self::Remove { key, .. } => key,
        }
    }

    /// Value the store holds before the change, if any
    pub fn old_value(&self) -> Option<&str> {
        match self {
            Self::Add { .. } => None,
            Self::Update { old, .. } => Some(old),
            Self::Remove { value, .. } => Some(value),
        }
    }

    /// Value the store holds after the change, if any
    pub fn new_value(&self) -> Option<&str> {
        match self {
            Self::Add { value, .. } => Some(value),
            Self::Update { new, .. } => Some(new),
            Self::Remove { .. } => None,
        }
    }
}

/// Changes in key order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ChangeSet {
    changes: Vec<Change>,
}

impl ChangeSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compute the changes that turn `remote` into `desired`.
    ///
    /// Merge-joins the two key-ordered sets, so the result is in key order
    /// and each key appears at most once.
    ///
    /// ```
    /// use casper_core::{ChangeSet, PairSet};
    ///
    /// let remote: PairSet = [("a", "1"), ("b", "2")].into_iter().collect();
    /// let desired: PairSet = [("b", "3"), ("c", "4")].into_iter().collect();
    ///
    /// let keys: Vec<_> = ChangeSet::compute(&remote, &desired)
    ///     .iter()
    ///     .map(|c| c.key().to_string())
    ///     .collect();
    /// assert_eq!(keys, vec!["a", "b", "c"]);
    /// ```
    pub fn compute(remote: &PairSet, desired: &PairSet) -> Self {
        let mut changes = Vec::new();
        let mut old = remote.iter().peekable();
        let mut new = desired.iter().peekable();

        loop {
            let order = match (old.peek(), new.peek()) {
                (None, None) => break,
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (Some((ok, _)), Some((nk, _))) => ok.cmp(nk),
            };

            match order {
                Ordering::Less => {
                    if let Some((key, value)) = old.next() {
                        changes.push(Change::Remove {
                            key: key.to_string(),
                            value: value.to_string(),
                        });
                    }
                }
                Ordering::Greater => {
                    if let Some((key, value)) = new.next() {
                        changes.push(Change::Add {
                            key: key.to_string(),
                            value: value.to_string(),
                        });
                    }
                }
                Ordering::Equal => {
                    if let (Some((key, old_value)), Some((_, new_value))) = (old.next(), new.next())
                    {
                        if old_value != new_value {
                            changes.push(Change::Update {
                                key: key.to_string(),
                                old: old_value.to_string(),
                                new: new_value.to_string(),
                            });
                        }
                    }
                }
            }
        }

        tracing::debug!(
            remote = remote.len(),
            desired = desired.len(),
            changes = changes.len(),
            "Computed change set"
        );
        Self { changes }
    }

    pub fn len(&self) -> usize {
        self.changes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Change> {
        self.changes.iter()
    }

    /// Keep only changes matching `f`, preserving order.
    pub fn retain(&mut self, f: impl FnMut(&Change) -> bool) {
        self.changes.retain(f);
    }

    /// Only the change for exactly `key`, if any.
    pub fn for_key(mut self, key: &str) -> Self {
        self.changes.retain(|c| c.key() == key);
        self
    }

    /// Split into the remote-side and desired-side halves of every change.
    ///
    /// The old half holds removed values and the old side of updates; the new
    /// half holds added values and the new side of updates.
    pub fn halves(&self) -> (PairSet, PairSet) {
        let mut old = PairSet::new();
        let mut new = PairSet::new();
        for change in &self.changes {
            if let Some(v) = change.old_value() {
                old.insert(change.key(), v);
            }
            if let Some(v) = change.new_value() {
                new.insert(change.key(), v);
            }
        }
        (old, new)
    }
}

impl<'a> IntoIterator for &'a ChangeSet {
    type Item = &'a Change;
    type IntoIter = std::slice::Iter<'a, Change>;

    fn into_iter(self) -> Self::IntoIter {
        self.changes.iter()
    }
}

impl IntoIterator for ChangeSet {
    type Item = Change;
    type IntoIter = std::vec::IntoIter<Change>;

    fn into_iter(self) -> Self::IntoIter {
        self.changes.into_iter()
    }
}

impl FromIterator<Change> for ChangeSet {
    /// Collects and sorts by key so the set stays in key order.
    fn from_iter<I: IntoIterator<Item = Change>>(iter: I) -> Self {
        let mut changes: Vec<Change> = iter.into_iter().collect();
        changes.sort_by(|a, b| a.key().cmp(b.key()));
        Self { changes }
    }
}

/// Compute the changes that turn `remote` into `desired`.
pub fn diff(remote: &PairSet, desired: &PairSet) -> ChangeSet {
    ChangeSet::compute(remote, desired)
}
