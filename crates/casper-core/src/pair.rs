//! Flat key/value pairs

use std::collections::BTreeMap;
use std::collections::btree_map;
use std::ops::Bound;

use crate::key;

/// A single leaf extracted from a nested document
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Pair {
    pub key: String,
    pub value: String,
}

impl Pair {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Pairs keyed uniquely and iterated in lexicographic key order
///
/// Ordering is plain byte order on the full key, so a parent key always
/// sorts before its descendants.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PairSet {
    pairs: BTreeMap<String, String>,
}

impl PairSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a pair, returning the previous value for the key.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.pairs.insert(key.into(), value.into())
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.pairs.remove(key)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.pairs.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Iterate `(key, value)` in key order.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            inner: self.pairs.iter(),
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.pairs.keys().map(String::as_str)
    }

    /// Pairs whose key starts with `prefix` (plain string prefix, as a
    /// key-value store lists). An empty prefix selects everything.
    pub fn with_prefix(&self, prefix: &str) -> PairSet {
        self.pairs
            .range::<str, _>((Bound::Included(prefix), Bound::Unbounded))
            .take_while(|(k, _)| k.starts_with(prefix))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    /// Keys whose value equals `marker`.
    pub fn keys_with_value<'a>(&'a self, marker: &'a str) -> impl Iterator<Item = &'a str> {
        self.pairs
            .iter()
            .filter(move |(_, v)| v.as_str() == marker)
            .map(|(k, _)| k.as_str())
    }

    /// Drop the pairs that would stop `key` from holding a value in a
    /// nested document: leaves or nulls at its ancestors, and everything at
    /// or beneath it.
    pub fn clear_path(&mut self, key: &str) {
        for ancestor in key::ancestors(key) {
            self.pairs.remove(ancestor);
            self.pairs.remove(&key::folder(ancestor));
        }
        self.remove_within(key.strip_suffix(key::SEPARATOR).unwrap_or(key));
    }

    /// Drop every pair at or beneath `prefix` (segment-wise).
    pub fn remove_within(&mut self, prefix: &str) {
        self.pairs.retain(|k, _| !key::is_within(k, prefix));
    }
}

/// Iterator over a [`PairSet`]
pub struct Iter<'a> {
    inner: btree_map::Iter<'a, String, String>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a str, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a> IntoIterator for &'a PairSet {
    type Item = (&'a str, &'a str);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl IntoIterator for PairSet {
    type Item = Pair;
    type IntoIter = std::iter::Map<btree_map::IntoIter<String, String>, fn((String, String)) -> Pair>;

    fn into_iter(self) -> Self::IntoIter {
        self.pairs.into_iter().map(into_pair as fn((String, String)) -> Pair)
    }
}

fn into_pair((key, value): (String, String)) -> Pair {
    Pair { key, value }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for PairSet {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            pairs: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl FromIterator<Pair> for PairSet {
    fn from_iter<I: IntoIterator<Item = Pair>>(iter: I) -> Self {
        iter.into_iter().map(|p| (p.key, p.value)).collect()
    }
}

impl Extend<Pair> for PairSet {
    fn extend<I: IntoIterator<Item = Pair>>(&mut self, iter: I) {
        for pair in iter {
            self.pairs.insert(pair.key, pair.value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn iterates_parents_before_descendants() {
        let pairs: PairSet = [("a/b/c", "1"), ("a/bc", "2"), ("a/b", "3"), ("a", "4")]
            .into_iter()
            .collect();

        let keys: Vec<_> = pairs.keys().collect();
        assert_eq!(keys, vec!["a", "a/b", "a/b/c", "a/bc"]);
    }

    #[test]
    fn with_prefix_uses_string_prefix() {
        let pairs: PairSet = [
            ("aaa", "0"),
            ("app/a", "1"),
            ("app/b", "2"),
            ("apple", "3"),
            ("other", "4"),
        ]
            .into_iter()
            .collect();

        let keys: Vec<_> = pairs.with_prefix("app").keys().map(str::to_string).collect();
        assert_eq!(keys, vec!["app/a", "app/b", "apple"]);
        assert_eq!(pairs.with_prefix("").len(), 5);
        assert!(pairs.with_prefix("zzz").is_empty());
    }

    #[test]
    fn remove_within_keeps_siblings() {
        let mut pairs: PairSet = [("a/b", "1"), ("a/b/c", "2"), ("a/bc", "3")]
            .into_iter()
            .collect();

        pairs.remove_within("a/b");
        assert_eq!(pairs.keys().collect::<Vec<_>>(), vec!["a/bc"]);
    }

    #[test]
    fn keys_with_value_finds_markers() {
        let pairs: PairSet = [("a", "_ignore"), ("b", "x"), ("c/d", "_ignore")]
            .into_iter()
            .collect();

        let marked: Vec<_> = pairs.keys_with_value("_ignore").collect();
        assert_eq!(marked, vec!["a", "c/d"]);
    }

    #[test]
    fn clear_path_drops_ancestor_leaves_and_subtree() {
        let mut pairs: PairSet = [
            ("a", "leaf"),
            ("a/b/", ""),
            ("a/b/c", "1"),
            ("a/b/c/d", "2"),
            ("a/bc", "3"),
        ]
        .into_iter()
        .collect();

        pairs.clear_path("a/b/c");
        assert_eq!(pairs.keys().collect::<Vec<_>>(), vec!["a/bc"]);
    }
}
