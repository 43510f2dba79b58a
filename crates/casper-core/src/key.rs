//! Flat key paths
//!
//! Keys are canonical strings of path segments joined by [`SEPARATOR`].
//! Sequence indices appear as decimal segments (`servers/0/host`). A key
//! ending in the separator is a *folder key*: it carries no data and is how
//! a null leaf is stored.

/// Segment separator for flat keys
pub const SEPARATOR: char = '/';

/// Append `segment` to `parent`.
///
/// ```
/// use casper_core::key::join;
///
/// assert_eq!(join("", "app"), "app");
/// assert_eq!(join("app", "db"), "app/db");
/// ```
pub fn join(parent: &str, segment: &str) -> String {
    if parent.is_empty() {
        segment.to_string()
    } else {
        format!("{parent}{SEPARATOR}{segment}")
    }
}

/// Turn a key into the folder key marking a null value at that path.
pub fn folder(key: &str) -> String {
    format!("{key}{SEPARATOR}")
}

/// Is this a folder key?
pub fn is_folder(key: &str) -> bool {
    key.ends_with(SEPARATOR)
}

/// Split a key into its segments, dropping the trailing folder marker.
///
/// ```
/// use casper_core::key::segments;
///
/// assert_eq!(segments("a/b/0"), vec!["a", "b", "0"]);
/// assert_eq!(segments("a/b/"), vec!["a", "b"]);
/// ```
pub fn segments(key: &str) -> Vec<&str> {
    key.strip_suffix(SEPARATOR)
        .unwrap_or(key)
        .split(SEPARATOR)
        .collect()
}

/// First segment of a key.
pub fn root(key: &str) -> &str {
    key.split(SEPARATOR).next().unwrap_or(key)
}

/// Proper ancestors of a key, nearest last.
///
/// ```
/// use casper_core::key::ancestors;
///
/// assert_eq!(ancestors("a/b/c").collect::<Vec<_>>(), vec!["a", "a/b"]);
/// assert_eq!(ancestors("a/b/").collect::<Vec<_>>(), vec!["a"]);
/// assert_eq!(ancestors("a").count(), 0);
/// ```
pub fn ancestors(key: &str) -> impl Iterator<Item = &str> {
    let trimmed = key.strip_suffix(SEPARATOR).unwrap_or(key);
    trimmed
        .match_indices(SEPARATOR)
        .map(move |(i, _)| &trimmed[..i])
        .filter(|a| !a.is_empty())
}

/// Segment-wise prefix test: is `key` equal to `prefix` or beneath it?
///
/// `a/b` contains `a/b/c` and `a/b/` but not `a/bc`.
///
/// ```
/// use casper_core::key::is_within;
///
/// assert!(is_within("a/b", "a/b"));
/// assert!(is_within("a/b/c", "a/b"));
/// assert!(!is_within("a/bc", "a/b"));
/// ```
pub fn is_within(key: &str, prefix: &str) -> bool {
    match key.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || is_folder(prefix) || rest.starts_with(SEPARATOR),
        None => false,
    }
}
