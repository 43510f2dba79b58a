//! Merged template values

use std::collections::BTreeMap;

use serde_yaml::Value;

/// Top-level name to value mapping handed to the template
///
/// Values are scalars, lists, or (for file sources) nested documents.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Values {
    entries: BTreeMap<String, Value>,
}

impl Values {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: Value) -> Option<Value> {
        self.entries.insert(name.into(), value)
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entries.get(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Overlay `other` on top of `self`; `other` wins for shared names.
    pub fn merge(&mut self, other: Values) {
        self.entries.extend(other.entries);
    }

    /// Look up a dotted path: `db.host` reads `host` inside the `db` value.
    ///
    /// ```
    /// use casper_source::Values;
    ///
    /// let mut values = Values::new();
    /// values.insert("db", serde_yaml::from_str("host: localhost").unwrap());
    /// assert_eq!(values.lookup("db.host").and_then(|v| v.as_str()), Some("localhost"));
    /// assert!(values.lookup("db.port").is_none());
    /// ```
    pub fn lookup(&self, path: &str) -> Option<&Value> {
        let mut parts = path.split('.');
        let mut current = self.entries.get(parts.next()?)?;
        for part in parts {
            current = match current {
                Value::Mapping(map) => map.get(part)?,
                Value::Sequence(items) => items.get(part.parse::<usize>().ok()?)?,
                _ => return None,
            };
        }
        Some(current)
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for Values {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}
