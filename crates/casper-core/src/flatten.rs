//! Nested document to flat pairs
//!
//! Mapping entries contribute their key as a segment, sequence elements
//! their decimal index. Scalars end the walk and are stored in canonical
//! string form:
//!
//! - strings verbatim
//! - booleans as `true` / `false`
//! - integers in decimal, floats in shortest form (`1.5`, `2`, `.inf`)
//! - null as a folder key (`path/`) with an empty value, so it never
//!   collides with an empty string stored at `path`
//!
//! Empty mappings and sequences produce no pairs.

use serde_yaml::Value;

use crate::error::{Error, Result};
use crate::key;
use crate::pair::PairSet;

/// Maximum nesting depth accepted by [`flatten`]
const MAX_DEPTH: usize = 128;

/// Flatten a document into a sorted set of pairs.
///
/// A null or empty document yields an empty set. Tagged values, non-scalar
/// mapping keys, and keys that are empty or contain the separator fail with
/// [`Error::UnsupportedValue`].
///
/// ```
/// use casper_core::flatten::flatten;
///
/// let doc: serde_yaml::Value = serde_yaml::from_str("db:\n  hosts: [a, b]\n").unwrap();
/// let pairs = flatten(&doc).unwrap();
/// assert_eq!(pairs.get("db/hosts/1"), Some("b"));
/// ```
pub fn flatten(doc: &Value) -> Result<PairSet> {
    let mut pairs = PairSet::new();
    match doc {
        Value::Null => {}
        Value::Mapping(_) | Value::Sequence(_) => walk(doc, String::new(), &mut pairs, 0)?,
        Value::Tagged(tagged) => {
            return Err(Error::unsupported("", format!("tagged value {}", tagged.tag)));
        }
        _ => return Err(Error::unsupported("", "scalar document root")),
    }
    Ok(pairs)
}

fn walk(value: &Value, path: String, pairs: &mut PairSet, depth: usize) -> Result<()> {
    if depth > MAX_DEPTH {
        return Err(Error::unsupported(
            path,
            format!("nesting deeper than {MAX_DEPTH} levels"),
        ));
    }

    match value {
        Value::Mapping(map) => {
            for (k, v) in map {
                let segment = mapping_key(k, &path)?;
                walk(v, key::join(&path, &segment), pairs, depth + 1)?;
            }
        }
        Value::Sequence(items) => {
            for (i, v) in items.iter().enumerate() {
                walk(v, key::join(&path, &i.to_string()), pairs, depth + 1)?;
            }
        }
        Value::Null => {
            pairs.insert(key::folder(&path), "");
        }
        Value::Tagged(tagged) => {
            return Err(Error::unsupported(path, format!("tagged value {}", tagged.tag)));
        }
        scalar => {
            if let Some(s) = scalar_to_string(scalar) {
                pairs.insert(path, s);
            }
        }
    }
    Ok(())
}

fn mapping_key(k: &Value, parent: &str) -> Result<String> {
    match k {
        Value::String(_) | Value::Bool(_) | Value::Number(_) => {
            let segment = scalar_to_string(k).unwrap_or_default();
            if segment.is_empty() {
                return Err(Error::unsupported(parent, "empty mapping key"));
            }
            if segment.contains(key::SEPARATOR) {
                return Err(Error::unsupported(
                    key::join(parent, &segment),
                    format!("mapping key contains '{}'", key::SEPARATOR),
                ));
            }
            Ok(segment)
        }
        Value::Null => Err(Error::unsupported(parent, "null mapping key")),
        _ => Err(Error::unsupported(parent, "non-scalar mapping key")),
    }
}

/// Canonical string form of a scalar; `None` for null and compound values.
///
/// ```
/// use casper_core::flatten::scalar_to_string;
/// use serde_yaml::Value;
///
/// assert_eq!(scalar_to_string(&Value::from(2.50)), Some("2.5".to_string()));
/// assert_eq!(scalar_to_string(&Value::Bool(false)), Some("false".to_string()));
/// assert_eq!(scalar_to_string(&Value::Null), None);
/// ```
pub fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Some(i.to_string())
            } else if let Some(u) = n.as_u64() {
                Some(u.to_string())
            } else {
                match n.as_f64() {
                    Some(f) if f.is_finite() => Some(f.to_string()),
                    _ => Some(n.to_string()),
                }
            }
        }
        _ => None,
    }
}
