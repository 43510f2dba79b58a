//! Flat pairs back to a nested document
//!
//! Inverse of [`crate::flatten::flatten`]: pairs are grouped by shared path
//! prefix into mappings. A group whose child segments are exactly `0..n`
//! becomes a sequence. Leaves come back as strings; folder keys come back as
//! null unless another key gives the folder children.

use std::collections::BTreeMap;

use serde_yaml::{Mapping, Value};

use crate::error::{Error, Result};
use crate::key;
use crate::pair::PairSet;

enum Node {
    Leaf(String),
    Folder,
    Branch(BTreeMap<String, Node>),
}

/// Rebuild a nested document from flat pairs.
///
/// An empty set yields an empty mapping. A key that holds a value and also
/// has children fails with [`Error::KeyConflict`].
///
/// ```
/// use casper_core::{flatten::flatten, unflatten::unflatten};
///
/// let doc: serde_yaml::Value = serde_yaml::from_str("a:\n  b: [x, y]\n").unwrap();
/// assert_eq!(unflatten(&flatten(&doc).unwrap()).unwrap(), doc);
/// ```
pub fn unflatten(pairs: &PairSet) -> Result<Value> {
    let mut root = BTreeMap::new();
    for (k, v) in pairs {
        insert(&mut root, k, v, false)?;
    }
    Ok(into_value(root))
}

/// Like [`unflatten`], but never fails.
///
/// A store may hold a value at a key that is also a parent. Keys beneath
/// such a value are kept flat, named by their remaining path, next to it.
///
/// ```
/// use casper_core::{PairSet, unflatten::unflatten_lenient};
///
/// let pairs: PairSet = [("a", "1"), ("a/b", "2")].into_iter().collect();
/// let doc = unflatten_lenient(&pairs);
/// assert_eq!(doc["a"], "1");
/// assert_eq!(doc["a/b"], "2");
/// ```
pub fn unflatten_lenient(pairs: &PairSet) -> Value {
    let mut root = BTreeMap::new();
    for (k, v) in pairs {
        // lenient insertion has no failure path
        let _ = insert(&mut root, k, v, true);
    }
    into_value(root)
}

fn insert(
    root: &mut BTreeMap<String, Node>,
    full_key: &str,
    value: &str,
    lenient: bool,
) -> Result<()> {
    let folder = key::is_folder(full_key);
    let segments = key::segments(full_key);
    let (last, parents) = match segments.split_last() {
        Some(split) => split,
        None => return Ok(()),
    };
    let leaf = || {
        if folder {
            Node::Folder
        } else {
            Node::Leaf(value.to_string())
        }
    };

    let mut level = root;
    // byte offset of the current segment within `full_key`
    let mut offset = 0;
    for segment in parents {
        if matches!(level.get(*segment), Some(Node::Leaf(_))) {
            if !lenient {
                return Err(Error::KeyConflict {
                    key: full_key[..offset + segment.len()].to_string(),
                });
            }
            level.insert(full_key[offset..].to_string(), leaf());
            return Ok(());
        }

        let node = level
            .entry(segment.to_string())
            .or_insert_with(|| Node::Branch(BTreeMap::new()));
        if matches!(node, Node::Folder) {
            *node = Node::Branch(BTreeMap::new());
        }
        level = match node {
            Node::Branch(children) => children,
            _ => {
                return Err(Error::KeyConflict {
                    key: full_key[..offset + segment.len()].to_string(),
                });
            }
        };
        offset += segment.len() + 1;
    }

    let name = match (level.get(*last), folder) {
        (None, _) | (Some(Node::Folder), false) => last.to_string(),
        // a folder key alongside children or a duplicate folder adds nothing
        (Some(Node::Branch(_)) | Some(Node::Folder), true) => return Ok(()),
        _ if lenient => full_key[offset..].to_string(),
        _ => {
            return Err(Error::KeyConflict {
                key: full_key.trim_end_matches(key::SEPARATOR).to_string(),
            });
        }
    };
    level.insert(name, leaf());
    Ok(())
}

fn into_value(children: BTreeMap<String, Node>) -> Value {
    if is_sequence(&children) {
        let mut items: Vec<(usize, Node)> = children
            .into_iter()
            .filter_map(|(k, n)| k.parse().ok().map(|i| (i, n)))
            .collect();
        items.sort_by_key(|(i, _)| *i);
        return Value::Sequence(items.into_iter().map(|(_, n)| node_value(n)).collect());
    }

    let mut map = Mapping::new();
    for (k, n) in children {
        map.insert(Value::String(k), node_value(n));
    }
    Value::Mapping(map)
}

fn node_value(node: Node) -> Value {
    match node {
        Node::Leaf(s) => Value::String(s),
        Node::Folder => Value::Null,
        Node::Branch(children) => into_value(children),
    }
}

fn is_sequence(children: &BTreeMap<String, Node>) -> bool {
    if children.is_empty() {
        return false;
    }
    let mut indices = Vec::with_capacity(children.len());
    for k in children.keys() {
        match k.parse::<usize>() {
            Ok(i) if i.to_string() == *k => indices.push(i),
            _ => return false,
        }
    }
    indices.sort_unstable();
    indices.iter().enumerate().all(|(pos, i)| pos == *i)
}
