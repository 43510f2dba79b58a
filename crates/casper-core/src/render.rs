//! Display forms for pair sets and change sets

use std::collections::BTreeMap;

use serde_yaml::{Mapping, Value};
use similar::{ChangeTag, TextDiff};

use crate::diff::{Change, ChangeSet};
use crate::error::{Error, Result};
use crate::format::Format;
use crate::key;
use crate::pair::PairSet;
use crate::unflatten::unflatten_lenient;

/// Message printed for an empty change set
pub const NO_CHANGES: &str = "No changes";

/// Rebuild the nested document for `pairs` and serialize it.
///
/// A key that holds a value and also has children keeps its descendants
/// flat beside it.
pub fn render(pairs: &PairSet, format: Format) -> Result<String> {
    format.serialize(&unflatten_lenient(pairs))
}

/// The "nothing to do" line, optionally scoped to one key.
///
/// ```
/// use casper_core::render::no_changes;
///
/// assert_eq!(no_changes(None), "No changes\n");
/// assert_eq!(no_changes(Some("db/host")), "No changes for key db/host\n");
/// ```
pub fn no_changes(key: Option<&str>) -> String {
    match key {
        Some(k) => format!("{NO_CHANGES} for key {k}\n"),
        None => format!("{NO_CHANGES}\n"),
    }
}

/// Render a change set as `-`/`+` text.
///
/// Plain output is two blocks, each a YAML mapping of full keys to values:
/// the old values with `-` before the block, then the new values with `+`
/// before the block, each followed by a blank line. An empty half is left
/// out.
///
/// Pretty output groups changes by top-level key and renders each group as
/// nested YAML, marking every line `-`, `+`, or ` ` (shared ancestor), with
/// a blank line after each group.
pub fn render_diff(changes: &ChangeSet, pretty: bool) -> Result<String> {
    if changes.is_empty() {
        return Ok(no_changes(None));
    }
    if pretty {
        pretty_diff(changes)
    } else {
        plain_diff(changes)
    }
}

fn plain_diff(changes: &ChangeSet) -> Result<String> {
    let (old, new) = changes.halves();
    let mut out = String::new();
    for (sign, half) in [('-', &old), ('+', &new)] {
        if half.is_empty() {
            continue;
        }
        out.push(sign);
        out.push_str(&flat_yaml(half)?);
        out.push('\n');
    }
    Ok(out)
}

fn pretty_diff(changes: &ChangeSet) -> Result<String> {
    let mut groups: BTreeMap<&str, Vec<&Change>> = BTreeMap::new();
    for change in changes {
        groups.entry(key::root(change.key())).or_default().push(change);
    }

    let mut out = String::new();
    for group in groups.into_values() {
        let subset: ChangeSet = group.into_iter().cloned().collect();
        let (old, new) = subset.halves();
        let old_text = nested_yaml(&old)?;
        let new_text = nested_yaml(&new)?;

        for line in TextDiff::from_lines(&old_text, &new_text).iter_all_changes() {
            let sign = match line.tag() {
                ChangeTag::Delete => '-',
                ChangeTag::Insert => '+',
                ChangeTag::Equal => ' ',
            };
            out.push(sign);
            out.push_str(line.value());
            if line.missing_newline() {
                out.push('\n');
            }
        }
        out.push('\n');
    }
    Ok(out)
}

fn flat_yaml(pairs: &PairSet) -> Result<String> {
    let mut map = Mapping::new();
    for (k, v) in pairs {
        map.insert(Value::from(k), Value::from(v));
    }
    serde_yaml::to_string(&map).map_err(|e| Error::render(e.to_string()))
}

fn nested_yaml(pairs: &PairSet) -> Result<String> {
    if pairs.is_empty() {
        return Ok(String::new());
    }
    Format::Yaml.serialize(&unflatten_lenient(pairs))
}
