//! Loading and merging sources
//!
//! Sources are loaded in the order given and overlaid one on another, so a
//! later source overrides an earlier one for the same name.

use std::fs;

use casper_core::flatten::scalar_to_string;
use serde_yaml::Value;

use crate::descriptor::SourceSpec;
use crate::error::{Error, Result};
use crate::values::Values;

/// Load the values of a single source.
pub fn load(spec: &SourceSpec) -> Result<Values> {
    match spec {
        SourceSpec::Config(pairs) => Ok(config_values(pairs)),
        SourceSpec::File { path, format } => {
            let content = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
            let doc = format.parse(&content)?;
            match doc {
                Value::Null => Ok(Values::new()),
                Value::Mapping(map) => {
                    let mut values = Values::new();
                    for (k, v) in map {
                        let name = scalar_to_string(&k)
                            .ok_or_else(|| Error::NotAMapping { path: path.clone() })?;
                        values.insert(name, v);
                    }
                    Ok(values)
                }
                _ => Err(Error::NotAMapping { path: path.clone() }),
            }
        }
    }
}

/// Load every source and merge them, later sources winning.
pub fn resolve(specs: &[SourceSpec]) -> Result<Values> {
    let mut merged = Values::new();
    for (i, spec) in specs.iter().enumerate() {
        let values = load(spec)?;
        tracing::debug!(source = i, names = values.len(), "Loaded source");
        merged.merge(values);
    }
    Ok(merged)
}

fn config_values(pairs: &[(String, String)]) -> Values {
    let mut values = Values::new();
    for (k, v) in pairs {
        let value = match values.get(k) {
            None => Value::from(v.as_str()),
            Some(Value::Sequence(items)) => {
                let mut items = items.clone();
                items.push(Value::from(v.as_str()));
                Value::Sequence(items)
            }
            Some(first) => Value::Sequence(vec![first.clone(), Value::from(v.as_str())]),
        };
        values.insert(k.as_str(), value);
    }
    values
}
