//! Document formats for decoding rendered templates and encoding output

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_yaml::Value;

use crate::error::{Error, Result};

/// Supported document formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    #[default]
    Yaml,
    /// Indented JSON
    Json,
    /// Compact JSON
    JsonRaw,
}

impl Format {
    /// Detect format from file extension
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "yaml" | "yml" => Some(Self::Yaml),
            "json" => Some(Self::Json),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Yaml => "yaml",
            Self::Json => "json",
            Self::JsonRaw => "jsonraw",
        }
    }

    /// Decode a document. Both JSON flavours parse the same way.
    pub fn parse(&self, content: &str) -> Result<Value> {
        match self {
            Self::Yaml => {
                serde_yaml::from_str(content).map_err(|e| Error::parse("YAML", e.to_string()))
            }
            Self::Json | Self::JsonRaw => {
                serde_json::from_str(content).map_err(|e| Error::parse("JSON", e.to_string()))
            }
        }
    }

    /// Encode a document.
    pub fn serialize(&self, value: &Value) -> Result<String> {
        match self {
            Self::Yaml => serde_yaml::to_string(value).map_err(|e| Error::render(e.to_string())),
            Self::Json => {
                serde_json::to_string_pretty(value).map_err(|e| Error::render(e.to_string()))
            }
            Self::JsonRaw => serde_json::to_string(value).map_err(|e| Error::render(e.to_string())),
        }
    }
}

impl FromStr for Format {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "yaml" | "yml" => Ok(Self::Yaml),
            "json" => Ok(Self::Json),
            "jsonraw" => Ok(Self::JsonRaw),
            other => Err(Error::UnknownFormat(other.to_string())),
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("yaml", Format::Yaml)]
    #[case("YML", Format::Yaml)]
    #[case("json", Format::Json)]
    #[case("jsonraw", Format::JsonRaw)]
    fn parses_format_names(#[case] name: &str, #[case] expected: Format) {
        assert_eq!(name.parse::<Format>().unwrap(), expected);
    }

    #[test]
    fn rejects_unknown_format() {
        let err = "xml".parse::<Format>().unwrap_err();
        assert!(matches!(err, Error::UnknownFormat(f) if f == "xml"));
    }

    #[test]
    fn json_parses_into_yaml_value() {
        let value = Format::Json.parse(r#"{"a": {"b": [1, true]}}"#).unwrap();
        assert_eq!(value["a"]["b"][0], Value::from(1));
        assert_eq!(value["a"]["b"][1], Value::Bool(true));
    }

    #[test]
    fn compact_json_has_no_newlines() {
        let value = Format::Yaml.parse("a:\n  b: c\n").unwrap();
        assert_eq!(Format::JsonRaw.serialize(&value).unwrap(), r#"{"a":{"b":"c"}}"#);
        assert!(Format::Json.serialize(&value).unwrap().contains('\n'));
    }

    #[test]
    fn invalid_yaml_is_a_parse_error() {
        let err = Format::Yaml.parse("a: [unclosed").unwrap_err();
        assert!(matches!(err, Error::Parse { format, .. } if format == "YAML"));
    }
}
