//! Source descriptors
//!
//! A descriptor names where template values come from:
//!
//! - `config:?key=value&other=value` (also `config://?...`): inline pairs
//! - `file://values.yaml` (also `file:values.yaml`): a YAML or JSON file,
//!   format taken from the extension
//! - `key=value&other=value`: no scheme, treated as `config`
//!
//! Keys and values in a `config` query are percent-decoded, with `+` read
//! as a space. Repeating a key inside one descriptor produces a list.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use casper_core::Format;

use crate::error::{Error, Result};

pub const CONFIG_SCHEME: &str = "config";
pub const FILE_SCHEME: &str = "file";

/// A parsed source descriptor
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceSpec {
    /// Inline `key=value` pairs, in descriptor order
    Config(Vec<(String, String)>),
    /// Values read from a document on disk
    File { path: PathBuf, format: Format },
}

impl SourceSpec {
    /// Parse a descriptor string.
    ///
    /// ```
    /// use casper_source::SourceSpec;
    ///
    /// let spec = SourceSpec::parse("placeholder1=val1").unwrap();
    /// assert_eq!(
    ///     spec,
    ///     SourceSpec::Config(vec![("placeholder1".into(), "val1".into())])
    /// );
    /// assert!(SourceSpec::parse("key:val").is_err());
    /// ```
    pub fn parse(descriptor: &str) -> Result<Self> {
        match split_scheme(descriptor) {
            Some((scheme, rest)) if scheme.eq_ignore_ascii_case(CONFIG_SCHEME) => {
                let query = strip_authority(rest);
                let query = query.strip_prefix('?').unwrap_or(query);
                parse_query(descriptor, query).map(Self::Config)
            }
            Some((scheme, rest)) if scheme.eq_ignore_ascii_case(FILE_SCHEME) => {
                parse_file(descriptor, strip_authority(rest))
            }
            Some((scheme, _)) => Err(Error::UnknownScheme {
                scheme: scheme.to_string(),
            }),
            None if descriptor.contains('=') => parse_query(descriptor, descriptor).map(Self::Config),
            None => Err(Error::source_format(descriptor, "expected key=value")),
        }
    }

    /// Resolve a relative file path against `base`.
    pub fn relative_to(self, base: &Path) -> Self {
        match self {
            Self::File { path, format } if path.is_relative() => Self::File {
                path: base.join(path),
                format,
            },
            other => other,
        }
    }
}

impl FromStr for SourceSpec {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Split `scheme:rest` when the part before the colon is a URL scheme.
fn split_scheme(descriptor: &str) -> Option<(&str, &str)> {
    let (scheme, rest) = descriptor.split_once(':')?;
    let mut chars = scheme.chars();
    let starts_alpha = chars.next().is_some_and(|c| c.is_ascii_alphabetic());
    let valid = starts_alpha && chars.all(|c| c.is_ascii_alphanumeric() || "+-.".contains(c));
    valid.then_some((scheme, rest))
}

fn strip_authority(rest: &str) -> &str {
    rest.strip_prefix("//").unwrap_or(rest)
}

fn parse_query(descriptor: &str, query: &str) -> Result<Vec<(String, String)>> {
    let mut pairs = Vec::new();
    for part in query.split('&').filter(|p| !p.is_empty()) {
        let not_pair = || Error::source_format(descriptor, format!("'{part}' is not key=value"));
        if !part.contains('=') {
            return Err(not_pair());
        }
        let (key, value) = form_urlencoded::parse(part.as_bytes())
            .next()
            .ok_or_else(not_pair)?;
        if key.is_empty() {
            return Err(Error::source_format(descriptor, "empty key"));
        }
        pairs.push((key.into_owned(), value.into_owned()));
    }
    if pairs.is_empty() {
        return Err(Error::source_format(descriptor, "no values given"));
    }
    Ok(pairs)
}

fn parse_file(descriptor: &str, path: &str) -> Result<SourceSpec> {
    if path.is_empty() {
        return Err(Error::source_format(descriptor, "missing file path"));
    }
    let path = PathBuf::from(path);
    let format = path
        .extension()
        .and_then(|e| e.to_str())
        .and_then(Format::from_extension)
        .ok_or_else(|| Error::source_format(descriptor, "file must end in .yaml, .yml or .json"))?;
    Ok(SourceSpec::File { path, format })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn config(items: &[(&str, &str)]) -> SourceSpec {
        SourceSpec::Config(
            items
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }

    #[rstest]
    #[case("a=1", &[("a", "1")])]
    #[case("a=1&b=2", &[("a", "1"), ("b", "2")])]
    #[case("config:?a=1", &[("a", "1")])]
    #[case("config://?a=1&a=2", &[("a", "1"), ("a", "2")])]
    #[case("config:a=x:y", &[("a", "x:y")])]
    #[case("url=http://host", &[("url", "http://host")])]
    #[case("msg=a%20b", &[("msg", "a b")])]
    #[case("config:?msg=hello+world", &[("msg", "hello world")])]
    #[case("a%26b=x%3Dy", &[("a&b", "x=y")])]
    #[case("path=%2Fetc%2Fapp", &[("path", "/etc/app")])]
    fn parses_config_descriptors(#[case] descriptor: &str, #[case] expected: &[(&str, &str)]) {
        assert_eq!(SourceSpec::parse(descriptor).unwrap(), config(expected));
    }

    #[rstest]
    #[case("file://values.yaml", "values.yaml", Format::Yaml)]
    #[case("file:values.yml", "values.yml", Format::Yaml)]
    #[case("file://dir/values.json", "dir/values.json", Format::Json)]
    fn parses_file_descriptors(#[case] descriptor: &str, #[case] path: &str, #[case] format: Format) {
        assert_eq!(
            SourceSpec::parse(descriptor).unwrap(),
            SourceSpec::File {
                path: PathBuf::from(path),
                format
            }
        );
    }

    #[test]
    fn unknown_scheme_is_rejected() {
        let err = SourceSpec::parse("key:val").unwrap_err();
        assert_eq!(err.to_string(), "invalid source format key");
    }

    #[rstest]
    #[case("plainword")]
    #[case("config:?")]
    #[case("=value")]
    #[case("%3D")]
    #[case("file://values.txt")]
    #[case("file://")]
    fn malformed_descriptors_are_rejected(#[case] descriptor: &str) {
        assert!(matches!(
            SourceSpec::parse(descriptor).unwrap_err(),
            Error::SourceFormat { .. }
        ));
    }

    #[test]
    fn relative_file_resolves_against_base() {
        let spec = SourceSpec::parse("file://values.yaml")
            .unwrap()
            .relative_to(Path::new("/project"));
        assert_eq!(
            spec,
            SourceSpec::File {
                path: PathBuf::from("/project/values.yaml"),
                format: Format::Yaml
            }
        );
    }

    #[test]
    fn config_is_unchanged_by_base() {
        let spec = config(&[("a", "1")]);
        assert_eq!(spec.clone().relative_to(Path::new("/x")), spec);
    }
}
