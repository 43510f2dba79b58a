//! Source precedence: the last descriptor wins for a shared name.

use casper_source::{Placeholders, SourceSpec, TemplateEngine, resolve};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

fn specs(dir: &std::path::Path, descriptors: &[&str]) -> Vec<SourceSpec> {
    descriptors
        .iter()
        .map(|d| SourceSpec::parse(d).unwrap().relative_to(dir))
        .collect()
}

#[test]
fn command_line_value_overrides_file_value() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("base.yaml"), "env: staging\nregion: eu\n").unwrap();

    let values = resolve(&specs(dir.path(), &["file://base.yaml", "env=production"])).unwrap();
    let rendered = Placeholders
        .render("env: {{ .env }}\nregion: {{ .region }}\n", &values)
        .unwrap();

    assert_eq!(rendered, "env: production\nregion: eu\n");
}

#[test]
fn file_value_overrides_earlier_inline_value() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("override.json"), r#"{"env": "qa"}"#).unwrap();

    let values = resolve(&specs(dir.path(), &["env=dev", "file://override.json"])).unwrap();
    assert_eq!(values.get("env").and_then(|v| v.as_str()), Some("qa"));
}

#[test]
fn invalid_descriptor_stops_resolution() {
    let err = SourceSpec::parse("ftp://host/values.yaml").unwrap_err();
    assert_eq!(err.to_string(), "invalid source format ftp");
}
