//! Template rendering
//!
//! Templates are plain text with `{{ .name }}` placeholders. Dotted names
//! (`{{ .db.host }}`) read into nested values. Scalars are substituted in
//! their canonical string form, lists and mappings as inline JSON.

use std::sync::LazyLock;

use casper_core::flatten::scalar_to_string;
use regex::Regex;
use serde_yaml::Value;

use crate::error::{Error, Result};
use crate::values::Values;

static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{\{-?\s*\.([A-Za-z_][A-Za-z0-9_\-]*(?:\.[A-Za-z0-9_\-]+)*)\s*-?\}\}").unwrap()
});

/// Turns template text plus values into a rendered document
pub trait TemplateEngine {
    fn render(&self, template: &str, values: &Values) -> Result<String>;
}

/// `{{ .name }}` substitution engine
#[derive(Debug, Clone, Copy, Default)]
pub struct Placeholders;

impl TemplateEngine for Placeholders {
    fn render(&self, template: &str, values: &Values) -> Result<String> {
        let mut out = String::with_capacity(template.len());
        let mut last = 0;
        for caps in PLACEHOLDER.captures_iter(template) {
            let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) else {
                continue;
            };
            let value = values.lookup(name.as_str()).ok_or_else(|| Error::MissingValue {
                name: name.as_str().to_string(),
            })?;
            out.push_str(&template[last..whole.start()]);
            out.push_str(&substitution(value));
            last = whole.end();
        }
        out.push_str(&template[last..]);
        Ok(out)
    }
}

fn substitution(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Sequence(_) | Value::Mapping(_) => serde_json::to_string(value).unwrap_or_default(),
        Value::Tagged(tagged) => substitution(&tagged.value),
        scalar => scalar_to_string(scalar).unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn values(yaml: &str) -> Values {
        let doc: serde_yaml::Mapping = serde_yaml::from_str(yaml).unwrap();
        doc.into_iter()
            .map(|(k, v)| (k.as_str().unwrap().to_string(), v))
            .collect()
    }

    #[test]
    fn substitutes_placeholders() {
        let rendered = Placeholders
            .render(
                "key1: {{.placeholder1}}\nkey2: {{ .placeholder2 }}\n",
                &values("placeholder1: val1\nplaceholder2: val2\n"),
            )
            .unwrap();
        assert_eq!(rendered, "key1: val1\nkey2: val2\n");
    }

    #[test]
    fn reads_nested_values() {
        let rendered = Placeholders
            .render("host: {{ .db.host }}", &values("db:\n  host: localhost\n"))
            .unwrap();
        assert_eq!(rendered, "host: localhost");
    }

    #[test]
    fn lists_render_as_inline_json() {
        let rendered = Placeholders
            .render("tags: {{ .tags }}", &values("tags: [a, b]\n"))
            .unwrap();
        assert_eq!(rendered, r#"tags: ["a","b"]"#);
    }

    #[test]
    fn numbers_render_canonically() {
        let rendered = Placeholders
            .render("{{.n}} {{.f}} {{.none}}", &values("n: 7\nf: 2.50\nnone: ~\n"))
            .unwrap();
        assert_eq!(rendered, "7 2.5 ");
    }

    #[test]
    fn missing_value_is_an_error() {
        let err = Placeholders
            .render("{{ .absent }}", &Values::new())
            .unwrap_err();
        assert!(matches!(err, Error::MissingValue { name } if name == "absent"));
    }

    #[test]
    fn text_without_placeholders_is_unchanged() {
        let text = "plain: {{ not a placeholder }}\n";
        assert_eq!(Placeholders.render(text, &Values::new()).unwrap(), text);
    }
}
