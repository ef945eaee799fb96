//! Substitution engine.

use std::collections::BTreeMap;

use promptdeck_common_core::Result;
use serde::Serialize;

use crate::template::{Format, Segment, Template};

/// Fixed negative prompt attached to every JSON-format rendering.
pub const NEGATIVE_PROMPT: &str = "studio photo, overly high quality, flawless digital render, \
cinematic lighting, overly clean or unnatural background";

/// Current value of each placeholder key for one card.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldValues(BTreeMap<String, String>);

impl FieldValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Values seeded from a template's defaults.
    pub fn from_defaults(template: &Template) -> Self {
        Self(template.defaults.clone())
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Set a value, returning the previous one.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.0.insert(key.into(), value.into())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FieldValues {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// The output of [`render`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedPrompt {
    pub format: Format,
    /// The concatenated prompt text.
    pub prompt: String,
    /// What gets copied: the prompt itself, or the pretty-printed JSON document.
    pub output: String,
}

#[derive(Serialize)]
struct JsonPrompt<'a> {
    prompt: &'a str,
    negative_prompt: &'a str,
}

/// Concatenate segments, substituting each placeholder's value.
///
/// A missing value renders as the empty string.
pub fn concat(structure: &[Segment], values: &FieldValues) -> String {
    structure
        .iter()
        .map(|segment| match segment {
            Segment::Literal(text) => text.as_str(),
            Segment::Placeholder { key } => values.get(key).unwrap_or(""),
        })
        .collect()
}

/// Render a template with the given values.
///
/// Pure: the template and values are not modified and no hooks run here.
pub fn render(template: &Template, values: &FieldValues) -> Result<RenderedPrompt> {
    let prompt = concat(&template.structure, values);

    let output = match template.format {
        Format::Text => prompt.clone(),
        Format::Json => serde_json::to_string_pretty(&JsonPrompt {
            prompt: &prompt,
            negative_prompt: NEGATIVE_PROMPT,
        })?,
    };

    tracing::trace!(template = %template.id, format = template.format.as_str(), "rendered prompt");

    Ok(RenderedPrompt {
        format: template.format,
        prompt,
        output,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;
    use promptdeck_common_core::TemplateId;
    use proptest::prelude::*;

    fn template(raw: &str) -> Template {
        Template::from_text(TemplateId::new("t"), "T", raw)
    }

    #[test]
    fn test_render_text_format() {
        let t = template("Hello (name), welcome to (place)!");
        let values: FieldValues = [("name", "Sara"), ("place", "Tehran")].into_iter().collect();

        let rendered = render(&t, &values).unwrap();
        assert_eq!(rendered.format, Format::Text);
        assert_eq!(rendered.output, "Hello Sara, welcome to Tehran!");
        assert_eq!(rendered.prompt, rendered.output);
    }

    #[test]
    fn test_render_missing_value_is_empty() {
        let t = template("a (x) b");
        let rendered = render(&t, &FieldValues::new()).unwrap();
        assert_eq!(rendered.output, "a  b");
    }

    #[test]
    fn test_render_json_format() {
        let t = template("A photo of (subject)").with_format(Format::Json);
        let values: FieldValues = [("subject", "a \"red\" fox")].into_iter().collect();

        let rendered = render(&t, &values).unwrap();
        let doc: serde_json::Value = serde_json::from_str(&rendered.output).unwrap();
        assert_eq!(doc["prompt"], "A photo of a \"red\" fox");
        assert_eq!(doc["negative_prompt"], NEGATIVE_PROMPT);

        // Key order and pretty printing.
        let prompt_at = rendered.output.find("\"prompt\"").unwrap();
        let negative_at = rendered.output.find("\"negative_prompt\"").unwrap();
        assert!(prompt_at < negative_at);
        assert!(rendered.output.contains("\n  \"prompt\""));
    }

    #[test]
    fn test_render_does_not_modify_values() {
        let t = template("(a)(b)");
        let values: FieldValues = [("a", "1")].into_iter().collect();
        let before = values.clone();
        render(&t, &values).unwrap();
        assert_eq!(values, before);
        assert!(values.get("b").is_none());
    }

    #[test]
    fn test_values_from_defaults() {
        let t = template("(a) (b)").with_default("a", "x");
        let values = FieldValues::from_defaults(&t);
        assert_eq!(values.get("a"), Some("x"));
        assert_eq!(values.get("b"), Some(""));
        assert_eq!(values.len(), 2);
    }

    proptest! {
        #[test]
        fn prop_render_with_defaults_replaces_markers(
            raw in "[a-d ()]{0,40}",
            fill in "[A-Z]{0,3}",
        ) {
            let parsed = parse(&raw);
            let values: FieldValues = parsed.keys.iter().map(|k| (k.clone(), format!("{fill}{k}"))).collect();
            let t = Template::new(TemplateId::new("p"), "P", parsed.structure, BTreeMap::new());

            let expected = regex::Regex::new(r"\(([^()]+)\)")
                .unwrap()
                .replace_all(&raw, |caps: &regex::Captures<'_>| format!("{fill}{}", &caps[1]))
                .into_owned();

            prop_assert_eq!(render(&t, &values).unwrap().output, expected);
        }
    }
}
