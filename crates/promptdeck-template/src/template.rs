//! Template model.

use std::collections::BTreeMap;

use promptdeck_common_core::TemplateId;
use serde::{Deserialize, Serialize};

use crate::parser;

/// One piece of a template's structure.
///
/// Serialized untagged: a literal is a bare string, a placeholder is
/// `{ "key": ... }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Segment {
    Literal(String),
    Placeholder { key: String },
}

impl Segment {
    pub fn literal(text: impl Into<String>) -> Self {
        Self::Literal(text.into())
    }

    pub fn placeholder(key: impl Into<String>) -> Self {
        Self::Placeholder { key: key.into() }
    }

    /// The placeholder key, if this segment is one.
    pub fn key(&self) -> Option<&str> {
        match self {
            Self::Placeholder { key } => Some(key),
            Self::Literal(_) => None,
        }
    }
}

/// Output format of a rendered template.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Format {
    /// Plain concatenated text.
    #[default]
    #[serde(rename = "string")]
    Text,
    /// A JSON object with `prompt` and `negative_prompt`.
    #[serde(rename = "json")]
    Json,
}

impl Format {
    pub fn as_str(&self) -> &'static str {
        match self {
            Format::Text => "string",
            Format::Json => "json",
        }
    }
}

/// A named template with literal segments and placeholders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Template {
    pub id: TemplateId,
    pub name: String,
    pub structure: Vec<Segment>,
    /// Default value for every placeholder key in `structure`.
    pub defaults: BTreeMap<String, String>,
    #[serde(default)]
    pub format: Format,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl Template {
    /// Build a template, adding an empty default for any key that lacks one.
    pub fn new(
        id: TemplateId,
        name: impl Into<String>,
        structure: Vec<Segment>,
        mut defaults: BTreeMap<String, String>,
    ) -> Self {
        for key in structure.iter().filter_map(Segment::key) {
            defaults.entry(key.to_string()).or_default();
        }

        Self {
            id,
            name: name.into(),
            structure,
            defaults,
            format: Format::Text,
            image_url: None,
        }
    }

    /// Parse bracketed raw text into a template with empty defaults.
    pub fn from_text(id: TemplateId, name: impl Into<String>, raw: &str) -> Self {
        let parsed = parser::parse(raw);
        Self::new(id, name, parsed.structure, BTreeMap::new())
    }

    pub fn with_format(mut self, format: Format) -> Self {
        self.format = format;
        self
    }

    pub fn with_image_url(mut self, url: impl Into<String>) -> Self {
        self.image_url = Some(url.into());
        self
    }

    /// Set the default for a key that appears in the structure.
    ///
    /// Unknown keys are ignored so the defaults map never gains orphans.
    pub fn with_default(mut self, key: &str, value: impl Into<String>) -> Self {
        if let Some(slot) = self.defaults.get_mut(key) {
            *slot = value.into();
        }
        self
    }

    /// Distinct placeholder keys in first-occurrence order.
    pub fn placeholder_keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = Vec::new();
        for key in self.structure.iter().filter_map(Segment::key) {
            if !keys.contains(&key) {
                keys.push(key);
            }
        }
        keys
    }

    /// Default for `key`, or `""` when absent.
    pub fn default_for(&self, key: &str) -> &str {
        self.defaults.get(key).map(String::as_str).unwrap_or("")
    }

    /// The structure as bracketed raw text.
    pub fn raw_text(&self) -> String {
        parser::to_raw(&self.structure)
    }
}
