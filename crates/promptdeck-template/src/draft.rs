//! Editing state for a new template.

use std::collections::BTreeMap;

use promptdeck_common_core::{Error, Result};

use crate::parser::{self, MarkerWarning};
use crate::template::Segment;

/// A validated template ready to be added to the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTemplate {
    pub name: String,
    pub structure: Vec<Segment>,
    pub defaults: BTreeMap<String, String>,
    pub image_url: Option<String>,
}

/// Form state for composing a template.
///
/// Changing the structure text re-parses it immediately so the placeholder
/// list and defaults stay in step with the text.
#[derive(Debug, Clone, Default)]
pub struct TemplateDraft {
    name: String,
    structure_text: String,
    image_url: String,
    keys: Vec<String>,
    defaults: BTreeMap<String, String>,
}

impl TemplateDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn structure_text(&self) -> &str {
        &self.structure_text
    }

    /// Replace the structure text and reconcile defaults with the new keys.
    pub fn set_structure_text(&mut self, text: impl Into<String>) {
        self.structure_text = text.into();
        self.keys = parser::parse(&self.structure_text).keys;
        self.defaults = parser::reconcile_defaults(&self.defaults, &self.keys);
    }

    pub fn set_image_url(&mut self, url: impl Into<String>) {
        self.image_url = url.into();
    }

    /// Placeholder keys in first-occurrence order.
    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    pub fn defaults(&self) -> &BTreeMap<String, String> {
        &self.defaults
    }

    /// Set the default for a current key. Returns false for unknown keys.
    pub fn set_default(&mut self, key: &str, value: impl Into<String>) -> bool {
        match self.defaults.get_mut(key) {
            Some(slot) => {
                *slot = value.into();
                true
            }
            None => false,
        }
    }

    /// Marker problems in the current structure text.
    pub fn warnings(&self) -> Vec<MarkerWarning> {
        parser::lint(&self.structure_text)
    }

    /// Validate the draft.
    pub fn build(&self) -> Result<NewTemplate> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(Error::validation("name", "a template name is required"));
        }

        if self.structure_text.trim().is_empty() {
            return Err(Error::validation("structure", "the template text is required"));
        }

        let image_url = Some(self.image_url.trim())
            .filter(|url| !url.is_empty())
            .map(str::to_string);

        Ok(NewTemplate {
            name: name.to_string(),
            structure: parser::parse(&self.structure_text).structure,
            defaults: self.defaults.clone(),
            image_url,
        })
    }

    /// Clear every field.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use promptdeck_test_utils::{assert_err, assert_ok};

    #[test]
    fn test_structure_change_reconciles_defaults() {
        let mut draft = TemplateDraft::new();
        draft.set_structure_text("A (animal) in (place)");
        assert_eq!(draft.keys(), ["animal", "place"]);
        assert!(draft.set_default("animal", "fox"));

        draft.set_structure_text("A (animal) at (time)");
        assert_eq!(draft.defaults().get("animal").map(String::as_str), Some("fox"));
        assert_eq!(draft.defaults().get("time").map(String::as_str), Some(""));
        assert!(!draft.defaults().contains_key("place"));
    }

    #[test]
    fn test_set_default_rejects_unknown_key() {
        let mut draft = TemplateDraft::new();
        draft.set_structure_text("(a)");
        assert!(!draft.set_default("b", "x"));
        assert_eq!(draft.defaults().len(), 1);
    }

    #[test]
    fn test_build_requires_name() {
        let mut draft = TemplateDraft::new();
        draft.set_name("   ");
        draft.set_structure_text("hello (x)");

        let err = assert_err!(draft.build());
        assert!(matches!(err, Error::Validation { ref field, .. } if field == "name"));
    }

    #[test]
    fn test_build_requires_structure() {
        let mut draft = TemplateDraft::new();
        draft.set_name("Greeting");
        draft.set_structure_text(" \n ");

        let err = assert_err!(draft.build());
        assert!(matches!(err, Error::Validation { ref field, .. } if field == "structure"));
    }

    #[test]
    fn test_build_success() {
        let mut draft = TemplateDraft::new();
        draft.set_name("  Greeting ");
        draft.set_structure_text("Hi (who)");
        draft.set_default("who", "there");
        draft.set_image_url("  ");

        let built = assert_ok!(draft.build());
        assert_eq!(built.name, "Greeting");
        assert_eq!(built.structure, vec![Segment::literal("Hi "), Segment::placeholder("who")]);
        assert_eq!(built.defaults["who"], "there");
        assert_eq!(built.image_url, None);

        draft.set_image_url("https://example.com/a.png");
        assert_eq!(
            draft.build().unwrap().image_url.as_deref(),
            Some("https://example.com/a.png")
        );
    }

    #[test]
    fn test_warnings_and_clear() {
        let mut draft = TemplateDraft::new();
        draft.set_structure_text("(a(b)c)");
        assert_eq!(draft.warnings(), vec![MarkerWarning::Nested { offset: 2 }]);

        draft.clear();
        assert!(draft.structure_text().is_empty());
        assert!(draft.keys().is_empty());
        assert!(draft.name().is_empty());
    }
}
