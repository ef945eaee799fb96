//! Ordered template collection.

use promptdeck_common_core::{Error, Result, TemplateId};

use crate::builtin;
use crate::draft::NewTemplate;
use crate::template::{Format, Template};

/// The deck's templates in display order. Only grows.
#[derive(Debug, Clone, Default)]
pub struct TemplateStore {
    templates: Vec<Template>,
}

impl TemplateStore {
    /// Build a store, rejecting duplicate ids.
    pub fn new(templates: Vec<Template>) -> Result<Self> {
        let mut store = Self::default();
        for template in templates {
            store.push(template)?;
        }
        Ok(store)
    }

    /// Store holding the built-in templates.
    pub fn builtin() -> Self {
        Self {
            templates: builtin::templates(),
        }
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Template> {
        self.templates.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Template> {
        self.templates.iter()
    }

    /// Find a template by id, with its index.
    pub fn find(&self, id: &str) -> Option<(usize, &Template)> {
        self.templates
            .iter()
            .enumerate()
            .find(|(_, t)| t.id == id)
    }

    /// Look up by id, falling back to a numeric index.
    pub fn resolve(&self, selector: &str) -> Result<(usize, &Template)> {
        if let Some(found) = self.find(selector) {
            return Ok(found);
        }

        selector
            .parse::<usize>()
            .ok()
            .and_then(|index| self.get(index).map(|t| (index, t)))
            .ok_or_else(|| Error::not_found("template", selector))
    }

    /// Append a fully formed template. Returns its index.
    pub fn push(&mut self, template: Template) -> Result<usize> {
        if self.find(template.id.as_str()).is_some() {
            return Err(Error::validation(
                "id",
                format!("duplicate template id '{}'", template.id),
            ));
        }

        self.templates.push(template);
        Ok(self.templates.len() - 1)
    }

    /// Append a user-built template with a fresh `custom-` id.
    pub fn add(&mut self, new: NewTemplate) -> &Template {
        let mut template = Template::new(TemplateId::custom(), new.name, new.structure, new.defaults)
            .with_format(Format::Text);
        template.image_url = new.image_url;

        tracing::info!(id = %template.id, name = %template.name, "added template");
        self.templates.push(template);
        &self.templates[self.templates.len() - 1]
    }
}
