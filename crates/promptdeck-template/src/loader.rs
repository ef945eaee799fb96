//! Loading template definitions from YAML files.
//!
//! ```yaml
//! templates:
//!   - id: haiku            # optional, a custom- id is generated when absent
//!     name: Haiku
//!     text: Write a haiku about (subject) in (season).
//!     defaults:
//!       subject: the sea
//!     format: string       # or json
//!     image_url: https://example.com/haiku.png
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use promptdeck_common_core::TemplateId;
use serde::Deserialize;
use thiserror::Error;

use crate::parser;
use crate::store::TemplateStore;
use crate::template::{Format, Template};

/// Template file errors.
#[derive(Debug, Error)]
pub enum TemplateLoadError {
    #[error("failed to read template file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse template file {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("template #{index} in {path}: {message}")]
    Invalid {
        path: PathBuf,
        index: usize,
        message: String,
    },

    #[error("duplicate template id '{id}' in {path}")]
    DuplicateId { path: PathBuf, id: String },
}

#[derive(Debug, Deserialize)]
struct TemplateFile {
    #[serde(default)]
    templates: Vec<TemplateDefinition>,
}

/// One template as written in a file.
#[derive(Debug, Clone, Deserialize)]
pub struct TemplateDefinition {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    pub text: String,
    #[serde(default)]
    pub defaults: BTreeMap<String, String>,
    #[serde(default)]
    pub format: Format,
    #[serde(default)]
    pub image_url: Option<String>,
}

/// Reads template definitions from YAML.
#[derive(Debug, Default)]
pub struct TemplateLoader;

impl TemplateLoader {
    pub fn new() -> Self {
        Self
    }

    /// Read and validate every template in a file.
    pub fn load_file(&self, path: impl AsRef<Path>) -> Result<Vec<Template>, TemplateLoadError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| TemplateLoadError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let templates = self.parse(path, &content)?;
        tracing::debug!(path = %path.display(), count = templates.len(), "loaded templates");
        Ok(templates)
    }

    /// Parse YAML content. `path` is used in error messages only.
    pub fn parse(&self, path: &Path, content: &str) -> Result<Vec<Template>, TemplateLoadError> {
        let file: TemplateFile =
            serde_yaml::from_str(content).map_err(|e| TemplateLoadError::Parse {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;

        file.templates
            .into_iter()
            .enumerate()
            .map(|(index, definition)| self.build(path, index, definition))
            .collect()
    }

    /// Append templates from `path` to `store`, rejecting ids already present.
    pub fn extend_store(
        &self,
        store: &mut TemplateStore,
        path: impl AsRef<Path>,
    ) -> Result<usize, TemplateLoadError> {
        let path = path.as_ref();
        let templates = self.load_file(path)?;
        let count = templates.len();

        for template in templates {
            let id = template.id.to_string();
            store
                .push(template)
                .map_err(|_| TemplateLoadError::DuplicateId {
                    path: path.to_path_buf(),
                    id,
                })?;
        }

        Ok(count)
    }

    fn build(
        &self,
        path: &Path,
        index: usize,
        definition: TemplateDefinition,
    ) -> Result<Template, TemplateLoadError> {
        let invalid = |message: &str| TemplateLoadError::Invalid {
            path: path.to_path_buf(),
            index,
            message: message.to_string(),
        };

        if definition.name.trim().is_empty() {
            return Err(invalid("name must not be empty"));
        }
        if definition.text.trim().is_empty() {
            return Err(invalid("text must not be empty"));
        }

        let id = match definition.id.as_deref().map(str::trim) {
            Some("") => return Err(invalid("id must not be empty")),
            Some(id) => TemplateId::new(id),
            None => TemplateId::custom(),
        };

        for warning in parser::lint(&definition.text) {
            tracing::warn!(template = %id, "{warning}");
        }

        let parsed = parser::parse(&definition.text);
        for key in definition.defaults.keys().filter(|k| !parsed.keys.contains(k)) {
            tracing::warn!(template = %id, key = %key, "default for unknown placeholder ignored");
        }
        let defaults = parser::reconcile_defaults(&definition.defaults, &parsed.keys);

        let mut template = Template::new(id, definition.name.trim(), parsed.structure, defaults)
            .with_format(definition.format);
        template.image_url = definition.image_url.filter(|url| !url.trim().is_empty());

        Ok(template)
    }
}
