//! `promptdeck show <template>`

use clap::Args;
use promptdeck_template::{HookRegistry, Template};
use serde::Serialize;

use super::resolve_template;
use crate::cli::CommandContext;
use crate::error::CliError;
use crate::output::{print_output, FormattedOutput};

/// Show one template's structure and defaults
#[derive(Debug, Args)]
pub struct ShowCommand {
    /// Template id or index
    pub template: String,
}

#[derive(Debug, Serialize)]
struct Field {
    key: String,
    default: String,
}

#[derive(Debug, Serialize)]
struct TemplateDetail {
    index: usize,
    id: String,
    name: String,
    format: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    image_url: Option<String>,
    text: String,
    fields: Vec<Field>,
    hooks: Vec<&'static str>,
}

impl TemplateDetail {
    fn new(index: usize, template: &Template, hooks: &HookRegistry) -> Self {
        Self {
            index,
            id: template.id.to_string(),
            name: template.name.clone(),
            format: template.format.as_str(),
            image_url: template.image_url.clone(),
            text: template.raw_text(),
            fields: template
                .placeholder_keys()
                .into_iter()
                .map(|key| Field {
                    key: key.to_string(),
                    default: template.default_for(key).to_string(),
                })
                .collect(),
            hooks: hooks.names_for(&template.id),
        }
    }
}

impl FormattedOutput for TemplateDetail {
    fn format_text(&self) -> String {
        let mut out = format!("{} ({}, #{}, {})\n", self.name, self.id, self.index, self.format);
        if let Some(url) = &self.image_url {
            out.push_str(&format!("image: {url}\n"));
        }
        out.push_str(&format!("\n{}\n", self.text));

        if !self.fields.is_empty() {
            out.push_str("\nfields:\n");
            for field in &self.fields {
                out.push_str(&format!("  {} = {:?}\n", field.key, field.default));
            }
        }
        if !self.hooks.is_empty() {
            out.push_str(&format!("\nrules: {}\n", self.hooks.join(", ")));
        }
        out.trim_end().to_string()
    }
}

impl ShowCommand {
    pub fn execute(&self, ctx: &CommandContext) -> Result<(), CliError> {
        let store = ctx.load_store()?;
        let (index, template) = resolve_template(&store, &self.template)?;
        let detail = TemplateDetail::new(index, template, &HookRegistry::with_builtin());
        print_output(ctx, &detail)
    }
}
