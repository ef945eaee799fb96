//! `promptdeck list`

use clap::Args;
use serde::Serialize;

use crate::cli::CommandContext;
use crate::error::CliError;
use crate::output::{print_output, table, FormattedOutput};

/// List the templates in the deck
#[derive(Debug, Args)]
pub struct ListCommand {}

#[derive(Debug, Serialize)]
struct TemplateRow {
    index: usize,
    id: String,
    name: String,
    format: &'static str,
    placeholders: usize,
}

#[derive(Debug, Serialize)]
#[serde(transparent)]
struct TemplateList(Vec<TemplateRow>);

impl FormattedOutput for TemplateList {
    fn format_text(&self) -> String {
        let rows: Vec<Vec<String>> = self
            .0
            .iter()
            .map(|row| {
                vec![
                    row.index.to_string(),
                    row.id.clone(),
                    row.name.clone(),
                    row.format.to_string(),
                    row.placeholders.to_string(),
                ]
            })
            .collect();
        table(&["#", "ID", "NAME", "FORMAT", "FIELDS"], &rows)
    }
}

impl ListCommand {
    pub fn execute(&self, ctx: &CommandContext) -> Result<(), CliError> {
        let store = ctx.load_store()?;

        let list = TemplateList(
            store
                .iter()
                .enumerate()
                .map(|(index, t)| TemplateRow {
                    index,
                    id: t.id.to_string(),
                    name: t.name.clone(),
                    format: t.format.as_str(),
                    placeholders: t.placeholder_keys().len(),
                })
                .collect(),
        );

        print_output(ctx, &list)
    }
}
