//! `promptdeck parse <text>`

use clap::Args;
use promptdeck_template::{lint, parse, MarkerWarning, Segment};
use serde::Serialize;

use crate::cli::CommandContext;
use crate::error::CliError;
use crate::output::{print_output, FormattedOutput};

/// Split raw text into literals and placeholders
#[derive(Debug, Args)]
pub struct ParseCommand {
    /// Template text with (placeholders)
    pub text: String,
}

#[derive(Debug, Serialize)]
struct Warning {
    #[serde(flatten)]
    warning: MarkerWarning,
    message: String,
}

#[derive(Debug, Serialize)]
struct ParseReport {
    structure: Vec<Segment>,
    keys: Vec<String>,
    warnings: Vec<Warning>,
}

impl FormattedOutput for ParseReport {
    fn format_text(&self) -> String {
        let mut lines: Vec<String> = self
            .structure
            .iter()
            .map(|segment| match segment {
                Segment::Literal(text) => format!("literal      {text:?}"),
                Segment::Placeholder { key } => format!("placeholder  {key}"),
            })
            .collect();

        lines.push(format!("keys: {}", self.keys.join(", ")));
        lines.extend(self.warnings.iter().map(|w| format!("warning: {}", w.message)));
        lines.join("\n")
    }
}

impl ParseCommand {
    pub fn execute(&self, ctx: &CommandContext) -> Result<(), CliError> {
        let parsed = parse(&self.text);
        let report = ParseReport {
            structure: parsed.structure,
            keys: parsed.keys,
            warnings: lint(&self.text)
                .into_iter()
                .map(|warning| Warning {
                    message: warning.to_string(),
                    warning,
                })
                .collect(),
        };
        print_output(ctx, &report)
    }
}
