//! `promptdeck render <template>`

use clap::Args;
use promptdeck_common_log::spans::{clipboard_span, instrument_future, template_span};
use promptdeck_deck::{Card, Clipboard, CommandClipboard};
use promptdeck_template::HookRegistry;
use serde::Serialize;

use super::resolve_template;
use crate::args::parse_key_value;
use crate::cli::CommandContext;
use crate::error::CliError;
use crate::output::{print_output, FormattedOutput};

/// Render a template, optionally copying the result
#[derive(Debug, Args)]
pub struct RenderCommand {
    /// Template id or index
    pub template: String,

    /// Field value, repeatable
    #[arg(short, long = "set", value_name = "KEY=VALUE", value_parser = parse_key_value)]
    pub set: Vec<(String, String)>,

    /// Copy the rendered prompt to the clipboard
    ///
    /// A clipboard failure exits with code 7; `deck` only reports it.
    #[arg(long)]
    pub copy: bool,
}

#[derive(Debug, Serialize)]
struct RenderOutput {
    template: String,
    format: &'static str,
    output: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    copied: Option<bool>,
}

impl FormattedOutput for RenderOutput {
    fn format_text(&self) -> String {
        self.output.clone()
    }
}

impl RenderCommand {
    pub async fn execute(&self, ctx: &CommandContext) -> Result<(), CliError> {
        let store = ctx.load_store()?;
        let (_, template) = resolve_template(&store, &self.template)?;
        let rendered = {
            let _span = template_span(template.id.as_str()).entered();

            let hooks = HookRegistry::with_builtin();
            let mut card = Card::new(template.clone(), &hooks);
            card.set_active(true, &hooks);
            for (key, value) in &self.set {
                if !card.set_field(key, value, &hooks) {
                    return Err(CliError::validation(
                        key.as_str(),
                        format!(
                            "'{key}' is not a placeholder of {} (fields: {})",
                            template.id,
                            template.placeholder_keys().join(", ")
                        ),
                    ));
                }
            }
            card.render()?
        };

        let copied = if self.copy {
            let clipboard = CommandClipboard::from_config(&ctx.config.clipboard)?;
            let span = clipboard_span(clipboard.name(), rendered.output.len());
            instrument_future(clipboard.write_text(&rendered.output), span).await?;
            if !ctx.quiet {
                eprintln!("copied to clipboard");
            }
            Some(true)
        } else {
            None
        };

        print_output(
            ctx,
            &RenderOutput {
                template: template.id.to_string(),
                format: rendered.format.as_str(),
                output: rendered.output,
                copied,
            },
        )
    }
}
