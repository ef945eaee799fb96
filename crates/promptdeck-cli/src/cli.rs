//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueHint};
use promptdeck_common_config::{ConfigLoader, Environment, PromptDeckConfig};
use promptdeck_common_log::spans::Timer;
use promptdeck_template::{TemplateLoader, TemplateStore};

use crate::commands::{DeckCommand, ListCommand, ParseCommand, RenderCommand, ShowCommand};
use crate::error::CliError;

/// PromptDeck - a deck of reusable prompt templates
///
/// Fill in placeholders, render, and copy prompts to the clipboard.
#[derive(Debug, Parser)]
#[command(
    name = "promptdeck",
    author,
    version,
    long_version = promptdeck_common_core::build_info::LONG_VERSION,
    about,
    long_about = None,
    propagate_version = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Increase verbosity level (-v, -vv, -vvv)
    #[arg(
        short,
        long,
        action = ArgAction::Count,
        global = true,
        help = "Increase verbosity level"
    )]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(
        short,
        long,
        global = true,
        conflicts_with = "verbose",
        help = "Suppress non-error output"
    )]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(
        short,
        long,
        global = true,
        env = "PROMPTDECK_CONFIG",
        value_hint = ValueHint::FilePath,
        help = "Path to configuration file"
    )]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(
        long,
        global = true,
        default_value = "text",
        value_enum,
        help = "Output format (text, json)"
    )]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format selection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Available subcommands
#[derive(Debug, Subcommand)]
pub enum Command {
    /// List the templates in the deck
    #[command(visible_alias = "ls")]
    List(ListCommand),

    /// Show one template's structure and defaults
    Show(ShowCommand),

    /// Split raw text into literals and placeholders
    Parse(ParseCommand),

    /// Render a template, optionally copying the result
    Render(RenderCommand),

    /// Browse the deck interactively
    Deck(DeckCommand),

    /// Generate shell completions
    #[command(hide = true)]
    Completions(CompletionsCommand),
}

/// Shell completions generation
#[derive(Debug, Parser)]
pub struct CompletionsCommand {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: clap_complete::Shell,
}

impl Cli {
    /// Load configuration from `--config` or `.promptdeck/config.yaml`, then
    /// apply environment overrides.
    pub fn load_config(&self) -> Result<PromptDeckConfig, CliError> {
        let env = Environment::init();

        let mut config = match &self.config {
            Some(path) => ConfigLoader::load_file(path)?,
            None => ConfigLoader::default().load()?,
        };

        env.apply_overrides(&mut config)?;
        ConfigLoader::default().validate(&config)?;
        Ok(config)
    }

    /// Execute the selected command
    pub async fn execute(self, config: PromptDeckConfig) -> Result<(), CliError> {
        let ctx = CommandContext {
            config,
            format: self.format,
            quiet: self.quiet,
        };

        match self.command {
            Command::List(cmd) => cmd.execute(&ctx),
            Command::Show(cmd) => cmd.execute(&ctx),
            Command::Parse(cmd) => cmd.execute(&ctx),
            Command::Render(cmd) => cmd.execute(&ctx).await,
            Command::Deck(cmd) => cmd.execute(&ctx).await,
            Command::Completions(cmd) => cmd.execute(),
        }
    }
}

impl CompletionsCommand {
    /// Execute the completions command
    pub fn execute(&self) -> Result<(), CliError> {
        use clap::CommandFactory;
        use clap_complete::generate;
        use std::io;

        let mut cmd = Cli::command();
        let name = cmd.get_name().to_string();
        generate(self.shell, &mut cmd, name, &mut io::stdout());
        Ok(())
    }
}

/// Context passed to all commands
#[derive(Debug)]
pub struct CommandContext {
    pub config: PromptDeckConfig,
    pub format: OutputFormat,
    pub quiet: bool,
}

impl CommandContext {
    /// Build the template store: built-ins first, then `templates.extra_file`.
    pub fn load_store(&self) -> Result<TemplateStore, CliError> {
        let timer = Timer::start("load_templates");
        let templates = &self.config.templates;

        let mut store = if templates.include_builtin {
            TemplateStore::builtin()
        } else {
            TemplateStore::default()
        };

        if let Some(path) = &templates.extra_file {
            TemplateLoader::new().extend_store(&mut store, path)?;
        }

        timer.finish();

        if store.is_empty() {
            return Err(CliError::config_with_hint(
                "the deck has no templates",
                "Enable templates.include_builtin or add templates to templates.extra_file",
            ));
        }

        Ok(store)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_render_args() {
        let cli = Cli::try_parse_from([
            "promptdeck",
            "-vv",
            "--format",
            "json",
            "render",
            "polaroid",
            "--set",
            "pol_mood=happy",
        ])
        .unwrap();

        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.format, OutputFormat::Json);
        match cli.command {
            Command::Render(cmd) => {
                assert_eq!(cmd.template, "polaroid");
                assert_eq!(cmd.set, vec![("pol_mood".to_string(), "happy".to_string())]);
                assert!(!cmd.copy);
            }
            other => panic!("Expected render, got {other:?}"),
        }
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        assert!(Cli::try_parse_from(["promptdeck", "-q", "-v", "list"]).is_err());
    }

    #[test]
    fn test_store_requires_templates() {
        let mut config = PromptDeckConfig::default();
        config.templates.include_builtin = false;
        let ctx = CommandContext {
            config,
            format: OutputFormat::Text,
            quiet: false,
        };

        let err = ctx.load_store().unwrap_err();
        assert_eq!(err.code(), "E001");
    }

    #[test]
    fn test_store_appends_extra_file() {
        let (_dir, path) = promptdeck_test_utils::temp_file(
            "templates.yaml",
            promptdeck_test_utils::SAMPLE_TEMPLATES_YAML,
        );

        let mut config = PromptDeckConfig::default();
        config.templates.extra_file = Some(path);
        let ctx = CommandContext {
            config,
            format: OutputFormat::Text,
            quiet: false,
        };

        let store = ctx.load_store().unwrap();
        let builtin = TemplateStore::builtin().len();
        assert_eq!(store.len(), builtin + 2);
        assert_eq!(store.get(builtin).unwrap().id, "haiku");
    }
}
