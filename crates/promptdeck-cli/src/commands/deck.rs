//! `promptdeck deck`

use std::io;
use std::sync::Arc;

use clap::Args;
use promptdeck_common_log::spans::{instrument_future, session_span};
use promptdeck_deck::{AppState, Clipboard, CommandClipboard, MemoryClipboard};
use tokio::io::BufReader;

use super::resolve_template;
use crate::cli::CommandContext;
use crate::error::CliError;
use crate::session::Session;

/// Browse the deck interactively
#[derive(Debug, Args)]
pub struct DeckCommand {
    /// Start on this template (id or index)
    #[arg(long)]
    pub start: Option<String>,
}

impl DeckCommand {
    pub async fn execute(&self, ctx: &CommandContext) -> Result<(), CliError> {
        let store = ctx.load_store()?;

        let mut config = ctx.config.clone();
        if let Some(start) = &self.start {
            config.deck.start_index = resolve_template(&store, start)?.0;
        }

        let clipboard: Arc<dyn Clipboard> = match CommandClipboard::from_config(&config.clipboard) {
            Ok(clipboard) => Arc::new(clipboard),
            Err(err) => {
                tracing::warn!(error = %err, "clipboard unavailable, copying will fail");
                Arc::new(MemoryClipboard::failing(err.to_string()))
            }
        };

        let app = AppState::new(&config, store, clipboard);
        let span = session_span(app.store().len());
        let session = Session::new(app, io::stdout());

        instrument_future(session.run(BufReader::new(tokio::io::stdin())), span).await?;
        Ok(())
    }
}
