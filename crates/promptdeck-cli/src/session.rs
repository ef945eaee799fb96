//! Interactive deck session.
//!
//! Reads one command per line and reacts to the navigator's transition
//! deadline in the same `select!` loop. Commands that read or edit the
//! current card first wait for a running transition to finish; `next` and
//! `prev` during a transition are refused.

use std::io::Write;
use std::time::Instant;

use promptdeck_common_core::HistoryId;
use promptdeck_deck::{AppState, CopyOutcome, Direction};
use promptdeck_template::TemplateDraft;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::time::sleep_until;

use crate::error::CliError;

const CANCEL: &str = "/cancel";

const HELP: &str = "\
commands:
  next, n              move to the next template
  prev, p              move to the previous template
  open, o              flip the card to edit its fields
  close, c             flip the card back
  set <key> <value>    change a field on the current card
  reset                restore the card's defaults
  show, s              show the current card
  copy, y              copy the rendered prompt
  history, h           list copied prompts
  favorites, f         list favorite prompts
  fav <n|id>           toggle favorite on a history entry
  delete <n|id>        delete a history entry
  recopy <n|id>        copy a history entry again
  add                  create a new template
  help, ?              show this help
  quit, q              leave the session";

/// Whether the loop should keep reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// One parsed session command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    Advance(Direction),
    Open,
    Close,
    Set { key: String, value: String },
    Reset,
    Show,
    Copy,
    History,
    Favorites,
    Favorite(String),
    Delete(String),
    Recopy(String),
    Add,
    Help,
    Quit,
}

impl SessionCommand {
    pub fn parse(line: &str) -> Result<Self, String> {
        let line = line.trim();
        let (word, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let rest = rest.trim();

        let target = |name: &str| {
            if rest.is_empty() {
                Err(format!("usage: {name} <n|id>"))
            } else {
                Ok(rest.to_string())
            }
        };

        match word {
            "next" | "n" => Ok(Self::Advance(Direction::Next)),
            "prev" | "p" => Ok(Self::Advance(Direction::Prev)),
            "open" | "o" => Ok(Self::Open),
            "close" | "c" => Ok(Self::Close),
            "set" => {
                let (key, value) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
                if key.is_empty() {
                    return Err("usage: set <key> <value>".to_string());
                }
                Ok(Self::Set {
                    key: key.to_string(),
                    value: value.trim_start().to_string(),
                })
            }
            "reset" => Ok(Self::Reset),
            "show" | "s" => Ok(Self::Show),
            "copy" | "y" => Ok(Self::Copy),
            "history" | "h" => Ok(Self::History),
            "favorites" | "f" => Ok(Self::Favorites),
            "fav" => target("fav").map(Self::Favorite),
            "delete" | "del" => target("delete").map(Self::Delete),
            "recopy" => target("recopy").map(Self::Recopy),
            "add" => Ok(Self::Add),
            "help" | "?" => Ok(Self::Help),
            "quit" | "q" | "exit" => Ok(Self::Quit),
            other => Err(format!("unknown command '{other}', try 'help'")),
        }
    }
}

enum AddStep {
    Name,
    Text,
    Default(usize),
    ImageUrl,
}

struct AddFlow {
    draft: TemplateDraft,
    step: AddStep,
}

/// A running deck session writing to `out`.
pub struct Session<W: Write> {
    app: AppState,
    out: W,
    adding: Option<AddFlow>,
}

impl<W: Write> Session<W> {
    pub fn new(app: AppState, out: W) -> Self {
        Self {
            app,
            out,
            adding: None,
        }
    }

    pub fn app(&self) -> &AppState {
        &self.app
    }

    /// Process lines from `input` until `quit` or end of input.
    pub async fn run<R>(mut self, input: R) -> Result<W, CliError>
    where
        R: AsyncBufRead + Unpin,
    {
        let mut lines = input.lines();
        writeln!(self.out, "promptdeck: {} templates, type 'help' for commands", self.app.store().len())?;
        self.print_card(Instant::now())?;

        loop {
            let deadline = self.app.deadline();
            tokio::select! {
                line = lines.next_line() => {
                    let Some(line) = line? else { break };
                    if self.handle_line(&line).await? == Flow::Quit {
                        break;
                    }
                }
                _ = sleep_until(deadline.unwrap_or_else(Instant::now).into()), if deadline.is_some() => {
                    let now = Instant::now();
                    self.on_deadline(deadline.map_or(now, |d| now.max(d)))?;
                }
            }
        }

        Ok(self.out)
    }

    /// Handle one input line.
    pub async fn handle_line(&mut self, line: &str) -> Result<Flow, CliError> {
        if self.adding.is_some() {
            self.add_step(line)?;
            return Ok(Flow::Continue);
        }

        if line.trim().is_empty() {
            return Ok(Flow::Continue);
        }

        let command = match SessionCommand::parse(line) {
            Ok(command) => command,
            Err(message) => {
                writeln!(self.out, "{message}")?;
                return Ok(Flow::Continue);
            }
        };

        tracing::debug!(?command, "session command");

        if !matches!(command, SessionCommand::Advance(_) | SessionCommand::Help | SessionCommand::Quit) {
            self.settle().await?;
        }

        match command {
            SessionCommand::Advance(direction) => {
                if let Err(rejected) = self.app.advance(direction, Instant::now()) {
                    writeln!(self.out, "{rejected}")?;
                }
            }
            SessionCommand::Open => {
                if self.app.open_card() {
                    self.print_card(Instant::now())?;
                }
            }
            SessionCommand::Close => {
                self.app.close_card();
                self.print_card(Instant::now())?;
            }
            SessionCommand::Set { key, value } => match self.app.set_field(&key, &value) {
                Ok(()) => self.print_card(Instant::now())?,
                Err(err) => writeln!(self.out, "error: {err}")?,
            },
            SessionCommand::Reset => {
                self.app.reset_card()?;
                self.print_card(Instant::now())?;
            }
            SessionCommand::Show => self.print_card(Instant::now())?,
            SessionCommand::Copy => {
                let outcome = self.app.copy_current(Instant::now()).await?;
                self.print_copy(outcome)?;
            }
            SessionCommand::History => self.print_entries(false)?,
            SessionCommand::Favorites => self.print_entries(true)?,
            SessionCommand::Favorite(target) => {
                if let Some(id) = self.history_id(&target)? {
                    if self.app.toggle_favorite(id) {
                        let starred = self.app.history().get(id).is_some_and(|e| e.is_favorite);
                        writeln!(self.out, "{} {id}", if starred { "starred" } else { "unstarred" })?;
                    }
                }
            }
            SessionCommand::Delete(target) => {
                if let Some(id) = self.history_id(&target)? {
                    if self.app.delete_history(id) {
                        writeln!(self.out, "deleted {id}")?;
                    }
                }
            }
            SessionCommand::Recopy(target) => {
                if let Some(id) = self.history_id(&target)? {
                    match self.app.recopy(id).await {
                        Ok(outcome) => self.print_copy(outcome)?,
                        Err(err) => writeln!(self.out, "error: {err}")?,
                    }
                }
            }
            SessionCommand::Add => {
                self.adding = Some(AddFlow {
                    draft: TemplateDraft::new(),
                    step: AddStep::Name,
                });
                writeln!(self.out, "new template ({CANCEL} to abort)\nname:")?;
            }
            SessionCommand::Help => writeln!(self.out, "{HELP}")?,
            SessionCommand::Quit => return Ok(Flow::Quit),
        }

        Ok(Flow::Continue)
    }

    /// Complete a due transition and announce the new card.
    pub fn on_deadline(&mut self, now: Instant) -> Result<(), CliError> {
        if self.app.tick(now).is_some() {
            let index = self.app.current_index();
            if let Some(template) = self.app.current_template() {
                writeln!(
                    self.out,
                    "-> [{}/{}] {}",
                    index + 1,
                    self.app.store().len(),
                    template.name
                )?;
            }
        }
        Ok(())
    }

    /// Wait for a running transition to complete.
    async fn settle(&mut self) -> Result<(), CliError> {
        if let Some(deadline) = self.app.deadline() {
            sleep_until(deadline.into()).await;
            self.on_deadline(Instant::now().max(deadline))?;
        }
        Ok(())
    }

    fn print_card(&mut self, now: Instant) -> Result<(), CliError> {
        let Some(card) = self.app.current_card() else {
            writeln!(self.out, "the deck is empty")?;
            return Ok(());
        };

        let template = card.template();
        let copied = if card.is_copied(now) { "  [copied]" } else { "" };
        writeln!(
            self.out,
            "[{}/{}] {} ({}, {}){copied}",
            self.app.current_index() + 1,
            self.app.store().len(),
            template.name,
            template.id,
            template.format.as_str()
        )?;

        if let Some(url) = &template.image_url {
            writeln!(self.out, "image: {url}")?;
        }

        if card.is_flipped() {
            for key in template.placeholder_keys() {
                writeln!(self.out, "  {key} = {:?}", card.value(key).unwrap_or(""))?;
            }
        }

        let rendered = card.render()?;
        writeln!(self.out, "{}", rendered.output)?;
        Ok(())
    }

    fn print_copy(&mut self, outcome: CopyOutcome) -> Result<(), CliError> {
        match outcome {
            CopyOutcome::Copied { id } => writeln!(self.out, "copied ({id})")?,
            CopyOutcome::ClipboardFailed { reason } => writeln!(self.out, "copy failed: {reason}")?,
        }
        Ok(())
    }

    fn print_entries(&mut self, favorites_only: bool) -> Result<(), CliError> {
        let lines = history_lines(&self.app, favorites_only);
        if lines.is_empty() {
            let empty = if favorites_only { "no favorites yet" } else { "history is empty" };
            writeln!(self.out, "{empty}")?;
        }
        for line in lines {
            writeln!(self.out, "{line}")?;
        }
        Ok(())
    }

    /// Resolve a 1-based history position or a full id.
    fn history_id(&mut self, target: &str) -> Result<Option<HistoryId>, CliError> {
        let entries = self.app.history().entries();
        let found = match target.parse::<usize>() {
            Ok(n) if n >= 1 => entries.get(n - 1).map(|e| e.id),
            _ => HistoryId::parse(target)
                .ok()
                .filter(|id| self.app.history().get(*id).is_some()),
        };

        if found.is_none() {
            tracing::debug!(target, "no such history entry");
            writeln!(self.out, "no history entry '{target}'")?;
        }
        Ok(found)
    }

    fn add_step(&mut self, line: &str) -> Result<(), CliError> {
        let Some(mut flow) = self.adding.take() else {
            return Ok(());
        };

        if line.trim() == CANCEL {
            writeln!(self.out, "cancelled")?;
            return Ok(());
        }

        let next = match flow.step {
            AddStep::Name => {
                flow.draft.set_name(line.trim());
                if flow.draft.name().is_empty() {
                    writeln!(self.out, "a template name is required\nname:")?;
                    AddStep::Name
                } else {
                    writeln!(self.out, "text (use (key) for placeholders):")?;
                    AddStep::Text
                }
            }
            AddStep::Text => {
                flow.draft.set_structure_text(line);
                if line.trim().is_empty() {
                    writeln!(self.out, "the template text is required\ntext:")?;
                    AddStep::Text
                } else {
                    for warning in flow.draft.warnings() {
                        writeln!(self.out, "warning: {warning}")?;
                    }
                    self.next_default_prompt(&flow.draft, 0)?
                }
            }
            AddStep::Default(index) => {
                if let Some(key) = flow.draft.keys().get(index).cloned() {
                    flow.draft.set_default(&key, line.trim());
                }
                self.next_default_prompt(&flow.draft, index + 1)?
            }
            AddStep::ImageUrl => {
                flow.draft.set_image_url(line);
                match flow.draft.build() {
                    Ok(new) => {
                        let added = self.app.add_template(new);
                        let (name, id) = (added.name.clone(), added.id.clone());
                        writeln!(self.out, "added '{name}' as {id}")?;
                        self.print_card(Instant::now())?;
                    }
                    Err(err) => writeln!(self.out, "error: {err}")?,
                }
                return Ok(());
            }
        };

        flow.step = next;
        self.adding = Some(flow);
        Ok(())
    }

    fn next_default_prompt(&mut self, draft: &TemplateDraft, index: usize) -> Result<AddStep, CliError> {
        match draft.keys().get(index) {
            Some(key) => {
                writeln!(self.out, "default for {key}:")?;
                Ok(AddStep::Default(index))
            }
            None => {
                writeln!(self.out, "image url (optional):")?;
                Ok(AddStep::ImageUrl)
            }
        }
    }
}

/// One line per history entry, numbered by position in the full history.
fn history_lines(app: &AppState, favorites_only: bool) -> Vec<String> {
    let max_chars = app.preview_chars();
    app.history()
        .entries()
        .iter()
        .enumerate()
        .filter(|(_, entry)| !favorites_only || entry.is_favorite)
        .map(|(position, entry)| {
            let star = if entry.is_favorite { "*" } else { " " };
            format!(
                "{:>3}. {star} {}  {}  {}",
                position + 1,
                entry.id,
                entry.created_at.format("%H:%M:%S"),
                entry.preview(max_chars).replace('\n', " ")
            )
        })
        .collect()
}
