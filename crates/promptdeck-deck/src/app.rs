//! Application state: the deck, its cards and the copy history.

use std::sync::Arc;
use std::time::{Duration, Instant};

use promptdeck_common_config::PromptDeckConfig;
use promptdeck_common_core::{Error, HistoryId, Result};
use promptdeck_template::{HookRegistry, NewTemplate, RenderedPrompt, Template, TemplateStore};

use crate::card::Card;
use crate::clipboard::Clipboard;
use crate::history::{HistoryEntry, HistoryManager};
use crate::navigator::{AdvanceRejected, CardPlacement, DeckNavigator, Direction, NavigatorSettings};

/// Result of a copy request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CopyOutcome {
    /// The text reached the clipboard.
    Copied { id: HistoryId },
    /// The clipboard refused; nothing was recorded.
    ClipboardFailed { reason: String },
}

/// Everything one deck session owns.
pub struct AppState {
    store: TemplateStore,
    cards: Vec<Card>,
    hooks: HookRegistry,
    navigator: DeckNavigator,
    history: HistoryManager,
    clipboard: Arc<dyn Clipboard>,
    copied_indicator: Duration,
    preview_chars: usize,
}

impl AppState {
    pub fn new(config: &PromptDeckConfig, store: TemplateStore, clipboard: Arc<dyn Clipboard>) -> Self {
        let hooks = HookRegistry::with_builtin();
        let copied_indicator = config.card.copied_indicator();
        let navigator = DeckNavigator::new(
            NavigatorSettings::from(&config.deck),
            config.deck.start_index,
            store.len(),
        );

        if config.deck.start_index >= store.len() && !store.is_empty() {
            tracing::warn!(
                start_index = config.deck.start_index,
                templates = store.len(),
                "start index out of range, clamped"
            );
        }

        let cards = store
            .iter()
            .enumerate()
            .map(|(index, template)| {
                let mut card = Card::new(template.clone(), &hooks)
                    .with_copied_indicator(copied_indicator);
                if index == navigator.current_index() {
                    card.set_active(true, &hooks);
                }
                card
            })
            .collect();

        tracing::info!(templates = store.len(), clipboard = clipboard.name(), "deck ready");

        Self {
            store,
            cards,
            hooks,
            navigator,
            history: HistoryManager::new(),
            clipboard,
            copied_indicator,
            preview_chars: config.history.preview_chars,
        }
    }

    pub fn store(&self) -> &TemplateStore {
        &self.store
    }

    pub fn navigator(&self) -> &DeckNavigator {
        &self.navigator
    }

    pub fn history(&self) -> &HistoryManager {
        &self.history
    }

    pub fn preview_chars(&self) -> usize {
        self.preview_chars
    }

    pub fn current_index(&self) -> usize {
        self.navigator.current_index()
    }

    pub fn current_card(&self) -> Option<&Card> {
        self.cards.get(self.navigator.current_index())
    }

    pub fn current_template(&self) -> Option<&Template> {
        self.current_card().map(Card::template)
    }

    fn current_card_mut(&mut self) -> Result<&mut Card> {
        let index = self.navigator.current_index();
        self.cards
            .get_mut(index)
            .ok_or_else(|| Error::not_found("template", index.to_string()))
    }

    /// Start moving to the next or previous card.
    pub fn advance(&mut self, direction: Direction, now: Instant) -> std::result::Result<Instant, AdvanceRejected> {
        let result = self.navigator.advance(direction, now, self.cards.len());
        if let Err(rejected) = result {
            tracing::debug!(?direction, %rejected, "advance ignored");
        }
        result
    }

    /// When the running transition completes, if any.
    pub fn deadline(&self) -> Option<Instant> {
        self.navigator.deadline()
    }

    /// Finish a due transition. Returns the direction that completed.
    pub fn tick(&mut self, now: Instant) -> Option<Direction> {
        let previous = self.navigator.current_index();
        let completed = self.navigator.poll(now, self.cards.len())?;
        self.activate(previous);
        Some(completed)
    }

    /// Move focus from `previous` to the current card. Both restore their defaults.
    fn activate(&mut self, previous: usize) {
        let current = self.navigator.current_index();
        if let Some(card) = self.cards.get_mut(previous) {
            card.set_active(false, &self.hooks);
        }
        if let Some(card) = self.cards.get_mut(current) {
            card.set_active(true, &self.hooks);
        }
    }

    /// Layout hints for the visible stack.
    pub fn card_stack(&self) -> Vec<CardPlacement> {
        self.navigator.stack_offsets(self.cards.len())
    }

    pub fn open_card(&mut self) -> bool {
        self.current_card_mut().map(Card::open).unwrap_or(false)
    }

    pub fn close_card(&mut self) {
        if let Ok(card) = self.current_card_mut() {
            card.close();
        }
    }

    /// Set a field on the current card.
    pub fn set_field(&mut self, key: &str, value: &str) -> Result<()> {
        let index = self.navigator.current_index();
        let card = self
            .cards
            .get_mut(index)
            .ok_or_else(|| Error::not_found("template", index.to_string()))?;

        if card.set_field(key, value, &self.hooks) {
            Ok(())
        } else {
            Err(Error::validation(
                "field",
                format!("'{key}' is not a placeholder of {}", card.template().id),
            ))
        }
    }

    /// Restore the current card's defaults.
    pub fn reset_card(&mut self) -> Result<()> {
        let index = self.navigator.current_index();
        let card = self
            .cards
            .get_mut(index)
            .ok_or_else(|| Error::not_found("template", index.to_string()))?;
        card.reset(&self.hooks);
        Ok(())
    }

    pub fn render_current(&self) -> Result<RenderedPrompt> {
        self.current_card()
            .ok_or_else(|| Error::not_found("template", self.current_index().to_string()))?
            .render()
    }

    /// Whether the current card's copied indicator is lit.
    pub fn is_copied(&self, now: Instant) -> bool {
        self.current_card().is_some_and(|card| card.is_copied(now))
    }

    /// Render the current card and put it on the clipboard.
    ///
    /// On success the output is recorded in history and the card's copied
    /// indicator lights up. Clipboard failures are logged and reported, not
    /// returned as errors.
    pub async fn copy_current(&mut self, now: Instant) -> Result<CopyOutcome> {
        let rendered = self.render_current()?;

        if let Err(err) = self.clipboard.write_text(&rendered.output).await {
            tracing::warn!(error = %err, clipboard = self.clipboard.name(), "copy failed");
            return Ok(CopyOutcome::ClipboardFailed {
                reason: err.to_string(),
            });
        }

        let id = self.history.add(rendered.output).id;
        self.current_card_mut()?.mark_copied(now);
        tracing::info!(%id, "copied prompt");
        Ok(CopyOutcome::Copied { id })
    }

    /// Copy a history entry's text again.
    pub async fn recopy(&self, id: HistoryId) -> Result<CopyOutcome> {
        let entry = self
            .history
            .get(id)
            .ok_or_else(|| Error::not_found("history entry", id.to_string()))?;

        match self.clipboard.write_text(&entry.text).await {
            Ok(()) => Ok(CopyOutcome::Copied { id }),
            Err(err) => {
                tracing::warn!(error = %err, %id, "copy from history failed");
                Ok(CopyOutcome::ClipboardFailed {
                    reason: err.to_string(),
                })
            }
        }
    }

    pub fn toggle_favorite(&mut self, id: HistoryId) -> bool {
        self.history.toggle_favorite(id)
    }

    pub fn delete_history(&mut self, id: HistoryId) -> bool {
        self.history.delete(id)
    }

    pub fn favorites(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.history.favorites()
    }

    /// Append a new template and make it the current card.
    ///
    /// If a transition is running the new card is appended but the deck stays
    /// where the transition lands.
    pub fn add_template(&mut self, new: NewTemplate) -> &Template {
        let template = self.store.add(new).clone();
        let index = self.store.len() - 1;

        let card = Card::new(template, &self.hooks).with_copied_indicator(self.copied_indicator);
        self.cards.push(card);

        let previous = self.navigator.current_index();
        if self.navigator.jump_to(index, self.cards.len()) {
            self.activate(previous);
        } else {
            tracing::debug!(index, "transition running, new template not focused");
        }

        self.cards[index].template()
    }
}
