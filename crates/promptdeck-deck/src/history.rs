//! History of copied prompts.

use chrono::{DateTime, Utc};
use promptdeck_common_core::HistoryId;
use serde::Serialize;

/// One copied prompt.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryEntry {
    pub id: HistoryId,
    pub text: String,
    pub is_favorite: bool,
    pub created_at: DateTime<Utc>,
}

impl HistoryEntry {
    fn new(text: String) -> Self {
        Self {
            id: HistoryId::new(),
            text,
            is_favorite: false,
            created_at: Utc::now(),
        }
    }

    /// The text cut to `max_chars` characters, with `...` appended when cut.
    pub fn preview(&self, max_chars: usize) -> String {
        match self.text.char_indices().nth(max_chars) {
            Some((end, _)) => format!("{}...", &self.text[..end]),
            None => self.text.clone(),
        }
    }
}

/// Copied prompts, newest first.
#[derive(Debug, Clone, Default)]
pub struct HistoryManager {
    entries: Vec<HistoryEntry>,
}

impl HistoryManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `text` as the newest entry.
    pub fn add(&mut self, text: impl Into<String>) -> &HistoryEntry {
        let entry = HistoryEntry::new(text.into());
        tracing::debug!(id = %entry.id, "added history entry");
        self.entries.insert(0, entry);
        &self.entries[0]
    }

    /// Flip the favorite flag. Returns false if `id` is unknown.
    pub fn toggle_favorite(&mut self, id: HistoryId) -> bool {
        match self.entries.iter_mut().find(|e| e.id == id) {
            Some(entry) => {
                entry.is_favorite = !entry.is_favorite;
                tracing::debug!(%id, favorite = entry.is_favorite, "toggled favorite");
                true
            }
            None => {
                tracing::debug!(%id, "toggle ignored, no such history entry");
                false
            }
        }
    }

    /// Remove an entry. Returns false if `id` is unknown.
    pub fn delete(&mut self, id: HistoryId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);

        let removed = self.entries.len() != before;
        if removed {
            tracing::debug!(%id, "deleted history entry");
        } else {
            tracing::debug!(%id, "delete ignored, no such history entry");
        }
        removed
    }

    pub fn get(&self, id: HistoryId) -> Option<&HistoryEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// All entries, newest first.
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    /// Favorite entries, newest first.
    pub fn favorites(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter().filter(|e| e.is_favorite)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
