//! Configuration types.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Root configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PromptDeckConfig {
    /// Deck navigation.
    pub deck: DeckConfig,
    /// Card editing.
    pub card: CardConfig,
    /// History list.
    pub history: HistoryConfig,
    /// Clipboard backend.
    pub clipboard: ClipboardConfig,
    /// Template sources.
    pub templates: TemplatesConfig,
}

/// Deck navigation configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeckConfig {
    /// Length of a card transition in milliseconds.
    pub transition_ms: u64,
    /// Horizontal displacement applied to the leaving card.
    pub swipe_offset: f32,
    /// Index shown at startup.
    pub start_index: usize,
}

impl Default for DeckConfig {
    fn default() -> Self {
        Self {
            transition_ms: 300,
            swipe_offset: 500.0,
            start_index: 0,
        }
    }
}

impl DeckConfig {
    pub fn transition(&self) -> Duration {
        Duration::from_millis(self.transition_ms)
    }
}

/// Card configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CardConfig {
    /// How long the "copied" indicator stays lit.
    pub copied_indicator_ms: u64,
}

impl Default for CardConfig {
    fn default() -> Self {
        Self {
            copied_indicator_ms: 2000,
        }
    }
}

impl CardConfig {
    pub fn copied_indicator(&self) -> Duration {
        Duration::from_millis(self.copied_indicator_ms)
    }
}

/// History list configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    /// Characters shown before an entry preview is truncated.
    pub preview_chars: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self { preview_chars: 120 }
    }
}

/// Clipboard configuration.
///
/// `command` is a program and its arguments; the text is written to its stdin.
/// When unset a platform helper is detected at runtime.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClipboardConfig {
    pub command: Option<Vec<String>>,
}

/// Template source configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplatesConfig {
    /// Load the built-in template set.
    pub include_builtin: bool,
    /// YAML file with additional templates, appended after the built-ins.
    pub extra_file: Option<PathBuf>,
}

impl Default for TemplatesConfig {
    fn default() -> Self {
        Self {
            include_builtin: true,
            extra_file: None,
        }
    }
}
