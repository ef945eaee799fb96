//! The interactive deck: navigation, per-template cards, copy history and
//! clipboard access.

pub mod app;
pub mod card;
pub mod clipboard;
pub mod history;
pub mod navigator;

pub use app::{AppState, CopyOutcome};
pub use card::Card;
pub use clipboard::{Clipboard, ClipboardError, CommandClipboard, MemoryClipboard};
pub use history::{HistoryEntry, HistoryManager};
pub use navigator::{
    AdvanceRejected, CardPlacement, DeckNavigator, Direction, NavigatorSettings, Phase,
};
