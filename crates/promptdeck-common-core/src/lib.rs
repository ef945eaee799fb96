//! PromptDeck common core types.

pub mod build_info;
pub mod error;
pub mod id;

pub use error::{Error, Result};
pub use id::{HistoryId, IdParseError, TemplateId};
