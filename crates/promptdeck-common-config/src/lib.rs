//! Configuration types for PromptDeck.
//!
//! Settings live in `.promptdeck/config.yaml`; every field has a default so a
//! partial file (or none at all) is valid.

pub mod env;
pub mod loader;
pub mod types;

pub use env::*;
pub use loader::*;
pub use types::*;
