//! PromptDeck CLI Library
//!
//! Argument parsing, command implementations and the interactive deck
//! session behind the `promptdeck` binary.

pub mod args;
pub mod cli;
pub mod commands;
pub mod error;
pub mod output;
pub mod session;

pub use error::CliError;
