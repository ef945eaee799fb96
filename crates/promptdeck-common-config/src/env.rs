//! Environment variable handling.

use std::env;
use thiserror::Error;

/// Environment variable errors.
#[derive(Debug, Error)]
pub enum EnvError {
    #[error("invalid value for {var}: {message}")]
    InvalidValue { var: String, message: String },
}

/// Environment variable names.
pub mod vars {
    /// Explicit configuration file.
    pub const PROMPTDECK_CONFIG: &str = "PROMPTDECK_CONFIG";
    /// Overrides `deck.transition_ms`.
    pub const PROMPTDECK_TRANSITION_MS: &str = "PROMPTDECK_TRANSITION_MS";
    /// Overrides `clipboard.command` (whitespace separated).
    pub const PROMPTDECK_CLIPBOARD: &str = "PROMPTDECK_CLIPBOARD";
}

/// Process environment access.
pub struct Environment {
    _guard: (),
}

impl Environment {
    /// Load `.env` then `.env.local` from the working directory, if present.
    pub fn init() -> Self {
        for file in [".env", ".env.local"] {
            if let Err(e) = dotenvy::from_filename(file) {
                if !e.not_found() {
                    tracing::warn!(file, error = %e, "ignoring unreadable env file");
                }
            }
        }
        Self { _guard: () }
    }

    /// Get an optional string variable.
    pub fn get(var: &str) -> Option<String> {
        env::var(var).ok().filter(|v| !v.is_empty())
    }

    /// Get an integer variable.
    pub fn get_int<T: std::str::FromStr>(var: &str) -> Result<Option<T>, EnvError> {
        match Self::get(var) {
            Some(v) => v.parse().map(Some).map_err(|_| EnvError::InvalidValue {
                var: var.to_string(),
                message: format!("expected integer, got {v:?}"),
            }),
            None => Ok(None),
        }
    }

    /// Apply `PROMPTDECK_*` overrides on top of a loaded config.
    pub fn apply_overrides(&self, config: &mut crate::PromptDeckConfig) -> Result<(), EnvError> {
        if let Some(ms) = Self::get_int::<u64>(vars::PROMPTDECK_TRANSITION_MS)? {
            config.deck.transition_ms = ms;
        }

        if let Some(command) = Self::get(vars::PROMPTDECK_CLIPBOARD) {
            config.clipboard.command = Some(command.split_whitespace().map(str::to_string).collect());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PromptDeckConfig;

    #[test]
    fn test_get_ignores_empty() {
        env::set_var("PROMPTDECK_TEST_EMPTY", "");
        assert_eq!(Environment::get("PROMPTDECK_TEST_EMPTY"), None);
        env::remove_var("PROMPTDECK_TEST_EMPTY");
    }

    #[test]
    fn test_get_int_rejects_garbage() {
        env::set_var("PROMPTDECK_TEST_INT", "fast");
        let result = Environment::get_int::<u64>("PROMPTDECK_TEST_INT");
        env::remove_var("PROMPTDECK_TEST_INT");
        assert!(matches!(result, Err(EnvError::InvalidValue { .. })));
    }

    #[test]
    fn test_overrides_apply() {
        env::set_var(vars::PROMPTDECK_TRANSITION_MS, "50");
        env::set_var(vars::PROMPTDECK_CLIPBOARD, "wl-copy --trim-newline");

        let mut config = PromptDeckConfig::default();
        let result = Environment::init().apply_overrides(&mut config);

        env::remove_var(vars::PROMPTDECK_TRANSITION_MS);
        env::remove_var(vars::PROMPTDECK_CLIPBOARD);

        result.unwrap();
        assert_eq!(config.deck.transition_ms, 50);
        assert_eq!(
            config.clipboard.command,
            Some(vec!["wl-copy".to_string(), "--trim-newline".to_string()])
        );
    }
}
