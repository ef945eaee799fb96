//! Configuration file loading and parsing.

use crate::types::PromptDeckConfig;
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Directory holding project-level configuration.
pub const CONFIG_DIR: &str = ".promptdeck";

/// Configuration file name inside [`CONFIG_DIR`].
pub const CONFIG_FILE: &str = "config.yaml";

static ENV_VAR_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\$\{([^}:]+)(?::-([^}]*))?\}").expect("env var pattern is valid"));

/// Config loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    NotFound { path: PathBuf },

    #[error("failed to read config: {source}")]
    ReadError {
        #[from]
        source: std::io::Error,
    },

    #[error("invalid YAML at line {}: {message}", line.map(|l| l.to_string()).unwrap_or_else(|| "unknown".to_string()))]
    ParseError { line: Option<usize>, message: String },

    #[error("validation error: {message}")]
    ValidationError { message: String },

    #[error("environment variable not found: {var}")]
    EnvVarNotFound { var: String },
}

/// Configuration loader.
pub struct ConfigLoader {
    base_path: PathBuf,
}

impl ConfigLoader {
    /// Create a loader for the given project directory.
    pub fn new(project_dir: impl AsRef<Path>) -> Self {
        Self {
            base_path: project_dir.as_ref().to_path_buf(),
        }
    }

    /// Path of the project configuration file.
    pub fn config_path(&self) -> PathBuf {
        self.base_path.join(CONFIG_DIR).join(CONFIG_FILE)
    }

    /// Load `.promptdeck/config.yaml`, or defaults when it does not exist.
    pub fn load(&self) -> Result<PromptDeckConfig, ConfigError> {
        let config_path = self.config_path();

        if !config_path.exists() {
            tracing::debug!(path = %config_path.display(), "no config file, using defaults");
            return Ok(PromptDeckConfig::default());
        }

        self.load_from(&config_path, &self.base_path)
    }

    /// Load an explicit configuration file. The file must exist.
    ///
    /// Relative paths inside it resolve against the file's directory.
    pub fn load_file(path: impl AsRef<Path>) -> Result<PromptDeckConfig, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::NotFound {
                path: path.to_path_buf(),
            });
        }

        let base = path.parent().unwrap_or_else(|| Path::new("."));
        Self::new(base).load_from(path, base)
    }

    fn load_from(&self, path: &Path, base: &Path) -> Result<PromptDeckConfig, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let mut config = self.parse(&contents)?;

        if let Some(extra) = config.templates.extra_file.as_mut() {
            if extra.is_relative() {
                *extra = base.join(&*extra);
            }
        }

        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Parse and validate YAML content after env expansion.
    pub fn parse(&self, contents: &str) -> Result<PromptDeckConfig, ConfigError> {
        let expanded = self.expand_env_vars(contents)?;

        // An empty or comment-only file deserializes to null.
        if expanded.trim().lines().all(|l| l.trim().is_empty() || l.trim_start().starts_with('#')) {
            return Ok(PromptDeckConfig::default());
        }

        let config: PromptDeckConfig =
            serde_yaml::from_str(&expanded).map_err(|e| ConfigError::ParseError {
                line: e.location().map(|l| l.line()),
                message: e.to_string(),
            })?;

        self.validate(&config)?;
        Ok(config)
    }

    /// Expand environment variables in the form `${VAR}` or `${VAR:-default}`.
    fn expand_env_vars(&self, content: &str) -> Result<String, ConfigError> {
        let mut result = String::with_capacity(content.len());
        let mut last = 0;

        for cap in ENV_VAR_PATTERN.captures_iter(content) {
            let Some(full_match) = cap.get(0) else { continue };
            let var_name = &cap[1];
            let default = cap.get(2).map(|m| m.as_str());

            let value = match (std::env::var(var_name), default) {
                (Ok(v), _) => v,
                (Err(_), Some(d)) => d.to_string(),
                (Err(_), None) => {
                    return Err(ConfigError::EnvVarNotFound {
                        var: var_name.to_string(),
                    })
                }
            };

            result.push_str(&content[last..full_match.start()]);
            result.push_str(&value);
            last = full_match.end();
        }

        result.push_str(&content[last..]);
        Ok(result)
    }

    /// Validate configuration values.
    pub fn validate(&self, config: &PromptDeckConfig) -> Result<(), ConfigError> {
        let invalid = |message: &str| {
            Err(ConfigError::ValidationError {
                message: message.to_string(),
            })
        };

        if config.deck.transition_ms == 0 {
            return invalid("deck.transition_ms must be greater than 0");
        }

        if !config.deck.swipe_offset.is_finite() || config.deck.swipe_offset <= 0.0 {
            return invalid("deck.swipe_offset must be a positive number");
        }

        if config.history.preview_chars == 0 {
            return invalid("history.preview_chars must be greater than 0");
        }

        if let Some(command) = &config.clipboard.command {
            if command.first().map_or(true, |program| program.trim().is_empty()) {
                return invalid("clipboard.command must name a program");
            }
        }

        if !config.templates.include_builtin && config.templates.extra_file.is_none() {
            return invalid("templates: disabling the built-in set requires templates.extra_file");
        }

        Ok(())
    }

    /// Save configuration to `.promptdeck/config.yaml`.
    pub fn save(&self, config: &PromptDeckConfig) -> Result<PathBuf, ConfigError> {
        let config_dir = self.base_path.join(CONFIG_DIR);
        std::fs::create_dir_all(&config_dir)?;

        let config_path = config_dir.join(CONFIG_FILE);
        let yaml = serde_yaml::to_string(config).map_err(|e| ConfigError::ParseError {
            line: None,
            message: e.to_string(),
        })?;

        std::fs::write(&config_path, yaml)?;
        Ok(config_path)
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new(std::env::current_dir().unwrap_or_default())
    }
}
