//! CLI error handling and formatting.

use std::io;
use std::process::ExitCode;

use serde_json::json;
use thiserror::Error;

use crate::cli::OutputFormat;

/// CLI error type with rich context
#[derive(Debug, Error)]
pub enum CliError {
    #[error("{message}")]
    Config {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
        hint: Option<String>,
    },

    #[error("{message}")]
    Io {
        message: String,
        #[source]
        source: io::Error,
    },

    #[error("{message}")]
    Validation {
        message: String,
        field: Option<String>,
    },

    #[error("{message}")]
    NotFound {
        message: String,
        resource_type: String,
        resource_name: String,
        suggestions: Vec<String>,
    },

    #[error("{message}")]
    Clipboard { message: String, hint: Option<String> },

    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl CliError {
    /// Get the error code for this error
    pub fn code(&self) -> &'static str {
        match self {
            Self::Config { .. } => "E001",
            Self::Io { .. } => "E002",
            Self::Validation { .. } => "E004",
            Self::NotFound { .. } => "E005",
            Self::Clipboard { .. } => "E007",
            Self::Other(_) => "E999",
        }
    }

    /// Get the exit code for this error
    pub fn exit_code(&self) -> ExitCode {
        let code = match self {
            Self::Config { .. } => 2,
            Self::Io { .. } => 3,
            Self::Validation { .. } => 5,
            Self::NotFound { .. } => 6,
            Self::Clipboard { .. } => 7,
            Self::Other(_) => 1,
        };
        ExitCode::from(code)
    }

    /// Get hint for this error if available
    pub fn hint(&self) -> Option<&str> {
        match self {
            Self::Config { hint, .. } | Self::Clipboard { hint, .. } => hint.as_deref(),
            Self::NotFound { suggestions, .. } if !suggestions.is_empty() => {
                Some("See suggestions below")
            }
            _ => None,
        }
    }

    /// Get suggestions for this error
    pub fn suggestions(&self) -> &[String] {
        match self {
            Self::NotFound { suggestions, .. } => suggestions,
            _ => &[],
        }
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            source: None,
            hint: None,
        }
    }

    /// Create a config error with hint
    pub fn config_with_hint(message: impl Into<String>, hint: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            source: None,
            hint: Some(hint.into()),
        }
    }

    /// Create a not found error with suggestions
    pub fn not_found_with_suggestions(
        resource_type: impl Into<String>,
        resource_name: impl Into<String>,
        suggestions: Vec<String>,
    ) -> Self {
        let resource_type = resource_type.into();
        let resource_name = resource_name.into();
        Self::NotFound {
            message: format!("{resource_type} not found: {resource_name}"),
            resource_type,
            resource_name,
            suggestions,
        }
    }

    /// Create a validation error for a named field
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
            field: Some(field.into()),
        }
    }

    /// Print the error to stderr in the selected format.
    pub fn report(&self, format: OutputFormat) {
        match format {
            OutputFormat::Json => {
                let value = json!({
                    "error": {
                        "code": self.code(),
                        "message": self.to_string(),
                        "hint": self.hint(),
                        "suggestions": self.suggestions(),
                    }
                });
                eprintln!("{value:#}");
            }
            OutputFormat::Text => {
                eprintln!("error[{}]: {self}", self.code());

                let mut source = std::error::Error::source(self);
                while let Some(cause) = source {
                    eprintln!("  caused by: {cause}");
                    source = cause.source();
                }

                if let Some(hint) = self.hint() {
                    eprintln!("  hint: {hint}");
                }
                for suggestion in self.suggestions() {
                    eprintln!("    - {suggestion}");
                }
            }
        }
    }
}

// Conversion implementations
impl From<io::Error> for CliError {
    fn from(err: io::Error) -> Self {
        Self::Io {
            message: err.to_string(),
            source: err,
        }
    }
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        Self::Other(anyhow::anyhow!("JSON serialization failed: {err}"))
    }
}

impl From<promptdeck_common_config::ConfigError> for CliError {
    fn from(err: promptdeck_common_config::ConfigError) -> Self {
        Self::Config {
            message: format!("Configuration error: {err}"),
            source: Some(Box::new(err)),
            hint: Some("Check .promptdeck/config.yaml or the file given with --config".to_string()),
        }
    }
}

impl From<promptdeck_common_config::EnvError> for CliError {
    fn from(err: promptdeck_common_config::EnvError) -> Self {
        Self::Config {
            message: err.to_string(),
            source: None,
            hint: Some("Unset the variable or give it a valid value".to_string()),
        }
    }
}

impl From<promptdeck_template::TemplateLoadError> for CliError {
    fn from(err: promptdeck_template::TemplateLoadError) -> Self {
        Self::Config {
            message: err.to_string(),
            source: None,
            hint: Some("Fix the file named in templates.extra_file".to_string()),
        }
    }
}

impl From<promptdeck_deck::ClipboardError> for CliError {
    fn from(err: promptdeck_deck::ClipboardError) -> Self {
        Self::Clipboard {
            message: err.to_string(),
            hint: Some("Set clipboard.command in the config or PROMPTDECK_CLIPBOARD".to_string()),
        }
    }
}

impl From<promptdeck_common_core::Error> for CliError {
    fn from(err: promptdeck_common_core::Error) -> Self {
        use promptdeck_common_core::Error;

        match err {
            Error::Validation { field, message } => Self::Validation {
                message: format!("invalid {field}: {message}"),
                field: Some(field),
            },
            Error::NotFound { resource, id } => Self::NotFound {
                message: format!("{resource} not found: {id}"),
                resource_type: resource.to_string(),
                resource_name: id,
                suggestions: vec![],
            },
            Error::Clipboard(message) => Self::Clipboard { message, hint: None },
            Error::Config(message) => Self::config(message),
            Error::Io(source) => source.into(),
            Error::Serialization(message) => Self::Other(anyhow::anyhow!(message)),
        }
    }
}
