//! Logging infrastructure for PromptDeck.

use std::io;
use std::path::PathBuf;
use std::sync::Mutex;

use tracing::Subscriber;
use tracing_subscriber::{
    filter::LevelFilter,
    fmt::{self, format::FmtSpan, MakeWriter},
    layer::SubscriberExt,
    registry::LookupSpan,
    util::SubscriberInitExt,
    EnvFilter, Layer,
};

/// Logging configuration.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Minimum log level.
    pub level: LogLevel,
    /// Output format.
    pub format: LogFormat,
    /// Additional log file (appended to).
    pub file_path: Option<PathBuf>,
    /// Include timestamps.
    pub timestamps: bool,
    /// Include source location.
    pub source_location: bool,
    /// Include span open/close events.
    pub span_events: bool,
}

/// Log level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    #[default]
    Warn,
    Error,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => LevelFilter::TRACE,
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Warn => LevelFilter::WARN,
            LogLevel::Error => LevelFilter::ERROR,
        }
    }
}

impl LogLevel {
    /// Parse from string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "trace" => Some(Self::Trace),
            "debug" => Some(Self::Debug),
            "info" => Some(Self::Info),
            "warn" | "warning" => Some(Self::Warn),
            "error" => Some(Self::Error),
            _ => None,
        }
    }

    /// Map CLI verbosity flags to a level.
    pub fn from_verbosity(verbose: u8, quiet: bool) -> Self {
        match verbose {
            0 if quiet => Self::Error,
            0 => Self::Warn,
            1 => Self::Info,
            2 => Self::Debug,
            _ => Self::Trace,
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable format.
    #[default]
    Pretty,
    /// Compact single-line format.
    Compact,
    /// JSON structured format.
    Json,
}

impl LogFormat {
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "json" => Self::Json,
            "compact" => Self::Compact,
            _ => Self::Pretty,
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::default(),
            format: LogFormat::default(),
            file_path: None,
            timestamps: true,
            source_location: false,
            span_events: false,
        }
    }
}

fn env_flag(var: &str) -> Option<bool> {
    std::env::var(var)
        .ok()
        .map(|v| v.eq_ignore_ascii_case("true") || v == "1")
}

impl LogConfig {
    /// Create config from `PROMPTDECK_LOG_*` variables, falling back to `RUST_LOG`.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        let level = std::env::var("PROMPTDECK_LOG_LEVEL").or_else(|_| std::env::var("RUST_LOG"));
        if let Some(l) = level.ok().as_deref().and_then(LogLevel::parse) {
            config.level = l;
        }

        if let Ok(format) = std::env::var("PROMPTDECK_LOG_FORMAT") {
            config.format = LogFormat::parse(&format);
        }

        if let Ok(file_path) = std::env::var("PROMPTDECK_LOG_FILE") {
            config.file_path = Some(PathBuf::from(file_path));
        }

        if let Some(source_location) = env_flag("PROMPTDECK_LOG_SOURCE") {
            config.source_location = source_location;
        }

        if let Some(span_events) = env_flag("PROMPTDECK_LOG_SPANS") {
            config.span_events = span_events;
        }

        config
    }

    /// Override the level.
    pub fn with_level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self
    }

    fn fmt_span(&self) -> FmtSpan {
        if self.span_events {
            FmtSpan::NEW | FmtSpan::CLOSE
        } else {
            FmtSpan::NONE
        }
    }
}

/// Build one formatting layer for `writer` in the configured format.
fn format_layer<S, W>(config: &LogConfig, writer: W, ansi: bool) -> Box<dyn Layer<S> + Send + Sync>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let base = fmt::layer()
        .with_writer(writer)
        .with_ansi(ansi)
        .with_span_events(config.fmt_span());

    match (config.format, config.timestamps) {
        (LogFormat::Json, _) => base.json().boxed(),
        (LogFormat::Compact, true) => base.compact().boxed(),
        (LogFormat::Compact, false) => base.compact().without_time().boxed(),
        (LogFormat::Pretty, timestamps) => {
            let layer = base
                .with_target(true)
                .with_file(config.source_location)
                .with_line_number(config.source_location);
            if timestamps {
                layer.boxed()
            } else {
                layer.without_time().boxed()
            }
        }
    }
}

/// Initialize logging with the given configuration.
///
/// Logs go to stderr, and additionally to `file_path` when set. Directives in
/// `RUST_LOG` refine the configured level.
pub fn init(config: LogConfig) -> Result<(), LogError> {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::from(config.level).into())
        .from_env_lossy();

    let file_layer = match &config.file_path {
        Some(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)?;
            Some(format_layer(&config, Mutex::new(file), false))
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(format_layer(&config, io::stderr, true))
        .with(file_layer)
        .try_init()
        .map_err(|e| LogError::InitError(e.to_string()))
}

/// Logging errors.
#[derive(Debug, thiserror::Error)]
pub enum LogError {
    #[error("failed to initialize logging: {0}")]
    InitError(String),

    #[error("failed to open log file: {0}")]
    FileError(#[from] io::Error),
}

/// Convenience macros re-exported from tracing.
pub use tracing::{debug, error, info, trace, warn};

/// Tracing spans for deck operations.
pub mod spans;

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    #[test]
    fn test_log_level_parse() {
        assert_eq!(LogLevel::parse("info"), Some(LogLevel::Info));
        assert_eq!(LogLevel::parse("DEBUG"), Some(LogLevel::Debug));
        assert_eq!(LogLevel::parse("Warning"), Some(LogLevel::Warn));
        assert_eq!(LogLevel::parse("error"), Some(LogLevel::Error));
        assert_eq!(LogLevel::parse("trace"), Some(LogLevel::Trace));
        assert_eq!(LogLevel::parse("loud"), None);
    }

    #[test]
    fn test_verbosity_mapping() {
        assert_eq!(LogLevel::from_verbosity(0, true), LogLevel::Error);
        assert_eq!(LogLevel::from_verbosity(0, false), LogLevel::Warn);
        assert_eq!(LogLevel::from_verbosity(1, false), LogLevel::Info);
        assert_eq!(LogLevel::from_verbosity(2, false), LogLevel::Debug);
        assert_eq!(LogLevel::from_verbosity(7, false), LogLevel::Trace);
    }

    #[test]
    fn test_level_filter_conversion() {
        assert_eq!(LevelFilter::from(LogLevel::Trace), LevelFilter::TRACE);
        assert_eq!(LevelFilter::from(LogLevel::Warn), LevelFilter::WARN);
    }

    #[test]
    fn test_default_config() {
        let config = LogConfig::default();
        assert_eq!(config.level, LogLevel::Warn);
        assert_eq!(config.format, LogFormat::Pretty);
        assert!(config.file_path.is_none());
        assert!(config.timestamps);
        assert!(!config.source_location);
        assert!(!config.span_events);
    }

    #[test]
    fn test_config_from_env() {
        env::set_var("PROMPTDECK_LOG_LEVEL", "debug");
        env::set_var("PROMPTDECK_LOG_FORMAT", "json");
        env::set_var("PROMPTDECK_LOG_FILE", "/tmp/promptdeck.log");
        env::set_var("PROMPTDECK_LOG_SOURCE", "true");
        env::set_var("PROMPTDECK_LOG_SPANS", "1");

        let config = LogConfig::from_env();

        env::remove_var("PROMPTDECK_LOG_LEVEL");
        env::remove_var("PROMPTDECK_LOG_FORMAT");
        env::remove_var("PROMPTDECK_LOG_FILE");
        env::remove_var("PROMPTDECK_LOG_SOURCE");
        env::remove_var("PROMPTDECK_LOG_SPANS");

        assert_eq!(config.level, LogLevel::Debug);
        assert_eq!(config.format, LogFormat::Json);
        assert_eq!(config.file_path, Some(PathBuf::from("/tmp/promptdeck.log")));
        assert!(config.source_location);
        assert!(config.span_events);
    }

    #[test]
    fn test_with_level_overrides() {
        let config = LogConfig::default().with_level(LogLevel::Trace);
        assert_eq!(config.level, LogLevel::Trace);
    }

    #[test]
    fn test_format_parse_falls_back_to_pretty() {
        assert_eq!(LogFormat::parse("COMPACT"), LogFormat::Compact);
        assert_eq!(LogFormat::parse("yaml"), LogFormat::Pretty);
    }
}
