//! Clipboard access.

use std::process::Stdio;
use std::sync::Mutex;

use async_trait::async_trait;
use promptdeck_common_config::ClipboardConfig;
use thiserror::Error;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

/// Clipboard errors.
#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("no clipboard helper found (tried {tried}); set clipboard.command in the config")]
    Unavailable { tried: String },

    #[error("failed to start clipboard command '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("clipboard command '{program}' failed ({status}): {stderr}")]
    Failed {
        program: String,
        status: String,
        stderr: String,
    },

    #[error("clipboard I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("clipboard rejected the write: {0}")]
    Rejected(String),
}

impl From<ClipboardError> for promptdeck_common_core::Error {
    fn from(err: ClipboardError) -> Self {
        Self::clipboard(err.to_string())
    }
}

/// Something that can hold copied text.
#[async_trait]
pub trait Clipboard: Send + Sync {
    /// Backend name for logs.
    fn name(&self) -> &str;

    /// Replace the clipboard contents with `text`.
    async fn write_text(&self, text: &str) -> Result<(), ClipboardError>;
}

/// Pipes text into an external program such as `wl-copy` or `pbcopy`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandClipboard {
    program: String,
    args: Vec<String>,
}

/// Helpers tried in order when no command is configured.
const CANDIDATES: &[&[&str]] = &[
    &["wl-copy"],
    &["pbcopy"],
    &["xclip", "-selection", "clipboard"],
    &["xsel", "--clipboard", "--input"],
    &["clip.exe"],
];

impl CommandClipboard {
    pub fn new(program: impl Into<String>, args: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// Build from a program-and-arguments list. `None` if empty.
    pub fn from_argv(argv: &[String]) -> Option<Self> {
        let (program, args) = argv.split_first()?;
        Some(Self::new(program.clone(), args.iter().cloned()))
    }

    /// Use the configured command, or detect a helper on `PATH`.
    pub fn from_config(config: &ClipboardConfig) -> Result<Self, ClipboardError> {
        match config.command.as_deref().and_then(Self::from_argv) {
            Some(clipboard) => Ok(clipboard),
            None => Self::detect(),
        }
    }

    /// First known clipboard helper found on `PATH`.
    pub fn detect() -> Result<Self, ClipboardError> {
        let path = std::env::var_os("PATH").unwrap_or_default();
        let dirs: Vec<_> = std::env::split_paths(&path).collect();

        let wayland = std::env::var_os("WAYLAND_DISPLAY").is_some();
        let found = CANDIDATES
            .iter()
            .filter(|argv| wayland || argv[0] != "wl-copy")
            .find(|argv| dirs.iter().any(|dir| dir.join(argv[0]).is_file()));

        match found {
            Some(argv) => {
                tracing::debug!(program = argv[0], "detected clipboard helper");
                Ok(Self::new(argv[0], argv[1..].iter().copied()))
            }
            None => Err(ClipboardError::Unavailable {
                tried: CANDIDATES
                    .iter()
                    .map(|argv| argv[0])
                    .collect::<Vec<_>>()
                    .join(", "),
            }),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }
}

#[async_trait]
impl Clipboard for CommandClipboard {
    fn name(&self) -> &str {
        &self.program
    }

    async fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| ClipboardError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(text.as_bytes()).await?;
            stdin.shutdown().await?;
        }

        let output = child.wait_with_output().await?;
        if !output.status.success() {
            return Err(ClipboardError::Failed {
                program: self.program.clone(),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(())
    }
}

/// In-process clipboard that records every write.
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    writes: Mutex<Vec<String>>,
    fail_with: Option<String>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// A clipboard whose every write fails with `reason`.
    pub fn failing(reason: impl Into<String>) -> Self {
        Self {
            writes: Mutex::default(),
            fail_with: Some(reason.into()),
        }
    }

    /// Most recent contents.
    pub fn contents(&self) -> Option<String> {
        self.writes().pop()
    }

    /// Every successful write, oldest first.
    pub fn writes(&self) -> Vec<String> {
        self.writes
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

#[async_trait]
impl Clipboard for MemoryClipboard {
    fn name(&self) -> &str {
        "memory"
    }

    async fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        if let Some(reason) = &self.fail_with {
            return Err(ClipboardError::Rejected(reason.clone()));
        }

        self.writes
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(text.to_string());
        Ok(())
    }
}
