//! Common test utilities for CLI testing.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::process::Output;

use assert_cmd::Command;
use tempfile::{tempdir, TempDir};

/// Test context with temporary directory
pub struct TestContext {
    pub temp_dir: TempDir,
    pub config_path: PathBuf,
}

impl TestContext {
    pub fn new() -> Self {
        let temp_dir = tempdir().expect("Failed to create temp dir");
        let config_path = temp_dir.path().join("config.yaml");
        std::fs::write(&config_path, "").expect("Failed to write config");

        Self {
            temp_dir,
            config_path,
        }
    }

    /// Replace the config file
    pub fn with_config(self, config: &str) -> Self {
        std::fs::write(&self.config_path, config).expect("Failed to write config");
        self
    }

    /// Fast transitions and a clipboard that writes to `clip.txt`
    pub fn with_file_clipboard(self) -> Self {
        self.with_config(
            r#"deck:
  transition_ms: 1
clipboard:
  command: ["sh", "-c", "cat > clip.txt"]
"#,
        )
    }

    /// Write a file inside the temp directory
    pub fn write(&self, name: &str, content: &str) -> PathBuf {
        let path = self.path().join(name);
        std::fs::write(&path, content).expect("Failed to write file");
        path
    }

    /// Get path to temp directory
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// What the file clipboard received, if anything
    pub fn clipboard(&self) -> Option<String> {
        std::fs::read_to_string(self.path().join("clip.txt")).ok()
    }

    /// Create a command configured for this context
    pub fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("promptdeck").expect("Binary not found");
        cmd.current_dir(self.path())
            .env("PROMPTDECK_CONFIG", &self.config_path)
            .env_remove("PROMPTDECK_TRANSITION_MS")
            .env_remove("PROMPTDECK_CLIPBOARD")
            .env_remove("PROMPTDECK_LOG_FILE")
            .env_remove("PROMPTDECK_LOG_LEVEL")
            .env_remove("RUST_LOG")
            .env("NO_COLOR", "1");
        cmd
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Assert helpers for CLI output
pub trait OutputAssertions {
    fn assert_success(&self);
    fn assert_stdout_contains(&self, text: &str);
    fn assert_stderr_contains(&self, text: &str);
    fn assert_exit_code(&self, code: i32);
    fn stdout_text(&self) -> String;
}

impl OutputAssertions for Output {
    fn assert_success(&self) {
        assert!(
            self.status.success(),
            "Command failed with status: {}\nstderr: {}",
            self.status,
            String::from_utf8_lossy(&self.stderr)
        );
    }

    fn assert_stdout_contains(&self, text: &str) {
        let stdout = String::from_utf8_lossy(&self.stdout);
        assert!(stdout.contains(text), "stdout did not contain '{text}'\nstdout: {stdout}");
    }

    fn assert_stderr_contains(&self, text: &str) {
        let stderr = String::from_utf8_lossy(&self.stderr);
        assert!(stderr.contains(text), "stderr did not contain '{text}'\nstderr: {stderr}");
    }

    fn assert_exit_code(&self, code: i32) {
        assert_eq!(
            self.status.code(),
            Some(code),
            "Expected exit code {code}, got {:?}\nstderr: {}",
            self.status.code(),
            String::from_utf8_lossy(&self.stderr)
        );
    }

    fn stdout_text(&self) -> String {
        String::from_utf8_lossy(&self.stdout).into_owned()
    }
}
