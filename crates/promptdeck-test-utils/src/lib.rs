//! Test utilities for PromptDeck crates.

use std::path::PathBuf;
use tempfile::TempDir;

/// A template file with one fixed-id and one generated-id template.
pub const SAMPLE_TEMPLATES_YAML: &str = r#"templates:
  - id: haiku
    name: Haiku
    text: Write a haiku about (subject) in (season).
    defaults:
      subject: the sea
      season: winter
  - name: Limerick
    text: A limerick about (topic)
    defaults:
      topic: a cat
"#;

/// Creates a temporary directory that is cleaned up on drop.
pub fn temp_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

/// Creates a temporary file with given name and content.
pub fn temp_file(name: &str, content: &str) -> (TempDir, PathBuf) {
    let dir = temp_dir();
    let path = write_file(&dir, name, content);
    (dir, path)
}

/// Writes `content` to `name` inside `dir`, creating parent directories.
pub fn write_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("Failed to create parent dir");
    }
    std::fs::write(&path, content).expect("Failed to write temp file");
    path
}

/// Assert that a Result is Ok and return the value.
#[macro_export]
macro_rules! assert_ok {
    ($expr:expr) => {
        match $expr {
            Ok(v) => v,
            Err(e) => panic!("Expected Ok, got Err: {:?}", e),
        }
    };
}

/// Assert that a Result is Err and return the error.
#[macro_export]
macro_rules! assert_err {
    ($expr:expr) => {
        match $expr {
            Ok(v) => panic!("Expected Err, got Ok: {:?}", v),
            Err(e) => e,
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_temp_dir_creation() {
        let dir = temp_dir();
        assert!(dir.path().is_dir());
    }

    #[test]
    fn test_write_file_creates_parents() {
        let dir = temp_dir();
        let path = write_file(&dir, ".promptdeck/config.yaml", "deck: {}\n");
        assert!(path.is_file());
        assert!(path.ends_with(".promptdeck/config.yaml"));
    }

    #[test]
    fn test_assert_macros() {
        let ok: Result<u8, String> = Ok(3);
        assert_eq!(assert_ok!(ok), 3);

        let err: Result<u8, String> = Err("boom".into());
        assert_eq!(assert_err!(err), "boom");
    }

    proptest! {
        #[test]
        fn test_temp_file_content_roundtrip(content in "\\PC*") {
            let (_dir, path) = temp_file("content.txt", &content);
            let read_content = std::fs::read_to_string(&path).unwrap();
            prop_assert_eq!(content, read_content);
        }
    }
}
