//! Shell profile edits.
//!
//! Profiles are only ever appended to. The one idempotency check available
//! is [`contains_marker`], which callers use before appending blocks that
//! must not be duplicated.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use crate::error::{PrepareError, Result};

/// Append `block` to the profile at `path`, creating the file if needed.
pub fn append_block(path: &Path, block: &str) -> Result<()> {
    let write_err = |source| PrepareError::ProfileWrite {
        path: path.to_path_buf(),
        source,
    };

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(write_err)?;
    file.write_all(block.as_bytes()).map_err(write_err)?;

    tracing::debug!("Appended {} bytes to {}", block.len(), path.display());
    Ok(())
}

/// Whether the profile at `path` already mentions `marker`.
///
/// A missing or unreadable profile counts as not containing it.
pub fn contains_marker(path: &Path, marker: &str) -> bool {
    std::fs::read_to_string(path)
        .map(|content| content.contains(marker))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn append_creates_missing_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(".zshrc");

        append_block(&path, "export A=1\n").unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "export A=1\n");
    }

    #[test]
    fn append_keeps_existing_content() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(".bashrc");
        std::fs::write(&path, "alias ll='ls -l'\n").unwrap();

        append_block(&path, "export B=2\n").unwrap();
        append_block(&path, "export B=2\n").unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("alias ll='ls -l'\n"));
        assert_eq!(content.matches("export B=2").count(), 2);
    }

    #[test]
    fn append_into_missing_directory_fails() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("missing").join(".zshrc");

        let err = append_block(&path, "x").unwrap_err();
        assert!(matches!(err, PrepareError::ProfileWrite { .. }));
    }

    #[test]
    fn contains_marker_checks_content() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(".zshrc");
        std::fs::write(&path, "eval \"$(pyenv init -)\"\n").unwrap();

        assert!(contains_marker(&path, "pyenv"));
        assert!(!contains_marker(&path, "nvm"));
    }

    #[test]
    fn contains_marker_missing_file() {
        let temp = TempDir::new().unwrap();
        assert!(!contains_marker(&temp.path().join(".zshrc"), "pyenv"));
    }
}
