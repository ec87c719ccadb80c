//! Error types for prepare operations.
//!
//! This module defines [`PrepareError`], the error type returned by
//! installers, shell helpers and commands, and a [`Result`] type alias.
//!
//! # Error Handling Strategy
//!
//! - Installers and their steps return `PrepareError` instead of printing
//! - The interactive loop reports errors and keeps going
//! - Only dispatch-level failures reach `main` and change the exit code

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for prepare operations.
#[derive(Debug, Error)]
pub enum PrepareError {
    /// A child process could not be spawned or exited unsuccessfully.
    ///
    /// `code` is `None` when the process never started or was killed by a signal.
    #[error("Command failed with exit code {code:?}: {command}")]
    CommandFailed { command: String, code: Option<i32> },

    /// The `SHELL` in use has no known profile file.
    #[error("Unsupported shell '{shell}'")]
    UnsupportedShell { shell: String },

    /// The user's home directory could not be determined.
    #[error("Could not determine the user's home directory")]
    HomeDirUnavailable,

    /// The current user name could not be determined.
    #[error("Could not determine the current user")]
    UserUnavailable,

    /// A binary needed by a step is not on PATH.
    #[error("'{tool}' was not found on PATH")]
    ToolNotFound { tool: String },

    /// Appending to a shell profile failed.
    #[error("Failed to write {path}: {source}")]
    ProfileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PrepareError {
    /// Whether this error means the user's shell is not one we configure.
    ///
    /// These are reported as warnings rather than errors.
    pub fn is_unsupported_shell(&self) -> bool {
        matches!(self, Self::UnsupportedShell { .. })
    }
}

/// Result type alias for prepare operations.
pub type Result<T> = std::result::Result<T, PrepareError>;
