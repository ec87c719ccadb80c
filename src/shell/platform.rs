//! Platform-specific shell detection.

use std::path::PathBuf;

use crate::config::HostConfig;
use crate::error::{PrepareError, Result};

/// Shells whose profiles prepare manages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellType {
    Bash,
    Zsh,
    /// fish, sh, or anything else.
    Unknown,
}

impl ShellType {
    /// Parse shell type from the executable path in `SHELL`.
    ///
    /// Matches on the file name so `/opt/homebrew/bin/zsh` and
    /// `/usr/local/bin/bash5` are both recognized.
    pub fn from_executable(exe: &str) -> Self {
        let name = std::path::Path::new(exe)
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("")
            .to_lowercase();

        if name.contains("zsh") {
            ShellType::Zsh
        } else if name.contains("bash") {
            ShellType::Bash
        } else {
            ShellType::Unknown
        }
    }

    /// Profile file name relative to the home directory.
    ///
    pub fn profile_file_name(&self) -> Option<&'static str> {
        match self {
            ShellType::Zsh => Some(".zshrc"),
            ShellType::Bash => Some(".bashrc"),
            ShellType::Unknown => None,
        }
    }
}

/// Resolve the profile file for the user's shell.
///
/// Fails with [`PrepareError::UnsupportedShell`] for anything other than
/// zsh or bash.
pub fn profile_path(host: &HostConfig) -> Result<PathBuf> {
    let shell = host.shell().unwrap_or_default();
    let file = ShellType::from_executable(shell)
        .profile_file_name()
        .ok_or_else(|| PrepareError::UnsupportedShell {
            shell: shell.to_string(),
        })?;
    let home = host.home_dir().ok_or(PrepareError::HomeDirUnavailable)?;
    Ok(home.join(file))
}

/// Check if running in a CI environment.
///
/// Used to force non-interactive mode in `main()`. Checks common CI
/// environment variables: `CI`, `GITHUB_ACTIONS`, `GITLAB_CI`, `CIRCLECI`,
/// `TRAVIS`, `JENKINS_URL`.
pub fn is_ci() -> bool {
    std::env::var("CI").is_ok()
        || std::env::var("GITHUB_ACTIONS").is_ok()
        || std::env::var("GITLAB_CI").is_ok()
        || std::env::var("CIRCLECI").is_ok()
        || std::env::var("TRAVIS").is_ok()
        || std::env::var("JENKINS_URL").is_ok()
}

/// Check if running as root.
pub fn is_elevated() -> bool {
    #[cfg(unix)]
    {
        // SAFETY: geteuid() is a simple syscall that returns the effective user ID
        unsafe { libc::geteuid() == 0 }
    }

    #[cfg(not(unix))]
    {
        false
    }
}
