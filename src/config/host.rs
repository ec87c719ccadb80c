//! Snapshot of the host environment.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Environment variables that locate the login shell.
const SHELL_VAR: &str = "SHELL";

/// Immutable view of the process environment.
///
/// Captured once at startup. Detection and profile edits read from this
/// snapshot instead of the live process environment, which keeps them
/// deterministic and lets tests describe a host without touching globals.
///
/// # Example
///
/// ```
/// use prepare::config::HostConfig;
///
/// let host = HostConfig::new(Some("/home/dev".into()))
///     .with_var("SHELL", "/bin/zsh")
///     .with_var("USER", "dev");
///
/// assert_eq!(host.shell(), Some("/bin/zsh"));
/// assert_eq!(host.username(), Some("dev"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct HostConfig {
    home_dir: Option<PathBuf>,
    vars: HashMap<String, String>,
    cwd: PathBuf,
}

impl HostConfig {
    /// Create an empty host with the given home directory.
    pub fn new(home_dir: Option<PathBuf>) -> Self {
        Self {
            home_dir,
            vars: HashMap::new(),
            cwd: PathBuf::from("/"),
        }
    }

    /// Capture the current process environment.
    pub fn from_env() -> Self {
        Self {
            home_dir: dirs::home_dir(),
            vars: std::env::vars().collect(),
            cwd: std::env::current_dir().unwrap_or_else(|_| PathBuf::from("/")),
        }
    }

    /// Set an environment variable in the snapshot.
    pub fn with_var(mut self, key: &str, value: impl Into<String>) -> Self {
        self.vars.insert(key.to_string(), value.into());
        self
    }

    /// The user's home directory, if known.
    pub fn home_dir(&self) -> Option<&Path> {
        self.home_dir.as_deref()
    }

    /// Look up an environment variable.
    pub fn var(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    /// Whether an environment variable is set (even to an empty string).
    pub fn has_var(&self, key: &str) -> bool {
        self.vars.contains_key(key)
    }

    /// The login shell path from `SHELL`.
    pub fn shell(&self) -> Option<&str> {
        self.var(SHELL_VAR)
    }

    /// The current user name from `USER`, falling back to `LOGNAME`.
    pub fn username(&self) -> Option<&str> {
        self.var("USER")
            .or_else(|| self.var("LOGNAME"))
            .filter(|name| !name.is_empty())
    }

    /// Resolve a binary against the snapshot's `PATH`.
    pub fn find_binary(&self, name: &str) -> Option<PathBuf> {
        let path = self.var("PATH")?;
        match which::which_in(name, Some(path), &self.cwd) {
            Ok(found) => Some(found),
            Err(e) => {
                tracing::trace!("{} not found on PATH: {}", name, e);
                None
            }
        }
    }
}
