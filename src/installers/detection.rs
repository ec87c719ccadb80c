//! Presence checks for installable tools.

use std::path::Path;

use crate::config::HostConfig;

/// How to tell whether a tool is already installed.
///
/// Every check reads the host snapshot or the filesystem and has no side
/// effects, so it can be re-evaluated each time a menu is rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Detection {
    /// A binary resolvable on `PATH`.
    OnPath(String),

    /// An environment variable that is set (possibly empty).
    EnvVar(String),

    /// An absolute filesystem path that exists.
    PathExists(String),

    /// Any of the nested checks passing is sufficient.
    Any(Vec<Detection>),
}

impl Detection {
    /// Binary lookup on `PATH`.
    pub fn on_path(binary: &str) -> Self {
        Self::OnPath(binary.to_string())
    }

    /// Environment variable presence.
    pub fn env_var(name: &str) -> Self {
        Self::EnvVar(name.to_string())
    }

    /// Filesystem existence.
    pub fn path_exists(path: &str) -> Self {
        Self::PathExists(path.to_string())
    }

    /// Evaluate the check against the host.
    ///
    /// Lookup failures of any kind count as "not installed".
    pub fn is_satisfied(&self, host: &HostConfig) -> bool {
        let found = match self {
            Detection::OnPath(binary) => host.find_binary(binary).is_some(),
            Detection::EnvVar(name) => host.has_var(name),
            Detection::PathExists(path) => Path::new(path).exists(),
            Detection::Any(checks) => checks.iter().any(|c| c.is_satisfied(host)),
        };

        if !matches!(self, Detection::Any(_)) {
            tracing::debug!("Detection {:?}: {}", self, found);
        }
        found
    }
}
