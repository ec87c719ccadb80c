//! Shell configuration reload.
//!
//! After profiles are edited, the profile is re-sourced through the user's
//! own shell so that syntax errors surface immediately. This cannot change
//! the environment of the terminal that launched prepare; users are still
//! told to restart their shell.

use std::path::PathBuf;

use crate::config::HostConfig;
use crate::error::{PrepareError, Result};

use super::command::{CommandRunner, CommandSpec};
use super::platform::profile_path;

/// How to reload the user's shell configuration.
///
/// # Example
///
/// ```
/// use prepare::config::HostConfig;
/// use prepare::shell::ShellReload;
///
/// let host = HostConfig::new(Some("/home/dev".into())).with_var("SHELL", "/bin/zsh");
/// let reload = ShellReload::detect(&host).unwrap();
/// assert_eq!(reload.command().to_string(), "/bin/zsh -c \"source /home/dev/.zshrc\"");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellReload {
    /// Shell executable from `SHELL`.
    pub shell: String,
    /// Profile file that gets sourced.
    pub config_file: PathBuf,
}

impl ShellReload {
    /// Resolve the shell and profile to reload.
    pub fn detect(host: &HostConfig) -> Result<Self> {
        let config_file = profile_path(host)?;
        let shell = host
            .shell()
            .ok_or_else(|| PrepareError::UnsupportedShell {
                shell: String::new(),
            })?
            .to_string();
        Ok(Self { shell, config_file })
    }

    /// The command that re-sources the profile.
    pub fn command(&self) -> CommandSpec {
        CommandSpec::shell(
            self.shell.clone(),
            format!("source {}", self.config_file.display()),
        )
    }
}

/// Re-source the user's profile through their shell.
///
/// Returns the profile that was reloaded.
pub fn reload_shell_configuration(
    host: &HostConfig,
    runner: &dyn CommandRunner,
) -> Result<PathBuf> {
    let reload = ShellReload::detect(host)?;
    runner.run(&reload.command())?;
    Ok(reload.config_file)
}
