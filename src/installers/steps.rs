//! Post-install configuration steps.
//!
//! A [`PostInstallStep`] is a user-visible unit of work ("Installing Zsh
//! plugins...") made of one or more [`StepAction`]s. Actions inside a step
//! run in order and the first failure aborts the step. Steps themselves are
//! independent: the installer keeps going after a failed step.

use std::path::PathBuf;

use crate::error::{PrepareError, Result};
use crate::shell::{
    append_block, contains_marker, profile_path, reload_shell_configuration, CommandSpec,
};

use super::InstallContext;

/// Which shell profile a block is appended to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileTarget {
    /// The profile of the shell in `SHELL` (`.zshrc` or `.bashrc`).
    Detected,

    /// A file name relative to the home directory, regardless of `SHELL`.
    Fixed(String),
}

/// A single side effect performed after a successful install.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepAction {
    /// Run a command to completion.
    Run(CommandSpec),

    /// Append a text block to a shell profile.
    AppendToProfile {
        target: ProfileTarget,
        block: String,
        /// Skip the append when the profile already contains this substring.
        skip_if_contains: Option<String>,
    },

    /// Make an installed binary the user's login shell via `chsh`.
    SetDefaultShell { binary: String },

    /// Add the current user to a local group via `dscl`.
    AddUserToGroup { group: String },

    /// Clone Oh My Zsh plugin repositories into `$ZSH_CUSTOM/plugins`.
    CloneZshPlugins { repositories: Vec<String> },

    /// Re-source the user's shell profile.
    ReloadShell,
}

impl StepAction {
    /// Append `block` to the detected profile.
    pub fn append_to_profile(block: &str) -> Self {
        Self::AppendToProfile {
            target: ProfileTarget::Detected,
            block: block.to_string(),
            skip_if_contains: None,
        }
    }

    /// Append `block` to the detected profile unless it mentions `marker`.
    pub fn append_unless_present(block: &str, marker: &str) -> Self {
        Self::AppendToProfile {
            target: ProfileTarget::Detected,
            block: block.to_string(),
            skip_if_contains: Some(marker.to_string()),
        }
    }

    /// Append `block` to `~/<file>`.
    pub fn append_to_file(file: &str, block: &str) -> Self {
        Self::AppendToProfile {
            target: ProfileTarget::Fixed(file.to_string()),
            block: block.to_string(),
            skip_if_contains: None,
        }
    }

    /// Perform the action.
    pub fn run(&self, ctx: &InstallContext<'_>) -> Result<()> {
        match self {
            StepAction::Run(spec) => ctx.runner.run(spec),
            StepAction::AppendToProfile {
                target,
                block,
                skip_if_contains,
            } => {
                let path = match target {
                    ProfileTarget::Detected => profile_path(ctx.host)?,
                    ProfileTarget::Fixed(file) => ctx
                        .host
                        .home_dir()
                        .ok_or(PrepareError::HomeDirUnavailable)?
                        .join(file),
                };
                if let Some(marker) = skip_if_contains {
                    if contains_marker(&path, marker) {
                        tracing::debug!("{} already mentions {}", path.display(), marker);
                        return Ok(());
                    }
                }
                append_block(&path, block)
            }
            StepAction::SetDefaultShell { binary } => {
                let shell = ctx
                    .host
                    .find_binary(binary)
                    .ok_or_else(|| PrepareError::ToolNotFound {
                        tool: binary.clone(),
                    })?;
                let user = ctx.host.username().ok_or(PrepareError::UserUnavailable)?;
                ctx.runner.run(
                    &CommandSpec::new("chsh")
                        .arg("-s")
                        .arg(shell.to_string_lossy())
                        .arg(user),
                )
            }
            StepAction::AddUserToGroup { group } => {
                let user = ctx.host.username().ok_or(PrepareError::UserUnavailable)?;
                ctx.runner.run(
                    &CommandSpec::new("dscl")
                        .args([".", "-append"])
                        .arg(format!("/Groups/{}", group))
                        .args(["GroupMembership", user]),
                )
            }
            StepAction::CloneZshPlugins { repositories } => {
                let plugins = zsh_custom_dir(ctx)?.join("plugins");
                for url in repositories {
                    let dest = plugins.join(repository_name(url));
                    ctx.runner.run(
                        &CommandSpec::new("git")
                            .args(["clone", url.as_str()])
                            .arg(dest.to_string_lossy()),
                    )?;
                }
                Ok(())
            }
            StepAction::ReloadShell => reload_shell_configuration(ctx.host, ctx.runner).map(|_| ()),
        }
    }
}

/// `$ZSH_CUSTOM`, or `~/.oh-my-zsh/custom` when unset or empty.
fn zsh_custom_dir(ctx: &InstallContext<'_>) -> Result<PathBuf> {
    match ctx.host.var("ZSH_CUSTOM").filter(|v| !v.is_empty()) {
        Some(custom) => Ok(PathBuf::from(custom)),
        None => Ok(ctx
            .host
            .home_dir()
            .ok_or(PrepareError::HomeDirUnavailable)?
            .join(".oh-my-zsh")
            .join("custom")),
    }
}

/// Directory name a repository clones into.
fn repository_name(url: &str) -> &str {
    let last = url.trim_end_matches('/').rsplit('/').next().unwrap_or(url);
    last.strip_suffix(".git").unwrap_or(last)
}

/// A user-visible post-install step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostInstallStep {
    announce: String,
    success: String,
    failure: String,
    actions: Vec<StepAction>,
}

impl PostInstallStep {
    /// Create a step with its progress, success and failure messages.
    pub fn new(announce: &str, success: &str, failure: &str) -> Self {
        Self {
            announce: announce.to_string(),
            success: success.to_string(),
            failure: failure.to_string(),
            actions: Vec::new(),
        }
    }

    /// Add an action to the step.
    pub fn action(mut self, action: StepAction) -> Self {
        self.actions.push(action);
        self
    }

    /// Message shown before the step runs.
    pub fn announce(&self) -> &str {
        &self.announce
    }

    /// Message shown when every action succeeded.
    pub fn success(&self) -> &str {
        &self.success
    }

    /// Prefix used when reporting a failure.
    pub fn failure(&self) -> &str {
        &self.failure
    }

    /// The step's actions, in order.
    pub fn actions(&self) -> &[StepAction] {
        &self.actions
    }

    /// Run all actions, stopping at the first failure.
    pub fn run(&self, ctx: &InstallContext<'_>) -> Result<()> {
        for action in &self.actions {
            action.run(ctx)?;
        }
        Ok(())
    }
}
