//! Installer registry.
//!
//! Holds the installers in menu order. The registry is built once in
//! `main` and passed by reference; tests build their own from arbitrary
//! installer lists.

use crate::config::HostConfig;
use crate::error::Result;
use crate::shell::reload_shell_configuration;
use crate::ui::UserInterface;

use super::catalog::builtin_installers;
use super::{InstallContext, Installer, UNSUPPORTED_SHELL_WARNING};

/// Message shown after a successful shell reload.
pub const ALL_DONE_MESSAGE: &str = "All installations completed. Please restart your shell.";

/// Ordered collection of installers.
///
/// # Example
///
/// ```
/// use prepare::config::HostConfig;
/// use prepare::installers::InstallerRegistry;
///
/// let registry = InstallerRegistry::builtin();
/// assert_eq!(registry.titles()[0], "Homebrew");
/// assert!(registry.find("Docker").is_some());
/// assert!(registry.find("docker").is_none());
/// ```
#[derive(Debug, Clone)]
pub struct InstallerRegistry {
    installers: Vec<Installer>,
}

impl InstallerRegistry {
    /// The built-in tool list.
    pub fn builtin() -> Self {
        Self::from_installers(builtin_installers())
    }

    /// Build a registry from any installer list.
    ///
    /// Titles must be unique; later duplicates are dropped. Titles
    /// containing a comma are dropped too, since selections travel as
    /// comma-separated lists in `PREPARE_PROMPT_TOOLS`.
    pub fn from_installers(installers: Vec<Installer>) -> Self {
        let mut kept: Vec<Installer> = Vec::with_capacity(installers.len());
        for installer in installers {
            if installer.title().contains(',') {
                tracing::warn!(
                    "Ignoring installer '{}': title contains a comma",
                    installer.title()
                );
                continue;
            }
            if kept.iter().any(|k| k.title() == installer.title()) {
                tracing::warn!("Ignoring duplicate installer '{}'", installer.title());
                continue;
            }
            kept.push(installer);
        }
        Self { installers: kept }
    }

    /// Iterate over installers in menu order.
    pub fn iter(&self) -> impl Iterator<Item = &Installer> {
        self.installers.iter()
    }

    /// Non-empty titles in menu order.
    pub fn titles(&self) -> Vec<&str> {
        self.installers
            .iter()
            .map(Installer::title)
            .filter(|t| !t.is_empty())
            .collect()
    }

    /// Find an installer by exact title.
    pub fn find(&self, title: &str) -> Option<&Installer> {
        self.installers.iter().find(|i| i.title() == title)
    }

    /// Menu description for a title, or an empty string if unknown.
    pub fn description_for(&self, title: &str, host: &HostConfig) -> String {
        self.find(title)
            .map(|i| i.description(host))
            .unwrap_or_default()
    }

    /// Titles of installers currently detected on the host, in menu order.
    pub fn already_installed(&self, host: &HostConfig) -> Vec<&str> {
        self.installers
            .iter()
            .filter(|i| !i.title().is_empty() && i.is_already_installed(host))
            .map(Installer::title)
            .collect()
    }

    /// Reload the user's shell profile and report the outcome.
    ///
    /// The result is returned for inspection; it has already been shown
    /// to the user.
    pub fn finalize_all(&self, ctx: &InstallContext<'_>, ui: &mut dyn UserInterface) -> Result<()> {
        match reload_shell_configuration(ctx.host, ctx.runner) {
            Ok(path) => {
                tracing::debug!("Reloaded {}", path.display());
                ui.success(ALL_DONE_MESSAGE);
                Ok(())
            }
            Err(e) if e.is_unsupported_shell() => {
                ui.warning(UNSUPPORTED_SHELL_WARNING);
                Err(e)
            }
            Err(e) => {
                ui.error(&format!("Error reloading shell configuration: {}", e));
                Err(e)
            }
        }
    }
}
