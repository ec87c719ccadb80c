//! The `prepare version` command.

use crate::error::Result;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// Version string printed by `prepare version`.
pub fn version_string() -> String {
    format!("prepare v{}", env!("CARGO_PKG_VERSION"))
}

/// Prints the version and exits.
pub struct VersionCommand;

impl Command for VersionCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        ui.message(&version_string());
        Ok(CommandResult::success())
    }
}
