//! The interactive tool menu.
//!
//! Runs until the user declines to restart:
//!
//! ```text
//! select tools -> install each -> finalize -> restart? -> (select | bye)
//! ```
//!
//! Installers report their own steps as they go and return structured
//! results. Nothing an installer does can end the loop.

use crate::error::Result;
use crate::installers::{report_failure, InstallContext, InstallReport, InstallerRegistry};
use crate::shell::is_elevated;
use crate::ui::{Prompt, PromptOption, PromptType, UserInterface};

use super::dispatcher::{Command, CommandResult};

/// Prompt key for the tool menu (`PREPARE_PROMPT_TOOLS`).
pub const TOOLS_PROMPT_KEY: &str = "tools";

/// Prompt key for the restart question (`PREPARE_PROMPT_RESTART`).
pub const RESTART_PROMPT_KEY: &str = "restart";

/// Farewell printed when the loop ends.
pub const FAREWELL: &str = "Bye! 👋";

const ROOT_WARNING: &str =
    "Running as root. Homebrew refuses to run as root, so run prepare as a regular user.";

/// The default command: menu, installs, finalize, restart loop.
pub struct PromptCommand<'a> {
    registry: &'a InstallerRegistry,
    ctx: InstallContext<'a>,
    elevated: bool,
}

impl<'a> PromptCommand<'a> {
    /// Create the command for the current process.
    pub fn new(registry: &'a InstallerRegistry, ctx: InstallContext<'a>) -> Self {
        Self {
            registry,
            ctx,
            elevated: is_elevated(),
        }
    }

    /// Override root detection.
    pub fn with_elevated(mut self, elevated: bool) -> Self {
        self.elevated = elevated;
        self
    }

    /// Build the multi-select menu from current detection state.
    pub fn tools_prompt(&self) -> Prompt {
        let host = self.ctx.host;
        let options = self
            .registry
            .titles()
            .into_iter()
            .map(|title| PromptOption {
                label: title.to_string(),
                value: title.to_string(),
                hint: Some(self.registry.description_for(title, host)),
            })
            .collect();

        Prompt {
            key: TOOLS_PROMPT_KEY.to_string(),
            question: "Select some tools:".to_string(),
            prompt_type: PromptType::MultiSelect {
                options,
                defaults: self
                    .registry
                    .already_installed(host)
                    .into_iter()
                    .map(String::from)
                    .collect(),
            },
            default: None,
        }
    }

    fn restart_prompt() -> Prompt {
        Prompt {
            key: RESTART_PROMPT_KEY.to_string(),
            question: "Do you want to restart?".to_string(),
            prompt_type: PromptType::Confirm,
            default: Some("no".to_string()),
        }
    }

    fn select_tools(&self, ui: &mut dyn UserInterface) -> Vec<String> {
        match ui.prompt(&self.tools_prompt()) {
            Ok(result) => result.into_strings(),
            Err(e) => {
                tracing::warn!("Tool selection failed, treating as empty: {}", e);
                Vec::new()
            }
        }
    }

    fn install_selected(&self, selection: &[String], ui: &mut dyn UserInterface) {
        for title in selection {
            let Some(installer) = self.registry.find(title) else {
                tracing::debug!("Skipping unknown selection '{}'", title);
                continue;
            };
            let result = installer.install(&self.ctx, ui);
            report_install(installer.title(), result, ui);
        }
    }

    fn wants_restart(&self, ui: &mut dyn UserInterface) -> bool {
        match ui.prompt(&Self::restart_prompt()) {
            Ok(result) => result.as_bool().unwrap_or(false),
            Err(e) => {
                tracing::warn!("Restart prompt failed: {}", e);
                false
            }
        }
    }
}

impl Command for PromptCommand<'_> {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        if self.elevated {
            ui.warning(ROOT_WARNING);
        }

        loop {
            let selection = self.select_tools(ui);
            tracing::debug!("Selected: {:?}", selection);

            self.install_selected(&selection, ui);

            if let Err(e) = self.registry.finalize_all(&self.ctx, ui) {
                tracing::debug!("Finalize failed: {}", e);
            }

            if !self.wants_restart(ui) {
                break;
            }
        }

        ui.message(FAREWELL);
        Ok(CommandResult::success())
    }
}

/// Report the result of one installer.
///
/// Step failures were shown as they happened; only a failed install
/// command is left to report here.
pub fn report_install(title: &str, result: Result<InstallReport>, ui: &mut dyn UserInterface) {
    match result {
        Ok(report) if !report.is_clean() => {
            tracing::debug!(
                "{} installed with {} failed step(s)",
                report.title,
                report.step_failures.len()
            );
        }
        Ok(_) => {}
        Err(e) => report_failure(&format!("Error installing {}", title), &e, ui),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::HostConfig;
    use crate::error::PrepareError;
    use crate::installers::{
        Detection, Installer, PostInstallStep, StepAction, UNSUPPORTED_SHELL_WARNING,
    };
    use crate::shell::{CommandSpec, MockRunner};
    use crate::ui::MockUI;
    use tempfile::TempDir;

    fn fake(title: &str, var: &str, package: &str) -> Installer {
        Installer::new(
            title,
            &format!("This option will install {}.", title),
            Detection::env_var(var),
            CommandSpec::brew_install(package),
        )
    }

    fn registry() -> InstallerRegistry {
        InstallerRegistry::from_installers(vec![
            fake("Git", "HAS_GIT", "git"),
            fake("Go", "HAS_GO", "go"),
            fake("Docker", "HAS_DOCKER", "docker"),
        ])
    }

    fn host(home: &TempDir) -> HostConfig {
        HostConfig::new(Some(home.path().to_path_buf()))
            .with_var("SHELL", "/bin/zsh")
            .with_var("HAS_DOCKER", "1")
    }

    #[test]
    fn menu_lists_titles_hints_and_defaults() {
        let temp = TempDir::new().unwrap();
        let host = host(&temp);
        let runner = MockRunner::new();
        let registry = registry();
        let cmd = PromptCommand::new(&registry, InstallContext::new(&host, &runner));

        let prompt = cmd.tools_prompt();
        assert_eq!(prompt.key, "tools");
        assert_eq!(prompt.question, "Select some tools:");
        let PromptType::MultiSelect { options, defaults } = prompt.prompt_type else {
            panic!("Expected MultiSelect");
        };
        assert_eq!(defaults, vec!["Docker"]);
        let labels: Vec<&str> = options.iter().map(|o| o.label.as_str()).collect();
        assert_eq!(labels, vec!["Git", "Go", "Docker"]);
        assert_eq!(
            options[2].hint.as_deref(),
            Some("This option will install Docker. (Already installed)")
        );
        assert_eq!(
            options[0].hint.as_deref(),
            Some("This option will install Git.")
        );
    }

    #[test]
    fn installs_selection_in_selection_order() {
        let temp = TempDir::new().unwrap();
        let host = host(&temp);
        let runner = MockRunner::new();
        let registry = registry();
        let mut ui = MockUI::new();
        ui.set_prompt_response("tools", "Go,Docker,Git");

        let result = PromptCommand::new(&registry, InstallContext::new(&host, &runner))
            .with_elevated(false)
            .execute(&mut ui)
            .unwrap();

        assert_eq!(result.exit_code, 0);
        assert_eq!(
            runner.command_lines(),
            vec![
                "brew install go".to_string(),
                "brew install git".to_string(),
                format!(
                    "/bin/zsh -c \"source {}\"",
                    temp.path().join(".zshrc").display()
                ),
            ]
        );
        assert!(ui.has_message("Docker is already installed."));
        assert!(ui.has_success("All installations completed. Please restart your shell."));
        assert_eq!(ui.messages().last().map(String::as_str), Some(FAREWELL));
    }

    #[test]
    fn unknown_titles_are_skipped() {
        let temp = TempDir::new().unwrap();
        let host = host(&temp);
        let runner = MockRunner::new();
        let registry = registry();
        let mut ui = MockUI::new();
        ui.set_prompt_response("tools", "Rust,Git");

        PromptCommand::new(&registry, InstallContext::new(&host, &runner))
            .with_elevated(false)
            .execute(&mut ui)
            .unwrap();

        assert!(runner.ran("brew install git"));
        assert!(ui.errors().is_empty());
    }

    #[test]
    fn install_failure_is_reported_and_loop_continues() {
        let temp = TempDir::new().unwrap();
        let host = host(&temp);
        let runner = MockRunner::new();
        runner.fail_matching("brew install git");
        let registry = registry();
        let mut ui = MockUI::new();
        ui.set_prompt_response("tools", "Git,Go");

        let result = PromptCommand::new(&registry, InstallContext::new(&host, &runner))
            .with_elevated(false)
            .execute(&mut ui)
            .unwrap();

        assert_eq!(result.exit_code, 0);
        assert!(ui.has_error("Error installing Git"));
        assert!(runner.ran("brew install go"));
        assert!(ui.has_message(FAREWELL));
    }

    #[test]
    fn restart_loops_with_fresh_prompt() {
        let temp = TempDir::new().unwrap();
        let host = host(&temp);
        let runner = MockRunner::new();
        let registry = registry();
        let mut ui = MockUI::new();
        ui.queue_prompt_responses("tools", vec!["Git", "Go"]);
        ui.queue_prompt_responses("restart", vec!["yes", "no"]);

        PromptCommand::new(&registry, InstallContext::new(&host, &runner))
            .with_elevated(false)
            .execute(&mut ui)
            .unwrap();

        assert_eq!(
            ui.prompt_keys(),
            vec!["tools", "restart", "tools", "restart"]
        );
        assert!(runner.ran("brew install git"));
        assert!(runner.ran("brew install go"));
        let finalized = ui
            .successes()
            .iter()
            .filter(|s| s.contains("All installations"))
            .count();
        assert_eq!(finalized, 2);
    }

    #[test]
    fn restart_prompt_failure_terminates() {
        let temp = TempDir::new().unwrap();
        let host = host(&temp);
        let runner = MockRunner::new();
        let registry = registry();
        let mut ui = MockUI::new();
        ui.set_prompt_response("tools", "");
        ui.fail_prompt("restart");

        let result = PromptCommand::new(&registry, InstallContext::new(&host, &runner))
            .with_elevated(false)
            .execute(&mut ui)
            .unwrap();

        assert_eq!(result.exit_code, 0);
        assert_eq!(ui.prompt_keys(), vec!["tools", "restart"]);
        assert!(ui.has_message(FAREWELL));
    }

    #[test]
    fn tools_prompt_failure_installs_nothing() {
        let temp = TempDir::new().unwrap();
        let host = host(&temp);
        let runner = MockRunner::new();
        let registry = registry();
        let mut ui = MockUI::new();
        ui.fail_prompt("tools");

        PromptCommand::new(&registry, InstallContext::new(&host, &runner))
            .with_elevated(false)
            .execute(&mut ui)
            .unwrap();

        // Only the shell reload ran
        assert_eq!(runner.invocations().len(), 1);
        assert!(runner.ran("source"));
    }

    #[test]
    fn unsupported_shell_is_a_warning_not_an_error() {
        let temp = TempDir::new().unwrap();
        let host = HostConfig::new(Some(temp.path().to_path_buf()))
            .with_var("SHELL", "/usr/bin/fish");
        let runner = MockRunner::new();
        let iterm = fake("iTerm2", "HAS_ITERM", "iterm2").then(
            PostInstallStep::new(
                "Setting iTerm2 as the default terminal...",
                "iTerm2 set as the default terminal.",
                "Error setting iTerm2 as the default terminal",
            )
            .action(StepAction::append_to_profile("export TERMINAL=\"iterm\"\n")),
        );
        let registry = InstallerRegistry::from_installers(vec![iterm]);
        let mut ui = MockUI::new();
        ui.set_prompt_response("tools", "iTerm2");

        PromptCommand::new(&registry, InstallContext::new(&host, &runner))
            .with_elevated(false)
            .execute(&mut ui)
            .unwrap();

        assert!(ui.errors().is_empty());
        // One from the failed step, one from finalize
        assert_eq!(
            ui.warnings(),
            &[UNSUPPORTED_SHELL_WARNING, UNSUPPORTED_SHELL_WARNING]
        );
    }

    #[test]
    fn step_error_follows_its_announcement() {
        let temp = TempDir::new().unwrap();
        let bin = temp.path().join("bin");
        std::fs::create_dir_all(&bin).unwrap();
        let host = HostConfig::new(Some(temp.path().to_path_buf()))
            .with_var("PATH", bin.to_string_lossy().to_string())
            .with_var("SHELL", "/bin/bash")
            .with_var("USER", "dev");
        let runner = MockRunner::new();
        let registry = InstallerRegistry::builtin();
        let mut ui = MockUI::new();
        ui.set_prompt_response("tools", "Zsh");

        PromptCommand::new(&registry, InstallContext::new(&host, &runner))
            .with_elevated(false)
            .execute(&mut ui)
            .unwrap();

        let transcript = ui.transcript();
        let announce = transcript
            .iter()
            .position(|l| l == "message: Setting Zsh as the default shell...")
            .unwrap();
        assert!(transcript[announce + 1]
            .starts_with("error: Error setting Zsh as the default shell: "));
        assert_eq!(transcript[announce + 2], "message: Installing Oh My Zsh...");
        assert_eq!(ui.errors().len(), 1);
    }

    #[test]
    fn root_warning_shown_first() {
        let temp = TempDir::new().unwrap();
        let host = host(&temp);
        let runner = MockRunner::new();
        let registry = registry();
        let mut ui = MockUI::new();
        ui.set_prompt_response("tools", "");

        PromptCommand::new(&registry, InstallContext::new(&host, &runner))
            .with_elevated(true)
            .execute(&mut ui)
            .unwrap();

        assert!(ui.has_warning("Homebrew refuses to run as root"));
    }

    #[test]
    fn step_failures_are_reported_with_context() {
        let mut ui = MockUI::new();
        let result: Result<InstallReport> = Err(PrepareError::CommandFailed {
            command: "brew install go".to_string(),
            code: Some(1),
        });

        report_install("Go", result, &mut ui);

        assert_eq!(ui.errors().len(), 1);
        assert!(ui.errors()[0].starts_with("Error installing Go: "));
        assert!(ui.errors()[0].contains("brew install go"));
    }
}
