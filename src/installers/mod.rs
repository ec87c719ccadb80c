//! Tool installers.
//!
//! Every tool in the menu is described by one [`Installer`] record: a
//! title, a [`Detection`] strategy, a description, the install command and
//! an ordered list of [`PostInstallStep`]s. The [`InstallerRegistry`] holds
//! them in menu order.
//!
//! # Modules
//!
//! - [`catalog`] - The built-in installers
//! - [`detection`] - Presence checks
//! - [`registry`] - Ordered lookup and finalization
//! - [`steps`] - Post-install configuration steps

pub mod catalog;
pub mod detection;
pub mod registry;
pub mod steps;

pub use detection::Detection;
pub use registry::InstallerRegistry;
pub use steps::{PostInstallStep, ProfileTarget, StepAction};

use crate::config::HostConfig;
use crate::error::{PrepareError, Result};
use crate::shell::{CommandRunner, CommandSpec};
use crate::ui::UserInterface;

/// Suffix appended to descriptions of tools that are already present.
pub const ALREADY_INSTALLED_SUFFIX: &str = " (Already installed)";

/// Warning shown whenever a shell profile cannot be chosen.
pub const UNSUPPORTED_SHELL_WARNING: &str =
    "Unsupported shell detected. Please update your shell configuration manually.";

/// Show a failure, with unsupported shells downgraded to a warning.
pub fn report_failure(context: &str, error: &PrepareError, ui: &mut dyn UserInterface) {
    if error.is_unsupported_shell() {
        ui.warning(UNSUPPORTED_SHELL_WARNING);
    } else {
        ui.error(&format!("{}: {}", context, error));
    }
}

/// What installers need from the outside world.
#[derive(Clone, Copy)]
pub struct InstallContext<'a> {
    /// Environment snapshot used for detection and profile paths.
    pub host: &'a HostConfig,
    /// Spawns the install and post-install commands.
    pub runner: &'a dyn CommandRunner,
}

impl<'a> InstallContext<'a> {
    /// Bundle a host snapshot with a command runner.
    pub fn new(host: &'a HostConfig, runner: &'a dyn CommandRunner) -> Self {
        Self { host, runner }
    }
}

/// Whether `install` had anything to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallOutcome {
    /// The tool was detected; nothing ran.
    AlreadyInstalled,
    /// The install command succeeded.
    Installed,
}

/// A post-install step that did not complete.
#[derive(Debug)]
pub struct StepFailure {
    /// The step's failure message, e.g. "Error configuring Docker".
    pub step: String,
    /// Why it failed.
    pub error: PrepareError,
}

/// Result of a completed `install` call.
#[derive(Debug)]
pub struct InstallReport {
    pub title: String,
    pub outcome: InstallOutcome,
    /// Post-install steps that failed, in execution order. Each one has
    /// already been reported.
    pub step_failures: Vec<StepFailure>,
}

impl InstallReport {
    fn new(title: &str, outcome: InstallOutcome) -> Self {
        Self {
            title: title.to_string(),
            outcome,
            step_failures: Vec::new(),
        }
    }

    /// True when the tool was installed and every step succeeded, or when
    /// it was already present.
    pub fn is_clean(&self) -> bool {
        self.step_failures.is_empty()
    }
}

/// A tool that can be detected and installed.
///
/// # Example
///
/// ```
/// use prepare::config::HostConfig;
/// use prepare::installers::{Detection, Installer};
/// use prepare::shell::CommandSpec;
///
/// let git = Installer::new(
///     "Git",
///     "This option will install Git.",
///     Detection::on_path("git"),
///     CommandSpec::brew_install("git"),
/// );
///
/// let host = HostConfig::new(None);
/// assert!(!git.is_already_installed(&host));
/// assert_eq!(git.description(&host), "This option will install Git.");
/// ```
#[derive(Debug, Clone)]
pub struct Installer {
    title: String,
    description: String,
    detection: Detection,
    install: CommandSpec,
    post_install: Vec<PostInstallStep>,
}

impl Installer {
    /// Create an installer with no post-install steps.
    pub fn new(title: &str, description: &str, detection: Detection, install: CommandSpec) -> Self {
        Self {
            title: title.to_string(),
            description: description.to_string(),
            detection,
            install,
            post_install: Vec::new(),
        }
    }

    /// Add a post-install step.
    pub fn then(mut self, step: PostInstallStep) -> Self {
        self.post_install.push(step);
        self
    }

    /// Unique display title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// The command that installs the tool.
    pub fn install_command(&self) -> &CommandSpec {
        &self.install
    }

    /// Steps run after a successful install.
    pub fn post_install_steps(&self) -> &[PostInstallStep] {
        &self.post_install
    }

    /// Whether the tool is present on the host right now.
    pub fn is_already_installed(&self, host: &HostConfig) -> bool {
        self.detection.is_satisfied(host)
    }

    /// Menu description, suffixed when the tool is already present.
    pub fn description(&self, host: &HostConfig) -> String {
        if self.is_already_installed(host) {
            format!("{}{}", self.description, ALREADY_INSTALLED_SUFFIX)
        } else {
            self.description.clone()
        }
    }

    /// Install the tool and run its post-install steps.
    ///
    /// Does nothing beyond an acknowledgement when the tool is already
    /// present. A failed install command is returned as an error and no
    /// steps run. A failed step is reported right after its announcement
    /// and collected in the report; later steps still run.
    pub fn install(
        &self,
        ctx: &InstallContext<'_>,
        ui: &mut dyn UserInterface,
    ) -> Result<InstallReport> {
        ui.message(&format!("Checking {} installation...", self.title));

        if self.is_already_installed(ctx.host) {
            ui.message(&format!("{} is already installed.", self.title));
            return Ok(InstallReport::new(&self.title, InstallOutcome::AlreadyInstalled));
        }

        ui.message(&format!("{} is not installed. Installing...", self.title));

        let mut spinner = ui.start_spinner(&format!("Installing {}", self.title));
        if let Err(e) = ctx.runner.run(&self.install) {
            spinner.finish_error(&format!("Error installing {}", self.title));
            return Err(e);
        }
        spinner.finish_success(&format!("{} installed successfully.", self.title));

        let mut report = InstallReport::new(&self.title, InstallOutcome::Installed);
        for step in &self.post_install {
            ui.message(step.announce());
            match step.run(ctx) {
                Ok(()) => ui.success(step.success()),
                Err(error) => {
                    tracing::debug!("{} step failed: {}", self.title, error);
                    report_failure(step.failure(), &error, ui);
                    report.step_failures.push(StepFailure {
                        step: step.failure().to_string(),
                        error,
                    });
                }
            }
        }

        Ok(report)
    }
}
