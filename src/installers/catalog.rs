//! Built-in installers, in menu order.

use std::path::Path;

use crate::shell::CommandSpec;

use super::{Detection, Installer, PostInstallStep, StepAction};

const HOMEBREW_INSTALL_SCRIPT: &str =
    "$(curl -fsSL https://raw.githubusercontent.com/Homebrew/install/HEAD/install.sh)";

const OH_MY_ZSH_INSTALL_SCRIPT: &str =
    "$(curl -fsSL https://raw.github.com/ohmyzsh/ohmyzsh/master/tools/install.sh)";

/// Present on Apple silicon Macs with Rosetta 2 installed.
const ROSETTA_RUNTIME: &str = "/Library/Apple/usr/libexec/oah/libRosettaRuntime";

const ZSH_PLUGINS: [&str; 2] = [
    "https://github.com/zsh-users/zsh-autosuggestions.git",
    "https://github.com/zsh-users/zsh-syntax-highlighting.git",
];

const ITERM_BLOCK: &str = "\nexport TERMINAL=\"iterm\"\n";

const ZSHRC_BLOCK: &str = r#"
# Zsh plugins
plugins=(
    git
    docker
    nvm
    go
    zsh-autosuggestions
    zsh-syntax-highlighting
)

alias zc="code ~/.zshrc"
alias rr="source ~/.zshrc && clear && echo 'Zsh configuration reloaded.'"
"#;

const NVM_BLOCK: &str = r#"

# NVM initialization script
export NVM_DIR="$HOME/.nvm"
[ -s "$NVM_DIR/nvm.sh" ] && \. "$NVM_DIR/nvm.sh"  # This loads nvm
[ -s "$NVM_DIR/bash_completion" ] && \. "$NVM_DIR/bash_completion"  # This loads nvm bash_completion
"#;

const PYENV_BLOCK: &str = r#"

# Pyenv
export PYENV_ROOT="$HOME/.pyenv"
[[ -d $PYENV_ROOT/bin ]] && export PATH="$PYENV_ROOT/bin:$PATH"
eval "$(pyenv init -)"
eval "$(pyenv init --path)"
"#;

const NODE_LTS_SCRIPT: &str = "source $(brew --prefix nvm)/nvm.sh && nvm install --lts";

const PYTHON_LATEST_SCRIPT: &str = "pyenv install $(pyenv install --list | grep -v - | tail -1) \
     && pyenv global $(pyenv install --list | grep -v - | tail -1)";

/// All built-in installers in menu order.
pub fn builtin_installers() -> Vec<Installer> {
    vec![
        homebrew(),
        iterm2(),
        zsh(),
        vscode(),
        brew_only("Git", "This option will install Git.", "git", "git"),
        brew_only(
            "Go",
            "This option will install latest version of Go.",
            "go",
            "go",
        ),
        brew_only(
            ".NET SDK",
            "This option will install latest version of .NET SDK.",
            "dotnet",
            "dotnet-sdk",
        ),
        nvm(),
        python(),
        docker(),
    ]
}

/// Architecture Homebrew should install for.
///
/// Apple silicon with Rosetta installed gets the Intel build.
pub fn homebrew_arch(arch: &str, rosetta_installed: bool) -> &str {
    match arch {
        "aarch64" | "arm64" if rosetta_installed => "x86_64",
        "aarch64" | "arm64" => "arm64",
        other => other,
    }
}

fn brew_only(title: &str, description: &str, binary: &str, package: &str) -> Installer {
    Installer::new(
        title,
        description,
        Detection::on_path(binary),
        CommandSpec::brew_install(package),
    )
}

fn homebrew() -> Installer {
    let arch = homebrew_arch(std::env::consts::ARCH, Path::new(ROSETTA_RUNTIME).exists());
    Installer::new(
        "Homebrew",
        "This option will install latest version of Homebrew.",
        Detection::on_path("brew"),
        CommandSpec::shell("/bin/bash", HOMEBREW_INSTALL_SCRIPT).env("HOMEBREW_ARCH", arch),
    )
}

fn iterm2() -> Installer {
    Installer::new(
        "iTerm2",
        "This option will install iTerm2 and set it as the default terminal emulator.",
        Detection::Any(vec![
            Detection::path_exists("/Applications/iTerm.app"),
            Detection::on_path("iterm"),
        ]),
        CommandSpec::brew_install("iterm2"),
    )
    .then(
        PostInstallStep::new(
            "Setting iTerm2 as the default terminal...",
            "iTerm2 set as the default terminal. Please restart your shell.",
            "Error setting iTerm2 as the default terminal",
        )
        .action(StepAction::append_to_profile(ITERM_BLOCK)),
    )
}

fn zsh() -> Installer {
    Installer::new(
        "Zsh",
        "This option will install Zsh and set it as the default shell.",
        Detection::on_path("zsh"),
        CommandSpec::brew_install("zsh"),
    )
    .then(
        PostInstallStep::new(
            "Setting Zsh as the default shell...",
            "Zsh set as the default shell. Please restart your shell.",
            "Error setting Zsh as the default shell",
        )
        .action(StepAction::SetDefaultShell {
            binary: "zsh".to_string(),
        }),
    )
    .then(
        PostInstallStep::new(
            "Installing Oh My Zsh...",
            "Oh My Zsh installed successfully.",
            "Error installing Oh My Zsh",
        )
        .action(StepAction::Run(CommandSpec::shell(
            "sh",
            OH_MY_ZSH_INSTALL_SCRIPT,
        ))),
    )
    .then(
        PostInstallStep::new(
            "Installing Zsh plugins...",
            "Zsh plugins installed successfully.",
            "Error installing Zsh plugins",
        )
        .action(StepAction::CloneZshPlugins {
            repositories: ZSH_PLUGINS.iter().map(|s| s.to_string()).collect(),
        }),
    )
    .then(
        PostInstallStep::new(
            "Updating .zshrc file...",
            ".zshrc file updated successfully.",
            "Error writing to .zshrc file",
        )
        .action(StepAction::append_to_file(".zshrc", ZSHRC_BLOCK)),
    )
}

fn vscode() -> Installer {
    Installer::new(
        "Visual Studio Code",
        "This option will install Visual Studio Code.",
        Detection::on_path("code"),
        CommandSpec::brew_install("visual-studio-code"),
    )
    .then(
        PostInstallStep::new(
            "Setting Visual Studio Code as the default Git editor...",
            "Visual Studio Code set as the default Git editor.",
            "Error setting Git editor",
        )
        .action(StepAction::Run(CommandSpec::new("git").args([
            "config",
            "--global",
            "core.editor",
            "code --wait",
        ]))),
    )
}

fn nvm() -> Installer {
    Installer::new(
        "NVM (NodeJS LTS)",
        "This option will install nvm and the latest LTS version of Node.js.",
        Detection::env_var("NVM_DIR"),
        CommandSpec::brew_install("nvm"),
    )
    .then(
        PostInstallStep::new(
            "Installing the latest LTS version of Node.js...",
            "Node.js installed successfully.",
            "Error installing Node.js",
        )
        .action(StepAction::Run(CommandSpec::shell("bash", NODE_LTS_SCRIPT))),
    )
    .then(
        PostInstallStep::new(
            "Setting NVM environment variables...",
            "NVM environment variables set successfully. Please restart your shell.",
            "Error setting NVM environment variables",
        )
        .action(StepAction::append_to_profile(NVM_BLOCK)),
    )
}

fn python() -> Installer {
    Installer::new(
        "Python",
        "This option will install Python and Pyenv.",
        Detection::on_path("python"),
        CommandSpec::brew_install("python"),
    )
    .then(
        PostInstallStep::new(
            "Installing Pyenv...",
            "Pyenv installed successfully.",
            "Error installing Pyenv",
        )
        .action(StepAction::Run(CommandSpec::brew_install("pyenv"))),
    )
    .then(
        PostInstallStep::new(
            "Setting Pyenv environment variables...",
            "Pyenv environment variables set successfully. Please restart your shell.",
            "Error setting Pyenv environment variables",
        )
        .action(StepAction::append_unless_present(PYENV_BLOCK, "pyenv")),
    )
    .then(
        PostInstallStep::new(
            "Installing the latest version of Python...",
            "Python installed successfully.",
            "Error installing Python",
        )
        .action(StepAction::ReloadShell)
        .action(StepAction::Run(CommandSpec::shell(
            "bash",
            PYTHON_LATEST_SCRIPT,
        ))),
    )
}

fn docker() -> Installer {
    Installer::new(
        "Docker",
        "This option will install latest version of Docker.",
        Detection::on_path("docker"),
        CommandSpec::brew_install("docker"),
    )
    .then(
        PostInstallStep::new(
            "Performing post-installation configurations for Docker...",
            "Docker configured successfully. Please restart your shell.",
            "Error configuring Docker",
        )
        .action(StepAction::AddUserToGroup {
            group: "docker".to_string(),
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::HostConfig;
    use crate::installers::InstallContext;
    use crate::shell::MockRunner;
    use crate::ui::MockUI;
    use tempfile::TempDir;

    fn by_title(title: &str) -> Installer {
        builtin_installers()
            .into_iter()
            .find(|i| i.title() == title)
            .unwrap()
    }

    #[test]
    fn ten_installers_with_unique_titles() {
        let installers = builtin_installers();
        assert_eq!(installers.len(), 10);

        let mut titles: Vec<&str> = installers.iter().map(|i| i.title()).collect();
        titles.sort_unstable();
        titles.dedup();
        assert_eq!(titles.len(), 10);
        assert!(titles.iter().all(|t| !t.is_empty()));
    }

    #[test]
    fn homebrew_arch_selection() {
        assert_eq!(homebrew_arch("aarch64", false), "arm64");
        assert_eq!(homebrew_arch("aarch64", true), "x86_64");
        assert_eq!(homebrew_arch("x86_64", false), "x86_64");
        assert_eq!(homebrew_arch("x86_64", true), "x86_64");
    }

    #[test]
    fn homebrew_runs_install_script_with_arch() {
        let spec = by_title("Homebrew").install_command().clone();
        assert_eq!(spec.program, "/bin/bash");
        assert_eq!(spec.args[0], "-c");
        assert!(spec.args[1].contains("Homebrew/install/HEAD/install.sh"));
        assert_eq!(spec.env.len(), 1);
        assert_eq!(spec.env[0].0, "HOMEBREW_ARCH");
    }

    #[test]
    fn brew_packages() {
        let cases = [
            ("iTerm2", "brew install iterm2"),
            ("Zsh", "brew install zsh"),
            ("Visual Studio Code", "brew install visual-studio-code"),
            ("Git", "brew install git"),
            ("Go", "brew install go"),
            (".NET SDK", "brew install dotnet-sdk"),
            ("NVM (NodeJS LTS)", "brew install nvm"),
            ("Python", "brew install python"),
            ("Docker", "brew install docker"),
        ];
        for (title, command) in cases {
            assert_eq!(by_title(title).install_command().to_string(), command);
        }
    }

    #[test]
    fn post_install_step_counts() {
        let counts: Vec<(&str, usize)> = vec![
            ("Homebrew", 0),
            ("iTerm2", 1),
            ("Zsh", 4),
            ("Visual Studio Code", 1),
            ("Git", 0),
            ("Go", 0),
            (".NET SDK", 0),
            ("NVM (NodeJS LTS)", 2),
            ("Python", 3),
            ("Docker", 1),
        ];
        for (title, expected) in counts {
            assert_eq!(
                by_title(title).post_install_steps().len(),
                expected,
                "{}",
                title
            );
        }
    }

    #[test]
    fn python_reloads_shell_before_latest_install() {
        let python = by_title("Python");
        let last = python.post_install_steps().last().unwrap();
        assert_eq!(last.actions()[0], StepAction::ReloadShell);
        assert!(matches!(last.actions()[1], StepAction::Run(_)));
    }

    #[test]
    fn zsh_install_flow_on_bash_host() {
        let temp = TempDir::new().unwrap();
        let host = HostConfig::new(Some(temp.path().to_path_buf()))
            .with_var("SHELL", "/bin/bash")
            .with_var("USER", "dev")
            .with_var("PATH", temp.path().join("bin").to_string_lossy().to_string());
        let runner = MockRunner::new();
        let mut ui = MockUI::new();

        let report = by_title("Zsh")
            .install(&InstallContext::new(&host, &runner), &mut ui)
            .unwrap();

        // zsh is not on the fake PATH, so chsh cannot run
        assert_eq!(report.step_failures.len(), 1);
        assert_eq!(
            report.step_failures[0].step,
            "Error setting Zsh as the default shell"
        );
        assert!(runner.ran("ohmyzsh/ohmyzsh/master/tools/install.sh"));
        assert!(runner.ran("zsh-syntax-highlighting"));

        let zshrc = std::fs::read_to_string(temp.path().join(".zshrc")).unwrap();
        assert!(zshrc.contains("zsh-autosuggestions"));
        assert!(zshrc.contains("alias zc=\"code ~/.zshrc\""));
        assert!(!temp.path().join(".bashrc").exists());
    }

    #[test]
    fn python_skips_pyenv_block_when_present() {
        let temp = TempDir::new().unwrap();
        let zshrc = temp.path().join(".zshrc");
        std::fs::write(&zshrc, "export PYENV_ROOT=\"$HOME/.pyenv\"\n").unwrap();
        let host = HostConfig::new(Some(temp.path().to_path_buf())).with_var("SHELL", "/bin/zsh");
        let runner = MockRunner::new();
        let mut ui = MockUI::new();

        let report = by_title("Python")
            .install(&InstallContext::new(&host, &runner), &mut ui)
            .unwrap();

        assert!(report.is_clean());
        assert_eq!(
            std::fs::read_to_string(&zshrc).unwrap(),
            "export PYENV_ROOT=\"$HOME/.pyenv\"\n"
        );
        assert_eq!(
            runner.command_lines()[..3],
            [
                "brew install python".to_string(),
                "brew install pyenv".to_string(),
                format!("/bin/zsh -c \"source {}\"", zshrc.display()),
            ]
        );
        assert!(runner.ran("pyenv global"));
    }

    #[test]
    fn python_appends_pyenv_block_once() {
        let temp = TempDir::new().unwrap();
        let host = HostConfig::new(Some(temp.path().to_path_buf())).with_var("SHELL", "/bin/bash");
        let runner = MockRunner::new();
        let mut ui = MockUI::new();
        let python = by_title("Python");
        let ctx = InstallContext::new(&host, &runner);

        python.install(&ctx, &mut ui).unwrap();
        python.install(&ctx, &mut ui).unwrap();

        let bashrc = std::fs::read_to_string(temp.path().join(".bashrc")).unwrap();
        assert_eq!(bashrc.matches("# Pyenv").count(), 1);
        assert!(bashrc.contains("eval \"$(pyenv init --path)\""));
    }

    #[test]
    fn python_reload_failure_skips_pyenv_install() {
        let temp = TempDir::new().unwrap();
        let host =
            HostConfig::new(Some(temp.path().to_path_buf())).with_var("SHELL", "/bin/unknown");
        let runner = MockRunner::new();
        let mut ui = MockUI::new();

        let report = by_title("Python")
            .install(&InstallContext::new(&host, &runner), &mut ui)
            .unwrap();

        let failed: Vec<&str> = report.step_failures.iter().map(|f| f.step.as_str()).collect();
        assert_eq!(
            failed,
            vec![
                "Error setting Pyenv environment variables",
                "Error installing Python"
            ]
        );
        assert!(!runner.ran("pyenv global"));
    }

    #[test]
    fn vscode_sets_git_editor() {
        let host = HostConfig::new(None);
        let runner = MockRunner::new();
        let mut ui = MockUI::new();

        by_title("Visual Studio Code")
            .install(&InstallContext::new(&host, &runner), &mut ui)
            .unwrap();

        assert_eq!(
            runner.command_lines(),
            vec![
                "brew install visual-studio-code",
                "git config --global core.editor \"code --wait\"",
            ]
        );
        assert!(ui.has_success("Visual Studio Code set as the default Git editor."));
    }

    #[test]
    fn nvm_block_goes_to_detected_profile() {
        let temp = TempDir::new().unwrap();
        let host = HostConfig::new(Some(temp.path().to_path_buf())).with_var("SHELL", "/bin/zsh");
        let runner = MockRunner::new();
        let mut ui = MockUI::new();

        let report = by_title("NVM (NodeJS LTS)")
            .install(&InstallContext::new(&host, &runner), &mut ui)
            .unwrap();

        assert!(report.is_clean());
        assert!(runner.ran("nvm install --lts"));
        let zshrc = std::fs::read_to_string(temp.path().join(".zshrc")).unwrap();
        assert!(zshrc.contains("export NVM_DIR=\"$HOME/.nvm\""));
    }

    #[test]
    fn nvm_detected_by_env_var() {
        let nvm = by_title("NVM (NodeJS LTS)");
        assert!(nvm.is_already_installed(&HostConfig::new(None).with_var("NVM_DIR", "/x")));
        assert!(!nvm.is_already_installed(&HostConfig::new(None)));
    }
}
