//! Child process execution.

use crate::error::{PrepareError, Result};
use std::fmt;
use std::process::{Command, Stdio};

/// A program invocation: executable, arguments and extra environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    /// Executable name or path.
    pub program: String,

    /// Arguments passed verbatim (no shell parsing).
    pub args: Vec<String>,

    /// Environment variables added on top of the inherited environment.
    pub env: Vec<(String, String)>,
}

impl CommandSpec {
    /// Create a spec for `program` with no arguments.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            env: Vec::new(),
        }
    }

    /// Run `script` through `shell -c`.
    pub fn shell(shell: impl Into<String>, script: impl Into<String>) -> Self {
        Self::new(shell).arg("-c").arg(script)
    }

    /// `brew install <package>`.
    pub fn brew_install(package: &str) -> Self {
        Self::new("brew").args(["install", package])
    }

    /// Append one argument.
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append several arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Add an environment variable for the child.
    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.push((key.into(), value.into()));
        self
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            if arg.is_empty() || arg.contains(char::is_whitespace) {
                write!(f, " {:?}", arg)?;
            } else {
                write!(f, " {}", arg)?;
            }
        }
        Ok(())
    }
}

/// Runs child processes on behalf of installers.
///
/// This trait allows substituting a recording runner in tests.
pub trait CommandRunner {
    /// Run a command to completion with inherited stdout/stderr.
    ///
    /// Returns `Ok(())` only if the process exited with status 0.
    fn run(&self, spec: &CommandSpec) -> Result<()>;
}

/// Runner that spawns real processes.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl SystemRunner {
    /// Create a new system runner.
    pub fn new() -> Self {
        Self
    }
}

impl CommandRunner for SystemRunner {
    fn run(&self, spec: &CommandSpec) -> Result<()> {
        tracing::debug!("Running: {}", spec);

        let mut cmd = Command::new(&spec.program);
        cmd.args(&spec.args);
        for (key, value) in &spec.env {
            cmd.env(key, value);
        }
        cmd.stdin(Stdio::inherit());
        cmd.stdout(Stdio::inherit());
        cmd.stderr(Stdio::inherit());

        let status = cmd.status().map_err(|e| {
            tracing::debug!("Failed to spawn {}: {}", spec.program, e);
            PrepareError::CommandFailed {
                command: spec.to_string(),
                code: None,
            }
        })?;

        if status.success() {
            Ok(())
        } else {
            Err(PrepareError::CommandFailed {
                command: spec.to_string(),
                code: status.code(),
            })
        }
    }
}
