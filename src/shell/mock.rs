//! Recording command runner for tests.
//!
//! `MockRunner` implements [`CommandRunner`] without spawning anything. It
//! records every invocation and can be told to fail commands whose rendered
//! command line contains a given substring.
//!
//! # Example
//!
//! ```
//! use prepare::shell::{CommandRunner, CommandSpec, MockRunner};
//!
//! let runner = MockRunner::new();
//! runner.fail_matching("brew install go");
//!
//! assert!(runner.run(&CommandSpec::brew_install("git")).is_ok());
//! assert!(runner.run(&CommandSpec::brew_install("go")).is_err());
//! assert_eq!(runner.invocations().len(), 2);
//! ```

use std::cell::RefCell;

use crate::error::{PrepareError, Result};

use super::command::{CommandRunner, CommandSpec};

/// Command runner that records invocations instead of spawning processes.
#[derive(Debug, Default)]
pub struct MockRunner {
    invocations: RefCell<Vec<CommandSpec>>,
    failures: RefCell<Vec<String>>,
}

impl MockRunner {
    /// Create a runner where every command succeeds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail any command whose rendered command line contains `pattern`.
    pub fn fail_matching(&self, pattern: &str) {
        self.failures.borrow_mut().push(pattern.to_string());
    }

    /// All recorded invocations, in order.
    pub fn invocations(&self) -> Vec<CommandSpec> {
        self.invocations.borrow().clone()
    }

    /// Rendered command lines of all invocations.
    pub fn command_lines(&self) -> Vec<String> {
        self.invocations
            .borrow()
            .iter()
            .map(ToString::to_string)
            .collect()
    }

    /// Whether any invocation's command line contains `needle`.
    pub fn ran(&self, needle: &str) -> bool {
        self.command_lines().iter().any(|line| line.contains(needle))
    }
}

impl CommandRunner for MockRunner {
    fn run(&self, spec: &CommandSpec) -> Result<()> {
        self.invocations.borrow_mut().push(spec.clone());

        let line = spec.to_string();
        if self.failures.borrow().iter().any(|p| line.contains(p)) {
            return Err(PrepareError::CommandFailed {
                command: line,
                code: Some(1),
            });
        }
        Ok(())
    }
}
