//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait, which provides a uniform
//! interface for executing commands and reporting results.
//!
//! # Architecture
//!
//! Commands are dispatched via [`CommandDispatcher`], which routes CLI
//! subcommands to their implementations. The default (no subcommand) is
//! the interactive [`prompt`] loop.

pub mod completions;
pub mod dispatcher;
pub mod prompt;
pub mod version;

pub use dispatcher::{Command, CommandDispatcher, CommandResult};
pub use prompt::PromptCommand;
