//! prepare - Interactive development environment bootstrapper.
//!
//! prepare shows a menu of development tools (Homebrew, a terminal, a
//! shell, an editor, language runtimes, Docker) and installs the selected
//! ones through Homebrew, then applies light configuration such as shell
//! profile edits.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Host environment snapshot
//! - [`error`] - Error types and result aliases
//! - [`installers`] - Tool installers and their registry
//! - [`shell`] - Child processes, shell detection and profile edits
//! - [`ui`] - Interactive prompts, spinners, and terminal output
//!
//! # Example
//!
//! ```
//! use prepare::config::HostConfig;
//! use prepare::installers::InstallerRegistry;
//!
//! let registry = InstallerRegistry::builtin();
//! let host = HostConfig::new(None).with_var("NVM_DIR", "/home/dev/.nvm");
//!
//! assert_eq!(registry.already_installed(&host), vec!["NVM (NodeJS LTS)"]);
//! assert!(registry
//!     .description_for("NVM (NodeJS LTS)", &host)
//!     .ends_with("(Already installed)"));
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod installers;
pub mod shell;
pub mod ui;

pub use error::{PrepareError, Result};
