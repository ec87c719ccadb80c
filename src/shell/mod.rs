//! Shell command execution and profile management.

pub mod command;
pub mod mock;
pub mod platform;
pub mod profile;
pub mod refresh;

pub use command::{CommandRunner, CommandSpec, SystemRunner};
pub use mock::MockRunner;
pub use platform::{is_ci, is_elevated, profile_path, ShellType};
pub use profile::{append_block, contains_marker};
pub use refresh::{reload_shell_configuration, ShellReload};
