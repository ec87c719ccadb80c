//! Runtime configuration.
//!
//! prepare has no configuration file. Behavior is driven by global CLI
//! flags (see [`crate::cli::Cli`]) and by a [`HostConfig`] snapshot of the
//! environment taken once at startup.

pub mod host;

pub use host::HostConfig;
