//! Tooling & Integration Layer
//!
//! Command-line front end over the table session.

pub mod cli;

pub use cli::{Cli, CliContext, Commands, ShellCommand};
