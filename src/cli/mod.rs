//! Command-line interface for appimport.
//!
//! - [`args`] - Argument definitions using clap derive macros
//! - [`commands`] - Command implementations

pub mod args;
pub mod commands;

pub use args::{Cli, Commands, CompletionsArgs, ImportArgs};
pub use commands::{Command, CommandDispatcher, CommandResult};
