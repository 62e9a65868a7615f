//! Command-line interface for rescache.
//!
//! - [`args`] - Argument definitions using clap derive macros
//! - [`commands`] - Command implementations

pub mod args;
pub mod commands;

pub use args::{
    Cli, Commands, ConvertArgs, CopyArgs, GetArgs, ListArgs, PathArgs, RemoveArgs,
};
pub use commands::{Command, CommandDispatcher};
