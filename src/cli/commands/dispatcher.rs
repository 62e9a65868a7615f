//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandDispatcher`] for routing CLI subcommands
//!
//! A command either succeeds or returns a [`CacheError`](crate::error::CacheError);
//! the binary maps errors to exit codes.

use std::io::Write;

use crate::cli::args::Commands;
use crate::config::Settings;
use crate::error::Result;

/// Trait for command implementations.
///
/// Each CLI subcommand implements this trait to provide its execution logic.
pub trait Command {
    /// Execute the command, writing its output to `out`.
    fn execute(&self, out: &mut dyn Write) -> Result<()>;
}

/// Dispatches CLI commands to their implementations.
pub struct CommandDispatcher {
    settings: Settings,
}

impl CommandDispatcher {
    /// Create a new dispatcher using the given settings.
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    /// Get the settings commands run with.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Dispatch and execute a command.
    pub fn dispatch(&self, command: &Commands, out: &mut dyn Write) -> Result<()> {
        match command {
            Commands::Get(args) => {
                super::cache::GetCommand::new(&self.settings, args.clone()).execute(out)
            }
            Commands::Path(args) => {
                super::cache::PathCommand::new(&self.settings, args.clone()).execute(out)
            }
            Commands::Remove(args) => {
                super::cache::RemoveCommand::new(&self.settings, args.clone()).execute(out)
            }
            Commands::List(args) => {
                super::cache::ListCommand::new(&self.settings, args.clone()).execute(out)
            }
            Commands::Convert(args) => {
                super::convert::ConvertCommand::new(args.clone()).execute(out)
            }
            Commands::Copy(args) => super::copy::CopyCommand::new(args.clone()).execute(out),
        }
    }
}
