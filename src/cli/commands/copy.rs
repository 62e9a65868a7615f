//! Copy command implementation.

use std::io::Write;

use crate::cli::args::CopyArgs;
use crate::error::Result;
use crate::files::copy_files;

use super::dispatcher::Command;

/// The copy command implementation.
pub struct CopyCommand {
    args: CopyArgs,
}

impl CopyCommand {
    /// Create a new copy command.
    pub fn new(args: CopyArgs) -> Self {
        Self { args }
    }
}

impl Command for CopyCommand {
    fn execute(&self, out: &mut dyn Write) -> Result<()> {
        let copied = copy_files(&self.args.files, &self.args.dest, self.args.anchor.as_deref())?;

        for path in &copied {
            writeln!(out, "{}", path.display())?;
        }

        Ok(())
    }
}
