//! Convert command implementation.

use std::io::Write;

use crate::cli::args::ConvertArgs;
use crate::data::{read_data_file, write_data_file, DataFormat};
use crate::error::Result;

use super::dispatcher::Command;

/// The convert command implementation.
pub struct ConvertCommand {
    args: ConvertArgs,
}

impl ConvertCommand {
    /// Create a new convert command.
    pub fn new(args: ConvertArgs) -> Self {
        Self { args }
    }
}

impl Command for ConvertCommand {
    fn execute(&self, out: &mut dyn Write) -> Result<()> {
        // Fail on the output extension before reading anything.
        let format = DataFormat::from_path(&self.args.output)?;
        let value = read_data_file(&self.args.input)?;
        write_data_file(&self.args.output, &value)?;

        writeln!(
            out,
            "Converted {} to {} ({})",
            self.args.input.display(),
            self.args.output.display(),
            format
        )?;

        Ok(())
    }
}
