use std::path::PathBuf;

use clap::Args;

use super::hide_summary;
use crate::CliResult;

/// Spreads one file evenly across all frames of a GIF
#[derive(Args, Debug)]
pub struct SpreadArgs {
    /// Source GIF, used readonly
    #[arg(short, long, value_name = "source gif", required = true)]
    pub source: PathBuf,

    /// Final GIF will be stored as file
    #[arg(short, long, value_name = "destination gif", required = true)]
    pub dest: PathBuf,

    /// File to spread
    #[arg(value_name = "file")]
    pub file: PathBuf,
}

impl SpreadArgs {
    pub fn run(self) -> CliResult<()> {
        let report = gifstego_core::commands::spread(&self.source, &self.dest, &self.file)?;

        println!("{}", hide_summary(&report, report.frames));

        Ok(())
    }
}
