use std::path::PathBuf;

use clap::Args;

use crate::CliResult;

/// Gathers the data of all frames of a GIF into one file
#[derive(Args, Debug)]
pub struct GatherArgs {
    /// Source GIF that contains secret data
    #[arg(short, long, value_name = "source gif", required = true)]
    pub source: PathBuf,

    /// Recovered data will be stored as file
    #[arg(value_name = "file")]
    pub file: PathBuf,
}

impl GatherArgs {
    pub fn run(self) -> CliResult<()> {
        gifstego_core::commands::gather(&self.source, &self.file)
    }
}
