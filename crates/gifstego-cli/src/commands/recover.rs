use std::path::PathBuf;

use clap::Args;

use crate::CliResult;

/// Recovers the files hidden in the frames of a GIF
#[derive(Args, Debug)]
pub struct RecoverArgs {
    /// Source GIF that contains secret data
    #[arg(short, long, value_name = "source gif", required = true)]
    pub source: PathBuf,

    /// The i-th file receives the data of the i-th frame
    #[arg(value_name = "files", required = true, num_args = 1..)]
    pub files: Vec<PathBuf>,
}

impl RecoverArgs {
    pub fn run(self) -> CliResult<()> {
        gifstego_core::commands::recover(&self.source, &self.files).map(|_| ())
    }
}
