use std::path::PathBuf;

use clap::Args;

use super::hide_summary;
use crate::CliResult;

/// Hides one file per frame in a GIF
#[derive(Args, Debug)]
pub struct HideArgs {
    /// Source GIF, used readonly
    #[arg(short, long, value_name = "source gif", required = true)]
    pub source: PathBuf,

    /// Final GIF will be stored as file
    #[arg(short, long, value_name = "destination gif", required = true)]
    pub dest: PathBuf,

    /// File(s) to hide, the first one in the first frame and so on
    #[arg(value_name = "files", required = true, num_args = 1..)]
    pub files: Vec<PathBuf>,
}

impl HideArgs {
    pub fn run(self) -> CliResult<()> {
        let report = gifstego_core::commands::hide(&self.source, &self.dest, &self.files)?;

        println!("{}", hide_summary(&report, self.files.len()));

        Ok(())
    }
}
