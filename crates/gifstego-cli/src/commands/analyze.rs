use std::path::PathBuf;

use clap::Args;

use crate::CliResult;

/// Dumps the structure of a GIF and renders its frames as PNG
#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// The GIF to analyze
    #[arg(value_name = "gif")]
    pub gif: PathBuf,

    /// Frames will be stored as frame_<n>.png in that folder
    #[arg(short, long, value_name = "output folder", default_value = ".")]
    pub out: PathBuf,
}

impl AnalyzeArgs {
    pub fn run(self) -> CliResult<()> {
        let dump = gifstego_core::commands::analyze(&self.gif, &self.out)?;
        print!("{}", dump);

        Ok(())
    }
}
