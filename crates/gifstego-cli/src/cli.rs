use clap::{Parser, Subcommand};

use crate::commands::*;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    Hide(hide::HideArgs),
    Recover(recover::RecoverArgs),
    Analyze(analyze::AnalyzeArgs),
    Spread(spread::SpreadArgs),
    Gather(gather::GatherArgs),
}
