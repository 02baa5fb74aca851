use clap::Parser;

mod cli;
mod commands;

use cli::{CliArgs, Commands};

pub type CliResult<T> = gifstego_core::Result<T>;

fn main() -> CliResult<()> {
    env_logger::init();

    let args = CliArgs::parse();

    match args.command {
        Commands::Hide(args) => args.run(),
        Commands::Recover(args) => args.run(),
        Commands::Analyze(args) => args.run(),
        Commands::Spread(args) => args.run(),
        Commands::Gather(args) => args.run(),
    }
}
