use clap::Parser;
use log::warn;
use steg_core::StegError;

mod cli;
mod commands;

use cli::{CliArgs, Commands};

pub type CliResult<T> = std::result::Result<T, StegError>;

fn main() -> CliResult<()> {
    env_logger::init();

    let args = CliArgs::parse();
    let level = args.level;
    if level != 1 && matches!(args.command, Commands::HideFft(_) | Commands::ShowFft(_)) {
        warn!("--level {level} has no effect on the FFT scheme");
    }

    match args.command {
        Commands::HideLsb(args) => args.run(level),
        Commands::ShowLsb(args) => args.run(level),
        Commands::HideFft(args) => args.run(),
        Commands::ShowFft(args) => args.run(),
        Commands::HideDct(args) => args.run(level),
        Commands::ShowDct(args) => args.run(level),
    }
}
