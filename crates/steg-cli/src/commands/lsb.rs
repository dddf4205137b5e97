use clap::Args;
use steg_core::{CodecOptions, LsbCodecOptions};

use super::{HideArgs, ShowArgs};
use crate::CliResult;

/// Hides data in the low bits of every image sample
#[derive(Args, Debug)]
pub struct HideLsbArgs {
    #[command(flatten)]
    pub input: HideArgs,

    /// Protect the data with Hamming(7,4) error correction
    #[arg(long)]
    pub ecc: bool,
}

impl HideLsbArgs {
    pub fn run(self, level: usize) -> CliResult<()> {
        self.input.run(options(level, self.ecc))
    }
}

/// Shows data hidden in the low bits of every image sample
#[derive(Args, Debug)]
pub struct ShowLsbArgs {
    #[command(flatten)]
    pub output: ShowArgs,

    /// The data was hidden with Hamming(7,4) error correction
    #[arg(long)]
    pub ecc: bool,
}

impl ShowLsbArgs {
    pub fn run(self, level: usize) -> CliResult<()> {
        self.output.run(options(level, self.ecc), None, None)
    }
}

fn options(level: usize, ecc: bool) -> CodecOptions {
    CodecOptions::Lsb(
        LsbCodecOptions::default()
            .with_level(level)
            .with_ecc(ecc),
    )
}
