use clap::Args;
use steg_core::{CodecOptions, DctCodecOptions};

use super::{HideArgs, ShowArgs};
use crate::CliResult;

/// Hides data in coefficient parities of 8x8 DCT blocks
#[derive(Args, Debug)]
pub struct HideDctArgs {
    #[command(flatten)]
    pub input: HideArgs,
}

impl HideDctArgs {
    pub fn run(self, level: usize) -> CliResult<()> {
        self.input.run(options(level))
    }
}

/// Shows data hidden in coefficient parities of 8x8 DCT blocks
#[derive(Args, Debug)]
pub struct ShowDctArgs {
    #[command(flatten)]
    pub output: ShowArgs,
}

impl ShowDctArgs {
    pub fn run(self, level: usize) -> CliResult<()> {
        self.output.run(options(level), None, None)
    }
}

fn options(level: usize) -> CodecOptions {
    CodecOptions::Dct(DctCodecOptions::default().with_compression(level))
}
