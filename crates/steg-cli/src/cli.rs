use clap::{Parser, Subcommand};

use crate::commands::*;

#[derive(Parser, Debug)]
#[command(name = "steg", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct CliArgs {
    /// Compression level: LSB bits per sample (1, 2, 4, 8) or DCT bits per block (1 to 8)
    #[arg(short, long, global = true, default_value_t = 1)]
    pub level: usize,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    HideLsb(lsb::HideLsbArgs),
    ShowLsb(lsb::ShowLsbArgs),
    HideFft(fft::HideFftArgs),
    ShowFft(fft::ShowFftArgs),
    HideDct(dct::HideDctArgs),
    ShowDct(dct::ShowDctArgs),
}
