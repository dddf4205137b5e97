use std::path::PathBuf;

use clap::{Args, ValueEnum};
use steg_core::{ChannelSelection, CodecOptions, FftCodecOptions, FftVariant, Strength};

use super::{HideArgs, ShowArgs};
use crate::CliResult;

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Variant {
    /// Self-contained, the stego image is all that is needed to show
    Blind,
    /// Additive, showing needs the original cover image
    #[default]
    Differential,
}

// Spectral arguments shared by hide and show
#[derive(Args, Debug)]
pub struct SpectralArgs {
    /// Embedding variant
    #[arg(long, value_enum, default_value_t = Variant::Differential)]
    pub variant: Variant,

    /// Differential only: scale by the central range of the cover spectrum instead of a fixed alpha
    #[arg(long)]
    pub centralize: bool,

    /// Differential only: use every channel instead of the first one
    #[arg(long)]
    pub all_channels: bool,
}

impl SpectralArgs {
    fn options(&self) -> CodecOptions {
        let variant = match self.variant {
            Variant::Blind => FftVariant::Blind,
            Variant::Differential => FftVariant::Differential,
        };
        let strength = if self.centralize {
            Strength::Centralized
        } else {
            Strength::default()
        };
        let channels = if self.all_channels {
            ChannelSelection::All
        } else {
            ChannelSelection::First
        };

        CodecOptions::Fft(
            FftCodecOptions::default()
                .with_variant(variant)
                .with_strength(strength)
                .with_channels(channels),
        )
    }
}

/// Hides data in the 2D spectrum of the image, width and height must be powers of two
#[derive(Args, Debug)]
pub struct HideFftArgs {
    #[command(flatten)]
    pub input: HideArgs,

    #[command(flatten)]
    pub spectral: SpectralArgs,
}

impl HideFftArgs {
    pub fn run(self) -> CliResult<()> {
        self.input.run(self.spectral.options())
    }
}

/// Shows data hidden in the 2D spectrum of the image
#[derive(Args, Debug)]
pub struct ShowFftArgs {
    #[command(flatten)]
    pub output: ShowArgs,

    #[command(flatten)]
    pub spectral: SpectralArgs,

    /// Untouched cover image, required by the differential variant
    #[arg(long, value_name = "cover image")]
    pub original: Option<PathBuf>,

    /// Differential only: number of bytes to show, otherwise trailing zero bytes are dropped
    #[arg(long, value_name = "bytes")]
    pub length: Option<usize>,
}

impl ShowFftArgs {
    pub fn run(self) -> CliResult<()> {
        let options = self.spectral.options();
        self.output.run(options, self.original, self.length)
    }
}
