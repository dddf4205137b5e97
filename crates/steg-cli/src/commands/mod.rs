pub mod dct;
pub mod fft;
pub mod lsb;

use std::io::Write;
use std::path::PathBuf;

use clap::Args;
use steg_core::{CodecOptions, StegError};

use crate::CliResult;

// Arguments shared by every hide command
#[derive(Args, Debug)]
pub struct HideArgs {
    /// Carrier image (PNG or JPEG), used readonly
    #[arg(short = 'i', long = "in", value_name = "image file", required = true)]
    pub image: PathBuf,

    /// Final image will be stored as PNG file
    #[arg(
        short = 'o',
        long = "out",
        value_name = "output image file",
        required = true
    )]
    pub write_to_file: PathBuf,

    /// File to hide in the image, standard input if omitted
    #[arg(short = 'd', long = "data", value_name = "data file")]
    pub data_file: Option<PathBuf>,
}

impl HideArgs {
    pub fn run(self, options: CodecOptions) -> CliResult<()> {
        steg_core::commands::hide(&self.image, &self.write_to_file, self.data_file, options)
    }
}

// Arguments shared by every show command
#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Stego image that contains the payload
    #[arg(short = 'i', long = "in", value_name = "image file", required = true)]
    pub image: PathBuf,

    /// Payload will be stored in this file, standard output if omitted
    #[arg(short = 'o', long = "out", value_name = "output file")]
    pub output_file: Option<PathBuf>,

    /// Print the payload as hex to standard output
    #[arg(long)]
    pub hex: bool,
}

impl ShowArgs {
    pub fn run(
        self,
        options: CodecOptions,
        original: Option<PathBuf>,
        length: Option<usize>,
    ) -> CliResult<()> {
        let to_stdout = self.output_file.is_none() && !self.hex;
        let payload =
            steg_core::commands::show(&self.image, self.output_file, original, length, options)?;

        if self.hex {
            println!("{}", hex::encode(&payload));
        } else if to_stdout {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(&payload)
                .and_then(|_| stdout.flush())
                .map_err(|source| StegError::WriteError { source })?;
        }

        Ok(())
    }
}
