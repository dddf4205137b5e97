//! Image container I/O for carriers.
//!
//! Carriers are decoded with their native channel layout (grey, grey + alpha,
//! RGB or RGBA). Stego images are always persisted as PNG, any lossy format
//! would destroy the hidden bits.

pub mod codec_options;

use std::path::Path;

use image::{ColorType, ImageError, ImageFormat};
use log::{debug, error, warn};

use crate::error::StegError;
use crate::result::Result;
use crate::Carrier;

pub use codec_options::{
    CodecOptions, DctCodecOptions, FftCodecOptions, FftVariant, LsbCodecOptions,
};

/// Something that can be written to a file.
pub trait Persist {
    fn save_as(&self, file: &Path) -> Result<()>;
}

impl Persist for Carrier {
    fn save_as(&self, file: &Path) -> Result<()> {
        save_carrier(self, file)
    }
}

/// Loads a PNG or JPEG image as a carrier; 16 bit and float images are reduced to 8 bit.
pub fn load_carrier(file: &Path) -> Result<Carrier> {
    let Some(ext) = file.extension().and_then(|e| e.to_str()) else {
        return Err(StegError::UnsupportedMedia);
    };
    if !matches!(ext.to_lowercase().as_str(), "png" | "jpg" | "jpeg") {
        return Err(StegError::UnsupportedMedia);
    }

    let image = image::open(file).map_err(|e| {
        error!("Error opening image {file:?}: {e}");
        match e {
            ImageError::IoError(source) => StegError::ReadError { source },
            _ => StegError::InvalidImageMedia,
        }
    })?;

    let (width, height) = (image.width() as usize, image.height() as usize);
    let color = image.color();
    let (channels, samples) = match (color.has_color(), color.has_alpha()) {
        (false, false) => (1, image.into_luma8().into_raw()),
        (false, true) => (2, image.into_luma_alpha8().into_raw()),
        (true, false) => (3, image.into_rgb8().into_raw()),
        (true, true) => (4, image.into_rgba8().into_raw()),
    };
    debug!("loaded {file:?}: {width}x{height}, {channels} channels from {color:?}");

    Carrier::from_raw(width, height, channels, samples)
}

/// Writes `carrier` as PNG, whatever the extension of `file`.
pub fn save_carrier(carrier: &Carrier, file: &Path) -> Result<()> {
    let color = match carrier.channels() {
        1 => ColorType::L8,
        2 => ColorType::La8,
        3 => ColorType::Rgb8,
        4 => ColorType::Rgba8,
        _ => return Err(StegError::UnsupportedMedia),
    };
    let is_png = file
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("png"));
    if !is_png {
        warn!("{file:?} will be written as PNG");
    }

    image::save_buffer_with_format(
        file,
        carrier.as_bytes(),
        carrier.width() as u32,
        carrier.height() as u32,
        color,
        ImageFormat::Png,
    )
    .map_err(|e| {
        error!("Error saving image {file:?}: {e}");
        match e {
            ImageError::IoError(source) => StegError::WriteError { source },
            _ => StegError::ImageEncodingError,
        }
    })
}
