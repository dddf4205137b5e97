//! # Steg Core API
//!
//! Hides arbitrary bytes in raster images with one of three schemes:
//! - [`LsbCodec`]: payload bits in the low bits of every sample
//! - [`SpectralStrategy`]: payload in the global 2D spectrum of a channel,
//!   either self-contained ([`BlindSpectrum`]) or relative to the cover image
//!   ([`DifferentialSpectrum`])
//! - [`BlockCodec`]: payload bits in coefficient parities of 8x8 DCT blocks
//!
//! An optional [`hamming`] layer protects LSB payloads against flipped bits.
//!
//! # Usage Examples
//!
//! ## Hide data inside an image
//!
//! ```rust
//! use steg_core::media::Persist;
//! use steg_core::Carrier;
//! use tempfile::tempdir;
//!
//! let temp_dir = tempdir().expect("Failed to create temporary directory");
//! let cover = temp_dir.path().join("cover.png");
//! Carrier::from_fn(64, 64, 3, |x, y, _| (x + y) as u8)
//!     .save_as(&cover)
//!     .expect("Failed to write cover image");
//!
//! steg_core::api::hide::prepare()
//!     .with_payload("Hello, World!")
//!     .with_image(&cover)
//!     .with_output(temp_dir.path().join("image-with-secret.png"))
//!     .execute()
//!     .expect("Failed to hide message in image");
//!
//! let payload = steg_core::api::show::prepare()
//!     .from_secret_file(temp_dir.path().join("image-with-secret.png"))
//!     .execute()
//!     .expect("Failed to show message from image");
//!
//! assert_eq!(payload, b"Hello, World!");
//! ```
//!
//! ## Work on a carrier in memory
//!
//! ```rust
//! use steg_core::{BlockCodec, Carrier};
//!
//! let mut carrier = Carrier::from_fn(32, 32, 1, |x, y, _| (100 + (x ^ y)) as u8);
//! let codec = BlockCodec::new(4).unwrap();
//!
//! codec.hide(&mut carrier, b"dct").unwrap();
//! assert_eq!(codec.show(&carrier).unwrap(), b"dct");
//! ```

#![warn(clippy::redundant_else)]

pub mod api;
pub mod block;
pub mod carrier;
pub mod commands;
pub mod error;
pub mod framing;
pub mod hamming;
pub mod lsb;
pub mod media;
pub mod result;
pub mod spectral;

pub use crate::block::BlockCodec;
pub use crate::carrier::Carrier;
pub use crate::media::{CodecOptions, DctCodecOptions, FftCodecOptions, FftVariant, LsbCodecOptions};
pub use crate::error::StegError;
pub use crate::lsb::LsbCodec;
pub use crate::result::Result;
pub use crate::spectral::{
    BlindSpectrum, ChannelSelection, DifferentialSpectrum, SpectralCodec, SpectralStrategy,
    Strength,
};
