//! Numeric transform primitives for frequency-domain steganography.
//!
//! This crate knows nothing about hiding data. It provides the transforms the
//! embedding schemes in `steg-core` are built on:
//! - [`dft`]/[`idft`]: O(n²) reference transforms, usable for any length
//! - [`fft`]/[`ifft`]: recursive radix-2 decimation-in-time, power-of-two lengths only
//! - [`fft2d`]/[`ifft2d`]: separable 2D transforms over a [`Grid`]
//! - [`dct2d`]/[`idct2d`]: orthonormal 8x8 DCT-II / DCT-III pair
//!
//! # Example
//!
//! ```rust
//! use steg_signal::{fft, ifft, Complex64};
//!
//! let signal: Vec<Complex64> = (0..8).map(|i| Complex64::new(i as f64, 0.0)).collect();
//! let spectrum = fft(&signal).expect("8 is a power of two");
//! let restored = ifft(&spectrum).expect("8 is a power of two");
//!
//! for (a, b) in signal.iter().zip(restored.iter()) {
//!     assert!((a - b).norm() < 1e-9);
//! }
//! ```

mod dct;
mod dft;
mod error;
mod fft;
mod grid;

pub use dct::{alpha, dct2d, idct2d, Block, BLOCK_SIZE};
pub use dft::{dft, idft};
pub use error::{Result, SignalError};
pub use fft::{fft, fft2d, forward, ifft, ifft2d, inverse, is_power_of_two};
pub use grid::Grid;
pub use num_complex::Complex64;

/// Sign of the exponent in the transform kernel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Direction {
    Forward,
    Inverse,
}

impl Direction {
    #[inline]
    pub(crate) fn sign(self) -> f64 {
        match self {
            Direction::Forward => -1.0,
            Direction::Inverse => 1.0,
        }
    }
}
