//! Spectral codec: payloads carried by the global 2D spectrum of a channel.
//!
//! Two strategies share the [`SpectralCodec`] capability:
//! - [`BlindSpectrum`] is self-contained. A length prefix and the payload bits
//!   live in the fractional part of spectrum coefficients, so extraction needs
//!   nothing but the stego image.
//! - [`DifferentialSpectrum`] adds scaled payload samples to the spectrum and
//!   recovers them by subtracting the spectrum of the untouched cover image.
//!
//! Both write into the same usable region of every channel: `x ∈ [1, W/2 - 2]`,
//! `y ∈ [1, H - 2]`, row-major. Every write is mirrored onto the conjugate
//! bin `((W - x) mod W, (H - y) mod H)` so the inverse transform stays real.

mod blind;
mod centralization;
mod differential;

use enum_dispatch::enum_dispatch;
use log::trace;
use steg_signal::{fft2d, ifft2d, is_power_of_two, Complex64, Grid};

pub use blind::BlindSpectrum;
pub use centralization::{centralize, quantile, Range, TAIL_FRACTION};
pub use differential::{ChannelSelection, DifferentialSpectrum, Strength, DEFAULT_ALPHA};

use crate::error::StegError;
use crate::result::Result;
use crate::Carrier;

pub const MIN_WIDTH: usize = 8;
pub const MIN_HEIGHT: usize = 4;

/// Store and verify rounds before a channel is reported as saturated.
const MAX_PASSES: usize = 16;

/// Embedding and extraction in the frequency domain of a whole channel.
#[enum_dispatch]
pub trait SpectralCodec {
    /// Payload bytes `carrier` can take with this strategy.
    fn capacity(&self, carrier: &Carrier) -> Result<usize>;

    /// Hides `payload` in `carrier`. The carrier is only modified on success.
    fn embed(&self, carrier: &mut Carrier, payload: &[u8]) -> Result<()>;

    /// Recovers a payload previously hidden by [`SpectralCodec::embed`].
    fn extract(&self, carrier: &Carrier) -> Result<Vec<u8>>;
}

/// The spectral strategies, selected explicitly by the caller.
#[enum_dispatch(SpectralCodec)]
#[derive(Debug, Clone)]
pub enum SpectralStrategy {
    Blind(BlindSpectrum),
    Differential(DifferentialSpectrum),
}

impl Default for SpectralStrategy {
    fn default() -> Self {
        Self::Differential(DifferentialSpectrum::default())
    }
}

pub(crate) fn validate_geometry(carrier: &Carrier) -> Result<()> {
    let (width, height) = (carrier.width(), carrier.height());
    if !is_power_of_two(width) || !is_power_of_two(height) {
        return Err(StegError::InvalidDimension {
            width,
            height,
            reason: "width and height must be powers of two",
        });
    }
    if width < MIN_WIDTH || height < MIN_HEIGHT {
        return Err(StegError::InvalidDimension {
            width,
            height,
            reason: "carrier is too small for a usable spectral region",
        });
    }

    Ok(())
}

/// Usable coefficient positions of one channel, row-major.
pub(crate) fn slots(width: usize, height: usize) -> impl Iterator<Item = (usize, usize)> {
    let columns = 1..(width / 2).saturating_sub(1);
    (1..height.saturating_sub(1)).flat_map(move |y| columns.clone().map(move |x| (x, y)))
}

pub(crate) fn slot_count(width: usize, height: usize) -> usize {
    (width / 2).saturating_sub(2) * height.saturating_sub(2)
}

/// The conjugate-symmetric partner of bin `(x, y)`.
#[inline]
pub(crate) fn partner(x: usize, y: usize, width: usize, height: usize) -> (usize, usize) {
    ((width - x) % width, (height - y) % height)
}

/// Adds a real `delta` to a bin and to its partner.
pub(crate) fn add_real(spectrum: &mut Grid<Complex64>, x: usize, y: usize, delta: f64) {
    let (px, py) = partner(x, y, spectrum.width(), spectrum.height());
    spectrum[(x, y)].re += delta;
    spectrum[(px, py)].re += delta;
}

/// Shifts `plane` by a constant so its samples fit `[0, top]`, or centers it
/// when its range is wider than that.
///
/// Only the DC bin changes, which no slot uses.
pub(crate) fn fit_range(plane: &mut Grid<f64>, top: f64) {
    let (low, high) = plane
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(low, high), &v| {
            (low.min(v), high.max(v))
        });
    let shift = if high - low > top {
        (top - high - low) / 2.0
    } else if high > top {
        top - high
    } else if low < 0.0 {
        -low
    } else {
        return;
    };

    trace!("shifting plane by {shift} into [0, {top}]");
    *plane = plane.map(|v| v + shift);
}

pub(crate) fn spectrum_of(plane: &Grid<f64>) -> Result<Grid<Complex64>> {
    Ok(fft2d(&plane.map(|v| Complex64::new(*v, 0.0)))?)
}

pub(crate) fn plane_of(spectrum: &Grid<Complex64>) -> Result<Grid<f64>> {
    Ok(ifft2d(spectrum)?.map(|c| c.re))
}
