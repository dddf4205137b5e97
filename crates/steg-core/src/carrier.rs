use steg_signal::Grid;

use crate::error::StegError;
use crate::result::Result;

/// Dense row-major grid of 8 bit samples, `width × height × channels`.
///
/// Channels are interleaved: sample `(x, y, c)` lives at
/// `(y * width + x) * channels + c`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Carrier {
    width: usize,
    height: usize,
    channels: usize,
    samples: Vec<u8>,
}

impl Carrier {
    /// All samples zero.
    pub fn new(width: usize, height: usize, channels: usize) -> Self {
        Self {
            width,
            height,
            channels,
            samples: vec![0; width * height * channels],
        }
    }

    pub fn from_raw(
        width: usize,
        height: usize,
        channels: usize,
        samples: Vec<u8>,
    ) -> Result<Self> {
        let expected = width * height * channels;
        if samples.len() != expected {
            return Err(StegError::InvalidCarrierBuffer {
                expected,
                actual: samples.len(),
            });
        }

        Ok(Self {
            width,
            height,
            channels,
            samples,
        })
    }

    /// Builds a carrier by asking `f(x, y, channel)` for every sample.
    pub fn from_fn<F>(width: usize, height: usize, channels: usize, mut f: F) -> Self
    where
        F: FnMut(usize, usize, usize) -> u8,
    {
        let mut carrier = Self::new(width, height, channels);
        for y in 0..height {
            for x in 0..width {
                for c in 0..channels {
                    let offset = carrier.offset(x, y, c);
                    carrier.samples[offset] = f(x, y, c);
                }
            }
        }
        carrier
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn channels(&self) -> usize {
        self.channels
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    #[inline]
    pub fn offset(&self, x: usize, y: usize, channel: usize) -> usize {
        (y * self.width + x) * self.channels + channel
    }

    #[inline]
    pub fn sample(&self, x: usize, y: usize, channel: usize) -> u8 {
        self.samples[self.offset(x, y, channel)]
    }

    #[inline]
    pub fn set_sample(&mut self, x: usize, y: usize, channel: usize, value: u8) {
        let offset = self.offset(x, y, channel);
        self.samples[offset] = value;
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.samples
    }

    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.samples
    }

    pub fn into_raw(self) -> Vec<u8> {
        self.samples
    }

    pub fn same_geometry(&self, other: &Carrier) -> bool {
        self.width == other.width && self.height == other.height && self.channels == other.channels
    }

    /// One channel as floating point samples, each divided by `scale`.
    pub fn plane(&self, channel: usize, scale: f64) -> Grid<f64> {
        let mut plane = Grid::new(self.width, self.height);
        for y in 0..self.height {
            for x in 0..self.width {
                plane[(x, y)] = self.sample(x, y, channel) as f64 / scale;
            }
        }
        plane
    }

    /// Writes a plane produced by [`Carrier::plane`] back, rounding and clamping to 8 bits.
    pub fn store_plane(&mut self, channel: usize, plane: &Grid<f64>, scale: f64) {
        debug_assert_eq!(plane.width(), self.width);
        debug_assert_eq!(plane.height(), self.height);
        for y in 0..self.height {
            for x in 0..self.width {
                self.set_sample(x, y, channel, quantize(plane[(x, y)] * scale));
            }
        }
    }
}

/// Nearest 8 bit sample value, saturating at both ends.
#[inline]
pub fn quantize(value: f64) -> u8 {
    value.round().clamp(0.0, u8::MAX as f64) as u8
}
