use log::{debug, trace, warn};
use steg_signal::{Complex64, Grid};

use super::{
    add_real, centralize, fit_range, plane_of, slot_count, slots, spectrum_of,
    validate_geometry, SpectralCodec, MAX_PASSES,
};
use crate::carrier::quantize;
use crate::error::StegError;
use crate::result::Result;
use crate::Carrier;

/// Embedding strength relative to the number of samples of a channel.
pub const DEFAULT_ALPHA: f64 = 0.1;

const SAMPLE_SCALE: f64 = 255.0;
const MIN_SPAN: f64 = 1e-9;
/// Largest accepted distance between a stored sample and its payload byte.
const SAMPLE_TOLERANCE: u8 = 2;

/// How strongly payload samples are added to the spectrum.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Strength {
    /// `alpha * W * H`
    Fixed(f64),
    /// The width of the central `[3%, 97%]` range of the cover spectrum.
    Centralized,
}

impl Default for Strength {
    fn default() -> Self {
        Self::Fixed(DEFAULT_ALPHA)
    }
}

/// Channels that carry payload bytes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ChannelSelection {
    #[default]
    First,
    All,
}

/// Additive spectral embedding that needs the cover image for extraction.
///
/// Every payload byte becomes a sample `s = byte / 255` that is added, scaled
/// by the strength, to the real part of one usable bin and its partner. The
/// channel is normalized to `[0, 1]` before the transform. No length is stored;
/// extraction either uses a known length or reads every slot and drops
/// trailing zero bytes.
///
/// Embedding reads every sample back from the stored channel. When clipping
/// keeps a sample off by more than two levels the embedding fails with
/// [`StegError::ChannelSaturated`].
#[derive(Debug, Clone, Default)]
pub struct DifferentialSpectrum {
    strength: Strength,
    channels: ChannelSelection,
    reference: Option<Carrier>,
    length: Option<usize>,
}

impl DifferentialSpectrum {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_strength(mut self, strength: Strength) -> Self {
        self.strength = strength;
        self
    }

    pub fn with_channels(mut self, channels: ChannelSelection) -> Self {
        self.channels = channels;
        self
    }

    /// The untouched cover image, required by [`SpectralCodec::extract`].
    pub fn with_reference(mut self, reference: Carrier) -> Self {
        self.reference = Some(reference);
        self
    }

    /// Number of payload bytes to extract.
    pub fn with_length(mut self, length: Option<usize>) -> Self {
        self.length = length;
        self
    }

    pub fn strength(&self) -> Strength {
        self.strength
    }

    fn channel_count(&self, carrier: &Carrier) -> usize {
        match self.channels {
            ChannelSelection::First => carrier.channels().min(1),
            ChannelSelection::All => carrier.channels(),
        }
    }

    /// Absolute strength used for the cover spectrum of one channel.
    fn strength_for(&self, cover: &Grid<Complex64>) -> f64 {
        let fixed = |alpha: f64| alpha * cover.len() as f64;
        match self.strength {
            Strength::Fixed(alpha) => fixed(alpha),
            Strength::Centralized => {
                let range = centralize(cover);
                if range.span() > MIN_SPAN {
                    range.span()
                } else {
                    warn!("degenerate spectrum, falling back to fixed strength");
                    fixed(DEFAULT_ALPHA)
                }
            }
        }
    }
}

impl SpectralCodec for DifferentialSpectrum {
    fn capacity(&self, carrier: &Carrier) -> Result<usize> {
        validate_geometry(carrier)?;

        Ok(slot_count(carrier.width(), carrier.height()) * self.channel_count(carrier))
    }

    fn embed(&self, carrier: &mut Carrier, payload: &[u8]) -> Result<()> {
        let available = self.capacity(carrier)?;
        if payload.len() > available {
            return Err(StegError::PayloadTooLarge {
                required: payload.len(),
                available,
            });
        }

        let usable: Vec<(usize, usize)> = slots(carrier.width(), carrier.height()).collect();
        let mut scratch = carrier.clone();
        'channels: for (channel, chunk) in payload.chunks(usable.len()).enumerate() {
            let cover = spectrum_of(&scratch.plane(channel, SAMPLE_SCALE))?;
            let strength = self.strength_for(&cover);
            debug!("channel {channel}: strength {strength}");

            let mut spectrum = cover.clone();
            for pass in 0..MAX_PASSES {
                for (&(x, y), &byte) in usable.iter().zip(chunk) {
                    let wanted = cover[(x, y)].re + f64::from(byte) / SAMPLE_SCALE * strength;
                    let delta = wanted - spectrum[(x, y)].re;
                    add_real(&mut spectrum, x, y, delta);
                }
                let mut plane = plane_of(&spectrum)?;
                fit_range(&mut plane, 1.0);
                scratch.store_plane(channel, &plane, SAMPLE_SCALE);

                spectrum = spectrum_of(&scratch.plane(channel, SAMPLE_SCALE))?;
                let lost = usable
                    .iter()
                    .zip(chunk)
                    .filter(|(slot, byte)| {
                        let delta = spectrum[**slot].re - cover[**slot].re;
                        recover(delta, strength).abs_diff(**byte) > SAMPLE_TOLERANCE
                    })
                    .count();
                if lost == 0 {
                    continue 'channels;
                }
                trace!("channel {channel}: {lost} samples lost in pass {pass}");
            }

            return Err(StegError::ChannelSaturated { channel });
        }
        *carrier = scratch;

        Ok(())
    }

    fn extract(&self, carrier: &Carrier) -> Result<Vec<u8>> {
        let reference = self.reference.as_ref().ok_or(StegError::MissingReference)?;
        if !reference.same_geometry(carrier) {
            return Err(StegError::ReferenceMismatch);
        }

        let available = self.capacity(carrier)?;
        let count = self.length.unwrap_or(available);
        if count > available {
            return Err(StegError::CapacityExceeded {
                declared: count as u64,
                available,
            });
        }

        let (width, height) = (carrier.width(), carrier.height());
        let mut payload = Vec::new();
        payload
            .try_reserve_exact(count)
            .map_err(|_| StegError::AllocationFailure(count))?;

        for channel in 0..self.channel_count(carrier) {
            if payload.len() == count {
                break;
            }
            let cover = spectrum_of(&reference.plane(channel, SAMPLE_SCALE))?;
            let stego = spectrum_of(&carrier.plane(channel, SAMPLE_SCALE))?;
            let strength = self.strength_for(&cover);

            for (x, y) in slots(width, height).take(count - payload.len()) {
                payload.push(recover(stego[(x, y)].re - cover[(x, y)].re, strength));
            }
        }

        if self.length.is_none() {
            while payload.last() == Some(&0) {
                payload.pop();
            }
        }

        Ok(payload)
    }
}

/// Payload byte carried by a bin that moved by `delta`.
fn recover(delta: f64, strength: f64) -> u8 {
    quantize(SAMPLE_SCALE * delta / strength)
}
