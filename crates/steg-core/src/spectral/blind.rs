use log::{debug, trace};
use steg_signal::{Complex64, Grid};

use super::{
    add_real, fit_range, plane_of, slot_count, slots, spectrum_of, validate_geometry,
    SpectralCodec, MAX_PASSES,
};
use crate::error::StegError;
use crate::framing::{self, BitSink, BYTE_BITS, LENGTH_PREFIX_BYTES};
use crate::result::Result;
use crate::Carrier;

const ZERO_CENTER: f64 = 0.25;
const ONE_CENTER: f64 = 0.75;
const THRESHOLD: f64 = 0.5;
const SAMPLE_MAX: f64 = u8::MAX as f64;

/// Self-contained spectral embedding.
///
/// Each usable bin carries one bit in the fractional part of `Re / step` with
/// `step = W * H`. A sample change of one level moves a bin by at most one, so
/// a quarter step of margin survives the rounding back to 8 bit samples.
/// Bits run across all channels, channel-major, starting with an 8 byte
/// little-endian length prefix.
///
/// Every channel is read back from its stored samples before the embedding
/// is accepted. Channels that clip too much to keep their bits fail with
/// [`StegError::ChannelSaturated`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BlindSpectrum;

impl BlindSpectrum {
    pub fn new() -> Self {
        Self
    }
}

fn step(carrier: &Carrier) -> f64 {
    (carrier.width() * carrier.height()) as f64
}

/// Moves a bin to the nearest center encoding `bit`.
fn write_bit(spectrum: &mut Grid<Complex64>, x: usize, y: usize, bit: bool, step: f64) {
    let value = spectrum[(x, y)].re;
    let center = if bit { ONE_CENTER } else { ZERO_CENTER };
    let cell = (value / step - center).round();
    add_real(spectrum, x, y, (cell + center) * step - value);
}

fn read_bit(value: f64, step: f64) -> bool {
    (value / step).rem_euclid(1.0) >= THRESHOLD
}

impl SpectralCodec for BlindSpectrum {
    fn capacity(&self, carrier: &Carrier) -> Result<usize> {
        validate_geometry(carrier)?;
        let bits = slot_count(carrier.width(), carrier.height()) * carrier.channels();

        Ok((bits / BYTE_BITS).saturating_sub(LENGTH_PREFIX_BYTES))
    }

    fn embed(&self, carrier: &mut Carrier, payload: &[u8]) -> Result<()> {
        let available = self.capacity(carrier)?;
        if payload.len() > available {
            return Err(StegError::PayloadTooLarge {
                required: payload.len(),
                available,
            });
        }

        let (width, height) = (carrier.width(), carrier.height());
        let step = step(carrier);
        let prefix = framing::encode_length(payload.len());
        let message: Vec<bool> = framing::bits(&prefix)
            .chain(framing::bits(payload))
            .collect();

        let usable: Vec<(usize, usize)> = slots(width, height).collect();
        let mut scratch = carrier.clone();
        'channels: for (channel, chunk) in message.chunks(usable.len()).enumerate() {
            let mut spectrum = spectrum_of(&scratch.plane(channel, 1.0))?;
            for pass in 0..MAX_PASSES {
                for (&(x, y), &bit) in usable.iter().zip(chunk) {
                    write_bit(&mut spectrum, x, y, bit, step);
                }
                let mut plane = plane_of(&spectrum)?;
                fit_range(&mut plane, SAMPLE_MAX);
                scratch.store_plane(channel, &plane, 1.0);

                spectrum = spectrum_of(&scratch.plane(channel, 1.0))?;
                let lost = usable
                    .iter()
                    .zip(chunk)
                    .filter(|(slot, bit)| read_bit(spectrum[**slot].re, step) != **bit)
                    .count();
                if lost == 0 {
                    debug!("channel {channel}: {} bits written", chunk.len());
                    continue 'channels;
                }
                trace!("channel {channel}: {lost} bits lost in pass {pass}");
            }

            return Err(StegError::ChannelSaturated { channel });
        }
        *carrier = scratch;

        Ok(())
    }

    fn extract(&self, carrier: &Carrier) -> Result<Vec<u8>> {
        let available = self.capacity(carrier)?;
        let mut reader = SpectrumBits::new(carrier);

        let prefix = reader.read_bytes(LENGTH_PREFIX_BYTES)?;
        let declared = framing::decode_length(&prefix);
        debug!("declared payload length {declared}");
        if declared > available as u64 {
            return Err(StegError::CapacityExceeded {
                declared,
                available,
            });
        }

        reader.read_bytes(declared as usize)
    }
}

/// Lazily walks the usable bins of every channel, one spectrum at a time.
struct SpectrumBits<'a> {
    carrier: &'a Carrier,
    step: f64,
    slots: Vec<(usize, usize)>,
    channel: usize,
    position: usize,
    spectrum: Option<Grid<Complex64>>,
}

impl<'a> SpectrumBits<'a> {
    fn new(carrier: &'a Carrier) -> Self {
        Self {
            carrier,
            step: step(carrier),
            slots: slots(carrier.width(), carrier.height()).collect(),
            channel: 0,
            position: 0,
            spectrum: None,
        }
    }

    fn next_bit(&mut self) -> Result<Option<bool>> {
        if self.position == self.slots.len() {
            self.channel += 1;
            self.position = 0;
            self.spectrum = None;
        }
        if self.slots.is_empty() || self.channel >= self.carrier.channels() {
            return Ok(None);
        }
        if self.spectrum.is_none() {
            self.spectrum = Some(spectrum_of(&self.carrier.plane(self.channel, 1.0))?);
        }

        let (x, y) = self.slots[self.position];
        self.position += 1;

        Ok(self
            .spectrum
            .as_ref()
            .map(|spectrum| read_bit(spectrum[(x, y)].re, self.step)))
    }

    fn read_bytes(&mut self, count: usize) -> Result<Vec<u8>> {
        let mut sink = BitSink::with_capacity(count);
        for _ in 0..count * BYTE_BITS {
            match self.next_bit()? {
                Some(bit) => sink.push(bit)?,
                None => break,
            }
        }

        Ok(sink.into_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noise(width: usize, height: usize, channels: usize, seed: u64) -> Carrier {
        let mut rng = fastrand::Rng::with_seed(seed);
        Carrier::from_fn(width, height, channels, |_, _, _| rng.u8(..))
    }

    #[test]
    fn bit_centers_should_sit_a_quarter_step_from_the_threshold() {
        let step = 64.0;
        let plane = Grid::from_vec(8, 8, vec![3.0; 64]).unwrap();
        let mut spectrum = spectrum_of(&plane).unwrap();

        write_bit(&mut spectrum, 1, 1, true, step);
        write_bit(&mut spectrum, 2, 1, false, step);

        assert!(read_bit(spectrum[(1, 1)].re, step));
        assert!(!read_bit(spectrum[(2, 1)].re, step));
        assert!(((spectrum[(1, 1)].re / step).rem_euclid(1.0) - ONE_CENTER).abs() < 1e-9);
        assert!((spectrum[(7, 7)].re - spectrum[(1, 1)].re).abs() < 1e-9);
    }

    #[test]
    fn negative_coefficients_should_decode_by_their_fraction() {
        assert!(read_bit(-0.2 * 16.0, 16.0));
        assert!(!read_bit(-0.7 * 16.0, 16.0));
    }

    #[test]
    fn capacity_should_count_bits_of_all_channels_minus_the_prefix() {
        let codec = BlindSpectrum::new();

        // 14 * 30 slots per channel
        assert_eq!(codec.capacity(&Carrier::new(32, 32, 3)).unwrap(), 1260 / 8 - 8);
        assert_eq!(codec.capacity(&Carrier::new(8, 4, 1)).unwrap(), 0);
    }

    #[test]
    fn should_round_trip_on_a_noisy_rgb_carrier() {
        let codec = BlindSpectrum::new();
        let mut carrier = noise(32, 32, 3, 7);
        let payload = b"spectral secret";

        codec.embed(&mut carrier, payload).unwrap();

        assert_eq!(codec.extract(&carrier).unwrap(), payload);
    }

    #[test]
    fn should_round_trip_across_channel_boundaries() {
        let codec = BlindSpectrum::new();
        let mut carrier = noise(16, 16, 3, 11);
        // 84 bits per channel, so the payload spills into the third channel
        let payload: Vec<u8> = (0..20).collect();
        assert_eq!(codec.capacity(&carrier).unwrap(), 23);

        codec.embed(&mut carrier, &payload).unwrap();

        assert_eq!(codec.extract(&carrier).unwrap(), payload);
    }

    #[test]
    fn should_fill_the_carrier_to_capacity() {
        let codec = BlindSpectrum::new();
        let mut rng = fastrand::Rng::with_seed(42);
        for (width, height, channels) in [(16, 16, 3), (32, 8, 2), (32, 32, 1)] {
            let mut carrier = Carrier::from_fn(width, height, channels, |_, _, _| rng.u8(64..=192));
            let capacity = codec.capacity(&carrier).unwrap();
            let payload: Vec<u8> = (0..capacity).map(|_| rng.u8(..)).collect();

            codec.embed(&mut carrier, &payload).unwrap();

            assert_eq!(codec.extract(&carrier).unwrap(), payload, "{width}x{height}x{channels}");
        }
    }

    #[test]
    fn should_shift_saturated_carriers_into_range() {
        let codec = BlindSpectrum::new();
        for level in [0, 255] {
            let mut carrier = Carrier::from_fn(32, 32, 1, |_, _, _| level);

            codec.embed(&mut carrier, b"hello").unwrap();

            assert_eq!(codec.extract(&carrier).unwrap(), b"hello", "level {level}");
        }
    }

    #[test]
    fn should_round_trip_or_refuse_a_high_contrast_carrier() {
        let codec = BlindSpectrum::new();
        let checkerboard =
            Carrier::from_fn(32, 32, 1, |x, y, _| if (x + y) % 2 == 0 { 0 } else { 255 });
        let mut carrier = checkerboard.clone();

        match codec.embed(&mut carrier, b"hello") {
            Ok(()) => assert_eq!(codec.extract(&carrier).unwrap(), b"hello"),
            Err(error) => {
                assert!(matches!(error, StegError::ChannelSaturated { channel: 0 }));
                assert_eq!(carrier, checkerboard);
            }
        }
    }

    #[test]
    fn should_round_trip_an_empty_payload() {
        let codec = BlindSpectrum::new();
        let mut carrier = noise(16, 16, 1, 3);

        codec.embed(&mut carrier, &[]).unwrap();

        assert!(codec.extract(&carrier).unwrap().is_empty());
    }

    #[test]
    fn should_refuse_oversized_payloads_and_keep_the_carrier() {
        let codec = BlindSpectrum::new();
        let mut carrier = noise(16, 16, 1, 5);
        let before = carrier.clone();

        let result = codec.embed(&mut carrier, &[0u8; 3]);

        assert!(matches!(
            result,
            Err(StegError::PayloadTooLarge {
                required: 3,
                available: 2
            })
        ));
        assert_eq!(carrier, before);
    }

    #[test]
    fn should_reject_invalid_geometry() {
        let codec = BlindSpectrum::new();
        let mut carrier = Carrier::new(12, 8, 1);

        assert!(matches!(
            codec.embed(&mut carrier, b"x"),
            Err(StegError::InvalidDimension { .. })
        ));
    }
}
