use crate::spectral::{ChannelSelection, DifferentialSpectrum, SpectralStrategy, Strength};
use crate::{BlindSpectrum, Carrier};

/// Codec configuration for hiding and showing.
///
/// The codec choice decides the embedding domain, the stego image is always
/// written as PNG:
/// - `Lsb` → low bits of every sample
/// - `Fft` → global spectrum of a channel
/// - `Dct` → coefficient parities of 8x8 blocks
#[derive(Debug, Clone, PartialEq)]
pub enum CodecOptions {
    Lsb(LsbCodecOptions),
    Fft(FftCodecOptions),
    Dct(DctCodecOptions),
}

impl Default for CodecOptions {
    fn default() -> Self {
        Self::Lsb(LsbCodecOptions::default())
    }
}

/// Options for LSB (Least Significant Bit) embedding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LsbCodecOptions {
    /// Low bits of each sample used for payload bits: 1, 2, 4 or 8.
    ///
    /// Note this number influences the capacity directly.
    pub level: usize,

    /// Protect the payload with Hamming(7,4) before embedding.
    /// Doubles the stored size, corrects one flipped bit per nibble.
    pub ecc: bool,
}

impl Default for LsbCodecOptions {
    fn default() -> Self {
        Self { level: 1, ecc: false }
    }
}

impl LsbCodecOptions {
    pub fn with_level(mut self, level: usize) -> Self {
        self.level = level;
        self
    }

    pub fn with_ecc(mut self, ecc: bool) -> Self {
        self.ecc = ecc;
        self
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FftVariant {
    /// Self-contained, needs only the stego image.
    Blind,
    /// Needs the original cover image to extract.
    #[default]
    Differential,
}

/// Options for spectral (FFT) embedding
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FftCodecOptions {
    pub variant: FftVariant,
    /// Only used by the differential variant.
    pub strength: Strength,
    /// Only used by the differential variant, the blind one spans all channels.
    pub channels: ChannelSelection,
}

impl FftCodecOptions {
    pub fn with_variant(mut self, variant: FftVariant) -> Self {
        self.variant = variant;
        self
    }

    pub fn with_strength(mut self, strength: Strength) -> Self {
        self.strength = strength;
        self
    }

    pub fn with_channels(mut self, channels: ChannelSelection) -> Self {
        self.channels = channels;
        self
    }

    /// The strategy for these options, with the cover image and payload length
    /// a differential extraction works from.
    pub fn strategy(&self, original: Option<Carrier>, length: Option<usize>) -> SpectralStrategy {
        match self.variant {
            FftVariant::Blind => BlindSpectrum::new().into(),
            FftVariant::Differential => {
                let mut codec = DifferentialSpectrum::new()
                    .with_strength(self.strength)
                    .with_channels(self.channels)
                    .with_length(length);
                if let Some(original) = original {
                    codec = codec.with_reference(original);
                }
                codec.into()
            }
        }
    }
}

/// Options for block (DCT) embedding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DctCodecOptions {
    /// Payload bits per 8x8 block, 1 to 8.
    pub compression: usize,
}

impl Default for DctCodecOptions {
    fn default() -> Self {
        Self { compression: 1 }
    }
}

impl DctCodecOptions {
    pub fn with_compression(mut self, compression: usize) -> Self {
        self.compression = compression;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_should_match_the_documented_ones() {
        assert_eq!(
            CodecOptions::default(),
            CodecOptions::Lsb(LsbCodecOptions {
                level: 1,
                ecc: false
            })
        );
        let fft = FftCodecOptions::default();
        assert_eq!(fft.variant, FftVariant::Differential);
        assert_eq!(fft.strength, Strength::Fixed(0.1));
        assert_eq!(fft.channels, ChannelSelection::First);
        assert_eq!(DctCodecOptions::default().compression, 1);
    }

    #[test]
    fn strategy_should_follow_the_variant() {
        let blind = FftCodecOptions::default()
            .with_variant(FftVariant::Blind)
            .strategy(None, None);
        let differential = FftCodecOptions::default().strategy(None, Some(3));

        assert!(matches!(blind, SpectralStrategy::Blind(_)));
        assert!(matches!(differential, SpectralStrategy::Differential(_)));
    }
}
