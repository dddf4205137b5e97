//! Builder style entry points and the in-memory pipelines behind them.

pub mod hide;
pub mod show;

use log::{debug, warn};

use crate::block::BlockCodec;
use crate::media::CodecOptions;
use crate::lsb::LsbCodec;
use crate::result::Result;
use crate::spectral::SpectralCodec;
use crate::{hamming, Carrier};

/// Hides `payload` in `carrier` with the codec chosen by `options`.
pub fn conceal(carrier: &mut Carrier, payload: &[u8], options: &CodecOptions) -> Result<()> {
    match options {
        CodecOptions::Lsb(opts) => {
            let codec = LsbCodec::new(opts.level)?;
            if opts.ecc {
                let protected = hamming::encode(payload);
                debug!(
                    "ecc: {} payload bytes as {} codewords",
                    payload.len(),
                    protected.len()
                );
                codec.hide(carrier.as_bytes_mut(), &protected)
            } else {
                codec.hide(carrier.as_bytes_mut(), payload)
            }
        }
        CodecOptions::Fft(opts) => opts.strategy(None, None).embed(carrier, payload),
        CodecOptions::Dct(opts) => BlockCodec::new(opts.compression)?.hide(carrier, payload),
    }
}

/// Recovers a payload from `carrier`.
///
/// `original` and `length` are only used by the differential FFT variant.
pub fn reveal(
    carrier: &Carrier,
    options: &CodecOptions,
    original: Option<Carrier>,
    length: Option<usize>,
) -> Result<Vec<u8>> {
    match options {
        CodecOptions::Lsb(opts) => {
            let raw = LsbCodec::new(opts.level)?.show(carrier.as_bytes())?;
            if !opts.ecc {
                return Ok(raw);
            }
            let decoded = hamming::decode_with_report(&raw)?;
            if decoded.corrected > 0 {
                warn!("ecc corrected {} codewords", decoded.corrected);
            }
            Ok(decoded.data)
        }
        CodecOptions::Fft(opts) => opts.strategy(original, length).extract(carrier),
        CodecOptions::Dct(opts) => BlockCodec::new(opts.compression)?.show(carrier),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::{DctCodecOptions, FftCodecOptions, FftVariant, LsbCodecOptions};
    use crate::StegError;

    fn grey(width: usize, height: usize, channels: usize) -> Carrier {
        let mut rng = fastrand::Rng::with_seed(42);
        Carrier::from_fn(width, height, channels, |_, _, _| rng.u8(100..=156))
    }

    #[test]
    fn should_round_trip_every_codec() {
        let payload = b"hidden";
        let all = [
            CodecOptions::Lsb(LsbCodecOptions::default().with_level(2)),
            CodecOptions::Lsb(LsbCodecOptions::default().with_ecc(true)),
            CodecOptions::Fft(FftCodecOptions::default().with_variant(FftVariant::Blind)),
            CodecOptions::Dct(DctCodecOptions::default().with_compression(2)),
        ];

        for options in all.iter() {
            let mut carrier = grey(64, 64, 3);
            conceal(&mut carrier, payload, options).unwrap();

            assert_eq!(
                reveal(&carrier, options, None, None).unwrap(),
                payload,
                "{options:?}"
            );
        }
    }

    #[test]
    fn ecc_should_repair_a_flipped_bit() {
        let options = CodecOptions::Lsb(LsbCodecOptions::default().with_ecc(true));
        let mut carrier = grey(16, 16, 1);
        conceal(&mut carrier, b"ok", &options).unwrap();

        // 64 prefix samples, then bit 7 (unused) and bit 6 of the first codeword
        carrier.as_bytes_mut()[65] ^= 1;

        assert_eq!(reveal(&carrier, &options, None, None).unwrap(), b"ok");
    }

    #[test]
    fn differential_fft_should_need_the_original() {
        let options = CodecOptions::Fft(FftCodecOptions::default());
        let original = grey(32, 32, 3);
        let mut carrier = original.clone();
        conceal(&mut carrier, &[50, 150], &options).unwrap();

        assert!(matches!(
            reveal(&carrier, &options, None, Some(2)),
            Err(StegError::MissingReference)
        ));
        let recovered = reveal(&carrier, &options, Some(original), Some(2)).unwrap();
        assert!(recovered[0].abs_diff(50) <= 2);
        assert!(recovered[1].abs_diff(150) <= 2);
    }
}
