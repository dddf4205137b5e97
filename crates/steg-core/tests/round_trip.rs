use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use steg_core::commands::{hide, show};
use steg_core::media::{load_carrier, Persist};
use steg_core::*;

fn write_cover(dir: &Path, width: usize, height: usize, channels: usize) -> PathBuf {
    let mut rng = fastrand::Rng::with_seed((width * height * channels) as u64);
    let file = dir.join("cover.png");
    Carrier::from_fn(width, height, channels, |_, _, _| rng.u8(90..=165))
        .save_as(&file)
        .unwrap();
    file
}

fn write_payload(dir: &Path, payload: &[u8]) -> PathBuf {
    let file = dir.join("payload.bin");
    fs::write(&file, payload).unwrap();
    file
}

fn hide_and_show(
    out_dir: &TempDir,
    cover: &Path,
    payload: &[u8],
    options: CodecOptions,
    original: Option<PathBuf>,
    length: Option<usize>,
) -> Vec<u8> {
    let secret = out_dir.path().join("secret.png");
    hide(
        cover,
        &secret,
        Some(write_payload(out_dir.path(), payload)),
        options.clone(),
    )
    .unwrap();

    let recovered = out_dir.path().join("recovered.bin");
    let shown = show(&secret, Some(recovered.clone()), original, length, options).unwrap();
    assert_eq!(fs::read(recovered).unwrap(), shown);

    shown
}

#[test]
fn lsb_should_round_trip_through_png_at_every_level() {
    let payload = b"The quick brown fox jumps over the lazy dog";
    for level in [1, 2, 4, 8] {
        let out_dir = TempDir::new().unwrap();
        let cover = write_cover(out_dir.path(), 32, 32, 4);
        let options = CodecOptions::Lsb(LsbCodecOptions::default().with_level(level));

        let shown = hide_and_show(&out_dir, &cover, payload, options, None, None);

        assert_eq!(shown, payload, "level {level}");
    }
}

#[test]
fn lsb_with_ecc_should_round_trip_through_png() {
    let out_dir = TempDir::new().unwrap();
    let cover = write_cover(out_dir.path(), 32, 32, 3);
    let options = CodecOptions::Lsb(LsbCodecOptions::default().with_level(2).with_ecc(true));

    let shown = hide_and_show(&out_dir, &cover, b"protected", options, None, None);

    assert_eq!(shown, b"protected");
}

#[test]
fn blind_fft_should_round_trip_through_png() {
    let out_dir = TempDir::new().unwrap();
    let cover = write_cover(out_dir.path(), 64, 32, 3);
    let options = CodecOptions::Fft(FftCodecOptions::default().with_variant(FftVariant::Blind));

    let shown = hide_and_show(&out_dir, &cover, b"no cover needed", options, None, None);

    assert_eq!(shown, b"no cover needed");
}

#[test]
fn differential_fft_should_round_trip_within_tolerance() {
    let out_dir = TempDir::new().unwrap();
    let cover = write_cover(out_dir.path(), 32, 32, 3);
    let options = CodecOptions::Fft(
        FftCodecOptions::default().with_channels(ChannelSelection::All),
    );
    let payload = [10u8, 99, 200, 42];

    let shown = hide_and_show(
        &out_dir,
        &cover,
        &payload,
        options,
        Some(cover.clone()),
        Some(payload.len()),
    );

    assert_eq!(shown.len(), payload.len());
    for (got, want) in shown.iter().zip(payload.iter()) {
        assert!(got.abs_diff(*want) <= 2, "{shown:?} vs {payload:?}");
    }
}

#[test]
fn dct_should_round_trip_through_png() {
    let out_dir = TempDir::new().unwrap();
    let cover = write_cover(out_dir.path(), 64, 64, 3);
    let payload: Vec<u8> = (0..40).map(|i| (i * 37 % 256) as u8).collect();
    let options = CodecOptions::Dct(DctCodecOptions::default().with_compression(4));

    let shown = hide_and_show(&out_dir, &cover, &payload, options, None, None);

    assert_eq!(shown, payload);
}

#[test]
fn grey_images_should_stay_single_channel() {
    let out_dir = TempDir::new().unwrap();
    let cover = write_cover(out_dir.path(), 32, 32, 1);
    let secret = out_dir.path().join("secret.png");

    hide(
        &cover,
        &secret,
        Some(write_payload(out_dir.path(), b"grey")),
        CodecOptions::default(),
    )
    .unwrap();

    assert_eq!(load_carrier(&secret).unwrap().channels(), 1);
}

#[test]
fn hiding_too_much_should_not_write_an_image() {
    let out_dir = TempDir::new().unwrap();
    let cover = write_cover(out_dir.path(), 8, 8, 1);
    let secret = out_dir.path().join("secret.png");

    let result = hide(
        &cover,
        &secret,
        Some(write_payload(out_dir.path(), b"way too long")),
        CodecOptions::default(),
    );

    assert!(matches!(result, Err(StegError::PayloadTooLarge { .. })));
    assert!(!secret.exists());
}

#[test]
fn fft_should_reject_non_power_of_two_images() {
    let out_dir = TempDir::new().unwrap();
    let cover = write_cover(out_dir.path(), 24, 16, 3);

    let result = hide(
        &cover,
        &out_dir.path().join("secret.png"),
        Some(write_payload(out_dir.path(), b"x")),
        CodecOptions::Fft(FftCodecOptions::default()),
    );

    assert!(matches!(result, Err(StegError::InvalidDimension { .. })));
}

#[test]
fn showing_from_a_clean_image_should_fail_for_dct() {
    let out_dir = TempDir::new().unwrap();
    let file = out_dir.path().join("clean.png");
    Carrier::from_fn(32, 32, 3, |_, _, _| 128)
        .save_as(&file)
        .unwrap();

    let result = show(
        &file,
        None,
        None,
        None,
        CodecOptions::Dct(DctCodecOptions::default()),
    );

    assert!(matches!(result, Err(StegError::InvalidMessageLength(0))));
}
