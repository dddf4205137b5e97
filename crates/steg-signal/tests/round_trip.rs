use steg_signal::{
    dct2d, fft, fft2d, idct2d, ifft, ifft2d, Block, Complex64, Grid, BLOCK_SIZE,
};

const TOLERANCE: f64 = 1e-9;

fn random_signal(rng: &mut fastrand::Rng, n: usize) -> Vec<Complex64> {
    (0..n)
        .map(|_| Complex64::new(rng.f64() * 512.0 - 256.0, rng.f64() * 512.0 - 256.0))
        .collect()
}

#[test]
fn ifft_of_fft_is_identity_for_all_power_of_two_sizes() {
    let mut rng = fastrand::Rng::with_seed(0x5eed);

    for exponent in 0..=10 {
        let n = 1 << exponent;
        let signal = random_signal(&mut rng, n);
        let restored = ifft(&fft(&signal).unwrap()).unwrap();

        for (i, (a, b)) in signal.iter().zip(restored.iter()).enumerate() {
            assert!(
                (a.re - b.re).abs() < TOLERANCE && (a.im - b.im).abs() < TOLERANCE,
                "n = {n}, sample {i}: {a} != {b}"
            );
        }
    }
}

#[test]
fn ifft2d_of_fft2d_restores_an_image_channel() {
    let mut rng = fastrand::Rng::with_seed(42);
    let (width, height) = (32, 16);
    let pixels: Vec<Complex64> = (0..width * height)
        .map(|_| Complex64::new(rng.u8(..) as f64, 0.0))
        .collect();
    let grid = Grid::from_vec(width, height, pixels).unwrap();

    let restored = ifft2d(&fft2d(&grid).unwrap()).unwrap();

    for (a, b) in grid.iter().zip(restored.iter()) {
        assert!((a.re - b.re).abs() < TOLERANCE);
        assert!(b.im.abs() < TOLERANCE, "real input must come back real");
    }
}

#[test]
fn idct2d_of_dct2d_is_identity() {
    let mut rng = fastrand::Rng::with_seed(7);

    for _ in 0..32 {
        let mut block: Block = [[0.0; BLOCK_SIZE]; BLOCK_SIZE];
        block
            .iter_mut()
            .flatten()
            .for_each(|v| *v = rng.f64());

        let restored = idct2d(&dct2d(&block));

        for (a, b) in block.iter().flatten().zip(restored.iter().flatten()) {
            assert!((a - b).abs() < TOLERANCE);
        }
    }
}
