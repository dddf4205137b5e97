//! Naive O(n²) discrete Fourier transform.
//!
//! Serves as the reference the radix-2 FFT is checked against and as the
//! fallback for lengths that are not a power of two.

use std::f64::consts::PI;

use num_complex::Complex64;

use crate::Direction;

/// Forward DFT: `X[k] = Σ x[m]·e^(-2πi·km/n)`.
pub fn dft(input: &[Complex64]) -> Vec<Complex64> {
    naive(input, Direction::Forward)
}

/// Inverse DFT, normalized by `1/n`.
pub fn idft(input: &[Complex64]) -> Vec<Complex64> {
    let n = input.len() as f64;
    naive(input, Direction::Inverse)
        .into_iter()
        .map(|c| c / n)
        .collect()
}

fn naive(input: &[Complex64], direction: Direction) -> Vec<Complex64> {
    let n = input.len();
    (0..n)
        .map(|k| {
            input
                .iter()
                .enumerate()
                .map(|(m, x)| {
                    // reduce k*m first, keeps the angle small for long inputs
                    let phase = ((k * m) % n) as f64 / n as f64;
                    x * Complex64::from_polar(1.0, direction.sign() * 2.0 * PI * phase)
                })
                .sum()
        })
        .collect()
}
