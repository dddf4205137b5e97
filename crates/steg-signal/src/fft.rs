//! Recursive radix-2 decimation-in-time FFT and its separable 2D extension.

use std::f64::consts::PI;

use log::trace;
use num_complex::Complex64;

use crate::dft::{dft, idft};
use crate::error::{Result, SignalError};
use crate::grid::Grid;
use crate::Direction;

/// True for 1, 2, 4, 8, ...; false for zero.
#[inline]
pub fn is_power_of_two(n: usize) -> bool {
    n != 0 && (n & (n - 1)) == 0
}

fn ensure_power_of_two(n: usize) -> Result<()> {
    if is_power_of_two(n) {
        Ok(())
    } else {
        Err(SignalError::InvalidSize { len: n })
    }
}

/// Forward FFT.
///
/// # Errors
/// [`SignalError::InvalidSize`] unless `input.len()` is a non-zero power of two.
pub fn fft(input: &[Complex64]) -> Result<Vec<Complex64>> {
    ensure_power_of_two(input.len())?;
    Ok(radix2(input, Direction::Forward))
}

/// Inverse FFT, normalized by `1/n`.
///
/// # Errors
/// [`SignalError::InvalidSize`] unless `input.len()` is a non-zero power of two.
pub fn ifft(input: &[Complex64]) -> Result<Vec<Complex64>> {
    ensure_power_of_two(input.len())?;
    let n = input.len() as f64;
    Ok(radix2(input, Direction::Inverse)
        .into_iter()
        .map(|c| c / n)
        .collect())
}

/// Forward transform of any length: FFT for powers of two, naive DFT otherwise.
pub fn forward(input: &[Complex64]) -> Vec<Complex64> {
    if is_power_of_two(input.len()) {
        radix2(input, Direction::Forward)
    } else {
        dft(input)
    }
}

/// Inverse of [`forward`].
pub fn inverse(input: &[Complex64]) -> Vec<Complex64> {
    if is_power_of_two(input.len()) {
        let n = input.len() as f64;
        radix2(input, Direction::Inverse)
            .into_iter()
            .map(|c| c / n)
            .collect()
    } else {
        idft(input)
    }
}

/// Unnormalized radix-2 butterfly recursion. `input.len()` must be a power of two.
fn radix2(input: &[Complex64], direction: Direction) -> Vec<Complex64> {
    let n = input.len();
    if n == 1 {
        return vec![input[0]];
    }

    let half = n / 2;
    let even: Vec<Complex64> = input.iter().step_by(2).copied().collect();
    let odd: Vec<Complex64> = input.iter().skip(1).step_by(2).copied().collect();

    let even = radix2(&even, direction);
    let odd = radix2(&odd, direction);

    let mut output = vec![Complex64::new(0.0, 0.0); n];
    for k in 0..half {
        let angle = direction.sign() * 2.0 * PI * k as f64 / n as f64;
        let twiddle = Complex64::from_polar(1.0, angle) * odd[k];
        output[k] = even[k] + twiddle;
        output[k + half] = even[k] - twiddle;
    }

    output
}

fn ensure_power_of_two_grid<T>(grid: &Grid<T>) -> Result<()> {
    if is_power_of_two(grid.width()) && is_power_of_two(grid.height()) {
        Ok(())
    } else {
        Err(SignalError::InvalidDimension {
            width: grid.width(),
            height: grid.height(),
        })
    }
}

/// 2D forward FFT: every row, then every column.
///
/// # Errors
/// [`SignalError::InvalidDimension`] unless both sides are powers of two.
pub fn fft2d(input: &Grid<Complex64>) -> Result<Grid<Complex64>> {
    ensure_power_of_two_grid(input)?;
    trace!("fft2d over {}x{}", input.width(), input.height());
    Ok(separable(input, Direction::Forward))
}

/// 2D inverse FFT, normalized by `1/(width·height)`.
///
/// # Errors
/// [`SignalError::InvalidDimension`] unless both sides are powers of two.
pub fn ifft2d(input: &Grid<Complex64>) -> Result<Grid<Complex64>> {
    ensure_power_of_two_grid(input)?;
    trace!("ifft2d over {}x{}", input.width(), input.height());
    let scale = (input.width() * input.height()) as f64;
    Ok(separable(input, Direction::Inverse).map(|c| *c / scale))
}

fn separable(input: &Grid<Complex64>, direction: Direction) -> Grid<Complex64> {
    let mut output = input.clone();

    for y in 0..output.height() {
        let row = radix2(output.row(y), direction);
        output.row_mut(y).copy_from_slice(&row);
    }

    for x in 0..output.width() {
        let column = radix2(&output.column(x), direction);
        output.set_column(x, &column);
    }

    output
}
