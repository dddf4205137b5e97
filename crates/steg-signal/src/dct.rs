//! Orthonormal 8x8 DCT-II and its inverse DCT-III.
//!
//! `X[k1][k2] = α(k1)·α(k2)·ΣΣ x[n1][n2]·cos(π/8·(n1+½)·k1)·cos(π/8·(n2+½)·k2)`
//! with `α(0) = √(1/8)` and `α(k>0) = √(2/8)`. The pair is energy preserving
//! and exactly invertible up to floating point rounding.

use std::f64::consts::PI;
use std::sync::OnceLock;

/// Side length of a DCT block.
pub const BLOCK_SIZE: usize = 8;

/// One 8x8 tile, indexed `block[row][column]`.
pub type Block = [[f64; BLOCK_SIZE]; BLOCK_SIZE];

struct CosTable {
    /// `cos[k][n] = cos(π/8·(n+½)·k)`
    cos: [[f64; BLOCK_SIZE]; BLOCK_SIZE],
    alpha: [f64; BLOCK_SIZE],
}

fn table() -> &'static CosTable {
    static TABLE: OnceLock<CosTable> = OnceLock::new();
    TABLE.get_or_init(|| {
        let n = BLOCK_SIZE as f64;
        let mut cos = [[0.0; BLOCK_SIZE]; BLOCK_SIZE];
        let mut alpha = [0.0; BLOCK_SIZE];
        for k in 0..BLOCK_SIZE {
            alpha[k] = if k == 0 {
                (1.0 / n).sqrt()
            } else {
                (2.0 / n).sqrt()
            };
            for (i, c) in cos[k].iter_mut().enumerate() {
                *c = (PI / n * (i as f64 + 0.5) * k as f64).cos();
            }
        }
        CosTable { cos, alpha }
    })
}

/// Orthonormal scaling factor of coefficient index `k`.
#[inline]
pub fn alpha(k: usize) -> f64 {
    table().alpha[k]
}

/// Forward 2D DCT-II, computed separably (rows, then columns).
pub fn dct2d(block: &Block) -> Block {
    let t = table();
    let mut rows = [[0.0; BLOCK_SIZE]; BLOCK_SIZE];
    for n1 in 0..BLOCK_SIZE {
        for k2 in 0..BLOCK_SIZE {
            let sum: f64 = (0..BLOCK_SIZE)
                .map(|n2| block[n1][n2] * t.cos[k2][n2])
                .sum();
            rows[n1][k2] = t.alpha[k2] * sum;
        }
    }

    let mut coefficients = [[0.0; BLOCK_SIZE]; BLOCK_SIZE];
    for k1 in 0..BLOCK_SIZE {
        for k2 in 0..BLOCK_SIZE {
            let sum: f64 = (0..BLOCK_SIZE)
                .map(|n1| rows[n1][k2] * t.cos[k1][n1])
                .sum();
            coefficients[k1][k2] = t.alpha[k1] * sum;
        }
    }

    coefficients
}

/// Inverse 2D DCT (type III), exact inverse of [`dct2d`].
pub fn idct2d(coefficients: &Block) -> Block {
    let t = table();
    let mut rows = [[0.0; BLOCK_SIZE]; BLOCK_SIZE];
    for k1 in 0..BLOCK_SIZE {
        for n2 in 0..BLOCK_SIZE {
            rows[k1][n2] = (0..BLOCK_SIZE)
                .map(|k2| t.alpha[k2] * coefficients[k1][k2] * t.cos[k2][n2])
                .sum();
        }
    }

    let mut block = [[0.0; BLOCK_SIZE]; BLOCK_SIZE];
    for n1 in 0..BLOCK_SIZE {
        for n2 in 0..BLOCK_SIZE {
            block[n1][n2] = (0..BLOCK_SIZE)
                .map(|k1| t.alpha[k1] * rows[k1][n2] * t.cos[k1][n1])
                .sum();
        }
    }

    block
}
