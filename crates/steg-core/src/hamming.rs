//! Hamming(7,4) forward error correction.
//!
//! Every byte is split into its high and low nibble, each nibble becomes one
//! systematic 7 bit codeword `d0 d1 d2 d3 p0 p1 p2` stored in its own byte
//! (bit 6 = `d0` ... bit 0 = `p2`, bit 7 always clear). Decoding computes the
//! syndrome against the parity-check matrix and flips the single bit it points at.

use log::{debug, trace};

use crate::error::StegError;
use crate::result::Result;

const K: usize = 4;
const N: usize = 7;

/// Generator matrix `G = [I₄ | P]` over GF(2).
const GENERATOR: [[u8; N]; K] = [
    [1, 0, 0, 0, 1, 1, 0],
    [0, 1, 0, 0, 1, 0, 1],
    [0, 0, 1, 0, 0, 1, 1],
    [0, 0, 0, 1, 1, 1, 1],
];

/// Parity-check matrix `H = [Pᵀ | I₃]`, the dual of [`GENERATOR`].
const PARITY_CHECK: [[u8; N]; N - K] = [
    [1, 1, 0, 1, 1, 0, 0],
    [1, 0, 1, 1, 0, 1, 0],
    [0, 1, 1, 1, 0, 0, 1],
];

/// Outcome of decoding a codeword stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded {
    pub data: Vec<u8>,
    /// Number of codewords in which a single flipped bit was repaired.
    pub corrected: usize,
}

/// Encodes every byte into two codewords, high nibble first.
pub fn encode(data: &[u8]) -> Vec<u8> {
    data.iter()
        .flat_map(|byte| [encode_nibble(byte >> 4), encode_nibble(byte & 0x0f)])
        .collect()
}

/// Decodes a codeword stream, correcting up to one bit error per codeword.
pub fn decode(codewords: &[u8]) -> Result<Vec<u8>> {
    decode_with_report(codewords).map(|decoded| decoded.data)
}

/// Same as [`decode`], additionally reporting how many codewords were repaired.
pub fn decode_with_report(codewords: &[u8]) -> Result<Decoded> {
    if codewords.len() % 2 != 0 {
        return Err(StegError::OddCodewordCount(codewords.len()));
    }

    let mut corrected = 0;
    let data = codewords
        .chunks_exact(2)
        .map(|pair| {
            let (high, high_fixed) = decode_codeword(pair[0]);
            let (low, low_fixed) = decode_codeword(pair[1]);
            corrected += usize::from(high_fixed) + usize::from(low_fixed);
            (high << 4) | low
        })
        .collect();

    if corrected > 0 {
        debug!("hamming: corrected {corrected} codewords");
    }

    Ok(Decoded { data, corrected })
}

fn encode_nibble(nibble: u8) -> u8 {
    let data: [u8; K] = std::array::from_fn(|j| (nibble >> (K - 1 - j)) & 1);

    (0..N).fold(0, |codeword, i| {
        let bit = (0..K).fold(0, |sum, j| sum ^ (data[j] & GENERATOR[j][i]));
        codeword | (bit << (N - 1 - i))
    })
}

/// Returns the data nibble and whether a bit had to be flipped.
fn decode_codeword(codeword: u8) -> (u8, bool) {
    let mut bits: [u8; N] = std::array::from_fn(|i| (codeword >> (N - 1 - i)) & 1);

    let syndrome: [u8; N - K] = std::array::from_fn(|row| {
        (0..N).fold(0, |sum, i| sum ^ (bits[i] & PARITY_CHECK[row][i]))
    });

    let fixed = if syndrome.iter().any(|&s| s != 0) {
        let position =
            (0..N).find(|&i| (0..N - K).all(|row| PARITY_CHECK[row][i] == syndrome[row]));
        if let Some(i) = position {
            trace!("hamming: flipping bit {i} of codeword {codeword:#09b}");
            bits[i] ^= 1;
        }
        position.is_some()
    } else {
        false
    };

    let nibble = bits[..K].iter().fold(0, |nibble, bit| (nibble << 1) | bit);
    (nibble, fixed)
}
