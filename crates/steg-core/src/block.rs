//! Block codec: payload bits carried by coefficient parities of 8x8 DCT blocks.
//!
//! Every channel is cut into 8x8 blocks, enumerated block-column by
//! block-column. The first [`PREFIX_BLOCKS`] blocks of each channel hold the
//! little-endian length prefix, one byte per block spread over all slots,
//! repeated in every channel. The remaining blocks carry `compression` payload
//! bits each, channel after channel.
//!
//! A bit is the parity of the nearest integer of a mid-frequency coefficient of
//! the block normalized to `[0, 1]`.

use log::{debug, trace};
use steg_signal::{dct2d, idct2d, Block, BLOCK_SIZE};

use crate::carrier::quantize;
use crate::error::StegError;
use crate::framing::{self, BitSink, BYTE_BITS, LENGTH_PREFIX_BYTES};
use crate::result::Result;
use crate::Carrier;

/// Blocks per channel reserved for the length prefix.
pub const PREFIX_BLOCKS: usize = LENGTH_PREFIX_BYTES;

/// Highest supported compression level, one bit per slot.
pub const MAX_COMPRESSION: usize = SLOTS.len();

/// Embedding slots as `(u, v)`: column and row of the coefficient grid.
const SLOTS: [(usize, usize); 8] = [
    (2, 1),
    (1, 2),
    (3, 1),
    (2, 2),
    (1, 3),
    (4, 1),
    (3, 2),
    (2, 3),
];

const SAMPLE_SCALE: f64 = 255.0;
const MAX_PASSES: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockCodec {
    compression: usize,
}

impl Default for BlockCodec {
    fn default() -> Self {
        Self { compression: 1 }
    }
}

impl BlockCodec {
    /// `compression` is the number of payload bits per block, `1..=8`.
    pub fn new(compression: usize) -> Result<Self> {
        if !(1..=MAX_COMPRESSION).contains(&compression) {
            return Err(StegError::InvalidCompressionLevel(compression));
        }

        Ok(Self { compression })
    }

    pub fn compression(&self) -> usize {
        self.compression
    }

    /// Payload bytes `carrier` can take at this compression level.
    pub fn capacity(&self, carrier: &Carrier) -> Result<usize> {
        let layout = Layout::of(carrier)?;

        Ok((layout.per_channel - PREFIX_BLOCKS) * layout.channels * self.compression / BYTE_BITS)
    }

    /// Hides `payload` in `carrier`. The carrier is only modified on success.
    pub fn hide(&self, carrier: &mut Carrier, payload: &[u8]) -> Result<()> {
        let available = self.capacity(carrier)?;
        if payload.is_empty() {
            return Err(StegError::InvalidMessageLength(0));
        }
        if payload.len() > available {
            return Err(StegError::PayloadTooLarge {
                required: payload.len(),
                available,
            });
        }

        let layout = Layout::of(carrier)?;
        let prefix = framing::encode_length(payload.len());
        let mut scratch = carrier.clone();

        for channel in 0..layout.channels {
            for (index, byte) in prefix.iter().enumerate() {
                let bits: Vec<bool> = framing::bits(std::slice::from_ref(byte)).collect();
                embed(&mut scratch, &layout, channel, index, &bits)?;
            }
        }

        let bits: Vec<bool> = framing::bits(payload).collect();
        for ((channel, index), chunk) in layout
            .payload_blocks()
            .zip(bits.chunks(self.compression))
        {
            embed(&mut scratch, &layout, channel, index, chunk)?;
        }
        debug!(
            "{} payload bits in {} blocks",
            bits.len(),
            bits.len().div_ceil(self.compression)
        );

        *carrier = scratch;
        Ok(())
    }

    /// Recovers a payload hidden by [`BlockCodec::hide`] with the same compression.
    pub fn show(&self, carrier: &Carrier) -> Result<Vec<u8>> {
        let available = self.capacity(carrier)?;
        let layout = Layout::of(carrier)?;

        let declared = read_prefix(carrier, &layout)?;
        debug!("declared payload length {declared}");
        if declared == 0 {
            return Err(StegError::InvalidMessageLength(0));
        }
        if declared > available as u64 {
            return Err(StegError::CapacityExceeded {
                declared,
                available,
            });
        }

        let length = declared as usize;
        let mut sink = BitSink::with_capacity(length);
        let mut remaining = length * BYTE_BITS;
        for (channel, index) in layout.payload_blocks() {
            if remaining == 0 {
                break;
            }
            let take = remaining.min(self.compression);
            for bit in read(carrier, &layout, channel, index, take) {
                sink.push(bit)?;
            }
            remaining -= take;
        }

        Ok(sink.into_bytes())
    }
}

/// Block geometry of a carrier.
struct Layout {
    columns: usize,
    rows: usize,
    channels: usize,
    per_channel: usize,
}

impl Layout {
    fn of(carrier: &Carrier) -> Result<Self> {
        let (width, height) = (carrier.width(), carrier.height());
        if width % BLOCK_SIZE != 0 || height % BLOCK_SIZE != 0 {
            return Err(StegError::InvalidDimension {
                width,
                height,
                reason: "width and height must be multiples of 8",
            });
        }

        let (columns, rows) = (width / BLOCK_SIZE, height / BLOCK_SIZE);
        let per_channel = columns * rows;
        if per_channel <= PREFIX_BLOCKS || carrier.channels() == 0 {
            return Err(StegError::InvalidDimension {
                width,
                height,
                reason: "carrier needs more than 8 blocks per channel",
            });
        }

        Ok(Self {
            columns,
            rows,
            channels: carrier.channels(),
            per_channel,
        })
    }

    /// Top-left sample of the `index`-th block, block-columns outermost.
    fn origin(&self, index: usize) -> (usize, usize) {
        debug_assert!(index < self.columns * self.rows);
        (
            (index / self.rows) * BLOCK_SIZE,
            (index % self.rows) * BLOCK_SIZE,
        )
    }

    fn payload_blocks(&self) -> impl Iterator<Item = (usize, usize)> {
        let per_channel = self.per_channel;
        (0..self.channels).flat_map(move |channel| {
            (PREFIX_BLOCKS..per_channel).map(move |index| (channel, index))
        })
    }
}

fn load(carrier: &Carrier, layout: &Layout, channel: usize, index: usize) -> Block {
    let (x0, y0) = layout.origin(index);
    let mut block = [[0.0; BLOCK_SIZE]; BLOCK_SIZE];
    for (row, line) in block.iter_mut().enumerate() {
        for (column, value) in line.iter_mut().enumerate() {
            *value = f64::from(carrier.sample(x0 + column, y0 + row, channel)) / SAMPLE_SCALE;
        }
    }
    block
}

fn store(
    carrier: &mut Carrier,
    layout: &Layout,
    channel: usize,
    index: usize,
    samples: &[[u8; BLOCK_SIZE]; BLOCK_SIZE],
) {
    let (x0, y0) = layout.origin(index);
    for (row, line) in samples.iter().enumerate() {
        for (column, value) in line.iter().enumerate() {
            carrier.set_sample(x0 + column, y0 + row, channel, *value);
        }
    }
}

fn coefficient(coefficients: &Block, (u, v): (usize, usize)) -> f64 {
    coefficients[v][u]
}

fn parity(value: f64) -> bool {
    value.round().rem_euclid(2.0) == 1.0
}

/// `round(c) - (round(c) mod 2) + bit`
fn force_parity(value: f64, bit: bool) -> f64 {
    let rounded = value.round();
    rounded - rounded.rem_euclid(2.0) + f64::from(u8::from(bit))
}

/// The integer closest to `value` whose parity is `bit`.
fn nearest_with_parity(value: f64, bit: bool) -> f64 {
    let rounded = value.round();
    if parity(rounded) == bit {
        rounded
    } else if value >= rounded {
        rounded + 1.0
    } else {
        rounded - 1.0
    }
}

fn to_samples(block: &Block) -> [[u8; BLOCK_SIZE]; BLOCK_SIZE] {
    block.map(|line| line.map(|value| quantize(value * SAMPLE_SCALE)))
}

fn to_block(samples: &[[u8; BLOCK_SIZE]; BLOCK_SIZE]) -> Block {
    samples.map(|line| line.map(|value| f64::from(value) / SAMPLE_SCALE))
}

/// Writes `bits` into the first slots of one block.
///
/// The parities are checked on the 8 bit samples that will be stored. Slots
/// knocked off by clipping or rounding are moved to the nearest integer of
/// the wanted parity and the block is requantized, up to `MAX_PASSES` times.
fn embed(
    carrier: &mut Carrier,
    layout: &Layout,
    channel: usize,
    index: usize,
    bits: &[bool],
) -> Result<()> {
    let mut coefficients = dct2d(&load(carrier, layout, channel, index));
    for (&(u, v), &bit) in SLOTS.iter().zip(bits) {
        coefficients[v][u] = force_parity(coefficients[v][u], bit);
    }

    for pass in 0..MAX_PASSES {
        let samples = to_samples(&idct2d(&coefficients));
        let stored = dct2d(&to_block(&samples));
        let lost = SLOTS
            .iter()
            .zip(bits)
            .filter(|(slot, bit)| parity(coefficient(&stored, **slot)) != **bit)
            .count();

        if lost == 0 {
            store(carrier, layout, channel, index, &samples);
            return Ok(());
        }
        trace!("channel {channel} block {index}: {lost} slots lost in pass {pass}");

        coefficients = stored;
        for (&(u, v), &bit) in SLOTS.iter().zip(bits) {
            coefficients[v][u] = nearest_with_parity(coefficients[v][u], bit);
        }
    }

    Err(StegError::EmbeddingFailed {
        block: channel * layout.per_channel + index,
    })
}

fn read(
    carrier: &Carrier,
    layout: &Layout,
    channel: usize,
    index: usize,
    count: usize,
) -> Vec<bool> {
    let coefficients = dct2d(&load(carrier, layout, channel, index));
    SLOTS
        .iter()
        .take(count)
        .map(|&slot| parity(coefficient(&coefficients, slot)))
        .collect()
}

/// Decodes the length prefix; every channel must carry the same copy.
fn read_prefix(carrier: &Carrier, layout: &Layout) -> Result<u64> {
    let mut declared = None;
    for channel in 0..layout.channels {
        let mut sink = BitSink::with_capacity(LENGTH_PREFIX_BYTES);
        for index in 0..PREFIX_BLOCKS {
            for bit in read(carrier, layout, channel, index, SLOTS.len()) {
                sink.push(bit)?;
            }
        }
        let length = framing::decode_length(&sink.into_bytes());

        match declared {
            None => declared = Some(length),
            Some(first) if first != length => {
                debug!("channel {channel} declares {length}, channel 0 declares {first}");
                return Err(StegError::InvalidMessageLength(first));
            }
            Some(_) => {}
        }
    }

    Ok(declared.unwrap_or_default())
}
