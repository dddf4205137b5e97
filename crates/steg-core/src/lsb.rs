//! Bit-plane codec: payload bits replace the low `level` bits of each carrier byte.
//!
//! Layout: an 8 byte little endian length prefix followed by the payload. Every
//! source byte is spread over `stride = 8 / level` consecutive carrier bytes,
//! the first carrier byte of a group taking the most significant bits.

use log::debug;

use crate::error::StegError;
use crate::framing::{decode_length, encode_length, BYTE_BITS, LENGTH_PREFIX_BYTES};
use crate::result::Result;

/// Bit-plane codec for a fixed bit depth.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LsbCodec {
    level: usize,
}

impl LsbCodec {
    /// `level` is the number of low bits used per carrier byte, one of 1, 2, 4 or 8.
    pub fn new(level: usize) -> Result<Self> {
        let in_range = level > 0 && level <= BYTE_BITS;
        if !in_range || !level.is_power_of_two() {
            return Err(StegError::InvalidCompressionLevel(level));
        }

        Ok(Self { level })
    }

    #[inline]
    pub fn level(&self) -> usize {
        self.level
    }

    /// Carrier bytes consumed per payload byte.
    #[inline]
    pub fn stride(&self) -> usize {
        BYTE_BITS / self.level
    }

    /// Payload bytes a carrier of `carrier_len` bytes can hold, after the length prefix.
    pub fn capacity(&self, carrier_len: usize) -> usize {
        (carrier_len / self.stride()).saturating_sub(LENGTH_PREFIX_BYTES)
    }

    /// Writes length prefix and payload into `carrier`.
    ///
    /// The carrier is left untouched when the payload does not fit.
    pub fn hide(&self, carrier: &mut [u8], payload: &[u8]) -> Result<()> {
        let available = self.capacity(carrier.len());
        if payload.len() > available {
            return Err(StegError::PayloadTooLarge {
                required: payload.len(),
                available,
            });
        }
        debug!(
            "lsb: hiding {} bytes at level {} ({} of {} carrier bytes)",
            payload.len(),
            self.level,
            (LENGTH_PREFIX_BYTES + payload.len()) * self.stride(),
            carrier.len()
        );

        let prefix = encode_length(payload.len());
        for (group, byte) in carrier
            .chunks_exact_mut(self.stride())
            .zip(prefix.iter().chain(payload.iter()))
        {
            self.conceal(group, *byte);
        }

        Ok(())
    }

    /// Reads the length prefix, validates it and returns that many payload bytes.
    pub fn show(&self, carrier: &[u8]) -> Result<Vec<u8>> {
        let stride = self.stride();
        if carrier.len() < LENGTH_PREFIX_BYTES * stride {
            return Err(StegError::InvalidCarrierBuffer {
                expected: LENGTH_PREFIX_BYTES * stride,
                actual: carrier.len(),
            });
        }

        let mut groups = carrier.chunks_exact(stride);
        let prefix: Vec<u8> = groups
            .by_ref()
            .take(LENGTH_PREFIX_BYTES)
            .map(|group| self.reveal(group))
            .collect();
        let declared = decode_length(&prefix);

        let available = self.capacity(carrier.len());
        if declared > available as u64 {
            return Err(StegError::CapacityExceeded {
                declared,
                available,
            });
        }
        let length = declared as usize;
        debug!("lsb: declared payload of {length} bytes at level {}", self.level);

        let mut payload = Vec::new();
        payload
            .try_reserve_exact(length)
            .map_err(|_| StegError::AllocationFailure(length))?;
        payload.extend(groups.take(length).map(|group| self.reveal(group)));

        Ok(payload)
    }

    #[inline]
    fn mask(&self) -> u8 {
        ((1u16 << self.level) - 1) as u8
    }

    fn conceal(&self, group: &mut [u8], byte: u8) {
        let mask = self.mask();
        for (i, sample) in group.iter_mut().enumerate() {
            let shift = BYTE_BITS - (i + 1) * self.level;
            *sample = (*sample & !mask) | ((byte >> shift) & mask);
        }
    }

    fn reveal(&self, group: &[u8]) -> u8 {
        let mask = self.mask();
        group.iter().enumerate().fold(0, |byte, (i, sample)| {
            let shift = BYTE_BITS - (i + 1) * self.level;
            byte | ((sample & mask) << shift)
        })
    }
}
