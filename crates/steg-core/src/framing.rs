//! Length prefix and MSB-first bit streams shared by the embedding schemes.

use std::io::Cursor;

use bitstream_io::{BigEndian, BitRead, BitReader, BitWrite, BitWriter};
use byteorder::{ByteOrder, LittleEndian};

use crate::result::Result;

/// Size of the payload length prefix written by every self-describing scheme.
pub const LENGTH_PREFIX_BYTES: usize = std::mem::size_of::<u64>();

pub const BYTE_BITS: usize = 8;

pub fn encode_length(length: usize) -> [u8; LENGTH_PREFIX_BYTES] {
    let mut prefix = [0; LENGTH_PREFIX_BYTES];
    LittleEndian::write_u64(&mut prefix, length as u64);
    prefix
}

pub fn decode_length(prefix: &[u8]) -> u64 {
    LittleEndian::read_u64(prefix)
}

/// Every bit of `data`, most significant bit of each byte first.
pub fn bits(data: &[u8]) -> impl Iterator<Item = bool> + '_ {
    let mut reader = BitReader::endian(Cursor::new(data), BigEndian);
    (0..data.len() * BYTE_BITS).map_while(move |_| reader.read_bit().ok())
}

/// Collects bits MSB first back into bytes.
pub struct BitSink {
    writer: BitWriter<Vec<u8>, BigEndian>,
}

impl BitSink {
    pub fn with_capacity(bytes: usize) -> Self {
        Self {
            writer: BitWriter::endian(Vec::with_capacity(bytes), BigEndian),
        }
    }

    pub fn push(&mut self, bit: bool) -> Result<()> {
        self.writer.write_bit(bit)?;
        Ok(())
    }

    /// Completed bytes; a trailing partial byte is dropped.
    pub fn into_bytes(self) -> Vec<u8> {
        self.writer.into_writer()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn length_prefix_is_little_endian() {
        assert_eq!(encode_length(0x0102), [0x02, 0x01, 0, 0, 0, 0, 0, 0]);
        assert_eq!(decode_length(&[0x41, 0, 0, 0, 0, 0, 0, 0]), 0x41);
    }

    #[test]
    fn bits_should_start_with_the_most_significant_bit() {
        let collected: Vec<bool> = bits(&[0b1000_0001, 0b0100_0000]).collect();

        assert_eq!(collected.len(), 16);
        assert_eq!(
            &collected[..8],
            &[true, false, false, false, false, false, false, true]
        );
        assert!(collected[9]);
    }

    #[test]
    fn sink_should_rebuild_bytes() {
        let data = b"steg";
        let mut sink = BitSink::with_capacity(data.len());
        for bit in bits(data) {
            sink.push(bit).unwrap();
        }

        assert_eq!(sink.into_bytes(), data.to_vec());
    }
}
