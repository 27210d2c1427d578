//! MSB-first bit packing shared by both codecs.
//!
//! This module provides the [`BitWriter`] and [`BitReader`] used to serialize
//! variable-width fields (LZ77 token triples, Shannon-Fano code tables and
//! codewords) into a byte stream and back, plus the free conversion helpers
//! between integers and bit sequences.
//!
//! # Bit Ordering
//!
//! Bits are packed MSB-first: the first bit written lands in the most
//! significant bit of the first byte.
//!
//! # End-of-stream trailer
//!
//! Every stream produced by [`BitWriter::finish`] ends with exactly two
//! trailer bytes:
//!
//! ```text
//! ... data bytes ... | last partial byte | valid bit count (0-7) |
//! ```
//!
//! The partial byte is zero-padded after its valid bits. A count of 0 means
//! the logical bit stream ended on a byte boundary and the partial byte is
//! pure padding. [`BitReader::from_trailed`] strips the trailer and limits
//! reads to the valid data region.
//!
//! # Example
//!
//! ```
//! use duopack_core::bitstream::{BitReader, BitWriter};
//!
//! let mut writer = BitWriter::new(Vec::new());
//! writer.write_bits(0b101, 3).unwrap();
//! writer.write_bits(0b1100, 4).unwrap();
//! let stream = writer.finish().unwrap();
//! assert_eq!(stream, vec![0b1011_1000, 7]);
//!
//! let mut reader = BitReader::from_trailed(&stream).unwrap();
//! assert_eq!(reader.read_bits(3).unwrap(), 0b101);
//! assert_eq!(reader.read_bits(4).unwrap(), 0b1100);
//! assert!(reader.is_empty());
//! ```

use crate::error::{DuopackError, Result};
use std::io::Write;

/// Number of trailer bytes at the end of every packed stream.
pub const TRAILER_LEN: usize = 2;

/// Split a byte into its 8 bits, most significant first.
pub fn bits_of_byte(byte: u8) -> [bool; 8] {
    let mut bits = [false; 8];
    for (i, bit) in bits.iter_mut().enumerate() {
        *bit = (byte >> (7 - i)) & 1 == 1;
    }
    bits
}

/// Assemble up to 8 bits (MSB first) into a byte.
///
/// Fewer than 8 bits fill the byte from the most significant end; the
/// remaining low bits are zero.
pub fn byte_of_bits(bits: &[bool]) -> u8 {
    bits.iter()
        .take(8)
        .enumerate()
        .fold(0u8, |byte, (i, &bit)| byte | ((bit as u8) << (7 - i)))
}

/// Render `value` as exactly `width` bits, MSB first, zero-padded.
///
/// A value that does not fit (`value >= 2^width`) yields all-zero bits.
/// Encoders never hand such values to the packer.
pub fn bits_of_uint(value: u32, width: u8) -> Vec<bool> {
    let width = width as u32;
    if width < 32 && value >> width != 0 {
        return vec![false; width as usize];
    }
    (0..width).rev().map(|i| (value >> i) & 1 == 1).collect()
}

/// Expand a byte slice into its bit sequence, MSB first.
pub fn bits_of_bytes(bytes: &[u8]) -> Vec<bool> {
    let mut bits = Vec::with_capacity(bytes.len() * 8);
    for &byte in bytes {
        bits.extend_from_slice(&bits_of_byte(byte));
    }
    bits
}

/// An MSB-first bit writer that wraps any `Write` implementation.
///
/// Bits are queued in a small buffer; whenever eight or more are queued,
/// whole bytes are drained to the underlying writer in order. Call
/// [`finish`](Self::finish) exactly once to append the end-of-stream trailer.
#[derive(Debug)]
pub struct BitWriter<W: Write> {
    /// Underlying writer.
    writer: W,
    /// Pending bits, right-aligned (oldest bit is the highest valid bit).
    buffer: u64,
    /// Number of pending bits in buffer (0-7 between calls).
    bits_in_buffer: u8,
    /// Total bits written.
    total_bits_written: u64,
}

impl<W: Write> BitWriter<W> {
    /// Create a new `BitWriter` wrapping the given writer.
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            buffer: 0,
            bits_in_buffer: 0,
            total_bits_written: 0,
        }
    }

    /// Get the total number of data bits written so far.
    pub fn bits_written(&self) -> u64 {
        self.total_bits_written
    }

    /// Drain complete bytes from the buffer to the writer.
    #[inline]
    fn drain_bytes(&mut self) -> Result<()> {
        if self.bits_in_buffer < 8 {
            return Ok(());
        }

        let mut bytes = [0u8; 8];
        let mut count = 0;
        while self.bits_in_buffer >= 8 {
            bytes[count] = (self.buffer >> (self.bits_in_buffer - 8)) as u8;
            self.bits_in_buffer -= 8;
            count += 1;
        }
        self.buffer &= (1u64 << self.bits_in_buffer) - 1;
        self.writer.write_all(&bytes[..count])?;
        Ok(())
    }

    /// Write the low `count` bits of `value`, most significant first.
    ///
    /// # Arguments
    ///
    /// * `value` - The bits to write; bits above `count` are ignored
    /// * `count` - Number of bits to write (0-32)
    #[inline]
    pub fn write_bits(&mut self, value: u32, count: u8) -> Result<()> {
        debug_assert!(count <= 32, "Cannot write more than 32 bits at once");

        if count == 0 {
            return Ok(());
        }

        let mask = if count == 32 {
            u32::MAX
        } else {
            (1u32 << count) - 1
        };

        self.buffer = (self.buffer << count) | (value & mask) as u64;
        self.bits_in_buffer += count;
        self.total_bits_written += count as u64;

        self.drain_bytes()
    }

    /// Write a single bit.
    #[inline]
    pub fn write_bit(&mut self, bit: bool) -> Result<()> {
        self.write_bits(bit as u32, 1)
    }

    /// Write a full byte (8 bits) at the current bit position.
    #[inline]
    pub fn write_byte(&mut self, byte: u8) -> Result<()> {
        self.write_bits(byte as u32, 8)
    }

    /// Write a bit sequence in order.
    pub fn write_code(&mut self, bits: &[bool]) -> Result<()> {
        for &bit in bits {
            self.write_bit(bit)?;
        }
        Ok(())
    }

    /// Append the 2-byte trailer, flush, and return the underlying writer.
    ///
    /// The trailer is written even when the data ends on a byte boundary
    /// (as `[0, 0]`).
    pub fn finish(mut self) -> Result<W> {
        let valid_bits = self.bits_in_buffer;
        let last_byte = if valid_bits == 0 {
            0
        } else {
            ((self.buffer << (8 - valid_bits)) & 0xFF) as u8
        };

        self.writer.write_all(&[last_byte, valid_bits])?;
        self.writer.flush()?;
        Ok(self.writer)
    }
}

/// An MSB-first bit reader over an in-memory data region.
///
/// The reader never reads past `bit_len`; any attempt to do so is reported
/// as [`DuopackError::UnexpectedEnd`].
#[derive(Debug, Clone)]
pub struct BitReader<'a> {
    /// Data bytes (the last one may be partially valid).
    data: &'a [u8],
    /// Number of valid bits in `data`.
    bit_len: u64,
    /// Current bit position (0 = MSB of first byte).
    position: u64,
}

impl<'a> BitReader<'a> {
    /// Create a reader over every bit of `data`.
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            bit_len: data.len() as u64 * 8,
            position: 0,
        }
    }

    /// Create a reader over a packed stream, stripping its 2-byte trailer.
    ///
    /// The data region is every byte before the trailer, followed by the
    /// first `valid_bits` bits of the trailer's partial byte.
    pub fn from_trailed(stream: &'a [u8]) -> Result<Self> {
        if stream.len() < TRAILER_LEN {
            return Err(DuopackError::invalid_trailer(format!(
                "stream is {} bytes, shorter than the {}-byte trailer",
                stream.len(),
                TRAILER_LEN
            )));
        }

        let full_bytes = stream.len() - TRAILER_LEN;
        let valid_bits = stream[stream.len() - 1];
        if valid_bits > 7 {
            return Err(DuopackError::invalid_trailer(format!(
                "valid bit count {} exceeds 7",
                valid_bits
            )));
        }

        Ok(Self {
            data: &stream[..full_bytes + 1],
            bit_len: full_bytes as u64 * 8 + valid_bits as u64,
            position: 0,
        })
    }

    /// Read up to 32 bits, most significant first.
    ///
    /// # Arguments
    ///
    /// * `count` - Number of bits to read (0-32)
    pub fn read_bits(&mut self, count: u8) -> Result<u32> {
        debug_assert!(count <= 32, "Cannot read more than 32 bits at once");

        if count == 0 {
            return Ok(0);
        }

        if count as u64 > self.bits_remaining() {
            return Err(DuopackError::unexpected_end(self.position, count as usize));
        }

        let mut result = 0u32;
        let mut remaining = count as u32;

        while remaining > 0 {
            let byte = self.data[(self.position / 8) as usize];
            let bits_in_byte = 8 - (self.position % 8) as u32;
            let take = remaining.min(bits_in_byte);

            let mask = ((1u16 << take) - 1) as u8;
            let bits = (byte >> (bits_in_byte - take)) & mask;

            result = (result << take) | bits as u32;
            self.position += take as u64;
            remaining -= take;
        }

        Ok(result)
    }

    /// Read a single bit.
    #[inline]
    pub fn read_bit(&mut self) -> Result<bool> {
        Ok(self.read_bits(1)? == 1)
    }

    /// Read 8 bits as a byte.
    #[inline]
    pub fn read_byte(&mut self) -> Result<u8> {
        Ok(self.read_bits(8)? as u8)
    }

    /// Number of unread bits in the data region.
    pub fn bits_remaining(&self) -> u64 {
        self.bit_len - self.position
    }

    /// Current bit position (for error reporting).
    pub fn bit_position(&self) -> u64 {
        self.position
    }

    /// Total number of valid bits in the data region.
    pub fn bit_len(&self) -> u64 {
        self.bit_len
    }

    /// Whether every valid bit has been consumed.
    pub fn is_empty(&self) -> bool {
        self.position >= self.bit_len
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bits_of_byte() {
        assert_eq!(
            bits_of_byte(0b1011_0001),
            [true, false, true, true, false, false, false, true]
        );
        assert_eq!(byte_of_bits(&bits_of_byte(0xA5)), 0xA5);
    }

    #[test]
    fn test_byte_of_partial_bits() {
        // Three bits fill from the MSB.
        assert_eq!(byte_of_bits(&[true, true, false]), 0b1100_0000);
        assert_eq!(byte_of_bits(&[]), 0);
    }

    #[test]
    fn test_bits_of_uint() {
        assert_eq!(bits_of_uint(5, 4), vec![false, true, false, true]);
        assert_eq!(bits_of_uint(0, 3), vec![false; 3]);
        assert_eq!(bits_of_uint(15, 4), vec![true; 4]);
        assert!(bits_of_uint(7, 0).is_empty());
    }

    #[test]
    fn test_bits_of_uint_overflow_is_zero() {
        assert_eq!(bits_of_uint(16, 4), vec![false; 4]);
        assert_eq!(bits_of_uint(4096, 12), vec![false; 12]);
    }

    #[test]
    fn test_bitwriter_msb_first() {
        let mut writer = BitWriter::new(Vec::new());
        for bit in [true, false, true, true, false, true, false, true] {
            writer.write_bit(bit).unwrap();
        }
        let stream = writer.finish().unwrap();
        assert_eq!(stream, vec![0xB5, 0x00, 0]);
    }

    #[test]
    fn test_bitwriter_trailer_partial_byte() {
        let mut writer = BitWriter::new(Vec::new());
        writer.write_bits(0xAB, 8).unwrap();
        writer.write_bits(0b11, 2).unwrap();
        assert_eq!(writer.bits_written(), 10);

        let stream = writer.finish().unwrap();
        assert_eq!(stream, vec![0xAB, 0b1100_0000, 2]);
    }

    #[test]
    fn test_bitwriter_empty_stream() {
        let writer = BitWriter::new(Vec::new());
        assert_eq!(writer.finish().unwrap(), vec![0, 0]);
    }

    #[test]
    fn test_bitwriter_masks_extra_bits() {
        let mut writer = BitWriter::new(Vec::new());
        writer.write_bits(0xFFFF_FFF1, 4).unwrap();
        writer.write_bits(0, 4).unwrap();
        assert_eq!(writer.finish().unwrap(), vec![0x10, 0, 0]);
    }

    #[test]
    fn test_bitwriter_wide_fields() {
        let mut writer = BitWriter::new(Vec::new());
        writer.write_bits(0x1234_5678, 32).unwrap();
        writer.write_bits(0b1, 1).unwrap();
        let stream = writer.finish().unwrap();
        assert_eq!(stream, vec![0x12, 0x34, 0x56, 0x78, 0x80, 1]);

        let mut reader = BitReader::from_trailed(&stream).unwrap();
        assert_eq!(reader.read_bits(32).unwrap(), 0x1234_5678);
        assert!(reader.read_bit().unwrap());
        assert!(reader.is_empty());
    }

    #[test]
    fn test_roundtrip_mixed_widths() {
        let mut writer = BitWriter::new(Vec::new());
        writer.write_bits(0b101, 3).unwrap();
        writer.write_bits(0b1111, 4).unwrap();
        writer.write_byte(0x5A).unwrap();
        writer.write_bits(0b110011, 6).unwrap();
        writer.write_code(&[true, false]).unwrap();
        let stream = writer.finish().unwrap();

        let mut reader = BitReader::from_trailed(&stream).unwrap();
        assert_eq!(reader.bit_len(), 23);
        assert_eq!(reader.read_bits(3).unwrap(), 0b101);
        assert_eq!(reader.read_bits(4).unwrap(), 0b1111);
        assert_eq!(reader.read_byte().unwrap(), 0x5A);
        assert_eq!(reader.read_bits(6).unwrap(), 0b110011);
        assert!(reader.read_bit().unwrap());
        assert!(!reader.read_bit().unwrap());
        assert!(reader.is_empty());
    }

    #[test]
    fn test_reader_stops_at_valid_bits() {
        // One valid bit in the partial byte; the padding 1s must be ignored.
        let stream = [0xFF, 0b1111_1111, 1];
        let mut reader = BitReader::from_trailed(&stream).unwrap();
        assert_eq!(reader.bits_remaining(), 9);
        assert_eq!(reader.read_bits(8).unwrap(), 0xFF);
        assert!(reader.read_bit().unwrap());
        let err = reader.read_bit().unwrap_err();
        assert!(matches!(err, DuopackError::UnexpectedEnd { bit_position: 9, .. }));
    }

    #[test]
    fn test_reader_zero_valid_bits() {
        let stream = [0x42, 0xFF, 0];
        let mut reader = BitReader::from_trailed(&stream).unwrap();
        assert_eq!(reader.bits_remaining(), 8);
        assert_eq!(reader.read_byte().unwrap(), 0x42);
        assert!(reader.is_empty());
    }

    #[test]
    fn test_trailer_too_short() {
        assert!(matches!(
            BitReader::from_trailed(&[7]),
            Err(DuopackError::InvalidTrailer { .. })
        ));
        assert!(BitReader::from_trailed(&[]).is_err());
    }

    #[test]
    fn test_trailer_count_out_of_range() {
        let err = BitReader::from_trailed(&[0x00, 0x00, 8]).unwrap_err();
        assert!(err.is_corrupt_stream());
    }

    #[test]
    fn test_plain_reader() {
        let data = [0b1010_1010];
        let mut reader = BitReader::new(&data);
        assert_eq!(reader.read_bits(3).unwrap(), 0b101);
        assert_eq!(reader.bit_position(), 3);
        assert_eq!(reader.read_bits(5).unwrap(), 0b01010);
        assert!(reader.read_bits(1).is_err());
    }

    #[test]
    fn test_bits_of_bytes() {
        let bits = bits_of_bytes(&[0x80, 0x01]);
        assert_eq!(bits.len(), 16);
        assert!(bits[0]);
        assert!(bits[15]);
        assert_eq!(bits.iter().filter(|&&b| b).count(), 2);
    }
}
