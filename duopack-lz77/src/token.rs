//! LZ77 tokens and their fixed-width serialization.
//!
//! Every token is written as `offset || length || literal`, with the widths
//! taken from [`Lz77Config`]. `(0, 0)` marks a plain literal.

use crate::config::{LITERAL_BITS, Lz77Config};
use duopack_core::bitstream::{BitReader, BitWriter};
use duopack_core::error::{DuopackError, Result};
use std::io::Write;

/// LZ77 token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lz77Token {
    /// A byte with no earlier occurrence in the history.
    Literal(u8),
    /// A back-reference followed by one literal byte.
    Match {
        /// Distance back from the newest history byte to the run start.
        offset: u32,
        /// Number of bytes to copy.
        length: u32,
        /// The byte following the copied run.
        next: u8,
    },
}

impl Lz77Token {
    /// Number of input bytes this token covers.
    pub fn advance(&self) -> usize {
        match self {
            Self::Literal(_) => 1,
            Self::Match { length, .. } => *length as usize + 1,
        }
    }

    /// The `(offset, length, literal)` triple as serialized.
    pub fn triple(&self) -> (u32, u32, u8) {
        match *self {
            Self::Literal(byte) => (0, 0, byte),
            Self::Match {
                offset,
                length,
                next,
            } => (offset, length, next),
        }
    }

    /// Serialize this token.
    pub fn write<W: Write>(&self, writer: &mut BitWriter<W>, config: &Lz77Config) -> Result<()> {
        let (offset, length, literal) = self.triple();
        writer.write_bits(offset, config.offset_bits())?;
        writer.write_bits(length, config.length_bits())?;
        writer.write_bits(literal as u32, LITERAL_BITS)
    }

    /// Parse one token.
    ///
    /// A triple with exactly one of offset and length zero cannot be produced
    /// by the encoder and is rejected.
    pub fn read(reader: &mut BitReader<'_>, config: &Lz77Config) -> Result<Self> {
        let start = reader.bit_position();
        let offset = reader.read_bits(config.offset_bits())?;
        let length = reader.read_bits(config.length_bits())?;
        let literal = reader.read_bits(LITERAL_BITS)? as u8;

        match (offset, length) {
            (0, 0) => Ok(Self::Literal(literal)),
            (0, _) | (_, 0) => Err(DuopackError::corrupted(
                start,
                format!("token with offset {} and length {}", offset, length),
            )),
            _ => Ok(Self::Match {
                offset,
                length,
                next: literal,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance() {
        assert_eq!(Lz77Token::Literal(b'a').advance(), 1);
        let token = Lz77Token::Match {
            offset: 3,
            length: 5,
            next: b'x',
        };
        assert_eq!(token.advance(), 6);
        assert_eq!(token.triple(), (3, 5, b'x'));
    }

    #[test]
    fn test_literal_layout() {
        let config = Lz77Config::new(8, 4);
        let mut writer = BitWriter::new(Vec::new());
        Lz77Token::Literal(0xFF).write(&mut writer, &config).unwrap();
        // 3 offset bits + 2 length bits of zero, then the literal.
        assert_eq!(writer.finish().unwrap(), vec![0b0000_0111, 0b1111_1000, 5]);
    }

    #[test]
    fn test_match_layout() {
        let config = Lz77Config::new(8, 4);
        let token = Lz77Token::Match {
            offset: 1,
            length: 3,
            next: b'a',
        };
        let mut writer = BitWriter::new(Vec::new());
        token.write(&mut writer, &config).unwrap();
        let stream = writer.finish().unwrap();

        let mut reader = BitReader::from_trailed(&stream).unwrap();
        assert_eq!(Lz77Token::read(&mut reader, &config).unwrap(), token);
        assert!(reader.is_empty());
    }

    #[test]
    fn test_half_zero_triple_rejected() {
        let config = Lz77Config::new(8, 4);
        let mut writer = BitWriter::new(Vec::new());
        writer.write_bits(0, 3).unwrap();
        writer.write_bits(2, 2).unwrap();
        writer.write_bits(b'q' as u32, 8).unwrap();
        let stream = writer.finish().unwrap();

        let mut reader = BitReader::from_trailed(&stream).unwrap();
        let err = Lz77Token::read(&mut reader, &config).unwrap_err();
        assert!(err.is_corrupt_stream());
    }
}
