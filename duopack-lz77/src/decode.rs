//! LZ77 decompression (decoding).

use crate::config::Lz77Config;
use crate::token::Lz77Token;
use duopack_core::RingBuffer;
use duopack_core::bitstream::BitReader;
use duopack_core::error::{DuopackError, Result};
use log::debug;
use std::io::Write;

/// LZ77 decoder.
#[derive(Debug, Clone)]
pub struct Lz77Decoder {
    config: Lz77Config,
}

impl Lz77Decoder {
    /// Create a decoder, validating the configuration.
    pub fn new(config: Lz77Config) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The decoder's configuration.
    pub fn config(&self) -> &Lz77Config {
        &self.config
    }

    /// Decode a complete stream (trailer included).
    pub fn decode(&self, input: &[u8]) -> Result<Vec<u8>> {
        let mut reader = BitReader::from_trailed(input)?;
        let mut history = RingBuffer::new(self.config.history_size)?;
        let mut output = Vec::with_capacity(input.len() * 2);
        let token_bits = self.config.token_bits() as u64;
        let mut tokens = 0u64;

        while !reader.is_empty() {
            if reader.bits_remaining() < token_bits {
                return Err(DuopackError::corrupted(
                    reader.bit_position(),
                    format!(
                        "{} trailing bits do not form a {}-bit token",
                        reader.bits_remaining(),
                        token_bits
                    ),
                ));
            }

            match Lz77Token::read(&mut reader, &self.config)? {
                Lz77Token::Literal(byte) => {
                    history.write_byte(byte);
                    output.push(byte);
                }
                Lz77Token::Match {
                    offset,
                    length,
                    next,
                } => {
                    history.copy_from_history(offset as usize, length as usize, &mut output)?;
                    history.write_byte(next);
                    output.push(next);
                }
            }
            tokens += 1;
        }

        debug!(
            "LZ77 ({}) decoded {} tokens from {} bytes into {} bytes",
            self.config,
            tokens,
            input.len(),
            output.len()
        );
        Ok(output)
    }

    /// Decode a complete stream into `writer`.
    ///
    /// Nothing is written unless the whole stream decodes. Returns the number
    /// of bytes written.
    pub fn decode_to<W: Write>(&self, input: &[u8], mut writer: W) -> Result<u64> {
        let output = self.decode(input)?;
        writer.write_all(&output)?;
        writer.flush()?;
        Ok(output.len() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use duopack_core::bitstream::BitWriter;

    fn stream_of(config: &Lz77Config, tokens: &[Lz77Token]) -> Vec<u8> {
        let mut writer = BitWriter::new(Vec::new());
        for token in tokens {
            token.write(&mut writer, config).unwrap();
        }
        writer.finish().unwrap()
    }

    #[test]
    fn test_decode_empty() {
        let decoder = Lz77Decoder::new(Lz77Config::new(8, 4)).unwrap();
        assert!(decoder.decode(&[0, 0]).unwrap().is_empty());
    }

    #[test]
    fn test_decode_overlapping_copy() {
        let config = Lz77Config::new(8, 4);
        let stream = stream_of(
            &config,
            &[
                Lz77Token::Literal(b'a'),
                Lz77Token::Literal(b'b'),
                Lz77Token::Match {
                    offset: 2,
                    length: 3,
                    next: b'!',
                },
            ],
        );
        let decoder = Lz77Decoder::new(config).unwrap();
        assert_eq!(decoder.decode(&stream).unwrap(), b"ababa!");
    }

    #[test]
    fn test_offset_beyond_history() {
        let config = Lz77Config::new(8, 4);
        let stream = stream_of(
            &config,
            &[
                Lz77Token::Literal(b'a'),
                Lz77Token::Match {
                    offset: 2,
                    length: 1,
                    next: b'b',
                },
            ],
        );
        let decoder = Lz77Decoder::new(config).unwrap();
        let err = decoder.decode(&stream).unwrap_err();
        assert!(matches!(err, DuopackError::InvalidDistance { distance: 2, .. }));
    }

    #[test]
    fn test_partial_token_is_corrupt() {
        let config = Lz77Config::new(8, 4);
        let mut writer = BitWriter::new(Vec::new());
        Lz77Token::Literal(b'a').write(&mut writer, &config).unwrap();
        writer.write_bits(0, 3).unwrap();
        let stream = writer.finish().unwrap();

        let decoder = Lz77Decoder::new(config).unwrap();
        assert!(decoder.decode(&stream).unwrap_err().is_corrupt_stream());
    }

    #[test]
    fn test_bad_trailer() {
        let decoder = Lz77Decoder::new(Lz77Config::SMALL).unwrap();
        assert!(matches!(
            decoder.decode(&[0x12]),
            Err(DuopackError::InvalidTrailer { .. })
        ));
        assert!(decoder.decode(&[0x00, 0x00, 9]).is_err());
    }

    #[test]
    fn test_decode_to_writer() {
        let config = Lz77Config::new(8, 4);
        let stream = stream_of(&config, &[Lz77Token::Literal(b'z')]);
        let decoder = Lz77Decoder::new(config).unwrap();

        let mut output = Vec::new();
        assert_eq!(decoder.decode_to(&stream, &mut output).unwrap(), 1);
        assert_eq!(output, b"z");
    }

    #[test]
    fn test_no_partial_output_on_error() {
        let mut output = Vec::new();
        let decoder = Lz77Decoder::new(Lz77Config::SMALL).unwrap();
        assert!(decoder.decode_to(&[1, 2, 200], &mut output).is_err());
        assert!(output.is_empty());
    }
}
