//! # duopack LZ77
//!
//! Pure Rust implementation of a classic LZ77 sliding-window codec.
//!
//! The encoder walks the input with a bounded history and a bounded
//! lookahead view. At each step it finds the longest, most recent earlier
//! occurrence of the view's prefix and emits an `(offset, length, literal)`
//! triple. Triples have fixed widths derived from the window sizes:
//!
//! ```text
//! | offset: log2(history) bits | length: log2(view) bits | literal: 8 bits |
//! ```
//!
//! `(0, 0, byte)` is a plain literal. The stream ends with the 2-byte
//! trailer from [`duopack_core::bitstream`]. Window sizes are not stored in
//! the stream.
//!
//! ## Example
//!
//! ```rust
//! use duopack_lz77::{Lz77Config, compress, decompress};
//!
//! let data = b"abracadabra abracadabra";
//! let packed = compress(data, Lz77Config::SMALL).unwrap();
//! let unpacked = decompress(&packed, Lz77Config::SMALL).unwrap();
//! assert_eq!(unpacked, data);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod decode;
pub mod encode;
pub mod token;

// Re-exports
pub use config::Lz77Config;
pub use decode::Lz77Decoder;
pub use encode::{Lz77Encoder, Lz77Stats};
pub use token::Lz77Token;

use duopack_core::Codec;
use duopack_core::error::Result;

/// Compress `data` with the given window configuration.
pub fn compress(data: &[u8], config: Lz77Config) -> Result<Vec<u8>> {
    Lz77Encoder::new(config)?.encode(data)
}

/// Decompress a stream produced with the same window configuration.
pub fn decompress(data: &[u8], config: Lz77Config) -> Result<Vec<u8>> {
    Lz77Decoder::new(config)?.decode(data)
}

/// The LZ77 codec as a [`Codec`].
#[derive(Debug, Clone)]
pub struct Lz77Codec {
    encoder: Lz77Encoder,
    decoder: Lz77Decoder,
}

impl Lz77Codec {
    /// Create a codec, validating the configuration.
    pub fn new(config: Lz77Config) -> Result<Self> {
        Ok(Self {
            encoder: Lz77Encoder::new(config)?,
            decoder: Lz77Decoder::new(config)?,
        })
    }

    /// The window configuration.
    pub fn config(&self) -> &Lz77Config {
        self.encoder.config()
    }

    /// The underlying encoder, for streaming use.
    pub fn encoder(&self) -> &Lz77Encoder {
        &self.encoder
    }

    /// The underlying decoder.
    pub fn decoder(&self) -> &Lz77Decoder {
        &self.decoder
    }
}

impl Codec for Lz77Codec {
    fn description(&self) -> &'static str {
        "LZ77"
    }

    fn short_name(&self) -> String {
        self.config().short_name()
    }

    fn encode(&self, input: &[u8]) -> Result<Vec<u8>> {
        self.encoder.encode(input)
    }

    fn decode(&self, input: &[u8]) -> Result<Vec<u8>> {
        self.decoder.decode(input)
    }
}
