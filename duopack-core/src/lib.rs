//! # duopack Core
//!
//! Core components shared by the duopack codecs.
//!
//! This crate provides the building blocks both codecs are built from:
//!
//! - [`bitstream`]: MSB-first bit packing with the 2-byte end-of-stream trailer
//! - [`ringbuffer`]: Fixed-capacity sliding history for LZ77
//! - [`io`]: Buffered byte reader/writer and whole-file helpers
//! - [`traits`]: The [`Codec`] trait
//! - [`error`]: Error types
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │ Driver                                                  │
//! │     duopack-cli: compress, decompress, bench            │
//! ├─────────────────────────────────────────────────────────┤
//! │ Facade                                                  │
//! │     duopack: CodecKind, file helpers, statistics        │
//! ├─────────────────────────────────────────────────────────┤
//! │ Codec                                                   │
//! │     duopack-lz77, duopack-shannon                       │
//! ├─────────────────────────────────────────────────────────┤
//! │ Core (this crate)                                       │
//! │     BitWriter/BitReader, RingBuffer, byte I/O           │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust
//! use duopack_core::bitstream::{BitReader, BitWriter, bits_of_uint};
//!
//! let mut writer = BitWriter::new(Vec::new());
//! writer.write_code(&bits_of_uint(5, 12)).unwrap();
//! let stream = writer.finish().unwrap();
//!
//! let mut reader = BitReader::from_trailed(&stream).unwrap();
//! assert_eq!(reader.read_bits(12).unwrap(), 5);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod bitstream;
pub mod error;
pub mod io;
pub mod ringbuffer;
pub mod traits;

// Re-exports for convenience
pub use bitstream::{BitReader, BitWriter};
pub use error::{DuopackError, ErrorKind, Result};
pub use io::{ByteReader, ByteWriter};
pub use ringbuffer::RingBuffer;
pub use traits::Codec;
