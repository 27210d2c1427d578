//! Shannon-Fano compression/decompression for duopack.
//!
//! This crate provides a pure Rust minimum-redundancy prefix-code codec.
//!
//! Encoding is a two-pass pipeline:
//! 1. Frequency counting - occurrences of every byte value
//! 2. Code construction - recursive weight partitioning of the
//!    count-sorted symbols ([`CodeTable::build`])
//! 3. Serialization - code-table header, then every input byte's code
//!
//! Decoding rebuilds a binary trie from the header and walks it bit by bit.
//!
//! ## Example
//!
//! ```rust
//! use duopack_shannon::{compress, decompress};
//!
//! let data = b"mississippi";
//! let packed = compress(data).unwrap();
//! assert_eq!(decompress(&packed).unwrap(), data);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod code;
mod decode;
mod encode;
pub mod frequency;
mod trie;

pub use code::CodeTable;
pub use decode::{decode as decompress, decode_to, read_code_table};
pub use encode::{ShannonStats, encode as compress, encode_seekable, encode_to, write_header};
pub use frequency::FrequencyTable;
pub use trie::DecodeTrie;

use duopack_core::Codec;
use duopack_core::error::Result;

/// The Shannon-Fano codec as a [`Codec`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ShannonFanoCodec;

impl ShannonFanoCodec {
    /// Create the codec. It has no parameters.
    pub fn new() -> Self {
        Self
    }
}

impl Codec for ShannonFanoCodec {
    fn description(&self) -> &'static str {
        "Shannon"
    }

    fn short_name(&self) -> String {
        "shan".to_string()
    }

    fn encode(&self, input: &[u8]) -> Result<Vec<u8>> {
        compress(input)
    }

    fn decode(&self, input: &[u8]) -> Result<Vec<u8>> {
        decompress(input)
    }
}
