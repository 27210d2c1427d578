//! # duopack
//!
//! Codec selection, file-level compression and statistics on top of the
//! duopack codecs.
//!
//! - [`codec`]: [`CodecKind`], the closed set of codecs, parsed from names
//!   such as `lz77-5`, `shan` or `lz77:8192:2048`
//! - [`file`]: compress and decompress files with the
//!   `<input>.<short-name>` / `<input>.un<short-name>` naming convention
//! - [`stats`]: entropy, compression ratio and first-difference comparison
//!
//! ## Example
//!
//! ```rust
//! use duopack::{Codec, CodecKind};
//!
//! let codec: CodecKind = "lz77-10".parse().unwrap();
//! let packed = codec.encode(b"hello hello hello").unwrap();
//! assert_eq!(codec.decode(&packed).unwrap(), b"hello hello hello");
//! assert_eq!(duopack::stats::first_difference(b"abc", b"abd"), Some(2));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod codec;
pub mod file;
pub mod stats;

// Re-exports
pub use codec::CodecKind;
pub use duopack_core::{Codec, DuopackError, ErrorKind, Result};
pub use duopack_lz77::Lz77Config;
pub use file::{FileReport, compress_file, compressed_path, decompress_file, decompressed_path};
