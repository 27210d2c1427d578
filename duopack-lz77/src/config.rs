//! LZ77 window configuration.
//!
//! The history and view sizes fix the width of the offset and length fields
//! in every token, so encoder and decoder must agree on them. They are not
//! stored in the stream.

use duopack_core::error::{DuopackError, Result};
use std::fmt;

/// Largest supported field width (offset or length) in bits.
pub const MAX_FIELD_BITS: u8 = 24;

/// Bits used for the trailing literal of every token.
pub const LITERAL_BITS: u8 = 8;

/// History and view sizes of an LZ77 codec.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Lz77Config {
    /// Capacity of the sliding history, in bytes.
    pub history_size: usize,
    /// Capacity of the lookahead view, in bytes.
    pub view_size: usize,
}

impl Lz77Config {
    /// 4 KiB history, 1 KiB view.
    pub const SMALL: Self = Self::new(4096, 1024);
    /// 8 KiB history, 2 KiB view.
    pub const MEDIUM: Self = Self::new(8192, 2048);
    /// 16 KiB history, 4 KiB view.
    pub const LARGE: Self = Self::new(16384, 4096);

    /// Create a configuration without validating it.
    pub const fn new(history_size: usize, view_size: usize) -> Self {
        Self {
            history_size,
            view_size,
        }
    }

    /// Check that both sizes are non-zero powers of two within range.
    pub fn validate(&self) -> Result<()> {
        check_size("history", self.history_size)?;
        check_size("view", self.view_size)
    }

    /// Width of the offset field: `log2(history_size)`.
    pub fn offset_bits(&self) -> u8 {
        self.history_size.trailing_zeros() as u8
    }

    /// Width of the length field: `log2(view_size)`.
    pub fn length_bits(&self) -> u8 {
        self.view_size.trailing_zeros() as u8
    }

    /// Total bits per serialized token.
    pub fn token_bits(&self) -> u32 {
        self.offset_bits() as u32 + self.length_bits() as u32 + LITERAL_BITS as u32
    }

    /// Largest offset the encoder emits.
    ///
    /// `history_size` itself does not fit the offset field, so the search
    /// covers only the most recent `history_size - 1` bytes.
    pub fn max_offset(&self) -> usize {
        self.history_size - 1
    }

    /// Largest match length; one view byte is always left for the literal.
    pub fn max_length(&self) -> usize {
        self.view_size - 1
    }

    /// Short identifier, `lz77-<n>` with `n = (history + view) / 1024`.
    ///
    /// Sizes that are not a whole number of KiB are spelled out instead.
    pub fn short_name(&self) -> String {
        let total = self.history_size + self.view_size;
        if total % 1024 == 0 {
            format!("lz77-{}", total / 1024)
        } else {
            format!("lz77-{}-{}", self.history_size, self.view_size)
        }
    }
}

impl Default for Lz77Config {
    fn default() -> Self {
        Self::SMALL
    }
}

impl fmt::Display for Lz77Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "history={} view={}", self.history_size, self.view_size)
    }
}

fn check_size(name: &str, size: usize) -> Result<()> {
    if size == 0 || !size.is_power_of_two() {
        return Err(DuopackError::invalid_config(format!(
            "{} size {} is not a non-zero power of two",
            name, size
        )));
    }
    if size.trailing_zeros() > MAX_FIELD_BITS as u32 {
        return Err(DuopackError::invalid_config(format!(
            "{} size {} exceeds 2^{}",
            name, size, MAX_FIELD_BITS
        )));
    }
    Ok(())
}
