//! Symbol frequency counting.

use duopack_core::error::Result;
use duopack_core::io::ByteReader;
use std::io::Read;

/// Block size for counting from a reader.
const COUNT_BLOCK: usize = 1024;

/// Occurrence count of every byte value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: [u64; 256],
}

impl Default for FrequencyTable {
    fn default() -> Self {
        Self::new()
    }
}

impl FrequencyTable {
    /// An empty table.
    pub fn new() -> Self {
        Self { counts: [0; 256] }
    }

    /// Count every byte of `data`.
    pub fn from_bytes(data: &[u8]) -> Self {
        let mut table = Self::new();
        table.add_bytes(data);
        table
    }

    /// Count every byte `reader` yields.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut input = ByteReader::new(reader);
        let mut table = Self::new();
        loop {
            let block = input.read_block(COUNT_BLOCK)?;
            if block.is_empty() {
                break;
            }
            table.add_bytes(&block);
        }
        Ok(table)
    }

    /// Count one more occurrence of `byte`.
    #[inline]
    pub fn add(&mut self, byte: u8) {
        self.counts[byte as usize] += 1;
    }

    /// Count every byte of `data`.
    pub fn add_bytes(&mut self, data: &[u8]) {
        for &byte in data {
            self.add(byte);
        }
    }

    /// Occurrences of `byte`.
    pub fn count(&self, byte: u8) -> u64 {
        self.counts[byte as usize]
    }

    /// Number of distinct byte values seen.
    pub fn distinct(&self) -> usize {
        self.counts.iter().filter(|&&c| c > 0).count()
    }

    /// Total number of bytes counted.
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Whether nothing has been counted.
    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    /// Observed `(byte, count)` pairs in ascending byte order.
    pub fn symbols(&self) -> Vec<(u8, u64)> {
        (0..=255u8)
            .map(|byte| (byte, self.counts[byte as usize]))
            .filter(|&(_, count)| count > 0)
            .collect()
    }

    /// Observed pairs sorted ascending by count; equal counts keep
    /// ascending byte order.
    pub fn sorted_by_count(&self) -> Vec<(u8, u64)> {
        let mut symbols = self.symbols();
        symbols.sort_by_key(|&(_, count)| count);
        symbols
    }
}
