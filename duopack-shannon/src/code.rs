//! Shannon-Fano code construction.
//!
//! Observed symbols are sorted ascending by count and the sorted list is
//! split recursively into two halves of roughly equal total weight. Every
//! split appends `0` to the codes on the lighter-index side and `1` to the
//! other, so codes read root to leaf are prefix-free by construction.
//!
//! The split point is chosen greedily: candidates are scanned upward from
//! the start of the range and the scan stops at the first local minimum of
//! the weight difference, which is not always the global minimum.
//!
//! # Example
//!
//! ```
//! use duopack_shannon::{CodeTable, FrequencyTable};
//!
//! let table = CodeTable::build(&FrequencyTable::from_bytes(b"aaaabbc"));
//! assert_eq!(table.len(), 3);
//! assert!(table.is_prefix_free());
//! assert_eq!(table.code(b'a').map(|c| c.len()), Some(1));
//! ```

use crate::frequency::FrequencyTable;
use log::trace;
use std::collections::{BTreeMap, VecDeque};

/// Mapping from byte value to its prefix code.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodeTable {
    codes: BTreeMap<u8, Vec<bool>>,
}

impl CodeTable {
    /// Build the code table for the observed symbols of `frequencies`.
    ///
    /// A single observed symbol gets the one-bit code `0`; an empty table
    /// yields no codes.
    pub fn build(frequencies: &FrequencyTable) -> Self {
        let sorted = frequencies.sorted_by_count();
        let mut codes: Vec<Vec<bool>> = vec![Vec::new(); sorted.len()];

        match sorted.len() {
            0 => {}
            1 => codes[0].push(false),
            n => {
                let prefix = prefix_sums(&sorted);
                let mut ranges = VecDeque::from([(0, n - 1)]);

                while let Some((lo, hi)) = ranges.pop_front() {
                    if lo >= hi {
                        continue;
                    }
                    if hi - lo == 1 {
                        codes[lo].push(false);
                        codes[hi].push(true);
                        continue;
                    }

                    let mid = split_point(&prefix, lo, hi);
                    trace!("split [{}, {}] at {}", lo, hi, mid);
                    for code in &mut codes[lo..=mid] {
                        code.push(false);
                    }
                    for code in &mut codes[mid + 1..=hi] {
                        code.push(true);
                    }
                    ranges.push_back((lo, mid));
                    ranges.push_back((mid + 1, hi));
                }
            }
        }

        Self {
            codes: sorted
                .iter()
                .map(|&(symbol, _)| symbol)
                .zip(codes)
                .collect(),
        }
    }

    /// Build a table directly from `(symbol, code)` pairs.
    pub fn from_codes(codes: impl IntoIterator<Item = (u8, Vec<bool>)>) -> Self {
        Self {
            codes: codes.into_iter().collect(),
        }
    }

    /// The code assigned to `byte`, if it was observed.
    pub fn code(&self, byte: u8) -> Option<&[bool]> {
        self.codes.get(&byte).map(Vec::as_slice)
    }

    /// Number of symbols with a code.
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    /// Whether the table has no codes.
    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// `(symbol, code)` pairs in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, &[bool])> + '_ {
        self.codes.iter().map(|(&symbol, code)| (symbol, code.as_slice()))
    }

    /// Length of the longest code.
    pub fn max_code_len(&self) -> usize {
        self.codes.values().map(Vec::len).max().unwrap_or(0)
    }

    /// Total body bits needed to encode `frequencies` with this table.
    pub fn encoded_bits(&self, frequencies: &FrequencyTable) -> u64 {
        self.iter()
            .map(|(symbol, code)| frequencies.count(symbol) * code.len() as u64)
            .sum()
    }

    /// Whether every code is non-empty and no code is a prefix of another.
    pub fn is_prefix_free(&self) -> bool {
        let mut codes: Vec<&[bool]> = self.codes.values().map(Vec::as_slice).collect();
        if codes.iter().any(|code| code.is_empty()) {
            return false;
        }
        // After sorting, a prefix sorts immediately before some extension of it.
        codes.sort();
        codes.windows(2).all(|pair| !pair[1].starts_with(pair[0]))
    }
}

/// Running totals: `prefix[i]` is the weight of `sorted[..=i]`.
fn prefix_sums(sorted: &[(u8, u64)]) -> Vec<u64> {
    sorted
        .iter()
        .scan(0u64, |total, &(_, count)| {
            *total += count;
            Some(*total)
        })
        .collect()
}

/// Weight of `lo..=hi`.
fn range_sum(prefix: &[u64], lo: usize, hi: usize) -> u64 {
    if lo == 0 {
        prefix[hi]
    } else {
        prefix[hi] - prefix[lo - 1]
    }
}

/// First local minimum of `|sum(lo..=m) - sum(m+1..=hi)|` for `m` in
/// `lo..hi`, scanning upward.
fn split_point(prefix: &[u64], lo: usize, hi: usize) -> usize {
    let delta = |m: usize| range_sum(prefix, lo, m).abs_diff(range_sum(prefix, m + 1, hi));

    let mut best = lo;
    let mut best_delta = delta(lo);
    for m in lo + 1..hi {
        let next = delta(m);
        if next >= best_delta {
            break;
        }
        best = m;
        best_delta = next;
    }
    best
}
