//! LZ77 compression (encoding).
//!
//! The encoder keeps a bounded history of committed bytes and a bounded
//! view of upcoming bytes. For each position it performs a greedy
//! longest-match search, emits one token, and slides `length + 1` bytes
//! from the view into the history.

use crate::config::Lz77Config;
use crate::token::Lz77Token;
use duopack_core::RingBuffer;
use duopack_core::bitstream::BitWriter;
use duopack_core::error::Result;
use duopack_core::io::{ByteReader, ByteWriter};
use log::debug;
use std::collections::VecDeque;
use std::io::{Read, Write};

/// Counters collected while encoding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Lz77Stats {
    /// Tokens emitted.
    pub tokens: u64,
    /// Literal tokens.
    pub literals: u64,
    /// Match tokens.
    pub matches: u64,
    /// Bytes consumed from the input.
    pub bytes_in: u64,
    /// Bytes written, trailer included.
    pub bytes_out: u64,
}

impl Lz77Stats {
    fn record(&mut self, token: &Lz77Token) {
        self.tokens += 1;
        match token {
            Lz77Token::Literal(_) => self.literals += 1,
            Lz77Token::Match { .. } => self.matches += 1,
        }
    }
}

/// LZ77 encoder.
#[derive(Debug, Clone)]
pub struct Lz77Encoder {
    config: Lz77Config,
}

impl Lz77Encoder {
    /// Create an encoder, validating the configuration.
    pub fn new(config: Lz77Config) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The encoder's configuration.
    pub fn config(&self) -> &Lz77Config {
        &self.config
    }

    /// Compress a buffer into a complete stream.
    pub fn encode(&self, data: &[u8]) -> Result<Vec<u8>> {
        let mut output = Vec::with_capacity(data.len() / 2 + 2);
        self.encode_to(data, &mut output)?;
        Ok(output)
    }

    /// Compress everything `reader` yields into `writer`.
    ///
    /// The trailer is written once the reader is exhausted.
    pub fn encode_to<R: Read, W: Write>(&self, reader: R, writer: W) -> Result<Lz77Stats> {
        let mut stats = Lz77Stats::default();
        let mut bits = BitWriter::new(ByteWriter::new(writer));

        let bytes_in = self.scan(reader, |token| {
            stats.record(&token);
            token.write(&mut bits, &self.config)
        })?;
        stats.bytes_in = bytes_in;

        let sink = bits.finish()?;
        stats.bytes_out = sink.bytes_written();
        sink.finish()?;

        debug!(
            "LZ77 ({}) encoded {} bytes into {} bytes: {} tokens, {} matches",
            self.config, stats.bytes_in, stats.bytes_out, stats.tokens, stats.matches
        );
        Ok(stats)
    }

    /// The token sequence for `data`, without serializing it.
    pub fn tokenize(&self, data: &[u8]) -> Result<Vec<Lz77Token>> {
        let mut tokens = Vec::new();
        self.scan(data, |token| {
            tokens.push(token);
            Ok(())
        })?;
        Ok(tokens)
    }

    /// Drive the sliding window over `reader`, handing each token to `emit`.
    ///
    /// Returns the number of input bytes consumed.
    fn scan<R: Read>(
        &self,
        reader: R,
        mut emit: impl FnMut(Lz77Token) -> Result<()>,
    ) -> Result<u64> {
        let mut input = ByteReader::new(reader);
        let mut history = RingBuffer::new(self.config.history_size)?;
        let mut index = PositionIndex::new(self.config.history_size);
        let mut view = VecDeque::with_capacity(self.config.view_size);

        view.extend(input.read_block(self.config.view_size)?);

        while !view.is_empty() {
            let token = self.next_token(&history, &index, &view);
            emit(token)?;

            for _ in 0..token.advance() {
                let Some(byte) = view.pop_front() else {
                    break;
                };
                history.write_byte(byte);
                index.insert(byte);
                if let Some(next) = input.read_next()? {
                    view.push_back(next);
                }
            }
        }

        Ok(input.bytes_read())
    }

    /// Build the token for the front of `view`.
    fn next_token(
        &self,
        history: &RingBuffer,
        index: &PositionIndex,
        view: &VecDeque<u8>,
    ) -> Lz77Token {
        match self.find_longest_match(history, index, view) {
            Some((offset, length)) => Lz77Token::Match {
                offset: offset as u32,
                length: length as u32,
                next: view[length],
            },
            None => Lz77Token::Literal(view[0]),
        }
    }

    /// Greedy longest-match search.
    ///
    /// Tries lengths 1, 2, ... and stops at the first length with no
    /// occurrence. For each length the smallest matching offset wins. An
    /// occurrence of an `L+1` prefix is also one of the `L` prefix, so the
    /// search for `L+1` resumes at the offset found for `L`. Candidates are
    /// the earlier occurrences of the first view byte, newest first.
    fn find_longest_match(
        &self,
        history: &RingBuffer,
        index: &PositionIndex,
        view: &VecDeque<u8>,
    ) -> Option<(usize, usize)> {
        let max_length = (view.len() - 1).min(self.config.max_length());
        if max_length == 0 {
            return None;
        }
        let searchable = history.len().min(self.config.max_offset());

        let mut candidates = index.offsets(view[0], searchable);
        let mut offset = candidates.next()?;
        let mut length = 1;

        while length < max_length {
            if candidate_byte(history, view, offset, length) == view[length] {
                length += 1;
                continue;
            }
            // Byte 0 of every candidate matches by construction.
            match candidates.find(|&next| {
                (1..=length).all(|j| candidate_byte(history, view, next, j) == view[j])
            }) {
                Some(next) => {
                    offset = next;
                    length += 1;
                }
                None => break,
            }
        }

        Some((offset, length))
    }
}

/// Positions of every byte value in the searchable history, chained newest
/// to oldest.
#[derive(Debug)]
struct PositionIndex {
    /// Most recent position of each byte value.
    head: [Option<u64>; 256],
    /// Previous position with the same byte, indexed by `position & mask`.
    chain: Vec<Option<u64>>,
    mask: usize,
    /// Bytes inserted so far.
    total: u64,
}

impl PositionIndex {
    fn new(window: usize) -> Self {
        Self {
            head: [None; 256],
            chain: vec![None; window],
            mask: window - 1,
            total: 0,
        }
    }

    fn insert(&mut self, byte: u8) {
        let position = self.total;
        self.chain[position as usize & self.mask] = self.head[byte as usize];
        self.head[byte as usize] = Some(position);
        self.total += 1;
    }

    /// Distances back to earlier occurrences of `byte`, nearest first, up to
    /// `max_distance`.
    fn offsets(&self, byte: u8, max_distance: usize) -> impl Iterator<Item = usize> + '_ {
        let mut next = self.head[byte as usize];
        std::iter::from_fn(move || {
            let position = next?;
            let distance = (self.total - position) as usize;
            if distance > max_distance {
                return None;
            }
            next = self.chain[position as usize & self.mask];
            Some(distance)
        })
    }
}

/// Byte `j` of the candidate run starting `offset` bytes back.
///
/// Past the end of the history the run continues into the view itself.
#[inline]
fn candidate_byte(history: &RingBuffer, view: &VecDeque<u8>, offset: usize, j: usize) -> u8 {
    if j < offset {
        history.byte_at_distance(offset - j)
    } else {
        view[j - offset]
    }
}
