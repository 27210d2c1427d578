//! Shannon-Fano compression (encoding).
//!
//! Stream layout:
//!
//! ```text
//! | count (8) | { value (8) | length (8) | code (length) }* | body | trailer (2 bytes) |
//! ```
//!
//! `count` is the number of table entries with 256 written as 0. Entries are
//! in ascending byte order. Empty input produces only the trailer.

use crate::code::CodeTable;
use crate::frequency::FrequencyTable;
use duopack_core::bitstream::BitWriter;
use duopack_core::error::{DuopackError, Result};
use duopack_core::io::{ByteReader, ByteWriter};
use log::debug;
use std::io::{self, Read, Seek, SeekFrom, Write};

/// Block size for the second pass over a seekable source.
const ENCODE_BLOCK: usize = 1024;

/// Counters collected while encoding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ShannonStats {
    /// Symbols in the code table.
    pub symbols: usize,
    /// Longest code length.
    pub max_code_len: usize,
    /// Header size in bits.
    pub header_bits: u64,
    /// Body size in bits.
    pub body_bits: u64,
    /// Bytes consumed from the input.
    pub bytes_in: u64,
    /// Bytes written, trailer included.
    pub bytes_out: u64,
}

/// Compress a buffer into a complete stream.
pub fn encode(data: &[u8]) -> Result<Vec<u8>> {
    let mut output = Vec::with_capacity(data.len() / 2 + 2);
    encode_to(data, &mut output)?;
    Ok(output)
}

/// Compress a buffer into `writer`.
pub fn encode_to<W: Write>(data: &[u8], writer: W) -> Result<ShannonStats> {
    let frequencies = FrequencyTable::from_bytes(data);
    let table = CodeTable::build(&frequencies);
    write_stream(&table, writer, |bits| encode_body(&table, data, bits))
}

/// Compress a seekable source in two passes: count, rewind, encode.
pub fn encode_seekable<R: Read + Seek, W: Write>(mut reader: R, writer: W) -> Result<ShannonStats> {
    let start = reader.stream_position()?;
    let frequencies = FrequencyTable::from_reader(&mut reader)?;
    let table = CodeTable::build(&frequencies);
    reader.seek(SeekFrom::Start(start))?;

    let mut input = ByteReader::new(reader);
    write_stream(&table, writer, |bits| {
        let mut consumed = 0u64;
        loop {
            let block = input.read_block(ENCODE_BLOCK)?;
            if block.is_empty() {
                break;
            }
            consumed += encode_body(&table, &block, bits)?;
        }
        if consumed != frequencies.total() {
            return Err(source_changed(format!(
                "{} bytes counted, {} bytes encoded",
                frequencies.total(),
                consumed
            )));
        }
        Ok(consumed)
    })
}

/// Write header, body (via `body`), and trailer; `body` returns the number
/// of input bytes it encoded.
fn write_stream<W: Write>(
    table: &CodeTable,
    writer: W,
    body: impl FnOnce(&mut BitWriter<ByteWriter<W>>) -> Result<u64>,
) -> Result<ShannonStats> {
    let mut bits = BitWriter::new(ByteWriter::new(writer));
    let mut stats = ShannonStats {
        symbols: table.len(),
        max_code_len: table.max_code_len(),
        ..ShannonStats::default()
    };

    if !table.is_empty() {
        write_header(table, &mut bits)?;
        stats.header_bits = bits.bits_written();
        stats.bytes_in = body(&mut bits)?;
        stats.body_bits = bits.bits_written() - stats.header_bits;
    }

    let sink = bits.finish()?;
    stats.bytes_out = sink.bytes_written();
    sink.finish()?;

    debug!(
        "Shannon-Fano encoded {} bytes into {} bytes: {} symbols, longest code {} bits",
        stats.bytes_in, stats.bytes_out, stats.symbols, stats.max_code_len
    );
    Ok(stats)
}

/// Serialize the code table.
pub fn write_header<W: Write>(table: &CodeTable, bits: &mut BitWriter<W>) -> Result<()> {
    // 256 entries wrap to 0.
    bits.write_byte(table.len() as u8)?;
    for (symbol, code) in table.iter() {
        let length =
            u8::try_from(code.len()).map_err(|_| DuopackError::CodeTooLong { length: code.len() })?;
        bits.write_byte(symbol)?;
        bits.write_byte(length)?;
        bits.write_code(code)?;
    }
    Ok(())
}

fn encode_body<W: Write>(table: &CodeTable, data: &[u8], bits: &mut BitWriter<W>) -> Result<u64> {
    for &byte in data {
        let code = table
            .code(byte)
            .ok_or_else(|| source_changed(format!("byte 0x{:02x} has no code", byte)))?;
        bits.write_code(code)?;
    }
    Ok(data.len() as u64)
}

fn source_changed(detail: String) -> DuopackError {
    io::Error::new(
        io::ErrorKind::InvalidData,
        format!("input changed between passes: {}", detail),
    )
    .into()
}
