//! Shannon-Fano decompression (decoding).

use crate::code::CodeTable;
use crate::trie::DecodeTrie;
use duopack_core::bitstream::BitReader;
use duopack_core::error::{DuopackError, Result};
use log::debug;
use std::io::Write;

/// Decode a complete stream (trailer included).
pub fn decode(input: &[u8]) -> Result<Vec<u8>> {
    let mut reader = BitReader::from_trailed(input)?;
    if reader.is_empty() {
        return Ok(Vec::new());
    }

    let table = read_header(&mut reader)?;
    let mut trie = DecodeTrie::new();
    for (symbol, code) in &table {
        trie.insert(&code.bits, *symbol, code.bit_position)?;
    }

    let mut output = Vec::with_capacity(input.len() * 2);
    while !reader.is_empty() {
        output.push(trie.decode_symbol(&mut reader)?);
    }

    debug!(
        "Shannon-Fano decoded {} bytes into {} bytes with {} symbols",
        input.len(),
        output.len(),
        trie.len()
    );
    Ok(output)
}

/// Decode a complete stream into `writer`.
///
/// Nothing is written unless the whole stream decodes. Returns the number of
/// bytes written.
pub fn decode_to<W: Write>(input: &[u8], mut writer: W) -> Result<u64> {
    let output = decode(input)?;
    writer.write_all(&output)?;
    writer.flush()?;
    Ok(output.len() as u64)
}

/// Read only the code table from a stream.
pub fn read_code_table(input: &[u8]) -> Result<CodeTable> {
    let mut reader = BitReader::from_trailed(input)?;
    if reader.is_empty() {
        return Ok(CodeTable::default());
    }
    let entries = read_header(&mut reader)?;
    Ok(CodeTable::from_codes(
        entries.into_iter().map(|(symbol, code)| (symbol, code.bits)),
    ))
}

struct HeaderCode {
    bits: Vec<bool>,
    bit_position: u64,
}

fn read_header(reader: &mut BitReader<'_>) -> Result<Vec<(u8, HeaderCode)>> {
    let count = match reader.read_byte()? {
        0 => 256,
        n => n as usize,
    };

    let mut entries = Vec::with_capacity(count);
    for _ in 0..count {
        let bit_position = reader.bit_position();
        let symbol = reader.read_byte()?;
        let length = reader.read_byte()?;
        if length == 0 {
            return Err(DuopackError::corrupted(
                bit_position,
                format!("zero-length code for byte 0x{:02x}", symbol),
            ));
        }

        let mut bits = Vec::with_capacity(length as usize);
        for _ in 0..length {
            bits.push(reader.read_bit()?);
        }
        entries.push((symbol, HeaderCode { bits, bit_position }));
    }

    Ok(entries)
}
