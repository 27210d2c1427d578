//! Binary decoding trie.
//!
//! Built once per decode from the code table in the stream header. Each
//! header entry inserts one path, creating internal nodes as needed; the node
//! at the end of the path becomes a leaf holding the symbol.

use duopack_core::bitstream::BitReader;
use duopack_core::error::{DuopackError, Result};

#[derive(Debug, Default)]
struct TrieNode {
    /// Children for bit 0 and bit 1.
    children: [Option<Box<TrieNode>>; 2],
    /// Set on leaves only.
    symbol: Option<u8>,
}

impl TrieNode {
    fn is_leaf(&self) -> bool {
        self.symbol.is_some()
    }

    fn has_children(&self) -> bool {
        self.children.iter().any(Option::is_some)
    }
}

/// Prefix-code decoding trie.
#[derive(Debug, Default)]
pub struct DecodeTrie {
    root: TrieNode,
    leaves: usize,
}

impl DecodeTrie {
    /// An empty trie.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of inserted symbols.
    pub fn len(&self) -> usize {
        self.leaves
    }

    /// Whether no symbol has been inserted.
    pub fn is_empty(&self) -> bool {
        self.leaves == 0
    }

    /// Insert `code` for `symbol`.
    ///
    /// `bit_position` locates the header entry for error reporting. Empty
    /// codes and codes that are a prefix of (or extend) an existing code are
    /// rejected.
    pub fn insert(&mut self, code: &[bool], symbol: u8, bit_position: u64) -> Result<()> {
        if code.is_empty() {
            return Err(DuopackError::corrupted(
                bit_position,
                format!("zero-length code for byte 0x{:02x}", symbol),
            ));
        }

        let mut node = &mut self.root;
        for &bit in code {
            if node.is_leaf() {
                return Err(collision(symbol, bit_position));
            }
            node = &mut **node.children[bit as usize].get_or_insert_with(Box::default);
        }

        if node.is_leaf() || node.has_children() {
            return Err(collision(symbol, bit_position));
        }
        node.symbol = Some(symbol);
        self.leaves += 1;
        Ok(())
    }

    /// Walk from the root one bit at a time until a leaf is reached.
    pub fn decode_symbol(&self, reader: &mut BitReader<'_>) -> Result<u8> {
        let mut node = &self.root;
        loop {
            if let Some(symbol) = node.symbol {
                return Ok(symbol);
            }
            let position = reader.bit_position();
            let bit = reader.read_bit()?;
            node = node.children[bit as usize]
                .as_deref()
                .ok_or_else(|| DuopackError::invalid_code(position))?;
        }
    }
}

fn collision(symbol: u8, bit_position: u64) -> DuopackError {
    DuopackError::corrupted(
        bit_position,
        format!("code for byte 0x{:02x} collides with an existing code", symbol),
    )
}
