//! The closed set of codecs and their textual names.
//!
//! Codec names follow the short names used for output file extensions:
//!
//! | name | codec |
//! |---|---|
//! | `shan`, `shannon` | Shannon-Fano |
//! | `lz77` | LZ77, 4 KiB history / 1 KiB view |
//! | `lz77-5`, `lz77-10`, `lz77-20` | LZ77 presets (`(history + view) / 1024`) |
//! | `lz77:<history>:<view>`, `lz77-<history>-<view>` | LZ77, explicit sizes |

use duopack_core::Codec;
use duopack_core::error::{DuopackError, Result};
use duopack_lz77::{Lz77Codec, Lz77Config};
use duopack_shannon::ShannonFanoCodec;
use std::fmt;
use std::str::FromStr;

/// One of the supported codecs.
#[derive(Debug, Clone)]
pub enum CodecKind {
    /// LZ77 with a validated window configuration.
    Lz77(Lz77Codec),
    /// Shannon-Fano.
    ShannonFano(ShannonFanoCodec),
}

impl CodecKind {
    /// An LZ77 codec; fails if the configuration is invalid.
    pub fn lz77(config: Lz77Config) -> Result<Self> {
        Ok(Self::Lz77(Lz77Codec::new(config)?))
    }

    /// The Shannon-Fano codec.
    pub fn shannon() -> Self {
        Self::ShannonFano(ShannonFanoCodec)
    }

    /// The benchmark set: `lz77-5`, `shan`, `lz77-10`, `lz77-20`.
    pub fn default_set() -> Result<Vec<Self>> {
        Ok(vec![
            Self::lz77(Lz77Config::SMALL)?,
            Self::shannon(),
            Self::lz77(Lz77Config::MEDIUM)?,
            Self::lz77(Lz77Config::LARGE)?,
        ])
    }

    /// The codec whose short name is the extension of `path`, if any.
    pub fn from_extension(path: &std::path::Path) -> Option<Self> {
        path.extension()?.to_str()?.parse().ok()
    }

    fn as_codec(&self) -> &dyn Codec {
        match self {
            Self::Lz77(codec) => codec,
            Self::ShannonFano(codec) => codec,
        }
    }
}

impl Codec for CodecKind {
    fn description(&self) -> &'static str {
        self.as_codec().description()
    }

    fn short_name(&self) -> String {
        self.as_codec().short_name()
    }

    fn encode(&self, input: &[u8]) -> Result<Vec<u8>> {
        self.as_codec().encode(input)
    }

    fn decode(&self, input: &[u8]) -> Result<Vec<u8>> {
        self.as_codec().decode(input)
    }
}

impl FromStr for CodecKind {
    type Err = DuopackError;

    fn from_str(s: &str) -> Result<Self> {
        let name = s.trim().to_ascii_lowercase();
        match name.as_str() {
            "shan" | "shannon" | "shannon-fano" => return Ok(Self::shannon()),
            "lz77" => return Self::lz77(Lz77Config::default()),
            _ => {}
        }

        for preset in [Lz77Config::SMALL, Lz77Config::MEDIUM, Lz77Config::LARGE] {
            if name == preset.short_name() {
                return Self::lz77(preset);
            }
        }

        let sizes = name
            .strip_prefix("lz77:")
            .and_then(|rest| rest.split_once(':'))
            .or_else(|| name.strip_prefix("lz77-").and_then(|rest| rest.split_once('-')));
        if let Some((history, view)) = sizes {
            let history = parse_size(history, s)?;
            let view = parse_size(view, s)?;
            return Self::lz77(Lz77Config::new(history, view));
        }

        Err(DuopackError::invalid_config(format!("unknown codec '{}'", s)))
    }
}

fn parse_size(text: &str, name: &str) -> Result<usize> {
    text.parse()
        .map_err(|_| DuopackError::invalid_config(format!("invalid size '{}' in '{}'", text, name)))
}

impl fmt::Display for CodecKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.short_name())
    }
}
