//! File-level compression and decompression.
//!
//! Output names follow the `<input>.<short-name>` / `<input>.un<short-name>`
//! convention: compressing `data.bin` with `lz77-5` produces
//! `data.bin.lz77-5`, and decompressing that produces `data.bin.unlz77-5`.

use crate::codec::CodecKind;
use duopack_core::Codec;
use duopack_core::error::Result;
use duopack_core::io::{ByteWriter, read_all};
use log::{debug, warn};
use std::ffi::OsString;
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

/// Sizes and paths of one file operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReport {
    /// Source file.
    pub input: PathBuf,
    /// Destination file.
    pub output: PathBuf,
    /// Bytes read.
    pub bytes_in: u64,
    /// Bytes written.
    pub bytes_out: u64,
}

/// Default compressed file name: `<input>.<short-name>`.
pub fn compressed_path(input: &Path, codec: &CodecKind) -> PathBuf {
    with_suffix(input.as_os_str().to_owned(), &codec.short_name())
}

/// Default decompressed file name.
///
/// A trailing `.<short-name>` is replaced by `.un<short-name>`; otherwise
/// `.un<short-name>` is appended.
pub fn decompressed_path(input: &Path, codec: &CodecKind) -> PathBuf {
    let short = codec.short_name();
    let base = input
        .to_str()
        .and_then(|s| s.strip_suffix(&format!(".{}", short)))
        .map(OsString::from)
        .unwrap_or_else(|| input.as_os_str().to_owned());
    with_suffix(base, &format!("un{}", short))
}

fn with_suffix(mut name: OsString, suffix: &str) -> PathBuf {
    name.push(".");
    name.push(suffix);
    PathBuf::from(name)
}

/// Compress `input` into `output`, streaming where the codec allows.
///
/// A partially written output is removed on failure.
pub fn compress_file(input: &Path, output: &Path, codec: &CodecKind) -> Result<FileReport> {
    ensure_distinct(input, output)?;
    let result = compress_streaming(input, output, codec);
    if result.is_err() {
        discard(output);
    }
    let (bytes_in, bytes_out) = result?;

    debug!(
        "{} compressed {} ({} bytes) -> {} ({} bytes)",
        codec,
        input.display(),
        bytes_in,
        output.display(),
        bytes_out
    );
    Ok(FileReport {
        input: input.to_path_buf(),
        output: output.to_path_buf(),
        bytes_in,
        bytes_out,
    })
}

fn compress_streaming(input: &Path, output: &Path, codec: &CodecKind) -> Result<(u64, u64)> {
    let source = File::open(input)?;
    let sink = File::create(output)?;
    match codec {
        CodecKind::Lz77(lz77) => {
            let stats = lz77.encoder().encode_to(source, sink)?;
            Ok((stats.bytes_in, stats.bytes_out))
        }
        CodecKind::ShannonFano(_) => {
            let stats = duopack_shannon::encode_seekable(source, sink)?;
            Ok((stats.bytes_in, stats.bytes_out))
        }
    }
}

/// Decompress `input` into `output`.
///
/// The output file is only created once the whole stream has decoded.
pub fn decompress_file(input: &Path, output: &Path, codec: &CodecKind) -> Result<FileReport> {
    ensure_distinct(input, output)?;
    let compressed = read_all(input)?;
    let decoded = codec.decode(&compressed)?;

    let mut writer = ByteWriter::create(output)?;
    writer.write_bytes(&decoded)?;
    let bytes_out = writer.bytes_written();
    writer.finish()?;

    debug!(
        "{} decompressed {} ({} bytes) -> {} ({} bytes)",
        codec,
        input.display(),
        compressed.len(),
        output.display(),
        bytes_out
    );
    Ok(FileReport {
        input: input.to_path_buf(),
        output: output.to_path_buf(),
        bytes_in: compressed.len() as u64,
        bytes_out,
    })
}

/// Refuse to write over the file being read.
fn ensure_distinct(input: &Path, output: &Path) -> Result<()> {
    if !output.exists() {
        return Ok(());
    }
    if fs::canonicalize(input)? == fs::canonicalize(output)? {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("output {} is the input file", output.display()),
        )
        .into());
    }
    Ok(())
}

fn discard(path: &Path) {
    match fs::remove_file(path) {
        Ok(()) => {}
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => warn!("could not remove partial output {}: {}", path.display(), e),
    }
}
