//! Byte-level reader and writer used by the codecs and the driver.
//!
//! Codecs never touch the file system directly; they consume a [`Read`] or a
//! byte slice and produce into a [`Write`]. This module supplies the buffered
//! wrappers and whole-file helpers the facade and CLI build on.
//!
//! # Example
//!
//! ```
//! use duopack_core::io::{ByteReader, ByteWriter};
//! use std::io::Cursor;
//!
//! let mut reader = ByteReader::new(Cursor::new(b"abc".to_vec()));
//! assert_eq!(reader.read_next().unwrap(), Some(b'a'));
//! assert_eq!(reader.read_block(8).unwrap(), b"bc");
//! assert_eq!(reader.read_next().unwrap(), None);
//!
//! let mut writer = ByteWriter::new(Vec::new());
//! writer.write_bytes(b"xy").unwrap();
//! writer.write_byte(b'z').unwrap();
//! assert_eq!(writer.finish().unwrap(), b"xyz");
//! ```

use crate::bitstream::bits_of_bytes;
use crate::error::Result;
use std::fs::File;
use std::io::{BufReader, BufWriter, ErrorKind, Read, Write};
use std::path::Path;

/// Buffered sequential byte reader.
#[derive(Debug)]
pub struct ByteReader<R: Read> {
    inner: BufReader<R>,
    bytes_read: u64,
}

impl ByteReader<File> {
    /// Open a file for sequential reading.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::new(File::open(path)?))
    }
}

impl<R: Read> ByteReader<R> {
    /// Wrap an arbitrary reader.
    pub fn new(reader: R) -> Self {
        Self {
            inner: BufReader::new(reader),
            bytes_read: 0,
        }
    }

    /// Read the next byte, or `None` at end of input.
    pub fn read_next(&mut self) -> Result<Option<u8>> {
        let mut byte = [0u8; 1];
        loop {
            match self.inner.read(&mut byte) {
                Ok(0) => return Ok(None),
                Ok(_) => {
                    self.bytes_read += 1;
                    return Ok(Some(byte[0]));
                }
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
    }

    /// Read up to `max_bytes`; the result is shorter only at end of input.
    pub fn read_block(&mut self, max_bytes: usize) -> Result<Vec<u8>> {
        let mut block = Vec::with_capacity(max_bytes);
        (&mut self.inner)
            .take(max_bytes as u64)
            .read_to_end(&mut block)?;
        self.bytes_read += block.len() as u64;
        Ok(block)
    }

    /// Total bytes handed out so far.
    pub fn bytes_read(&self) -> u64 {
        self.bytes_read
    }
}

/// Buffered byte writer.
#[derive(Debug)]
pub struct ByteWriter<W: Write> {
    inner: BufWriter<W>,
    bytes_written: u64,
}

impl ByteWriter<File> {
    /// Create (or truncate) a file for writing.
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::new(File::create(path)?))
    }
}

impl<W: Write> ByteWriter<W> {
    /// Wrap an arbitrary writer.
    pub fn new(writer: W) -> Self {
        Self {
            inner: BufWriter::new(writer),
            bytes_written: 0,
        }
    }

    /// Write a run of bytes.
    pub fn write_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        self.inner.write_all(bytes)?;
        self.bytes_written += bytes.len() as u64;
        Ok(())
    }

    /// Write a single byte.
    pub fn write_byte(&mut self, byte: u8) -> Result<()> {
        self.write_bytes(&[byte])
    }

    /// Total bytes accepted so far.
    pub fn bytes_written(&self) -> u64 {
        self.bytes_written
    }

    /// Flush buffered bytes and return the underlying writer.
    pub fn finish(self) -> Result<W> {
        self.inner
            .into_inner()
            .map_err(|e| e.into_error().into())
    }
}

impl<W: Write> Write for ByteWriter<W> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let n = self.inner.write(buf)?;
        self.bytes_written += n as u64;
        Ok(n)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.inner.flush()
    }
}

/// Read a whole file into memory.
pub fn read_all(path: impl AsRef<Path>) -> Result<Vec<u8>> {
    Ok(std::fs::read(path)?)
}

/// Read a whole file as a bit sequence, MSB first.
pub fn read_all_bits(path: impl AsRef<Path>) -> Result<Vec<bool>> {
    Ok(bits_of_bytes(&read_all(path)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_read_next_until_eof() {
        let mut reader = ByteReader::new(Cursor::new(vec![1u8, 2, 3]));
        assert_eq!(reader.read_next().unwrap(), Some(1));
        assert_eq!(reader.read_next().unwrap(), Some(2));
        assert_eq!(reader.read_next().unwrap(), Some(3));
        assert_eq!(reader.read_next().unwrap(), None);
        assert_eq!(reader.read_next().unwrap(), None);
        assert_eq!(reader.bytes_read(), 3);
    }

    #[test]
    fn test_read_block_short_at_eof() {
        let data: Vec<u8> = (0..10).collect();
        let mut reader = ByteReader::new(Cursor::new(data));
        assert_eq!(reader.read_block(4).unwrap(), vec![0, 1, 2, 3]);
        assert_eq!(reader.read_next().unwrap(), Some(4));
        assert_eq!(reader.read_block(100).unwrap(), vec![5, 6, 7, 8, 9]);
        assert!(reader.read_block(4).unwrap().is_empty());
    }

    #[test]
    fn test_writer_counts_bytes() {
        let mut writer = ByteWriter::new(Vec::new());
        writer.write_bytes(b"hello").unwrap();
        writer.write_byte(b'!').unwrap();
        assert_eq!(writer.bytes_written(), 6);
        assert_eq!(writer.finish().unwrap(), b"hello!");
    }

    #[test]
    fn test_file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bytes.bin");

        let mut writer = ByteWriter::create(&path).unwrap();
        writer.write_bytes(&[0x80, 0x01]).unwrap();
        writer.finish().unwrap();

        assert_eq!(read_all(&path).unwrap(), vec![0x80, 0x01]);

        let bits = read_all_bits(&path).unwrap();
        assert_eq!(bits.len(), 16);
        assert!(bits[0] && bits[15]);

        let mut reader = ByteReader::open(&path).unwrap();
        assert_eq!(reader.read_block(2).unwrap(), vec![0x80, 0x01]);
    }

    #[test]
    fn test_open_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = ByteReader::open(dir.path().join("missing")).unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::Io);
    }
}
