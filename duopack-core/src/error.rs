//! Error types for duopack operations.
//!
//! Every failure a codec can report is a [`DuopackError`]. The variants are
//! grouped into three kinds (see [`ErrorKind`]): bad codec configuration,
//! corrupt compressed streams, and I/O failures from the underlying
//! reader/writer.

use std::io;
use thiserror::Error;

/// The main error type for duopack operations.
#[derive(Debug, Error)]
pub enum DuopackError {
    /// I/O error from underlying reader/writer.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Codec configuration rejected at construction time.
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// Description of the configuration problem.
        message: String,
    },

    /// The 2-byte end-of-stream trailer is missing or malformed.
    #[error("Invalid trailer: {message}")]
    InvalidTrailer {
        /// Description of the trailer problem.
        message: String,
    },

    /// A read went past the end of the data region.
    #[error("Unexpected end of data: needed {needed} bits at bit position {bit_position}")]
    UnexpectedEnd {
        /// Bit position where the read started.
        bit_position: u64,
        /// Number of bits requested.
        needed: usize,
    },

    /// Prefix-code traversal reached a missing branch.
    #[error("Invalid prefix code at bit position {bit_position}")]
    InvalidCode {
        /// Bit position where the invalid code was found.
        bit_position: u64,
    },

    /// Invalid distance in an LZ77 back-reference.
    #[error("Invalid back-reference distance: {distance} exceeds history size {history_size}")]
    InvalidDistance {
        /// The invalid distance value.
        distance: usize,
        /// Current history buffer size.
        history_size: usize,
    },

    /// Structurally invalid compressed data.
    #[error("Corrupted data at bit {bit_position}: {message}")]
    CorruptedData {
        /// Bit position where corruption was detected.
        bit_position: u64,
        /// Description of the corruption.
        message: String,
    },

    /// A prefix code does not fit the 8-bit length field.
    #[error("Code length {length} exceeds maximum 255")]
    CodeTooLong {
        /// The offending code length.
        length: usize,
    },
}

/// Coarse classification of a [`DuopackError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The codec was constructed with unusable parameters.
    Configuration,
    /// The compressed input is malformed; no output is produced.
    CorruptStream,
    /// The underlying reader or writer failed.
    Io,
}

/// Result type alias for duopack operations.
pub type Result<T> = std::result::Result<T, DuopackError>;

impl DuopackError {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Io(_) => ErrorKind::Io,
            Self::InvalidConfig { .. } | Self::CodeTooLong { .. } => ErrorKind::Configuration,
            Self::InvalidTrailer { .. }
            | Self::UnexpectedEnd { .. }
            | Self::InvalidCode { .. }
            | Self::InvalidDistance { .. }
            | Self::CorruptedData { .. } => ErrorKind::CorruptStream,
        }
    }

    /// Whether this error means the compressed input is malformed.
    pub fn is_corrupt_stream(&self) -> bool {
        self.kind() == ErrorKind::CorruptStream
    }

    /// Create an invalid configuration error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Create an invalid trailer error.
    pub fn invalid_trailer(message: impl Into<String>) -> Self {
        Self::InvalidTrailer {
            message: message.into(),
        }
    }

    /// Create an unexpected end of data error.
    pub fn unexpected_end(bit_position: u64, needed: usize) -> Self {
        Self::UnexpectedEnd {
            bit_position,
            needed,
        }
    }

    /// Create an invalid prefix code error.
    pub fn invalid_code(bit_position: u64) -> Self {
        Self::InvalidCode { bit_position }
    }

    /// Create an invalid distance error.
    pub fn invalid_distance(distance: usize, history_size: usize) -> Self {
        Self::InvalidDistance {
            distance,
            history_size,
        }
    }

    /// Create a corrupted data error.
    pub fn corrupted(bit_position: u64, message: impl Into<String>) -> Self {
        Self::CorruptedData {
            bit_position,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DuopackError::invalid_config("history size 100 is not a power of two");
        assert!(err.to_string().contains("power of two"));

        let err = DuopackError::invalid_distance(9, 4);
        assert!(err.to_string().contains("exceeds history size 4"));

        let err = DuopackError::unexpected_end(42, 8);
        assert!(err.to_string().contains("bit position 42"));
    }

    #[test]
    fn test_error_kinds() {
        assert_eq!(
            DuopackError::invalid_config("zero").kind(),
            ErrorKind::Configuration
        );
        assert_eq!(
            DuopackError::invalid_trailer("short").kind(),
            ErrorKind::CorruptStream
        );
        assert_eq!(DuopackError::invalid_code(3).kind(), ErrorKind::CorruptStream);
        assert!(DuopackError::corrupted(0, "bad").is_corrupt_stream());
        assert!(!DuopackError::CodeTooLong { length: 256 }.is_corrupt_stream());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: DuopackError = io_err.into();
        assert!(matches!(err, DuopackError::Io(_)));
        assert_eq!(err.kind(), ErrorKind::Io);
    }
}
