//! Read path error types.
//!
//! Every failure a scan or lookup can surface is one of these variants.
//! Pruning never produces an error; only I/O, framing and decoding do.

use std::fmt;
use thiserror::Error;

use crate::types::{DataType, Encoding};

/// Error codes for categorizing errors.
///
/// These codes can be used for programmatic error handling and
/// are stable across versions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum ErrorCode {
    // General errors (0x0000 - 0x00FF)
    /// Invalid argument provided.
    InvalidArgument = 0x0003,
    /// Operation called in the wrong state.
    InvalidState = 0x0004,

    // I/O errors (0x0100 - 0x01FF)
    /// General I/O error.
    Io = 0x0100,
    /// Fewer bytes available than declared.
    Truncated = 0x0101,
    /// Data corruption detected.
    Corruption = 0x0104,

    // Format errors (0x0200 - 0x02FF)
    /// Page header is malformed.
    InvalidHeader = 0x0200,
    /// Page body could not be decompressed.
    Decompression = 0x0201,
    /// No decoder exists for the encoding and data type.
    UnsupportedType = 0x0202,
    /// Enum code outside the column dictionary.
    MalformedDictionary = 0x0203,
    /// Encoded value block is malformed.
    InvalidBlock = 0x0204,
}

impl ErrorCode {
    /// Returns the numeric code.
    #[inline]
    #[must_use]
    pub const fn as_u16(self) -> u16 {
        self as u16
    }

    /// Returns the error category name.
    #[must_use]
    pub const fn category(&self) -> &'static str {
        match (*self as u16) >> 8 {
            0x00 => "General",
            0x01 => "I/O",
            0x02 => "Format",
            _ => "Unknown",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}

/// The main error type of the read path.
///
/// # Example
///
/// ```rust
/// use tsscan_common::error::{ReadError, ReadResult};
///
/// fn read_header(available: usize) -> ReadResult<()> {
///     Err(ReadError::truncated("page header", 34, available))
/// }
///
/// assert!(read_header(3).unwrap_err().is_truncation());
/// ```
#[derive(Debug, Error)]
pub enum ReadError {
    // ==========================================================================
    // I/O Errors
    // ==========================================================================
    /// I/O error from the underlying byte source.
    #[error("I/O error: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Fewer bytes were available than the format declared.
    #[error("truncated {what}: expected {expected} bytes, got {actual}")]
    Truncated {
        /// What was being read.
        what: &'static str,
        /// Bytes required.
        expected: usize,
        /// Bytes available.
        actual: usize,
    },

    /// Page body checksum mismatch.
    #[error("checksum mismatch for page at offset {offset}: expected {expected:#010x}, computed {computed:#010x}")]
    ChecksumMismatch {
        /// Offset of the page header within the column region.
        offset: u64,
        /// Checksum stored in the header.
        expected: u32,
        /// Checksum computed over the body.
        computed: u32,
    },

    // ==========================================================================
    // Format Errors
    // ==========================================================================
    /// Page header failed validation.
    #[error("invalid page header: {reason}")]
    InvalidHeader {
        /// Why the header was rejected.
        reason: String,
    },

    /// Page body could not be decompressed.
    #[error("decompression failed: {reason}")]
    Decompression {
        /// Decompressor message.
        reason: String,
    },

    /// No decoder is registered for this encoding and data type.
    #[error("unsupported encoding {encoding} for data type {data_type}")]
    UnsupportedType {
        /// Page encoding.
        encoding: Encoding,
        /// Column data type.
        data_type: DataType,
    },

    /// Encoded value block is malformed.
    #[error("invalid {what} block: {reason}")]
    InvalidBlock {
        /// Which codec rejected the block.
        what: &'static str,
        /// Why the block was rejected.
        reason: String,
    },

    /// Enum code does not index the column dictionary.
    #[error("enum code {code} outside dictionary of {size} entries")]
    MalformedDictionary {
        /// The 1-based code read from the page.
        code: i32,
        /// Number of dictionary entries.
        size: usize,
    },

    // ==========================================================================
    // Usage Errors
    // ==========================================================================
    /// Invalid argument provided.
    #[error("invalid argument: {message}")]
    InvalidArgument {
        /// Error message.
        message: String,
    },

    /// Operation called in the wrong state.
    #[error("invalid state: {reason}")]
    InvalidState {
        /// What was wrong.
        reason: String,
    },
}

impl ReadError {
    /// Returns the error code for this error.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::Io { .. } => ErrorCode::Io,
            Self::Truncated { .. } => ErrorCode::Truncated,
            Self::ChecksumMismatch { .. } => ErrorCode::Corruption,
            Self::InvalidHeader { .. } => ErrorCode::InvalidHeader,
            Self::Decompression { .. } => ErrorCode::Decompression,
            Self::UnsupportedType { .. } => ErrorCode::UnsupportedType,
            Self::MalformedDictionary { .. } => ErrorCode::MalformedDictionary,
            Self::InvalidBlock { .. } => ErrorCode::InvalidBlock,
            Self::InvalidArgument { .. } => ErrorCode::InvalidArgument,
            Self::InvalidState { .. } => ErrorCode::InvalidState,
        }
    }

    /// Creates a truncated-input error.
    #[must_use]
    pub fn truncated(what: &'static str, expected: usize, actual: usize) -> Self {
        Self::Truncated {
            what,
            expected,
            actual,
        }
    }

    /// Creates an invalid header error.
    #[must_use]
    pub fn invalid_header(reason: impl Into<String>) -> Self {
        Self::InvalidHeader {
            reason: reason.into(),
        }
    }

    /// Creates an invalid argument error.
    #[must_use]
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Creates an invalid state error.
    #[must_use]
    pub fn invalid_state(reason: impl Into<String>) -> Self {
        Self::InvalidState {
            reason: reason.into(),
        }
    }

    /// Creates an invalid block error.
    #[must_use]
    pub fn invalid_block(what: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidBlock {
            what,
            reason: reason.into(),
        }
    }

    /// Creates a decompression error.
    #[must_use]
    pub fn decompression(reason: impl Into<String>) -> Self {
        Self::Decompression {
            reason: reason.into(),
        }
    }

    /// Creates an unsupported type error.
    #[must_use]
    pub const fn unsupported(encoding: Encoding, data_type: DataType) -> Self {
        Self::UnsupportedType {
            encoding,
            data_type,
        }
    }

    /// Returns true if this error was caused by a short read.
    #[must_use]
    pub fn is_truncation(&self) -> bool {
        matches!(self, Self::Truncated { .. })
            || matches!(self, Self::Io { source } if source.kind() == std::io::ErrorKind::UnexpectedEof)
    }

    /// Returns true if the stored bytes are damaged or malformed.
    #[must_use]
    pub const fn is_corruption(&self) -> bool {
        matches!(
            self,
            Self::ChecksumMismatch { .. }
                | Self::InvalidHeader { .. }
                | Self::Decompression { .. }
                | Self::MalformedDictionary { .. }
                | Self::InvalidBlock { .. }
        )
    }
}
