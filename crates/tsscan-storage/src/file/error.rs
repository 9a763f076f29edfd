//! I/O error types for the file module.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use tsscan_common::error::ReadError;

/// Result type for I/O operations.
pub type IoResult<T> = Result<T, IoError>;

/// Errors that can occur while reading from a byte source.
#[derive(Debug, Error)]
#[allow(missing_docs)] // Fields are documented by variant docs
pub enum IoError {
    /// Standard I/O error.
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: io::Error,
    },

    /// File not found.
    #[error("file not found: {path}")]
    NotFound { path: PathBuf },

    /// Permission denied.
    #[error("permission denied: {path}")]
    PermissionDenied { path: PathBuf },

    /// Seek past the end of the source.
    #[error("invalid offset: {offset} exceeds source length {len}")]
    InvalidOffset { offset: u64, len: u64 },

    /// Short read (less data than expected).
    #[error("short {operation}: expected {expected} bytes, got {actual}")]
    ShortIo {
        operation: &'static str,
        expected: usize,
        actual: usize,
    },
}

impl IoError {
    /// Creates a new NotFound error.
    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        Self::NotFound { path: path.into() }
    }

    /// Creates an InvalidOffset error.
    pub fn invalid_offset(offset: u64, len: u64) -> Self {
        Self::InvalidOffset { offset, len }
    }

    /// Creates a ShortIo error for reads.
    pub fn short_read(expected: usize, actual: usize) -> Self {
        Self::ShortIo {
            operation: "read",
            expected,
            actual,
        }
    }

    /// Returns true if this is a "not found" error.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
            || matches!(self, Self::Io { source } if source.kind() == io::ErrorKind::NotFound)
    }

    /// Returns true if the source ended before the requested bytes.
    pub fn is_short_read(&self) -> bool {
        matches!(self, Self::ShortIo { .. } | Self::InvalidOffset { .. })
            || matches!(self, Self::Io { source } if source.kind() == io::ErrorKind::UnexpectedEof)
    }

    /// Converts from std::io::Error with path context.
    pub fn from_io_with_path(err: io::Error, path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        match err.kind() {
            io::ErrorKind::NotFound => Self::NotFound { path },
            io::ErrorKind::PermissionDenied => Self::PermissionDenied { path },
            _ => Self::Io { source: err },
        }
    }
}

impl From<IoError> for io::Error {
    fn from(err: IoError) -> Self {
        match err {
            IoError::Io { source } => source,
            IoError::NotFound { path } => io::Error::new(
                io::ErrorKind::NotFound,
                format!("not found: {}", path.display()),
            ),
            IoError::PermissionDenied { path } => io::Error::new(
                io::ErrorKind::PermissionDenied,
                format!("permission denied: {}", path.display()),
            ),
            other @ (IoError::ShortIo { .. } | IoError::InvalidOffset { .. }) => {
                io::Error::new(io::ErrorKind::UnexpectedEof, other.to_string())
            }
        }
    }
}

impl From<IoError> for ReadError {
    fn from(err: IoError) -> Self {
        match err {
            IoError::ShortIo {
                expected, actual, ..
            } => ReadError::truncated("source read", expected, actual),
            other => ReadError::Io {
                source: other.into(),
            },
        }
    }
}
