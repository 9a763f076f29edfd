//! Page body compression.

use std::fmt;

use bytes::Bytes;

use tsscan_common::error::{ReadError, ReadResult};

/// Compression applied to every page body of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum CompressionType {
    /// Bodies are stored as-is.
    #[default]
    Uncompressed = 0,
    /// Raw Snappy blocks.
    Snappy = 1,
}

impl CompressionType {
    /// Creates a `CompressionType` from its tag.
    #[inline]
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Uncompressed),
            1 => Some(Self::Snappy),
            _ => None,
        }
    }

    /// Returns the tag.
    #[inline]
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    /// Decompresses a stored body that must expand to `raw_size` bytes.
    ///
    /// # Errors
    ///
    /// Returns `Decompression` if the codec rejects the input or the output
    /// length differs from `raw_size`.
    pub fn decompress(&self, data: Bytes, raw_size: usize) -> ReadResult<Bytes> {
        let out = match self {
            Self::Uncompressed => data,
            Self::Snappy => {
                let expected = snap::raw::decompress_len(&data)
                    .map_err(|e| ReadError::decompression(format!("snappy: {e}")))?;
                if expected != raw_size {
                    return Err(ReadError::decompression(format!(
                        "snappy block expands to {expected} bytes, header says {raw_size}"
                    )));
                }
                let mut decoder = snap::raw::Decoder::new();
                let decompressed = decoder
                    .decompress_vec(&data)
                    .map_err(|e| ReadError::decompression(format!("snappy: {e}")))?;
                Bytes::from(decompressed)
            }
        };

        if out.len() != raw_size {
            return Err(ReadError::decompression(format!(
                "{self} body is {} bytes, header says {raw_size}",
                out.len()
            )));
        }
        Ok(out)
    }

    /// Compresses a body. Fixture helper only.
    #[cfg(any(test, feature = "test-utils"))]
    pub fn compress(&self, data: &[u8]) -> ReadResult<Vec<u8>> {
        match self {
            Self::Uncompressed => Ok(data.to_vec()),
            Self::Snappy => {
                let mut encoder = snap::raw::Encoder::new();
                encoder
                    .compress_vec(data)
                    .map_err(|e| ReadError::decompression(format!("snappy compression: {e}")))
            }
        }
    }
}

impl fmt::Display for CompressionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Uncompressed => write!(f, "UNCOMPRESSED"),
            Self::Snappy => write!(f, "SNAPPY"),
        }
    }
}
