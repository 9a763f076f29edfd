//! In-memory byte source.

use bytes::Bytes;

use super::error::{IoError, IoResult};
use super::source::ByteSource;

/// A byte source over an in-memory buffer.
///
/// `read_fully` returns slices of the shared buffer without copying.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    data: Bytes,
    position: u64,
}

impl MemorySource {
    /// Creates a source over `data`.
    pub fn new(data: impl Into<Bytes>) -> Self {
        Self {
            data: data.into(),
            position: 0,
        }
    }

    /// Returns the underlying buffer.
    pub fn data(&self) -> &Bytes {
        &self.data
    }

    /// Returns the cursor position.
    pub fn position(&self) -> u64 {
        self.position
    }
}

impl ByteSource for MemorySource {
    fn len(&self) -> IoResult<u64> {
        Ok(self.data.len() as u64)
    }

    fn seek(&mut self, offset: u64) -> IoResult<()> {
        if offset > self.data.len() as u64 {
            return Err(IoError::invalid_offset(offset, self.data.len() as u64));
        }
        self.position = offset;
        Ok(())
    }

    fn read(&mut self, buf: &mut [u8]) -> IoResult<usize> {
        let start = self.position as usize;
        let n = buf.len().min(self.data.len() - start);
        buf[..n].copy_from_slice(&self.data[start..start + n]);
        self.position += n as u64;
        Ok(n)
    }

    fn read_fully(&mut self, offset: u64, len: usize) -> IoResult<Bytes> {
        self.seek(offset)?;
        let start = offset as usize;
        let available = self.data.len() - start;
        if available < len {
            return Err(IoError::short_read(len, available));
        }
        self.position += len as u64;
        Ok(self.data.slice(start..start + len))
    }
}
