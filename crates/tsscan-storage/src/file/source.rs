//! The byte source trait.

use bytes::Bytes;

use super::error::{IoError, IoResult};

/// Positioned, blocking access to the bytes a column lives in.
///
/// Implementations keep their own cursor: [`seek`](Self::seek) moves it and
/// [`read`](Self::read) reads from it. Most callers only need
/// [`read_fully`](Self::read_fully), which does both.
pub trait ByteSource: Send {
    /// Returns the total length of the source.
    fn len(&self) -> IoResult<u64>;

    /// Returns true if the source holds no bytes.
    fn is_empty(&self) -> IoResult<bool> {
        Ok(self.len()? == 0)
    }

    /// Moves the cursor to `offset`.
    fn seek(&mut self, offset: u64) -> IoResult<()>;

    /// Reads into `buf` from the cursor, returning the bytes read.
    ///
    /// May return less than `buf.len()`; zero means end of source.
    fn read(&mut self, buf: &mut [u8]) -> IoResult<usize>;

    /// Reads exactly `len` bytes starting at `offset`.
    ///
    /// Returns `ShortIo` if the source ends first.
    fn read_fully(&mut self, offset: u64, len: usize) -> IoResult<Bytes> {
        self.seek(offset)?;
        let mut buf = vec![0u8; len];
        let mut total_read = 0;
        while total_read < len {
            let n = self.read(&mut buf[total_read..])?;
            if n == 0 {
                return Err(IoError::short_read(len, total_read));
            }
            total_read += n;
        }
        Ok(Bytes::from(buf))
    }
}

impl<S: ByteSource + ?Sized> ByteSource for Box<S> {
    fn len(&self) -> IoResult<u64> {
        (**self).len()
    }

    fn seek(&mut self, offset: u64) -> IoResult<()> {
        (**self).seek(offset)
    }

    fn read(&mut self, buf: &mut [u8]) -> IoResult<usize> {
        (**self).read(buf)
    }

    fn read_fully(&mut self, offset: u64, len: usize) -> IoResult<Bytes> {
        (**self).read_fully(offset, len)
    }
}
