//! Standard file byte source.
//!
//! Clones share one OS handle. Every read takes the handle's lock, seeks,
//! and reads before releasing it, so each clone sees only its own cursor.

use std::fs::File as StdFile;
use std::io::{Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use bytes::Bytes;
use parking_lot::Mutex;

use super::error::{IoError, IoResult};
use super::source::ByteSource;

/// A read-only file shared between scanners.
#[derive(Debug, Clone)]
pub struct StandardFile {
    /// The underlying file, wrapped in a mutex for thread-safe access.
    file: Arc<Mutex<StdFile>>,
    /// The file path.
    path: PathBuf,
    /// This handle's cursor.
    position: u64,
}

impl StandardFile {
    /// Opens a file for reading.
    pub fn open(path: impl AsRef<Path>) -> IoResult<Self> {
        let path = path.as_ref().to_path_buf();
        let file = StdFile::open(&path).map_err(|e| IoError::from_io_with_path(e, &path))?;
        Ok(Self {
            file: Arc::new(Mutex::new(file)),
            path,
            position: 0,
        })
    }

    /// Returns the file path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ByteSource for StandardFile {
    fn len(&self) -> IoResult<u64> {
        let file = self.file.lock();
        Ok(file.metadata()?.len())
    }

    fn seek(&mut self, offset: u64) -> IoResult<()> {
        self.position = offset;
        Ok(())
    }

    fn read(&mut self, buf: &mut [u8]) -> IoResult<usize> {
        let mut file = self.file.lock();
        file.seek(SeekFrom::Start(self.position))?;
        let n = file.read(buf)?;
        self.position += n as u64;
        Ok(n)
    }

    fn read_fully(&mut self, offset: u64, len: usize) -> IoResult<Bytes> {
        let mut buf = vec![0u8; len];
        let mut file = self.file.lock();
        file.seek(SeekFrom::Start(offset))?;

        let mut total_read = 0;
        while total_read < len {
            let n = file.read(&mut buf[total_read..])?;
            if n == 0 {
                return Err(IoError::short_read(len, total_read));
            }
            total_read += n;
        }
        self.position = offset + len as u64;
        Ok(Bytes::from(buf))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn temp_file(contents: &[u8]) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_open_and_read() {
        let tmp = temp_file(b"hello column");
        let mut file = StandardFile::open(tmp.path()).unwrap();
        assert_eq!(file.len().unwrap(), 12);
        assert_eq!(file.path(), tmp.path());

        let bytes = file.read_fully(6, 6).unwrap();
        assert_eq!(&bytes[..], b"column");
    }

    #[test]
    fn test_short_read() {
        let tmp = temp_file(b"tiny");
        let mut file = StandardFile::open(tmp.path()).unwrap();
        let err = file.read_fully(2, 10).unwrap_err();
        assert!(matches!(err, IoError::ShortIo { expected: 10, actual: 2, .. }));
    }

    #[test]
    fn test_clones_keep_own_cursor() {
        let tmp = temp_file(b"0123456789");
        let mut a = StandardFile::open(tmp.path()).unwrap();
        let mut b = a.clone();

        a.seek(1).unwrap();
        b.seek(7).unwrap();
        let mut buf = [0u8; 2];
        assert_eq!(a.read(&mut buf).unwrap(), 2);
        assert_eq!(&buf, b"12");
        assert_eq!(b.read(&mut buf).unwrap(), 2);
        assert_eq!(&buf, b"78");
    }

    #[test]
    fn test_open_missing() {
        let dir = tempfile::tempdir().unwrap();
        let err = StandardFile::open(dir.path().join("missing.tss")).unwrap_err();
        assert!(err.is_not_found());
    }
}
