//! Page reader state machine.
//!
//! ```text
//!              next_page_header()
//!   ┌─────────┐ ─────────────────▶ ┌───────────┐
//!   │  Ready  │                    │ HasHeader │
//!   └─────────┘ ◀───────────────── └───────────┘
//!        │        next_page() or
//!        │        skip_current_page()
//!        ▼
//!   Exhausted (position == end)
//! ```
//!
//! Both ways out of `HasHeader` advance the cursor past the whole stored
//! body, so skipping and decoding account for bytes identically.

use bytes::{Buf, Bytes};
use tracing::trace;

use tsscan_common::config::ScanConfig;
use tsscan_common::error::{ReadError, ReadResult};

use super::checksum::compute_checksum;
use super::compression::CompressionType;
use super::header::PageHeader;
use crate::file::ByteSource;

#[derive(Debug)]
enum State {
    Ready,
    HasHeader {
        header: PageHeader,
        /// Absolute offset of the header's length prefix.
        page_start: u64,
    },
}

/// Walks the pages of one column region.
///
/// # Example
///
/// ```rust
/// use bytes::Bytes;
/// use tsscan_common::ScanConfig;
/// use tsscan_storage::file::MemorySource;
/// use tsscan_storage::page::{CompressionType, PageReader};
///
/// let mut source = MemorySource::new(Bytes::new());
/// let config = ScanConfig::default();
/// let reader = PageReader::new(&mut source, CompressionType::Uncompressed, 0, 0, &config);
/// assert!(!reader.has_next_page());
/// ```
pub struct PageReader<'a, S: ByteSource + ?Sized> {
    source: &'a mut S,
    config: &'a ScanConfig,
    compression: CompressionType,
    start: u64,
    end: u64,
    position: u64,
    state: State,
}

impl<'a, S: ByteSource + ?Sized> PageReader<'a, S> {
    /// Creates a reader over `[position, end)` of `source`.
    ///
    /// `position` must lie on a page boundary.
    pub fn new(
        source: &'a mut S,
        compression: CompressionType,
        position: u64,
        end: u64,
        config: &'a ScanConfig,
    ) -> Self {
        Self {
            source,
            config,
            compression,
            start: position,
            end,
            position,
            state: State::Ready,
        }
    }

    /// Returns the absolute offset of the next unread byte.
    #[inline]
    pub fn position(&self) -> u64 {
        self.position
    }

    /// Returns the bytes consumed since the reader was created.
    #[inline]
    pub fn consumed(&self) -> u64 {
        self.position - self.start
    }

    /// Returns the bytes left in the region.
    #[inline]
    pub fn remaining(&self) -> u64 {
        self.end.saturating_sub(self.position)
    }

    /// Returns true if no bytes are left in the region.
    #[inline]
    pub fn is_exhausted(&self) -> bool {
        self.remaining() == 0
    }

    /// Returns true if at least a full fixed-size header remains and no
    /// header is pending.
    pub fn has_next_page(&self) -> bool {
        matches!(self.state, State::Ready)
            && self.remaining() >= (PageHeader::PREFIX_SIZE + PageHeader::FIXED_SIZE) as u64
    }

    /// Returns the header read by the last `next_page_header`, if its body
    /// has not been consumed.
    pub fn current_header(&self) -> Option<&PageHeader> {
        match &self.state {
            State::HasHeader { header, .. } => Some(header),
            State::Ready => None,
        }
    }

    /// Reads the next page header, advancing past the header only.
    ///
    /// # Errors
    ///
    /// Returns `InvalidState` if the previous header's body was not consumed,
    /// `Truncated` if the header or its declared body does not fit in the
    /// region, and `InvalidHeader` for malformed or oversized headers.
    pub fn next_page_header(&mut self) -> ReadResult<PageHeader> {
        if let State::HasHeader { page_start, .. } = self.state {
            return Err(ReadError::invalid_state(format!(
                "body of page at {page_start} neither read nor skipped"
            )));
        }

        let page_start = self.position;
        let remaining = self.remaining();
        if remaining < PageHeader::PREFIX_SIZE as u64 {
            return Err(ReadError::truncated(
                "page header length",
                PageHeader::PREFIX_SIZE,
                remaining as usize,
            ));
        }

        let mut prefix = self.source.read_fully(page_start, PageHeader::PREFIX_SIZE)?;
        let record_len = prefix.get_u32() as usize;
        if record_len > self.config.max_header_size {
            return Err(ReadError::invalid_header(format!(
                "header of {record_len} bytes exceeds limit {}",
                self.config.max_header_size
            )));
        }
        let available = remaining - PageHeader::PREFIX_SIZE as u64;
        if available < record_len as u64 {
            return Err(ReadError::truncated("page header", record_len, available as usize));
        }

        let record_start = page_start + PageHeader::PREFIX_SIZE as u64;
        let record = self.source.read_fully(record_start, record_len)?;
        let header = PageHeader::deserialize(record)?;

        if header.raw_size as usize > self.config.max_page_raw_size {
            return Err(ReadError::invalid_header(format!(
                "raw size {} exceeds limit {}",
                header.raw_size, self.config.max_page_raw_size
            )));
        }

        let body_start = record_start + record_len as u64;
        let body_available = self.end.saturating_sub(body_start);
        if body_available < u64::from(header.compressed_size) {
            return Err(ReadError::truncated(
                "page body",
                header.compressed_size as usize,
                body_available as usize,
            ));
        }

        trace!(
            offset = page_start,
            rows = header.num_rows,
            min_ts = header.min_timestamp,
            max_ts = header.max_timestamp,
            encoding = %header.encoding,
            "read page header"
        );

        self.position = body_start;
        self.state = State::HasHeader {
            header: header.clone(),
            page_start,
        };
        Ok(header)
    }

    /// Reads, verifies and decompresses the current page body.
    ///
    /// # Errors
    ///
    /// Returns `InvalidState` without a pending header, `ChecksumMismatch`
    /// when verification is on and fails, and `Decompression` for a bad body.
    pub fn next_page(&mut self) -> ReadResult<Bytes> {
        let (compressed_size, raw_size, checksum, page_start) = match &self.state {
            State::HasHeader { header, page_start } => (
                header.compressed_size,
                header.raw_size,
                header.checksum,
                *page_start,
            ),
            State::Ready => return Err(ReadError::invalid_state("no page header pending")),
        };

        let stored = self
            .source
            .read_fully(self.position, compressed_size as usize)?;

        if self.config.verify_checksums {
            let computed = compute_checksum(&stored);
            if computed != checksum {
                return Err(ReadError::ChecksumMismatch {
                    offset: page_start,
                    expected: checksum,
                    computed,
                });
            }
        }

        let body = self.compression.decompress(stored, raw_size as usize)?;
        self.position += u64::from(compressed_size);
        self.state = State::Ready;
        Ok(body)
    }

    /// Advances past the current page body without reading it.
    ///
    /// # Errors
    ///
    /// Returns `InvalidState` without a pending header.
    pub fn skip_current_page(&mut self) -> ReadResult<()> {
        let compressed_size = match &self.state {
            State::HasHeader { header, .. } => header.compressed_size,
            State::Ready => return Err(ReadError::invalid_state("no page header pending")),
        };
        self.position += u64::from(compressed_size);
        self.state = State::Ready;
        Ok(())
    }
}
