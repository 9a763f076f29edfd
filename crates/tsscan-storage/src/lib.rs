//! # tsscan-storage
//!
//! Byte access and page framing for the tsscan read path.
//!
//! This crate sits between raw storage and the value codecs:
//! - `file`: the [`ByteSource`](file::ByteSource) seam with a shared-handle
//!   file implementation and an in-memory one
//! - `page`: the page header record, body compression and checksums, and the
//!   [`PageReader`](page::PageReader) state machine that walks a column
//!   region page by page
//!
//! Nothing here interprets timestamps or values beyond the header fields;
//! decoding belongs to `tsscan-encoding` and the scan logic to
//! `tsscan-reader`.

#![warn(missing_docs)]
#![warn(clippy::all)]

/// Byte sources and I/O errors
pub mod file;

/// Page header, body framing and the page reader
pub mod page;

pub use file::{ByteSource, IoError, IoResult, MemorySource, StandardFile};
pub use page::{CompressionType, Digest, PageHeader, PageReader};
