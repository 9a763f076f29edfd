//! Byte sources for column regions.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │            ByteSource Trait             │
//! │   (seek, read, read_fully, len)         │
//! └─────────────────────────────────────────┘
//!              │                   │
//!              ▼                   ▼
//! ┌─────────────────────┐  ┌─────────────────────┐
//! │   StandardFile      │  │   MemorySource      │
//! │   shared handle     │  │   Bytes, zero-copy  │
//! └─────────────────────┘  └─────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust
//! use bytes::Bytes;
//! use tsscan_storage::file::{ByteSource, MemorySource};
//!
//! let mut source = MemorySource::new(Bytes::from_static(b"0123456789"));
//! let bytes = source.read_fully(3, 4).unwrap();
//! assert_eq!(&bytes[..], b"3456");
//! assert!(source.read_fully(8, 4).is_err());
//! ```

mod error;
mod memory;
mod source;
mod std_io;

pub use error::{IoError, IoResult};
pub use memory::MemorySource;
pub use source::ByteSource;
pub use std_io::StandardFile;
