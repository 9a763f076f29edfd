//! Page framing.
//!
//! A column region is a run of pages. Each page is a length-prefixed header
//! followed by a (possibly compressed) body:
//!
//! ```text
//! ┌──────────────┬────────────────────────────┬─────────────────────────┐
//! │ header_len   │ header record              │ body                    │
//! │ u32 BE       │ header_len bytes           │ compressed_size bytes   │
//! └──────────────┴────────────────────────────┴─────────────────────────┘
//! ```
//!
//! Once decompressed, a body holds the time channel then the value channel:
//!
//! ```text
//! [uvarint time length][TS_2DIFF i64 timestamps][value channel]
//! ```

mod body;
mod checksum;
mod compression;
mod header;
mod reader;

pub use body::{split_page_body, PageBody};
pub use checksum::{compute_checksum, verify_checksum};
pub use compression::CompressionType;
pub use header::{Digest, PageHeader};
pub use reader::PageReader;
