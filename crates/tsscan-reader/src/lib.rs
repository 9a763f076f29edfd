//! # tsscan-reader
//!
//! Scan engine for tsscan columns.
//!
//! Given a [`ColumnRegion`] on a byte source, a [`ColumnScanner`] turns the
//! region's pages into `(timestamp, value)` pairs:
//!
//! - **Pruning**: column and page `[min, max]` digests are checked against
//!   the caller's filters before anything is decoded ([`DigestPruner`])
//! - **Filtered scans**: resumable, row-budgeted scans driven by a
//!   caller-owned [`ScanCursor`]
//! - **Point lookups**: a merge of sorted target timestamps against the
//!   column's sorted pages
//!
//! ## Example
//!
//! ```rust,no_run
//! use tsscan_common::{DataType, ScanConfig};
//! use tsscan_reader::{ColumnData, ColumnRegion, ColumnScanner, FilterExpr, ScanCursor};
//! use tsscan_storage::StandardFile;
//!
//! fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let region = ColumnRegion::new(0, 4096, DataType::Int32);
//!     let file = StandardFile::open("metrics.tss")?;
//!     let mut scanner = ColumnScanner::new(&region, file, ScanConfig::default())?;
//!
//!     let filter = FilterExpr::gt(25);
//!     let mut cursor = ScanCursor::new();
//!     let mut out = ColumnData::new(DataType::Int32);
//!     loop {
//!         let outcome = scanner.scan(&mut cursor, &mut out, 1024, None, Some(&filter))?;
//!         if outcome.column_exhausted || outcome.column_pruned {
//!             break;
//!         }
//!     }
//!     for (time, value) in out.iter() {
//!         println!("{time}: {value}");
//!     }
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

/// Column regions, results, cursors and dictionaries
pub mod column;

/// Filters and digests
pub mod filter;

/// Digest-based pruning
pub mod pruner;

/// Scans and lookups
pub mod scanner;

pub use column::{ColumnData, ColumnRegion, ColumnValues, EnumDictionary, ScanCursor, ScanOutcome};
pub use filter::{DigestForFilter, FilterExpr, SeriesFilter};
pub use pruner::DigestPruner;
pub use scanner::{accept, ColumnScanner, ScanStats};
