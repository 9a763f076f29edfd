//! tsscan Performance Benchmarks
//!
//! This crate contains benchmarks for the read path:
//! - Bit unpacking and value decoders
//! - Full column scans, filtered scans and point lookups
//!
//! Run benchmarks with:
//! ```bash
//! cargo bench -p tsscan-bench
//! ```

pub mod utils;
