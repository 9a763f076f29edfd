//! # tsscan-test
//!
//! Integration tests for the tsscan read path.
//!
//! This crate contains:
//! - A column fixture writer producing real page bytes
//! - Series generators for randomized tests
//! - End-to-end scan, pagination, pruning and lookup suites under `tests/`

#![warn(missing_docs)]
#![warn(clippy::all)]

/// Column fixture writer.
pub mod fixture;

/// Test utilities and helpers.
pub mod utils;

pub use fixture::{BuiltColumn, ColumnBuilder, PageSpec};
