//! Configuration for tsscan.
//!
//! This module contains the knobs a caller may tune when opening a column
//! for scanning.

mod scan;

pub use scan::ScanConfig;
