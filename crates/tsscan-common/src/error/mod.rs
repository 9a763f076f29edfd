//! Error handling for tsscan.
//!
//! This module provides the unified error type and result alias used by the
//! codec, storage and reader crates.

mod read;

pub use read::{ErrorCode, ReadError};

/// Result type alias for read path operations.
pub type ReadResult<T> = std::result::Result<T, ReadError>;
