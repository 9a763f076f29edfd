//! Format-wide constants for tsscan.
//!
//! These values describe the on-disk layout and the default limits applied
//! while reading it.

// =============================================================================
// Page Framing
// =============================================================================

/// Size of the length prefix in front of every page header.
pub const PAGE_HEADER_LENGTH_PREFIX: usize = 4;

/// Size of the fixed part of a page header (after the length prefix).
///
/// encoding (1), num_rows (4), min_timestamp (8), max_timestamp (8),
/// compressed_size (4), raw_size (4), checksum (4), has_digest (1) = 34 bytes.
pub const PAGE_HEADER_FIXED_SIZE: usize = 34;

/// Default upper bound on an encoded page header (64 KB).
///
/// Digests are small; anything larger points at a corrupt length prefix.
pub const DEFAULT_MAX_HEADER_SIZE: usize = 64 * 1024;

/// Default upper bound on a decompressed page body (64 MB).
pub const DEFAULT_MAX_PAGE_RAW_SIZE: usize = 64 * 1024 * 1024;

// =============================================================================
// Scanning
// =============================================================================

/// Default number of rows a single scan call tries to return.
pub const DEFAULT_FETCH_SIZE: usize = 4096;

// =============================================================================
// Codec Limits
// =============================================================================

/// Number of values in one bit-packed group.
pub const PACK_GROUP_SIZE: usize = 8;

/// Maximum bit width of a packed integer.
pub const MAX_BIT_WIDTH: u32 = 64;

/// Maximum number of bytes in an unsigned LEB128 varint encoding a `u64`.
pub const MAX_VARINT_LEN: usize = 10;

/// Largest decimal scale a fixed-point float column may declare.
pub const MAX_POINT_NUMBER: u32 = 18;
