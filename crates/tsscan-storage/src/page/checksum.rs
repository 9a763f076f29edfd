//! Page body checksums.
//!
//! The header stores the CRC32 of the body exactly as it sits on storage,
//! before decompression.

/// Computes the CRC32 checksum of a stored page body.
///
/// # Example
///
/// ```rust
/// use tsscan_storage::page::compute_checksum;
///
/// let checksum = compute_checksum(b"page body");
/// assert_ne!(checksum, 0);
/// ```
#[inline]
pub fn compute_checksum(data: &[u8]) -> u32 {
    crc32fast::hash(data)
}

/// Verifies that the checksum matches the data.
///
/// # Example
///
/// ```rust
/// use tsscan_storage::page::{compute_checksum, verify_checksum};
///
/// let data = b"page body";
/// let checksum = compute_checksum(data);
/// assert!(verify_checksum(data, checksum));
/// assert!(!verify_checksum(data, checksum + 1));
/// ```
#[inline]
pub fn verify_checksum(data: &[u8], expected: u32) -> bool {
    compute_checksum(data) == expected
}
