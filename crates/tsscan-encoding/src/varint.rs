//! Unsigned LEB128 varints.
//!
//! Seven bits per byte, least significant group first, high bit set on
//! every byte except the last. Used for block lengths and run headers.

use bytes::Buf;

use tsscan_common::constants::MAX_VARINT_LEN;
use tsscan_common::error::{ReadError, ReadResult};

/// Reads an unsigned varint from the front of `buf`.
///
/// # Errors
///
/// Returns `Truncated` if the buffer ends mid-varint, and `InvalidBlock` if
/// the encoding runs past ten bytes.
pub fn read_unsigned_varint(buf: &mut impl Buf) -> ReadResult<u64> {
    let mut value = 0u64;
    let mut shift = 0u32;

    for consumed in 0..MAX_VARINT_LEN {
        if !buf.has_remaining() {
            return Err(ReadError::truncated("varint", consumed + 1, consumed));
        }
        let byte = buf.get_u8();
        value |= u64::from(byte & 0x7F) << shift;
        if byte & 0x80 == 0 {
            return Ok(value);
        }
        shift += 7;
    }

    Err(ReadError::invalid_block(
        "varint",
        format!("longer than {MAX_VARINT_LEN} bytes"),
    ))
}

/// Reads a varint that must fit in a `usize`.
///
/// # Errors
///
/// As [`read_unsigned_varint`], plus `InvalidBlock` on overflow.
pub fn read_varint_len(buf: &mut impl Buf) -> ReadResult<usize> {
    let value = read_unsigned_varint(buf)?;
    usize::try_from(value)
        .map_err(|_| ReadError::invalid_block("varint", format!("length {value} overflows usize")))
}

/// Returns the encoded size of `value`.
pub fn varint_len(mut value: u64) -> usize {
    let mut n = 1;
    while value >= 0x80 {
        value >>= 7;
        n += 1;
    }
    n
}
