//! Fixed-width bit-packing.
//!
//! Values are packed in groups of eight with no padding between values.
//! Bits are written MSB-first starting at bit 0 of the first output byte, so
//! value `k` of a group occupies stream bits `k*w .. k*w + w - 1`. A full
//! group of eight `w`-bit values therefore takes exactly `w` bytes.
//!
//! ```text
//! w = 3, values = [1, 2, 3, 4, 5, 6, 7, 0]
//!
//! bits:  001 010 011 100 101 110 111 000
//! bytes: 00101001 11001011 10111000
//! ```

use tsscan_common::constants::{MAX_BIT_WIDTH, PACK_GROUP_SIZE};
use tsscan_common::error::{ReadError, ReadResult};

/// Packs and unpacks unsigned integers at a fixed bit width.
///
/// # Example
///
/// ```rust
/// use tsscan_encoding::BitPacker;
///
/// let packer = BitPacker::new(3).unwrap();
/// let mut out = [0u8; 3];
/// packer.pack8_values(&[1, 2, 3, 4, 5, 6, 7, 0], &mut out);
/// assert_eq!(out, [0b0010_1001, 0b1100_1011, 0b1011_1000]);
///
/// let values = packer.unpack_all_values(&out, 0, out.len(), 8).unwrap();
/// assert_eq!(values, vec![1, 2, 3, 4, 5, 6, 7, 0]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BitPacker {
    width: u32,
    mask: u64,
}

impl BitPacker {
    /// Creates a packer for `width` bits per value.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` unless `0 < width <= 64`.
    pub fn new(width: u32) -> ReadResult<Self> {
        if width == 0 || width > MAX_BIT_WIDTH {
            return Err(ReadError::invalid_argument(format!(
                "bit width must be in 1..={MAX_BIT_WIDTH}, got {width}"
            )));
        }
        let mask = if width == 64 {
            u64::MAX
        } else {
            (1u64 << width) - 1
        };
        Ok(Self { width, mask })
    }

    /// Returns the bit width.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns the number of bytes `count` packed values occupy.
    #[inline]
    pub fn packed_len(&self, count: usize) -> usize {
        ((count as u128 * u128::from(self.width) + 7) / 8) as usize
    }

    /// Packs exactly eight values into `out[..width]`.
    ///
    /// Bits above the packer's width are discarded.
    ///
    /// # Panics
    ///
    /// Panics if `out` is shorter than `width` bytes.
    pub fn pack8_values(&self, values: &[u64; PACK_GROUP_SIZE], out: &mut [u8]) {
        let w = self.width;
        let out = &mut out[..w as usize];
        let mut acc: u128 = 0;
        let mut nbits: u32 = 0;
        let mut idx = 0;

        for &value in values {
            acc = (acc << w) | u128::from(value & self.mask);
            nbits += w;
            while nbits >= 8 {
                nbits -= 8;
                out[idx] = (acc >> nbits) as u8;
                idx += 1;
            }
            acc &= (1u128 << nbits) - 1;
        }

        debug_assert_eq!(nbits, 0);
        debug_assert_eq!(idx, out.len());
    }

    /// Unpacks one full group of eight values starting at `buf[offset]`.
    ///
    /// # Errors
    ///
    /// Returns `Truncated` if fewer than `width` bytes remain.
    pub fn unpack8_values(
        &self,
        buf: &[u8],
        offset: usize,
        out: &mut [u64; PACK_GROUP_SIZE],
    ) -> ReadResult<()> {
        let needed = self.width as usize;
        let available = buf.len().saturating_sub(offset);
        if available < needed {
            return Err(ReadError::truncated("bit-packed group", needed, available));
        }
        self.unpack_into(&buf[offset..offset + needed], out);
        Ok(())
    }

    /// Unpacks `count` values from `buf[offset..offset + len]`.
    ///
    /// `count` need not be a multiple of eight: a trailing partial group
    /// only needs `ceil(remaining * width / 8)` bytes.
    ///
    /// # Errors
    ///
    /// Returns `Truncated` if the range lies outside `buf` or holds fewer
    /// bytes than `count` values need.
    pub fn unpack_all_values(
        &self,
        buf: &[u8],
        offset: usize,
        len: usize,
        count: usize,
    ) -> ReadResult<Vec<u64>> {
        let available = buf.len().saturating_sub(offset).min(len);
        if available < len {
            return Err(ReadError::truncated("bit-packed block", len, available));
        }
        let needed = self.packed_len(count);
        if len < needed {
            return Err(ReadError::truncated("bit-packed block", needed, len));
        }

        let mut values = vec![0u64; count];
        self.unpack_into(&buf[offset..offset + needed], &mut values);
        Ok(values)
    }

    /// Decodes `out.len()` values from `src`, which must hold enough bits.
    fn unpack_into(&self, src: &[u8], out: &mut [u64]) {
        let w = self.width;
        let mut acc: u128 = 0;
        let mut nbits: u32 = 0;
        let mut bytes = src.iter();

        for slot in out.iter_mut() {
            while nbits < w {
                // Callers size `src` from packed_len, so the iterator
                // cannot run dry before the last value is complete.
                let byte = bytes.next().copied().unwrap_or(0);
                acc = (acc << 8) | u128::from(byte);
                nbits += 8;
            }
            nbits -= w;
            *slot = ((acc >> nbits) as u64) & self.mask;
            acc &= (1u128 << nbits) - 1;
        }
    }
}

/// Returns the bit width needed for the largest value, never less than 1.
pub fn max_bit_width(values: &[u64]) -> u32 {
    values
        .iter()
        .map(|v| 64 - v.leading_zeros())
        .max()
        .unwrap_or(1)
        .max(1)
}
