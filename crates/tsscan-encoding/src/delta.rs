//! TS_2DIFF delta decoding.
//!
//! A delta stream is a concatenation of self-describing blocks. Each block
//! stores its first value verbatim and every following value as a
//! bit-packed offset from the smallest delta in the block:
//!
//! ```text
//! +--------------+-----------+----------------+------------------+----------------+
//! | pack_num u32 | width u32 | min_delta (T)  | first_value (T)  | packed deltas  |
//! +--------------+-----------+----------------+------------------+----------------+
//!                                          ceil(pack_num * width / 8) bytes ^
//! ```
//!
//! All fixed fields are big-endian. A block yields `pack_num + 1` values:
//! `v0 = first_value`, `v(i+1) = v(i) + min_delta + packed(i)`, with wrapping
//! arithmetic. The decoder does not know how many values to expect; it stops
//! when its input is exhausted.

use std::fmt;

use bytes::{Buf, Bytes};
use tracing::trace;

use tsscan_common::constants::MAX_BIT_WIDTH;
use tsscan_common::error::{ReadError, ReadResult};

use crate::bitpacking::BitPacker;

/// Integer types a delta stream can carry.
pub trait DeltaInt: Copy + Default + PartialEq + fmt::Debug + Send + 'static {
    /// Encoded width of `min_delta` and `first_value`.
    const SIZE: usize;

    /// Reads one big-endian value.
    fn get(buf: &mut Bytes) -> Self;

    /// Returns `self + min_delta + packed` with wrapping.
    fn apply_delta(self, min_delta: Self, packed: u64) -> Self;
}

impl DeltaInt for i32 {
    const SIZE: usize = 4;

    #[inline]
    fn get(buf: &mut Bytes) -> Self {
        buf.get_i32()
    }

    #[inline]
    fn apply_delta(self, min_delta: Self, packed: u64) -> Self {
        self.wrapping_add(min_delta).wrapping_add(packed as i32)
    }
}

impl DeltaInt for i64 {
    const SIZE: usize = 8;

    #[inline]
    fn get(buf: &mut Bytes) -> Self {
        buf.get_i64()
    }

    #[inline]
    fn apply_delta(self, min_delta: Self, packed: u64) -> Self {
        self.wrapping_add(min_delta).wrapping_add(packed as i64)
    }
}

/// The block currently being drained.
#[derive(Debug, Default)]
struct Block<T> {
    previous: T,
    min_delta: T,
    first_pending: bool,
    /// Packed offsets; empty for zero-width blocks.
    packed: Vec<u64>,
    count: usize,
    pos: usize,
}

impl<T: DeltaInt> Block<T> {
    #[inline]
    fn has_remaining(&self) -> bool {
        self.first_pending || self.pos < self.count
    }

    #[inline]
    fn next(&mut self) -> T {
        if self.first_pending {
            self.first_pending = false;
            return self.previous;
        }
        let packed = self.packed.get(self.pos).copied().unwrap_or(0);
        self.pos += 1;
        self.previous = self.previous.apply_delta(self.min_delta, packed);
        self.previous
    }
}

/// Decoder for a TS_2DIFF stream of `i32` or `i64` values.
///
/// # Example
///
/// ```rust
/// use bytes::{BufMut, Bytes};
/// use tsscan_encoding::DeltaDecoder;
///
/// // One block: first value 100, two deltas of exactly min_delta (5).
/// let mut raw = Vec::new();
/// raw.put_u32(2); // pack_num
/// raw.put_u32(1); // width
/// raw.put_i64(5); // min_delta
/// raw.put_i64(100); // first value
/// raw.put_u8(0); // two 1-bit zeros
///
/// let mut decoder = DeltaDecoder::<i64>::new(Bytes::from(raw));
/// assert_eq!(decoder.read_all().unwrap(), vec![100, 105, 110]);
/// ```
#[derive(Debug)]
pub struct DeltaDecoder<T: DeltaInt> {
    buf: Bytes,
    block: Block<T>,
}

impl<T: DeltaInt> DeltaDecoder<T> {
    /// Creates a decoder over an encoded delta stream.
    pub fn new(buf: Bytes) -> Self {
        Self {
            buf,
            block: Block::default(),
        }
    }

    /// Returns true while values remain in the current block or input.
    #[inline]
    pub fn has_next(&self) -> bool {
        self.block.has_remaining() || self.buf.has_remaining()
    }

    /// Returns the next value.
    ///
    /// # Errors
    ///
    /// Returns `Truncated` if a block header or its packed bytes are cut
    /// short, and `InvalidBlock` for a bit width above 64.
    pub fn read_next(&mut self) -> ReadResult<T> {
        if !self.block.has_remaining() {
            self.load_block()?;
        }
        Ok(self.block.next())
    }

    /// Drains every remaining value.
    ///
    /// # Errors
    ///
    /// As [`read_next`](Self::read_next).
    pub fn read_all(&mut self) -> ReadResult<Vec<T>> {
        let mut values = Vec::new();
        while self.has_next() {
            values.push(self.read_next()?);
        }
        Ok(values)
    }

    /// Returns the number of undecoded input bytes.
    #[inline]
    pub fn remaining_bytes(&self) -> usize {
        self.buf.remaining()
    }

    fn load_block(&mut self) -> ReadResult<()> {
        let header_len = 8 + 2 * T::SIZE;
        if self.buf.remaining() < header_len {
            return Err(ReadError::truncated(
                "delta block header",
                header_len,
                self.buf.remaining(),
            ));
        }

        let pack_num = self.buf.get_u32() as usize;
        let width = self.buf.get_u32();
        if width > MAX_BIT_WIDTH {
            return Err(ReadError::invalid_block(
                "delta",
                format!("bit width {width} exceeds {MAX_BIT_WIDTH}"),
            ));
        }
        let min_delta = T::get(&mut self.buf);
        let first = T::get(&mut self.buf);

        let packed = if width == 0 {
            Vec::new()
        } else {
            let packer = BitPacker::new(width)?;
            let len = packer.packed_len(pack_num);
            let packed = packer.unpack_all_values(&self.buf, 0, len, pack_num)?;
            self.buf.advance(len);
            packed
        };

        trace!(pack_num, width, ?first, "loaded delta block");

        self.block = Block {
            previous: first,
            min_delta,
            first_pending: true,
            packed,
            count: pack_num,
            pos: 0,
        };
        Ok(())
    }
}
