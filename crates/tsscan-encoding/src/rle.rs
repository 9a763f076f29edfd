//! Hybrid run-length / bit-packed integer decoding.
//!
//! A stream is a sequence of length-prefixed blocks. Every block carries
//! its own bit width followed by runs of two kinds:
//!
//! ```text
//! block := [uvarint len][u8 width][run]*          (len covers width + runs)
//! run   := [uvarint h]...
//!   h even: repeated run, h >> 1 copies of one value
//!           [value: ceil(width / 8) bytes, little-endian]
//!   h odd:  bit-packed run of h >> 1 groups of eight
//!           [u8 valid values in last group][groups * width packed bytes]
//! ```
//!
//! Negative integers are stored as their two's complement bits, so a block
//! holding any negative `i32` has width 32.

use std::fmt;

use bytes::{Buf, Bytes};
use tracing::trace;

use tsscan_common::constants::PACK_GROUP_SIZE;
use tsscan_common::error::{ReadError, ReadResult};

use crate::bitpacking::BitPacker;
use crate::varint::{read_unsigned_varint, read_varint_len};

/// Integer types a run-length stream can carry.
pub trait RleInt: Copy + Default + PartialEq + fmt::Debug + Send + 'static {
    /// Widest bit width a block of this type may declare.
    const BITS: u32;

    /// Reinterprets the low bits of `bits` as a value.
    fn from_bits(bits: u64) -> Self;
}

impl RleInt for i32 {
    const BITS: u32 = 32;

    #[inline]
    fn from_bits(bits: u64) -> Self {
        bits as u32 as i32
    }
}

impl RleInt for i64 {
    const BITS: u32 = 64;

    #[inline]
    fn from_bits(bits: u64) -> Self {
        bits as i64
    }
}

#[derive(Debug)]
enum Run<T> {
    Repeated { value: T, left: usize },
    Packed { values: Vec<u64>, pos: usize },
}

impl<T: RleInt> Run<T> {
    #[inline]
    fn has_remaining(&self) -> bool {
        match self {
            Self::Repeated { left, .. } => *left > 0,
            Self::Packed { values, pos } => *pos < values.len(),
        }
    }
}

/// Decoder for a hybrid RLE stream of `i32` or `i64` values.
#[derive(Debug)]
pub struct RleDecoder<T: RleInt> {
    buf: Bytes,
    /// Unread runs of the current block.
    block: Bytes,
    width: u32,
    run: Run<T>,
}

impl<T: RleInt> RleDecoder<T> {
    /// Creates a decoder over an encoded RLE stream.
    pub fn new(buf: Bytes) -> Self {
        Self {
            buf,
            block: Bytes::new(),
            width: 0,
            run: Run::Repeated {
                value: T::default(),
                left: 0,
            },
        }
    }

    /// Returns true while undecoded values or bytes remain.
    #[inline]
    pub fn has_next(&self) -> bool {
        self.run.has_remaining() || self.block.has_remaining() || self.buf.has_remaining()
    }

    /// Returns the next value.
    ///
    /// # Errors
    ///
    /// Returns `Truncated` when a block or run is cut short, `InvalidBlock`
    /// for zero or oversized bit widths and empty runs. Reading after the
    /// stream is exhausted is also `Truncated`.
    pub fn read_next(&mut self) -> ReadResult<T> {
        while !self.run.has_remaining() {
            if self.block.has_remaining() {
                self.load_run()?;
            } else if self.buf.has_remaining() {
                self.load_block()?;
            } else {
                return Err(ReadError::truncated("rle value", 1, 0));
            }
        }

        let value = match &mut self.run {
            Run::Repeated { value, left } => {
                *left -= 1;
                *value
            }
            Run::Packed { values, pos } => {
                let bits = values[*pos];
                *pos += 1;
                T::from_bits(bits)
            }
        };
        Ok(value)
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

    fn load_block(&mut self) -> ReadResult<()> {
        let len = read_varint_len(&mut self.buf)?;
        if len == 0 {
            return Err(ReadError::invalid_block("rle", "empty block"));
        }
        if self.buf.remaining() < len {
            return Err(ReadError::truncated("rle block", len, self.buf.remaining()));
        }

        let mut block = self.buf.split_to(len);
        let width = u32::from(block.get_u8());
        if width == 0 || width > T::BITS {
            return Err(ReadError::invalid_block(
                "rle",
                format!("bit width {width} outside 1..={}", T::BITS),
            ));
        }

        trace!(len, width, "loaded rle block");
        self.width = width;
        self.block = block;
        Ok(())
    }

    fn load_run(&mut self) -> ReadResult<()> {
        let header = read_unsigned_varint(&mut self.block)?;
        let count = usize::try_from(header >> 1)
            .map_err(|_| ReadError::invalid_block("rle", "run length overflows usize"))?;
        if count == 0 {
            return Err(ReadError::invalid_block("rle", "empty run"));
        }

        if header & 1 == 0 {
            let n = self.width.div_ceil(8) as usize;
            if self.block.remaining() < n {
                return Err(ReadError::truncated("rle repeated value", n, self.block.remaining()));
            }
            let mut raw = [0u8; 8];
            self.block.copy_to_slice(&mut raw[..n]);
            let value = T::from_bits(u64::from_le_bytes(raw));

            trace!(count, ?value, "rle repeated run");
            self.run = Run::Repeated { value, left: count };
        } else {
            if !self.block.has_remaining() {
                return Err(ReadError::truncated("rle group count", 1, 0));
            }
            let last = usize::from(self.block.get_u8());
            if last == 0 || last > PACK_GROUP_SIZE {
                return Err(ReadError::invalid_block(
                    "rle",
                    format!("last group holds {last} values"),
                ));
            }

            let len = count
                .checked_mul(self.width as usize)
                .ok_or_else(|| ReadError::invalid_block("rle", "packed run length overflows"))?;
            let values_count = (count - 1) * PACK_GROUP_SIZE + last;
            let packer = BitPacker::new(self.width)?;
            let values = packer.unpack_all_values(&self.block, 0, len, values_count)?;
            self.block.advance(len);

            trace!(groups = count, values = values_count, "rle packed run");
            self.run = Run::Packed { values, pos: 0 };
        }
        Ok(())
    }
}
