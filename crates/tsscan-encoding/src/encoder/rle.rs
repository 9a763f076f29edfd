use crate::bitpacking::{max_bit_width, BitPacker};
use tsscan_common::constants::PACK_GROUP_SIZE;

use super::put_unsigned_varint;

/// Shortest run of equal values written as a repeated run.
const MIN_REPEAT: usize = 8;

/// Writes hybrid RLE blocks.
#[derive(Debug, Clone, Copy)]
pub struct RleEncoder {
    block_size: usize,
}

impl Default for RleEncoder {
    fn default() -> Self {
        Self { block_size: 256 }
    }
}

impl RleEncoder {
    /// Creates an encoder that writes at most `block_size` values per block.
    #[must_use]
    pub fn with_block_size(block_size: usize) -> Self {
        Self {
            block_size: block_size.max(1),
        }
    }

    /// Encodes booleans as 1-bit values.
    #[must_use]
    pub fn encode_bool(&self, values: &[bool]) -> Vec<u8> {
        let bits: Vec<u64> = values.iter().map(|v| u64::from(*v)).collect();
        self.encode_bits(&bits, Some(1))
    }

    /// Encodes 32-bit values; negatives force width 32.
    #[must_use]
    pub fn encode_i32(&self, values: &[i32]) -> Vec<u8> {
        let bits: Vec<u64> = values.iter().map(|v| u64::from(*v as u32)).collect();
        self.encode_bits(&bits, None)
    }

    /// Encodes 64-bit values; negatives force width 64.
    #[must_use]
    pub fn encode_i64(&self, values: &[i64]) -> Vec<u8> {
        let bits: Vec<u64> = values.iter().map(|v| *v as u64).collect();
        self.encode_bits(&bits, None)
    }

    fn encode_bits(&self, values: &[u64], width: Option<u32>) -> Vec<u8> {
        let mut out = Vec::new();
        for chunk in values.chunks(self.block_size) {
            let width = width.unwrap_or_else(|| max_bit_width(chunk));
            let mut block = vec![width as u8];
            write_runs(&mut block, chunk, width);
            put_unsigned_varint(&mut out, block.len() as u64);
            out.extend_from_slice(&block);
        }
        out
    }
}

fn write_runs(out: &mut Vec<u8>, values: &[u64], width: u32) {
    let mut literal_start = 0;
    let mut i = 0;
    while i < values.len() {
        let mut j = i;
        while j < values.len() && values[j] == values[i] {
            j += 1;
        }
        if j - i >= MIN_REPEAT {
            write_packed(out, &values[literal_start..i], width);
            write_repeated(out, values[i], j - i, width);
            literal_start = j;
        }
        i = j;
    }
    write_packed(out, &values[literal_start..], width);
}

fn write_repeated(out: &mut Vec<u8>, value: u64, count: usize, width: u32) {
    put_unsigned_varint(out, (count as u64) << 1);
    let n = width.div_ceil(8) as usize;
    out.extend_from_slice(&value.to_le_bytes()[..n]);
}

fn write_packed(out: &mut Vec<u8>, values: &[u64], width: u32) {
    if values.is_empty() {
        return;
    }
    let groups = values.len().div_ceil(PACK_GROUP_SIZE);
    put_unsigned_varint(out, ((groups as u64) << 1) | 1);
    out.push((values.len() - (groups - 1) * PACK_GROUP_SIZE) as u8);

    let packer = match BitPacker::new(width) {
        Ok(packer) => packer,
        Err(_) => unreachable!("rle block widths are in 1..=64"),
    };
    for group in values.chunks(PACK_GROUP_SIZE) {
        let mut padded = [0u64; PACK_GROUP_SIZE];
        padded[..group.len()].copy_from_slice(group);
        let mut bytes = vec![0u8; width as usize];
        packer.pack8_values(&padded, &mut bytes);
        out.extend_from_slice(&bytes);
    }
}
