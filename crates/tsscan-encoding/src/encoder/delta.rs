use bytes::BufMut;

use crate::bitpacking::{max_bit_width, BitPacker};
use tsscan_common::constants::PACK_GROUP_SIZE;

/// Writes TS_2DIFF blocks.
#[derive(Debug, Clone, Copy)]
pub struct DeltaEncoder {
    block_size: usize,
}

impl Default for DeltaEncoder {
    fn default() -> Self {
        Self { block_size: 128 }
    }
}

impl DeltaEncoder {
    /// Creates an encoder that writes at most `block_size` values per block.
    #[must_use]
    pub fn with_block_size(block_size: usize) -> Self {
        Self {
            block_size: block_size.max(1),
        }
    }

    /// Encodes 32-bit values.
    #[must_use]
    pub fn encode_i32(&self, values: &[i32]) -> Vec<u8> {
        let mut out = Vec::new();
        for chunk in values.chunks(self.block_size) {
            let deltas: Vec<i32> = chunk.windows(2).map(|w| w[1].wrapping_sub(w[0])).collect();
            let min_delta = deltas.iter().copied().min().unwrap_or(0);
            let packed: Vec<u64> = deltas
                .iter()
                .map(|d| u64::from(d.wrapping_sub(min_delta) as u32))
                .collect();
            write_block(&mut out, &packed, |buf| {
                buf.put_i32(min_delta);
                buf.put_i32(chunk[0]);
            });
        }
        out
    }

    /// Encodes 64-bit values.
    #[must_use]
    pub fn encode_i64(&self, values: &[i64]) -> Vec<u8> {
        let mut out = Vec::new();
        for chunk in values.chunks(self.block_size) {
            let deltas: Vec<i64> = chunk.windows(2).map(|w| w[1].wrapping_sub(w[0])).collect();
            let min_delta = deltas.iter().copied().min().unwrap_or(0);
            let packed: Vec<u64> = deltas
                .iter()
                .map(|d| d.wrapping_sub(min_delta) as u64)
                .collect();
            write_block(&mut out, &packed, |buf| {
                buf.put_i64(min_delta);
                buf.put_i64(chunk[0]);
            });
        }
        out
    }
}

fn write_block(out: &mut Vec<u8>, packed: &[u64], put_head: impl FnOnce(&mut Vec<u8>)) {
    let width = if packed.iter().all(|p| *p == 0) {
        0
    } else {
        max_bit_width(packed)
    };

    out.put_u32(packed.len() as u32);
    out.put_u32(width);
    put_head(out);

    if width == 0 {
        return;
    }
    let packer = match BitPacker::new(width) {
        Ok(packer) => packer,
        Err(_) => unreachable!("width from max_bit_width is in range"),
    };
    let mut body = Vec::new();
    for group in packed.chunks(PACK_GROUP_SIZE) {
        let mut values = [0u64; PACK_GROUP_SIZE];
        values[..group.len()].copy_from_slice(group);
        let mut bytes = vec![0u8; width as usize];
        packer.pack8_values(&values, &mut bytes);
        body.extend_from_slice(&bytes);
    }
    body.truncate(packer.packed_len(packed.len()));
    out.extend_from_slice(&body);
}
