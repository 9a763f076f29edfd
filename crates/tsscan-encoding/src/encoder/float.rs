use tsscan_common::types::Encoding;

use super::{put_unsigned_varint, DeltaEncoder, RleEncoder};

/// Writes floats and doubles as scaled integers over RLE or TS_2DIFF.
#[derive(Debug, Clone, Copy)]
pub struct FixedPointEncoder {
    encoding: Encoding,
    max_point: u32,
}

impl FixedPointEncoder {
    /// Creates an encoder; any encoding other than RLE writes TS_2DIFF.
    #[must_use]
    pub fn new(encoding: Encoding, max_point: u32) -> Self {
        Self {
            encoding,
            max_point,
        }
    }

    fn scale(&self) -> f64 {
        10f64.powi(self.max_point as i32)
    }

    /// Encodes floats, rounding each to `max_point` decimals.
    #[must_use]
    pub fn encode_f32(&self, values: &[f32]) -> Vec<u8> {
        let scale = self.scale();
        let ints: Vec<i32> = values
            .iter()
            .map(|v| (f64::from(*v) * scale).round() as i32)
            .collect();
        let mut out = Vec::new();
        put_unsigned_varint(&mut out, u64::from(self.max_point));
        out.extend(match self.encoding {
            Encoding::Rle => RleEncoder::default().encode_i32(&ints),
            _ => DeltaEncoder::default().encode_i32(&ints),
        });
        out
    }

    /// Encodes doubles, rounding each to `max_point` decimals.
    #[must_use]
    pub fn encode_f64(&self, values: &[f64]) -> Vec<u8> {
        let scale = self.scale();
        let longs: Vec<i64> = values.iter().map(|v| (v * scale).round() as i64).collect();
        let mut out = Vec::new();
        put_unsigned_varint(&mut out, u64::from(self.max_point));
        out.extend(match self.encoding {
            Encoding::Rle => RleEncoder::default().encode_i64(&longs),
            _ => DeltaEncoder::default().encode_i64(&longs),
        });
        out
    }
}
