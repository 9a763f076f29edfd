//! Fixed-point float decoding.
//!
//! Floats and doubles under RLE or TS_2DIFF are stored as scaled integers:
//!
//! ```text
//! [uvarint max_point_number][i32 (float) or i64 (double) integer stream]
//! ```
//!
//! Each value is `integer / 10^max_point_number`. An empty channel carries
//! no scale and no values.

use bytes::{Buf, Bytes};
use tracing::trace;

use tsscan_common::constants::MAX_POINT_NUMBER;
use tsscan_common::error::{ReadError, ReadResult};
use tsscan_common::types::{DataType, Encoding};

use crate::decoder::{IntChannel, ValueDecoder};
use crate::varint::read_unsigned_varint;

/// Float and double decoder over a scaled integer stream.
#[derive(Debug)]
pub struct FixedPointDecoder {
    encoding: Encoding,
    data_type: DataType,
    max_point: u32,
    divisor: f64,
    channel: IntChannel,
}

impl FixedPointDecoder {
    /// Reads the scale prefix and opens the integer stream behind it.
    ///
    /// # Errors
    ///
    /// Returns `UnsupportedType` unless the pair is RLE or TS_2DIFF with
    /// float or double, `Truncated` for a cut-off scale, and `InvalidBlock`
    /// for a scale above 18.
    pub fn new(encoding: Encoding, data_type: DataType, mut body: Bytes) -> ReadResult<Self> {
        let max_point = if body.has_remaining() {
            let raw = read_unsigned_varint(&mut body)?;
            u32::try_from(raw)
                .ok()
                .filter(|p| *p <= MAX_POINT_NUMBER)
                .ok_or_else(|| {
                    ReadError::invalid_block(
                        "fixed-point",
                        format!("max point number {raw} exceeds {MAX_POINT_NUMBER}"),
                    )
                })?
        } else {
            0
        };

        let channel = match data_type {
            DataType::Float => IntChannel::open_i32(encoding, body),
            DataType::Double => IntChannel::open_i64(encoding, body),
            _ => None,
        }
        .ok_or(ReadError::unsupported(encoding, data_type))?;

        trace!(%encoding, %data_type, max_point, "opened fixed-point channel");
        Ok(Self {
            encoding,
            data_type,
            max_point,
            divisor: 10f64.powi(max_point as i32),
            channel,
        })
    }

    /// Returns the decimal scale of the stream.
    pub fn max_point(&self) -> u32 {
        self.max_point
    }
}

impl ValueDecoder for FixedPointDecoder {
    fn encoding(&self) -> Encoding {
        self.encoding
    }

    fn data_type(&self) -> DataType {
        self.data_type
    }

    fn has_next(&self) -> bool {
        self.channel.has_next()
    }

    fn read_f32(&mut self) -> ReadResult<f32> {
        match self.channel.read_i32() {
            Some(v) => Ok((f64::from(v?) / self.divisor) as f32),
            None => Err(ReadError::unsupported(self.encoding, DataType::Float)),
        }
    }

    fn read_f64(&mut self) -> ReadResult<f64> {
        match self.channel.read_i64() {
            Some(v) => Ok(v? as f64 / self.divisor),
            None => Err(ReadError::unsupported(self.encoding, DataType::Double)),
        }
    }
}
