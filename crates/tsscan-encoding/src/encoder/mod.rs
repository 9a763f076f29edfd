//! Fixture encoders.
//!
//! Each encoder writes the exact layout its decoder reads. They exist so
//! tests and benchmarks can build pages; they favour simplicity over
//! compression ratio and are not a supported write path.

mod delta;
mod float;
mod plain;
mod rle;

use bytes::BufMut;

use tsscan_common::error::{ReadError, ReadResult};
use tsscan_common::types::{DataType, Encoding, Value};

pub use delta::DeltaEncoder;
pub use float::FixedPointEncoder;
pub use plain::PlainEncoder;
pub use rle::RleEncoder;

/// Decimal scale [`encode_values`] uses for float and double columns.
pub const FIXTURE_MAX_POINT: u32 = 2;

/// Writes `value` as an unsigned LEB128 varint.
pub fn put_unsigned_varint(buf: &mut impl BufMut, mut value: u64) {
    while value >= 0x80 {
        buf.put_u8((value as u8 & 0x7F) | 0x80);
        value >>= 7;
    }
    buf.put_u8(value as u8);
}

/// Encodes a value channel for any supported `(encoding, data_type)` pair.
///
/// Floats and doubles under RLE or TS_2DIFF are written fixed-point with
/// [`FIXTURE_MAX_POINT`] decimals.
///
/// # Errors
///
/// Returns `UnsupportedType` for pairs without a decoder and
/// `InvalidArgument` when a value does not match `data_type`.
pub fn encode_values(encoding: Encoding, data_type: DataType, values: &[Value]) -> ReadResult<Vec<u8>> {
    if encoding == Encoding::Plain {
        let mut encoder = PlainEncoder::new();
        for value in values {
            check_type(data_type, value)?;
            encoder.put_value(value);
        }
        return Ok(encoder.finish());
    }

    if !matches!(encoding, Encoding::Rle | Encoding::Ts2Diff) {
        return Err(ReadError::unsupported(encoding, data_type));
    }
    for value in values {
        check_type(data_type, value)?;
    }

    let bytes = match data_type {
        DataType::Boolean if encoding == Encoding::Rle => {
            let bools: Vec<bool> = values.iter().map(|v| matches!(v, Value::Boolean(true))).collect();
            RleEncoder::default().encode_bool(&bools)
        }
        DataType::Int32 | DataType::Enums => {
            let ints: Vec<i32> = values
                .iter()
                .filter_map(|v| match v {
                    Value::Int32(i) => Some(*i),
                    _ => None,
                })
                .collect();
            if encoding == Encoding::Rle {
                RleEncoder::default().encode_i32(&ints)
            } else {
                DeltaEncoder::default().encode_i32(&ints)
            }
        }
        DataType::Int64 => {
            let longs: Vec<i64> = values.iter().filter_map(Value::as_i64).collect();
            if encoding == Encoding::Rle {
                RleEncoder::default().encode_i64(&longs)
            } else {
                DeltaEncoder::default().encode_i64(&longs)
            }
        }
        DataType::Float => {
            let floats: Vec<f32> = values
                .iter()
                .filter_map(|v| match v {
                    Value::Float(f) => Some(*f),
                    _ => None,
                })
                .collect();
            FixedPointEncoder::new(encoding, FIXTURE_MAX_POINT).encode_f32(&floats)
        }
        DataType::Double => {
            let doubles: Vec<f64> = values
                .iter()
                .filter_map(|v| match v {
                    Value::Double(f) => Some(*f),
                    _ => None,
                })
                .collect();
            FixedPointEncoder::new(encoding, FIXTURE_MAX_POINT).encode_f64(&doubles)
        }
        _ => return Err(ReadError::unsupported(encoding, data_type)),
    };
    Ok(bytes)
}

fn check_type(data_type: DataType, value: &Value) -> ReadResult<()> {
    let expected = match data_type {
        DataType::Enums => DataType::Int32,
        other => other,
    };
    if value.data_type() != expected {
        return Err(ReadError::invalid_argument(format!(
            "value {value} does not match column type {data_type}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_put_unsigned_varint() {
        let mut out = Vec::new();
        put_unsigned_varint(&mut out, 300);
        assert_eq!(out, vec![0xAC, 0x02]);
    }

    #[test]
    fn test_encode_values_rejects_mismatch() {
        let err = encode_values(Encoding::Plain, DataType::Int64, &[Value::Int32(1)]).unwrap_err();
        assert!(matches!(err, ReadError::InvalidArgument { .. }));

        let err = encode_values(Encoding::Gorilla, DataType::Double, &[]).unwrap_err();
        assert!(matches!(err, ReadError::UnsupportedType { .. }));

        let err = encode_values(Encoding::Ts2Diff, DataType::Boolean, &[]).unwrap_err();
        assert!(matches!(err, ReadError::UnsupportedType { .. }));
    }
}
