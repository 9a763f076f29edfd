//! Plain value decoding.
//!
//! Fixed-width values are stored back to back in little-endian order.
//! Booleans take one byte, binaries are `[i32 LE length][bytes]`.

use bytes::{Buf, Bytes};

use tsscan_common::error::{ReadError, ReadResult};
use tsscan_common::types::{DataType, Encoding};

use crate::decoder::ValueDecoder;

/// Decoder for plain-encoded values of any data type.
#[derive(Debug)]
pub struct PlainDecoder {
    data_type: DataType,
    buf: Bytes,
}

impl PlainDecoder {
    /// Creates a decoder over a plain value channel.
    pub fn new(data_type: DataType, buf: Bytes) -> Self {
        Self { data_type, buf }
    }

    fn check(&self, requested: DataType, accepts: bool) -> ReadResult<()> {
        if accepts {
            Ok(())
        } else {
            Err(ReadError::unsupported(Encoding::Plain, requested))
        }
    }

    fn ensure(&self, what: &'static str, len: usize) -> ReadResult<()> {
        if self.buf.remaining() < len {
            return Err(ReadError::truncated(what, len, self.buf.remaining()));
        }
        Ok(())
    }
}

impl ValueDecoder for PlainDecoder {
    fn encoding(&self) -> Encoding {
        Encoding::Plain
    }

    fn data_type(&self) -> DataType {
        self.data_type
    }

    fn has_next(&self) -> bool {
        self.buf.has_remaining()
    }

    fn read_boolean(&mut self) -> ReadResult<bool> {
        self.check(DataType::Boolean, self.data_type == DataType::Boolean)?;
        self.ensure("plain boolean", 1)?;
        Ok(self.buf.get_u8() != 0)
    }

    fn read_i32(&mut self) -> ReadResult<i32> {
        self.check(
            DataType::Int32,
            matches!(self.data_type, DataType::Int32 | DataType::Enums),
        )?;
        self.ensure("plain int32", 4)?;
        Ok(self.buf.get_i32_le())
    }

    fn read_i64(&mut self) -> ReadResult<i64> {
        self.check(DataType::Int64, self.data_type == DataType::Int64)?;
        self.ensure("plain int64", 8)?;
        Ok(self.buf.get_i64_le())
    }

    fn read_f32(&mut self) -> ReadResult<f32> {
        self.check(DataType::Float, self.data_type == DataType::Float)?;
        self.ensure("plain float", 4)?;
        Ok(self.buf.get_f32_le())
    }

    fn read_f64(&mut self) -> ReadResult<f64> {
        self.check(DataType::Double, self.data_type == DataType::Double)?;
        self.ensure("plain double", 8)?;
        Ok(self.buf.get_f64_le())
    }

    fn read_binary(&mut self) -> ReadResult<Bytes> {
        self.check(DataType::Text, self.data_type == DataType::Text)?;
        self.ensure("plain binary length", 4)?;
        let len = self.buf.get_i32_le();
        let len = usize::try_from(len).map_err(|_| {
            ReadError::invalid_block("plain", format!("negative binary length {len}"))
        })?;
        self.ensure("plain binary", len)?;
        Ok(self.buf.split_to(len))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoder::PlainEncoder;

    #[test]
    fn test_little_endian_layout() {
        let mut decoder = PlainDecoder::new(DataType::Int32, Bytes::from_static(&[1, 0, 0, 0, 0xFF, 0xFF, 0xFF, 0xFF]));
        assert_eq!(decoder.read_i32().unwrap(), 1);
        assert_eq!(decoder.read_i32().unwrap(), -1);
        assert!(!decoder.has_next());
    }

    #[test]
    fn test_binary_values() {
        let mut encoder = PlainEncoder::new();
        encoder.put_binary(b"alpha");
        encoder.put_binary(b"");
        encoder.put_binary(b"gamma");

        let mut decoder = PlainDecoder::new(DataType::Text, Bytes::from(encoder.finish()));
        assert_eq!(decoder.read_binary().unwrap(), Bytes::from_static(b"alpha"));
        assert_eq!(decoder.read_binary().unwrap(), Bytes::new());
        assert_eq!(decoder.read_binary().unwrap(), Bytes::from_static(b"gamma"));
        assert!(!decoder.has_next());
    }

    #[test]
    fn test_negative_binary_length() {
        let mut decoder = PlainDecoder::new(DataType::Text, Bytes::from_static(&[0xFE, 0xFF, 0xFF, 0xFF]));
        assert!(decoder.read_binary().unwrap_err().is_corruption());
    }

    #[test]
    fn test_truncated_values() {
        let mut decoder = PlainDecoder::new(DataType::Double, Bytes::from_static(&[0, 0, 0]));
        assert!(decoder.has_next());
        assert!(decoder.read_f64().unwrap_err().is_truncation());

        let mut encoder = PlainEncoder::new();
        encoder.put_binary(b"abcdef");
        let mut raw = encoder.finish();
        raw.truncate(7);
        let mut decoder = PlainDecoder::new(DataType::Text, Bytes::from(raw));
        assert!(decoder.read_binary().unwrap_err().is_truncation());
    }

    #[test]
    fn test_type_mismatch() {
        let mut decoder = PlainDecoder::new(DataType::Float, Bytes::from_static(&[0; 8]));
        assert!(matches!(
            decoder.read_i64(),
            Err(ReadError::UnsupportedType { encoding: Encoding::Plain, data_type: DataType::Int64 })
        ));
        assert_eq!(decoder.read_f32().unwrap(), 0.0);
    }

    #[test]
    fn test_enum_codes() {
        let mut encoder = PlainEncoder::new();
        encoder.put_i32(3);
        let mut decoder = PlainDecoder::new(DataType::Enums, Bytes::from(encoder.finish()));
        assert_eq!(decoder.read_i32().unwrap(), 3);
    }
}
