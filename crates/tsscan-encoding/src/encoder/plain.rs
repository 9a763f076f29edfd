use bytes::BufMut;

use tsscan_common::types::Value;

/// Writes plain little-endian values.
#[derive(Debug, Default, Clone)]
pub struct PlainEncoder {
    buf: Vec<u8>,
}

impl PlainEncoder {
    /// Creates an empty encoder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a boolean.
    pub fn put_boolean(&mut self, v: bool) {
        self.buf.put_u8(u8::from(v));
    }

    /// Appends a 32-bit integer.
    pub fn put_i32(&mut self, v: i32) {
        self.buf.put_i32_le(v);
    }

    /// Appends a 64-bit integer.
    pub fn put_i64(&mut self, v: i64) {
        self.buf.put_i64_le(v);
    }

    /// Appends a float.
    pub fn put_f32(&mut self, v: f32) {
        self.buf.put_f32_le(v);
    }

    /// Appends a double.
    pub fn put_f64(&mut self, v: f64) {
        self.buf.put_f64_le(v);
    }

    /// Appends a length-prefixed byte array.
    pub fn put_binary(&mut self, v: &[u8]) {
        self.buf.put_i32_le(v.len() as i32);
        self.buf.put_slice(v);
    }

    /// Appends any value in its natural layout.
    pub fn put_value(&mut self, value: &Value) {
        match value {
            Value::Boolean(v) => self.put_boolean(*v),
            Value::Int32(v) => self.put_i32(*v),
            Value::Int64(v) => self.put_i64(*v),
            Value::Float(v) => self.put_f32(*v),
            Value::Double(v) => self.put_f64(*v),
            Value::Binary(v) => self.put_binary(v),
        }
    }

    /// Returns the encoded bytes.
    #[must_use]
    pub fn finish(self) -> Vec<u8> {
        self.buf
    }
}
