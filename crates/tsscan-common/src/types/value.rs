//! Typed values.

use std::cmp::Ordering;
use std::fmt;

use bytes::Bytes;

use super::DataType;

/// A single decoded value.
///
/// Values of different variants never compare; `partial_cmp` returns
/// `None` for them, as it does for NaN floats.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Boolean value.
    Boolean(bool),
    /// 32-bit integer.
    Int32(i32),
    /// 64-bit integer.
    Int64(i64),
    /// 32-bit float.
    Float(f32),
    /// 64-bit float.
    Double(f64),
    /// Byte array, also used for resolved enum strings.
    Binary(Bytes),
}

impl Value {
    /// Creates a binary value from a string.
    #[must_use]
    pub fn text(s: &str) -> Self {
        Self::Binary(Bytes::copy_from_slice(s.as_bytes()))
    }

    /// Returns the data type this value surfaces as.
    #[must_use]
    pub const fn data_type(&self) -> DataType {
        match self {
            Self::Boolean(_) => DataType::Boolean,
            Self::Int32(_) => DataType::Int32,
            Self::Int64(_) => DataType::Int64,
            Self::Float(_) => DataType::Float,
            Self::Double(_) => DataType::Double,
            Self::Binary(_) => DataType::Text,
        }
    }

    /// Decodes a big-endian digest value stored for a column of `data_type`.
    ///
    /// Returns `None` when the byte length does not match the type, which
    /// callers treat as an inconclusive digest. Enum digests decode to the
    /// raw `Int32` code.
    #[must_use]
    pub fn from_be_bytes(data_type: DataType, raw: &[u8]) -> Option<Self> {
        if let Some(width) = data_type.digest_width() {
            if raw.len() != width {
                return None;
            }
        }
        let value = match data_type {
            DataType::Boolean => Self::Boolean(raw[0] != 0),
            DataType::Int32 | DataType::Enums => Self::Int32(i32::from_be_bytes(raw.try_into().ok()?)),
            DataType::Int64 => Self::Int64(i64::from_be_bytes(raw.try_into().ok()?)),
            DataType::Float => Self::Float(f32::from_be_bytes(raw.try_into().ok()?)),
            DataType::Double => Self::Double(f64::from_be_bytes(raw.try_into().ok()?)),
            DataType::Text => Self::Binary(Bytes::copy_from_slice(raw)),
        };
        Some(value)
    }

    /// Encodes the value in the big-endian digest layout.
    #[must_use]
    pub fn to_be_bytes(&self) -> Vec<u8> {
        match self {
            Self::Boolean(v) => vec![u8::from(*v)],
            Self::Int32(v) => v.to_be_bytes().to_vec(),
            Self::Int64(v) => v.to_be_bytes().to_vec(),
            Self::Float(v) => v.to_be_bytes().to_vec(),
            Self::Double(v) => v.to_be_bytes().to_vec(),
            Self::Binary(v) => v.to_vec(),
        }
    }

    /// Returns the value as an `i64` if it is an integer.
    #[must_use]
    pub const fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int32(v) => Some(*v as i64),
            Self::Int64(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the bytes of a binary value.
    #[must_use]
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Self::Binary(v) => Some(v),
            _ => None,
        }
    }
}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Self::Boolean(a), Self::Boolean(b)) => a.partial_cmp(b),
            (Self::Int32(a), Self::Int32(b)) => a.partial_cmp(b),
            (Self::Int64(a), Self::Int64(b)) => a.partial_cmp(b),
            (Self::Float(a), Self::Float(b)) => a.partial_cmp(b),
            (Self::Double(a), Self::Double(b)) => a.partial_cmp(b),
            (Self::Binary(a), Self::Binary(b)) => a.partial_cmp(b),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Boolean(v) => write!(f, "{v}"),
            Self::Int32(v) => write!(f, "{v}"),
            Self::Int64(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Double(v) => write!(f, "{v}"),
            Self::Binary(v) => write!(f, "{}", String::from_utf8_lossy(v)),
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Boolean(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Self::Int32(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Int64(v)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Self::Float(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Double(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::text(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digest_bytes() {
        let raw = 25_i32.to_be_bytes();
        assert_eq!(
            Value::from_be_bytes(DataType::Int32, &raw),
            Some(Value::Int32(25))
        );
        assert_eq!(
            Value::from_be_bytes(DataType::Enums, &raw),
            Some(Value::Int32(25))
        );

        let v = Value::Double(-1.5);
        assert_eq!(Value::from_be_bytes(DataType::Double, &v.to_be_bytes()), Some(v));

        assert_eq!(
            Value::from_be_bytes(DataType::Text, b"abc"),
            Some(Value::text("abc"))
        );
    }

    #[test]
    fn test_digest_width_mismatch() {
        assert_eq!(Value::from_be_bytes(DataType::Int64, &[0, 1, 2]), None);
        assert_eq!(Value::from_be_bytes(DataType::Boolean, &[]), None);
    }

    #[test]
    fn test_ordering() {
        assert!(Value::Int32(1) < Value::Int32(2));
        assert!(Value::text("abc") < Value::text("abd"));
        assert_eq!(Value::Int32(1).partial_cmp(&Value::Int64(1)), None);
        assert_eq!(Value::Double(f64::NAN).partial_cmp(&Value::Double(0.0)), None);
    }

    #[test]
    fn test_data_type() {
        assert_eq!(Value::text("x").data_type(), DataType::Text);
        assert_eq!(Value::from(3_i64).data_type(), DataType::Int64);
        assert_eq!(Value::Int32(-4).as_i64(), Some(-4));
        assert_eq!(Value::Boolean(true).as_i64(), None);
    }
}
