//! Column data types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Physical type of the values stored in a column.
///
/// Enum columns store 1-based `i32` codes that resolve through the column's
/// dictionary; every other type stores its values directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[repr(u8)]
pub enum DataType {
    /// Boolean values.
    Boolean = 0,
    /// 32-bit signed integers.
    Int32 = 1,
    /// 64-bit signed integers.
    Int64 = 2,
    /// 32-bit IEEE floats.
    Float = 3,
    /// 64-bit IEEE floats.
    Double = 4,
    /// Variable-length byte arrays.
    Text = 5,
    /// Dictionary-coded strings.
    Enums = 6,
}

impl DataType {
    /// Creates a `DataType` from its wire tag.
    #[inline]
    #[must_use]
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Boolean),
            1 => Some(Self::Int32),
            2 => Some(Self::Int64),
            3 => Some(Self::Float),
            4 => Some(Self::Double),
            5 => Some(Self::Text),
            6 => Some(Self::Enums),
            _ => None,
        }
    }

    /// Returns the wire tag.
    #[inline]
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    /// Returns the width of a big-endian digest value, if fixed.
    ///
    /// Enum digests hold the `i32` code, not the resolved string.
    #[inline]
    #[must_use]
    pub const fn digest_width(self) -> Option<usize> {
        match self {
            Self::Boolean => Some(1),
            Self::Int32 | Self::Float | Self::Enums => Some(4),
            Self::Int64 | Self::Double => Some(8),
            Self::Text => None,
        }
    }

    /// Returns the type values surface as after decoding.
    ///
    /// Enum codes are resolved to their dictionary strings.
    #[inline]
    #[must_use]
    pub const fn resolved(self) -> Self {
        match self {
            Self::Enums => Self::Text,
            other => other,
        }
    }

    /// Returns true for integer and floating point types.
    #[inline]
    #[must_use]
    pub const fn is_numeric(self) -> bool {
        matches!(self, Self::Int32 | Self::Int64 | Self::Float | Self::Double)
    }

    /// Returns the canonical upper-case name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Boolean => "BOOLEAN",
            Self::Int32 => "INT32",
            Self::Int64 => "INT64",
            Self::Float => "FLOAT",
            Self::Double => "DOUBLE",
            Self::Text => "TEXT",
            Self::Enums => "ENUMS",
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
