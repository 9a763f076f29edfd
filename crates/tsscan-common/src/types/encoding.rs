//! Page value encodings.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Codec used for the value channel of a page.
///
/// The time channel is always TS_2DIFF; this tag only selects how values
/// are laid out. Not every encoding has a reader for every data type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[repr(u8)]
pub enum Encoding {
    /// Values stored back to back at their natural width.
    Plain = 0,
    /// Dictionary page encoding (not readable by this crate).
    PlainDictionary = 1,
    /// Hybrid run-length / bit-packed integers.
    Rle = 2,
    /// First-order delta (not readable by this crate).
    Diff = 3,
    /// Second-order delta with bit-packed residuals.
    Ts2Diff = 4,
    /// Bitmap encoding (not readable by this crate).
    Bitmap = 5,
    /// XOR float encoding (not readable by this crate).
    Gorilla = 6,
}

impl Encoding {
    /// Creates an `Encoding` from its wire tag.
    #[inline]
    #[must_use]
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Plain),
            1 => Some(Self::PlainDictionary),
            2 => Some(Self::Rle),
            3 => Some(Self::Diff),
            4 => Some(Self::Ts2Diff),
            5 => Some(Self::Bitmap),
            6 => Some(Self::Gorilla),
            _ => None,
        }
    }

    /// Returns the wire tag.
    #[inline]
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    /// Returns true if values are stored in bit-packed groups of eight.
    #[inline]
    #[must_use]
    pub const fn is_bit_packed(self) -> bool {
        matches!(self, Self::Rle | Self::Ts2Diff)
    }

    /// Returns the canonical upper-case name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Plain => "PLAIN",
            Self::PlainDictionary => "PLAIN_DICTIONARY",
            Self::Rle => "RLE",
            Self::Diff => "DIFF",
            Self::Ts2Diff => "TS_2DIFF",
            Self::Bitmap => "BITMAP",
            Self::Gorilla => "GORILLA",
        }
    }
}

impl Default for Encoding {
    fn default() -> Self {
        Self::Plain
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_roundtrip() {
        for tag in 0..=6u8 {
            assert_eq!(Encoding::from_u8(tag).unwrap().as_u8(), tag);
        }
        assert!(Encoding::from_u8(42).is_none());
    }

    #[test]
    fn test_bit_packed() {
        assert!(Encoding::Rle.is_bit_packed());
        assert!(Encoding::Ts2Diff.is_bit_packed());
        assert!(!Encoding::Plain.is_bit_packed());
        assert_eq!(Encoding::default(), Encoding::Plain);
    }

    #[test]
    fn test_display() {
        assert_eq!(Encoding::Ts2Diff.to_string(), "TS_2DIFF");
        assert_eq!(Encoding::PlainDictionary.to_string(), "PLAIN_DICTIONARY");
    }
}
