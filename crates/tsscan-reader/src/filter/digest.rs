//! Typed digests built for filter evaluation.

use tracing::warn;

use tsscan_common::types::{DataType, Value};
use tsscan_storage::page::Digest;

use crate::column::EnumDictionary;

/// Typed `[min, max]` bounds handed to [`SeriesFilter::satisfy_digest`].
///
/// [`SeriesFilter::satisfy_digest`]: super::SeriesFilter::satisfy_digest
#[derive(Debug, Clone, PartialEq)]
pub struct DigestForFilter {
    min: Value,
    max: Value,
}

impl DigestForFilter {
    /// Creates a digest from typed bounds.
    pub fn new(min: Value, max: Value) -> Self {
        Self { min, max }
    }

    /// Creates a digest over a page's time range.
    pub fn from_time_range(min_timestamp: i64, max_timestamp: i64) -> Self {
        Self::new(Value::Int64(min_timestamp), Value::Int64(max_timestamp))
    }

    /// Decodes a stored digest for a column of `data_type`.
    ///
    /// Returns `None` when the digest is inconclusive: a byte length that
    /// does not match the type, or an enum digest that cannot be resolved.
    /// Enum codes `[lo, hi]` resolve to the smallest and largest dictionary
    /// string among codes `lo..=hi`, so the string range covers every value
    /// the page may hold.
    pub fn from_digest(
        digest: &Digest,
        data_type: DataType,
        dictionary: Option<&EnumDictionary>,
    ) -> Option<Self> {
        let min = Value::from_be_bytes(data_type, &digest.min)?;
        let max = Value::from_be_bytes(data_type, &digest.max)?;

        if data_type != DataType::Enums {
            return Some(Self::new(min, max));
        }

        let (Value::Int32(lo), Value::Int32(hi)) = (min, max) else {
            return None;
        };
        let Some(dictionary) = dictionary else {
            warn!(lo, hi, "enum digest without dictionary, not pruning");
            return None;
        };
        match dictionary.range_bounds(lo, hi) {
            Some((min, max)) => Some(Self::new(Value::text(min), Value::text(max))),
            None => {
                warn!(
                    lo,
                    hi,
                    size = dictionary.len(),
                    "enum digest codes outside dictionary, not pruning"
                );
                None
            }
        }
    }

    /// Returns the lower bound.
    pub fn min(&self) -> &Value {
        &self.min
    }

    /// Returns the upper bound.
    pub fn max(&self) -> &Value {
        &self.max
    }
}
