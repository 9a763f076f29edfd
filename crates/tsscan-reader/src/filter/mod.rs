//! Predicates over values and their digests.
//!
//! A [`SeriesFilter`] answers two questions: can any value inside a
//! `[min, max]` digest satisfy it, and does one concrete value satisfy it.
//! The first drives pruning and must never answer `false` for a range that
//! holds a matching value.

mod digest;
mod expr;

use std::fmt;

use tsscan_common::types::Value;

pub use digest::DigestForFilter;
pub use expr::FilterExpr;

/// A predicate on values or timestamps.
///
/// Time filters receive timestamps as `Value::Int64`.
pub trait SeriesFilter: fmt::Debug + Send + Sync {
    /// Returns false only if no value in the digest's range can satisfy
    /// the filter.
    fn satisfy_digest(&self, digest: &DigestForFilter) -> bool;

    /// Returns true if `value` satisfies the filter.
    fn satisfy(&self, value: &Value) -> bool;
}
