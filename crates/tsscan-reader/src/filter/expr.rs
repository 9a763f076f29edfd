//! Comparison filter expressions.

use std::cmp::Ordering;
use std::fmt;

use tsscan_common::types::Value;

use super::{DigestForFilter, SeriesFilter};

/// A composable comparison filter.
///
/// Comparisons between values of different types, or involving NaN, are
/// never satisfied by a concrete value but never prune a digest either.
///
/// # Example
///
/// ```rust
/// use tsscan_common::Value;
/// use tsscan_reader::{DigestForFilter, FilterExpr, SeriesFilter};
///
/// let filter = FilterExpr::gt(25).and(FilterExpr::lt(45));
/// assert!(filter.satisfy(&Value::Int32(30)));
/// assert!(!filter.satisfy(&Value::Int32(50)));
///
/// let digest = DigestForFilter::new(Value::Int32(50), Value::Int32(90));
/// assert!(!filter.satisfy_digest(&digest));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum FilterExpr {
    /// `value == v`
    Eq(Value),
    /// `value != v`
    NotEq(Value),
    /// `value < v`
    Lt(Value),
    /// `value <= v`
    LtEq(Value),
    /// `value > v`
    Gt(Value),
    /// `value >= v`
    GtEq(Value),
    /// Every child holds.
    And(Vec<FilterExpr>),
    /// At least one child holds.
    Or(Vec<FilterExpr>),
}

impl FilterExpr {
    /// `value == v`
    pub fn eq(v: impl Into<Value>) -> Self {
        Self::Eq(v.into())
    }

    /// `value != v`
    pub fn not_eq(v: impl Into<Value>) -> Self {
        Self::NotEq(v.into())
    }

    /// `value < v`
    pub fn lt(v: impl Into<Value>) -> Self {
        Self::Lt(v.into())
    }

    /// `value <= v`
    pub fn lt_eq(v: impl Into<Value>) -> Self {
        Self::LtEq(v.into())
    }

    /// `value > v`
    pub fn gt(v: impl Into<Value>) -> Self {
        Self::Gt(v.into())
    }

    /// `value >= v`
    pub fn gt_eq(v: impl Into<Value>) -> Self {
        Self::GtEq(v.into())
    }

    /// Timestamps in `[start, end]`.
    pub fn time_between(start: i64, end: i64) -> Self {
        Self::And(vec![Self::GtEq(Value::Int64(start)), Self::LtEq(Value::Int64(end))])
    }

    /// Conjunction with `other`.
    #[must_use]
    pub fn and(self, other: FilterExpr) -> Self {
        match self {
            Self::And(mut children) => {
                children.push(other);
                Self::And(children)
            }
            this => Self::And(vec![this, other]),
        }
    }

    /// Disjunction with `other`.
    #[must_use]
    pub fn or(self, other: FilterExpr) -> Self {
        match self {
            Self::Or(mut children) => {
                children.push(other);
                Self::Or(children)
            }
            this => Self::Or(vec![this, other]),
        }
    }
}

/// `Some(true)` / `Some(false)` for a decided comparison, `None` when the
/// operands do not compare.
fn holds(lhs: &Value, rhs: &Value, test: fn(Ordering) -> bool) -> Option<bool> {
    lhs.partial_cmp(rhs).map(test)
}

impl SeriesFilter for FilterExpr {
    fn satisfy_digest(&self, digest: &DigestForFilter) -> bool {
        let (min, max) = (digest.min(), digest.max());
        match self {
            Self::Eq(v) => {
                holds(min, v, Ordering::is_le).unwrap_or(true)
                    && holds(max, v, Ordering::is_ge).unwrap_or(true)
            }
            Self::NotEq(v) => !(holds(min, v, Ordering::is_eq).unwrap_or(false)
                && holds(max, v, Ordering::is_eq).unwrap_or(false)),
            Self::Lt(v) => holds(min, v, Ordering::is_lt).unwrap_or(true),
            Self::LtEq(v) => holds(min, v, Ordering::is_le).unwrap_or(true),
            Self::Gt(v) => holds(max, v, Ordering::is_gt).unwrap_or(true),
            Self::GtEq(v) => holds(max, v, Ordering::is_ge).unwrap_or(true),
            Self::And(children) => children.iter().all(|c| c.satisfy_digest(digest)),
            Self::Or(children) => children.iter().any(|c| c.satisfy_digest(digest)),
        }
    }

    fn satisfy(&self, value: &Value) -> bool {
        match self {
            Self::Eq(v) => holds(value, v, Ordering::is_eq).unwrap_or(false),
            Self::NotEq(v) => holds(value, v, Ordering::is_ne).unwrap_or(false),
            Self::Lt(v) => holds(value, v, Ordering::is_lt).unwrap_or(false),
            Self::LtEq(v) => holds(value, v, Ordering::is_le).unwrap_or(false),
            Self::Gt(v) => holds(value, v, Ordering::is_gt).unwrap_or(false),
            Self::GtEq(v) => holds(value, v, Ordering::is_ge).unwrap_or(false),
            Self::And(children) => children.iter().all(|c| c.satisfy(value)),
            Self::Or(children) => children.iter().any(|c| c.satisfy(value)),
        }
    }
}

fn write_joined(f: &mut fmt::Formatter<'_>, children: &[FilterExpr], op: &str) -> fmt::Result {
    write!(f, "(")?;
    for (i, child) in children.iter().enumerate() {
        if i > 0 {
            write!(f, " {op} ")?;
        }
        write!(f, "{child}")?;
    }
    write!(f, ")")
}

impl fmt::Display for FilterExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Eq(v) => write!(f, "value = {v}"),
            Self::NotEq(v) => write!(f, "value != {v}"),
            Self::Lt(v) => write!(f, "value < {v}"),
            Self::LtEq(v) => write!(f, "value <= {v}"),
            Self::Gt(v) => write!(f, "value > {v}"),
            Self::GtEq(v) => write!(f, "value >= {v}"),
            Self::And(children) => write_joined(f, children, "AND"),
            Self::Or(children) => write_joined(f, children, "OR"),
        }
    }
}
