//! Scan results.

use bytes::Bytes;

use tsscan_common::error::{ReadError, ReadResult};
use tsscan_common::types::{DataType, Value};

/// Values of one column, stored in a vector of their native type.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnValues {
    /// Boolean values.
    Boolean(Vec<bool>),
    /// 32-bit integers.
    Int32(Vec<i32>),
    /// 64-bit integers.
    Int64(Vec<i64>),
    /// 32-bit floats.
    Float(Vec<f32>),
    /// 64-bit floats.
    Double(Vec<f64>),
    /// Byte arrays and resolved enum strings.
    Binary(Vec<Bytes>),
}

impl ColumnValues {
    fn for_type(data_type: DataType) -> Self {
        match data_type.resolved() {
            DataType::Boolean => Self::Boolean(Vec::new()),
            DataType::Int32 => Self::Int32(Vec::new()),
            DataType::Int64 => Self::Int64(Vec::new()),
            DataType::Float => Self::Float(Vec::new()),
            DataType::Double => Self::Double(Vec::new()),
            DataType::Text | DataType::Enums => Self::Binary(Vec::new()),
        }
    }

    /// Returns the number of values.
    pub fn len(&self) -> usize {
        match self {
            Self::Boolean(v) => v.len(),
            Self::Int32(v) => v.len(),
            Self::Int64(v) => v.len(),
            Self::Float(v) => v.len(),
            Self::Double(v) => v.len(),
            Self::Binary(v) => v.len(),
        }
    }

    /// Returns true if there are no values.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the value at `index`.
    pub fn get(&self, index: usize) -> Option<Value> {
        match self {
            Self::Boolean(v) => v.get(index).map(|x| Value::Boolean(*x)),
            Self::Int32(v) => v.get(index).map(|x| Value::Int32(*x)),
            Self::Int64(v) => v.get(index).map(|x| Value::Int64(*x)),
            Self::Float(v) => v.get(index).map(|x| Value::Float(*x)),
            Self::Double(v) => v.get(index).map(|x| Value::Double(*x)),
            Self::Binary(v) => v.get(index).map(|x| Value::Binary(x.clone())),
        }
    }

    fn truncate(&mut self, len: usize) {
        match self {
            Self::Boolean(v) => v.truncate(len),
            Self::Int32(v) => v.truncate(len),
            Self::Int64(v) => v.truncate(len),
            Self::Float(v) => v.truncate(len),
            Self::Double(v) => v.truncate(len),
            Self::Binary(v) => v.truncate(len),
        }
    }
}

/// Append-only `(timestamp, value)` pairs produced by scans and lookups.
///
/// Timestamps and values live in parallel vectors. Enum columns surface
/// as `Text`, holding the resolved dictionary strings.
///
/// # Example
///
/// ```rust
/// use tsscan_common::{DataType, Value};
/// use tsscan_reader::ColumnData;
///
/// let mut data = ColumnData::new(DataType::Int32);
/// data.push(1, Value::Int32(10)).unwrap();
/// data.push(2, Value::Int32(20)).unwrap();
/// assert_eq!(data.len(), 2);
/// assert_eq!(data.int32_values(), Some(&[10, 20][..]));
/// assert!(data.push(3, Value::Int64(30)).is_err());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnData {
    data_type: DataType,
    times: Vec<i64>,
    values: ColumnValues,
}

impl ColumnData {
    /// Creates an empty container for a column of `data_type`.
    pub fn new(data_type: DataType) -> Self {
        Self {
            data_type: data_type.resolved(),
            times: Vec::new(),
            values: ColumnValues::for_type(data_type),
        }
    }

    /// Returns the type of the stored values.
    pub fn data_type(&self) -> DataType {
        self.data_type
    }

    /// Returns the number of complete pairs.
    pub fn len(&self) -> usize {
        self.times.len().min(self.values.len())
    }

    /// Returns true if no pair is stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Appends a timestamp. Pair it with exactly one `put_*` value call.
    pub fn put_time(&mut self, time: i64) {
        self.times.push(time);
    }

    fn mismatch(&self, got: DataType) -> ReadError {
        ReadError::invalid_argument(format!(
            "cannot store {got} in a {} column",
            self.data_type
        ))
    }

    /// Appends a boolean value.
    pub fn put_boolean(&mut self, v: bool) -> ReadResult<()> {
        match &mut self.values {
            ColumnValues::Boolean(values) => values.push(v),
            _ => return Err(self.mismatch(DataType::Boolean)),
        }
        Ok(())
    }

    /// Appends a 32-bit integer.
    pub fn put_i32(&mut self, v: i32) -> ReadResult<()> {
        match &mut self.values {
            ColumnValues::Int32(values) => values.push(v),
            _ => return Err(self.mismatch(DataType::Int32)),
        }
        Ok(())
    }

    /// Appends a 64-bit integer.
    pub fn put_i64(&mut self, v: i64) -> ReadResult<()> {
        match &mut self.values {
            ColumnValues::Int64(values) => values.push(v),
            _ => return Err(self.mismatch(DataType::Int64)),
        }
        Ok(())
    }

    /// Appends a float.
    pub fn put_f32(&mut self, v: f32) -> ReadResult<()> {
        match &mut self.values {
            ColumnValues::Float(values) => values.push(v),
            _ => return Err(self.mismatch(DataType::Float)),
        }
        Ok(())
    }

    /// Appends a double.
    pub fn put_f64(&mut self, v: f64) -> ReadResult<()> {
        match &mut self.values {
            ColumnValues::Double(values) => values.push(v),
            _ => return Err(self.mismatch(DataType::Double)),
        }
        Ok(())
    }

    /// Appends a byte array.
    pub fn put_binary(&mut self, v: Bytes) -> ReadResult<()> {
        match &mut self.values {
            ColumnValues::Binary(values) => values.push(v),
            _ => return Err(self.mismatch(DataType::Text)),
        }
        Ok(())
    }

    /// Appends a value of the column's type.
    pub fn put_value(&mut self, value: Value) -> ReadResult<()> {
        match value {
            Value::Boolean(v) => self.put_boolean(v),
            Value::Int32(v) => self.put_i32(v),
            Value::Int64(v) => self.put_i64(v),
            Value::Float(v) => self.put_f32(v),
            Value::Double(v) => self.put_f64(v),
            Value::Binary(v) => self.put_binary(v),
        }
    }

    /// Appends a pair. On a type mismatch nothing is appended.
    pub fn push(&mut self, time: i64, value: Value) -> ReadResult<()> {
        self.put_value(value)?;
        self.put_time(time);
        Ok(())
    }

    /// Appends every pair of `other`.
    pub fn extend_from(&mut self, other: &ColumnData) -> ReadResult<()> {
        if other.data_type != self.data_type {
            return Err(self.mismatch(other.data_type));
        }
        for (time, value) in other.iter() {
            self.push(time, value)?;
        }
        Ok(())
    }

    /// Removes every pair.
    pub fn clear(&mut self) {
        self.times.clear();
        self.values.truncate(0);
    }

    /// Returns the timestamps.
    pub fn times(&self) -> &[i64] {
        &self.times
    }

    /// Returns the values.
    pub fn values(&self) -> &ColumnValues {
        &self.values
    }

    /// Returns the pair at `index`.
    pub fn get(&self, index: usize) -> Option<(i64, Value)> {
        Some((*self.times.get(index)?, self.values.get(index)?))
    }

    /// Iterates over the pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (i64, Value)> + '_ {
        (0..self.len()).filter_map(move |i| self.get(i))
    }

    /// Returns boolean values, if this is a boolean column.
    pub fn boolean_values(&self) -> Option<&[bool]> {
        match &self.values {
            ColumnValues::Boolean(v) => Some(v),
            _ => None,
        }
    }

    /// Returns 32-bit integer values, if this is an `Int32` column.
    pub fn int32_values(&self) -> Option<&[i32]> {
        match &self.values {
            ColumnValues::Int32(v) => Some(v),
            _ => None,
        }
    }

    /// Returns 64-bit integer values, if this is an `Int64` column.
    pub fn int64_values(&self) -> Option<&[i64]> {
        match &self.values {
            ColumnValues::Int64(v) => Some(v),
            _ => None,
        }
    }

    /// Returns float values, if this is a `Float` column.
    pub fn float_values(&self) -> Option<&[f32]> {
        match &self.values {
            ColumnValues::Float(v) => Some(v),
            _ => None,
        }
    }

    /// Returns double values, if this is a `Double` column.
    pub fn double_values(&self) -> Option<&[f64]> {
        match &self.values {
            ColumnValues::Double(v) => Some(v),
            _ => None,
        }
    }

    /// Returns binary values, if this is a `Text` or enum column.
    pub fn binary_values(&self) -> Option<&[Bytes]> {
        match &self.values {
            ColumnValues::Binary(v) => Some(v),
            _ => None,
        }
    }
}
