//! Value decoder trait and the `(Encoding, DataType)` registry.
//!
//! A page's value channel is decoded by exactly one [`ValueDecoder`],
//! created through [`DecoderRegistry::create`]. The registry is a lookup
//! table built once; a pair with no entry fails at construction with
//! `UnsupportedType`, before any value is read.

use std::collections::HashMap;
use std::fmt;
use std::sync::OnceLock;

use bytes::Bytes;
use tracing::trace;

use tsscan_common::error::{ReadError, ReadResult};
use tsscan_common::types::{DataType, Encoding, Value};

use crate::delta::{DeltaDecoder, DeltaInt};
use crate::float::FixedPointDecoder;
use crate::plain::PlainDecoder;
use crate::rle::{RleDecoder, RleInt};

// =============================================================================
// ValueDecoder
// =============================================================================

/// Streams typed values out of a page's value channel.
///
/// Only the reads matching the decoder's data type succeed; every other
/// read fails with `UnsupportedType` naming the requested type. Enum
/// columns are read with [`read_i32`](Self::read_i32).
pub trait ValueDecoder: Send + fmt::Debug {
    /// Returns the encoding this decoder reads.
    fn encoding(&self) -> Encoding;

    /// Returns the column data type this decoder was built for.
    fn data_type(&self) -> DataType;

    /// Returns true while values remain.
    fn has_next(&self) -> bool;

    /// Reads a boolean.
    fn read_boolean(&mut self) -> ReadResult<bool> {
        Err(ReadError::unsupported(self.encoding(), DataType::Boolean))
    }

    /// Reads a 32-bit integer or enum code.
    fn read_i32(&mut self) -> ReadResult<i32> {
        Err(ReadError::unsupported(self.encoding(), DataType::Int32))
    }

    /// Reads a 64-bit integer.
    fn read_i64(&mut self) -> ReadResult<i64> {
        Err(ReadError::unsupported(self.encoding(), DataType::Int64))
    }

    /// Reads a 32-bit float.
    fn read_f32(&mut self) -> ReadResult<f32> {
        Err(ReadError::unsupported(self.encoding(), DataType::Float))
    }

    /// Reads a 64-bit float.
    fn read_f64(&mut self) -> ReadResult<f64> {
        Err(ReadError::unsupported(self.encoding(), DataType::Double))
    }

    /// Reads a byte array.
    fn read_binary(&mut self) -> ReadResult<Bytes> {
        Err(ReadError::unsupported(self.encoding(), DataType::Text))
    }

    /// Reads the next value as a [`Value`] of the decoder's type.
    ///
    /// Enum codes come back as `Value::Int32`.
    fn read_value(&mut self) -> ReadResult<Value> {
        Ok(match self.data_type() {
            DataType::Boolean => Value::Boolean(self.read_boolean()?),
            DataType::Int32 | DataType::Enums => Value::Int32(self.read_i32()?),
            DataType::Int64 => Value::Int64(self.read_i64()?),
            DataType::Float => Value::Float(self.read_f32()?),
            DataType::Double => Value::Double(self.read_f64()?),
            DataType::Text => Value::Binary(self.read_binary()?),
        })
    }
}

// =============================================================================
// Integer channels
// =============================================================================

/// A stream of integers produced by one of the bit-packed codecs.
pub trait IntStream<T>: Send + fmt::Debug {
    /// Returns true while values remain.
    fn has_next(&self) -> bool;

    /// Returns the next value.
    fn read_next(&mut self) -> ReadResult<T>;
}

impl<T: DeltaInt> IntStream<T> for DeltaDecoder<T> {
    fn has_next(&self) -> bool {
        DeltaDecoder::has_next(self)
    }

    fn read_next(&mut self) -> ReadResult<T> {
        DeltaDecoder::read_next(self)
    }
}

impl<T: RleInt> IntStream<T> for RleDecoder<T> {
    fn has_next(&self) -> bool {
        RleDecoder::has_next(self)
    }

    fn read_next(&mut self) -> ReadResult<T> {
        RleDecoder::read_next(self)
    }
}

/// An integer stream of either width.
#[derive(Debug)]
pub(crate) enum IntChannel {
    I32(Box<dyn IntStream<i32>>),
    I64(Box<dyn IntStream<i64>>),
}

impl IntChannel {
    /// Opens a 32-bit channel for `encoding`.
    pub(crate) fn open_i32(encoding: Encoding, body: Bytes) -> Option<Self> {
        let stream: Box<dyn IntStream<i32>> = match encoding {
            Encoding::Rle => Box::new(RleDecoder::<i32>::new(body)),
            Encoding::Ts2Diff => Box::new(DeltaDecoder::<i32>::new(body)),
            _ => return None,
        };
        Some(Self::I32(stream))
    }

    /// Opens a 64-bit channel for `encoding`.
    pub(crate) fn open_i64(encoding: Encoding, body: Bytes) -> Option<Self> {
        let stream: Box<dyn IntStream<i64>> = match encoding {
            Encoding::Rle => Box::new(RleDecoder::<i64>::new(body)),
            Encoding::Ts2Diff => Box::new(DeltaDecoder::<i64>::new(body)),
            _ => return None,
        };
        Some(Self::I64(stream))
    }

    pub(crate) fn has_next(&self) -> bool {
        match self {
            Self::I32(s) => s.has_next(),
            Self::I64(s) => s.has_next(),
        }
    }

    pub(crate) fn read_i32(&mut self) -> Option<ReadResult<i32>> {
        match self {
            Self::I32(s) => Some(s.read_next()),
            Self::I64(_) => None,
        }
    }

    pub(crate) fn read_i64(&mut self) -> Option<ReadResult<i64>> {
        match self {
            Self::I64(s) => Some(s.read_next()),
            Self::I32(_) => None,
        }
    }
}

/// Boolean, integer and enum columns over RLE or TS_2DIFF.
#[derive(Debug)]
pub struct IntDecoder {
    encoding: Encoding,
    data_type: DataType,
    channel: IntChannel,
}

impl IntDecoder {
    /// Creates a decoder, or `UnsupportedType` for any other pair.
    ///
    /// # Errors
    ///
    /// Returns `UnsupportedType` unless the encoding is RLE or TS_2DIFF and
    /// the type is an integer, an enum, or (RLE only) a boolean.
    pub fn new(encoding: Encoding, data_type: DataType, body: Bytes) -> ReadResult<Self> {
        let channel = match (encoding, data_type) {
            (Encoding::Rle, DataType::Boolean) => IntChannel::open_i32(encoding, body),
            (_, DataType::Int32 | DataType::Enums) => IntChannel::open_i32(encoding, body),
            (_, DataType::Int64) => IntChannel::open_i64(encoding, body),
            _ => None,
        }
        .ok_or(ReadError::unsupported(encoding, data_type))?;

        Ok(Self {
            encoding,
            data_type,
            channel,
        })
    }
}

impl ValueDecoder for IntDecoder {
    fn encoding(&self) -> Encoding {
        self.encoding
    }

    fn data_type(&self) -> DataType {
        self.data_type
    }

    fn has_next(&self) -> bool {
        self.channel.has_next()
    }

    fn read_boolean(&mut self) -> ReadResult<bool> {
        if self.data_type != DataType::Boolean {
            return Err(ReadError::unsupported(self.encoding, DataType::Boolean));
        }
        match self.channel.read_i32() {
            Some(v) => Ok(v? != 0),
            None => Err(ReadError::unsupported(self.encoding, DataType::Boolean)),
        }
    }

    fn read_i32(&mut self) -> ReadResult<i32> {
        if !matches!(self.data_type, DataType::Int32 | DataType::Enums) {
            return Err(ReadError::unsupported(self.encoding, DataType::Int32));
        }
        self.channel
            .read_i32()
            .unwrap_or(Err(ReadError::unsupported(self.encoding, DataType::Int32)))
    }

    fn read_i64(&mut self) -> ReadResult<i64> {
        self.channel
            .read_i64()
            .unwrap_or(Err(ReadError::unsupported(self.encoding, DataType::Int64)))
    }
}

// =============================================================================
// Registry
// =============================================================================

/// Constructor stored in the registry.
pub type DecoderCtor = fn(Encoding, DataType, Bytes) -> ReadResult<Box<dyn ValueDecoder>>;

fn plain_ctor(_: Encoding, data_type: DataType, body: Bytes) -> ReadResult<Box<dyn ValueDecoder>> {
    Ok(Box::new(PlainDecoder::new(data_type, body)))
}

fn int_ctor(encoding: Encoding, data_type: DataType, body: Bytes) -> ReadResult<Box<dyn ValueDecoder>> {
    Ok(Box::new(IntDecoder::new(encoding, data_type, body)?))
}

fn fixed_point_ctor(
    encoding: Encoding,
    data_type: DataType,
    body: Bytes,
) -> ReadResult<Box<dyn ValueDecoder>> {
    Ok(Box::new(FixedPointDecoder::new(encoding, data_type, body)?))
}

/// Maps `(Encoding, DataType)` pairs to decoder constructors.
///
/// # Example
///
/// ```rust
/// use bytes::Bytes;
/// use tsscan_common::types::{DataType, Encoding};
/// use tsscan_encoding::DecoderRegistry;
///
/// let registry = DecoderRegistry::global();
/// assert!(registry.supports(Encoding::Ts2Diff, DataType::Int64));
/// assert!(!registry.supports(Encoding::Gorilla, DataType::Double));
///
/// let body = Bytes::from_static(&[1, 0, 0, 0]);
/// let mut decoder = registry.create(Encoding::Plain, DataType::Int32, body).unwrap();
/// assert_eq!(decoder.read_i32().unwrap(), 1);
/// ```
#[derive(Clone)]
pub struct DecoderRegistry {
    table: HashMap<(Encoding, DataType), DecoderCtor>,
}

impl DecoderRegistry {
    /// Creates a registry with no entries.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            table: HashMap::new(),
        }
    }

    /// Creates a registry holding every built-in decoder.
    #[must_use]
    pub fn with_builtin() -> Self {
        let mut registry = Self::empty();

        for data_type in [
            DataType::Boolean,
            DataType::Int32,
            DataType::Int64,
            DataType::Float,
            DataType::Double,
            DataType::Text,
            DataType::Enums,
        ] {
            registry.register(Encoding::Plain, data_type, plain_ctor);
        }

        registry.register(Encoding::Rle, DataType::Boolean, int_ctor);
        for encoding in [Encoding::Rle, Encoding::Ts2Diff] {
            registry.register(encoding, DataType::Int32, int_ctor);
            registry.register(encoding, DataType::Int64, int_ctor);
            registry.register(encoding, DataType::Enums, int_ctor);
            registry.register(encoding, DataType::Float, fixed_point_ctor);
            registry.register(encoding, DataType::Double, fixed_point_ctor);
        }

        registry
    }

    /// Returns the process-wide registry of built-in decoders.
    pub fn global() -> &'static Self {
        static GLOBAL: OnceLock<DecoderRegistry> = OnceLock::new();
        GLOBAL.get_or_init(Self::with_builtin)
    }

    /// Registers a constructor, returning the one it replaced.
    pub fn register(
        &mut self,
        encoding: Encoding,
        data_type: DataType,
        ctor: DecoderCtor,
    ) -> Option<DecoderCtor> {
        self.table.insert((encoding, data_type), ctor)
    }

    /// Returns true if a decoder exists for the pair.
    #[must_use]
    pub fn supports(&self, encoding: Encoding, data_type: DataType) -> bool {
        self.table.contains_key(&(encoding, data_type))
    }

    /// Returns the number of registered pairs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Returns true if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Creates a decoder over `body`.
    ///
    /// # Errors
    ///
    /// Returns `UnsupportedType` for an unregistered pair, or whatever the
    /// constructor reports for a malformed stream prefix.
    pub fn create(
        &self,
        encoding: Encoding,
        data_type: DataType,
        body: Bytes,
    ) -> ReadResult<Box<dyn ValueDecoder>> {
        let ctor = self
            .table
            .get(&(encoding, data_type))
            .ok_or(ReadError::unsupported(encoding, data_type))?;
        trace!(%encoding, %data_type, len = body.len(), "creating value decoder");
        ctor(encoding, data_type, body)
    }
}

impl Default for DecoderRegistry {
    fn default() -> Self {
        Self::with_builtin()
    }
}

impl fmt::Debug for DecoderRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DecoderRegistry")
            .field("entries", &self.table.len())
            .finish()
    }
}
