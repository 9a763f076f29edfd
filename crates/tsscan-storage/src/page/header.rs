//! Page header record.
//!
//! Layout (big-endian), after the `u32` length prefix:
//!
//! - encoding: 1 byte
//! - num_rows: 4 bytes
//! - min_timestamp: 8 bytes
//! - max_timestamp: 8 bytes
//! - compressed_size: 4 bytes
//! - raw_size: 4 bytes
//! - checksum: 4 bytes (CRC32 of the stored body)
//! - has_digest: 1 byte
//! - digest, when present: `[u32 min_len][min][u32 max_len][max]`
//!
//! The length prefix counts every byte after itself. Unknown trailing bytes
//! inside that length are skipped.

use bytes::{Buf, BufMut, Bytes};

use tsscan_common::constants::{PAGE_HEADER_FIXED_SIZE, PAGE_HEADER_LENGTH_PREFIX};
use tsscan_common::error::{ReadError, ReadResult};
use tsscan_common::types::{Encoding, Value};

/// Raw `[min, max]` statistics of a page or column.
///
/// Bytes are the big-endian encoding of the column's physical type; enum
/// columns store their `i32` codes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Digest {
    /// Encoded minimum.
    pub min: Bytes,
    /// Encoded maximum.
    pub max: Bytes,
}

impl Digest {
    /// Creates a digest from raw bytes.
    pub fn new(min: impl Into<Bytes>, max: impl Into<Bytes>) -> Self {
        Self {
            min: min.into(),
            max: max.into(),
        }
    }

    /// Creates a digest from typed bounds.
    pub fn from_values(min: &Value, max: &Value) -> Self {
        Self::new(min.to_be_bytes(), max.to_be_bytes())
    }

    /// Returns the encoded size inside a header.
    pub fn encoded_len(&self) -> usize {
        8 + self.min.len() + self.max.len()
    }

    fn serialize(&self, buf: &mut impl BufMut) {
        buf.put_u32(self.min.len() as u32);
        buf.put_slice(&self.min);
        buf.put_u32(self.max.len() as u32);
        buf.put_slice(&self.max);
    }

    fn deserialize(buf: &mut Bytes) -> ReadResult<Self> {
        let min = read_sized(buf, "min")?;
        let max = read_sized(buf, "max")?;
        Ok(Self { min, max })
    }
}

fn read_sized(buf: &mut Bytes, which: &str) -> ReadResult<Bytes> {
    if buf.remaining() < 4 {
        return Err(ReadError::invalid_header(format!(
            "digest {which} length cut off"
        )));
    }
    let len = buf.get_u32() as usize;
    if buf.remaining() < len {
        return Err(ReadError::invalid_header(format!(
            "digest {which} declares {len} bytes, {} left in header",
            buf.remaining()
        )));
    }
    Ok(buf.split_to(len))
}

/// Metadata preceding every page body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageHeader {
    /// Encoding of the value channel.
    pub encoding: Encoding,
    /// Number of `(timestamp, value)` pairs in the page.
    pub num_rows: i32,
    /// Smallest timestamp in the page.
    pub min_timestamp: i64,
    /// Largest timestamp in the page.
    pub max_timestamp: i64,
    /// Stored body size in bytes.
    pub compressed_size: u32,
    /// Decompressed body size in bytes.
    pub raw_size: u32,
    /// CRC32 of the stored body.
    pub checksum: u32,
    /// Value statistics, if recorded.
    pub digest: Option<Digest>,
}

impl PageHeader {
    /// Size of the length prefix.
    pub const PREFIX_SIZE: usize = PAGE_HEADER_LENGTH_PREFIX;

    /// Size of the fixed part of the record.
    pub const FIXED_SIZE: usize = PAGE_HEADER_FIXED_SIZE;

    /// Returns the record length stored in the prefix.
    pub fn record_len(&self) -> usize {
        Self::FIXED_SIZE + self.digest.as_ref().map_or(0, Digest::encoded_len)
    }

    /// Returns the full encoded size, prefix included.
    pub fn encoded_len(&self) -> usize {
        Self::PREFIX_SIZE + self.record_len()
    }

    /// Returns the size of header plus stored body.
    pub fn page_len(&self) -> u64 {
        self.encoded_len() as u64 + u64::from(self.compressed_size)
    }

    /// Returns true if the page's time range intersects `[start, end]`.
    pub fn overlaps(&self, start: i64, end: i64) -> bool {
        self.min_timestamp <= end && self.max_timestamp >= start
    }

    /// Serializes the header, length prefix included.
    pub fn serialize(&self, buf: &mut impl BufMut) {
        buf.put_u32(self.record_len() as u32);
        buf.put_u8(self.encoding.as_u8());
        buf.put_i32(self.num_rows);
        buf.put_i64(self.min_timestamp);
        buf.put_i64(self.max_timestamp);
        buf.put_u32(self.compressed_size);
        buf.put_u32(self.raw_size);
        buf.put_u32(self.checksum);
        match &self.digest {
            Some(digest) => {
                buf.put_u8(1);
                digest.serialize(buf);
            }
            None => buf.put_u8(0),
        }
    }

    /// Serializes the header to a byte vector.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(self.encoded_len());
        self.serialize(&mut buf);
        buf
    }

    /// Deserializes a header record, without its length prefix.
    ///
    /// `record` must hold exactly the bytes the prefix declared.
    ///
    /// # Errors
    ///
    /// Returns `InvalidHeader` for a short record, unknown encoding tag,
    /// negative row count, inverted time range or malformed digest.
    pub fn deserialize(mut record: Bytes) -> ReadResult<Self> {
        if record.remaining() < Self::FIXED_SIZE {
            return Err(ReadError::invalid_header(format!(
                "record is {} bytes, fixed part needs {}",
                record.remaining(),
                Self::FIXED_SIZE
            )));
        }

        let tag = record.get_u8();
        let encoding = Encoding::from_u8(tag)
            .ok_or_else(|| ReadError::invalid_header(format!("unknown encoding tag {tag}")))?;
        let num_rows = record.get_i32();
        if num_rows < 0 {
            return Err(ReadError::invalid_header(format!("negative row count {num_rows}")));
        }
        let min_timestamp = record.get_i64();
        let max_timestamp = record.get_i64();
        if min_timestamp > max_timestamp {
            return Err(ReadError::invalid_header(format!(
                "min timestamp {min_timestamp} after max timestamp {max_timestamp}"
            )));
        }
        let compressed_size = record.get_u32();
        let raw_size = record.get_u32();
        let checksum = record.get_u32();
        let digest = match record.get_u8() {
            0 => None,
            1 => Some(Digest::deserialize(&mut record)?),
            flag => {
                return Err(ReadError::invalid_header(format!("invalid digest flag {flag}")));
            }
        };

        Ok(Self {
            encoding,
            num_rows,
            min_timestamp,
            max_timestamp,
            compressed_size,
            raw_size,
            checksum,
            digest,
        })
    }

    /// Deserializes a header from bytes that start with the length prefix.
    pub fn from_bytes(bytes: &[u8]) -> ReadResult<Self> {
        let mut buf = bytes;
        if buf.remaining() < Self::PREFIX_SIZE {
            return Err(ReadError::truncated(
                "page header length",
                Self::PREFIX_SIZE,
                buf.remaining(),
            ));
        }
        let len = buf.get_u32() as usize;
        if buf.remaining() < len {
            return Err(ReadError::truncated("page header", len, buf.remaining()));
        }
        Self::deserialize(Bytes::copy_from_slice(&buf[..len]))
    }
}
