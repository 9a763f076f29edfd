//! Column regions.

use tsscan_common::error::{ReadError, ReadResult};
use tsscan_common::types::DataType;
use tsscan_storage::page::{CompressionType, Digest};

use super::EnumDictionary;

/// Location and metadata of one column chunk, supplied by the caller's
/// catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnRegion {
    /// Absolute offset of the first page.
    pub file_offset: u64,
    /// Bytes covered by the column's pages.
    pub total_size: u64,
    /// Physical type of the values.
    pub data_type: DataType,
    /// Column-level `[min, max]` digest.
    pub digest: Option<Digest>,
    /// Compression of every page body.
    pub compression: CompressionType,
    /// Dictionary, required for enum columns.
    pub enum_dictionary: Option<EnumDictionary>,
    /// Total rows in the column.
    pub row_count: u64,
}

impl ColumnRegion {
    /// Creates an uncompressed region without digest or dictionary.
    pub fn new(file_offset: u64, total_size: u64, data_type: DataType) -> Self {
        Self {
            file_offset,
            total_size,
            data_type,
            digest: None,
            compression: CompressionType::Uncompressed,
            enum_dictionary: None,
            row_count: 0,
        }
    }

    /// Sets the column digest.
    #[must_use]
    pub fn with_digest(mut self, digest: Digest) -> Self {
        self.digest = Some(digest);
        self
    }

    /// Sets the page compression.
    #[must_use]
    pub fn with_compression(mut self, compression: CompressionType) -> Self {
        self.compression = compression;
        self
    }

    /// Sets the enum dictionary.
    #[must_use]
    pub fn with_dictionary(mut self, dictionary: EnumDictionary) -> Self {
        self.enum_dictionary = Some(dictionary);
        self
    }

    /// Sets the row count.
    #[must_use]
    pub fn with_row_count(mut self, row_count: u64) -> Self {
        self.row_count = row_count;
        self
    }

    /// Returns the absolute offset just past the last page.
    pub fn end(&self) -> u64 {
        self.file_offset + self.total_size
    }

    /// Returns true if `offset` lies within the region, end included.
    pub fn contains(&self, offset: u64) -> bool {
        offset >= self.file_offset && offset <= self.end()
    }

    /// Checks that the region can be scanned.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` when the region overflows `u64` or an
    /// enum column has no dictionary.
    pub fn validate(&self) -> ReadResult<()> {
        if self.file_offset.checked_add(self.total_size).is_none() {
            return Err(ReadError::invalid_argument(format!(
                "region {}+{} overflows",
                self.file_offset, self.total_size
            )));
        }
        if self.data_type == DataType::Enums && self.enum_dictionary.is_none() {
            return Err(ReadError::invalid_argument("enum column without dictionary"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let region = ColumnRegion::new(100, 50, DataType::Int64)
            .with_compression(CompressionType::Snappy)
            .with_row_count(7);
        assert_eq!(region.end(), 150);
        assert!(region.contains(100));
        assert!(region.contains(150));
        assert!(!region.contains(151));
        assert!(region.validate().is_ok());
        assert_eq!(region.row_count, 7);
    }

    #[test]
    fn test_validate() {
        let region = ColumnRegion::new(0, 10, DataType::Enums);
        assert!(region.validate().is_err());
        let region = region.with_dictionary(EnumDictionary::new(["a"]));
        assert!(region.validate().is_ok());

        let region = ColumnRegion::new(u64::MAX, 10, DataType::Int32);
        assert!(region.validate().is_err());
    }
}
