//! Writes columns in the on-disk page format.
//!
//! ```text
//! [padding][page 0][page 1]...[page n]
//!          ^ region.file_offset       ^ region.end()
//! ```
//!
//! Each page is a serialized [`PageHeader`] followed by its (optionally
//! compressed) body: `[uvarint time len][TS_2DIFF times][value channel]`.

use bytes::Bytes;

use tsscan_common::config::ScanConfig;
use tsscan_common::error::{ReadError, ReadResult};
use tsscan_common::types::{DataType, Encoding, Value};
use tsscan_encoding::encoder::{encode_values, put_unsigned_varint, DeltaEncoder};
use tsscan_reader::{ColumnRegion, ColumnScanner, EnumDictionary};
use tsscan_storage::file::MemorySource;
use tsscan_storage::page::{compute_checksum, CompressionType, Digest, PageHeader};

/// One page to be written.
#[derive(Debug, Clone)]
pub struct PageSpec {
    /// Value channel encoding.
    pub encoding: Encoding,
    /// Timestamps, non-decreasing.
    pub times: Vec<i64>,
    /// Values as stored; enum columns hold `Int32` codes.
    pub values: Vec<Value>,
    /// Whether the header carries a value digest.
    pub with_digest: bool,
}

impl PageSpec {
    /// Creates a page from `(time, value)` pairs.
    pub fn new<V: Into<Value>>(encoding: Encoding, pairs: impl IntoIterator<Item = (i64, V)>) -> Self {
        let (times, values) = pairs.into_iter().map(|(t, v)| (t, v.into())).unzip();
        Self {
            encoding,
            times,
            values,
            with_digest: true,
        }
    }

    /// Drops the value digest from the header.
    pub fn without_digest(mut self) -> Self {
        self.with_digest = false;
        self
    }

    fn value_range(&self) -> Option<(Value, Value)> {
        value_range(self.values.iter())
    }
}

fn value_range<'v>(mut values: impl Iterator<Item = &'v Value>) -> Option<(Value, Value)> {
    let first = values.next()?;
    let (min, max) = values.fold((first, first), |(min, max), v| {
        (if v < min { v } else { min }, if v > max { v } else { max })
    });
    Some((min.clone(), max.clone()))
}

/// Builder for a column region and its bytes.
#[derive(Debug, Clone)]
pub struct ColumnBuilder {
    data_type: DataType,
    compression: CompressionType,
    dictionary: Option<EnumDictionary>,
    padding: usize,
    column_digest: bool,
    pages: Vec<PageSpec>,
}

impl ColumnBuilder {
    /// Creates a builder for a column of `data_type`.
    pub fn new(data_type: DataType) -> Self {
        Self {
            data_type,
            compression: CompressionType::Uncompressed,
            dictionary: None,
            padding: 0,
            column_digest: true,
            pages: Vec::new(),
        }
    }

    /// Sets the page body compression.
    pub fn compression(mut self, compression: CompressionType) -> Self {
        self.compression = compression;
        self
    }

    /// Sets the enum dictionary.
    pub fn dictionary(mut self, dictionary: EnumDictionary) -> Self {
        self.dictionary = Some(dictionary);
        self
    }

    /// Places `bytes` of filler before the first page.
    pub fn padding(mut self, bytes: usize) -> Self {
        self.padding = bytes;
        self
    }

    /// Leaves the region without a column digest.
    pub fn without_column_digest(mut self) -> Self {
        self.column_digest = false;
        self
    }

    /// Appends one page.
    pub fn page(mut self, page: PageSpec) -> Self {
        self.pages.push(page);
        self
    }

    /// Splits `pairs` into pages of at most `page_rows` rows.
    pub fn pages_of(mut self, encoding: Encoding, pairs: &[(i64, Value)], page_rows: usize) -> Self {
        for chunk in pairs.chunks(page_rows.max(1)) {
            self.pages.push(PageSpec::new(encoding, chunk.iter().cloned()));
        }
        self
    }

    /// Writes every page.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` for an empty page or mismatched lengths,
    /// and any encoder or compressor error.
    pub fn build(self) -> ReadResult<BuiltColumn> {
        let mut bytes = vec![0xA5; self.padding];
        let mut page_offsets = Vec::with_capacity(self.pages.len());
        let mut pairs = Vec::new();

        for page in &self.pages {
            if page.times.is_empty() || page.times.len() != page.values.len() {
                return Err(ReadError::invalid_argument(format!(
                    "page with {} times and {} values",
                    page.times.len(),
                    page.values.len()
                )));
            }
            page_offsets.push(bytes.len() as u64);
            self.write_page(page, &mut bytes)?;
            pairs.extend(page.times.iter().copied().zip(page.values.iter().cloned()));
        }

        let total_size = (bytes.len() - self.padding) as u64;
        let mut region = ColumnRegion::new(self.padding as u64, total_size, self.data_type)
            .with_compression(self.compression)
            .with_row_count(pairs.len() as u64);
        if self.column_digest {
            if let Some((min, max)) = value_range(pairs.iter().map(|(_, v)| v)) {
                region = region.with_digest(Digest::from_values(&min, &max));
            }
        }
        if let Some(dictionary) = self.dictionary {
            region = region.with_dictionary(dictionary);
        }

        Ok(BuiltColumn {
            bytes: Bytes::from(bytes),
            region,
            page_offsets,
            pairs,
        })
    }

    fn write_page(&self, page: &PageSpec, out: &mut Vec<u8>) -> ReadResult<()> {
        let time_bytes = DeltaEncoder::default().encode_i64(&page.times);
        let mut raw = Vec::new();
        put_unsigned_varint(&mut raw, time_bytes.len() as u64);
        raw.extend_from_slice(&time_bytes);
        raw.extend(encode_values(page.encoding, self.data_type, &page.values)?);

        let stored = self.compression.compress(&raw)?;
        let digest = page
            .with_digest
            .then(|| page.value_range())
            .flatten()
            .map(|(min, max)| Digest::from_values(&min, &max));

        let header = PageHeader {
            encoding: page.encoding,
            num_rows: page.times.len() as i32,
            min_timestamp: page.times[0],
            max_timestamp: page.times[page.times.len() - 1],
            compressed_size: stored.len() as u32,
            raw_size: raw.len() as u32,
            checksum: compute_checksum(&stored),
            digest,
        };
        header.serialize(out);
        out.extend_from_slice(&stored);
        Ok(())
    }
}

/// A written column.
#[derive(Debug, Clone)]
pub struct BuiltColumn {
    /// Padding plus page bytes.
    pub bytes: Bytes,
    /// Region covering the pages.
    pub region: ColumnRegion,
    /// Absolute offset of every page.
    pub page_offsets: Vec<u64>,
    /// Every stored pair, in file order; enum codes are not resolved.
    pub pairs: Vec<(i64, Value)>,
}

impl BuiltColumn {
    /// Returns an in-memory source over the bytes.
    pub fn source(&self) -> MemorySource {
        MemorySource::new(self.bytes.clone())
    }

    /// Returns a scanner with the default config.
    ///
    /// # Errors
    ///
    /// As [`ColumnScanner::new`].
    pub fn scanner(&self) -> ReadResult<ColumnScanner<'_, MemorySource>> {
        self.scanner_with(ScanConfig::default())
    }

    /// Returns a scanner with `config`.
    ///
    /// # Errors
    ///
    /// As [`ColumnScanner::new`].
    pub fn scanner_with(&self, config: ScanConfig) -> ReadResult<ColumnScanner<'_, MemorySource>> {
        ColumnScanner::new(&self.region, self.source(), config)
    }

    /// Returns the stored pairs with enum codes resolved through the
    /// region's dictionary.
    ///
    /// # Errors
    ///
    /// Returns `MalformedDictionary` for a code outside the dictionary.
    pub fn expected_pairs(&self) -> ReadResult<Vec<(i64, Value)>> {
        match &self.region.enum_dictionary {
            Some(dictionary) if self.region.data_type == DataType::Enums => self
                .pairs
                .iter()
                .map(|(t, v)| -> ReadResult<(i64, Value)> {
                    let code = v.as_i64().unwrap_or_default() as i32;
                    Ok((*t, Value::text(dictionary.index(code)?)))
                })
                .collect(),
            _ => Ok(self.pairs.clone()),
        }
    }

    /// Returns the page ranges as `(start, len)` pairs.
    pub fn page_ranges(&self) -> Vec<(u64, u64)> {
        let end = self.region.end();
        self.page_offsets
            .iter()
            .enumerate()
            .map(|(i, start)| {
                let next = self.page_offsets.get(i + 1).copied().unwrap_or(end);
                (*start, next - start)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout() {
        let column = ColumnBuilder::new(DataType::Int64)
            .padding(7)
            .page(PageSpec::new(Encoding::Ts2Diff, [(1, 5i64), (2, 9)]))
            .page(PageSpec::new(Encoding::Plain, [(3, -4i64)]).without_digest())
            .build()
            .unwrap();

        assert_eq!(column.region.file_offset, 7);
        assert_eq!(column.region.end() as usize, column.bytes.len());
        assert_eq!(column.page_offsets[0], 7);
        assert_eq!(
            column.region.digest,
            Some(Digest::from_values(&Value::Int64(-4), &Value::Int64(9)))
        );

        let first = PageHeader::from_bytes(&column.bytes[7..]).unwrap();
        assert_eq!(first.num_rows, 2);
        assert_eq!(first.page_len(), column.page_ranges()[0].1);
        let second = PageHeader::from_bytes(&column.bytes[column.page_offsets[1] as usize..]).unwrap();
        assert!(second.digest.is_none());
    }

    #[test]
    fn test_empty_page_rejected() {
        let err = ColumnBuilder::new(DataType::Int32)
            .page(PageSpec::new::<i32>(Encoding::Plain, []))
            .build()
            .unwrap_err();
        assert!(matches!(err, ReadError::InvalidArgument { .. }));
    }
}
