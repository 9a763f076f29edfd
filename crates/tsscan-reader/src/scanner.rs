//! Filtered scans and point lookups over one column region.
//!
//! A scan walks pages from the cursor's position, pruning with digests
//! before decoding. A decoded page yields its timestamps first (the whole
//! time channel is decoded up front) and then its values in lockstep; each
//! pair goes through [`accept`] before being appended.

use tracing::{debug, trace};

use tsscan_common::config::ScanConfig;
use tsscan_common::error::{ReadError, ReadResult};
use tsscan_common::types::{DataType, Value};
use tsscan_encoding::{DecoderRegistry, DeltaDecoder, ValueDecoder};
use tsscan_storage::file::ByteSource;
use tsscan_storage::page::{split_page_body, PageBody, PageHeader, PageReader};

use crate::column::{ColumnData, ColumnRegion, EnumDictionary, ScanCursor, ScanOutcome};
use crate::filter::SeriesFilter;
use crate::pruner::DigestPruner;

/// Returns true if the pair passes both filters. Absent filters pass.
#[inline]
pub fn accept(
    time_filter: Option<&dyn SeriesFilter>,
    value_filter: Option<&dyn SeriesFilter>,
    time: i64,
    value: &Value,
) -> bool {
    time_filter.map_or(true, |f| f.satisfy(&Value::Int64(time)))
        && value_filter.map_or(true, |f| f.satisfy(value))
}

/// Counters accumulated over a scanner's lifetime.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanStats {
    /// Pages decoded.
    pub pages_decoded: u64,
    /// Pages skipped by digest or lookup position.
    pub pages_skipped: u64,
    /// Columns excluded by their digest.
    pub columns_pruned: u64,
    /// Pairs decoded from pages.
    pub rows_decoded: u64,
    /// Pairs appended to results.
    pub rows_accepted: u64,
}

// =============================================================================
// Per-type value decoding
// =============================================================================

type DecodeFn = fn(&mut dyn ValueDecoder, Option<&EnumDictionary>) -> ReadResult<Value>;

fn decode_enum(decoder: &mut dyn ValueDecoder, dictionary: Option<&EnumDictionary>) -> ReadResult<Value> {
    let code = decoder.read_i32()?;
    let dictionary =
        dictionary.ok_or_else(|| ReadError::invalid_state("enum column without dictionary"))?;
    Ok(Value::text(dictionary.index(code)?))
}

/// Picks the decode function for a column type, once per page.
fn decode_fn(data_type: DataType) -> DecodeFn {
    match data_type {
        DataType::Boolean => |d, _| Ok(Value::Boolean(d.read_boolean()?)),
        DataType::Int32 => |d, _| Ok(Value::Int32(d.read_i32()?)),
        DataType::Int64 => |d, _| Ok(Value::Int64(d.read_i64()?)),
        DataType::Float => |d, _| Ok(Value::Float(d.read_f32()?)),
        DataType::Double => |d, _| Ok(Value::Double(d.read_f64()?)),
        DataType::Text => |d, _| Ok(Value::Binary(d.read_binary()?)),
        DataType::Enums => decode_enum,
    }
}

/// A decoded page: all timestamps, and a value stream to read alongside.
struct PageCursor<'d> {
    times: Vec<i64>,
    decoder: Box<dyn ValueDecoder>,
    decode: DecodeFn,
    dictionary: Option<&'d EnumDictionary>,
}

impl<'d> PageCursor<'d> {
    fn open(
        header: &PageHeader,
        body: bytes::Bytes,
        region: &'d ColumnRegion,
        registry: &DecoderRegistry,
    ) -> ReadResult<Self> {
        let PageBody { times, values } = split_page_body(body)?;
        let num_rows = usize::try_from(header.num_rows).map_err(|_| {
            ReadError::invalid_block("page", format!("negative row count {}", header.num_rows))
        })?;

        // Never decode past the header's row count.
        let mut time_decoder = DeltaDecoder::<i64>::new(times);
        let mut times = Vec::new();
        while times.len() < num_rows && time_decoder.has_next() {
            times.push(time_decoder.read_next()?);
        }
        if times.len() < num_rows {
            return Err(ReadError::invalid_block(
                "page",
                format!("time channel holds {} rows, header says {num_rows}", times.len()),
            ));
        }
        if time_decoder.has_next() {
            return Err(ReadError::invalid_block(
                "page",
                format!("time channel holds more than {num_rows} rows"),
            ));
        }
        let decoder = registry.create(header.encoding, region.data_type, values)?;
        Ok(Self {
            times,
            decoder,
            decode: decode_fn(region.data_type),
            dictionary: region.enum_dictionary.as_ref(),
        })
    }

    #[inline]
    fn next_value(&mut self) -> ReadResult<Value> {
        (self.decode)(self.decoder.as_mut(), self.dictionary)
    }

    /// Fails if values remain after every timestamp was paired.
    fn finish(&self) -> ReadResult<()> {
        if self.decoder.has_next() {
            return Err(ReadError::invalid_block(
                "page",
                format!("value channel holds more than {} rows", self.times.len()),
            ));
        }
        Ok(())
    }
}

// =============================================================================
// ColumnScanner
// =============================================================================

/// Reads one column region from a byte source.
pub struct ColumnScanner<'a, S: ByteSource> {
    region: &'a ColumnRegion,
    source: S,
    config: ScanConfig,
    registry: &'a DecoderRegistry,
    stats: ScanStats,
}

impl<'a, S: ByteSource> ColumnScanner<'a, S> {
    /// Creates a scanner using the built-in decoders.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` for an invalid config or region.
    pub fn new(region: &'a ColumnRegion, source: S, config: ScanConfig) -> ReadResult<Self> {
        Self::with_registry(region, source, config, DecoderRegistry::global())
    }

    /// Creates a scanner using a custom decoder registry.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` for an invalid config or region.
    pub fn with_registry(
        region: &'a ColumnRegion,
        source: S,
        config: ScanConfig,
        registry: &'a DecoderRegistry,
    ) -> ReadResult<Self> {
        config.validate().map_err(ReadError::invalid_argument)?;
        region.validate()?;
        Ok(Self {
            region,
            source,
            config,
            registry,
            stats: ScanStats::default(),
        })
    }

    /// Returns the scanned region.
    pub fn region(&self) -> &ColumnRegion {
        self.region
    }

    /// Returns the counters accumulated so far.
    pub fn stats(&self) -> ScanStats {
        self.stats
    }

    /// Returns the byte source.
    pub fn into_source(self) -> S {
        self.source
    }

    /// Scans pages from `cursor` until `fetch_size` pairs were appended or
    /// the column is exhausted.
    ///
    /// A page is always processed whole, so one call may append more than
    /// `fetch_size` pairs. When the column digest excludes the column, the
    /// call appends nothing, leaves `cursor` at its page and reports
    /// `column_pruned`. Until the column is exhausted, `cursor.left_size`
    /// holds the bytes between the cursor and the end of the region. On exhaustion the cursor moves to the start of the
    /// next row group. Pairs appended before an error are kept.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` for a zero `fetch_size`, a result container
    /// of the wrong type or a cursor outside the region, and any I/O, framing
    /// or decode error met on the way.
    pub fn scan(
        &mut self,
        cursor: &mut ScanCursor,
        out: &mut ColumnData,
        fetch_size: usize,
        time_filter: Option<&dyn SeriesFilter>,
        value_filter: Option<&dyn SeriesFilter>,
    ) -> ReadResult<ScanOutcome> {
        if fetch_size == 0 {
            return Err(ReadError::invalid_argument("fetch size must be positive"));
        }
        self.check_output(out)?;

        let region = self.region;
        let start = cursor.page_offset.unwrap_or(region.file_offset);
        if !region.contains(start) {
            return Err(ReadError::invalid_argument(format!(
                "cursor offset {start} outside column [{}, {}]",
                region.file_offset,
                region.end()
            )));
        }
        cursor.left_size = region.end() - start;

        let pruner = DigestPruner::new(region.data_type, region.enum_dictionary.as_ref());
        if !pruner.column_satisfied(region.digest.as_ref(), value_filter) {
            self.stats.columns_pruned += 1;
            debug!(
                row_group = cursor.row_group_index,
                "column excluded by digest"
            );
            return Ok(ScanOutcome {
                rows: 0,
                column_exhausted: false,
                column_pruned: true,
            });
        }

        let Self {
            source,
            config,
            registry,
            stats,
            ..
        } = self;
        let mut reader = PageReader::new(source, region.compression, start, region.end(), config);
        let mut rows = 0;

        while !reader.is_exhausted() && rows < fetch_size {
            let page_offset = reader.position();
            let header = reader.next_page_header()?;

            if pruner.page_satisfied(&header, time_filter, value_filter) {
                let body = reader.next_page()?;
                let mut page = PageCursor::open(&header, body, region, registry)?;
                let mut accepted = 0;
                for i in 0..page.times.len() {
                    let time = page.times[i];
                    let value = page.next_value()?;
                    if accept(time_filter, value_filter, time, &value) {
                        out.push(time, value)?;
                        accepted += 1;
                    }
                }
                page.finish()?;
                stats.pages_decoded += 1;
                stats.rows_decoded += page.times.len() as u64;
                stats.rows_accepted += accepted as u64;
                rows += accepted;
                debug!(
                    offset = page_offset,
                    rows = header.num_rows,
                    accepted,
                    "decoded page"
                );
            } else {
                reader.skip_current_page()?;
                stats.pages_skipped += 1;
                debug!(
                    offset = page_offset,
                    min_ts = header.min_timestamp,
                    max_ts = header.max_timestamp,
                    "skipped page by digest"
                );
            }

            cursor.page_offset = Some(reader.position());
            cursor.left_size = reader.remaining();
        }

        let column_exhausted = reader.is_exhausted();
        if column_exhausted {
            trace!(row_group = cursor.row_group_index, "column exhausted");
            cursor.advance_row_group();
        }

        Ok(ScanOutcome {
            rows,
            column_exhausted,
            column_pruned: false,
        })
    }

    /// Reads every pair of the column in `fetch_size` batches.
    ///
    /// Returns the number of pairs appended.
    ///
    /// # Errors
    ///
    /// As [`scan`](Self::scan).
    pub fn read_all(&mut self, out: &mut ColumnData, fetch_size: usize) -> ReadResult<usize> {
        let mut cursor = ScanCursor::new();
        let mut total = 0;
        loop {
            let outcome = self.scan(&mut cursor, out, fetch_size, None, None)?;
            total += outcome.rows;
            if outcome.column_exhausted {
                return Ok(total);
            }
        }
    }

    /// Reads the whole column using the configured default fetch size.
    ///
    /// # Errors
    ///
    /// As [`scan`](Self::scan).
    pub fn read_column(&mut self) -> ReadResult<ColumnData> {
        let mut out = ColumnData::new(self.region.data_type);
        self.read_all(&mut out, self.config.default_fetch_size)?;
        Ok(out)
    }

    /// Returns the pairs whose timestamps equal one of `targets`.
    ///
    /// Targets must be strictly increasing. Targets with no row are dropped
    /// silently; for duplicate timestamps the first pair wins.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` for unsorted or duplicate targets, and any
    /// I/O, framing or decode error.
    pub fn lookup(&mut self, targets: &[i64]) -> ReadResult<ColumnData> {
        if let Some(w) = targets.windows(2).find(|w| w[0] >= w[1]) {
            return Err(ReadError::invalid_argument(format!(
                "lookup targets must be strictly increasing, got {} then {}",
                w[0], w[1]
            )));
        }

        let region = self.region;
        let mut out = ColumnData::new(region.data_type);
        if targets.is_empty() {
            return Ok(out);
        }

        let Self {
            source,
            config,
            registry,
            stats,
            ..
        } = self;
        let mut reader = PageReader::new(
            source,
            region.compression,
            region.file_offset,
            region.end(),
            config,
        );
        let mut next = 0;

        while next < targets.len() && !reader.is_exhausted() {
            let header = reader.next_page_header()?;
            if header.max_timestamp < targets[next] {
                reader.skip_current_page()?;
                stats.pages_skipped += 1;
                trace!(
                    max_ts = header.max_timestamp,
                    target = targets[next],
                    "lookup skipped page"
                );
                continue;
            }

            let body = reader.next_page()?;
            let mut page = PageCursor::open(&header, body, region, registry)?;
            stats.pages_decoded += 1;

            let mut i = 0;
            while i < page.times.len() && next < targets.len() {
                let time = page.times[i];
                let target = targets[next];
                if time < target {
                    page.next_value()?;
                    i += 1;
                } else if time == target {
                    out.push(time, page.next_value()?)?;
                    i += 1;
                    next += 1;
                } else {
                    next += 1;
                }
            }
            stats.rows_decoded += i as u64;
        }

        stats.rows_accepted += out.len() as u64;
        debug!(
            targets = targets.len(),
            found = out.len(),
            "lookup finished"
        );
        Ok(out)
    }

    fn check_output(&self, out: &ColumnData) -> ReadResult<()> {
        let expected = self.region.data_type.resolved();
        if out.data_type() != expected {
            return Err(ReadError::invalid_argument(format!(
                "result container holds {}, column is {}",
                out.data_type(),
                expected
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::FilterExpr;
    use tsscan_common::types::Encoding;
    use tsscan_encoding::encoder::{encode_values, put_unsigned_varint, DeltaEncoder};
    use tsscan_storage::file::MemorySource;
    use tsscan_storage::page::{compute_checksum, CompressionType, Digest};

    /// Writes pages of `(time, value)` pairs and returns the region bytes.
    fn write_pages(
        data_type: DataType,
        encoding: Encoding,
        pages: &[Vec<(i64, Value)>],
        with_digest: bool,
    ) -> Vec<u8> {
        let mut out = Vec::new();
        for pairs in pages {
            let times: Vec<i64> = pairs.iter().map(|(t, _)| *t).collect();
            let values: Vec<Value> = pairs.iter().map(|(_, v)| v.clone()).collect();

            let time_bytes = DeltaEncoder::default().encode_i64(&times);
            let mut body = Vec::new();
            put_unsigned_varint(&mut body, time_bytes.len() as u64);
            body.extend_from_slice(&time_bytes);
            body.extend(encode_values(encoding, data_type, &values).unwrap());

            let digest = with_digest.then(|| {
                let min = values
                    .iter()
                    .fold(values[0].clone(), |m, v| if v < &m { v.clone() } else { m });
                let max = values
                    .iter()
                    .fold(values[0].clone(), |m, v| if v > &m { v.clone() } else { m });
                Digest::from_values(&min, &max)
            });
            let header = PageHeader {
                encoding,
                num_rows: pairs.len() as i32,
                min_timestamp: times[0],
                max_timestamp: *times.last().unwrap(),
                compressed_size: body.len() as u32,
                raw_size: body.len() as u32,
                checksum: compute_checksum(&body),
                digest,
            };
            header.serialize(&mut out);
            out.extend_from_slice(&body);
        }
        out
    }

    fn int_pages() -> Vec<Vec<(i64, Value)>> {
        vec![
            (1..=5).map(|t| (t, Value::Int32(t as i32 * 10))).collect(),
            (6..=8).map(|t| (t, Value::Int32(t as i32 * 10))).collect(),
            (9..=12).map(|t| (t, Value::Int32(t as i32 * 10))).collect(),
        ]
    }

    fn int_region(bytes: &[u8]) -> ColumnRegion {
        ColumnRegion::new(0, bytes.len() as u64, DataType::Int32)
            .with_digest(Digest::from_values(&Value::Int32(10), &Value::Int32(120)))
            .with_row_count(12)
    }

    #[test]
    fn test_accept() {
        let gt = FilterExpr::gt(5);
        let window = FilterExpr::time_between(0, 10);
        assert!(accept(None, None, 1, &Value::Int32(0)));
        assert!(accept(Some(&window), Some(&gt), 3, &Value::Int32(6)));
        assert!(!accept(Some(&window), Some(&gt), 11, &Value::Int32(6)));
        assert!(!accept(Some(&window), Some(&gt), 3, &Value::Int32(5)));
        assert!(!accept(None, Some(&gt), 3, &Value::Int32(5)));
    }

    #[test]
    fn test_read_all_pages() {
        let bytes = write_pages(DataType::Int32, Encoding::Rle, &int_pages(), true);
        let region = int_region(&bytes);
        let mut scanner = ColumnScanner::new(&region, MemorySource::new(bytes), ScanConfig::default()).unwrap();

        let out = scanner.read_column().unwrap();
        assert_eq!(out.len(), 12);
        assert_eq!(out.times(), &(1..=12).collect::<Vec<i64>>()[..]);
        assert_eq!(out.int32_values().unwrap()[11], 120);
        assert_eq!(scanner.stats().pages_decoded, 3);
    }

    #[test]
    fn test_value_filter_prunes_pages() {
        let bytes = write_pages(DataType::Int32, Encoding::Ts2Diff, &int_pages(), true);
        let region = int_region(&bytes);
        let mut scanner = ColumnScanner::new(&region, MemorySource::new(bytes), ScanConfig::default()).unwrap();

        let filter = FilterExpr::gt(85);
        let mut cursor = ScanCursor::new();
        let mut out = ColumnData::new(DataType::Int32);
        let outcome = scanner.scan(&mut cursor, &mut out, 100, None, Some(&filter)).unwrap();

        assert_eq!(outcome.rows, 4);
        assert!(outcome.column_exhausted);
        assert_eq!(out.times(), &[9, 10, 11, 12]);
        assert_eq!(scanner.stats().pages_skipped, 2);
        assert_eq!(cursor, ScanCursor::for_row_group(1));
    }

    #[test]
    fn test_column_pruned_leaves_cursor() {
        let bytes = write_pages(DataType::Int32, Encoding::Plain, &int_pages(), true);
        let region = int_region(&bytes);
        let mut scanner = ColumnScanner::new(&region, MemorySource::new(bytes), ScanConfig::default()).unwrap();

        let filter = FilterExpr::gt(500);
        let mut cursor = ScanCursor::new();
        let mut out = ColumnData::new(DataType::Int32);
        let outcome = scanner.scan(&mut cursor, &mut out, 10, None, Some(&filter)).unwrap();
        assert!(outcome.column_pruned);
        assert!(!outcome.column_exhausted);
        assert_eq!(outcome.rows, 0);
        assert_eq!(cursor.page_offset, None);
        assert_eq!(cursor.row_group_index, 0);
        assert_eq!(cursor.left_size, region.total_size);
        assert_eq!(scanner.stats().pages_decoded + scanner.stats().pages_skipped, 0);
    }

    #[test]
    fn test_fetch_size_resumes() {
        let bytes = write_pages(DataType::Int32, Encoding::Rle, &int_pages(), false);
        let region = int_region(&bytes);
        let mut scanner = ColumnScanner::new(&region, MemorySource::new(bytes), ScanConfig::default()).unwrap();

        let mut cursor = ScanCursor::new();
        let mut out = ColumnData::new(DataType::Int32);

        // First page alone reaches the budget.
        let outcome = scanner.scan(&mut cursor, &mut out, 2, None, None).unwrap();
        assert_eq!(outcome.rows, 5);
        assert!(!outcome.column_exhausted);
        let offset = cursor.page_offset.unwrap();
        assert_eq!(cursor.left_size, region.end() - offset);

        let outcome = scanner.scan(&mut cursor, &mut out, 100, None, None).unwrap();
        assert_eq!(outcome.rows, 7);
        assert!(outcome.column_exhausted);
        assert_eq!(out.len(), 12);
        assert_eq!(cursor.row_group_index, 1);
        assert_eq!(cursor.page_offset, None);
    }

    #[test]
    fn test_lookup() {
        let bytes = write_pages(DataType::Int32, Encoding::Rle, &int_pages(), true);
        let region = int_region(&bytes);
        let mut scanner = ColumnScanner::new(&region, MemorySource::new(bytes), ScanConfig::default()).unwrap();

        let out = scanner.lookup(&[0, 2, 4, 7, 13]).unwrap();
        let pairs: Vec<(i64, Value)> = out.iter().collect();
        assert_eq!(
            pairs,
            vec![(2, Value::Int32(20)), (4, Value::Int32(40)), (7, Value::Int32(70))]
        );

        let out = scanner.lookup(&[10]).unwrap();
        assert_eq!(out.get(0), Some((10, Value::Int32(100))));
        assert!(scanner.stats().pages_skipped >= 2);

        assert!(scanner.lookup(&[]).unwrap().is_empty());
        assert!(matches!(
            scanner.lookup(&[3, 3]),
            Err(ReadError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn test_enum_column() {
        let dictionary = EnumDictionary::new(["idle", "busy", "down"]);
        let pages = vec![vec![
            (1, Value::Int32(1)),
            (2, Value::Int32(2)),
            (3, Value::Int32(3)),
            (4, Value::Int32(2)),
        ]];
        let bytes = write_pages(DataType::Enums, Encoding::Rle, &pages, true);
        let region = ColumnRegion::new(0, bytes.len() as u64, DataType::Enums).with_dictionary(dictionary);
        let mut scanner = ColumnScanner::new(&region, MemorySource::new(bytes), ScanConfig::default()).unwrap();

        let filter = FilterExpr::eq("busy");
        let mut cursor = ScanCursor::new();
        let mut out = ColumnData::new(DataType::Enums);
        scanner.scan(&mut cursor, &mut out, 10, None, Some(&filter)).unwrap();
        assert_eq!(out.times(), &[2, 4]);
        assert_eq!(out.get(0), Some((2, Value::text("busy"))));
    }

    #[test]
    fn test_bad_enum_code() {
        let dictionary = EnumDictionary::new(["only"]);
        let pages = vec![vec![(1, Value::Int32(1)), (2, Value::Int32(4))]];
        let bytes = write_pages(DataType::Enums, Encoding::Plain, &pages, false);
        let region = ColumnRegion::new(0, bytes.len() as u64, DataType::Enums).with_dictionary(dictionary);
        let mut scanner = ColumnScanner::new(&region, MemorySource::new(bytes), ScanConfig::default()).unwrap();

        let mut out = ColumnData::new(DataType::Enums);
        let err = scanner.read_all(&mut out, 10).unwrap_err();
        assert!(matches!(err, ReadError::MalformedDictionary { code: 4, size: 1 }));
        // The pair decoded before the failure stays.
        assert_eq!(out.len(), 1);
    }

    #[test]
    fn test_argument_checks() {
        let bytes = write_pages(DataType::Int32, Encoding::Plain, &int_pages(), false);
        let region = int_region(&bytes);
        let mut scanner = ColumnScanner::new(&region, MemorySource::new(bytes), ScanConfig::default()).unwrap();

        let mut cursor = ScanCursor::new();
        let mut out = ColumnData::new(DataType::Int32);
        assert!(scanner.scan(&mut cursor, &mut out, 0, None, None).is_err());

        let mut wrong = ColumnData::new(DataType::Int64);
        assert!(scanner.scan(&mut cursor, &mut wrong, 10, None, None).is_err());

        let mut outside = ScanCursor {
            page_offset: Some(region.end() + 1),
            ..ScanCursor::new()
        };
        assert!(scanner.scan(&mut outside, &mut out, 10, None, None).is_err());

        let enum_region = ColumnRegion::new(0, 0, DataType::Enums);
        assert!(ColumnScanner::new(&enum_region, MemorySource::default(), ScanConfig::default()).is_err());
    }

    #[test]
    fn test_row_count_mismatch() {
        let bytes = write_pages(DataType::Int32, Encoding::Plain, &int_pages()[..1], false);
        let mut header = PageHeader::from_bytes(&bytes).unwrap();
        let old_len = header.encoded_len();
        header.num_rows = 6;
        let mut patched = header.to_bytes();
        patched.extend_from_slice(&bytes[old_len..]);

        let region = ColumnRegion::new(0, patched.len() as u64, DataType::Int32);
        let mut scanner = ColumnScanner::new(&region, MemorySource::new(patched), ScanConfig::default()).unwrap();
        let mut out = ColumnData::new(DataType::Int32);
        let err = scanner.read_all(&mut out, 10).unwrap_err();
        assert!(err.is_corruption());
    }

    /// Frames one page around hand-written time and value channels.
    fn raw_page(num_rows: i32, time_bytes: &[u8], value_bytes: &[u8]) -> Vec<u8> {
        let mut body = Vec::new();
        put_unsigned_varint(&mut body, time_bytes.len() as u64);
        body.extend_from_slice(time_bytes);
        body.extend_from_slice(value_bytes);

        let header = PageHeader {
            encoding: Encoding::Plain,
            num_rows,
            min_timestamp: 1,
            max_timestamp: 1,
            compressed_size: body.len() as u32,
            raw_size: body.len() as u32,
            checksum: compute_checksum(&body),
            digest: None,
        };
        let mut out = header.to_bytes();
        out.extend_from_slice(&body);
        out
    }

    #[test]
    fn test_zero_width_time_block_bounded_by_row_count() {
        // pack_num u32::MAX at width 0 needs no packed bytes.
        let mut times = Vec::new();
        times.extend_from_slice(&u32::MAX.to_be_bytes());
        times.extend_from_slice(&0u32.to_be_bytes());
        times.extend_from_slice(&1i64.to_be_bytes());
        times.extend_from_slice(&1i64.to_be_bytes());
        let values = encode_values(Encoding::Plain, DataType::Int32, &[Value::Int32(7)]).unwrap();
        let bytes = raw_page(1, &times, &values);

        let region = ColumnRegion::new(0, bytes.len() as u64, DataType::Int32);
        let mut scanner = ColumnScanner::new(&region, MemorySource::new(bytes), ScanConfig::default()).unwrap();

        let mut out = ColumnData::new(DataType::Int32);
        let err = scanner.read_all(&mut out, 10).unwrap_err();
        assert!(matches!(err, ReadError::InvalidBlock { .. }));
        assert!(out.is_empty());

        let err = scanner.lookup(&[1]).unwrap_err();
        assert!(matches!(err, ReadError::InvalidBlock { .. }));
    }

    #[test]
    fn test_negative_row_count() {
        let times = DeltaEncoder::default().encode_i64(&[1]);
        let values = encode_values(Encoding::Plain, DataType::Int32, &[Value::Int32(7)]).unwrap();
        let bytes = raw_page(-1, &times, &values);

        let region = ColumnRegion::new(0, bytes.len() as u64, DataType::Int32);
        let mut scanner = ColumnScanner::new(&region, MemorySource::new(bytes), ScanConfig::default()).unwrap();
        assert!(scanner.read_column().unwrap_err().is_corruption());
    }

    #[test]
    fn test_extra_values_rejected() {
        let times = DeltaEncoder::default().encode_i64(&[1, 1]);
        let values = encode_values(
            Encoding::Plain,
            DataType::Int32,
            &[Value::Int32(1), Value::Int32(2), Value::Int32(3)],
        )
        .unwrap();
        let bytes = raw_page(2, &times, &values);

        let region = ColumnRegion::new(0, bytes.len() as u64, DataType::Int32);
        let mut scanner = ColumnScanner::new(&region, MemorySource::new(bytes), ScanConfig::default()).unwrap();
        let mut out = ColumnData::new(DataType::Int32);
        let err = scanner.read_all(&mut out, 10).unwrap_err();
        assert!(matches!(err, ReadError::InvalidBlock { .. }));
    }

    #[test]
    fn test_region_at_offset() {
        let mut bytes = vec![0xEE; 16];
        let pages = write_pages(DataType::Int32, Encoding::Rle, &int_pages(), true);
        bytes.extend_from_slice(&pages);
        let region = ColumnRegion::new(16, pages.len() as u64, DataType::Int32)
            .with_compression(CompressionType::Uncompressed);
        let mut scanner = ColumnScanner::new(&region, MemorySource::new(bytes), ScanConfig::default()).unwrap();
        assert_eq!(scanner.read_column().unwrap().len(), 12);
    }
}
