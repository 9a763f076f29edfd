//! End-to-end scan tests over fixture columns.

use bytes::Bytes;

use tsscan_common::{DataType, Encoding, ReadError, ScanConfig, Value};
use tsscan_encoding::DecoderRegistry;
use tsscan_reader::{ColumnData, ColumnScanner, EnumDictionary, FilterExpr, ScanCursor};
use tsscan_storage::{CompressionType, MemorySource};
use tsscan_test::utils::{init_tracing, random_series, seeded};
use tsscan_test::{ColumnBuilder, PageSpec};

fn int32_column() -> tsscan_test::BuiltColumn {
    ColumnBuilder::new(DataType::Int32)
        .page(PageSpec::new(Encoding::Rle, (1..=5).map(|t| (t, t as i32 * 10))))
        .build()
        .unwrap()
}

fn pairs(out: &ColumnData) -> Vec<(i64, Value)> {
    out.iter().collect()
}

#[test]
fn test_int32_value_filter() {
    init_tracing();
    let column = int32_column();
    let mut scanner = column.scanner().unwrap();

    let filter = FilterExpr::gt(25);
    let mut cursor = ScanCursor::new();
    let mut out = ColumnData::new(DataType::Int32);
    let outcome = scanner.scan(&mut cursor, &mut out, 10, None, Some(&filter)).unwrap();

    assert_eq!(outcome.rows, 3);
    assert!(outcome.column_exhausted);
    assert_eq!(
        pairs(&out),
        vec![(3, Value::Int32(30)), (4, Value::Int32(40)), (5, Value::Int32(50))]
    );
}

#[test]
fn test_int32_pruned_without_decoding() {
    let column = int32_column();
    let mut scanner = column.scanner().unwrap();

    let filter = FilterExpr::gt(100);
    let mut cursor = ScanCursor::new();
    let mut out = ColumnData::new(DataType::Int32);
    let outcome = scanner.scan(&mut cursor, &mut out, 10, None, Some(&filter)).unwrap();

    assert!(outcome.column_pruned);
    assert!(out.is_empty());
    assert_eq!(scanner.stats().pages_decoded, 0);
    assert_eq!(scanner.stats().rows_decoded, 0);
}

#[test]
fn test_int32_page_pruned_without_column_digest() {
    let column = ColumnBuilder::new(DataType::Int32)
        .without_column_digest()
        .page(PageSpec::new(Encoding::Rle, (1..=5).map(|t| (t, t as i32 * 10))))
        .build()
        .unwrap();
    let mut scanner = column.scanner().unwrap();

    let filter = FilterExpr::gt(100);
    let mut cursor = ScanCursor::new();
    let mut out = ColumnData::new(DataType::Int32);
    let outcome = scanner.scan(&mut cursor, &mut out, 10, None, Some(&filter)).unwrap();

    assert!(!outcome.column_pruned);
    assert!(outcome.column_exhausted);
    assert!(out.is_empty());
    assert_eq!(scanner.stats().pages_skipped, 1);
    assert_eq!(scanner.stats().pages_decoded, 0);
}

#[test]
fn test_int32_lookup() {
    let column = int32_column();
    let mut scanner = column.scanner().unwrap();
    let out = scanner.lookup(&[2, 4, 6]).unwrap();
    assert_eq!(pairs(&out), vec![(2, Value::Int32(20)), (4, Value::Int32(40))]);
}

#[test]
fn test_every_supported_pair_reads_back() {
    init_tracing();
    let mut rng = seeded(42);
    let registry = DecoderRegistry::global();

    for data_type in [
        DataType::Boolean,
        DataType::Int32,
        DataType::Int64,
        DataType::Float,
        DataType::Double,
        DataType::Text,
        DataType::Enums,
    ] {
        for encoding in [Encoding::Plain, Encoding::Rle, Encoding::Ts2Diff] {
            if !registry.supports(encoding, data_type) {
                continue;
            }
            let series = random_series(&mut rng, data_type, 700, 6);
            let mut builder = ColumnBuilder::new(data_type)
                .padding(13)
                .pages_of(encoding, &series, 128);
            if data_type == DataType::Enums {
                builder = builder.dictionary(EnumDictionary::new(["a", "b", "c", "d", "e", "f"]));
            }
            let column = builder.build().unwrap();

            let mut scanner = column.scanner().unwrap();
            let out = scanner.read_column().unwrap();
            assert_eq!(
                pairs(&out),
                column.expected_pairs().unwrap(),
                "{encoding} / {data_type}"
            );
            assert_eq!(out.len() as u64, column.region.row_count);
        }
    }
}

#[test]
fn test_time_and_value_filters_combine() {
    let series: Vec<(i64, Value)> = (0..100).map(|t| (t, Value::Int64(t))).collect();
    let column = ColumnBuilder::new(DataType::Int64)
        .pages_of(Encoding::Ts2Diff, &series, 16)
        .build()
        .unwrap();
    let mut scanner = column.scanner().unwrap();

    let window = FilterExpr::time_between(40, 59);
    let value = FilterExpr::eq(45i64);
    let mut cursor = ScanCursor::new();
    let mut out = ColumnData::new(DataType::Int64);
    scanner
        .scan(&mut cursor, &mut out, 1_000, Some(&window), Some(&value))
        .unwrap();

    assert_eq!(pairs(&out), vec![(45, Value::Int64(45))]);
    // [32, 47] matches both filters, [48, 63] only the time window.
    assert_eq!(scanner.stats().pages_decoded, 2);
    assert_eq!(scanner.stats().pages_skipped, 5);
}

#[test]
fn test_enum_column_resolves_codes() {
    let column = ColumnBuilder::new(DataType::Enums)
        .dictionary(EnumDictionary::new(["cold", "hot", "warm"]))
        .page(PageSpec::new(Encoding::Rle, [(1, 1), (2, 1), (3, 3)]))
        .page(PageSpec::new(Encoding::Rle, [(4, 2), (5, 2)]))
        .build()
        .unwrap();
    let mut scanner = column.scanner().unwrap();

    // "warm" sorts above "hot": only the first page's codes span it.
    let filter = FilterExpr::eq("warm");
    let mut cursor = ScanCursor::new();
    let mut out = ColumnData::new(DataType::Enums);
    scanner.scan(&mut cursor, &mut out, 100, None, Some(&filter)).unwrap();

    assert_eq!(out.data_type(), DataType::Text);
    assert_eq!(pairs(&out), vec![(3, Value::text("warm"))]);
    assert_eq!(scanner.stats().pages_skipped, 1);
}

#[test]
fn test_snappy_pages() {
    let mut rng = seeded(7);
    let series = random_series(&mut rng, DataType::Double, 2_000, 0);
    let column = ColumnBuilder::new(DataType::Double)
        .compression(CompressionType::Snappy)
        .pages_of(Encoding::Ts2Diff, &series, 300)
        .build()
        .unwrap();

    let mut scanner = column.scanner().unwrap();
    assert_eq!(pairs(&scanner.read_column().unwrap()), series);
}

#[test]
fn test_checksum_mismatch() {
    let column = int32_column();
    let mut bytes = column.bytes.to_vec();
    let last = bytes.len() - 1;
    bytes[last] ^= 0xFF;

    let mut scanner = ColumnScanner::new(&column.region, MemorySource::new(bytes.clone()), ScanConfig::default()).unwrap();
    let err = scanner.read_column().unwrap_err();
    assert!(matches!(err, ReadError::ChecksumMismatch { offset: 0, .. }));
    assert!(err.is_corruption());

    // Without verification the corrupted body reaches the decoder instead.
    let config = ScanConfig::default().with_verify_checksums(false);
    let mut scanner = ColumnScanner::new(&column.region, MemorySource::new(bytes), config).unwrap();
    assert!(!matches!(scanner.read_column(), Err(ReadError::ChecksumMismatch { .. })));
}

#[test]
fn test_truncated_region() {
    let column = int32_column();
    let mut region = column.region.clone();
    region.total_size -= 3;

    let mut scanner = ColumnScanner::new(&region, column.source(), ScanConfig::default()).unwrap();
    let err = scanner.read_column().unwrap_err();
    assert!(err.is_truncation());
}

#[test]
fn test_unsupported_encoding() {
    let column = int32_column();
    let mut bytes = column.bytes.to_vec();
    // Encoding tag follows the u32 header length.
    bytes[4] = Encoding::Diff.as_u8();

    let mut scanner = ColumnScanner::new(&column.region, MemorySource::new(bytes), ScanConfig::default()).unwrap();
    let err = scanner.read_column().unwrap_err();
    assert!(matches!(
        err,
        ReadError::UnsupportedType { encoding: Encoding::Diff, data_type: DataType::Int32 }
    ));

    let empty = DecoderRegistry::empty();
    let mut scanner =
        ColumnScanner::with_registry(&column.region, column.source(), ScanConfig::default(), &empty).unwrap();
    assert!(matches!(
        scanner.read_column(),
        Err(ReadError::UnsupportedType { .. })
    ));
}

#[test]
fn test_oversized_page_rejected() {
    let column = int32_column();
    let config = ScanConfig::default().with_max_page_raw_size(4);
    let mut scanner = column.scanner_with(config).unwrap();
    assert!(matches!(
        scanner.read_column(),
        Err(ReadError::InvalidHeader { .. })
    ));
}

#[test]
fn test_binary_values_share_source_bytes() {
    let column = ColumnBuilder::new(DataType::Text)
        .page(PageSpec::new(Encoding::Plain, [(1, "alpha"), (2, ""), (3, "omega")]))
        .build()
        .unwrap();
    let mut scanner = column.scanner().unwrap();
    let out = scanner.read_column().unwrap();
    assert_eq!(
        out.binary_values().unwrap(),
        &[Bytes::from_static(b"alpha"), Bytes::new(), Bytes::from_static(b"omega")]
    );
}

#[test]
fn test_scanner_from_json_settings() {
    let config: ScanConfig = serde_json::from_str(r#"{"default_fetch_size": 2}"#).unwrap();
    let dictionary: EnumDictionary = serde_json::from_str(r#"{"values": ["off", "on"]}"#).unwrap();

    let column = ColumnBuilder::new(DataType::Enums)
        .dictionary(dictionary)
        .page(PageSpec::new(Encoding::Plain, [(1, 2), (2, 1), (3, 2)]))
        .build()
        .unwrap();
    let mut scanner = column.scanner_with(config).unwrap();
    let out = scanner.read_column().unwrap();
    assert_eq!(
        pairs(&out),
        vec![(1, Value::text("on")), (2, Value::text("off")), (3, Value::text("on"))]
    );

    let bad: ScanConfig = serde_json::from_str(r#"{"default_fetch_size": 0}"#).unwrap();
    assert!(matches!(
        column.scanner_with(bad),
        Err(ReadError::InvalidArgument { .. })
    ));
}
