//! Column scan benchmarks for tsscan.
//!
//! Benchmarks for:
//! - Full column reads
//! - Filtered scans where digests prune most pages
//! - Point lookups

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use tsscan_bench::utils::build_column;
use tsscan_common::{DataType, Encoding};
use tsscan_reader::{ColumnData, FilterExpr, ScanCursor};

/// Benchmark reading every row of a column.
fn bench_read_column(c: &mut Criterion) {
    let mut group = c.benchmark_group("scan/read_column");

    for encoding in [Encoding::Plain, Encoding::Rle, Encoding::Ts2Diff] {
        let column = build_column(100_000, 1_024, encoding).unwrap();
        group.throughput(Throughput::Elements(100_000));
        group.bench_with_input(BenchmarkId::from_parameter(encoding), &encoding, |b, _| {
            b.iter(|| {
                let mut scanner = column.scanner().unwrap();
                black_box(scanner.read_column().unwrap().len())
            });
        });
    }

    group.finish();
}

/// Benchmark a narrow time window over a long column.
fn bench_time_window(c: &mut Criterion) {
    let mut group = c.benchmark_group("scan/time_window");
    let column = build_column(200_000, 1_024, Encoding::Ts2Diff).unwrap();
    let start = column.pairs[100_000].0;

    for width in [10, 1_000, 50_000] {
        let end = column.pairs[100_000 + width].0;
        let window = FilterExpr::time_between(start, end);
        group.bench_with_input(BenchmarkId::from_parameter(width), &width, |b, _| {
            b.iter(|| {
                let mut scanner = column.scanner().unwrap();
                let mut cursor = ScanCursor::new();
                let mut out = ColumnData::new(DataType::Int64);
                scanner
                    .scan(&mut cursor, &mut out, usize::MAX, Some(&window), None)
                    .unwrap();
                black_box(out.len())
            });
        });
    }

    group.finish();
}

/// Benchmark sorted point lookups.
fn bench_lookup(c: &mut Criterion) {
    let mut group = c.benchmark_group("scan/lookup");
    let column = build_column(100_000, 1_024, Encoding::Ts2Diff).unwrap();

    for step in [10usize, 1_000, 20_000] {
        let targets: Vec<i64> = column.pairs.iter().step_by(step).map(|(t, _)| *t).collect();
        group.throughput(Throughput::Elements(targets.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(step), &step, |b, _| {
            b.iter(|| {
                let mut scanner = column.scanner().unwrap();
                black_box(scanner.lookup(&targets).unwrap().len())
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_read_column, bench_time_window, bench_lookup);
criterion_main!(benches);
