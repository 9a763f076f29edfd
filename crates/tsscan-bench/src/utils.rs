//! Benchmark utilities and helpers.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use tsscan_common::{DataType, Encoding, ReadResult, Value};
use tsscan_test::{BuiltColumn, ColumnBuilder};

/// Generates `count` values that fit in `width` bits.
pub fn generate_packed_values(count: usize, width: u32) -> Vec<u64> {
    let mut rng = StdRng::seed_from_u64(42);
    let mask = if width == 64 { u64::MAX } else { (1u64 << width) - 1 };
    (0..count).map(|_| rng.gen::<u64>() & mask).collect()
}

/// Generates a sensor-like `i64` series: regular timestamps, slowly drifting values.
pub fn generate_series(count: usize) -> Vec<(i64, Value)> {
    let mut rng = StdRng::seed_from_u64(42);
    let mut value = 0i64;
    (0..count as i64)
        .map(|i| {
            value += rng.gen_range(-3..=3);
            (1_700_000_000_000 + i * 1_000, Value::Int64(value))
        })
        .collect()
}

/// Builds an `i64` column of `count` rows in pages of `page_rows`.
///
/// # Errors
///
/// Returns any error of the fixture writer.
pub fn build_column(count: usize, page_rows: usize, encoding: Encoding) -> ReadResult<BuiltColumn> {
    ColumnBuilder::new(DataType::Int64)
        .pages_of(encoding, &generate_series(count), page_rows)
        .build()
}
