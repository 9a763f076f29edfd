//! Series generators and logging setup.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing_subscriber::EnvFilter;

use tsscan_common::types::{DataType, Value};

/// Installs a `RUST_LOG`-driven subscriber once per test binary.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Returns a seeded generator.
pub fn seeded(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Generates strictly increasing timestamps starting at `start`.
pub fn increasing_times(rng: &mut StdRng, count: usize, start: i64) -> Vec<i64> {
    let mut t = start;
    (0..count)
        .map(|_| {
            t += rng.gen_range(1..1_000);
            t
        })
        .collect()
}

/// Generates one value of `data_type`.
///
/// Values stay within ranges every encoding of the type can store: floats
/// carry two decimals and enum codes fall in `1..=enum_size`.
pub fn random_value(rng: &mut StdRng, data_type: DataType, enum_size: i32) -> Value {
    match data_type {
        DataType::Boolean => Value::Boolean(rng.gen_bool(0.3)),
        DataType::Int32 => Value::Int32(rng.gen_range(-50_000..50_000)),
        DataType::Int64 => Value::Int64(rng.gen_range(-5_000_000_000..5_000_000_000)),
        DataType::Float => Value::Float(rng.gen_range(-10_000..10_000) as f32 / 100.0),
        DataType::Double => Value::Double(rng.gen_range(-1_000_000..1_000_000) as f64 / 100.0),
        DataType::Text => {
            let len = rng.gen_range(0..12);
            let text: String = (0..len).map(|_| rng.gen_range(b'a'..=b'z') as char).collect();
            Value::text(&text)
        }
        DataType::Enums => Value::Int32(rng.gen_range(1..=enum_size.max(1))),
    }
}

/// Generates `count` pairs with increasing timestamps.
pub fn random_series(
    rng: &mut StdRng,
    data_type: DataType,
    count: usize,
    enum_size: i32,
) -> Vec<(i64, Value)> {
    increasing_times(rng, count, 1_700_000_000_000)
        .into_iter()
        .map(|t| (t, random_value(rng, data_type, enum_size)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_series_is_sorted_and_seeded() {
        let a = random_series(&mut seeded(42), DataType::Int64, 100, 0);
        let b = random_series(&mut seeded(42), DataType::Int64, 100, 0);
        assert_eq!(a, b);
        assert!(a.windows(2).all(|w| w[0].0 < w[1].0));
    }
}
