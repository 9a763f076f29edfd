//! Digest-based pruning.
//!
//! Pruning decides, from `[min, max]` statistics alone, whether a column or
//! page can hold a pair the filters accept. It is conservative: anything it
//! cannot prove unsatisfiable is read. It never fails.

use tsscan_common::types::DataType;
use tsscan_storage::page::{Digest, PageHeader};

use crate::column::EnumDictionary;
use crate::filter::{DigestForFilter, SeriesFilter};

/// Prunes columns and pages of one column region.
#[derive(Debug, Clone, Copy)]
pub struct DigestPruner<'a> {
    data_type: DataType,
    dictionary: Option<&'a EnumDictionary>,
}

impl<'a> DigestPruner<'a> {
    /// Creates a pruner for a column of `data_type`.
    pub fn new(data_type: DataType, dictionary: Option<&'a EnumDictionary>) -> Self {
        Self {
            data_type,
            dictionary,
        }
    }

    /// Builds the typed digest, or `None` if absent or inconclusive.
    pub fn value_digest(&self, digest: Option<&Digest>) -> Option<DigestForFilter> {
        DigestForFilter::from_digest(digest?, self.data_type, self.dictionary)
    }

    /// Returns false only if the column digest proves no value can satisfy
    /// `value_filter`.
    pub fn column_satisfied(
        &self,
        digest: Option<&Digest>,
        value_filter: Option<&dyn SeriesFilter>,
    ) -> bool {
        let Some(filter) = value_filter else {
            return true;
        };
        self.value_digest(digest)
            .map_or(true, |d| filter.satisfy_digest(&d))
    }

    /// Returns false only if every supplied filter is provably
    /// unsatisfiable on the page.
    ///
    /// A page is read when there are no filters, when the value filter may
    /// match its value digest (or the digest is missing), or when the time
    /// filter may match its time range.
    pub fn page_satisfied(
        &self,
        header: &PageHeader,
        time_filter: Option<&dyn SeriesFilter>,
        value_filter: Option<&dyn SeriesFilter>,
    ) -> bool {
        if time_filter.is_none() && value_filter.is_none() {
            return true;
        }

        let value_ok = value_filter.is_some_and(|filter| {
            self.value_digest(header.digest.as_ref())
                .map_or(true, |d| filter.satisfy_digest(&d))
        });
        if value_ok {
            return true;
        }

        time_filter.is_some_and(|filter| {
            filter.satisfy_digest(&DigestForFilter::from_time_range(
                header.min_timestamp,
                header.max_timestamp,
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::FilterExpr;
    use tsscan_common::types::{Encoding, Value};

    fn header(min_ts: i64, max_ts: i64, digest: Option<(i32, i32)>) -> PageHeader {
        PageHeader {
            encoding: Encoding::Plain,
            num_rows: 1,
            min_timestamp: min_ts,
            max_timestamp: max_ts,
            compressed_size: 0,
            raw_size: 0,
            checksum: 0,
            digest: digest.map(|(lo, hi)| Digest::from_values(&Value::Int32(lo), &Value::Int32(hi))),
        }
    }

    #[test]
    fn test_column_level() {
        let pruner = DigestPruner::new(DataType::Int32, None);
        let digest = Digest::from_values(&Value::Int32(10), &Value::Int32(50));
        let gt25 = FilterExpr::gt(25);
        let gt100 = FilterExpr::gt(100);

        assert!(pruner.column_satisfied(Some(&digest), None));
        assert!(pruner.column_satisfied(Some(&digest), Some(&gt25)));
        assert!(!pruner.column_satisfied(Some(&digest), Some(&gt100)));
        assert!(pruner.column_satisfied(None, Some(&gt100)));

        let broken = Digest::new(vec![1u8], vec![2u8]);
        assert!(pruner.column_satisfied(Some(&broken), Some(&gt100)));
    }

    #[test]
    fn test_page_no_filters() {
        let pruner = DigestPruner::new(DataType::Int32, None);
        assert!(pruner.page_satisfied(&header(1, 5, Some((0, 0))), None, None));
    }

    #[test]
    fn test_page_value_filter() {
        let pruner = DigestPruner::new(DataType::Int32, None);
        let gt100 = FilterExpr::gt(100);
        assert!(!pruner.page_satisfied(&header(1, 5, Some((10, 50))), None, Some(&gt100)));
        assert!(pruner.page_satisfied(&header(1, 5, Some((10, 150))), None, Some(&gt100)));
        assert!(pruner.page_satisfied(&header(1, 5, None), None, Some(&gt100)));
    }

    #[test]
    fn test_page_time_filter() {
        let pruner = DigestPruner::new(DataType::Int32, None);
        let window = FilterExpr::time_between(10, 20);
        assert!(!pruner.page_satisfied(&header(1, 5, None), Some(&window), None));
        assert!(pruner.page_satisfied(&header(1, 10, None), Some(&window), None));
    }

    #[test]
    fn test_page_both_filters() {
        let pruner = DigestPruner::new(DataType::Int32, None);
        let window = FilterExpr::time_between(10, 20);
        let gt100 = FilterExpr::gt(100);

        // Both unsatisfiable: skipped.
        assert!(!pruner.page_satisfied(&header(1, 5, Some((0, 9))), Some(&window), Some(&gt100)));
        // Either side satisfiable: read.
        assert!(pruner.page_satisfied(&header(12, 15, Some((0, 9))), Some(&window), Some(&gt100)));
        assert!(pruner.page_satisfied(&header(1, 5, Some((0, 200))), Some(&window), Some(&gt100)));
    }

    #[test]
    fn test_enum_page_digest() {
        let dictionary = EnumDictionary::new(["mid", "zulu", "alpha"]);
        let pruner = DigestPruner::new(DataType::Enums, Some(&dictionary));
        let is_zulu = FilterExpr::eq("zulu");

        assert!(!pruner.page_satisfied(&header(1, 5, Some((1, 1))), None, Some(&is_zulu)));
        assert!(!pruner.page_satisfied(&header(1, 5, Some((3, 3))), None, Some(&is_zulu)));
        // The end codes resolve to "mid" and "alpha", but code 2 is "zulu".
        assert!(pruner.page_satisfied(&header(1, 5, Some((1, 3))), None, Some(&is_zulu)));
        // Codes outside the dictionary never prune.
        assert!(pruner.page_satisfied(&header(1, 5, Some((1, 9))), None, Some(&is_zulu)));
    }
}
