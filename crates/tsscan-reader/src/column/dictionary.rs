//! Enum dictionaries.

use serde::{Deserialize, Serialize};

use tsscan_common::error::{ReadError, ReadResult};

/// Strings an enum column's 1-based codes resolve to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumDictionary {
    values: Vec<String>,
}

impl EnumDictionary {
    /// Creates a dictionary; the first entry has code 1.
    pub fn new<I, T>(values: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self {
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if the dictionary has no entries.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Resolves a 1-based code.
    ///
    /// # Errors
    ///
    /// Returns `MalformedDictionary` for codes outside `1..=len`.
    pub fn index(&self, code: i32) -> ReadResult<&str> {
        usize::try_from(code)
            .ok()
            .and_then(|c| c.checked_sub(1))
            .and_then(|i| self.values.get(i))
            .map(String::as_str)
            .ok_or(ReadError::MalformedDictionary {
                code,
                size: self.values.len(),
            })
    }

    /// Returns the lexicographically smallest and largest strings among
    /// codes `lo..=hi`, or `None` if the range is empty or leaves the
    /// dictionary.
    pub fn range_bounds(&self, lo: i32, hi: i32) -> Option<(&str, &str)> {
        if lo < 1 || hi < lo || hi as usize > self.values.len() {
            return None;
        }
        let slice = &self.values[lo as usize - 1..hi as usize];
        let min = slice.iter().min()?;
        let max = slice.iter().max()?;
        Some((min.as_str(), max.as_str()))
    }
}
