//! Resumable scan position.

/// Where the next scan call resumes.
///
/// The cursor is owned by the caller and passed to every
/// [`ColumnScanner::scan`](crate::ColumnScanner::scan) call. A fresh cursor
/// starts at the beginning of the column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScanCursor {
    /// Absolute offset of the next page, `None` at the start of a column.
    pub page_offset: Option<u64>,
    /// Bytes of the column left after `page_offset`.
    pub left_size: u64,
    /// Index of the row group being scanned.
    pub row_group_index: usize,
}

impl ScanCursor {
    /// Creates a cursor at the start of row group 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a cursor at the start of `row_group_index`.
    pub fn for_row_group(row_group_index: usize) -> Self {
        Self {
            row_group_index,
            ..Self::default()
        }
    }

    /// Returns true if the cursor points at the start of a column.
    pub fn at_column_start(&self) -> bool {
        self.page_offset.is_none()
    }

    /// Moves to the start of the next row group.
    pub fn advance_row_group(&mut self) {
        self.row_group_index += 1;
        self.page_offset = None;
        self.left_size = 0;
    }
}

/// Result of one scan call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScanOutcome {
    /// Pairs appended by this call.
    pub rows: usize,
    /// The column has no more pages; the cursor moved to the next row group.
    pub column_exhausted: bool,
    /// The column digest excluded the whole column; nothing was read and
    /// the cursor was left untouched.
    pub column_pruned: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_row_group() {
        let mut cursor = ScanCursor {
            page_offset: Some(128),
            left_size: 64,
            row_group_index: 2,
        };
        assert!(!cursor.at_column_start());
        cursor.advance_row_group();
        assert_eq!(cursor, ScanCursor::for_row_group(3));
        assert!(cursor.at_column_start());
    }
}
