//! Column-level types shared by the scanner and its callers.

mod cursor;
mod data;
mod dictionary;
mod region;

pub use cursor::{ScanCursor, ScanOutcome};
pub use data::{ColumnData, ColumnValues};
pub use dictionary::EnumDictionary;
pub use region::ColumnRegion;
