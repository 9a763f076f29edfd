//! Core types for tsscan.
//!
//! - [`DataType`]: the physical type of a column's values
//! - [`Encoding`]: the codec a page uses for its value channel
//! - [`Value`]: one decoded value, tagged by its type

mod data_type;
mod encoding;
mod value;

pub use data_type::DataType;
pub use encoding::Encoding;
pub use value::Value;
