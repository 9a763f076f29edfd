//! # tsscan-common
//!
//! Common types, errors, and configuration for the tsscan read path.
//!
//! This crate provides the foundational types shared by the codec, storage
//! and reader crates:
//!
//! - **Types**: column `DataType`, page value `Encoding`, typed `Value`
//! - **Errors**: unified read error handling with `ReadError`
//! - **Config**: `ScanConfig` knobs for page framing and verification
//! - **Constants**: format limits and defaults
//!
//! ## Example
//!
//! ```rust
//! use tsscan_common::error::ReadResult;
//! use tsscan_common::types::{DataType, Encoding, Value};
//!
//! fn example() -> ReadResult<()> {
//!     let data_type = DataType::from_u8(1).unwrap();
//!     assert_eq!(data_type, DataType::Int32);
//!     assert!(Encoding::Rle.is_bit_packed());
//!     assert_eq!(Value::Int32(7).data_type(), DataType::Int32);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod constants;
pub mod error;
pub mod types;

// Re-export commonly used items at the crate root
pub use config::ScanConfig;
pub use error::{ErrorCode, ReadError, ReadResult};
pub use types::{DataType, Encoding, Value};
