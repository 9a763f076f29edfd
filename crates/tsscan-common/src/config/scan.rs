//! Scan configuration.

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_FETCH_SIZE, DEFAULT_MAX_HEADER_SIZE, DEFAULT_MAX_PAGE_RAW_SIZE};

/// Configuration for column scans.
///
/// # Example
///
/// ```rust
/// use tsscan_common::config::ScanConfig;
///
/// let config = ScanConfig::default().with_verify_checksums(false);
/// assert!(!config.verify_checksums);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Verify the CRC32 of every page body that gets decoded.
    /// Skipped pages are never read, so never verified.
    /// Default: true
    pub verify_checksums: bool,

    /// Row budget used by `read_all` style helpers.
    /// Default: 4096
    pub default_fetch_size: usize,

    /// Largest decompressed page body accepted, in bytes.
    /// Default: 64 MB
    pub max_page_raw_size: usize,

    /// Largest encoded page header accepted, in bytes.
    /// Default: 64 KB
    pub max_header_size: usize,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            verify_checksums: true,
            default_fetch_size: DEFAULT_FETCH_SIZE,
            max_page_raw_size: DEFAULT_MAX_PAGE_RAW_SIZE,
            max_header_size: DEFAULT_MAX_HEADER_SIZE,
        }
    }
}

impl ScanConfig {
    /// Creates a configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether page checksums are verified.
    #[must_use]
    pub fn with_verify_checksums(mut self, verify: bool) -> Self {
        self.verify_checksums = verify;
        self
    }

    /// Sets the default fetch size.
    #[must_use]
    pub fn with_default_fetch_size(mut self, rows: usize) -> Self {
        self.default_fetch_size = rows;
        self
    }

    /// Sets the maximum decompressed page size.
    #[must_use]
    pub fn with_max_page_raw_size(mut self, size: usize) -> Self {
        self.max_page_raw_size = size;
        self
    }

    /// Sets the maximum encoded header size.
    #[must_use]
    pub fn with_max_header_size(mut self, size: usize) -> Self {
        self.max_header_size = size;
        self
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns a description of the first invalid setting.
    pub fn validate(&self) -> Result<(), String> {
        if self.default_fetch_size == 0 {
            return Err("default_fetch_size must be positive".to_string());
        }

        if self.max_header_size < crate::constants::PAGE_HEADER_FIXED_SIZE {
            return Err(format!(
                "max_header_size must be at least {} bytes",
                crate::constants::PAGE_HEADER_FIXED_SIZE
            ));
        }

        if self.max_page_raw_size == 0 {
            return Err("max_page_raw_size must be positive".to_string());
        }

        Ok(())
    }
}
