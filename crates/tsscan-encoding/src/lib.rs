//! # tsscan-encoding
//!
//! Value codecs for the tsscan read path.
//!
//! This crate implements the decoding side of every page value layout:
//! - Fixed-width bit-packing in groups of eight (`bitpacking`)
//! - Second-order delta blocks used for timestamps (`delta`)
//! - Hybrid run-length / bit-packed integers (`rle`)
//! - Plain little-endian values (`plain`)
//! - Fixed-point floats over the integer codecs (`float`)
//!
//! Decoders are created through [`DecoderRegistry`], which maps an
//! `(Encoding, DataType)` pair to a constructor. Pairs without an entry are
//! rejected before any byte is decoded.
//!
//! # Layering
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │        DecoderRegistry / ValueDecoder        │
//! └──────────────────────────────────────────────┘
//!     │            │             │           │
//!     ▼            ▼             ▼           ▼
//! ┌────────┐ ┌──────────┐ ┌────────────┐ ┌───────┐
//! │ Plain  │ │   Rle    │ │ DeltaBlock │ │ Fixed │
//! │        │ │          │ │ (TS_2DIFF) │ │ Point │
//! └────────┘ └──────────┘ └────────────┘ └───────┘
//!                 │             │
//!                 ▼             ▼
//!            ┌─────────────────────┐
//!            │      BitPacker      │
//!            └─────────────────────┘
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

/// Fixed-width bit-packing.
pub mod bitpacking;

/// Unsigned LEB128 varints.
pub mod varint;

/// TS_2DIFF delta blocks.
pub mod delta;

/// Hybrid run-length / bit-packed integers.
pub mod rle;

/// Plain values.
pub mod plain;

/// Fixed-point floats.
pub mod float;

/// Decoder trait and registry.
pub mod decoder;

/// Fixture encoders mirroring every decoder.
#[cfg(any(test, feature = "test-utils"))]
pub mod encoder;

pub use bitpacking::{max_bit_width, BitPacker};
pub use decoder::{DecoderRegistry, ValueDecoder};
pub use delta::DeltaDecoder;
