//! monofont Canonical Format Library
//!
//! This crate defines the on-device font format shared by the encoder and the
//! renderer: glyph encodings, the font header, conversion parameters and their
//! validation, and zero-copy views over encoded font data.
//!
//! # Overview
//!
//! An encoded font is a glyph-data blob plus an index:
//!
//! - **Glyph records**: a 2-byte little-endian width followed by the glyph's
//!   encoded bytes (row bitmap, column bitmap, or line-run)
//! - **Contiguous index**: one 2-byte offset per ordinal in range, used when the
//!   character set is dense
//! - **Sparse index**: `(ordinal, offset / 8)` pairs sorted by ordinal, searched
//!   with a binary search
//!
//! Record 0 is always the default glyph. Lookups of unknown characters resolve
//! to it, so rendering never fails on arbitrary text.
//!
//! # Example
//!
//! ```
//! use monofont_format::{ConvertParams, Mapping, validate_params};
//!
//! let params = ConvertParams::new(20)
//!     .with_mapping(Mapping::Row)
//!     .with_monospaced(true);
//!
//! let result = validate_params(&params);
//! assert!(result.is_ok());
//! ```
//!
//! # Modules
//!
//! - [`encoding`]: Mapping, bit order and glyph encoding types
//! - [`error`]: Validation and format error types
//! - [`header`]: Font header and binary artifact constants
//! - [`params`]: Conversion parameters
//! - [`validation`]: Parameter validation and charset normalization
//! - [`font_data`]: Zero-copy view over an encoded font and its index
//! - [`binary`]: View over the fixed-width binary artifact
//! - [`line_run`]: Line-run stream reader

pub mod binary;
pub mod encoding;
pub mod error;
pub mod font_data;
pub mod header;
pub mod line_run;
pub mod params;
pub mod validation;

// Re-export commonly used types at the crate root
pub use binary::BinaryFont;
pub use encoding::{BitOrder, GlyphEncoding, Mapping};
pub use error::{
    ErrorCode, FormatError, ValidationError, ValidationResult, ValidationWarning, WarningCode,
};
pub use font_data::{sparse_lookup, FontData, GlyphLookup, GlyphView, Index};
pub use header::{FontHeader, IndexKind, BINARY_HEADER_LEN, BINARY_MAGIC};
pub use line_run::{LineOrientation, LineRuns, RunLine};
pub use params::{ConvertParams, OutputKind, DEFAULT_CHAR, MAX_CHAR, MIN_CHAR};
pub use validation::{normalize_charset, validate_params};
