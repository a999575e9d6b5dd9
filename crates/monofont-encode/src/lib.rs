//! monofont Encoder Backend
//!
//! Converts outline fonts into compact monochrome bitmap fonts for small
//! displays. Glyphs are rasterized at a pixel size fitted to the requested
//! cell height, placed on a common baseline and packed as row or column
//! bitmaps or line-run streams.
//!
//! # Outputs
//!
//! - **Rust module**: header constants, the glyph blob, a contiguous or sparse
//!   index and a dependency-free `get_ch` lookup
//! - **Binary font**: fixed-size records for printable ASCII, addressable
//!   without an index
//! - **Metadata**: an optional JSON sidecar with per-glyph offsets
//!
//! # Example
//!
//! ```no_run
//! use monofont_encode::{generate_font, save_font_result, OutlineRasterizer};
//! use monofont_format::ConvertParams;
//! use std::path::Path;
//!
//! let mut source = OutlineRasterizer::open(Path::new("FreeSans.ttf")).unwrap();
//! let params = ConvertParams::new(23).with_charset("0123456789:");
//! let result = generate_font(&mut source, &params).unwrap();
//! save_font_result(&result, Path::new("clock_font.rs"), None).unwrap();
//! ```
//!
//! Generation is deterministic: the same source and params produce
//! byte-identical artifacts.

pub mod artifact;
pub mod bitmap;
pub mod byte_writer;
pub mod charset;
pub mod encoded;
pub mod error;
pub mod font;
pub mod generate;
pub mod glyph;
pub mod line_run;
pub mod module;
pub mod raster;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use artifact::{hash_bytes, write_atomic, WrittenArtifact};
pub use bitmap::Bitmap;
pub use charset::CharacterSet;
pub use encoded::{EncodedFont, FontMetadata, GlyphMetadata, IndexTable, RecordInfo};
pub use error::EncodeError;
pub use font::{choose_index, Font, PlacedGlyph};
pub use generate::{generate_font, save_font_result, FontResult};
pub use glyph::Glyph;
pub use raster::{OutlineRasterizer, Rasterizer};
