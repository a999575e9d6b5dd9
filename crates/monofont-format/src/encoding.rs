//! Glyph encoding types.
//!
//! A glyph record stores its pixels either as a packed bitmap (row-major or
//! column-major, with either bit order) or as a line-run stream.

use serde::{Deserialize, Serialize};

/// Bit packing direction for bitmap encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Mapping {
    /// Row-major (hmap): each row packs into `ceil(width / 8)` bytes.
    Row,
    /// Column-major (vmap): each column packs into `ceil(height / 8)` bytes.
    #[default]
    Column,
}

/// Bit order within each packed byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum BitOrder {
    /// Row: MSB is the leftmost pixel. Column: LSB is the topmost pixel.
    #[default]
    Normal,
    /// Row: LSB is the leftmost pixel. Column: MSB is the topmost pixel.
    Reversed,
}

impl Mapping {
    /// Bit holding the `i`-th pixel (0..8) of a byte packed along this mapping.
    ///
    /// Pixels run left to right for rows and top to bottom for columns.
    pub fn bit_position(self, order: BitOrder, i: u32) -> u32 {
        match (self, order) {
            (Mapping::Row, BitOrder::Normal) | (Mapping::Column, BitOrder::Reversed) => 7 - i,
            (Mapping::Row, BitOrder::Reversed) | (Mapping::Column, BitOrder::Normal) => i,
        }
    }
}

impl BitOrder {
    /// Returns true for [`BitOrder::Reversed`].
    pub fn is_reversed(self) -> bool {
        matches!(self, BitOrder::Reversed)
    }
}

/// How glyph pixels are stored after the record's width prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GlyphEncoding {
    /// Packed bitmap.
    Bitmap {
        /// Packing direction.
        mapping: Mapping,
        /// Bit order within each byte.
        order: BitOrder,
    },
    /// Run lists per row or per column, chosen per glyph.
    LineRun,
}

impl Default for GlyphEncoding {
    fn default() -> Self {
        GlyphEncoding::Bitmap {
            mapping: Mapping::default(),
            order: BitOrder::default(),
        }
    }
}

impl GlyphEncoding {
    /// Shorthand for a bitmap encoding.
    pub fn bitmap(mapping: Mapping, order: BitOrder) -> Self {
        GlyphEncoding::Bitmap { mapping, order }
    }

    /// Stable name used in generated modules and metadata.
    pub fn as_str(&self) -> &'static str {
        match self {
            GlyphEncoding::Bitmap {
                mapping: Mapping::Row,
                order: BitOrder::Normal,
            } => "row_normal",
            GlyphEncoding::Bitmap {
                mapping: Mapping::Row,
                order: BitOrder::Reversed,
            } => "row_reversed",
            GlyphEncoding::Bitmap {
                mapping: Mapping::Column,
                order: BitOrder::Normal,
            } => "column_normal",
            GlyphEncoding::Bitmap {
                mapping: Mapping::Column,
                order: BitOrder::Reversed,
            } => "column_reversed",
            GlyphEncoding::LineRun => "line_run",
        }
    }

    /// Returns true if bitmap bytes are packed row by row.
    pub fn is_row_mapped(&self) -> bool {
        matches!(
            self,
            GlyphEncoding::Bitmap {
                mapping: Mapping::Row,
                ..
            }
        )
    }

    /// Returns true if bitmap bytes use the reversed bit order.
    pub fn is_reversed(&self) -> bool {
        matches!(
            self,
            GlyphEncoding::Bitmap {
                order: BitOrder::Reversed,
                ..
            }
        )
    }

    /// Number of bytes a bitmap of the given cell size occupies.
    ///
    /// Returns `None` for line-run, whose length depends on the pixels.
    pub fn bitmap_len(&self, width: usize, height: usize) -> Option<usize> {
        match self {
            GlyphEncoding::Bitmap {
                mapping: Mapping::Row,
                ..
            } => Some(width.div_ceil(8) * height),
            GlyphEncoding::Bitmap {
                mapping: Mapping::Column,
                ..
            } => Some(height.div_ceil(8) * width),
            GlyphEncoding::LineRun => None,
        }
    }
}
