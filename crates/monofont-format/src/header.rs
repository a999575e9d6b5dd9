//! Font header and binary artifact constants.

use serde::{Deserialize, Serialize};

use crate::encoding::{BitOrder, GlyphEncoding, Mapping};

/// Second byte of every binary font file.
pub const BINARY_MAGIC: u8 = 0xE7;

/// Base value of the binary signature byte.
pub const BINARY_SIGNATURE_BASE: u8 = 0x3F;

/// Length of the binary font header: signature, magic, max width, height.
pub const BINARY_HEADER_LEN: usize = 4;

/// Sparse index offsets are stored shifted right by this many bits.
pub const SPARSE_OFFSET_SHIFT: u32 = 3;

/// Records in a sparse-indexed blob start on multiples of this.
pub const SPARSE_ALIGN: usize = 1 << SPARSE_OFFSET_SHIFT;

/// Largest blob offset a sparse index entry can address.
pub const MAX_SPARSE_OFFSET: usize = ((u16::MAX as usize) << SPARSE_OFFSET_SHIFT) | 7;

/// Largest blob offset a contiguous index entry can address.
pub const MAX_CONTIGUOUS_OFFSET: usize = u16::MAX as usize;

/// Which index accompanies the glyph blob.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndexKind {
    /// One 2-byte offset per ordinal in range.
    Contiguous,
    /// Sorted `(ordinal, offset / 8)` pairs.
    Sparse,
}

/// Font-wide properties recorded alongside the glyph blob.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FontHeader {
    /// Cell height in pixels (actual, not requested).
    pub height: u16,
    /// Rows from the top of the cell to the baseline.
    pub baseline: u16,
    /// Widest record in pixels.
    pub max_width: u16,
    /// Glyph encoding.
    pub encoding: GlyphEncoding,
    /// All records share `max_width`.
    pub monospaced: bool,
    /// Smallest ordinal in the indexed range.
    pub min_char: u32,
    /// Largest ordinal in the indexed range.
    pub max_char: u32,
    /// Ordinal of the default glyph stored at record 0.
    pub default_char: u32,
}

/// Signature byte offset for a binary font: bit 0 = row mapping, bit 1 = reversed.
///
/// | mapping | order    | header        |
/// |---------|----------|---------------|
/// | column  | normal   | `0x3F 0xE7`   |
/// | row     | normal   | `0x40 0xE7`   |
/// | column  | reversed | `0x41 0xE7`   |
/// | row     | reversed | `0x42 0xE7`   |
pub fn binary_signature(mapping: Mapping, order: BitOrder) -> u8 {
    let mut sig = match mapping {
        Mapping::Row => 1,
        Mapping::Column => 0,
    };
    if order.is_reversed() {
        sig += 2;
    }
    sig
}

/// Inverse of [`binary_signature`].
pub fn signature_encoding(sig: u8) -> Option<(Mapping, BitOrder)> {
    if sig > 3 {
        return None;
    }
    let mapping = if sig & 1 != 0 {
        Mapping::Row
    } else {
        Mapping::Column
    };
    let order = if sig & 2 != 0 {
        BitOrder::Reversed
    } else {
        BitOrder::Normal
    };
    Some((mapping, order))
}
