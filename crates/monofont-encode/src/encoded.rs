//! Owned encoded font and its metadata sidecar.

use monofont_format::{FontData, FontHeader, Index, IndexKind, OutputKind};
use serde::{Deserialize, Serialize};

use crate::font::Font;

/// Index bytes accompanying an encoded blob.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndexTable {
    /// 2-byte offsets for `min..=max`, then the end offset.
    Contiguous(Vec<u8>),
    /// Sorted `(ordinal, offset >> 3)` pairs.
    Sparse(Vec<u8>),
}

impl IndexTable {
    /// Which kind of index this is.
    pub fn kind(&self) -> IndexKind {
        match self {
            IndexTable::Contiguous(_) => IndexKind::Contiguous,
            IndexTable::Sparse(_) => IndexKind::Sparse,
        }
    }

    /// Raw index bytes.
    pub fn bytes(&self) -> &[u8] {
        match self {
            IndexTable::Contiguous(b) | IndexTable::Sparse(b) => b,
        }
    }
}

/// Where one glyph record landed in the blob.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordInfo {
    /// Character ordinal.
    pub ordinal: u32,
    /// The character itself.
    pub character: char,
    /// Byte offset of the record.
    pub offset: usize,
    /// Record length including the width prefix.
    pub len: usize,
}

/// A font encoded as blob plus index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedFont {
    /// Font-wide properties.
    pub header: FontHeader,
    /// Concatenated glyph records; record 0 is the default glyph.
    pub data: Vec<u8>,
    /// Index into `data`.
    pub index: IndexTable,
    /// Records in blob order.
    pub records: Vec<RecordInfo>,
}

impl EncodedFont {
    /// Borrows the font as the view a renderer consumes.
    pub fn as_font_data(&self) -> FontData<'_> {
        let index = match &self.index {
            IndexTable::Contiguous(b) => Index::Contiguous(b),
            IndexTable::Sparse(b) => Index::Sparse(b),
        };
        FontData::new(self.header, &self.data, index)
    }
}

/// JSON sidecar describing a generated artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FontMetadata {
    /// Outline source label.
    pub source: String,
    /// Artifact kind.
    pub output: OutputKind,
    /// Height asked for.
    pub requested_height: u32,
    /// Pixel size the source was rasterized at.
    pub pixel_size: u32,
    /// Height-fitting passes run.
    pub fit_passes: usize,
    /// Font header. `default_char` is 0 for binary fonts.
    pub header: FontHeader,
    /// Index kind; absent for binary fonts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<IndexKind>,
    /// Glyph blob length in bytes.
    pub data_len: usize,
    /// Index length in bytes.
    pub index_len: usize,
    /// Per-glyph records in blob order.
    pub glyphs: Vec<GlyphMetadata>,
}

/// Per-glyph entry of [`FontMetadata`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlyphMetadata {
    /// Character ordinal.
    pub ordinal: u32,
    /// The character itself.
    pub character: char,
    /// Record (cell) width.
    pub width: u32,
    /// The glyph's own width before monospacing.
    pub char_width: u32,
    /// Byte offset of the record in the artifact.
    pub offset: usize,
    /// Record length in bytes.
    pub len: usize,
}

impl FontMetadata {
    /// Describes a module artifact.
    pub fn for_module(font: &Font, encoded: &EncodedFont) -> Self {
        let glyphs = encoded
            .records
            .iter()
            .map(|r| {
                let placed = font.glyph(r.character);
                GlyphMetadata {
                    ordinal: r.ordinal,
                    character: r.character,
                    width: placed.map_or(0, |g| g.cell.width()),
                    char_width: placed.map_or(0, |g| g.char_width),
                    offset: r.offset,
                    len: r.len,
                }
            })
            .collect();
        Self {
            source: font.source().to_string(),
            output: OutputKind::Module,
            requested_height: font.requested_height(),
            pixel_size: font.pixel_size(),
            fit_passes: font.passes(),
            header: encoded.header,
            index: Some(encoded.index.kind()),
            data_len: encoded.data.len(),
            index_len: encoded.index.bytes().len(),
            glyphs,
        }
    }

    /// Describes a binary artifact of `len` bytes with fixed-size records.
    pub fn for_binary(font: &Font, header: FontHeader, record_len: usize, len: usize) -> Self {
        let glyphs = font
            .glyphs()
            .map(|g| GlyphMetadata {
                ordinal: g.ch as u32,
                character: g.ch,
                width: font.max_width(),
                char_width: g.char_width,
                offset: monofont_format::BINARY_HEADER_LEN
                    + (g.ch as u32).saturating_sub(header.min_char) as usize * record_len,
                len: record_len,
            })
            .collect();
        Self {
            source: font.source().to_string(),
            output: OutputKind::Binary,
            requested_height: font.requested_height(),
            pixel_size: font.pixel_size(),
            fit_passes: font.passes(),
            header,
            index: None,
            data_len: len,
            index_len: 0,
            glyphs,
        }
    }

    /// Serializes as pretty JSON.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
