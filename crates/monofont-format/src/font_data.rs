//! Zero-copy view over an encoded font.
//!
//! [`FontData`] borrows an immutable glyph blob and index, typically the
//! `FONT` and `INDEX`/`SPARSE` constants of a generated module, and resolves
//! characters to glyph records.

use byteorder::{ByteOrder, LittleEndian};

use crate::encoding::GlyphEncoding;
use crate::header::{FontHeader, IndexKind, SPARSE_OFFSET_SHIFT};
use crate::line_run;

/// Size of one sparse index entry: ordinal (2 bytes) + offset / 8 (2 bytes).
const SPARSE_ENTRY_LEN: usize = 4;

/// The index accompanying a glyph blob.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Index<'a> {
    /// `[min, min + 1, ..., max, end]` 2-byte offsets; gaps hold 0.
    Contiguous(&'a [u8]),
    /// `(ordinal, offset >> 3)` pairs sorted by ordinal.
    Sparse(&'a [u8]),
}

impl Index<'_> {
    /// Which kind of index this is.
    pub fn kind(&self) -> IndexKind {
        match self {
            Index::Contiguous(_) => IndexKind::Contiguous,
            Index::Sparse(_) => IndexKind::Sparse,
        }
    }
}

/// Binary search of a sparse index table.
///
/// Returns the byte offset of the record for `ordinal`, or `None` when the
/// ordinal has no entry.
pub fn sparse_lookup(table: &[u8], ordinal: u32) -> Option<usize> {
    if ordinal > u16::MAX as u32 {
        return None;
    }
    let mut lo = 0usize;
    let mut hi = table.len() / SPARSE_ENTRY_LEN;
    while lo < hi {
        let mid = lo + (hi - lo) / 2;
        let entry = &table[mid * SPARSE_ENTRY_LEN..(mid + 1) * SPARSE_ENTRY_LEN];
        let key = LittleEndian::read_u16(&entry[..2]) as u32;
        match key.cmp(&ordinal) {
            std::cmp::Ordering::Equal => {
                let offset = LittleEndian::read_u16(&entry[2..]) as usize;
                return Some(offset << SPARSE_OFFSET_SHIFT);
            }
            std::cmp::Ordering::Less => lo = mid + 1,
            std::cmp::Ordering::Greater => hi = mid,
        }
    }
    None
}

/// A glyph record resolved from a font.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlyphView<'a> {
    /// Encoded pixel bytes (without the width prefix).
    pub data: &'a [u8],
    /// Advance width in pixels.
    pub width: u16,
    /// Width the bitmap bytes were packed with.
    ///
    /// Equal to `width` except in binary fonts, whose cells all share the
    /// font's maximum width.
    pub cell_width: u16,
    /// Cell height in pixels.
    pub height: u16,
}

impl GlyphView<'_> {
    /// A zero-width glyph with no pixels.
    pub fn empty(height: u16) -> Self {
        GlyphView {
            data: &[],
            width: 0,
            cell_width: 0,
            height,
        }
    }
}

/// Anything the renderer can pull glyphs from.
pub trait GlyphLookup {
    /// Cell height in pixels.
    fn height(&self) -> u16;

    /// Encoding of every glyph record.
    fn encoding(&self) -> GlyphEncoding;

    /// Resolves a character. `None` means the character has no glyph and
    /// nothing should be drawn or advanced.
    fn lookup(&self, ch: char) -> Option<GlyphView<'_>>;
}

/// Borrowed view of an encoded font: header, glyph blob and index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FontData<'a> {
    /// Font-wide properties.
    pub header: FontHeader,
    /// Concatenated glyph records.
    pub data: &'a [u8],
    /// Index into `data`.
    pub index: Index<'a>,
}

impl<'a> FontData<'a> {
    /// Creates a view from its parts.
    pub fn new(header: FontHeader, data: &'a [u8], index: Index<'a>) -> Self {
        Self {
            header,
            data,
            index,
        }
    }

    /// Byte offset of the record for `ordinal`, falling back to record 0.
    pub fn offset_of(&self, ordinal: u32) -> usize {
        match self.index {
            Index::Contiguous(table) => {
                if !(self.header.min_char..=self.header.max_char).contains(&ordinal) {
                    return 0;
                }
                let slot = (ordinal - self.header.min_char) as usize;
                table
                    .get(slot * 2..slot * 2 + 2)
                    .map(|b| LittleEndian::read_u16(b) as usize)
                    .unwrap_or(0)
            }
            Index::Sparse(table) => sparse_lookup(table, ordinal).unwrap_or(0),
        }
    }

    /// Resolves `ch` to its glyph, substituting the default glyph for
    /// characters the font does not contain.
    ///
    /// Never fails: a corrupt offset yields an empty glyph.
    pub fn glyph(&self, ch: char) -> GlyphView<'a> {
        let height = self.header.height;
        let offset = self.offset_of(ch as u32);
        let Some(prefix) = self.data.get(offset..offset + 2) else {
            return GlyphView::empty(height);
        };
        let width = LittleEndian::read_u16(prefix);
        let body = &self.data[offset + 2..];

        let len = match self.header.encoding.bitmap_len(width as usize, height as usize) {
            Some(len) => len,
            None => line_run::stream_len(body),
        };
        GlyphView {
            data: &body[..len.min(body.len())],
            width,
            cell_width: width,
            height,
        }
    }
}

impl GlyphLookup for FontData<'_> {
    fn height(&self) -> u16 {
        self.header.height
    }

    fn encoding(&self) -> GlyphEncoding {
        self.header.encoding
    }

    fn lookup(&self, ch: char) -> Option<GlyphView<'_>> {
        Some(self.glyph(ch))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoding::{BitOrder, Mapping};
    use pretty_assertions::assert_eq;

    fn header(min_char: u32, max_char: u32) -> FontHeader {
        FontHeader {
            height: 8,
            baseline: 6,
            max_width: 8,
            encoding: GlyphEncoding::bitmap(Mapping::Row, BitOrder::Normal),
            monospaced: false,
            min_char,
            max_char,
            default_char: 63,
        }
    }

    fn record(width: u16, fill: u8) -> Vec<u8> {
        let mut rec = vec![0u8; 2];
        LittleEndian::write_u16(&mut rec, width);
        rec.extend(std::iter::repeat(fill).take(8 * (width as usize).div_ceil(8)));
        rec
    }

    #[test]
    fn test_contiguous_lookup_and_fallback() {
        // records: default, 'A', 'C'; 'B' is a gap
        let mut data = record(5, 0xAA);
        let a = data.len();
        data.extend(record(6, 0x11));
        let c = data.len();
        data.extend(record(7, 0x22));
        let end = data.len();

        let mut index = Vec::new();
        for off in [a, 0, c, end] {
            index.extend((off as u16).to_le_bytes());
        }
        let font = FontData::new(header(65, 67), &data, Index::Contiguous(&index));

        assert_eq!(font.glyph('A').width, 6);
        assert_eq!(font.glyph('A').data, &[0x11; 8]);
        assert_eq!(font.glyph('C').width, 7);
        assert_eq!(font.glyph('B').width, 5);
        assert_eq!(font.glyph('z').width, 5);
        assert_eq!(font.glyph('\u{1F600}').data, &[0xAA; 8]);
    }

    #[test]
    fn test_sparse_lookup_found_and_missing() {
        let ordinals = [32u16, 40, 1000, 5000, 60000];
        let mut table = Vec::new();
        for (i, ord) in ordinals.iter().enumerate() {
            table.extend(ord.to_le_bytes());
            table.extend((i as u16 * 3).to_le_bytes());
        }
        for (i, ord) in ordinals.iter().enumerate() {
            assert_eq!(sparse_lookup(&table, *ord as u32), Some(i * 3 * 8));
        }
        for missing in [0, 33, 999, 1001, 4999, 59999, 60001, 70000] {
            assert_eq!(sparse_lookup(&table, missing), None);
        }
        assert_eq!(sparse_lookup(&[], 32), None);
    }

    #[test]
    fn test_corrupt_offset_yields_empty_glyph() {
        let data = record(5, 0xFF);
        let index = [0xFF, 0xFF, 0, 0];
        let font = FontData::new(header(65, 65), &data, Index::Contiguous(&index));
        let glyph = font.glyph('A');
        assert_eq!(glyph.width, 0);
        assert!(glyph.data.is_empty());
    }

    #[test]
    fn test_bitmap_record_is_clamped_to_blob() {
        // width claims 16 columns but only 3 bytes follow
        let data = [16, 0, 1, 2, 3];
        let index = [0, 0, 5, 0];
        let font = FontData::new(header(65, 65), &data, Index::Contiguous(&index));
        assert_eq!(font.glyph('A').data, &[1, 2, 3]);
    }
}
