//! View over the fixed-width binary font artifact.
//!
//! Layout: a 4-byte header `{0x3F + sig, 0xE7, max_width, height}` followed by
//! one record per character 32..=126. Each record is a 1-byte advance width
//! and a bitmap packed at `max_width` columns, so records are addressed
//! directly: `4 + (ordinal - 32) * record_len`.

use crate::encoding::GlyphEncoding;
use crate::error::FormatError;
use crate::font_data::{GlyphLookup, GlyphView};
use crate::header::{signature_encoding, BINARY_HEADER_LEN, BINARY_MAGIC, BINARY_SIGNATURE_BASE};
use crate::params::{MAX_CHAR, MIN_CHAR};

/// Borrowed view of a binary font file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BinaryFont<'a> {
    bytes: &'a [u8],
    encoding: GlyphEncoding,
    max_width: u8,
    height: u8,
}

impl<'a> BinaryFont<'a> {
    /// Parses the header of a binary font file.
    pub fn parse(bytes: &'a [u8]) -> Result<Self, FormatError> {
        if bytes.len() < BINARY_HEADER_LEN {
            return Err(FormatError::Truncated {
                expected: BINARY_HEADER_LEN,
                actual: bytes.len(),
            });
        }
        if bytes[1] != BINARY_MAGIC {
            return Err(FormatError::BadMagic {
                expected: BINARY_MAGIC,
                actual: bytes[1],
            });
        }
        let (mapping, order) = bytes[0]
            .checked_sub(BINARY_SIGNATURE_BASE)
            .and_then(signature_encoding)
            .ok_or(FormatError::UnknownSignature(bytes[0]))?;

        Ok(Self {
            bytes,
            encoding: GlyphEncoding::bitmap(mapping, order),
            max_width: bytes[2],
            height: bytes[3],
        })
    }

    /// Cell width shared by every record.
    pub fn max_width(&self) -> u8 {
        self.max_width
    }

    /// Length of one record: width byte plus packed cell.
    pub fn record_len(&self) -> usize {
        1 + self
            .encoding
            .bitmap_len(self.max_width as usize, self.height as usize)
            .unwrap_or(0)
    }

    /// Number of complete records present in the file.
    pub fn glyph_count(&self) -> usize {
        (self.bytes.len() - BINARY_HEADER_LEN) / self.record_len()
    }

    /// Resolves a printable ASCII character. Anything else, or a record past
    /// the end of a truncated file, returns `None`.
    pub fn glyph(&self, ch: char) -> Option<GlyphView<'a>> {
        let ordinal = ch as u32;
        if !(MIN_CHAR..=MAX_CHAR).contains(&ordinal) {
            return None;
        }
        let record_len = self.record_len();
        let start = BINARY_HEADER_LEN + (ordinal - MIN_CHAR) as usize * record_len;
        let record = self.bytes.get(start..start + record_len)?;
        Some(GlyphView {
            data: &record[1..],
            width: record[0] as u16,
            cell_width: self.max_width as u16,
            height: self.height as u16,
        })
    }
}

impl GlyphLookup for BinaryFont<'_> {
    fn height(&self) -> u16 {
        self.height as u16
    }

    fn encoding(&self) -> GlyphEncoding {
        self.encoding
    }

    fn lookup(&self, ch: char) -> Option<GlyphView<'_>> {
        self.glyph(ch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoding::{BitOrder, Mapping};

    fn sample(sig: u8) -> Vec<u8> {
        // 6 wide, 8 high, row mapped: 1 byte per row, 9 bytes per record
        let mut bytes = vec![BINARY_SIGNATURE_BASE + sig, BINARY_MAGIC, 6, 8];
        for ord in MIN_CHAR..=MAX_CHAR {
            bytes.push((ord % 6) as u8 + 1);
            bytes.extend([ord as u8; 8]);
        }
        bytes
    }

    #[test]
    fn test_parse_and_address_records() {
        let bytes = sample(1);
        let font = BinaryFont::parse(&bytes).unwrap();
        assert_eq!(
            font.encoding(),
            GlyphEncoding::bitmap(Mapping::Row, BitOrder::Normal)
        );
        assert_eq!(font.record_len(), 9);
        assert_eq!(font.glyph_count(), 95);

        let glyph = font.glyph('A').unwrap();
        assert_eq!(glyph.width, (65 % 6) + 1);
        assert_eq!(glyph.cell_width, 6);
        assert_eq!(glyph.data, &[65u8; 8]);
        assert!(font.glyph('\u{7f}').is_none());
        assert!(font.glyph('\u{1f}').is_none());
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            BinaryFont::parse(&[0x3F, 0xE7]),
            Err(FormatError::Truncated {
                expected: 4,
                actual: 2
            })
        );
        assert_eq!(
            BinaryFont::parse(&[0x3F, 0x00, 1, 1]),
            Err(FormatError::BadMagic {
                expected: 0xE7,
                actual: 0
            })
        );
        assert_eq!(
            BinaryFont::parse(&[0x43, 0xE7, 1, 1]),
            Err(FormatError::UnknownSignature(0x43))
        );
        assert_eq!(
            BinaryFont::parse(&[0x10, 0xE7, 1, 1]),
            Err(FormatError::UnknownSignature(0x10))
        );
    }

    #[test]
    fn test_truncated_file_returns_none() {
        let mut bytes = sample(3);
        bytes.truncate(4 + 9 * 10 + 4);
        let font = BinaryFont::parse(&bytes).unwrap();
        assert!(font.glyph(' ').is_some());
        assert!(font.glyph('*').is_none());
    }
}
