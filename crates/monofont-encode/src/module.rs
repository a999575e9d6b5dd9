//! Rust source module emitter.
//!
//! The generated file has no dependencies: header constants, the glyph blob,
//! its index and a `get_ch` lookup, optionally with a `glyphs()` iterator.

use std::fmt::Write;

use monofont_format::{GlyphEncoding, Mapping};

use crate::byte_writer::ByteWriter;
use crate::encoded::{EncodedFont, IndexTable};
use crate::font::Font;

/// Version stamped into generated modules.
pub const GENERATOR_VERSION: &str = env!("CARGO_PKG_VERSION");

const READ_U16: &str = "
fn read_u16(bytes: &[u8], at: usize) -> usize {
    bytes[at] as usize | (bytes[at + 1] as usize) << 8
}
";

const CONTIGUOUS_OFFSET: &str = "
fn glyph_offset(ch: char) -> usize {
    let ordinal = ch as u32;
    if !(MIN_CHAR..=MAX_CHAR).contains(&ordinal) {
        return 0;
    }
    read_u16(INDEX, 2 * (ordinal - MIN_CHAR) as usize)
}
";

const SPARSE_OFFSET: &str = "
fn glyph_offset(ch: char) -> usize {
    let ordinal = ch as usize;
    let mut lo = 0;
    let mut hi = SPARSE.len() / 4;
    while lo < hi {
        let mid = (lo + hi) / 2;
        let key = read_u16(SPARSE, 4 * mid);
        if key == ordinal {
            return read_u16(SPARSE, 4 * mid + 2) << 3;
        } else if key < ordinal {
            lo = mid + 1;
        } else {
            hi = mid;
        }
    }
    0
}
";

const ROW_LEN: &str = "
fn glyph_len(width: usize, _body: &[u8]) -> usize {
    width.div_ceil(8) * HEIGHT as usize
}
";

const COLUMN_LEN: &str = "
fn glyph_len(width: usize, _body: &[u8]) -> usize {
    (HEIGHT as usize).div_ceil(8) * width
}
";

const LINE_RUN_LEN: &str = "
fn glyph_len(_width: usize, body: &[u8]) -> usize {
    let mut pos = 2;
    for _ in 0..body[1] {
        let runs = body[pos] as usize;
        pos += if runs == 0 { 1 } else { 2 + 2 * runs };
    }
    pos
}
";

const GET_CH: &str = "
/// Returns the encoded glyph of `ch` with the font height and glyph width.
/// Characters the font lacks map to the default glyph.
pub fn get_ch(ch: char) -> (&'static [u8], u16, u16) {
    let offset = glyph_offset(ch);
    let width = read_u16(FONT, offset);
    let body = &FONT[offset + 2..];
    (&body[..glyph_len(width, body)], HEIGHT, width as u16)
}
";

const GLYPHS: &str = "
/// Iterates over every encoded character with its glyph.
pub fn glyphs() -> impl Iterator<Item = (char, (&'static [u8], u16, u16))> {
    CHARS.chars().map(|ch| (ch, get_ch(ch)))
}
";

/// Generates the module source for an encoded font.
pub fn write_module(
    font: &Font,
    encoded: &EncodedFont,
    iterate: bool,
) -> Result<String, std::fmt::Error> {
    let header = &encoded.header;
    let mut out = String::with_capacity(encoded.data.len() * 4 + 4096);

    writeln!(
        out,
        "// Code generated by monofont {GENERATOR_VERSION} from {}. Do not edit.",
        font.source()
    )?;
    writeln!(
        out,
        "// Requested height {}, {} encoding, {:?} index.",
        font.requested_height(),
        header.encoding.as_str(),
        encoded.index.kind()
    )?;
    writeln!(out)?;
    writeln!(out, "#![allow(dead_code)]")?;
    writeln!(out)?;
    writeln!(out, "pub const VERSION: &str = {GENERATOR_VERSION:?};")?;
    writeln!(out, "pub const HEIGHT: u16 = {};", header.height)?;
    writeln!(out, "pub const BASELINE: u16 = {};", header.baseline)?;
    writeln!(out, "pub const MAX_WIDTH: u16 = {};", header.max_width)?;
    writeln!(out, "pub const ENCODING: &str = {:?};", header.encoding.as_str())?;
    writeln!(out, "pub const ROW_MAPPED: bool = {};", header.encoding.is_row_mapped())?;
    writeln!(out, "pub const REVERSED: bool = {};", header.encoding.is_reversed())?;
    writeln!(
        out,
        "pub const LINE_RUN: bool = {};",
        header.encoding == GlyphEncoding::LineRun
    )?;
    writeln!(out, "pub const MONOSPACED: bool = {};", header.monospaced)?;
    writeln!(out, "pub const MIN_CHAR: u32 = {};", header.min_char)?;
    writeln!(out, "pub const MAX_CHAR: u32 = {};", header.max_char)?;
    writeln!(out, "pub const DEFAULT_CHAR: u32 = {};", header.default_char)?;
    writeln!(out)?;

    let mut blob = ByteWriter::new(&mut out, "FONT")?;
    blob.bytes(&encoded.data)?;
    blob.finish()?;
    writeln!(out)?;

    let (name, offset_fn) = match &encoded.index {
        IndexTable::Contiguous(_) => ("INDEX", CONTIGUOUS_OFFSET),
        IndexTable::Sparse(_) => ("SPARSE", SPARSE_OFFSET),
    };
    let mut index = ByteWriter::new(&mut out, name)?;
    index.bytes(encoded.index.bytes())?;
    index.finish()?;

    if iterate {
        let mut chars = font.charset().render_order();
        chars.sort_unstable();
        let chars: String = chars.into_iter().collect();
        writeln!(out)?;
        writeln!(out, "const CHARS: &str = {chars:?};")?;
    }

    out.push_str(READ_U16);
    out.push_str(offset_fn);
    out.push_str(match header.encoding {
        GlyphEncoding::Bitmap {
            mapping: Mapping::Row,
            ..
        } => ROW_LEN,
        GlyphEncoding::Bitmap {
            mapping: Mapping::Column,
            ..
        } => COLUMN_LEN,
        GlyphEncoding::LineRun => LINE_RUN_LEN,
    });
    out.push_str(GET_CH);
    if iterate {
        out.push_str(GLYPHS);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::BlockRasterizer;
    use monofont_format::ConvertParams;

    fn generate(params: &ConvertParams) -> String {
        let mut raster = BlockRasterizer::new();
        let font = Font::new(&mut raster, params).unwrap();
        let encoded = font.encode(params.encoding()).unwrap();
        write_module(&font, &encoded, params.iterate).unwrap()
    }

    #[test]
    fn test_contiguous_module() {
        let source = generate(&ConvertParams::new(12));
        assert!(source.starts_with("// Code generated by monofont"));
        assert!(source.contains("pub const HEIGHT: u16 = 12;"));
        assert!(source.contains("pub const ENCODING: &str = \"column_normal\";"));
        assert!(source.contains("pub const INDEX: &[u8] = b\""));
        assert!(source.contains("(HEIGHT as usize).div_ceil(8) * width"));
        assert!(source.contains("pub fn get_ch(ch: char) -> (&'static [u8], u16, u16)"));
        assert!(!source.contains("SPARSE"));
        assert!(!source.contains("pub fn glyphs()"));
    }

    #[test]
    fn test_sparse_line_run_module_with_iterator() {
        let params = ConvertParams::new(10)
            .with_charset("A\u{2603}")
            .with_line_run(true)
            .with_iterate(true);
        let source = generate(&params);
        assert!(source.contains("pub const SPARSE: &[u8] = b\""));
        assert!(source.contains("pub const LINE_RUN: bool = true;"));
        assert!(source.contains("const CHARS: &str = \"?A\u{2603}\";"));
        assert!(source.contains("pub fn glyphs()"));
        assert!(!source.contains("pub const INDEX"));
    }

    #[test]
    fn test_row_mapped_module() {
        let params = ConvertParams::new(10).with_mapping(Mapping::Row);
        let source = generate(&params);
        assert!(source.contains("pub const ROW_MAPPED: bool = true;"));
        assert!(source.contains("width.div_ceil(8) * HEIGHT as usize"));
    }
}
