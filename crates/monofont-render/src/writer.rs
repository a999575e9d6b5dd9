//! Text rendering onto surfaces.

use monofont_format::{
    BitOrder, GlyphEncoding, GlyphLookup, GlyphView, LineOrientation, LineRuns, Mapping,
};

use crate::surface::Surface;

/// Text position in surface pixels; the top-left of the next glyph cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cursor {
    /// Column.
    pub x: i32,
    /// Row.
    pub y: i32,
}

/// Draws text in one font.
///
/// Each writer owns its cursor, so several writers can share a font and a
/// surface.
///
/// # Example
///
/// ```
/// use monofont_format::{FontData, FontHeader, GlyphEncoding, Index};
/// use monofont_render::{MonoBuffer, Writer};
///
/// // one 2x2 glyph, fully lit, used for every character
/// let header = FontHeader {
///     height: 2,
///     baseline: 2,
///     max_width: 2,
///     encoding: GlyphEncoding::default(),
///     monospaced: true,
///     min_char: 65,
///     max_char: 65,
///     default_char: 65,
/// };
/// let data = [2, 0, 0b11, 0b11];
/// let index = [0, 0, 4, 0];
/// let font = FontData::new(header, &data, Index::Contiguous(&index));
///
/// let mut screen = MonoBuffer::new(8, 2);
/// let mut writer = Writer::new(&font);
/// writer.draw_text(&mut screen, "AB");
/// assert_eq!(screen.to_ascii('#', '.'), "####....\n####....\n");
/// ```
#[derive(Debug, Clone)]
pub struct Writer<'f, F: ?Sized> {
    font: &'f F,
    cursor: Cursor,
    inverse: bool,
}

impl<'f, F: GlyphLookup + ?Sized> Writer<'f, F> {
    /// Creates a writer at the origin.
    pub fn new(font: &'f F) -> Self {
        Self {
            font,
            cursor: Cursor::default(),
            inverse: false,
        }
    }

    /// Draws lit cells with unlit glyph pixels.
    pub fn with_inverse(mut self, inverse: bool) -> Self {
        self.inverse = inverse;
        self
    }

    /// Current cursor.
    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// Moves the cursor.
    pub fn set_cursor(&mut self, x: i32, y: i32) {
        self.cursor = Cursor { x, y };
    }

    /// Returns to column 0 and moves down one cell height.
    pub fn newline(&mut self) {
        self.cursor.x = 0;
        self.cursor.y += self.font.height() as i32;
    }

    /// Width in pixels `text` would advance, ignoring wrapping.
    pub fn text_width(&self, text: &str) -> u32 {
        text.chars()
            .filter_map(|ch| self.font.lookup(ch))
            .map(|g| g.width as u32)
            .sum()
    }

    /// Draws every character of `text`.
    pub fn draw_text<S: Surface + ?Sized>(&mut self, surface: &mut S, text: &str) {
        for ch in text.chars() {
            self.draw_char(surface, ch);
        }
    }

    /// Draws one character and advances the cursor by its width.
    ///
    /// `'\n'` starts a new line. A glyph that would cross the right edge
    /// starts a new line first, unless the cursor is already at column 0.
    /// Characters the font cannot resolve are skipped.
    pub fn draw_char<S: Surface + ?Sized>(&mut self, surface: &mut S, ch: char) {
        if ch == '\n' {
            self.newline();
            return;
        }
        let Some(glyph) = self.font.lookup(ch) else {
            return;
        };
        let width = glyph.width as i32;
        if self.cursor.x > 0 && self.cursor.x + width > surface.width() as i32 {
            self.newline();
        }

        let Cursor { x, y } = self.cursor;
        let on = !self.inverse;
        if self.inverse {
            for row in 0..glyph.height as i32 {
                surface.hline(x, y + row, glyph.width as u32, true);
            }
        }
        match self.font.encoding() {
            GlyphEncoding::Bitmap { mapping, order } => {
                draw_bitmap(surface, &glyph, mapping, order, x, y, on)
            }
            GlyphEncoding::LineRun => draw_line_runs(surface, glyph.data, x, y, on),
        }
        self.cursor.x += width;
    }
}

fn draw_bitmap<S: Surface + ?Sized>(
    surface: &mut S,
    glyph: &GlyphView<'_>,
    mapping: Mapping,
    order: BitOrder,
    x: i32,
    y: i32,
    on: bool,
) {
    let cell_width = glyph.cell_width as usize;
    let height = glyph.height as usize;
    let cols = glyph.width.min(glyph.cell_width) as usize;
    for row in 0..height {
        for col in 0..cols {
            let (index, i) = match mapping {
                Mapping::Row => (row * cell_width.div_ceil(8) + col / 8, col % 8),
                Mapping::Column => (col * height.div_ceil(8) + row / 8, row % 8),
            };
            let Some(&byte) = glyph.data.get(index) else {
                continue;
            };
            if byte & (1 << mapping.bit_position(order, i as u32)) != 0 {
                surface.pixel(x + col as i32, y + row as i32, on);
            }
        }
    }
}

fn draw_line_runs<S: Surface + ?Sized>(
    surface: &mut S,
    stream: &[u8],
    x: i32,
    y: i32,
    on: bool,
) {
    let Some(lines) = LineRuns::parse(stream) else {
        return;
    };
    let orientation = lines.orientation();
    for line in lines {
        let l = line.line as i32;
        for (start, len) in line.runs() {
            let (start, len) = (start as i32, len as u32);
            match orientation {
                LineOrientation::Horizontal => surface.hline(x + start, y + l, len, on),
                LineOrientation::Vertical => surface.vline(x + l, y + start, len, on),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::MonoBuffer;
    use monofont_format::{FontData, FontHeader, Index};
    use pretty_assertions::assert_eq;

    /// 'A' (65) is a 3x3 frame, 'B' (66) an empty gap, '?' (63) a 2-wide bar.
    struct Fixture {
        data: Vec<u8>,
        index: Vec<u8>,
        encoding: GlyphEncoding,
    }

    impl Fixture {
        fn new(encoding: GlyphEncoding, a: &[u8], default: &[u8]) -> Self {
            let mut data = vec![2, 0];
            data.extend_from_slice(default);
            let a_off = data.len() as u16;
            data.extend_from_slice(&[3, 0]);
            data.extend_from_slice(a);
            let end = data.len() as u16;
            let mut index = Vec::new();
            for off in [a_off, 0, end] {
                index.extend(off.to_le_bytes());
            }
            Self {
                data,
                index,
                encoding,
            }
        }

        fn font(&self) -> FontData<'_> {
            let header = FontHeader {
                height: 3,
                baseline: 3,
                max_width: 3,
                encoding: self.encoding,
                monospaced: false,
                min_char: 65,
                max_char: 66,
                default_char: 63,
            };
            FontData::new(header, &self.data, Index::Contiguous(&self.index))
        }
    }

    const FRAME: &str = "###\n#.#\n###\n";

    fn render(fixture: &Fixture, text: &str, width: u32) -> String {
        let font = fixture.font();
        let mut buf = MonoBuffer::new(width, 3);
        Writer::new(&font).draw_text(&mut buf, text);
        buf.to_ascii('#', '.')
    }

    #[test]
    fn test_row_bitmap_orders() {
        let normal = Fixture::new(
            GlyphEncoding::bitmap(Mapping::Row, BitOrder::Normal),
            &[0xE0, 0xA0, 0xE0],
            &[0xC0, 0xC0, 0xC0],
        );
        assert_eq!(render(&normal, "A", 3), FRAME);

        let reversed = Fixture::new(
            GlyphEncoding::bitmap(Mapping::Row, BitOrder::Reversed),
            &[0x07, 0x05, 0x07],
            &[0x03, 0x03, 0x03],
        );
        assert_eq!(render(&reversed, "A", 3), FRAME);
    }

    #[test]
    fn test_column_bitmap_orders() {
        let normal = Fixture::new(
            GlyphEncoding::bitmap(Mapping::Column, BitOrder::Normal),
            &[0x07, 0x05, 0x07],
            &[0x07, 0x07],
        );
        assert_eq!(render(&normal, "A", 3), FRAME);

        let reversed = Fixture::new(
            GlyphEncoding::bitmap(Mapping::Column, BitOrder::Reversed),
            &[0xE0, 0xA0, 0xE0],
            &[0xE0, 0xE0],
        );
        assert_eq!(render(&reversed, "A", 3), FRAME);
    }

    #[test]
    fn test_line_runs_with_repeat() {
        // rows 0 and 2 full, row 1 two dots; the default is a vertical stream
        // whose second column repeats the first
        let fixture = Fixture::new(
            GlyphEncoding::LineRun,
            &[0, 3, 1, 0, 0, 3, 2, 1, 0, 1, 2, 1, 1, 2, 0, 3],
            &[1, 2, 1, 0, 0, 3, 0],
        );
        assert_eq!(render(&fixture, "A", 3), FRAME);
        assert_eq!(render(&fixture, "?", 3), "##.\n##.\n##.\n");
    }

    #[test]
    fn test_gap_and_unknown_use_default_glyph() {
        let fixture = Fixture::new(
            GlyphEncoding::bitmap(Mapping::Row, BitOrder::Normal),
            &[0xE0, 0xA0, 0xE0],
            &[0xC0, 0xC0, 0xC0],
        );
        assert_eq!(render(&fixture, "BA\u{2603}", 8), "#######.\n###.###.\n#######.\n");
    }

    #[test]
    fn test_wrap_and_newline() {
        let fixture = Fixture::new(
            GlyphEncoding::bitmap(Mapping::Row, BitOrder::Normal),
            &[0xE0, 0xA0, 0xE0],
            &[0xC0, 0xC0, 0xC0],
        );
        let font = fixture.font();
        let mut buf = MonoBuffer::new(5, 9);
        let mut writer = Writer::new(&font);
        writer.draw_text(&mut buf, "AA");
        assert_eq!(writer.cursor(), Cursor { x: 3, y: 3 });
        writer.draw_char(&mut buf, '\n');
        assert_eq!(writer.cursor(), Cursor { x: 0, y: 6 });
        writer.draw_char(&mut buf, '?');
        assert_eq!(buf.pixel_count(), 8 + 8 + 6);
    }

    #[test]
    fn test_inverse_fills_cell() {
        let fixture = Fixture::new(
            GlyphEncoding::bitmap(Mapping::Row, BitOrder::Normal),
            &[0xE0, 0xA0, 0xE0],
            &[0xC0, 0xC0, 0xC0],
        );
        let font = fixture.font();
        let mut buf = MonoBuffer::new(3, 3);
        Writer::new(&font).with_inverse(true).draw_text(&mut buf, "A");
        assert_eq!(buf.to_ascii('#', '.'), "...\n.#.\n...\n");
    }

    #[test]
    fn test_text_width() {
        let fixture = Fixture::new(GlyphEncoding::default(), &[7, 5, 7], &[7, 7]);
        let font = fixture.font();
        assert_eq!(Writer::new(&font).text_width("AB?"), 3 + 2 + 2);
    }
}
