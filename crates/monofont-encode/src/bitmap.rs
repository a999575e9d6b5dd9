//! 1-bit pixel grid and its byte packings.

use std::fmt;

use monofont_format::{BitOrder, Mapping};

/// A monochrome pixel grid, stored row-major as one byte per pixel.
///
/// Zero-sized grids are valid and pack to no bytes.
#[derive(Clone, PartialEq, Eq)]
pub struct Bitmap {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl Bitmap {
    /// Creates an all-off bitmap.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; (width as usize) * (height as usize)],
        }
    }

    /// Wraps a row-major pixel buffer; any non-zero byte is "on".
    ///
    /// Returns `None` if the buffer length does not match the dimensions.
    pub fn from_pixels(width: u32, height: u32, pixels: Vec<u8>) -> Option<Self> {
        if pixels.len() != (width as usize) * (height as usize) {
            return None;
        }
        let pixels = pixels.into_iter().map(|p| u8::from(p != 0)).collect();
        Some(Self {
            width,
            height,
            pixels,
        })
    }

    /// Builds a bitmap from ASCII art, `#` meaning on.
    ///
    /// Rows shorter than the longest are padded with off pixels.
    ///
    /// # Example
    /// ```
    /// use monofont_encode::Bitmap;
    ///
    /// let bm = Bitmap::from_rows(&["#.", ".#"]);
    /// assert!(bm.get(0, 0) && bm.get(1, 1));
    /// assert!(!bm.get(1, 0));
    /// ```
    pub fn from_rows(rows: &[&str]) -> Self {
        let width = rows.iter().map(|r| r.chars().count()).max().unwrap_or(0) as u32;
        let mut bitmap = Bitmap::new(width, rows.len() as u32);
        for (y, row) in rows.iter().enumerate() {
            for (x, c) in row.chars().enumerate() {
                bitmap.set(x as u32, y as u32, c == '#');
            }
        }
        bitmap
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Reads a pixel. Out-of-range coordinates read as off.
    pub fn get(&self, x: u32, y: u32) -> bool {
        x < self.width && y < self.height && self.pixels[self.idx(x, y)] != 0
    }

    /// Writes a pixel. Out-of-range coordinates are ignored.
    pub fn set(&mut self, x: u32, y: u32, on: bool) {
        if x < self.width && y < self.height {
            let idx = self.idx(x, y);
            self.pixels[idx] = u8::from(on);
        }
    }

    /// Number of pixels that are on.
    pub fn pixel_count(&self) -> usize {
        self.pixels.iter().filter(|&&p| p != 0).count()
    }

    fn idx(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Copies `src` into this bitmap with its top-left corner at (`left`, `top`).
    ///
    /// The caller guarantees the source fits; pixels past the edge are
    /// dropped in release builds.
    pub fn bitblt(&mut self, src: &Bitmap, top: u32, left: u32) {
        debug_assert!(
            top + src.height <= self.height && left + src.width <= self.width,
            "bitblt of {}x{} at ({left}, {top}) overflows {}x{}",
            src.width,
            src.height,
            self.width,
            self.height
        );
        for y in 0..src.height {
            for x in 0..src.width {
                if src.get(x, y) {
                    self.set(left + x, top + y, true);
                }
            }
        }
    }

    /// Row-major packing: each row padded to whole bytes, rows in order.
    pub fn row_bytes(&self, order: BitOrder) -> RowBytes<'_> {
        RowBytes {
            bitmap: self,
            order,
            line: 0,
            byte: 0,
        }
    }

    /// Column-major packing: each column padded to whole bytes, columns in order.
    pub fn col_bytes(&self, order: BitOrder) -> ColBytes<'_> {
        ColBytes {
            bitmap: self,
            order,
            line: 0,
            byte: 0,
        }
    }

    /// Inverse of [`Bitmap::row_bytes`].
    pub fn from_row_bytes(bytes: &[u8], width: u32, height: u32, order: BitOrder) -> Self {
        let per_row = width.div_ceil(8) as usize;
        let mut bitmap = Bitmap::new(width, height);
        for y in 0..height {
            for x in 0..width {
                let byte = bytes
                    .get(y as usize * per_row + (x / 8) as usize)
                    .copied()
                    .unwrap_or(0);
                let bit = row_bit(x % 8, order);
                bitmap.set(x, y, byte & (1 << bit) != 0);
            }
        }
        bitmap
    }

    /// Inverse of [`Bitmap::col_bytes`].
    pub fn from_col_bytes(bytes: &[u8], width: u32, height: u32, order: BitOrder) -> Self {
        let per_col = height.div_ceil(8) as usize;
        let mut bitmap = Bitmap::new(width, height);
        for x in 0..width {
            for y in 0..height {
                let byte = bytes
                    .get(x as usize * per_col + (y / 8) as usize)
                    .copied()
                    .unwrap_or(0);
                let bit = col_bit(y % 8, order);
                bitmap.set(x, y, byte & (1 << bit) != 0);
            }
        }
        bitmap
    }

    /// Renders the bitmap as ASCII art, one line per row.
    pub fn to_ascii(&self, on: char, off: char) -> String {
        let mut out = String::with_capacity((self.width as usize + 1) * self.height as usize);
        for y in 0..self.height {
            for x in 0..self.width {
                out.push(if self.get(x, y) { on } else { off });
            }
            out.push('\n');
        }
        out
    }
}

impl fmt::Debug for Bitmap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Bitmap {}x{}", self.width, self.height)?;
        f.write_str(&self.to_ascii('#', '.'))
    }
}

fn row_bit(i: u32, order: BitOrder) -> u32 {
    Mapping::Row.bit_position(order, i)
}

fn col_bit(i: u32, order: BitOrder) -> u32 {
    Mapping::Column.bit_position(order, i)
}

/// Iterator returned by [`Bitmap::row_bytes`].
#[derive(Debug, Clone)]
pub struct RowBytes<'a> {
    bitmap: &'a Bitmap,
    order: BitOrder,
    line: u32,
    byte: u32,
}

impl Iterator for RowBytes<'_> {
    type Item = u8;

    fn next(&mut self) -> Option<u8> {
        let per_row = self.bitmap.width.div_ceil(8);
        if per_row == 0 || self.line >= self.bitmap.height {
            return None;
        }
        let mut value = 0u8;
        for i in 0..8 {
            if self.bitmap.get(self.byte * 8 + i, self.line) {
                value |= 1 << row_bit(i, self.order);
            }
        }
        self.byte += 1;
        if self.byte == per_row {
            self.byte = 0;
            self.line += 1;
        }
        Some(value)
    }
}

/// Iterator returned by [`Bitmap::col_bytes`].
#[derive(Debug, Clone)]
pub struct ColBytes<'a> {
    bitmap: &'a Bitmap,
    order: BitOrder,
    line: u32,
    byte: u32,
}

impl Iterator for ColBytes<'_> {
    type Item = u8;

    fn next(&mut self) -> Option<u8> {
        let per_col = self.bitmap.height.div_ceil(8);
        if per_col == 0 || self.line >= self.bitmap.width {
            return None;
        }
        let mut value = 0u8;
        for i in 0..8 {
            if self.bitmap.get(self.line, self.byte * 8 + i) {
                value |= 1 << col_bit(i, self.order);
            }
        }
        self.byte += 1;
        if self.byte == per_col {
            self.byte = 0;
            self.line += 1;
        }
        Some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_row_packing_bit_orders() {
        let bm = Bitmap::from_rows(&["#.........", "........##"]);
        let normal: Vec<u8> = bm.row_bytes(BitOrder::Normal).collect();
        assert_eq!(normal, vec![0x80, 0x00, 0x00, 0xC0]);

        let reversed: Vec<u8> = bm.row_bytes(BitOrder::Reversed).collect();
        assert_eq!(reversed, vec![0x01, 0x00, 0x00, 0x03]);
    }

    #[test]
    fn test_column_packing_bit_orders() {
        // 2 wide, 10 high; column 0 has its top pixel on, column 1 its bottom
        let mut bm = Bitmap::new(2, 10);
        bm.set(0, 0, true);
        bm.set(1, 9, true);

        let normal: Vec<u8> = bm.col_bytes(BitOrder::Normal).collect();
        assert_eq!(normal, vec![0x01, 0x00, 0x00, 0x02]);

        let reversed: Vec<u8> = bm.col_bytes(BitOrder::Reversed).collect();
        assert_eq!(reversed, vec![0x80, 0x00, 0x00, 0x40]);
    }

    #[test]
    fn test_zero_sized_bitmaps_pack_to_nothing() {
        let empty = Bitmap::new(0, 12);
        assert_eq!(empty.row_bytes(BitOrder::Normal).count(), 0);
        assert_eq!(empty.col_bytes(BitOrder::Normal).count(), 0);
        assert_eq!(Bitmap::new(5, 0).row_bytes(BitOrder::Normal).count(), 0);
    }

    #[test]
    fn test_unpack_inverts_pack() {
        let bm = Bitmap::from_rows(&["#..#.#.##", ".##......", "........#"]);
        for order in [BitOrder::Normal, BitOrder::Reversed] {
            let rows: Vec<u8> = bm.row_bytes(order).collect();
            assert_eq!(Bitmap::from_row_bytes(&rows, 9, 3, order), bm);

            let cols: Vec<u8> = bm.col_bytes(order).collect();
            assert_eq!(Bitmap::from_col_bytes(&cols, 9, 3, order), bm);
        }
    }

    #[test]
    fn test_bitblt_places_source() {
        let mut cell = Bitmap::new(4, 4);
        cell.bitblt(&Bitmap::from_rows(&["##", "#."]), 1, 2);
        assert_eq!(cell.to_ascii('#', '.'), "....\n..##\n..#.\n....\n");
    }

    #[test]
    fn test_from_pixels_checks_length() {
        assert!(Bitmap::from_pixels(2, 2, vec![0, 1, 2, 3]).is_some());
        assert!(Bitmap::from_pixels(2, 2, vec![0, 1]).is_none());
        let bm = Bitmap::from_pixels(2, 1, vec![0, 200]).unwrap();
        assert_eq!(bm.pixel_count(), 1);
    }
}
