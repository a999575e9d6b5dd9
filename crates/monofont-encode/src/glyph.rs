//! One rasterized character and its metrics.

use crate::bitmap::Bitmap;

/// A rasterized character.
///
/// `top` is the distance from the baseline up to the first bitmap row and
/// `left` the offset from the pen position to the first column; both follow
/// the usual outline-font conventions and may be negative.
#[derive(Debug, Clone, PartialEq)]
pub struct Glyph {
    /// Coverage bitmap, already thresholded.
    pub bitmap: Bitmap,
    /// Bearing from baseline to top row.
    pub top: i32,
    /// Bearing from pen position to left column.
    pub left: i32,
    /// Horizontal advance in pixels, possibly fractional.
    pub advance: f32,
}

impl Glyph {
    /// Creates a glyph.
    pub fn new(bitmap: Bitmap, top: i32, left: i32, advance: f32) -> Self {
        Self {
            bitmap,
            top,
            left,
            advance,
        }
    }

    /// Bitmap width.
    pub fn width(&self) -> u32 {
        self.bitmap.width()
    }

    /// Bitmap height.
    pub fn height(&self) -> u32 {
        self.bitmap.height()
    }

    /// Rows below the baseline.
    pub fn descent(&self) -> u32 {
        (self.height() as i64 - self.top as i64).max(0) as u32
    }

    /// Rows above the baseline.
    pub fn ascent(&self) -> u32 {
        let above = (self.top as i64).max(self.height() as i64) - self.descent() as i64;
        above.max(0) as u32
    }

    /// Column where the bitmap is placed in the cell. A negative bearing
    /// is absorbed into the advance, so placement never goes left of 0.
    pub fn placement_left(&self) -> u32 {
        self.left.max(0) as u32
    }

    /// Advance after absorbing a negative left bearing.
    pub fn effective_advance(&self) -> f32 {
        if self.left < 0 {
            self.advance.max(self.width() as f32 - self.left as f32)
        } else {
            self.advance
        }
    }

    /// Width of the record this glyph needs: its rounded advance, widened
    /// so the placed bitmap always fits.
    pub fn record_width(&self) -> u32 {
        let advance = self.effective_advance().round().max(0.0) as u32;
        advance.max(self.width() + self.placement_left())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn glyph(width: u32, height: u32, top: i32, left: i32, advance: f32) -> Glyph {
        Glyph::new(Bitmap::new(width, height), top, left, advance)
    }

    #[test]
    fn test_ascent_descent_on_baseline() {
        let g = glyph(5, 10, 10, 1, 7.0);
        assert_eq!(g.ascent(), 10);
        assert_eq!(g.descent(), 0);
    }

    #[test]
    fn test_descender() {
        // 'g'-like: 12 rows, 9 above the baseline
        let g = glyph(5, 12, 9, 0, 6.0);
        assert_eq!(g.ascent(), 9);
        assert_eq!(g.descent(), 3);
    }

    #[test]
    fn test_floating_glyph_counts_gap_as_ascent() {
        // apostrophe: 3 rows starting 10 above the baseline
        let g = glyph(1, 3, 10, 1, 3.0);
        assert_eq!(g.descent(), 0);
        assert_eq!(g.ascent(), 10);
    }

    #[test]
    fn test_negative_left_bearing_absorbed() {
        let g = glyph(6, 8, 8, -2, 5.0);
        assert_eq!(g.placement_left(), 0);
        assert_eq!(g.effective_advance(), 8.0);
        assert_eq!(g.record_width(), 8);
    }

    #[test]
    fn test_record_width_covers_bitmap() {
        // advance narrower than bearing + bitmap
        let g = glyph(6, 8, 8, 2, 5.4);
        assert_eq!(g.record_width(), 8);
        // advance wider: rounded advance wins
        let g = glyph(3, 8, 8, 1, 6.6);
        assert_eq!(g.record_width(), 7);
        // zero advance, empty bitmap
        assert_eq!(glyph(0, 0, 0, 0, 0.0).record_width(), 0);
    }
}
