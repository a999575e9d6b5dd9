//! Deterministic synthetic rasterizer for tests.
//!
//! Glyphs are hatched blocks whose proportions follow the pixel size, so
//! height fitting, spacing and packing can be exercised without a font file.

use std::collections::BTreeSet;

use crate::bitmap::Bitmap;
use crate::error::EncodeError;
use crate::glyph::Glyph;
use crate::raster::Rasterizer;

const DESCENDERS: &str = "gjpqy";
const NARROW: &str = "!'.,:;|il";

/// Synthetic [`Rasterizer`].
///
/// At size `s` a capital-height glyph is `s - s / 4` rows above the
/// baseline and descenders reach `s / 4` rows below it, so a set containing
/// both fits exactly at `s`.
#[derive(Debug, Clone, Default)]
pub struct BlockRasterizer {
    size: u32,
    fixed_height: Option<u32>,
    missing: BTreeSet<char>,
    empty: BTreeSet<char>,
}

impl BlockRasterizer {
    /// Creates a rasterizer with every glyph present.
    pub fn new() -> Self {
        Self::default()
    }

    /// Renders every glyph `height` rows tall regardless of size.
    pub fn with_fixed_height(mut self, height: u32) -> Self {
        self.fixed_height = Some(height);
        self
    }

    /// Reports `ch` as absent from the source.
    pub fn with_missing(mut self, ch: char) -> Self {
        self.missing.insert(ch);
        self
    }

    /// Renders `ch` with no pixels and zero advance.
    pub fn with_empty(mut self, ch: char) -> Self {
        self.empty.insert(ch);
        self
    }

    /// Current pixel size.
    pub fn size(&self) -> u32 {
        self.size
    }
}

impl Rasterizer for BlockRasterizer {
    fn name(&self) -> &str {
        "block"
    }

    fn set_pixel_size(&mut self, size: u32) {
        self.size = size;
    }

    fn has_glyph(&self, ch: char) -> bool {
        !self.missing.contains(&ch)
    }

    fn rasterize(&mut self, ch: char) -> Result<Glyph, EncodeError> {
        let s = self.size;
        if self.empty.contains(&ch) {
            return Ok(Glyph::new(Bitmap::new(0, 0), 0, 0, 0.0));
        }
        if ch == ' ' {
            return Ok(Glyph::new(Bitmap::new(0, 0), 0, 0, (s / 3) as f32));
        }

        let width = if NARROW.contains(ch) {
            (s / 4).max(1)
        } else {
            (s / 2).max(1)
        };
        let cap = s - s / 4;
        let (height, top) = match self.fixed_height {
            Some(h) => (h, h as i32),
            None if DESCENDERS.contains(ch) => (cap / 2 + s / 4, (cap / 2) as i32),
            None => (cap, cap as i32),
        };

        let mut bitmap = Bitmap::new(width, height);
        for y in 0..height {
            for x in 0..width {
                bitmap.set(x, y, (x + y + ch as u32) % 3 != 0);
            }
        }
        Ok(Glyph::new(bitmap, top, 1, (width + 2) as f32))
    }
}
