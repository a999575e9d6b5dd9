//! Rasterizer seam.
//!
//! The encoder never touches outline data directly. It asks a [`Rasterizer`]
//! for thresholded glyphs at a pixel size; [`OutlineRasterizer`] serves
//! TrueType/OpenType files, tests plug in synthetic ones.

mod outline;

pub use outline::{OutlineRasterizer, COVERAGE_THRESHOLD};

use crate::error::EncodeError;
use crate::glyph::Glyph;

/// A source of rasterized glyphs.
pub trait Rasterizer {
    /// Label used in logs and error messages, typically the file name.
    fn name(&self) -> &str;

    /// Sets the nominal pixel size for subsequent rasterization.
    fn set_pixel_size(&mut self, size: u32);

    /// Returns true if the source has a real glyph for `ch`.
    fn has_glyph(&self, ch: char) -> bool;

    /// Rasterizes `ch` at the current pixel size.
    fn rasterize(&mut self, ch: char) -> Result<Glyph, EncodeError>;
}

impl<R: Rasterizer + ?Sized> Rasterizer for &mut R {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn set_pixel_size(&mut self, size: u32) {
        (**self).set_pixel_size(size)
    }

    fn has_glyph(&self, ch: char) -> bool {
        (**self).has_glyph(ch)
    }

    fn rasterize(&mut self, ch: char) -> Result<Glyph, EncodeError> {
        (**self).rasterize(ch)
    }
}
