//! TrueType/OpenType rasterization through fontdue.

use std::path::Path;

use fontdue::{Font as OutlineFont, FontSettings};

use super::Rasterizer;
use crate::bitmap::Bitmap;
use crate::error::EncodeError;
use crate::glyph::Glyph;

/// Coverage at or above which a pixel is considered on.
pub const COVERAGE_THRESHOLD: u8 = 128;

/// Rasterizer backed by a parsed outline font.
pub struct OutlineRasterizer {
    font: OutlineFont,
    name: String,
    size: f32,
}

impl std::fmt::Debug for OutlineRasterizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OutlineRasterizer")
            .field("name", &self.name)
            .field("size", &self.size)
            .finish()
    }
}

impl OutlineRasterizer {
    /// Parses font bytes. `name` labels the source in errors.
    pub fn from_bytes(name: impl Into<String>, bytes: Vec<u8>) -> Result<Self, EncodeError> {
        let name = name.into();
        let font = OutlineFont::from_bytes(bytes, FontSettings::default())
            .map_err(|e| EncodeError::unreadable(name.clone(), e))?;
        Ok(Self {
            font,
            name,
            size: 0.0,
        })
    }

    /// Reads and parses a font file.
    pub fn open(path: &Path) -> Result<Self, EncodeError> {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let bytes = std::fs::read(path).map_err(|e| EncodeError::unreadable(name.clone(), e))?;
        Self::from_bytes(name, bytes)
    }
}

impl Rasterizer for OutlineRasterizer {
    fn name(&self) -> &str {
        &self.name
    }

    fn set_pixel_size(&mut self, size: u32) {
        self.size = size as f32;
    }

    fn has_glyph(&self, ch: char) -> bool {
        self.font.lookup_glyph_index(ch) != 0
    }

    fn rasterize(&mut self, ch: char) -> Result<Glyph, EncodeError> {
        let (metrics, coverage) = self.font.rasterize(ch, self.size);
        let pixels = coverage
            .into_iter()
            .map(|alpha| u8::from(alpha >= COVERAGE_THRESHOLD))
            .collect();
        let bitmap = Bitmap::from_pixels(metrics.width as u32, metrics.height as u32, pixels)
            .ok_or_else(|| {
                EncodeError::unreadable(
                    self.name.clone(),
                    format!("rasterizer returned a malformed bitmap for {ch:?}"),
                )
            })?;
        let top = metrics.ymin + metrics.height as i32;
        Ok(Glyph::new(bitmap, top, metrics.xmin, metrics.advance_width))
    }
}
