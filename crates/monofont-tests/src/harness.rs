//! Test harness utilities for converting fonts and checking rendered output.

use std::path::{Path, PathBuf};

use monofont_cli::commands::convert::{convert_with, Converted};
use monofont_cli::input::ConvertJob;
use monofont_encode::testing::BlockRasterizer;
use monofont_encode::{Bitmap, Font};
use monofont_format::{ConvertParams, GlyphLookup, ValidationError};
use monofont_render::{MonoBuffer, Surface, Writer};
use tempfile::TempDir;

/// Copies an encoder bitmap into a render buffer.
pub fn cell_buffer(cell: &Bitmap) -> MonoBuffer {
    let mut buffer = MonoBuffer::new(cell.width(), cell.height());
    for y in 0..cell.height() {
        for x in 0..cell.width() {
            if cell.get(x, y) {
                buffer.pixel(x as i32, y as i32, true);
            }
        }
    }
    buffer
}

/// Draws `ch` at the origin of a `width` x `height` buffer.
pub fn render_glyph<F: GlyphLookup + ?Sized>(
    font: &F,
    ch: char,
    width: u32,
    height: u32,
) -> MonoBuffer {
    let mut buffer = MonoBuffer::new(width, height);
    Writer::new(font).draw_char(&mut buffer, ch);
    buffer
}

/// Asserts that every placed glyph of `font` renders from `decoded` to
/// exactly its cell.
pub fn assert_roundtrip<F: GlyphLookup + ?Sized>(font: &Font, decoded: &F) {
    for placed in font.glyphs() {
        let expected = cell_buffer(&placed.cell);
        let actual = render_glyph(decoded, placed.ch, placed.cell.width(), font.height());
        assert_eq!(
            actual.to_ascii('#', '.'),
            expected.to_ascii('#', '.'),
            "glyph {:?} does not round-trip",
            placed.ch
        );
    }
}

/// A test harness for running conversions into a scratch directory.
pub struct TestHarness {
    /// Working directory for test outputs.
    pub work_dir: TempDir,
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}

impl TestHarness {
    /// Create a new test harness.
    pub fn new() -> Self {
        Self {
            work_dir: TempDir::new().expect("Failed to create work dir"),
        }
    }

    /// Get the working directory path.
    pub fn path(&self) -> &Path {
        self.work_dir.path()
    }

    /// A job writing `output` and `<output>.json` metadata in the work dir.
    pub fn job(&self, output: &str, params: ConvertParams) -> ConvertJob {
        let output = self.path().join(output);
        ConvertJob {
            font: PathBuf::from("block.ttf"),
            metadata: Some(output.with_extension("json")),
            output,
            params,
        }
    }

    /// Converts with a fresh [`BlockRasterizer`].
    pub fn convert(&self, job: &ConvertJob) -> Result<Converted, Vec<ValidationError>> {
        convert_with(&mut BlockRasterizer::new(), job).expect("Conversion failed")
    }
}
