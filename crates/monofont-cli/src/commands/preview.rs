//! Preview command implementation
//!
//! Renders text with a converted font and prints it as ASCII art, optionally
//! saving a scaled PNG.

use anyhow::{Context, Result};
use colored::Colorize;
use monofont_encode::{generate_font, write_atomic, Rasterizer};
use monofont_format::{BinaryFont, ConvertParams, GlyphLookup, OutputKind};
use monofont_render::{write_png_to_vec, MonoBuffer, Rotated, Rotation, Surface, Writer};
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use crate::input::{open_rasterizer, FONT_EXTENSIONS};

/// Where the preview font comes from.
#[derive(Debug, Clone)]
pub enum PreviewSource {
    /// Convert an outline font in memory.
    Outline {
        /// Outline font file.
        font: PathBuf,
        /// Conversion parameters; the output kind is forced to a module.
        params: ConvertParams,
    },
    /// Read a binary font file.
    Binary(PathBuf),
}

/// Rendering options.
#[derive(Debug, Clone)]
pub struct PreviewOptions {
    /// Text to draw. A literal `\n` starts a new line.
    pub text: String,
    /// Usable width before wrapping; defaults to the widest line.
    pub width: Option<u32>,
    /// Display rotation.
    pub rotation: Rotation,
    /// Lit cells with unlit glyph pixels.
    pub inverse: bool,
    /// PNG destination.
    pub png: Option<PathBuf>,
    /// PNG pixel scale.
    pub scale: u32,
}

/// Run the preview command
pub fn run(source: &PreviewSource, options: &PreviewOptions) -> Result<ExitCode> {
    let text = options.text.replace("\\n", "\n");

    let buffer = match source {
        PreviewSource::Outline { font, params } => {
            let has_font_ext = font
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| FONT_EXTENSIONS.iter().any(|f| e.eq_ignore_ascii_case(f)));
            if !has_font_ext {
                anyhow::bail!("Font file ({}) should be a ttf or otf file", font.display());
            }
            println!("{} {}", "Previewing:".cyan().bold(), font.display());
            let mut rasterizer = open_rasterizer(font)?;
            render_outline(&mut rasterizer, params, &text, options)?
        }
        PreviewSource::Binary(path) => {
            println!("{} {}", "Previewing:".cyan().bold(), path.display());
            let bytes = fs::read(path)
                .with_context(|| format!("Failed to read binary font: {}", path.display()))?;
            let font = BinaryFont::parse(&bytes)
                .with_context(|| format!("Not a binary font: {}", path.display()))?;
            render_text(&font, &text, options.width, options.rotation, options.inverse)
        }
    };

    println!(
        "{} {}x{} ({} lit)\n",
        "Surface:".dimmed(),
        buffer.width(),
        buffer.height(),
        buffer.pixel_count()
    );
    print!("{}", buffer.to_ascii('#', '.'));

    if let Some(png_path) = &options.png {
        let png = write_png_to_vec(&buffer, options.scale).context("Failed to encode PNG")?;
        let written = write_atomic(png_path, &png)
            .with_context(|| format!("Failed to write PNG: {}", png_path.display()))?;
        println!(
            "\n  {} {} ({} bytes, {})",
            "+".green(),
            written.path.display(),
            written.len,
            &written.hash[..16]
        );
    }

    Ok(ExitCode::SUCCESS)
}

/// Converts with `rasterizer` and renders `text` with the result.
pub fn render_outline<R: Rasterizer + ?Sized>(
    rasterizer: &mut R,
    params: &ConvertParams,
    text: &str,
    options: &PreviewOptions,
) -> Result<MonoBuffer> {
    let params = params.clone().with_output(OutputKind::Module);
    let result = generate_font(rasterizer, &params).context("Failed to convert font")?;
    let encoded = result
        .encoded
        .context("module conversion produced no font data")?;
    let font = encoded.as_font_data();
    Ok(render_text(
        &font,
        text,
        options.width,
        options.rotation,
        options.inverse,
    ))
}

/// Accepts every pixel; only its width matters, for measuring wrapped text.
struct Measure(u32);

impl Surface for Measure {
    fn width(&self) -> u32 {
        self.0
    }

    fn height(&self) -> u32 {
        u32::MAX
    }

    fn pixel(&mut self, _x: i32, _y: i32, _on: bool) {}
}

/// Renders `text` onto a buffer sized to fit it.
///
/// The logical surface is `width` wide (or as wide as the widest line) and
/// tall enough for every wrapped line. With a quarter-turn rotation the
/// physical buffer is the transposed size.
pub fn render_text<F: GlyphLookup + ?Sized>(
    font: &F,
    text: &str,
    width: Option<u32>,
    rotation: Rotation,
    inverse: bool,
) -> MonoBuffer {
    let measure = Writer::new(font);
    let width = width
        .unwrap_or_else(|| {
            text.split('\n')
                .map(|line| measure.text_width(line))
                .max()
                .unwrap_or(0)
        })
        .max(1);

    let mut measure = Writer::new(font);
    measure.draw_text(&mut Measure(width), text);
    let height = (measure.cursor().y.max(0) as u32 + font.height() as u32).max(1);

    let mut buffer = if rotation.swaps_axes() {
        MonoBuffer::new(height, width)
    } else {
        MonoBuffer::new(width, height)
    };
    let mut surface = Rotated::new(&mut buffer, rotation);
    Writer::new(font)
        .with_inverse(inverse)
        .draw_text(&mut surface, text);
    buffer
}
