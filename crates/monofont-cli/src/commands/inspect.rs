//! Inspect command implementation
//!
//! Describes a binary font file or a JSON metadata sidecar, and dumps single
//! glyphs as ASCII art.

use anyhow::{Context, Result};
use colored::Colorize;
use monofont_encode::FontMetadata;
use monofont_format::{BinaryFont, GlyphLookup, MAX_CHAR, MIN_CHAR};
use monofont_render::Rotation;
use serde::Serialize;
use std::fs;
use std::path::Path;
use std::process::ExitCode;

use super::preview::render_text;
use super::reporting;

/// Summary of a binary font file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BinaryInfo {
    /// Glyph encoding name.
    pub encoding: String,
    /// Cell width shared by every record.
    pub max_width: u8,
    /// Cell height.
    pub height: u16,
    /// Bytes per record.
    pub record_len: usize,
    /// Total file length.
    pub file_len: usize,
    /// Records present, in ordinal order.
    pub glyphs: Vec<BinaryGlyph>,
}

/// One record of a binary font.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BinaryGlyph {
    /// Character ordinal.
    pub ordinal: u32,
    /// Advance width.
    pub width: u16,
}

/// Reads the header and every present record of a binary font.
pub fn describe_binary(bytes: &[u8]) -> Result<BinaryInfo> {
    let font = BinaryFont::parse(bytes).context("Not a binary font")?;
    let glyphs = (MIN_CHAR..=MAX_CHAR)
        .filter_map(|ordinal| {
            let ch = char::from_u32(ordinal)?;
            font.glyph(ch).map(|g| BinaryGlyph {
                ordinal,
                width: g.width,
            })
        })
        .collect();
    Ok(BinaryInfo {
        encoding: font.encoding().as_str().to_string(),
        max_width: font.max_width(),
        height: font.height(),
        record_len: font.record_len(),
        file_len: bytes.len(),
        glyphs,
    })
}

/// Run the inspect command
///
/// # Arguments
/// * `path` - Binary font file, or a `.json` metadata sidecar
/// * `glyph` - Character to draw (binary fonts only)
/// * `json_output` - Print the binary font summary as JSON
pub fn run(path: &str, glyph: Option<char>, json_output: bool) -> Result<ExitCode> {
    let path = Path::new(path);
    let bytes = fs::read(path).with_context(|| format!("Failed to read: {}", path.display()))?;

    let is_json = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"));
    if is_json {
        let metadata: FontMetadata = serde_json::from_slice(&bytes)
            .with_context(|| format!("Failed to parse metadata: {}", path.display()))?;
        return inspect_metadata(path, &metadata);
    }

    let info = describe_binary(&bytes).with_context(|| path.display().to_string())?;
    if json_output {
        println!("{}", serde_json::to_string_pretty(&info)?);
        return Ok(ExitCode::SUCCESS);
    }

    println!("{} {}", "Binary font:".cyan().bold(), path.display());
    println!("{} {}", "Encoding:".dimmed(), info.encoding);
    println!(
        "{} {}x{} ({} bytes per record)",
        "Cell:".dimmed(),
        info.max_width,
        info.height,
        info.record_len
    );
    println!(
        "{} {} of {} ({} bytes)",
        "Glyphs:".dimmed(),
        info.glyphs.len(),
        MAX_CHAR - MIN_CHAR + 1,
        info.file_len
    );

    if let Some(ch) = glyph {
        let font = BinaryFont::parse(&bytes).context("Not a binary font")?;
        if font.glyph(ch).is_none() {
            println!("\n{} {:?} is not in this font", "!".yellow(), ch);
            return Ok(ExitCode::from(1));
        }
        let buffer = render_text(&font, &ch.to_string(), None, Rotation::Deg0, false);
        println!();
        print!("{}", buffer.to_ascii('#', '.'));
    }
    Ok(ExitCode::SUCCESS)
}

fn inspect_metadata(path: &Path, metadata: &FontMetadata) -> Result<ExitCode> {
    println!("{} {}", "Metadata:".cyan().bold(), path.display());
    println!("{} {}", "Source:".dimmed(), metadata.source);
    println!("{} {:?}", "Output:".dimmed(), metadata.output);
    reporting::print_metadata(metadata);
    println!();
    for g in &metadata.glyphs {
        println!(
            "  {:>6} {:?}  width {:>3}  offset {:>6}  len {:>4}",
            g.ordinal, g.character, g.width, g.offset, g.len
        );
    }
    Ok(ExitCode::SUCCESS)
}
