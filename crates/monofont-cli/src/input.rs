//! Job loading and input checks.
//!
//! A conversion job names the outline font, the destination and the
//! [`ConvertParams`]. Jobs come either from clap flags or from a JSON job
//! file:
//!
//! ```json
//! {
//!   "font": "fonts/FreeSans.ttf",
//!   "output": "freesans.rs",
//!   "metadata": "freesans.json",
//!   "params": { "height": 20, "mapping": "row", "monospaced": true }
//! }
//! ```
//!
//! Relative paths in a job file are resolved against the file's directory.

use anyhow::{bail, Context, Result};
use monofont_encode::OutlineRasterizer;
use monofont_format::{ConvertParams, OutputKind};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Outline font extensions the rasterizer accepts.
pub const FONT_EXTENSIONS: &[&str] = &["ttf", "otf"];

/// Extension of generated modules.
pub const MODULE_EXTENSION: &str = "rs";

/// One conversion: source, destination and parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConvertJob {
    /// Outline font file.
    pub font: PathBuf,
    /// Artifact destination.
    pub output: PathBuf,
    /// Optional JSON metadata sidecar destination.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<PathBuf>,
    /// Conversion parameters.
    pub params: ConvertParams,
}

impl ConvertJob {
    /// Parses a job from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Joins relative paths onto `base`.
    pub fn resolve_paths(mut self, base: &Path) -> Self {
        let resolve = |p: PathBuf| if p.is_relative() { base.join(p) } else { p };
        self.font = resolve(self.font);
        self.output = resolve(self.output);
        self.metadata = self.metadata.map(resolve);
        self
    }
}

/// Loads a JSON job file.
pub fn load_job(path: &Path) -> Result<ConvertJob> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to read job file: {}", path.display()))?;
    let job = ConvertJob::from_json(&json)
        .with_context(|| format!("Failed to parse job file: {}", path.display()))?;
    let base = path.parent().unwrap_or_else(|| Path::new(""));
    Ok(job.resolve_paths(base))
}

/// Reads a charset from a UTF-8 text file.
pub fn read_charset_file(path: &Path) -> Result<String> {
    fs::read_to_string(path)
        .with_context(|| format!("Can't open {} for reading", path.display()))
}

fn has_extension(path: &Path, ext: &str) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(ext))
}

/// Checks that the font is an outline font and the output extension matches
/// the artifact kind.
pub fn check_paths(job: &ConvertJob) -> Result<()> {
    if !FONT_EXTENSIONS.iter().any(|ext| has_extension(&job.font, ext)) {
        bail!(
            "Font file ({}) should be a ttf or otf file",
            job.font.display()
        );
    }
    let is_module = has_extension(&job.output, MODULE_EXTENSION);
    match job.params.output {
        OutputKind::Module if !is_module => {
            bail!("Output filename must have a .{} extension", MODULE_EXTENSION)
        }
        OutputKind::Binary if is_module => {
            bail!("Binary file must not have a .{} extension", MODULE_EXTENSION)
        }
        _ => Ok(()),
    }
}

/// Opens an outline font for rasterization.
pub fn open_rasterizer(path: &Path) -> Result<OutlineRasterizer> {
    OutlineRasterizer::open(path)
        .with_context(|| format!("Failed to load font file: {}", path.display()))
}
