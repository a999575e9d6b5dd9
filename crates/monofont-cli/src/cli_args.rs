//! CLI argument definitions for the monofont command-line interface.
//!
//! All clap types are defined here, keeping `main.rs` focused on dispatch
//! logic.

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use monofont_cli::input::{load_job, read_charset_file, ConvertJob};
use monofont_format::{BitOrder, ConvertParams, Mapping, OutputKind, DEFAULT_CHAR};
use monofont_format::{MAX_CHAR, MIN_CHAR};
use std::path::{Path, PathBuf};

/// monofont - outline fonts to compact bitmap fonts for small displays
#[derive(Parser)]
#[command(name = "monofont")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub(crate) struct Cli {
    /// Print encoder debug events to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Convert an outline font to a Rust source module
    Convert(ConvertArgs),

    /// Convert an outline font to a random-access binary font file
    Binary(ConvertArgs),

    /// Render text with a font and print it as ASCII art
    Preview {
        /// Outline font file (ttf or otf) to convert in memory
        #[arg(long, required_unless_present = "binary", conflicts_with = "binary")]
        font: Option<String>,

        /// Binary font file to render from
        #[arg(long)]
        binary: Option<String>,

        /// Font height in pixels (outline fonts)
        #[arg(long, default_value_t = 16)]
        height: u32,

        #[command(flatten)]
        encoding: EncodingArgs,

        /// Text to draw; a literal \n starts a new line
        #[arg(short, long, default_value = "Hello, world!")]
        text: String,

        /// Usable width in pixels before wrapping (default: widest line)
        #[arg(short, long)]
        width: Option<u32>,

        /// Display rotation in degrees
        #[arg(long, default_value_t = 0, value_parser = parse_rotation)]
        rotate: u32,

        /// Draw lit cells with unlit glyph pixels
        #[arg(long)]
        inverse: bool,

        /// Also save the rendering as a PNG
        #[arg(long)]
        png: Option<String>,

        /// PNG pixel scale
        #[arg(long, default_value_t = 4)]
        scale: u32,
    },

    /// Describe a binary font file or a JSON metadata sidecar
    Inspect {
        /// Binary font file or `.json` metadata
        file: String,

        /// Draw one character (binary fonts)
        #[arg(short, long)]
        glyph: Option<char>,

        /// Output the binary font summary as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Glyph encoding flags shared by conversion and preview.
#[derive(Args, Debug, Clone, Default)]
pub(crate) struct EncodingArgs {
    /// Horizontal (row) mapping
    #[arg(short = 'x', long)]
    pub xmap: bool,

    /// Bit reversal
    #[arg(short, long)]
    pub reverse: bool,

    /// Fixed width (monospaced) font
    #[arg(short, long)]
    pub fixed: bool,

    /// Store glyphs as line-run streams
    #[arg(long)]
    pub line_run: bool,
}

impl EncodingArgs {
    /// Applies the flags to `params`.
    pub fn apply(&self, params: ConvertParams) -> ConvertParams {
        let mapping = if self.xmap { Mapping::Row } else { Mapping::Column };
        let order = if self.reverse {
            BitOrder::Reversed
        } else {
            BitOrder::Normal
        };
        params
            .with_mapping(mapping)
            .with_bit_order(order)
            .with_monospaced(self.fixed)
            .with_line_run(self.line_run)
    }
}

/// Arguments of `convert` and `binary`.
#[derive(Args, Debug, Clone)]
pub(crate) struct ConvertArgs {
    /// Outline font file (ttf or otf)
    #[arg(required_unless_present = "job")]
    pub font: Option<String>,

    /// Font height in pixels
    #[arg(required_unless_present = "job")]
    pub height: Option<u32>,

    /// Output file path
    #[arg(required_unless_present = "job")]
    pub output: Option<String>,

    /// JSON job file naming font, output and params
    #[arg(long, conflicts_with_all = ["font", "height", "output"])]
    pub job: Option<String>,

    #[command(flatten)]
    pub encoding: EncodingArgs,

    /// Include a generator function to iterate over the character set
    #[arg(short, long)]
    pub iterate: bool,

    /// Ordinal value of the smallest character
    #[arg(short, long, default_value_t = MIN_CHAR)]
    pub smallest: u32,

    /// Ordinal value of the largest character
    #[arg(short, long, default_value_t = MAX_CHAR)]
    pub largest: u32,

    /// Ordinal value of the error character
    #[arg(short, long, default_value_t = DEFAULT_CHAR)]
    pub errchar: u32,

    /// Character set, e.g. 1234567890: to restrict for a clock display
    #[arg(short, long, conflicts_with = "charset_file")]
    pub charset: Option<String>,

    /// File containing the character set
    #[arg(short = 'k', long)]
    pub charset_file: Option<String>,

    /// Also write a JSON metadata sidecar
    #[arg(short, long)]
    pub metadata: Option<String>,
}

impl ConvertArgs {
    /// Builds the conversion job for the given artifact kind.
    pub fn into_job(self, output: OutputKind) -> Result<ConvertJob> {
        if let Some(job) = &self.job {
            let mut job = load_job(Path::new(job))?;
            job.params.output = output;
            if let Some(metadata) = self.metadata {
                job.metadata = Some(PathBuf::from(metadata));
            }
            return Ok(job);
        }

        let charset = match (&self.charset, &self.charset_file) {
            (Some(charset), _) => Some(charset.clone()),
            (None, Some(file)) => Some(read_charset_file(Path::new(file))?),
            (None, None) => None,
        };

        let mut params = self
            .encoding
            .apply(ConvertParams::new(self.height.unwrap_or_default()))
            .with_iterate(self.iterate)
            .with_range(self.smallest, self.largest)
            .with_default_char(self.errchar)
            .with_output(output);
        if let Some(charset) = charset {
            params = params.with_charset(charset);
        }

        Ok(ConvertJob {
            font: PathBuf::from(self.font.unwrap_or_default()),
            output: PathBuf::from(self.output.unwrap_or_default()),
            metadata: self.metadata.map(PathBuf::from),
            params,
        })
    }
}

fn parse_rotation(s: &str) -> Result<u32, String> {
    let degrees: u32 = s.parse().map_err(|_| format!("not a number: {s}"))?;
    match degrees {
        0 | 90 | 180 | 270 => Ok(degrees),
        _ => Err("rotation must be 0, 90, 180 or 270".to_string()),
    }
}
