//! Convert command implementation
//!
//! Converts an outline font into a Rust source module or a binary font file.

use anyhow::{Context, Result};
use colored::Colorize;
use monofont_encode::{generate_font, save_font_result, FontResult, Rasterizer, WrittenArtifact};
use monofont_format::{validate_params, OutputKind, ValidationError};
use std::process::ExitCode;
use std::time::Instant;

use super::reporting;
use crate::input::{check_paths, open_rasterizer, ConvertJob};

/// Outcome of a conversion that passed validation.
#[derive(Debug)]
pub struct Converted {
    /// The in-memory result.
    pub result: FontResult,
    /// The written artifact.
    pub written: WrittenArtifact,
}

/// Run the convert command
///
/// # Returns
/// Exit code: 0 on success, 1 if the parameters are invalid
pub fn run(job: &ConvertJob) -> Result<ExitCode> {
    let start = Instant::now();

    let label = match job.params.output {
        OutputKind::Module => "Converting:",
        OutputKind::Binary => "Writing binary font:",
    };
    println!(
        "{} {} -> {}",
        label.cyan().bold(),
        job.font.display(),
        job.output.display()
    );

    check_paths(job)?;
    let mut rasterizer = open_rasterizer(&job.font)?;

    match convert_with(&mut rasterizer, job)? {
        Ok(converted) => {
            reporting::print_metadata(&converted.result.metadata);
            reporting::print_written(&converted.written);
            if let Some(metadata) = &job.metadata {
                println!("  {} {}", "+".green(), metadata.display());
            }
            println!(
                "\n{} {} written successfully ({}ms)",
                "SUCCESS".green().bold(),
                job.output.display(),
                start.elapsed().as_millis()
            );
            Ok(ExitCode::SUCCESS)
        }
        Err(errors) => {
            reporting::print_errors(&errors);
            println!(
                "\n{} Invalid conversion parameters ({} errors)",
                "FAILED".red().bold(),
                errors.len()
            );
            Ok(ExitCode::from(1))
        }
    }
}

/// Validates the job's params, then converts with `rasterizer` and writes the
/// artifact and optional metadata.
///
/// The outer error covers I/O and encoding failures; the inner `Err` carries
/// parameter validation errors, reported before anything is rasterized.
pub fn convert_with<R: Rasterizer + ?Sized>(
    rasterizer: &mut R,
    job: &ConvertJob,
) -> Result<std::result::Result<Converted, Vec<ValidationError>>> {
    let warnings = match validate_params(&job.params).into_result() {
        Ok(warnings) => warnings,
        Err(errors) => return Ok(Err(errors)),
    };
    reporting::print_warnings(&warnings);

    let result = generate_font(rasterizer, &job.params)
        .with_context(|| format!("Failed to convert font: {}", job.font.display()))?;
    let written = save_font_result(&result, &job.output, job.metadata.as_deref())
        .with_context(|| format!("Failed to write output: {}", job.output.display()))?;

    Ok(Ok(Converted { result, written }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use monofont_encode::testing::BlockRasterizer;
    use monofont_encode::FontMetadata;
    use monofont_format::{BinaryFont, ConvertParams, ErrorCode};
    use std::path::PathBuf;

    fn job(dir: &std::path::Path, output: &str, params: ConvertParams) -> ConvertJob {
        ConvertJob {
            font: PathBuf::from("Block.ttf"),
            output: dir.join(output),
            metadata: Some(dir.join("meta.json")),
            params,
        }
    }

    #[test]
    fn test_convert_module_writes_artifact_and_metadata() {
        let dir = tempfile::tempdir().unwrap();
        let job = job(dir.path(), "font.rs", ConvertParams::new(12).with_iterate(true));

        let converted = convert_with(&mut BlockRasterizer::new(), &job)
            .unwrap()
            .unwrap();
        let source = std::fs::read_to_string(&job.output).unwrap();
        assert!(source.contains("pub const HEIGHT: u16 = 12;"));
        assert!(source.contains("pub fn glyphs()"));
        assert_eq!(converted.written.hash, converted.result.hash);

        let meta = std::fs::read_to_string(dir.path().join("meta.json")).unwrap();
        let meta: FontMetadata = serde_json::from_str(&meta).unwrap();
        assert_eq!(meta.glyphs.len(), 95);
    }

    #[test]
    fn test_convert_binary() {
        let dir = tempfile::tempdir().unwrap();
        let params = ConvertParams::new(10).with_output(OutputKind::Binary);
        let job = job(dir.path(), "font.bin", params);

        convert_with(&mut BlockRasterizer::new(), &job)
            .unwrap()
            .unwrap();
        let bytes = std::fs::read(&job.output).unwrap();
        let font = BinaryFont::parse(&bytes).unwrap();
        assert_eq!(font.glyph_count(), 95);
    }

    #[test]
    fn test_invalid_params_write_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let params = ConvertParams::new(10)
            .with_output(OutputKind::Binary)
            .with_line_run(true);
        let job = job(dir.path(), "font.bin", params);

        let errors = convert_with(&mut BlockRasterizer::new(), &job)
            .unwrap()
            .unwrap_err();
        assert!(errors.iter().any(|e| e.code == ErrorCode::BinaryRequiresBitmap));
        assert!(!job.output.exists());
    }

    #[test]
    fn test_unwritable_destination_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let job = job(&dir.path().join("missing"), "font.rs", ConvertParams::new(8));

        let err = convert_with(&mut BlockRasterizer::new(), &job).unwrap_err();
        assert!(err.to_string().contains("Failed to write output"));
    }
}
