//! monofont CLI - converts outline fonts for monochrome embedded displays
//!
//! This binary provides commands for converting fonts to Rust modules or
//! binary font files, previewing text, and inspecting converted fonts.

use clap::Parser;
use monofont_format::{ConvertParams, OutputKind};
use monofont_render::Rotation;
use std::path::PathBuf;
use std::process::ExitCode;

mod cli_args;

use cli_args::{Cli, Commands};
use monofont_cli::commands::preview::{PreviewOptions, PreviewSource};
use monofont_cli::{commands, logging};

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = logging::init(cli.verbose) {
        eprintln!("{}: {}", colored::Colorize::red("error"), e);
        return ExitCode::from(1);
    }

    let result = match cli.command {
        Commands::Convert(args) => args
            .into_job(OutputKind::Module)
            .and_then(|job| commands::convert::run(&job)),
        Commands::Binary(args) => args
            .into_job(OutputKind::Binary)
            .and_then(|job| commands::convert::run(&job)),
        Commands::Preview {
            font,
            binary,
            height,
            encoding,
            text,
            width,
            rotate,
            inverse,
            png,
            scale,
        } => {
            let source = match (font, binary) {
                (_, Some(binary)) => PreviewSource::Binary(PathBuf::from(binary)),
                (font, None) => PreviewSource::Outline {
                    font: PathBuf::from(font.unwrap_or_default()),
                    params: encoding.apply(ConvertParams::new(height)),
                },
            };
            let options = PreviewOptions {
                text,
                width,
                rotation: Rotation::from_degrees(rotate).unwrap_or_default(),
                inverse,
                png: png.map(PathBuf::from),
                scale,
            };
            commands::preview::run(&source, &options)
        }
        Commands::Inspect { file, glyph, json } => commands::inspect::run(&file, glyph, json),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", colored::Colorize::red("error"), e);
            ExitCode::from(1)
        }
    }
}
