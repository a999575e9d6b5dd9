use colored::Colorize;
use monofont_encode::{FontMetadata, WrittenArtifact};
use monofont_format::{ValidationError, ValidationWarning};

pub(crate) fn print_errors(errors: &[ValidationError]) {
    for error in errors {
        let path = error
            .path
            .as_ref()
            .map(|p| format!(" ({})", p))
            .unwrap_or_default();
        println!(
            "  {} [{}]{}: {}",
            "x".red(),
            error.code,
            path.dimmed(),
            error.message
        );
    }
}

pub(crate) fn print_warnings(warnings: &[ValidationWarning]) {
    for warning in warnings {
        println!(
            "  {} [{}]: {}",
            "!".yellow(),
            warning.code,
            warning.message
        );
    }
}

pub(crate) fn print_metadata(metadata: &FontMetadata) {
    let header = &metadata.header;
    println!(
        "{} {} px (requested {}, pixel size {}, {} passes)",
        "Height:".dimmed(),
        header.height,
        metadata.requested_height,
        metadata.pixel_size,
        metadata.fit_passes
    );
    println!("{} {}", "Baseline:".dimmed(), header.baseline);
    println!(
        "{} {}{}",
        "Max width:".dimmed(),
        header.max_width,
        if header.monospaced { " (monospaced)" } else { "" }
    );
    println!("{} {}", "Encoding:".dimmed(), header.encoding.as_str());
    if let Some(index) = metadata.index {
        println!(
            "{} {:?} ({} bytes)",
            "Index:".dimmed(),
            index,
            metadata.index_len
        );
    }
    println!(
        "{} {} ({}..={})",
        "Glyphs:".dimmed(),
        metadata.glyphs.len(),
        header.min_char,
        header.max_char
    );
}

pub(crate) fn print_written(written: &WrittenArtifact) {
    println!(
        "  {} {} ({} bytes, {})",
        "+".green(),
        written.path.display(),
        written.len,
        &written.hash[..16]
    );
}
