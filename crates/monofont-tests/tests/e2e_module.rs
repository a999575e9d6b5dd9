//! End-to-End Generated Module Tests for monofont
//!
//! Tests compile each generated Rust module with `rustc` and check that its
//! `get_ch` and `glyphs()` agree with `FontData` for every encoding and both
//! index kinds:
//! - Defined characters
//! - Gaps inside the ordinal range
//! - Characters outside the font
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p monofont-tests --test e2e_module
//! ```

use std::fs;
use std::path::Path;
use std::process::Command;

use monofont_encode::generate_font;
use monofont_encode::testing::BlockRasterizer;
use monofont_format::{ConvertParams, IndexKind};
use monofont_tests::fixtures::{params_for, sparse_charset, ALL_ENCODINGS, CLOCK_CHARSET};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

/// Prints one line per argument character, then one per `glyphs()` entry.
const DRIVER: &str = r#"
mod font;

fn main() {
    let text = std::env::args().nth(1).unwrap_or_default();
    for ch in text.chars() {
        let (data, height, width) = font::get_ch(ch);
        let hex: String = data.iter().map(|b| format!("{b:02x}")).collect();
        println!("get {} {} {} {}", ch as u32, height, width, hex);
    }
    for (ch, (_, _, width)) in font::glyphs() {
        println!("iter {} {}", ch as u32, width);
    }
}
"#;

fn rustc() -> String {
    std::env::var("RUSTC").unwrap_or_else(|_| "rustc".to_string())
}

fn is_rustc_available() -> bool {
    Command::new(rustc())
        .arg("--version")
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

fn hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

/// Writes `source` next to the driver, compiles it and runs it on `text`.
fn run_module(dir: &Path, name: &str, source: &str, text: &str) -> String {
    let crate_dir = dir.join(name);
    fs::create_dir_all(&crate_dir).unwrap();
    fs::write(crate_dir.join("font.rs"), source).unwrap();
    fs::write(crate_dir.join("main.rs"), DRIVER).unwrap();

    let binary = crate_dir.join("driver");
    let build = Command::new(rustc())
        .args(["--edition", "2021", "-o"])
        .arg(&binary)
        .arg(crate_dir.join("main.rs"))
        .output()
        .unwrap();
    assert!(
        build.status.success(),
        "{name} failed to compile:\n{}",
        String::from_utf8_lossy(&build.stderr)
    );

    let run = Command::new(&binary).arg(text).output().unwrap();
    assert!(run.status.success(), "{name} driver failed");
    String::from_utf8(run.stdout).unwrap()
}

fn check_module(dir: &Path, name: &str, params: &ConvertParams, text: &str, kind: IndexKind) {
    let result = generate_font(&mut BlockRasterizer::new(), params).unwrap();
    let encoded = result.encoded.as_ref().unwrap();
    assert_eq!(encoded.index.kind(), kind, "{name}");
    let data = encoded.as_font_data();

    let source = std::str::from_utf8(&result.bytes).unwrap();
    let output = run_module(dir, name, source, text);

    let mut expected = String::new();
    for ch in text.chars() {
        let glyph = data.glyph(ch);
        expected.push_str(&format!(
            "get {} {} {} {}\n",
            ch as u32,
            glyph.height,
            glyph.width,
            hex(glyph.data)
        ));
    }
    let mut chars = result.metadata.glyphs.clone();
    chars.sort_by_key(|g| g.ordinal);
    for glyph in chars {
        expected.push_str(&format!("iter {} {}\n", glyph.ordinal, glyph.width));
    }
    assert_eq!(output, expected, "{name}");
}

// ============================================================================
// Compiled Modules
// ============================================================================

#[test]
fn test_contiguous_modules_match_font_data() {
    if !is_rustc_available() {
        println!("Skipping test: rustc not available");
        return;
    }
    let dir = TempDir::new().unwrap();
    for (i, encoding) in ALL_ENCODINGS.into_iter().enumerate() {
        let params = params_for(10, encoding)
            .with_charset(CLOCK_CHARSET)
            .with_iterate(true);
        // ';' is a gap, 'A' and U+2603 lie outside the range
        check_module(
            dir.path(),
            &format!("contiguous_{i}"),
            &params,
            "0189:;?A\u{2603}",
            IndexKind::Contiguous,
        );
    }
}

#[test]
fn test_sparse_modules_match_font_data() {
    if !is_rustc_available() {
        println!("Skipping test: rustc not available");
        return;
    }
    let dir = TempDir::new().unwrap();
    let present: String = sparse_charset();
    let text = format!("{present}?!\u{3e7}\u{3e9}\u{2603}");
    for (i, encoding) in ALL_ENCODINGS.into_iter().enumerate() {
        let params = params_for(10, encoding)
            .with_charset(sparse_charset())
            .with_iterate(true);
        check_module(
            dir.path(),
            &format!("sparse_{i}"),
            &params,
            &text,
            IndexKind::Sparse,
        );
    }
}
