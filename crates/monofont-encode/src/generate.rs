//! One-shot conversion entry points.

use std::path::Path;

use monofont_format::{ConvertParams, OutputKind};
use tracing::{event, Level};

use crate::artifact::{hash_bytes, write_atomic, WrittenArtifact};
use crate::encoded::{EncodedFont, FontMetadata};
use crate::error::EncodeError;
use crate::font::Font;
use crate::module::write_module;
use crate::raster::Rasterizer;

/// Result of a conversion.
#[derive(Debug, Clone)]
pub struct FontResult {
    /// Artifact kind.
    pub output: OutputKind,
    /// Artifact contents: UTF-8 Rust source or binary font bytes.
    pub bytes: Vec<u8>,
    /// BLAKE3 hash of `bytes`.
    pub hash: String,
    /// Sidecar metadata.
    pub metadata: FontMetadata,
    /// Blob and index, for module outputs.
    pub encoded: Option<EncodedFont>,
}

/// Converts an outline font into an in-memory artifact.
pub fn generate_font<R: Rasterizer + ?Sized>(
    rasterizer: &mut R,
    params: &ConvertParams,
) -> Result<FontResult, EncodeError> {
    let font = Font::new(rasterizer, params)?;
    event!(
        Level::INFO,
        source = font.source(),
        height = font.height(),
        baseline = font.baseline(),
        max_width = font.max_width(),
        glyphs = font.glyphs().count(),
        "rendered font"
    );

    let result = match params.output {
        OutputKind::Module => {
            let encoded = font.encode(params.encoding())?;
            let source = write_module(&font, &encoded, params.iterate)?;
            let metadata = FontMetadata::for_module(&font, &encoded);
            let bytes = source.into_bytes();
            FontResult {
                output: OutputKind::Module,
                hash: hash_bytes(&bytes),
                bytes,
                metadata,
                encoded: Some(encoded),
            }
        }
        OutputKind::Binary => {
            let bytes = font.encode_binary(params.mapping, params.bit_order)?;
            let header = font.header(params.encoding())?;
            let record_len = 1 + params
                .encoding()
                .bitmap_len(font.max_width() as usize, font.height() as usize)
                .unwrap_or(0);
            let metadata = FontMetadata::for_binary(&font, header, record_len, bytes.len());
            FontResult {
                output: OutputKind::Binary,
                hash: hash_bytes(&bytes),
                bytes,
                metadata,
                encoded: None,
            }
        }
    };
    Ok(result)
}

/// Writes a conversion result and, if requested, its JSON metadata.
pub fn save_font_result(
    result: &FontResult,
    path: &Path,
    metadata_path: Option<&Path>,
) -> Result<WrittenArtifact, EncodeError> {
    let written = write_atomic(path, &result.bytes)?;
    if let Some(metadata_path) = metadata_path {
        let json = result
            .metadata
            .to_json_pretty()
            .map_err(|e| EncodeError::DestinationUnwritable {
                path: metadata_path.to_path_buf(),
                source: e.into(),
            })?;
        write_atomic(metadata_path, json.as_bytes())?;
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::BlockRasterizer;
    use monofont_format::{BinaryFont, GlyphLookup};

    #[test]
    fn test_module_result() {
        let mut raster = BlockRasterizer::new();
        let result = generate_font(&mut raster, &ConvertParams::new(14)).unwrap();
        assert_eq!(result.output, OutputKind::Module);
        assert_eq!(result.hash, hash_bytes(&result.bytes));
        let encoded = result.encoded.as_ref().unwrap();
        assert_eq!(result.metadata.data_len, encoded.data.len());
        assert_eq!(result.metadata.glyphs.len(), 95);
        assert_eq!(result.metadata.glyphs[0].ordinal, '?' as u32);
        assert!(std::str::from_utf8(&result.bytes).is_ok());
    }

    #[test]
    fn test_binary_result() {
        let mut raster = BlockRasterizer::new();
        let params = ConvertParams::new(14).with_output(OutputKind::Binary);
        let result = generate_font(&mut raster, &params).unwrap();
        assert!(result.encoded.is_none());
        let font = BinaryFont::parse(&result.bytes).unwrap();
        assert_eq!(font.glyph_count(), 95);
        assert_eq!(font.height(), 14);
        let last = result.metadata.glyphs.last().unwrap();
        assert_eq!(last.offset + last.len, result.bytes.len());
    }

    #[test]
    fn test_generation_is_deterministic() {
        let params = ConvertParams::new(11).with_line_run(true);
        let a = generate_font(&mut BlockRasterizer::new(), &params).unwrap();
        let b = generate_font(&mut BlockRasterizer::new(), &params).unwrap();
        assert_eq!(a.hash, b.hash);
    }

    #[test]
    fn test_save_writes_metadata() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("font.rs");
        let meta = dir.path().join("font.json");
        let result = generate_font(&mut BlockRasterizer::new(), &ConvertParams::new(9)).unwrap();

        let written = save_font_result(&result, &out, Some(&meta)).unwrap();
        assert_eq!(written.hash, result.hash);
        let json = std::fs::read_to_string(&meta).unwrap();
        let parsed: FontMetadata = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, result.metadata);
    }
}
