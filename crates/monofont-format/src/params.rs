//! Conversion parameters.
//!
//! Describes one outline-font-to-monofont conversion: target height, glyph
//! encoding, spacing, and which characters to include.

use serde::{Deserialize, Serialize};

use crate::encoding::{BitOrder, GlyphEncoding, Mapping};

/// Smallest ordinal of the default printable ASCII set.
pub const MIN_CHAR: u32 = 32;

/// Largest ordinal of the default printable ASCII set.
pub const MAX_CHAR: u32 = 126;

/// Ordinal of the default (error) character, `?`.
pub const DEFAULT_CHAR: u32 = 63;

/// Kind of artifact a conversion produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OutputKind {
    /// Standalone Rust source module with blob, index and lookup function.
    #[default]
    Module,
    /// Fixed-width random-access binary file (printable ASCII only).
    Binary,
}

/// Parameters for one font conversion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConvertParams {
    /// Requested cell height in pixels.
    pub height: u32,

    /// Bitmap packing direction.
    #[serde(default)]
    pub mapping: Mapping,

    /// Bit order within packed bytes.
    #[serde(default)]
    pub bit_order: BitOrder,

    /// Store glyphs as line-run streams instead of bitmaps.
    #[serde(default)]
    pub line_run: bool,

    /// Give every glyph the width of the widest one.
    #[serde(default)]
    pub monospaced: bool,

    /// Smallest ordinal of the range (ignored when `charset` is set).
    #[serde(default = "default_smallest")]
    pub smallest: u32,

    /// Largest ordinal of the range (ignored when `charset` is set).
    #[serde(default = "default_largest")]
    pub largest: u32,

    /// Ordinal of the glyph substituted for unknown characters.
    #[serde(default = "default_char")]
    pub default_char: u32,

    /// Explicit character set, e.g. `"0123456789:"` for a clock.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub charset: Option<String>,

    /// Emit a `glyphs()` iterator in the generated module.
    #[serde(default)]
    pub iterate: bool,

    /// Artifact kind.
    #[serde(default)]
    pub output: OutputKind,
}

fn default_smallest() -> u32 {
    MIN_CHAR
}

fn default_largest() -> u32 {
    MAX_CHAR
}

fn default_char() -> u32 {
    DEFAULT_CHAR
}

impl ConvertParams {
    /// Creates params for the printable ASCII set at the given height,
    /// column-mapped, normal bit order, proportional.
    pub fn new(height: u32) -> Self {
        Self {
            height,
            mapping: Mapping::default(),
            bit_order: BitOrder::default(),
            line_run: false,
            monospaced: false,
            smallest: MIN_CHAR,
            largest: MAX_CHAR,
            default_char: DEFAULT_CHAR,
            charset: None,
            iterate: false,
            output: OutputKind::default(),
        }
    }

    /// Parses params from a JSON document.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// The glyph encoding these params select.
    pub fn encoding(&self) -> GlyphEncoding {
        if self.line_run {
            GlyphEncoding::LineRun
        } else {
            GlyphEncoding::bitmap(self.mapping, self.bit_order)
        }
    }

    /// Returns true if an explicit, non-empty charset was given.
    pub fn has_charset(&self) -> bool {
        self.charset.as_deref().is_some_and(|c| !c.is_empty())
    }

    /// Sets the bitmap packing direction.
    pub fn with_mapping(mut self, mapping: Mapping) -> Self {
        self.mapping = mapping;
        self
    }

    /// Sets the bit order.
    pub fn with_bit_order(mut self, order: BitOrder) -> Self {
        self.bit_order = order;
        self
    }

    /// Enables or disables line-run encoding.
    pub fn with_line_run(mut self, line_run: bool) -> Self {
        self.line_run = line_run;
        self
    }

    /// Enables or disables monospacing.
    pub fn with_monospaced(mut self, monospaced: bool) -> Self {
        self.monospaced = monospaced;
        self
    }

    /// Sets the inclusive ordinal range.
    pub fn with_range(mut self, smallest: u32, largest: u32) -> Self {
        self.smallest = smallest;
        self.largest = largest;
        self
    }

    /// Sets the default character ordinal.
    pub fn with_default_char(mut self, default_char: u32) -> Self {
        self.default_char = default_char;
        self
    }

    /// Sets an explicit character set.
    pub fn with_charset(mut self, charset: impl Into<String>) -> Self {
        self.charset = Some(charset.into());
        self
    }

    /// Requests a `glyphs()` iterator in the generated module.
    pub fn with_iterate(mut self, iterate: bool) -> Self {
        self.iterate = iterate;
        self
    }

    /// Sets the artifact kind.
    pub fn with_output(mut self, output: OutputKind) -> Self {
        self.output = output;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_params_defaults() {
        let params = ConvertParams::from_json(r#"{"height": 23}"#).unwrap();
        assert_eq!(params, ConvertParams::new(23));
        assert_eq!(
            params.encoding(),
            GlyphEncoding::bitmap(Mapping::Column, BitOrder::Normal)
        );
        assert!(!params.has_charset());
    }

    #[test]
    fn test_params_full_json() {
        let params = ConvertParams::from_json(
            r#"{
                "height": 16,
                "mapping": "row",
                "bit_order": "reversed",
                "monospaced": true,
                "charset": "0123456789:",
                "output": "module"
            }"#,
        )
        .unwrap();
        assert_eq!(
            params.encoding(),
            GlyphEncoding::bitmap(Mapping::Row, BitOrder::Reversed)
        );
        assert!(params.monospaced);
        assert!(params.has_charset());
    }

    #[test]
    fn test_params_reject_unknown_fields() {
        assert!(ConvertParams::from_json(r#"{"height": 8, "colour": 1}"#).is_err());
    }

    #[test]
    fn test_line_run_overrides_mapping() {
        let params = ConvertParams::new(8)
            .with_mapping(Mapping::Row)
            .with_line_run(true);
        assert_eq!(params.encoding(), GlyphEncoding::LineRun);
    }
}
