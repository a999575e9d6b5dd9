//! Conversion fixtures built on the synthetic block rasterizer.

use monofont_encode::testing::BlockRasterizer;
use monofont_encode::Font;
use monofont_format::{BitOrder, ConvertParams, GlyphEncoding, Mapping};

/// Every glyph encoding: four bitmap variants and line-run.
pub const ALL_ENCODINGS: [GlyphEncoding; 5] = [
    GlyphEncoding::Bitmap {
        mapping: Mapping::Row,
        order: BitOrder::Normal,
    },
    GlyphEncoding::Bitmap {
        mapping: Mapping::Row,
        order: BitOrder::Reversed,
    },
    GlyphEncoding::Bitmap {
        mapping: Mapping::Column,
        order: BitOrder::Normal,
    },
    GlyphEncoding::Bitmap {
        mapping: Mapping::Column,
        order: BitOrder::Reversed,
    },
    GlyphEncoding::LineRun,
];

/// Ordinals spread far enough apart to force a sparse index.
pub const SPARSE_ORDINALS: [u32; 5] = [32, 40, 1000, 5000, 60000];

/// Charset for a clock display.
pub const CLOCK_CHARSET: &str = "0123456789:";

/// Params selecting `encoding` at `height`.
pub fn params_for(height: u32, encoding: GlyphEncoding) -> ConvertParams {
    match encoding {
        GlyphEncoding::Bitmap { mapping, order } => ConvertParams::new(height)
            .with_mapping(mapping)
            .with_bit_order(order),
        GlyphEncoding::LineRun => ConvertParams::new(height).with_line_run(true),
    }
}

/// Charset string holding [`SPARSE_ORDINALS`].
pub fn sparse_charset() -> String {
    SPARSE_ORDINALS
        .iter()
        .filter_map(|&o| char::from_u32(o))
        .collect()
}

/// Places every glyph of `params` from a fresh [`BlockRasterizer`].
pub fn block_font(params: &ConvertParams) -> Font {
    Font::new(&mut BlockRasterizer::new(), params).expect("Failed to build block font")
}
