//! Deterministic PNG export of rendered buffers.

use png::{BitDepth, ColorType, Compression, Encoder, FilterType};
use thiserror::Error;

use crate::surface::{MonoBuffer, Surface};

/// Errors from PNG export.
#[derive(Debug, Error)]
pub enum PngError {
    #[error("PNG encoding error: {0}")]
    Encoding(#[from] png::EncodingError),

    #[error("Invalid dimensions: {0}")]
    InvalidDimensions(String),
}

/// Encodes `buffer` as an 8-bit grayscale PNG, each pixel scaled to a
/// `scale` x `scale` block.
pub fn write_png_to_vec(buffer: &MonoBuffer, scale: u32) -> Result<Vec<u8>, PngError> {
    let scale = scale.max(1);
    let (Some(width), Some(height)) = (
        buffer.width().checked_mul(scale),
        buffer.height().checked_mul(scale),
    ) else {
        return Err(PngError::InvalidDimensions(format!(
            "{}x{} at scale {} overflows",
            buffer.width(),
            buffer.height(),
            scale
        )));
    };
    if width == 0 || height == 0 {
        return Err(PngError::InvalidDimensions(format!(
            "cannot encode a {}x{} image",
            width, height
        )));
    }

    let gray = buffer.to_gray8();
    let src_width = buffer.width() as usize;
    let mut data = Vec::with_capacity(width as usize * height as usize);
    for y in 0..height as usize {
        let row = &gray[(y / scale as usize) * src_width..][..src_width];
        for &px in row {
            data.extend(std::iter::repeat(px).take(scale as usize));
        }
    }

    let mut out = Vec::new();
    {
        let mut encoder = Encoder::new(&mut out, width, height);
        encoder.set_color(ColorType::Grayscale);
        encoder.set_depth(BitDepth::Eight);
        encoder.set_compression(Compression::Default);
        encoder.set_filter(FilterType::NoFilter);

        let mut writer = encoder.write_header()?;
        writer.write_image_data(&data)?;
        writer.finish()?;
    }
    Ok(out)
}
