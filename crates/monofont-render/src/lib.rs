//! monofont Renderer
//!
//! Draws text in encoded monofont fonts onto 1-bit surfaces. The renderer
//! works from borrowed, immutable font data (a generated module's constants
//! or a binary font file) and needs no allocation to draw.
//!
//! # Features
//!
//! - **All encodings**: row and column bitmaps in both bit orders, and
//!   horizontal or vertical line-run streams
//! - **Rotation**: a [`Rotated`] adapter turns any surface by 90, 180 or 270
//!   degrees
//! - **Preview**: [`MonoBuffer`] renders to ASCII art or a PNG image
//!
//! # Example
//!
//! ```ignore
//! use monofont_render::{MonoBuffer, Rotated, Rotation, Writer};
//!
//! let mut screen = MonoBuffer::new(128, 64);
//! let mut portrait = Rotated::new(&mut screen, Rotation::Deg90);
//! let mut writer = Writer::new(&font);
//! writer.draw_text(&mut portrait, "12:45");
//! ```

pub mod png;
pub mod rotation;
pub mod surface;
pub mod writer;

pub use self::png::{write_png_to_vec, PngError};
pub use rotation::{Rotated, Rotation};
pub use surface::{MonoBuffer, Surface};
pub use writer::{Cursor, Writer};
