//! Rotated drawing through a surface adapter.
//!
//! [`Rotated`] presents a surface turned clockwise by a multiple of 90
//! degrees. Logical coordinates are remapped at the primitive boundary, so
//! the writer draws as if the display were upright. For 90 and 270 degrees
//! the usable width and height swap.

use crate::surface::Surface;

/// Clockwise display rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Rotation {
    /// Upright.
    #[default]
    Deg0,
    /// A quarter turn clockwise.
    Deg90,
    /// Upside down.
    Deg180,
    /// Three quarter turns clockwise.
    Deg270,
}

impl Rotation {
    /// Parses 0, 90, 180 or 270.
    pub fn from_degrees(degrees: u32) -> Option<Self> {
        match degrees {
            0 => Some(Rotation::Deg0),
            90 => Some(Rotation::Deg90),
            180 => Some(Rotation::Deg180),
            270 => Some(Rotation::Deg270),
            _ => None,
        }
    }

    /// Angle in degrees.
    pub fn degrees(self) -> u32 {
        match self {
            Rotation::Deg0 => 0,
            Rotation::Deg90 => 90,
            Rotation::Deg180 => 180,
            Rotation::Deg270 => 270,
        }
    }

    /// True when logical width and height are swapped.
    pub fn swaps_axes(self) -> bool {
        matches!(self, Rotation::Deg90 | Rotation::Deg270)
    }
}

/// A surface seen through a rotation.
#[derive(Debug)]
pub struct Rotated<S> {
    inner: S,
    rotation: Rotation,
}

impl<S: Surface> Rotated<S> {
    /// Wraps `inner`.
    pub fn new(inner: S, rotation: Rotation) -> Self {
        Self { inner, rotation }
    }

    /// The rotation applied.
    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    /// Unwraps the underlying surface.
    pub fn into_inner(self) -> S {
        self.inner
    }

    fn physical_dims(&self) -> (i32, i32) {
        (self.inner.width() as i32, self.inner.height() as i32)
    }

    /// Maps a logical point to the physical surface.
    pub fn map(&self, x: i32, y: i32) -> (i32, i32) {
        let (w, h) = self.physical_dims();
        match self.rotation {
            Rotation::Deg0 => (x, y),
            Rotation::Deg90 => (w - 1 - y, x),
            Rotation::Deg180 => (w - 1 - x, h - 1 - y),
            Rotation::Deg270 => (y, h - 1 - x),
        }
    }
}

impl<S: Surface> Surface for Rotated<S> {
    fn width(&self) -> u32 {
        if self.rotation.swaps_axes() {
            self.inner.height()
        } else {
            self.inner.width()
        }
    }

    fn height(&self) -> u32 {
        if self.rotation.swaps_axes() {
            self.inner.width()
        } else {
            self.inner.height()
        }
    }

    fn pixel(&mut self, x: i32, y: i32, on: bool) {
        let (px, py) = self.map(x, y);
        self.inner.pixel(px, py, on);
    }

    fn hline(&mut self, x: i32, y: i32, len: u32, on: bool) {
        if len == 0 {
            return;
        }
        let (w, h) = self.physical_dims();
        let n = len as i32;
        match self.rotation {
            Rotation::Deg0 => self.inner.hline(x, y, len, on),
            Rotation::Deg90 => self.inner.vline(w - 1 - y, x, len, on),
            Rotation::Deg180 => self.inner.hline(w - x - n, h - 1 - y, len, on),
            Rotation::Deg270 => self.inner.vline(y, h - x - n, len, on),
        }
    }

    fn vline(&mut self, x: i32, y: i32, len: u32, on: bool) {
        if len == 0 {
            return;
        }
        let (w, h) = self.physical_dims();
        let n = len as i32;
        match self.rotation {
            Rotation::Deg0 => self.inner.vline(x, y, len, on),
            Rotation::Deg90 => self.inner.hline(w - y - n, x, len, on),
            Rotation::Deg180 => self.inner.vline(w - 1 - x, h - y - n, len, on),
            Rotation::Deg270 => self.inner.hline(y, h - 1 - x, len, on),
        }
    }
}
