//! Drawing surfaces.

/// A 1-bit drawing target.
///
/// Coordinates are signed so callers can draw partly off-surface;
/// implementations clip.
pub trait Surface {
    /// Usable width in pixels.
    fn width(&self) -> u32;

    /// Usable height in pixels.
    fn height(&self) -> u32;

    /// Sets or clears one pixel.
    fn pixel(&mut self, x: i32, y: i32, on: bool);

    /// Draws `len` pixels rightwards from (`x`, `y`).
    fn hline(&mut self, x: i32, y: i32, len: u32, on: bool) {
        for i in 0..len as i32 {
            self.pixel(x + i, y, on);
        }
    }

    /// Draws `len` pixels downwards from (`x`, `y`).
    fn vline(&mut self, x: i32, y: i32, len: u32, on: bool) {
        for i in 0..len as i32 {
            self.pixel(x, y + i, on);
        }
    }
}

impl<S: Surface + ?Sized> Surface for &mut S {
    fn width(&self) -> u32 {
        (**self).width()
    }

    fn height(&self) -> u32 {
        (**self).height()
    }

    fn pixel(&mut self, x: i32, y: i32, on: bool) {
        (**self).pixel(x, y, on)
    }

    fn hline(&mut self, x: i32, y: i32, len: u32, on: bool) {
        (**self).hline(x, y, len, on)
    }

    fn vline(&mut self, x: i32, y: i32, len: u32, on: bool) {
        (**self).vline(x, y, len, on)
    }
}

/// An in-memory 1-bit framebuffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonoBuffer {
    width: u32,
    height: u32,
    pixels: Vec<bool>,
}

impl MonoBuffer {
    /// Creates a cleared buffer.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![false; width as usize * height as usize],
        }
    }

    fn idx(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x as u32 >= self.width || y as u32 >= self.height {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    /// Reads a pixel; off-surface reads as off.
    pub fn get(&self, x: i32, y: i32) -> bool {
        self.idx(x, y).is_some_and(|i| self.pixels[i])
    }

    /// Clears every pixel.
    pub fn clear(&mut self) {
        self.pixels.fill(false);
    }

    /// Number of pixels that are on.
    pub fn pixel_count(&self) -> usize {
        self.pixels.iter().filter(|&&p| p).count()
    }

    /// Coordinates of every pixel that is on, row by row.
    pub fn lit_pixels(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        let width = self.width as usize;
        self.pixels
            .iter()
            .enumerate()
            .filter(|(_, on)| **on)
            .map(move |(i, _)| ((i % width) as u32, (i / width) as u32))
    }

    /// Renders the buffer as ASCII art, one line per row.
    pub fn to_ascii(&self, on: char, off: char) -> String {
        let mut out = String::with_capacity((self.width as usize + 1) * self.height as usize);
        for row in self.pixels.chunks(self.width.max(1) as usize) {
            out.extend(row.iter().map(|&p| if p { on } else { off }));
            out.push('\n');
        }
        out
    }

    /// One byte per pixel, 255 for on, for grayscale image export.
    pub fn to_gray8(&self) -> Vec<u8> {
        self.pixels.iter().map(|&p| if p { 255 } else { 0 }).collect()
    }
}

impl Surface for MonoBuffer {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn pixel(&mut self, x: i32, y: i32, on: bool) {
        if let Some(i) = self.idx(x, y) {
            self.pixels[i] = on;
        }
    }

    fn hline(&mut self, x: i32, y: i32, len: u32, on: bool) {
        if y < 0 || y as u32 >= self.height {
            return;
        }
        let start = x.max(0) as i64;
        let end = (x as i64 + len as i64).min(self.width as i64);
        for px in start..end {
            let i = y as usize * self.width as usize + px as usize;
            self.pixels[i] = on;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_pixels_clip() {
        let mut buf = MonoBuffer::new(3, 2);
        buf.pixel(-1, 0, true);
        buf.pixel(3, 0, true);
        buf.pixel(0, 2, true);
        assert_eq!(buf.pixel_count(), 0);
        buf.pixel(2, 1, true);
        assert!(buf.get(2, 1));
        assert!(!buf.get(-5, 1));
    }

    #[test]
    fn test_hline_clips_both_ends() {
        let mut buf = MonoBuffer::new(4, 1);
        buf.hline(-2, 0, 10, true);
        assert_eq!(buf.to_ascii('#', '.'), "####\n");
        buf.clear();
        buf.hline(1, 0, 2, true);
        assert_eq!(buf.to_ascii('#', '.'), ".##.\n");
        buf.hline(0, 5, 2, true);
        assert_eq!(buf.pixel_count(), 2);
    }

    #[test]
    fn test_vline_default_impl() {
        let mut buf = MonoBuffer::new(2, 3);
        buf.vline(1, -1, 3, true);
        assert_eq!(buf.to_ascii('#', '.'), ".#\n.#\n..\n");
        assert_eq!(buf.lit_pixels().collect::<Vec<_>>(), vec![(1, 0), (1, 1)]);
    }
}
