//! Emits byte arrays as Rust `&[u8]` constants.

use std::fmt::{self, Write};

/// Bytes per source line.
pub const BYTES_PER_LINE: usize = 16;

/// Writes a byte-string constant, 16 escaped bytes per line.
///
/// ```text
/// pub const FONT: &[u8] = b"\
///     \x08\x00\x00\x3c...\
///     \x18\x00";
/// ```
pub struct ByteWriter<'a, W: Write> {
    out: &'a mut W,
    line_bytes: usize,
}

impl<'a, W: Write> ByteWriter<'a, W> {
    /// Starts the constant `name`.
    pub fn new(out: &'a mut W, name: &str) -> Result<Self, fmt::Error> {
        write!(out, "pub const {name}: &[u8] = b\"")?;
        Ok(Self { out, line_bytes: 0 })
    }

    /// Writes one byte.
    pub fn byte(&mut self, value: u8) -> fmt::Result {
        if self.line_bytes == 0 {
            self.out.write_str("\\\n    ")?;
        }
        write!(self.out, "\\x{value:02x}")?;
        self.line_bytes = (self.line_bytes + 1) % BYTES_PER_LINE;
        Ok(())
    }

    /// Writes a run of bytes.
    pub fn bytes(&mut self, values: &[u8]) -> fmt::Result {
        values.iter().try_for_each(|&b| self.byte(b))
    }

    /// Closes the constant.
    pub fn finish(self) -> fmt::Result {
        self.out.write_str("\";\n")
    }
}

/// Formats `bytes` as a complete constant.
pub fn byte_constant(name: &str, bytes: &[u8]) -> Result<String, fmt::Error> {
    let mut out = String::with_capacity(bytes.len() * 4 + bytes.len() / BYTES_PER_LINE * 8 + 40);
    let mut writer = ByteWriter::new(&mut out, name)?;
    writer.bytes(bytes)?;
    writer.finish()?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_constant() {
        assert_eq!(byte_constant("X", &[]).unwrap(), "pub const X: &[u8] = b\"\";\n");
    }

    #[test]
    fn test_wraps_every_sixteen_bytes() {
        let bytes: Vec<u8> = (0..18).collect();
        let text = byte_constant("FONT", &bytes).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "pub const FONT: &[u8] = b\"\\");
        assert_eq!(
            lines[1],
            "    \\x00\\x01\\x02\\x03\\x04\\x05\\x06\\x07\\x08\\x09\\x0a\\x0b\\x0c\\x0d\\x0e\\x0f\\"
        );
        assert_eq!(lines[2], "    \\x10\\x11\";");
    }

    #[test]
    fn test_exact_line_has_no_trailing_continuation() {
        let text = byte_constant("A", &[0xff; 16]).unwrap();
        assert!(text.ends_with("\\xff\";\n"));
        assert_eq!(text.lines().count(), 2);
    }
}
