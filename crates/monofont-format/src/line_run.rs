//! Line-run stream reader.
//!
//! A line-run stream replaces a glyph bitmap with lists of "on" runs:
//!
//! ```text
//! orientation:1B  (0 = rows, 1 = columns)
//! entry_count:1B
//! entry*          run_count:1B line:1B (start:1B length:1B){run_count}
//!                 | 0x00   same runs as the previous entry, on the next line
//! ```
//!
//! Lines without runs are not stored. A `0x00` entry never means "empty".

use serde::{Deserialize, Serialize};

/// Direction of the lines in a line-run stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineOrientation {
    /// Lines are pixel rows; runs are horizontal spans.
    Horizontal,
    /// Lines are pixel columns; runs are vertical spans.
    Vertical,
}

impl LineOrientation {
    /// Byte stored at the head of the stream.
    pub fn as_byte(self) -> u8 {
        match self {
            LineOrientation::Horizontal => 0,
            LineOrientation::Vertical => 1,
        }
    }

    /// Parses the stream head byte.
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            0 => Some(LineOrientation::Horizontal),
            1 => Some(LineOrientation::Vertical),
            _ => None,
        }
    }
}

/// One decoded line: its index within the glyph cell and its runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunLine<'a> {
    /// Row (horizontal) or column (vertical) index within the cell.
    pub line: u8,
    runs: &'a [u8],
}

impl<'a> RunLine<'a> {
    /// `(start, length)` pairs along the line.
    pub fn runs(&self) -> impl Iterator<Item = (u8, u8)> + 'a {
        self.runs.chunks_exact(2).map(|pair| (pair[0], pair[1]))
    }

    /// Number of runs on the line.
    pub fn run_count(&self) -> usize {
        self.runs.len() / 2
    }
}

/// Iterator over the lines of a line-run stream.
///
/// Truncated or malformed streams end the iteration early; they never panic.
#[derive(Debug, Clone)]
pub struct LineRuns<'a> {
    orientation: LineOrientation,
    bytes: &'a [u8],
    pos: usize,
    remaining: u8,
    prev: Option<RunLine<'a>>,
}

impl<'a> LineRuns<'a> {
    /// Starts reading a stream positioned at its orientation byte.
    pub fn parse(stream: &'a [u8]) -> Option<Self> {
        let orientation = LineOrientation::from_byte(*stream.first()?)?;
        let remaining = *stream.get(1)?;
        Some(Self {
            orientation,
            bytes: stream,
            pos: 2,
            remaining,
            prev: None,
        })
    }

    /// Orientation declared by the stream.
    pub fn orientation(&self) -> LineOrientation {
        self.orientation
    }

    /// Bytes read so far, including the two header bytes.
    pub fn consumed(&self) -> usize {
        self.pos
    }

    fn read_entry(&mut self) -> Option<RunLine<'a>> {
        let run_count = *self.bytes.get(self.pos)? as usize;
        if run_count == 0 {
            let prev = self.prev?;
            self.pos += 1;
            return Some(RunLine {
                line: prev.line.checked_add(1)?,
                runs: prev.runs,
            });
        }

        let line = *self.bytes.get(self.pos + 1)?;
        let start = self.pos + 2;
        let end = start + 2 * run_count;
        let runs = self.bytes.get(start..end)?;
        self.pos = end;
        Some(RunLine { line, runs })
    }
}

impl<'a> Iterator for LineRuns<'a> {
    type Item = RunLine<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        match self.read_entry() {
            Some(line) => {
                self.remaining -= 1;
                self.prev = Some(line);
                Some(line)
            }
            None => {
                self.remaining = 0;
                None
            }
        }
    }
}

/// Length in bytes of the line-run stream at the head of `stream`.
pub fn stream_len(stream: &[u8]) -> usize {
    match LineRuns::parse(stream) {
        Some(mut runs) => {
            runs.by_ref().for_each(drop);
            runs.consumed()
        }
        None => 0,
    }
}
