//! Line-run encoder.
//!
//! Produces the stream read by `monofont_format::LineRuns`, trying both
//! orientations and keeping the shorter one.

use monofont_format::LineOrientation;
use tracing::{event, Level};

use crate::bitmap::Bitmap;
use crate::error::EncodeError;

/// Largest cell dimension a line-run stream can address.
const MAX_LINE_RUN_DIM: u32 = u8::MAX as u32;

/// Encodes `bitmap` as a line-run stream.
///
/// Ties between orientations go to horizontal.
pub fn encode_line_runs(bitmap: &Bitmap) -> Result<Vec<u8>, EncodeError> {
    if bitmap.width() > MAX_LINE_RUN_DIM || bitmap.height() > MAX_LINE_RUN_DIM {
        return Err(EncodeError::overflow(format!(
            "{}x{} cell is too large for line-run encoding (max {MAX_LINE_RUN_DIM})",
            bitmap.width(),
            bitmap.height()
        )));
    }

    let horizontal = encode_lines(bitmap, LineOrientation::Horizontal);
    let vertical = encode_lines(bitmap, LineOrientation::Vertical);
    event!(
        Level::TRACE,
        horizontal = horizontal.len(),
        vertical = vertical.len(),
        "line-run orientations"
    );
    if vertical.len() < horizontal.len() {
        Ok(vertical)
    } else {
        Ok(horizontal)
    }
}

/// Runs of on-pixels along one line as `(start, length)` pairs.
fn line_runs(bitmap: &Bitmap, orientation: LineOrientation, line: u32) -> Vec<u8> {
    let len = match orientation {
        LineOrientation::Horizontal => bitmap.width(),
        LineOrientation::Vertical => bitmap.height(),
    };
    let pixel = |i| match orientation {
        LineOrientation::Horizontal => bitmap.get(i, line),
        LineOrientation::Vertical => bitmap.get(line, i),
    };

    let mut runs = Vec::new();
    let mut start = None;
    for i in 0..=len {
        let on = i < len && pixel(i);
        match (on, start) {
            (true, None) => start = Some(i),
            (false, Some(s)) => {
                runs.push(s as u8);
                runs.push((i - s) as u8);
                start = None;
            }
            _ => {}
        }
    }
    runs
}

fn encode_lines(bitmap: &Bitmap, orientation: LineOrientation) -> Vec<u8> {
    let lines = match orientation {
        LineOrientation::Horizontal => bitmap.height(),
        LineOrientation::Vertical => bitmap.width(),
    };

    let mut out = vec![orientation.as_byte(), 0];
    let mut entries = 0u8;
    let mut prev: Option<(u32, Vec<u8>)> = None;

    for line in 0..lines {
        let runs = line_runs(bitmap, orientation, line);
        if runs.is_empty() {
            prev = None;
            continue;
        }
        match &prev {
            Some((prev_line, prev_runs)) if prev_line + 1 == line && *prev_runs == runs => {
                out.push(0);
            }
            _ => {
                out.push((runs.len() / 2) as u8);
                out.push(line as u8);
                out.extend_from_slice(&runs);
            }
        }
        entries += 1;
        prev = Some((line, runs));
    }

    out[1] = entries;
    out
}
