#![no_main]

//! Decodes arbitrary bytes as font data, binary fonts and line-run streams
//! and renders text with them. Must never panic.

use libfuzzer_sys::fuzz_target;
use monofont_format::{
    BinaryFont, BitOrder, FontData, FontHeader, GlyphEncoding, Index, LineRuns, Mapping,
};
use monofont_render::{MonoBuffer, Writer};

const TEXT: &str = "Az09 ?~\u{e9}\u{2603}";

fuzz_target!(|data: &[u8]| {
    if data.len() < 4 {
        return;
    }
    let (head, rest) = data.split_at(4);
    let encoding = match head[0] % 5 {
        0 => GlyphEncoding::bitmap(Mapping::Row, BitOrder::Normal),
        1 => GlyphEncoding::bitmap(Mapping::Row, BitOrder::Reversed),
        2 => GlyphEncoding::bitmap(Mapping::Column, BitOrder::Normal),
        3 => GlyphEncoding::bitmap(Mapping::Column, BitOrder::Reversed),
        _ => GlyphEncoding::LineRun,
    };
    let split = (head[1] as usize).min(rest.len());
    let (index, blob) = rest.split_at(split);
    let header = FontHeader {
        height: (head[2] % 64) as u16,
        baseline: 0,
        max_width: 0,
        encoding,
        monospaced: false,
        min_char: 32,
        max_char: 32 + head[3] as u32,
        default_char: 63,
    };
    let index = if head[0] & 0x80 != 0 {
        Index::Sparse(index)
    } else {
        Index::Contiguous(index)
    };

    let mut screen = MonoBuffer::new(32, 32);
    let font = FontData::new(header, blob, index);
    Writer::new(&font).draw_text(&mut screen, TEXT);

    if let Ok(binary) = BinaryFont::parse(data) {
        Writer::new(&binary).draw_text(&mut screen, TEXT);
    }

    if let Some(lines) = LineRuns::parse(rest) {
        for line in lines {
            let _ = line.runs().count();
        }
    }
});
