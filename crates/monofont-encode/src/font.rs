//! Font assembly: height fitting, glyph placement and record encoding.

use std::collections::BTreeMap;

use byteorder::{ByteOrder, LittleEndian};
use monofont_format::header::{
    binary_signature, BINARY_SIGNATURE_BASE, MAX_CONTIGUOUS_OFFSET, SPARSE_ALIGN,
    SPARSE_OFFSET_SHIFT,
};
use monofont_format::{
    validate_params, BitOrder, ConvertParams, FontHeader, GlyphEncoding, IndexKind, Mapping,
    OutputKind, BINARY_MAGIC, MAX_CHAR, MIN_CHAR,
};
use tracing::{event, Level};

use crate::bitmap::Bitmap;
use crate::charset::CharacterSet;
use crate::encoded::{EncodedFont, IndexTable, RecordInfo};
use crate::error::EncodeError;
use crate::glyph::Glyph;
use crate::line_run::encode_line_runs;
use crate::raster::Rasterizer;

/// Upper bound on height-fitting passes.
pub const MAX_FIT_PASSES: usize = 10;

/// A glyph placed in its font cell.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedGlyph {
    /// The character.
    pub ch: char,
    /// Cell bitmap, `height` rows by the record width.
    pub cell: Bitmap,
    /// The glyph's own width, before monospacing.
    pub char_width: u32,
}

/// Outcome of height fitting.
struct Fit {
    pixel_size: u32,
    passes: usize,
    max_ascent: u32,
    max_descent: u32,
    glyphs: Vec<(char, Glyph)>,
}

/// A rendered font, ready to be encoded.
#[derive(Debug, Clone)]
pub struct Font {
    source: String,
    charset: CharacterSet,
    requested_height: u32,
    pixel_size: u32,
    passes: usize,
    height: u32,
    baseline: u32,
    max_width: u32,
    monospaced: bool,
    glyphs: Vec<PlacedGlyph>,
    slots: BTreeMap<u32, usize>,
}

impl Font {
    /// Validates `params`, rasterizes the character set and places every
    /// glyph in a cell of the fitted height.
    pub fn new<R: Rasterizer + ?Sized>(
        rasterizer: &mut R,
        params: &ConvertParams,
    ) -> Result<Self, EncodeError> {
        let warnings = validate_params(params)
            .into_result()
            .map_err(EncodeError::InvalidParams)?;
        for warning in &warnings {
            event!(Level::WARN, code = %warning.code, "{}", warning.message);
        }

        let source = rasterizer.name().to_string();
        let charset = CharacterSet::plan(params, &source, |ch| rasterizer.has_glyph(ch))?;
        let chars = charset.render_order();
        event!(
            Level::DEBUG,
            source = %source,
            chars = chars.len(),
            min = charset.min(),
            max = charset.max(),
            "planned character set"
        );

        let fit = fit_height(rasterizer, &chars, params.height)?;
        let monospaced = params.monospaced || params.output == OutputKind::Binary;
        let height = fit.max_ascent + fit.max_descent;
        let max_width = fit
            .glyphs
            .iter()
            .map(|(_, g)| g.record_width())
            .max()
            .unwrap_or(0);

        let mut glyphs = Vec::with_capacity(fit.glyphs.len());
        let mut slots = BTreeMap::new();
        for (ch, glyph) in &fit.glyphs {
            let char_width = glyph.record_width();
            let width = if monospaced { max_width } else { char_width };
            let mut cell = Bitmap::new(width, height);
            cell.bitblt(
                &glyph.bitmap,
                fit.max_ascent - glyph.ascent(),
                glyph.placement_left(),
            );
            slots.insert(*ch as u32, glyphs.len());
            glyphs.push(PlacedGlyph {
                ch: *ch,
                cell,
                char_width,
            });
        }

        Ok(Self {
            source,
            charset,
            requested_height: params.height,
            pixel_size: fit.pixel_size,
            passes: fit.passes,
            height,
            baseline: fit.max_ascent,
            max_width,
            monospaced,
            glyphs,
            slots,
        })
    }

    /// Label of the outline source.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The planned character set.
    pub fn charset(&self) -> &CharacterSet {
        &self.charset
    }

    /// Height asked for.
    pub fn requested_height(&self) -> u32 {
        self.requested_height
    }

    /// Pixel size the rasterizer was finally driven at.
    pub fn pixel_size(&self) -> u32 {
        self.pixel_size
    }

    /// Number of fitting passes run.
    pub fn passes(&self) -> usize {
        self.passes
    }

    /// Actual cell height.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Rows from the top of the cell to the baseline.
    pub fn baseline(&self) -> u32 {
        self.baseline
    }

    /// Widest record.
    pub fn max_width(&self) -> u32 {
        self.max_width
    }

    /// Whether every cell is `max_width` wide.
    pub fn is_monospaced(&self) -> bool {
        self.monospaced
    }

    /// Looks up a placed glyph.
    pub fn glyph(&self, ch: char) -> Option<&PlacedGlyph> {
        self.slots.get(&(ch as u32)).map(|&i| &self.glyphs[i])
    }

    /// Placed glyphs in ordinal order.
    pub fn glyphs(&self) -> impl Iterator<Item = &PlacedGlyph> + '_ {
        self.slots.values().map(move |&i| &self.glyphs[i])
    }

    /// Header describing this font in `encoding`.
    pub fn header(&self, encoding: GlyphEncoding) -> Result<FontHeader, EncodeError> {
        Ok(FontHeader {
            height: to_u16(self.height, "height")?,
            baseline: to_u16(self.baseline, "baseline")?,
            max_width: to_u16(self.max_width, "max_width")?,
            encoding,
            monospaced: self.monospaced,
            min_char: self.charset.min(),
            max_char: self.charset.max(),
            default_char: self.charset.default_char().map_or(0, |c| c as u32),
        })
    }

    /// Encodes one record: 2-byte width then the glyph body.
    fn record(&self, glyph: &PlacedGlyph, encoding: GlyphEncoding) -> Result<Vec<u8>, EncodeError> {
        let width = to_u16(glyph.cell.width(), "glyph width")?;
        let mut record = vec![0u8; 2];
        LittleEndian::write_u16(&mut record, width);
        match encoding {
            GlyphEncoding::Bitmap {
                mapping: Mapping::Row,
                order,
            } => record.extend(glyph.cell.row_bytes(order)),
            GlyphEncoding::Bitmap {
                mapping: Mapping::Column,
                order,
            } => record.extend(glyph.cell.col_bytes(order)),
            GlyphEncoding::LineRun => record.extend(encode_line_runs(&glyph.cell)?),
        }
        Ok(record)
    }

    /// Encodes the glyph blob and its index.
    ///
    /// The default glyph is record 0. The index is contiguous unless a
    /// sparse one would be smaller.
    pub fn encode(&self, encoding: GlyphEncoding) -> Result<EncodedFont, EncodeError> {
        let header = self.header(encoding)?;
        let defined = self.charset.render_order().len();
        let kind = choose_index(defined, self.charset.range_len());
        event!(
            Level::DEBUG,
            encoding = encoding.as_str(),
            index = ?kind,
            defined,
            range = self.charset.range_len(),
            "encoding font"
        );

        let mut blob = Blob::default();
        let default = self.charset.default_char();
        if let Some(ch) = default {
            blob.append(ch, self.record_for(ch, encoding)?);
        }

        let index = match kind {
            IndexKind::Contiguous => {
                let mut table = Vec::with_capacity(2 * (self.charset.range_len() as usize + 1));
                for ordinal in self.charset.min()..=self.charset.max() {
                    let offset = match char::from_u32(ordinal) {
                        Some(ch) if Some(ch) == default => 0,
                        Some(ch) if self.charset.contains(ch) => {
                            blob.append(ch, self.record_for(ch, encoding)?)
                        }
                        _ => 0,
                    };
                    put_offset(&mut table, offset)?;
                }
                put_offset(&mut table, blob.data.len())?;
                IndexTable::Contiguous(table)
            }
            IndexKind::Sparse => {
                let mut chars = self.charset.render_order();
                chars.sort_unstable();
                let mut table = Vec::with_capacity(4 * chars.len());
                for ch in chars {
                    let ordinal = u16::try_from(ch as u32).map_err(|_| {
                        EncodeError::overflow(format!(
                            "{ch:?} (U+{:04X}) does not fit a sparse index entry",
                            ch as u32
                        ))
                    })?;
                    let offset = if Some(ch) == default {
                        0
                    } else {
                        blob.pad_to(SPARSE_ALIGN);
                        blob.append(ch, self.record_for(ch, encoding)?)
                    };
                    let scaled = to_u16((offset >> SPARSE_OFFSET_SHIFT) as u32, "sparse offset")?;
                    put_u16(&mut table, ordinal);
                    put_u16(&mut table, scaled);
                }
                IndexTable::Sparse(table)
            }
        };

        Ok(EncodedFont {
            header,
            data: blob.data,
            index,
            records: blob.records,
        })
    }

    fn record_for(&self, ch: char, encoding: GlyphEncoding) -> Result<Vec<u8>, EncodeError> {
        match self.glyph(ch) {
            Some(glyph) => self.record(glyph, encoding),
            None => Err(EncodeError::unreadable(
                self.source.clone(),
                format!("{ch:?} was planned but never rasterized"),
            )),
        }
    }

    /// Encodes the fixed-width binary artifact for printable ASCII.
    ///
    /// Every record is a 1-byte advance and a cell packed at `max_width`.
    /// Characters with no glyph get an empty record.
    pub fn encode_binary(&self, mapping: Mapping, order: BitOrder) -> Result<Vec<u8>, EncodeError> {
        let max_width = to_u8(self.max_width, "max_width")?;
        let height = to_u8(self.height, "height")?;
        let mut out = vec![
            BINARY_SIGNATURE_BASE + binary_signature(mapping, order),
            BINARY_MAGIC,
            max_width,
            height,
        ];

        for ordinal in MIN_CHAR..=MAX_CHAR {
            let mut cell = Bitmap::new(self.max_width, self.height);
            let mut char_width = 0;
            if let Some(glyph) = char::from_u32(ordinal).and_then(|ch| self.glyph(ch)) {
                cell.bitblt(&glyph.cell, 0, 0);
                char_width = to_u8(glyph.char_width, "glyph width")?;
            }
            out.push(char_width);
            match mapping {
                Mapping::Row => out.extend(cell.row_bytes(order)),
                Mapping::Column => out.extend(cell.col_bytes(order)),
            }
        }
        Ok(out)
    }
}

/// Picks the smaller index: 2 bytes per ordinal in range (plus the end
/// offset) against 4 bytes per defined character. Ties go contiguous.
pub fn choose_index(defined: usize, range_len: u32) -> IndexKind {
    let contiguous = 2 * (range_len as usize + 1);
    let sparse = 4 * defined;
    if contiguous <= sparse {
        IndexKind::Contiguous
    } else {
        IndexKind::Sparse
    }
}

/// Rasterizes `chars`, nudging the pixel size until ascent + descent
/// matches `requested`.
///
/// Stops on an exact match, when a pass fails to improve on the previous
/// one, or after [`MAX_FIT_PASSES`]. The last pass is kept either way.
fn fit_height<R: Rasterizer + ?Sized>(
    rasterizer: &mut R,
    chars: &[char],
    requested: u32,
) -> Result<Fit, EncodeError> {
    let target = requested as i64;
    let mut size = target;
    let mut error = 0i64;
    let mut prev_error: Option<i64> = None;
    let mut pass = 0;

    loop {
        pass += 1;
        size = (size + error).max(1);
        rasterizer.set_pixel_size(size as u32);
        let glyphs = chars
            .iter()
            .map(|&ch| Ok((ch, rasterizer.rasterize(ch)?)))
            .collect::<Result<Vec<_>, EncodeError>>()?;

        let max_ascent = glyphs.iter().map(|(_, g)| g.ascent()).max().unwrap_or(0);
        let max_descent = glyphs.iter().map(|(_, g)| g.descent()).max().unwrap_or(0);
        let actual = (max_ascent + max_descent) as i64;
        error = target - actual;
        event!(Level::DEBUG, pass, size, actual, error, "height fitting pass");

        let stalled = prev_error.is_some_and(|prev| error.abs() >= prev.abs());
        if error == 0 || stalled || pass == MAX_FIT_PASSES {
            if error != 0 {
                event!(
                    Level::INFO,
                    requested,
                    actual,
                    "height fitting did not converge; keeping last pass"
                );
            }
            return Ok(Fit {
                pixel_size: size as u32,
                passes: pass,
                max_ascent,
                max_descent,
                glyphs,
            });
        }
        prev_error = Some(error);
    }
}

/// Glyph blob under construction.
#[derive(Default)]
struct Blob {
    data: Vec<u8>,
    records: Vec<RecordInfo>,
}

impl Blob {
    /// Appends a record and returns its offset.
    fn append(&mut self, ch: char, record: Vec<u8>) -> usize {
        let offset = self.data.len();
        self.records.push(RecordInfo {
            ordinal: ch as u32,
            character: ch,
            offset,
            len: record.len(),
        });
        self.data.extend(record);
        offset
    }

    fn pad_to(&mut self, align: usize) {
        let padded = self.data.len().next_multiple_of(align);
        self.data.resize(padded, 0);
    }
}

fn put_u16(out: &mut Vec<u8>, value: u16) {
    let mut buf = [0u8; 2];
    LittleEndian::write_u16(&mut buf, value);
    out.extend_from_slice(&buf);
}

fn put_offset(out: &mut Vec<u8>, offset: usize) -> Result<(), EncodeError> {
    if offset > MAX_CONTIGUOUS_OFFSET {
        return Err(EncodeError::overflow(format!(
            "glyph data offset {offset} exceeds {MAX_CONTIGUOUS_OFFSET}; reduce the character set or height"
        )));
    }
    put_u16(out, offset as u16);
    Ok(())
}

fn to_u16(value: u32, what: &str) -> Result<u16, EncodeError> {
    u16::try_from(value)
        .map_err(|_| EncodeError::overflow(format!("{what} {value} does not fit in 16 bits")))
}

fn to_u8(value: u32, what: &str) -> Result<u8, EncodeError> {
    u8::try_from(value)
        .map_err(|_| EncodeError::overflow(format!("{what} {value} does not fit in 8 bits")))
}
