//! Character set planning.
//!
//! Decides which characters get rendered and the ordinal range the index
//! covers, from either a `smallest..=largest` range or an explicit charset.

use monofont_format::{normalize_charset, ConvertParams, OutputKind, MAX_CHAR, MIN_CHAR};

use crate::error::EncodeError;

/// The characters a font will contain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharacterSet {
    default: Option<char>,
    members: Vec<char>,
    min: u32,
    max: u32,
}

impl CharacterSet {
    /// Plans the character set for `params`.
    ///
    /// `has_glyph` reports whether the source can render a character. In a
    /// range, characters it rejects become gaps; in a charset they are
    /// dropped. A missing default character is an error, since every
    /// unknown character resolves to it.
    pub fn plan(
        params: &ConvertParams,
        source: &str,
        has_glyph: impl Fn(char) -> bool,
    ) -> Result<Self, EncodeError> {
        if params.output == OutputKind::Binary {
            return Ok(Self::printable_ascii());
        }

        let default = char::from_u32(params.default_char)
            .filter(|&c| has_glyph(c))
            .ok_or_else(|| {
                EncodeError::unreadable(
                    source,
                    format!("no glyph for default character {}", params.default_char),
                )
            })?;

        let (members, min, max) = match params.charset.as_deref().filter(|c| !c.is_empty()) {
            Some(charset) => {
                let members: Vec<char> = normalize_charset(charset, params.default_char)
                    .into_iter()
                    .filter(|&c| has_glyph(c))
                    .collect();
                let min = members
                    .first()
                    .map_or(default as u32, |&c| (c as u32).min(default as u32));
                let max = members
                    .last()
                    .map_or(default as u32, |&c| (c as u32).max(default as u32));
                (members, min, max)
            }
            None => {
                let members = (params.smallest..=params.largest)
                    .filter_map(char::from_u32)
                    .filter(|&c| has_glyph(c))
                    .collect();
                (members, params.smallest, params.largest)
            }
        };

        Ok(Self {
            default: Some(default),
            members,
            min,
            max,
        })
    }

    /// Every character 32..=126 with no default, as binary fonts require.
    pub fn printable_ascii() -> Self {
        Self {
            default: None,
            members: (MIN_CHAR..=MAX_CHAR).filter_map(char::from_u32).collect(),
            min: MIN_CHAR,
            max: MAX_CHAR,
        }
    }

    /// The default character, if the font has one.
    pub fn default_char(&self) -> Option<char> {
        self.default
    }

    /// Defined characters in ordinal order. May include the default.
    pub fn members(&self) -> &[char] {
        &self.members
    }

    /// Returns true if `ch` is a defined character.
    pub fn contains(&self, ch: char) -> bool {
        self.members.binary_search(&ch).is_ok()
    }

    /// Smallest ordinal covered by the index.
    pub fn min(&self) -> u32 {
        self.min
    }

    /// Largest ordinal covered by the index.
    pub fn max(&self) -> u32 {
        self.max
    }

    /// Number of ordinals from `min` to `max`.
    pub fn range_len(&self) -> u32 {
        self.max - self.min + 1
    }

    /// Characters that need rasterizing: the default first, then the
    /// members, each once.
    pub fn render_order(&self) -> Vec<char> {
        let mut chars: Vec<char> = self.default.into_iter().collect();
        chars.extend(
            self.members
                .iter()
                .copied()
                .filter(|&c| Some(c) != self.default),
        );
        chars
    }
}
