//! Conversion parameter validation and charset normalization.

use crate::error::{ErrorCode, ValidationError, ValidationResult, ValidationWarning, WarningCode};
use crate::params::{ConvertParams, OutputKind, DEFAULT_CHAR, MAX_CHAR, MIN_CHAR};

/// Range of the Unicode private use area, accepted in charsets for icon fonts.
const PRIVATE_USE_AREA: std::ops::RangeInclusive<u32> = 0xE000..=0xF8FF;

/// Largest ordinal accepted for range bounds and the default character.
const MAX_RANGE_ORDINAL: u32 = 255;

/// Validates conversion params and returns a validation result.
///
/// # Example
/// ```
/// use monofont_format::{ConvertParams, OutputKind, ErrorCode, validate_params};
///
/// let params = ConvertParams::new(16)
///     .with_output(OutputKind::Binary)
///     .with_charset("0123456789");
///
/// let result = validate_params(&params);
/// assert!(result.has_error(ErrorCode::BinaryCharsetFixed));
/// ```
pub fn validate_params(params: &ConvertParams) -> ValidationResult {
    let mut result = ValidationResult::default();

    if params.height == 0 {
        result.add_error(ValidationError::with_path(
            ErrorCode::ZeroHeight,
            "height must be at least 1 pixel",
            "height",
        ));
    }

    if params.default_char > MAX_RANGE_ORDINAL {
        result.add_error(ValidationError::with_path(
            ErrorCode::DefaultCharOutOfRange,
            format!(
                "default_char {} exceeds {}",
                params.default_char, MAX_RANGE_ORDINAL
            ),
            "default_char",
        ));
    }

    match params.output {
        OutputKind::Binary => validate_binary(params, &mut result),
        OutputKind::Module => validate_module(params, &mut result),
    }

    result
}

fn validate_binary(params: &ConvertParams, result: &mut ValidationResult) {
    if params.smallest != MIN_CHAR
        || params.largest != MAX_CHAR
        || params.default_char != DEFAULT_CHAR
        || params.has_charset()
    {
        result.add_error(ValidationError::new(
            ErrorCode::BinaryCharsetFixed,
            "binary fonts cover ASCII 32..=126 only and have no default character; \
             range, default_char and charset cannot be overridden",
        ));
    }

    if params.line_run {
        result.add_error(ValidationError::with_path(
            ErrorCode::BinaryRequiresBitmap,
            "binary fonts store fixed-size bitmaps; line-run encoding is not supported",
            "line_run",
        ));
    }
}

fn validate_module(params: &ConvertParams, result: &mut ValidationResult) {
    if params.has_charset() {
        if params.smallest != MIN_CHAR || params.largest != MAX_CHAR {
            result.add_warning(ValidationWarning::new(
                WarningCode::RangeIgnored,
                "explicit charset given; smallest and largest are ignored",
            ));
        }
        return;
    }

    if params.smallest > params.largest {
        result.add_error(ValidationError::with_path(
            ErrorCode::InvertedRange,
            format!(
                "smallest ({}) must not exceed largest ({})",
                params.smallest, params.largest
            ),
            "smallest",
        ));
    }

    if params.largest > MAX_RANGE_ORDINAL {
        result.add_error(ValidationError::with_path(
            ErrorCode::RangeTooLarge,
            format!(
                "largest ({}) exceeds {}; use a charset for wider repertoires",
                params.largest, MAX_RANGE_ORDINAL
            ),
            "largest",
        ));
    } else if params.largest > MAX_CHAR + 1 {
        result.add_warning(ValidationWarning::new(
            WarningCode::ExtendedAscii,
            "extended ASCII characters may not be converted as expected",
        ));
    }
}

/// Returns true for characters a charset may contain.
///
/// Printable characters are accepted (space included, other whitespace and
/// control characters excluded), as is the private use area.
pub fn is_charset_char(c: char) -> bool {
    if PRIVATE_USE_AREA.contains(&(c as u32)) {
        return true;
    }
    c == ' ' || !(c.is_control() || c.is_whitespace())
}

/// Dedupes, filters and sorts a charset string, removing the default character.
///
/// # Example
/// ```
/// use monofont_format::normalize_charset;
///
/// let chars = normalize_charset("9?1\n10", '?' as u32);
/// assert_eq!(chars, vec!['0', '1', '9']);
/// ```
pub fn normalize_charset(charset: &str, default_char: u32) -> Vec<char> {
    let mut chars: Vec<char> = charset
        .chars()
        .filter(|&c| is_charset_char(c) && c as u32 != default_char)
        .collect();
    chars.sort_unstable();
    chars.dedup();
    chars
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_params_valid() {
        let result = validate_params(&ConvertParams::new(23));
        assert!(result.is_ok());
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_zero_height() {
        let result = validate_params(&ConvertParams::new(0));
        assert!(result.has_error(ErrorCode::ZeroHeight));
    }

    #[test]
    fn test_inverted_range() {
        let result = validate_params(&ConvertParams::new(10).with_range(100, 50));
        assert!(result.has_error(ErrorCode::InvertedRange));
    }

    #[test]
    fn test_range_too_large() {
        let result = validate_params(&ConvertParams::new(10).with_range(32, 300));
        assert!(result.has_error(ErrorCode::RangeTooLarge));
    }

    #[test]
    fn test_extended_ascii_warns() {
        let result = validate_params(&ConvertParams::new(10).with_range(32, 255));
        assert!(result.is_ok());
        assert_eq!(result.warnings[0].code, WarningCode::ExtendedAscii);
    }

    #[test]
    fn test_charset_ignores_range() {
        let params = ConvertParams::new(10)
            .with_range(40, 30)
            .with_charset("abc");
        let result = validate_params(&params);
        assert!(result.is_ok());
        assert_eq!(result.warnings[0].code, WarningCode::RangeIgnored);
    }

    #[test]
    fn test_default_char_out_of_range() {
        let result = validate_params(&ConvertParams::new(10).with_default_char(0x2603));
        assert!(result.has_error(ErrorCode::DefaultCharOutOfRange));
    }

    #[test]
    fn test_binary_restrictions() {
        let params = ConvertParams::new(10).with_output(OutputKind::Binary);
        assert!(validate_params(&params).is_ok());

        let params = ConvertParams::new(10)
            .with_output(OutputKind::Binary)
            .with_range(32, 127);
        assert!(validate_params(&params).has_error(ErrorCode::BinaryCharsetFixed));

        let params = ConvertParams::new(10)
            .with_output(OutputKind::Binary)
            .with_line_run(true);
        assert!(validate_params(&params).has_error(ErrorCode::BinaryRequiresBitmap));
    }

    #[test]
    fn test_normalize_charset_keeps_private_use() {
        let chars = normalize_charset("\u{E001}a\tb a", DEFAULT_CHAR);
        assert_eq!(chars, vec![' ', 'a', 'b', '\u{E001}']);
    }
}
