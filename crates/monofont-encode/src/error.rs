//! Encoder error type.

use std::path::PathBuf;

use monofont_format::ValidationError;
use thiserror::Error;

/// Errors that can occur while converting a font.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// The outline font could not be opened or parsed, or lacks a glyph the
    /// conversion cannot do without.
    #[error("Cannot read font source '{name}': {reason}")]
    SourceUnreadable {
        /// File name or label of the source.
        name: String,
        /// What went wrong.
        reason: String,
    },

    /// The output artifact could not be written.
    #[error("Cannot write '{}': {source}", path.display())]
    DestinationUnwritable {
        /// Destination path.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// A value does not fit its field in the output format.
    #[error("Encoding overflow: {0}")]
    EncodingOverflow(String),

    /// The conversion params failed validation.
    #[error("Invalid conversion params: {}", format_errors(.0))]
    InvalidParams(Vec<ValidationError>),

    /// Generated source could not be formatted.
    #[error("Formatting error: {0}")]
    Format(#[from] std::fmt::Error),
}

impl EncodeError {
    pub(crate) fn unreadable(name: impl Into<String>, reason: impl ToString) -> Self {
        EncodeError::SourceUnreadable {
            name: name.into(),
            reason: reason.to_string(),
        }
    }

    pub(crate) fn overflow(message: impl Into<String>) -> Self {
        EncodeError::EncodingOverflow(message.into())
    }
}

fn format_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
