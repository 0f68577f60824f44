//! Error types for sheetpull

use thiserror::Error;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur anywhere in the extraction pipeline
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The link did not match any known spreadsheet URL shape
    #[error("Invalid spreadsheet link: {0}")]
    InvalidLink(String),

    /// Every download attempt failed
    #[error("Download failed after {attempts} attempt(s): {last_error}")]
    Download { attempts: u32, last_error: String },

    /// The bytes are not a readable workbook, or it has no sheets
    #[error("Failed to decode workbook: {0}")]
    Decode(String),

    /// None of the requested sheet names exist in the workbook
    #[error(
        "None of the requested sheets were found: {} (available: {})",
        requested.join(", "),
        available.join(", ")
    )]
    NoMatchingSheets {
        requested: Vec<String>,
        available: Vec<String>,
    },

    /// A parameter had an unusable value
    #[error("Invalid parameter: {0}")]
    Validation(String),

    /// A single sheet could not be read or extracted
    #[error("Sheet '{name}' failed: {message}")]
    Sheet { name: String, message: String },

    /// The caller cancelled the operation
    #[error("Operation cancelled")]
    Cancelled,
}

impl Error {
    /// Create a new validation error with a message
    pub fn validation<S: Into<String>>(msg: S) -> Self {
        Error::Validation(msg.into())
    }

    /// Create a new decode error with a message
    pub fn decode<S: Into<String>>(msg: S) -> Self {
        Error::Decode(msg.into())
    }
}
