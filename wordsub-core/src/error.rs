//! Error types for dictionary loading and stream I/O
//!
//! Filtering itself never fails: an unmatched word passes through unchanged.
//! Errors only arise from the collaborators around the filter.

use thiserror::Error;

/// Library-level errors
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error from a source, sink or dictionary file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed TOML dictionary
    #[error("invalid TOML dictionary: {0}")]
    Toml(String),

    /// Malformed line in a plain word list
    #[error("invalid word list at line {line}: {reason}")]
    WordList {
        /// 1-based line number
        line: usize,
        /// What was wrong with the line
        reason: String,
    },

    /// Unknown locale name
    #[error("locale '{0}' not supported")]
    UnsupportedLocale(String),
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Toml(err.to_string())
    }
}

/// Result type for library operations
pub type Result<T> = std::result::Result<T, Error>;
