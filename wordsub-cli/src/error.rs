//! Error handling for the CLI application

use std::fmt;

/// Custom error type for CLI-specific errors
#[derive(Debug)]
pub enum CliError {
    /// File not found or inaccessible
    FileNotFound(String),
    /// No dictionary source given
    MissingDictionary,
    /// Malformed `KEY=VALUE` entry
    InvalidEntry(String),
    /// Configuration error
    ConfigError(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::FileNotFound(path) => write!(f, "File not found: {path}"),
            CliError::MissingDictionary => {
                write!(f, "No dictionary given: use --dictionary or --entry")
            }
            CliError::InvalidEntry(entry) => {
                write!(f, "Invalid entry '{entry}': expected KEY=VALUE")
            }
            CliError::ConfigError(msg) => write!(f, "Configuration error: {msg}"),
        }
    }
}

impl std::error::Error for CliError {}

/// Result type alias for CLI operations
pub type CliResult<T> = Result<T, anyhow::Error>;
