//! Error types for the data-loader crate.
//!
//! Row-level variants (`ParseError`, `FieldCountMismatch`) are produced by
//! `parser::parse_row` and normally swallowed by the loader, which drops the
//! offending row. File-level variants propagate to the caller.

use thiserror::Error;

/// Errors that can occur while reading and parsing the movie metadata file
#[derive(Error, Debug)]
pub enum DataLoadError {
    /// File could not be found or opened
    #[error("Failed to open file: {path}")]
    FileNotFound { path: String },

    /// I/O error occurred while reading file
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Line in data file couldn't be parsed
    #[error("Parse error at line {line} in {file}: {reason}")]
    ParseError {
        file: String,
        line: usize,
        reason: String,
    },

    /// A value (usually user input, e.g. a genre) was not recognised
    #[error("Invalid value for {field}: {value}")]
    InvalidValue { field: String, value: String },

    /// Row had fewer columns than the parser needs
    #[error("Expected at least {expected} fields but found {found} in line {line}")]
    FieldCountMismatch {
        expected: usize,
        found: usize,
        line: usize,
    },
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, DataLoadError>;
