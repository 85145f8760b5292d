//! Error types for FastTadMerge
//!
//! Defines all error types used throughout the library.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Main error type for FastTadMerge operations
#[derive(Debug, Error)]
pub enum TadMergeError {
    /// Input or output file could not be opened, read or written
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A line could not be split into a valid interval record
    #[error("Malformed record in {} at line {line}: {source}", path.display())]
    MalformedRecord {
        path: PathBuf,
        line: usize,
        #[source]
        source: RecordParseError,
    },

    /// A stage needs at least one element and got none
    #[error("Empty input: {0}")]
    EmptyInput(String),

    /// Rejected configuration value
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl TadMergeError {
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        TadMergeError::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    pub fn malformed(path: impl AsRef<Path>, line: usize, source: RecordParseError) -> Self {
        TadMergeError::MalformedRecord {
            path: path.as_ref().to_path_buf(),
            line,
            source,
        }
    }
}

/// Errors that can occur while parsing a single tab-separated record
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordParseError {
    #[error("Empty line")]
    EmptyLine,

    #[error("Too few fields: expected at least {expected}, found {found}")]
    TooFewFields { expected: usize, found: usize },

    #[error("Invalid UTF-8 in field: {0}")]
    InvalidUtf8(&'static str),

    #[error("Invalid number in field {0}: '{1}'")]
    InvalidNumber(&'static str, String),

    #[error("End ({end}) is before start ({start})")]
    InvertedInterval { start: u64, end: u64 },
}

/// Result type alias for FastTadMerge operations
pub type Result<T> = std::result::Result<T, TadMergeError>;
