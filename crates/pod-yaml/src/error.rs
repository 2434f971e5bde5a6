//! Error types for YAML parsing.

use thiserror::Error;

/// Result type alias for pod-yaml operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building a node tree.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// YAML syntax error reported by the scanner.
    #[error("{message}")]
    ParseError { message: String },

    /// The input holds no document at all (empty, or only comments).
    #[error("no YAML document found")]
    EmptyDocument,

    /// The event stream did not describe a well-formed tree.
    #[error("invalid YAML structure: {message}")]
    InvalidStructure { message: String },
}

impl From<yaml_rust2::ScanError> for Error {
    fn from(err: yaml_rust2::ScanError) -> Self {
        // The scanner message already names the line and column.
        Error::ParseError {
            message: err.to_string(),
        }
    }
}
