// Error types for Pod manifest validation

use std::fmt;
use thiserror::Error;

/// Result type for validation operations
pub type ValidationResult<T> = Result<T, ValidationError>;

/// The node kind a check expected to find.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpectedType {
    Object,
    Array,
    String,
    Int,
}

impl fmt::Display for ExpectedType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ExpectedType::Object => "object",
            ExpectedType::Array => "array",
            ExpectedType::String => "string",
            ExpectedType::Int => "int",
        };
        f.write_str(name)
    }
}

/// Structured validation error kinds.
///
/// The `Display` text of each variant is the exact diagnostic message.
#[derive(Debug, Clone, PartialEq, Eq, Error, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum ValidationErrorKind {
    /// The input file could not be read
    #[error("cannot read file: {reason}")]
    ReadFailed { reason: String },

    /// The input is not valid YAML
    #[error("cannot unmarshal yaml: {reason}")]
    ParseFailed { reason: String },

    /// The input holds no YAML document
    #[error("empty yaml document")]
    EmptyDocument,

    /// The document root is not a mapping
    #[error("root must be a mapping")]
    RootNotMapping,

    /// A node has the wrong kind, e.g. `spec.containers must be array`
    #[error("{subject} must be {expected}")]
    TypeMismatch {
        subject: String,
        expected: ExpectedType,
    },

    /// A required key is absent
    #[error("{property} is required")]
    MissingRequiredProperty { property: String },

    /// A scalar is outside a fixed set of accepted values
    #[error("{subject} has unsupported value '{value}'")]
    UnsupportedValue { subject: String, value: String },

    /// A scalar does not have the required shape
    #[error("{subject} has invalid format '{value}'")]
    InvalidFormat { subject: String, value: String },

    /// A port number is not an integer in 1..=65535
    #[error("{subject} value out of range")]
    OutOfRange { subject: String },
}

impl ValidationErrorKind {
    /// Get the error code for this error kind
    pub fn error_code(&self) -> &'static str {
        match self {
            ValidationErrorKind::ReadFailed { .. } => "P-1-1",
            ValidationErrorKind::ParseFailed { .. } => "P-1-2",
            ValidationErrorKind::EmptyDocument => "P-1-3",
            ValidationErrorKind::MissingRequiredProperty { .. } => "P-2-10",
            ValidationErrorKind::RootNotMapping | ValidationErrorKind::TypeMismatch { .. } => {
                "P-2-11"
            }
            ValidationErrorKind::UnsupportedValue { .. } => "P-2-12",
            ValidationErrorKind::InvalidFormat { .. } => "P-2-14",
            ValidationErrorKind::OutOfRange { .. } => "P-2-15",
        }
    }

    pub(crate) fn type_mismatch(subject: impl Into<String>, expected: ExpectedType) -> Self {
        ValidationErrorKind::TypeMismatch {
            subject: subject.into(),
            expected,
        }
    }

    pub(crate) fn unsupported(subject: impl Into<String>, value: impl Into<String>) -> Self {
        ValidationErrorKind::UnsupportedValue {
            subject: subject.into(),
            value: value.into(),
        }
    }

    pub(crate) fn invalid_format(subject: impl Into<String>, value: impl Into<String>) -> Self {
        ValidationErrorKind::InvalidFormat {
            subject: subject.into(),
            value: value.into(),
        }
    }

    pub(crate) fn out_of_range(subject: impl Into<String>) -> Self {
        ValidationErrorKind::OutOfRange {
            subject: subject.into(),
        }
    }
}

/// The failure returned by validation.
///
/// Carries the message that was reported, without the location: the
/// diagnostic sink has already rendered the full line by the time a caller
/// sees this value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ValidationError {
    pub kind: ValidationErrorKind,
    pub message: String,
}

impl ValidationError {
    pub fn new(kind: ValidationErrorKind) -> Self {
        let message = kind.to_string();
        Self { kind, message }
    }

    pub fn error_code(&self) -> &'static str {
        self.kind.error_code()
    }
}

impl From<ValidationErrorKind> for ValidationError {
    fn from(kind: ValidationErrorKind) -> Self {
        Self::new(kind)
    }
}
