//! # pod-validation
//!
//! Fail-fast validation of `v1` Pod manifests.
//!
//! The validator walks a [`pod_yaml::YamlNode`] tree with one hand-written
//! check per construct (top level, metadata, spec, OS, container, port, probe,
//! HTTP GET, resources) and stops at the first violation. That violation is
//! handed to a [`DiagnosticSink`] as a single line,
//! `<source>:<line> <message>`, and returned as a [`ValidationError`].
//!
//! ## Example
//!
//! ```rust
//! use pod_validation::{validate_str, CollectingSink, ValidationPolicy};
//!
//! let manifest = "apiVersion: v1\nkind: Deployment\n";
//! let mut sink = CollectingSink::new();
//! let result = validate_str(manifest, "pod.yaml", ValidationPolicy::default(), &mut sink);
//!
//! assert!(result.is_err());
//! assert_eq!(
//!     sink.diagnostics()[0].to_text(),
//!     "pod.yaml:2 kind has unsupported value 'Deployment'"
//! );
//! ```

pub mod context;
pub mod diagnostic;
pub mod error;
pub mod format;
pub mod lookup;
pub mod policy;
pub mod validator;

pub use context::ValidationContext;
pub use diagnostic::{CollectingSink, Diagnostic, DiagnosticSink, OutputFormat, WriterSink};
pub use error::{ExpectedType, ValidationError, ValidationErrorKind, ValidationResult};
pub use policy::{ContainerNamePolicy, OsNamePolicy, ProbePortPolicy, ValidationPolicy};
pub use validator::validate_pod;

use std::fs;
use std::path::Path;

/// Parse and validate a manifest held in memory.
///
/// `source_name` prefixes the diagnostic. Unparsable or empty input is
/// reported through the same sink, without a line number.
pub fn validate_str(
    content: &str,
    source_name: &str,
    policy: ValidationPolicy,
    sink: &mut dyn DiagnosticSink,
) -> ValidationResult<()> {
    let mut ctx = ValidationContext::new(source_name, policy, sink);

    let root = match pod_yaml::parse_file(content, source_name) {
        Ok(root) => root,
        Err(pod_yaml::Error::EmptyDocument) => {
            return Err(ctx.report(None, ValidationErrorKind::EmptyDocument));
        }
        Err(e) => {
            return Err(ctx.report(
                None,
                ValidationErrorKind::ParseFailed {
                    reason: e.to_string(),
                },
            ));
        }
    };

    validate_pod(&root, &mut ctx)
}

/// Read, parse and validate the manifest at `path`.
///
/// The path, as displayed, is the source name used in diagnostics.
pub fn validate_file(
    path: &Path,
    policy: ValidationPolicy,
    sink: &mut dyn DiagnosticSink,
) -> ValidationResult<()> {
    let source_name = path.display().to_string();
    tracing::debug!(path = %source_name, "reading manifest");

    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) => {
            let mut ctx = ValidationContext::new(&source_name, policy, sink);
            return Err(ctx.report(
                None,
                ValidationErrorKind::ReadFailed {
                    reason: e.to_string(),
                },
            ));
        }
    };

    match String::from_utf8(bytes) {
        Ok(content) => validate_str(&content, &source_name, policy, sink),
        Err(e) => {
            let mut ctx = ValidationContext::new(&source_name, policy, sink);
            Err(ctx.report(
                None,
                ValidationErrorKind::ParseFailed {
                    reason: e.to_string(),
                },
            ))
        }
    }
}
