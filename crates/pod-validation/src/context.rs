// Per-run validation state

use crate::diagnostic::{Diagnostic, DiagnosticSink};
use crate::error::{ValidationError, ValidationErrorKind};
use crate::policy::ValidationPolicy;
use pod_yaml::YamlNode;

/// Everything a check needs besides the node it is looking at.
///
/// One context serves one document. It names the source for diagnostics,
/// carries the policy switches and owns the route to the diagnostic sink.
pub struct ValidationContext<'a> {
    source_name: &'a str,
    policy: ValidationPolicy,
    sink: &'a mut dyn DiagnosticSink,
}

impl<'a> ValidationContext<'a> {
    pub fn new(
        source_name: &'a str,
        policy: ValidationPolicy,
        sink: &'a mut dyn DiagnosticSink,
    ) -> Self {
        Self {
            source_name,
            policy,
            sink,
        }
    }

    pub fn source_name(&self) -> &str {
        self.source_name
    }

    pub fn policy(&self) -> &ValidationPolicy {
        &self.policy
    }

    /// Report a failure anchored at `node` and return it as an error.
    ///
    /// The diagnostic is emitted exactly once, before this returns. Nodes
    /// without a line (and `None`) produce a diagnostic without a line.
    pub fn report(
        &mut self,
        node: Option<&YamlNode>,
        kind: ValidationErrorKind,
    ) -> ValidationError {
        let line = node.and_then(|n| n.source_info.line_number());
        let error = ValidationError::new(kind);
        let diagnostic = Diagnostic::new(
            self.source_name,
            line,
            error.error_code(),
            error.message.clone(),
        );

        tracing::debug!(
            source = self.source_name,
            line = ?line,
            code = diagnostic.code,
            "validation failed"
        );

        if let Err(e) = self.sink.emit(&diagnostic) {
            tracing::error!(error = %e, "failed to emit diagnostic");
        }
        error
    }

    /// Shorthand for [`report`](Self::report) at a known node.
    pub fn fail_at(&mut self, node: &YamlNode, kind: ValidationErrorKind) -> ValidationError {
        self.report(Some(node), kind)
    }
}
