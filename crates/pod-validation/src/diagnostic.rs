//! Rendering and delivery of the single diagnostic a validation run produces.

use serde::Serialize;
use std::fmt;
use std::io::{self, Write};

/// One validation failure, positioned in the source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// Source name as given by the caller (usually the file path)
    pub source: String,

    /// 1-based line, when the failure can be tied to a node
    pub line: Option<usize>,

    /// Stable error code, e.g. `P-2-10`
    pub code: &'static str,

    pub message: String,
}

impl Diagnostic {
    pub fn new(
        source: impl Into<String>,
        line: Option<usize>,
        code: &'static str,
        message: impl Into<String>,
    ) -> Self {
        Self {
            source: source.into(),
            line,
            code,
            message: message.into(),
        }
    }

    /// `<source>:<line> <message>`, or `<source> <message>` without a line.
    pub fn to_text(&self) -> String {
        self.to_string()
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "source": self.source,
            "line": self.line,
            "code": self.code,
            "message": self.message,
        })
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.line {
            Some(line) => write!(f, "{}:{} {}", self.source, line, self.message),
            None => write!(f, "{} {}", self.source, self.message),
        }
    }
}

/// How a [`WriterSink`] renders each diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    /// One JSON object per line
    Json,
}

/// Receives diagnostics as they are reported.
pub trait DiagnosticSink {
    fn emit(&mut self, diagnostic: &Diagnostic) -> io::Result<()>;
}

/// Writes each diagnostic as one line to an [`io::Write`].
pub struct WriterSink<W: Write> {
    writer: W,
    format: OutputFormat,
}

impl<W: Write> WriterSink<W> {
    pub fn new(writer: W, format: OutputFormat) -> Self {
        Self { writer, format }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> DiagnosticSink for WriterSink<W> {
    fn emit(&mut self, diagnostic: &Diagnostic) -> io::Result<()> {
        match self.format {
            OutputFormat::Text => writeln!(self.writer, "{}", diagnostic)?,
            OutputFormat::Json => writeln!(self.writer, "{}", diagnostic.to_json())?,
        }
        self.writer.flush()
    }
}

/// Keeps diagnostics in memory.
#[derive(Debug, Default)]
pub struct CollectingSink {
    diagnostics: Vec<Diagnostic>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}

impl DiagnosticSink for CollectingSink {
    fn emit(&mut self, diagnostic: &Diagnostic) -> io::Result<()> {
        self.diagnostics.push(diagnostic.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_with_line() {
        let diagnostic = Diagnostic::new(
            "pod.yaml",
            Some(2),
            "P-2-12",
            "kind has unsupported value 'Job'",
        );
        assert_eq!(diagnostic.to_text(), "pod.yaml:2 kind has unsupported value 'Job'");
    }

    #[test]
    fn test_text_without_line() {
        let diagnostic = Diagnostic::new("pod.yaml", None, "P-1-3", "empty yaml document");
        assert_eq!(diagnostic.to_text(), "pod.yaml empty yaml document");
    }

    #[test]
    fn test_json() {
        let diagnostic = Diagnostic::new("pod.yaml", None, "P-1-3", "empty yaml document");
        let json = diagnostic.to_json();
        assert_eq!(json["source"], "pod.yaml");
        assert!(json["line"].is_null());
        assert_eq!(json["code"], "P-1-3");
    }

    #[test]
    fn test_writer_sink_text() {
        let mut sink = WriterSink::new(Vec::new(), OutputFormat::Text);
        sink.emit(&Diagnostic::new("a.yaml", Some(1), "P-2-10", "spec is required"))
            .unwrap();
        let out = String::from_utf8(sink.into_inner()).unwrap();
        assert_eq!(out, "a.yaml:1 spec is required\n");
    }

    #[test]
    fn test_writer_sink_json() {
        let mut sink = WriterSink::new(Vec::new(), OutputFormat::Json);
        sink.emit(&Diagnostic::new("a.yaml", Some(4), "P-2-10", "spec is required"))
            .unwrap();
        let out = String::from_utf8(sink.into_inner()).unwrap();
        assert_eq!(out.lines().count(), 1);

        let json: serde_json::Value = serde_json::from_str(out.trim_end()).unwrap();
        assert_eq!(json["line"], 4);
        assert_eq!(json["message"], "spec is required");
    }

    #[test]
    fn test_collecting_sink() {
        let mut sink = CollectingSink::new();
        sink.emit(&Diagnostic::new("a.yaml", None, "P-1-3", "empty yaml document"))
            .unwrap();
        assert_eq!(sink.diagnostics().len(), 1);
        assert_eq!(sink.into_diagnostics()[0].line, None);
    }
}
