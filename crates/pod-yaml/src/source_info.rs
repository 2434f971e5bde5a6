//! Source location information for YAML nodes.

use serde::{Deserialize, Serialize};

/// Source location information for a YAML node.
///
/// A `line` of 0 marks a synthetic location that does not correspond to any
/// text in the input; every node built by the parser has a line of at least 1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceInfo {
    /// Optional filename or source identifier
    pub file: Option<String>,

    /// Character offset from start of source (0-based)
    pub offset: usize,

    /// Line number (1-based, 0 when synthetic)
    pub line: usize,

    /// Column number (1-based, in characters)
    pub col: usize,

    /// Length in characters
    pub len: usize,
}

impl SourceInfo {
    /// Create a new SourceInfo with all fields specified.
    pub fn new(file: Option<String>, offset: usize, line: usize, col: usize, len: usize) -> Self {
        Self {
            file,
            offset,
            line,
            col,
            len,
        }
    }

    /// A location that points at nothing in the source text.
    pub fn synthetic() -> Self {
        Self {
            file: None,
            offset: 0,
            line: 0,
            col: 0,
            len: 0,
        }
    }

    /// A location on the given 1-based line, with no other detail.
    pub fn at_line(line: usize) -> Self {
        Self {
            line,
            col: 1,
            ..Self::synthetic()
        }
    }

    /// Set the filename for this source location.
    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }

    /// The line number, or `None` for synthetic locations.
    pub fn line_number(&self) -> Option<usize> {
        (self.line > 0).then_some(self.line)
    }

}

impl Default for SourceInfo {
    fn default() -> Self {
        Self::synthetic()
    }
}

/// Maps character offsets to 1-based line and column numbers.
///
/// Built once per input so that every node lookup is a binary search over
/// line starts instead of a rescan of the text.
#[derive(Debug, Clone)]
pub struct LineIndex {
    /// Character offset at which each line starts. Always begins with 0.
    line_starts: Vec<usize>,
}

impl LineIndex {
    /// Line breaks are `\n`, `\r\n` and a lone `\r`, as in YAML.
    pub fn new(source: &str) -> Self {
        let mut line_starts = vec![0];
        let mut chars = source.chars().enumerate().peekable();
        while let Some((index, ch)) = chars.next() {
            let breaks = match ch {
                '\n' => true,
                '\r' => !matches!(chars.peek(), Some((_, '\n'))),
                _ => false,
            };
            if breaks {
                line_starts.push(index + 1);
            }
        }
        Self { line_starts }
    }

    /// 1-based `(line, column)` for a character offset.
    ///
    /// Offsets past the end resolve to the last line.
    pub fn line_col(&self, offset: usize) -> (usize, usize) {
        let line = match self.line_starts.binary_search(&offset) {
            Ok(exact) => exact,
            Err(insert_at) => insert_at - 1,
        };
        (line + 1, offset - self.line_starts[line] + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_info_creation() {
        let info = SourceInfo::new(Some("pod.yaml".into()), 10, 2, 5, 8);
        assert_eq!(info.file, Some("pod.yaml".into()));
        assert_eq!(info.line_number(), Some(2));
        assert_eq!(info.len, 8);
    }

    #[test]
    fn test_synthetic_has_no_line() {
        assert_eq!(SourceInfo::synthetic().line_number(), None);
        assert_eq!(SourceInfo::default().line_number(), None);
        assert_eq!(SourceInfo::at_line(7).line_number(), Some(7));
    }

    #[test]
    fn test_with_file() {
        let info = SourceInfo::default().with_file("pod.yaml");
        assert_eq!(info.file, Some("pod.yaml".into()));
    }

    #[test]
    fn test_serializes_to_json() {
        let info = SourceInfo::at_line(3).with_file("pod.yaml");
        let json = serde_json::to_value(&info).unwrap();
        assert_eq!(json["line"], 3);
        assert_eq!(json["file"], "pod.yaml");
    }

    #[test]
    fn test_line_index() {
        let index = LineIndex::new("a: 1\nbb: 2\n\nc: 3");
        assert_eq!(index.line_col(0), (1, 1));
        assert_eq!(index.line_col(3), (1, 4));
        assert_eq!(index.line_col(5), (2, 1));
        assert_eq!(index.line_col(11), (3, 1));
        assert_eq!(index.line_col(12), (4, 1));
        assert_eq!(index.line_col(100), (4, 89));
    }

    #[test]
    fn test_line_index_carriage_returns() {
        let index = LineIndex::new("a: 1\rb: 2\r\nc: 3\r");
        assert_eq!(index.line_col(5), (2, 1));
        // The `\n` of a CRLF pair belongs to the same break.
        assert_eq!(index.line_col(10), (2, 6));
        assert_eq!(index.line_col(11), (3, 1));
        assert_eq!(index.line_col(16), (4, 1));
    }

    #[test]
    fn test_line_index_counts_characters_not_bytes() {
        let index = LineIndex::new("é: ü\nx: y");
        assert_eq!(index.line_col(5), (2, 1));
    }
}
