//! YAML parser that builds [`YamlNode`] trees.

use crate::{Error, LineIndex, Result, SourceInfo, YamlHashEntry, YamlNode};
use yaml_rust2::parser::{Event, MarkedEventReceiver, Parser};
use yaml_rust2::scanner::{Marker, TScalarStyle};

/// Parse YAML from a string, producing a [`YamlNode`] tree.
///
/// Only the first document of a multi-document stream is read.
///
/// # Example
///
/// ```rust
/// use pod_yaml::parse;
///
/// let yaml = parse("kind: Pod").unwrap();
/// assert!(yaml.is_mapping());
/// ```
///
/// # Errors
///
/// Returns [`Error::ParseError`] for invalid YAML and [`Error::EmptyDocument`]
/// when the input contains no document.
pub fn parse(content: &str) -> Result<YamlNode> {
    parse_impl(content, None)
}

/// Parse YAML from a string with an associated filename.
///
/// The filename is recorded in every node's [`SourceInfo`].
///
/// ```rust
/// use pod_yaml::parse_file;
///
/// let yaml = parse_file("kind: Pod", "pod.yaml").unwrap();
/// assert_eq!(yaml.source_info.file, Some("pod.yaml".into()));
/// ```
pub fn parse_file(content: &str, filename: &str) -> Result<YamlNode> {
    parse_impl(content, Some(filename))
}

fn parse_impl(content: &str, filename: Option<&str>) -> Result<YamlNode> {
    let mut parser = Parser::new_from_str(content);
    let mut builder = YamlBuilder::new(content, filename);

    parser
        .load(&mut builder, false) // false = single document only
        .map_err(Error::from)?;

    builder.result()
}

/// Builder that implements MarkedEventReceiver to construct a YamlNode tree.
struct YamlBuilder {
    filename: Option<String>,

    lines: LineIndex,

    /// Stack of collections being constructed
    stack: Vec<BuildNode>,

    /// The completed root node
    root: Option<YamlNode>,

    /// First inconsistency seen in the event stream
    error: Option<Error>,
}

/// A collection being constructed during parsing.
enum BuildNode {
    Sequence {
        start_marker: Marker,
        items: Vec<YamlNode>,
    },

    Mapping {
        start_marker: Marker,
        entries: Vec<YamlHashEntry>,
        pending_key: Option<YamlNode>,
    },
}

impl YamlBuilder {
    fn new(source: &str, filename: Option<&str>) -> Self {
        Self {
            filename: filename.map(str::to_string),
            lines: LineIndex::new(source),
            stack: Vec::new(),
            root: None,
            error: None,
        }
    }

    fn result(self) -> Result<YamlNode> {
        if let Some(error) = self.error {
            return Err(error);
        }
        self.root.ok_or(Error::EmptyDocument)
    }

    fn fail(&mut self, message: &str, marker: &Marker) {
        if self.error.is_none() {
            let (line, col) = self.lines.line_col(marker.index());
            self.error = Some(Error::InvalidStructure {
                message: format!("{message} at line {line} column {col}"),
            });
        }
    }

    fn push_complete(&mut self, node: YamlNode) {
        match self.stack.last_mut() {
            None => {
                // Anything after the first document is ignored.
                if self.root.is_none() {
                    self.root = Some(node);
                }
            }
            Some(BuildNode::Sequence { items, .. }) => items.push(node),
            Some(BuildNode::Mapping {
                entries,
                pending_key,
                ..
            }) => match pending_key.take() {
                Some(key) => entries.push(YamlHashEntry::new(key, node)),
                None => *pending_key = Some(node),
            },
        }
    }

    fn make_source_info(&self, marker: &Marker, len: usize) -> SourceInfo {
        let (line, col) = self.lines.line_col(marker.index());
        SourceInfo::new(self.filename.clone(), marker.index(), line, col, len)
    }
}

impl MarkedEventReceiver for YamlBuilder {
    fn on_event(&mut self, ev: Event, marker: Marker) {
        if self.error.is_some() {
            return;
        }

        match ev {
            Event::Nothing
            | Event::StreamStart
            | Event::StreamEnd
            | Event::DocumentStart
            | Event::DocumentEnd => {}

            Event::Scalar(value, style, _anchor_id, _tag) => {
                let source_info = self.make_source_info(&marker, value.chars().count());
                let node = if matches!(style, TScalarStyle::Plain) && is_null_spelling(&value) {
                    YamlNode::null(value, source_info)
                } else {
                    YamlNode::scalar(value, source_info)
                };
                self.push_complete(node);
            }

            Event::SequenceStart(_anchor_id, _tag) => {
                self.stack.push(BuildNode::Sequence {
                    start_marker: marker,
                    items: Vec::new(),
                });
            }

            Event::SequenceEnd => match self.stack.pop() {
                Some(BuildNode::Sequence {
                    start_marker,
                    items,
                }) => {
                    let len = marker.index().saturating_sub(start_marker.index());
                    let source_info = self.make_source_info(&start_marker, len);
                    self.push_complete(YamlNode::sequence(items, source_info));
                }
                _ => self.fail("sequence end without matching start", &marker),
            },

            Event::MappingStart(_anchor_id, _tag) => {
                self.stack.push(BuildNode::Mapping {
                    start_marker: marker,
                    entries: Vec::new(),
                    pending_key: None,
                });
            }

            Event::MappingEnd => match self.stack.pop() {
                Some(BuildNode::Mapping {
                    start_marker,
                    entries,
                    pending_key: None,
                }) => {
                    let len = marker.index().saturating_sub(start_marker.index());
                    let source_info = self.make_source_info(&start_marker, len);
                    self.push_complete(YamlNode::mapping(entries, source_info));
                }
                Some(BuildNode::Mapping { .. }) => {
                    self.fail("mapping key without a value", &marker)
                }
                _ => self.fail("mapping end without matching start", &marker),
            },

            Event::Alias(_anchor_id) => {
                // Aliases are not expanded; they read as null.
                let source_info = self.make_source_info(&marker, 0);
                self.push_complete(YamlNode::null("", source_info));
            }
        }
    }
}

/// Plain scalars with these spellings denote null (YAML 1.2 core schema).
fn is_null_spelling(value: &str) -> bool {
    matches!(value, "null" | "Null" | "NULL" | "~" | "")
}
