//! YAML node tree with source location tracking.

use crate::SourceInfo;
use std::fmt;

/// The structural kind of a [`YamlNode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Mapping,
    Sequence,
    Scalar,
    Null,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NodeKind::Mapping => "mapping",
            NodeKind::Sequence => "sequence",
            NodeKind::Scalar => "scalar",
            NodeKind::Null => "null",
        };
        f.write_str(name)
    }
}

/// A YAML value with source location information.
///
/// Scalars and nulls keep their raw text exactly as written (without quotes),
/// so `8080`, `"8080"` and `'8080'` all carry the value `8080`. Mappings and
/// sequences have an empty value and expose their children instead.
///
/// ## Example
///
/// ```rust
/// use pod_yaml::parse;
///
/// let yaml = parse("ports:\n  - containerPort: 80\n").unwrap();
/// let ports = yaml.get("ports").unwrap();
/// let first = &ports.as_sequence().unwrap()[0];
/// assert_eq!(first.get("containerPort").unwrap().value(), "80");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct YamlNode {
    /// Raw scalar text; empty for mappings and sequences.
    value: String,

    /// Source location for this node.
    pub source_info: SourceInfo,

    children: Children,
}

/// Source-tracked children of a YAML node.
#[derive(Debug, Clone, PartialEq)]
enum Children {
    Scalar,
    Null,
    Sequence(Vec<YamlNode>),
    Mapping(Vec<YamlHashEntry>),
}

/// A key-value pair in a YAML mapping, in document order.
#[derive(Debug, Clone, PartialEq)]
pub struct YamlHashEntry {
    pub key: YamlNode,
    pub value: YamlNode,
}

impl YamlNode {
    /// Create a scalar node.
    pub fn scalar(value: impl Into<String>, source_info: SourceInfo) -> Self {
        Self {
            value: value.into(),
            source_info,
            children: Children::Scalar,
        }
    }

    /// Create a null node. `raw` is the spelling used in the source (`null`,
    /// `~`, or empty).
    pub fn null(raw: impl Into<String>, source_info: SourceInfo) -> Self {
        Self {
            value: raw.into(),
            source_info,
            children: Children::Null,
        }
    }

    /// Create a sequence node.
    pub fn sequence(items: Vec<YamlNode>, source_info: SourceInfo) -> Self {
        Self {
            value: String::new(),
            source_info,
            children: Children::Sequence(items),
        }
    }

    /// Create a mapping node.
    pub fn mapping(entries: Vec<YamlHashEntry>, source_info: SourceInfo) -> Self {
        Self {
            value: String::new(),
            source_info,
            children: Children::Mapping(entries),
        }
    }

    pub fn kind(&self) -> NodeKind {
        match self.children {
            Children::Scalar => NodeKind::Scalar,
            Children::Null => NodeKind::Null,
            Children::Sequence(_) => NodeKind::Sequence,
            Children::Mapping(_) => NodeKind::Mapping,
        }
    }

    /// Raw text of a scalar or null node; empty for collections.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// The scalar text, or `None` unless this is a scalar.
    pub fn as_scalar(&self) -> Option<&str> {
        match self.children {
            Children::Scalar => Some(&self.value),
            _ => None,
        }
    }

    pub fn is_scalar(&self) -> bool {
        matches!(self.children, Children::Scalar)
    }

    pub fn is_null(&self) -> bool {
        matches!(self.children, Children::Null)
    }

    pub fn is_sequence(&self) -> bool {
        matches!(self.children, Children::Sequence(_))
    }

    pub fn is_mapping(&self) -> bool {
        matches!(self.children, Children::Mapping(_))
    }

    /// Get sequence items if this is a sequence.
    pub fn as_sequence(&self) -> Option<&[YamlNode]> {
        match &self.children {
            Children::Sequence(items) => Some(items),
            _ => None,
        }
    }

    /// Get mapping entries if this is a mapping.
    pub fn as_mapping(&self) -> Option<&[YamlHashEntry]> {
        match &self.children {
            Children::Mapping(entries) => Some(entries),
            _ => None,
        }
    }

    /// Find the first mapping entry whose key text equals `key`.
    ///
    /// Only scalar keys take part in the comparison. Returns `None` when this
    /// is not a mapping or no key matches.
    pub fn entry(&self, key: &str) -> Option<&YamlHashEntry> {
        self.as_mapping()?
            .iter()
            .find(|entry| entry.key.as_scalar() == Some(key))
    }

    /// Value paired with the first occurrence of `key`.
    pub fn get(&self, key: &str) -> Option<&YamlNode> {
        self.entry(key).map(|entry| &entry.value)
    }

    /// Number of children (sequence length or mapping entry count).
    pub fn len(&self) -> usize {
        match &self.children {
            Children::Scalar | Children::Null => 0,
            Children::Sequence(items) => items.len(),
            Children::Mapping(entries) => entries.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl YamlHashEntry {
    pub fn new(key: YamlNode, value: YamlNode) -> Self {
        Self { key, value }
    }
}
