//! # pod-yaml
//!
//! YAML parsing with source line tracking.
//!
//! This crate provides [`YamlNode`], a read-only tree of mapping, sequence,
//! scalar and null nodes where every node produced by the parser remembers
//! the line it started on. Scalars keep their raw text so that callers can
//! apply their own interpretation (integer parsing, pattern matching) instead
//! of relying on YAML type inference.
//!
//! ## Example
//!
//! ```rust
//! use pod_yaml::{parse_file, NodeKind};
//!
//! let root = parse_file("apiVersion: v1\nkind: Pod\n", "pod.yaml").unwrap();
//! assert_eq!(root.kind(), NodeKind::Mapping);
//!
//! let kind = root.get("kind").unwrap();
//! assert_eq!(kind.value(), "Pod");
//! assert_eq!(kind.source_info.line_number(), Some(2));
//! ```

mod error;
mod node;
mod parser;
mod source_info;

pub use error::{Error, Result};
pub use node::{NodeKind, YamlHashEntry, YamlNode};
pub use parser::{parse, parse_file};
pub use source_info::{LineIndex, SourceInfo};
