//! Key lookup in mapping nodes.

use crate::context::ValidationContext;
use crate::error::{ValidationErrorKind, ValidationResult};
use pod_yaml::YamlNode;

/// The value paired with the first occurrence of `key`.
///
/// Returns `None` when `parent` is not a mapping or the key is absent. An
/// explicit `key: null` is present and comes back as a null node.
pub fn find_child<'n>(parent: &'n YamlNode, key: &str) -> Option<&'n YamlNode> {
    parent.get(key)
}

/// The node a diagnostic about `key` should point at.
///
/// This is the key node itself when `key` is present, and `parent` when it is
/// not, so that a missing field is still reported on the parent's line.
pub fn find_key_position<'n>(parent: &'n YamlNode, key: &str) -> &'n YamlNode {
    parent.entry(key).map_or(parent, |entry| &entry.key)
}

/// The value of a required field, or a `<field> is required` failure.
pub fn require_field<'n>(
    ctx: &mut ValidationContext<'_>,
    parent: &'n YamlNode,
    field: &str,
) -> ValidationResult<&'n YamlNode> {
    match find_child(parent, field) {
        Some(value) => Ok(value),
        None => Err(ctx.fail_at(
            find_key_position(parent, field),
            ValidationErrorKind::MissingRequiredProperty {
                property: field.to_string(),
            },
        )),
    }
}
