// Pod manifest validation rules
//
// One function per construct of the manifest grammar. Each check runs its
// rules top to bottom and returns on the first failure, so the order of the
// statements below decides which diagnostic a broken document receives.

use crate::context::ValidationContext;
use crate::error::{ExpectedType, ValidationErrorKind, ValidationResult};
use crate::format;
use crate::lookup::{find_child, require_field};
use crate::policy::{OsNamePolicy, ProbePortPolicy};
use pod_yaml::YamlNode;

pub const API_VERSION: &str = "v1";
pub const KIND: &str = "Pod";
pub const SUPPORTED_OS_NAMES: [&str; 2] = ["linux", "windows"];
pub const SUPPORTED_PROTOCOLS: [&str; 2] = ["TCP", "UDP"];

const PROBES: [&str; 2] = ["readinessProbe", "livenessProbe"];
const RESOURCE_SECTIONS: [&str; 2] = ["requests", "limits"];

/// Validates a parsed manifest, starting at the document root.
pub fn validate_pod(root: &YamlNode, ctx: &mut ValidationContext<'_>) -> ValidationResult<()> {
    tracing::debug!(source = ctx.source_name(), "validating pod manifest");

    if !root.is_mapping() {
        return Err(ctx.fail_at(root, ValidationErrorKind::RootNotMapping));
    }

    let api_version = require_field(ctx, root, "apiVersion")?;
    if api_version.as_scalar() != Some(API_VERSION) {
        return Err(ctx.fail_at(
            api_version,
            ValidationErrorKind::unsupported("apiVersion", api_version.value()),
        ));
    }

    let kind = require_field(ctx, root, "kind")?;
    if kind.as_scalar() != Some(KIND) {
        return Err(ctx.fail_at(kind, ValidationErrorKind::unsupported("kind", kind.value())));
    }

    let metadata = require_field(ctx, root, "metadata")?;
    validate_metadata(metadata, ctx)?;

    let spec = require_field(ctx, root, "spec")?;
    validate_spec(spec, ctx)
}

fn validate_metadata(node: &YamlNode, ctx: &mut ValidationContext<'_>) -> ValidationResult<()> {
    expect_kind(ctx, node, "metadata", ExpectedType::Object)?;

    // Any scalar will do, the empty string included.
    let name = require_field(ctx, node, "name")?;
    expect_scalar(ctx, name, "metadata.name", ExpectedType::String)?;
    Ok(())
}

fn validate_spec(node: &YamlNode, ctx: &mut ValidationContext<'_>) -> ValidationResult<()> {
    expect_kind(ctx, node, "spec", ExpectedType::Object)?;

    if let Some(os) = find_child(node, "os") {
        validate_pod_os(os, ctx)?;
    }

    let containers = require_field(ctx, node, "containers")?;
    let Some(items) = containers.as_sequence() else {
        return Err(ctx.fail_at(
            containers,
            ValidationErrorKind::type_mismatch("spec.containers", ExpectedType::Array),
        ));
    };

    for (index, container) in items.iter().enumerate() {
        tracing::trace!(index, "validating container");
        validate_container(container, ctx)?;
    }
    Ok(())
}

fn validate_pod_os(node: &YamlNode, ctx: &mut ValidationContext<'_>) -> ValidationResult<()> {
    expect_kind(ctx, node, "spec.os", ExpectedType::Object)?;

    let name_node = require_field(ctx, node, "name")?;
    let name = expect_scalar(ctx, name_node, "spec.os.name", ExpectedType::String)?;

    if ctx.policy().os_name == OsNamePolicy::Restricted && !SUPPORTED_OS_NAMES.contains(&name) {
        return Err(ctx.fail_at(
            name_node,
            ValidationErrorKind::unsupported("spec.os.name", name),
        ));
    }
    Ok(())
}

fn validate_container(node: &YamlNode, ctx: &mut ValidationContext<'_>) -> ValidationResult<()> {
    expect_kind(ctx, node, "container", ExpectedType::Object)?;

    let name_node = require_field(ctx, node, "name")?;
    let name = expect_scalar(ctx, name_node, "containers.name", ExpectedType::String)?;
    if !format::is_valid_container_name(name, ctx.policy().container_name) {
        return Err(ctx.fail_at(
            name_node,
            ValidationErrorKind::invalid_format("containers.name", name),
        ));
    }

    let image_node = require_field(ctx, node, "image")?;
    let image = expect_scalar(ctx, image_node, "containers.image", ExpectedType::String)?;
    if !format::is_valid_image_reference(image) {
        return Err(ctx.fail_at(
            image_node,
            ValidationErrorKind::invalid_format("containers.image", image),
        ));
    }

    if let Some(ports) = find_child(node, "ports") {
        let Some(items) = ports.as_sequence() else {
            return Err(ctx.fail_at(
                ports,
                ValidationErrorKind::type_mismatch("containers.ports", ExpectedType::Array),
            ));
        };
        for port in items {
            validate_port(port, ctx)?;
        }
    }

    for probe_name in PROBES {
        if let Some(probe) = find_child(node, probe_name) {
            validate_probe(probe, ctx)?;
        }
    }

    let resources = require_field(ctx, node, "resources")?;
    validate_resources(resources, ctx)
}

fn validate_port(node: &YamlNode, ctx: &mut ValidationContext<'_>) -> ValidationResult<()> {
    expect_kind(ctx, node, "port item", ExpectedType::Object)?;

    let port_node = require_field(ctx, node, "containerPort")?;
    let port = expect_scalar(ctx, port_node, "containerPort", ExpectedType::Int)?;
    if !format::is_valid_port(port) {
        return Err(ctx.fail_at(port_node, ValidationErrorKind::out_of_range("containerPort")));
    }

    if let Some(protocol_node) = find_child(node, "protocol") {
        let protocol = expect_scalar(ctx, protocol_node, "protocol", ExpectedType::String)?;
        if !SUPPORTED_PROTOCOLS.contains(&protocol) {
            return Err(ctx.fail_at(
                protocol_node,
                ValidationErrorKind::unsupported("protocol", protocol),
            ));
        }
    }
    Ok(())
}

fn validate_probe(node: &YamlNode, ctx: &mut ValidationContext<'_>) -> ValidationResult<()> {
    expect_kind(ctx, node, "probe", ExpectedType::Object)?;

    let http_get = require_field(ctx, node, "httpGet")?;
    validate_http_get(http_get, ctx)
}

fn validate_http_get(node: &YamlNode, ctx: &mut ValidationContext<'_>) -> ValidationResult<()> {
    expect_kind(ctx, node, "httpGet", ExpectedType::Object)?;

    let path_node = require_field(ctx, node, "path")?;
    let path = expect_scalar(ctx, path_node, "path", ExpectedType::String)?;
    if !format::is_http_path(path) {
        return Err(ctx.fail_at(path_node, ValidationErrorKind::invalid_format("path", path)));
    }

    let port_node = require_field(ctx, node, "port")?;
    let port = expect_scalar(ctx, port_node, "port", ExpectedType::Int)?;
    let accepted = match ctx.policy().probe_port {
        ProbePortPolicy::RangeChecked => format::is_valid_port(port),
        ProbePortPolicy::Unchecked => format::parse_int(port).is_some(),
    };
    if !accepted {
        return Err(ctx.fail_at(port_node, ValidationErrorKind::out_of_range("port")));
    }
    Ok(())
}

fn validate_resources(node: &YamlNode, ctx: &mut ValidationContext<'_>) -> ValidationResult<()> {
    expect_kind(ctx, node, "resources", ExpectedType::Object)?;

    for section in RESOURCE_SECTIONS {
        if let Some(section_node) = find_child(node, section) {
            validate_resource_section(section, section_node, ctx)?;
        }
    }
    Ok(())
}

fn validate_resource_section(
    section: &str,
    node: &YamlNode,
    ctx: &mut ValidationContext<'_>,
) -> ValidationResult<()> {
    let subject = format!("resources.{}", section);
    expect_kind(ctx, node, &subject, ExpectedType::Object)?;

    if let Some(cpu_node) = find_child(node, "cpu") {
        let cpu_subject = format!("{}.cpu", subject);
        let cpu = expect_scalar(ctx, cpu_node, &cpu_subject, ExpectedType::Int)?;
        if format::parse_int(cpu).is_none() {
            return Err(ctx.fail_at(
                cpu_node,
                ValidationErrorKind::type_mismatch(cpu_subject, ExpectedType::Int),
            ));
        }
    }

    if let Some(memory_node) = find_child(node, "memory") {
        let memory_subject = format!("{}.memory", subject);
        let memory = expect_scalar(ctx, memory_node, &memory_subject, ExpectedType::String)?;
        if !format::is_valid_memory_quantity(memory) {
            return Err(ctx.fail_at(
                memory_node,
                ValidationErrorKind::invalid_format(memory_subject, memory),
            ));
        }
    }
    Ok(())
}

/// Fails with `<subject> must be <expected>` unless `node` has the expected
/// structural kind.
fn expect_kind(
    ctx: &mut ValidationContext<'_>,
    node: &YamlNode,
    subject: &str,
    expected: ExpectedType,
) -> ValidationResult<()> {
    let matches = match expected {
        ExpectedType::Object => node.is_mapping(),
        ExpectedType::Array => node.is_sequence(),
        ExpectedType::String | ExpectedType::Int => node.is_scalar(),
    };
    if matches {
        Ok(())
    } else {
        Err(ctx.fail_at(node, ValidationErrorKind::type_mismatch(subject, expected)))
    }
}

/// The text of a scalar node; anything else (null included) fails like
/// [`expect_kind`].
fn expect_scalar<'n>(
    ctx: &mut ValidationContext<'_>,
    node: &'n YamlNode,
    subject: &str,
    expected: ExpectedType,
) -> ValidationResult<&'n str> {
    match node.as_scalar() {
        Some(text) => Ok(text),
        None => Err(ctx.fail_at(node, ValidationErrorKind::type_mismatch(subject, expected))),
    }
}
