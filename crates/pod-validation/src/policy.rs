//! Switches for the rules whose strictness varies between deployments.
//!
//! Three rules have more than one accepted reading. Each is pinned by an
//! explicit policy value instead of being hard-wired in the validator.

use serde::{Deserialize, Serialize};

/// Accepted values for `spec.os.name`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OsNamePolicy {
    /// Any scalar is accepted.
    #[default]
    Any,
    /// Only `linux` and `windows`.
    Restricted,
}

/// Accepted shapes for `containers[].name`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ContainerNamePolicy {
    /// Non-empty, lowercase letters, digits and underscores only.
    #[default]
    SnakeCase,
    /// Any non-empty string.
    NonEmpty,
    /// Any string, including the empty one.
    Any,
}

/// Checks applied to probe `httpGet.port`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProbePortPolicy {
    /// Same `0 < port < 65536` range as `containerPort`.
    #[default]
    RangeChecked,
    /// Must parse as an integer; the range is not checked.
    Unchecked,
}

/// The full set of policy switches for one validation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ValidationPolicy {
    pub os_name: OsNamePolicy,
    pub container_name: ContainerNamePolicy,
    pub probe_port: ProbePortPolicy,
}

impl ValidationPolicy {
    /// The strictest reading of every rule.
    pub fn strict() -> Self {
        Self {
            os_name: OsNamePolicy::Restricted,
            container_name: ContainerNamePolicy::SnakeCase,
            probe_port: ProbePortPolicy::RangeChecked,
        }
    }

    pub fn with_os_name(mut self, os_name: OsNamePolicy) -> Self {
        self.os_name = os_name;
        self
    }

    pub fn with_container_name(mut self, container_name: ContainerNamePolicy) -> Self {
        self.container_name = container_name;
        self
    }

    pub fn with_probe_port(mut self, probe_port: ProbePortPolicy) -> Self {
        self.probe_port = probe_port;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let policy = ValidationPolicy::default();
        assert_eq!(policy.os_name, OsNamePolicy::Any);
        assert_eq!(policy.container_name, ContainerNamePolicy::SnakeCase);
        assert_eq!(policy.probe_port, ProbePortPolicy::RangeChecked);
    }

    #[test]
    fn test_strict() {
        assert_eq!(ValidationPolicy::strict().os_name, OsNamePolicy::Restricted);
    }

    #[test]
    fn test_deserialize_partial() {
        let policy: ValidationPolicy =
            serde_json::from_str(r#"{"containerName": "non-empty"}"#).unwrap();
        assert_eq!(policy.container_name, ContainerNamePolicy::NonEmpty);
        assert_eq!(policy.os_name, OsNamePolicy::Any);
    }
}
