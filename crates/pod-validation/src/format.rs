//! Format checks for scalar values.

use crate::policy::ContainerNamePolicy;
use once_cell::sync::Lazy;
use regex::Regex;

/// Registry every container image must come from.
pub const IMAGE_REGISTRY_PREFIX: &str = "registry.bigbrother.io/";

/// Suffixes accepted on memory quantities.
pub const MEMORY_SUFFIXES: [&str; 3] = ["Ki", "Mi", "Gi"];

static SNAKE_CASE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z0-9_]+$").expect("snake case pattern is valid"));

/// Signed decimal integer, as written in the manifest.
pub fn parse_int(text: &str) -> Option<i64> {
    text.parse::<i64>().ok()
}

/// `0 < port < 65536`.
pub fn is_port_in_range(port: i64) -> bool {
    port > 0 && port < 65536
}

/// A scalar that parses as an integer inside the port range.
pub fn is_valid_port(text: &str) -> bool {
    parse_int(text).is_some_and(is_port_in_range)
}

pub fn is_valid_container_name(name: &str, policy: ContainerNamePolicy) -> bool {
    match policy {
        ContainerNamePolicy::SnakeCase => !name.is_empty() && SNAKE_CASE_RE.is_match(name),
        ContainerNamePolicy::NonEmpty => !name.is_empty(),
        ContainerNamePolicy::Any => true,
    }
}

/// Image from the allowed registry, with a `:` before the tag.
pub fn is_valid_image_reference(image: &str) -> bool {
    image.starts_with(IMAGE_REGISTRY_PREFIX) && image.contains(':')
}

/// `<integer><Ki|Mi|Gi>`, at least three characters long.
pub fn is_valid_memory_quantity(quantity: &str) -> bool {
    if quantity.len() < 3 {
        return false;
    }
    MEMORY_SUFFIXES
        .iter()
        .find_map(|suffix| quantity.strip_suffix(*suffix))
        .is_some_and(|amount| parse_int(amount).is_some())
}

pub fn is_http_path(path: &str) -> bool {
    path.starts_with('/')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_int() {
        assert_eq!(parse_int("8080"), Some(8080));
        assert_eq!(parse_int("-1"), Some(-1));
        assert_eq!(parse_int("+7"), Some(7));
        assert_eq!(parse_int(""), None);
        assert_eq!(parse_int("80.0"), None);
        assert_eq!(parse_int(" 80"), None);
        assert_eq!(parse_int("0x50"), None);
    }

    #[test]
    fn test_port_range() {
        assert!(is_valid_port("1"));
        assert!(is_valid_port("65535"));
        assert!(!is_valid_port("0"));
        assert!(!is_valid_port("65536"));
        assert!(!is_valid_port("-1"));
        assert!(!is_valid_port("http"));
    }

    #[test]
    fn test_container_name_snake_case() {
        let policy = ContainerNamePolicy::SnakeCase;
        assert!(is_valid_container_name("web_server_2", policy));
        assert!(!is_valid_container_name("My-App", policy));
        assert!(!is_valid_container_name("web-server", policy));
        assert!(!is_valid_container_name("", policy));
    }

    #[test]
    fn test_container_name_looser_policies() {
        assert!(is_valid_container_name("My-App", ContainerNamePolicy::NonEmpty));
        assert!(!is_valid_container_name("", ContainerNamePolicy::NonEmpty));
        assert!(is_valid_container_name("", ContainerNamePolicy::Any));
    }

    #[test]
    fn test_image_reference() {
        assert!(is_valid_image_reference("registry.bigbrother.io/app:1.0"));
        assert!(!is_valid_image_reference("registry.bigbrother.io/app"));
        assert!(!is_valid_image_reference("docker.io/app:1.0"));
        assert!(!is_valid_image_reference("app:1.0"));
    }

    #[test]
    fn test_memory_quantity() {
        assert!(is_valid_memory_quantity("128Mi"));
        assert!(is_valid_memory_quantity("1Gi"));
        assert!(is_valid_memory_quantity("512Ki"));
        assert!(!is_valid_memory_quantity("100"));
        assert!(!is_valid_memory_quantity("10Xi"));
        assert!(!is_valid_memory_quantity("Mi"));
        assert!(!is_valid_memory_quantity("1.5Gi"));
        assert!(!is_valid_memory_quantity("128MB"));
    }

    #[test]
    fn test_http_path() {
        assert!(is_http_path("/healthz"));
        assert!(!is_http_path("healthz"));
    }
}
