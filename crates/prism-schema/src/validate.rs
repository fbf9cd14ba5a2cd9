//! Field-level schema errors and sidecar version compatibility.

use std::fmt;

use serde_json::Value;

/// One JSON Schema violation: the JSON Pointer of the failing field and
/// the constraint description from the validator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub pointer: String,
    pub message: String,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.pointer.is_empty() {
            write!(f, "(root): {}", self.message)
        } else {
            write!(f, "{}: {}", self.pointer, self.message)
        }
    }
}

fn parse_version(version: &str) -> (u64, u64, u64) {
    let mut parts = version.split('.').map(|p| p.parse::<u64>().unwrap_or(0));
    (
        parts.next().unwrap_or(0),
        parts.next().unwrap_or(0),
        parts.next().unwrap_or(0),
    )
}

/// Semver-style compatibility: same major version, and the provided minor
/// must not be older than the required minor. Patch level is ignored.
pub fn is_compatible_version(required: &str, provided: &str) -> bool {
    let (req_major, req_minor, _) = parse_version(required);
    let (prov_major, prov_minor, _) = parse_version(provided);
    req_major == prov_major && prov_minor >= req_minor
}

/// The `Metadata.SchemaVersion` a sidecar declares about itself, if any.
pub fn declared_sidecar_version(sidecar: &Value) -> Option<&str> {
    sidecar
        .get("Metadata")?
        .get("SchemaVersion")?
        .as_str()
}
