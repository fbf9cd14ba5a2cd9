//! Schema directory path resolution.

use std::path::PathBuf;

/// Environment variable for overriding the schemas directory.
pub const SCHEMAS_ENV_VAR: &str = "PRISM_SCHEMAS_DIR";

/// Get the schemas root directory.
///
/// Resolution order:
/// 1. `PRISM_SCHEMAS_DIR` environment variable
/// 2. `schemas/` directory relative to the workspace root
pub fn schemas_root() -> PathBuf {
    if let Ok(root) = std::env::var(SCHEMAS_ENV_VAR) {
        return PathBuf::from(root);
    }
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../schemas")
}
