//! Versioned schema bundle loading.
//!
//! A schema version is a directory `schemas/<version>/` holding one
//! `<name>.schema.json` per modality plus `dataset_description.schema.json`.
//! The store loads and compiles one version per run; the resulting value
//! is immutable and owns no shared state across runs.

use std::collections::BTreeMap;
use std::path::Path;

use jsonschema::Validator;
use serde_json::Value;
use tracing::debug;

use crate::error::SchemaStoreError;
use crate::validate::FieldError;

/// Default version used when none is requested.
pub const DEFAULT_VERSION: &str = "stable";

const SCHEMA_FILE_SUFFIX: &str = ".schema.json";

/// Normalize a requested version to its directory name.
///
/// `stable` and `v`-prefixed names pass through; a bare `0.1` becomes
/// `v0.1`. `None` selects the default version.
pub fn normalize_version(requested: Option<&str>) -> String {
    match requested {
        None => DEFAULT_VERSION.to_string(),
        Some(version) if version == DEFAULT_VERSION || version.starts_with('v') => {
            version.to_string()
        }
        Some(version) => format!("v{version}"),
    }
}

/// List the schema versions available under `root`, `stable` first.
pub fn available_versions(root: &Path) -> Result<Vec<String>, SchemaStoreError> {
    if !root.is_dir() {
        return Err(SchemaStoreError::RootNotFound {
            path: root.to_path_buf(),
        });
    }
    let entries = std::fs::read_dir(root).map_err(|e| SchemaStoreError::io(root, e))?;
    let mut versions = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| SchemaStoreError::io(root, e))?;
        if !entry.path().is_dir() {
            continue;
        }
        let Some(name) = entry.file_name().to_str().map(str::to_string) else {
            continue;
        };
        if name == DEFAULT_VERSION || name.starts_with('v') {
            versions.push(name);
        }
    }
    versions.sort_by_key(|v| (v != DEFAULT_VERSION, v.clone()));
    Ok(versions)
}

#[derive(Debug)]
struct SchemaEntry {
    raw: Value,
    validator: Validator,
}

/// An immutable bundle of compiled schemas for one version.
#[derive(Debug)]
pub struct SchemaStore {
    version: String,
    schemas: BTreeMap<String, SchemaEntry>,
}

impl SchemaStore {
    /// Load and compile all schemas for the requested version.
    ///
    /// Fails when the version directory does not exist (listing the
    /// available versions), or when a schema file is unreadable, not
    /// valid JSON, or not a compilable JSON Schema document.
    pub fn load(root: &Path, requested: Option<&str>) -> Result<Self, SchemaStoreError> {
        let version = normalize_version(requested);
        let dir = root.join(&version);
        if !dir.is_dir() {
            let available = available_versions(root)?;
            return Err(SchemaStoreError::UnknownVersion {
                version,
                available: available.join(", "),
            });
        }

        let mut paths = Vec::new();
        let entries = std::fs::read_dir(&dir).map_err(|e| SchemaStoreError::io(&dir, e))?;
        for entry in entries {
            let entry = entry.map_err(|e| SchemaStoreError::io(&dir, e))?;
            let path = entry.path();
            let is_schema = path.is_file()
                && path
                    .file_name()
                    .and_then(|n| n.to_str())
                    .is_some_and(|n| n.ends_with(SCHEMA_FILE_SUFFIX));
            if is_schema {
                paths.push(path);
            }
        }
        paths.sort();

        let mut schemas = BTreeMap::new();
        for path in paths {
            let name = path
                .file_name()
                .and_then(|n| n.to_str())
                .map(|n| n.trim_end_matches(SCHEMA_FILE_SUFFIX).to_string())
                .unwrap_or_default();
            let contents =
                std::fs::read_to_string(&path).map_err(|e| SchemaStoreError::io(&path, e))?;
            let raw: Value =
                serde_json::from_str(&contents).map_err(|e| SchemaStoreError::Json {
                    path: path.clone(),
                    source: e,
                })?;
            let validator =
                jsonschema::validator_for(&raw).map_err(|e| SchemaStoreError::Compile {
                    name: name.clone(),
                    reason: e.to_string(),
                })?;
            schemas.insert(name, SchemaEntry { raw, validator });
        }

        debug!(version = %version, schemas = schemas.len(), "loaded schema bundle");
        Ok(Self { version, schemas })
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn schema_count(&self) -> usize {
        self.schemas.len()
    }

    /// Names of all loaded schemas, sorted.
    pub fn schema_names(&self) -> Vec<&str> {
        self.schemas.keys().map(String::as_str).collect()
    }

    pub fn has_schema(&self, name: &str) -> bool {
        self.schemas.contains_key(name)
    }

    /// The `version` field declared inside a schema document, if any.
    pub fn declared_version(&self, name: &str) -> Option<&str> {
        self.schemas
            .get(name)?
            .raw
            .get("version")
            .and_then(Value::as_str)
    }

    /// Validate an instance against the named schema.
    ///
    /// Returns `None` when no schema is defined for `name` in this
    /// version: the caller skips schema validation entirely rather than
    /// reporting an error.
    pub fn validate(&self, name: &str, instance: &Value) -> Option<Vec<FieldError>> {
        let entry = self.schemas.get(name)?;
        let errors = entry
            .validator
            .iter_errors(instance)
            .map(|e| FieldError {
                pointer: e.instance_path.to_string(),
                message: e.to_string(),
            })
            .collect();
        Some(errors)
    }
}
