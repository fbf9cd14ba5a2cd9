//! Schema store integration tests against on-disk bundles.

use serde_json::json;
use tempfile::TempDir;

use prism_schema::{SchemaStore, SchemaStoreError, available_versions};

fn write_schema(dir: &std::path::Path, name: &str, schema: &serde_json::Value) {
    std::fs::write(
        dir.join(format!("{name}.schema.json")),
        serde_json::to_string_pretty(schema).unwrap(),
    )
    .unwrap();
}

fn schemas_fixture() -> TempDir {
    let root = TempDir::new().unwrap();
    let stable = root.path().join("stable");
    let v01 = root.path().join("v0.1");
    std::fs::create_dir_all(&stable).unwrap();
    std::fs::create_dir_all(&v01).unwrap();

    write_schema(
        &stable,
        "image",
        &json!({
            "version": "1.2.0",
            "type": "object",
            "required": ["Technical"],
            "properties": {
                "Technical": {
                    "type": "object",
                    "required": ["Width", "Height"],
                    "properties": {
                        "Width": {"type": "integer", "minimum": 1},
                        "Height": {"type": "integer", "minimum": 1}
                    }
                }
            }
        }),
    );
    write_schema(
        &v01,
        "image",
        &json!({
            "version": "0.1.0",
            "type": "object",
            "required": ["Width", "Height"],
            "properties": {
                "Width": {"type": "integer"},
                "Height": {"type": "integer"}
            }
        }),
    );
    write_schema(&stable, "dataset_description", &json!({"type": "object"}));
    root
}

#[test]
fn loads_default_version() {
    let root = schemas_fixture();
    let store = SchemaStore::load(root.path(), None).unwrap();
    assert_eq!(store.version(), "stable");
    assert_eq!(store.schema_count(), 2);
    assert!(store.has_schema("image"));
    assert!(store.has_schema("dataset_description"));
    assert_eq!(store.declared_version("image"), Some("1.2.0"));
}

#[test]
fn normalizes_bare_version_numbers() {
    let root = schemas_fixture();
    let store = SchemaStore::load(root.path(), Some("0.1")).unwrap();
    assert_eq!(store.version(), "v0.1");
    assert_eq!(store.declared_version("image"), Some("0.1.0"));
}

#[test]
fn unknown_version_lists_available() {
    let root = schemas_fixture();
    let err = SchemaStore::load(root.path(), Some("v9.9")).unwrap_err();
    match err {
        SchemaStoreError::UnknownVersion { version, available } => {
            assert_eq!(version, "v9.9");
            assert_eq!(available, "stable, v0.1");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn version_listing_puts_stable_first() {
    let root = schemas_fixture();
    let versions = available_versions(root.path()).unwrap();
    assert_eq!(versions, vec!["stable".to_string(), "v0.1".to_string()]);
}

#[test]
fn reports_field_errors_with_pointers() {
    let root = schemas_fixture();
    let store = SchemaStore::load(root.path(), None).unwrap();

    let instance = json!({"Technical": {"Width": "wide", "Height": 600}});
    let errors = store.validate("image", &instance).unwrap();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].pointer, "/Technical/Width");

    let valid = json!({"Technical": {"Width": 800, "Height": 600}});
    assert!(store.validate("image", &valid).unwrap().is_empty());
}

#[test]
fn missing_schema_means_no_validation() {
    let root = schemas_fixture();
    let store = SchemaStore::load(root.path(), None).unwrap();
    assert!(store.validate("eeg", &json!({})).is_none());
}

#[test]
fn version_selection_changes_error_sets() {
    let root = schemas_fixture();
    let stable = SchemaStore::load(root.path(), None).unwrap();
    let v01 = SchemaStore::load(root.path(), Some("v0.1")).unwrap();

    // Flat layout: valid under v0.1, rejected by the nested stable schema.
    let sidecar = json!({"Width": 800, "Height": 600});
    assert!(v01.validate("image", &sidecar).unwrap().is_empty());
    assert!(!stable.validate("image", &sidecar).unwrap().is_empty());
}
