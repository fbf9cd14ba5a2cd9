//! End-to-end walks over on-disk dataset fixtures.

use std::path::Path;

use serde_json::json;
use tempfile::TempDir;

use prism_model::{IssueCode, IssueLevel};
use prism_schema::SchemaStore;
use prism_validate::{ValidateError, finalize, validate_dataset};

fn write(root: &Path, rel: &str, contents: &str) {
    let path = root.join(rel);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, contents).unwrap();
}

/// Build a `stable` schema bundle from `(name, schema)` pairs.
fn store_with(schemas: &[(&str, serde_json::Value)]) -> (TempDir, SchemaStore) {
    let dir = TempDir::new().unwrap();
    let stable = dir.path().join("stable");
    std::fs::create_dir_all(&stable).unwrap();
    for (name, schema) in schemas {
        std::fs::write(
            stable.join(format!("{name}.schema.json")),
            serde_json::to_string_pretty(schema).unwrap(),
        )
        .unwrap();
    }
    let store = SchemaStore::load(dir.path(), None).unwrap();
    (dir, store)
}

fn minimal_store() -> (TempDir, SchemaStore) {
    store_with(&[("dataset_description", json!({"type": "object"}))])
}

fn description(root: &Path) {
    write(
        root,
        "dataset_description.json",
        r#"{"Name": "demo", "BIDSVersion": "1.8.0"}"#,
    );
}

#[test]
fn missing_sidecar_is_one_error_and_no_warnings() {
    let (_schemas, store) = minimal_store();
    let dataset = TempDir::new().unwrap();
    let root = dataset.path();
    description(root);
    write(root, "sub-001/image/sub-001_task-x_stim.png", "png");

    let outcome = validate_dataset(root, &store).unwrap();
    assert_eq!(outcome.issues.len(), 1);
    let issue = &outcome.issues[0];
    assert_eq!(issue.code, IssueCode::MissingSidecar);
    assert_eq!(issue.level, IssueLevel::Error);
    assert_eq!(
        issue.path.as_deref(),
        Some(Path::new("sub-001/image/sub-001_task-x_stim.png"))
    );

    let report = finalize(store.version(), "t".into(), &outcome.issues, &outcome.stats);
    assert!(!report.valid);
    assert_eq!(report.error_count(), 1);
    assert_eq!(report.warning_count(), 0);
}

#[test]
fn reversed_entity_order_is_one_invalid_filename() {
    let (_schemas, store) = minimal_store();
    let dataset = TempDir::new().unwrap();
    let root = dataset.path();
    description(root);
    write(root, "sub-002/behavior/task-y_sub-002_beh.tsv", "col\n1\n");

    let outcome = validate_dataset(root, &store).unwrap();
    assert_eq!(outcome.issues.len(), 1);
    assert_eq!(outcome.issues[0].code, IssueCode::InvalidBidsFilename);
    assert!(outcome.issues[0].message.contains("task-y_sub-002_beh.tsv"));
}

#[test]
fn extension_mismatch_short_circuits_sidecar_checks() {
    let (_schemas, store) = minimal_store();
    let dataset = TempDir::new().unwrap();
    let root = dataset.path();
    description(root);
    write(root, "sub-001/image/sub-001_task-x_stim.mp4", "mp4");

    let outcome = validate_dataset(root, &store).unwrap();
    assert_eq!(outcome.issues.len(), 1);
    assert_eq!(outcome.issues[0].code, IssueCode::FilenamePatternMismatch);
}

#[test]
fn session_split_yields_exactly_one_structure_warning() {
    let (_schemas, store) = minimal_store();
    let dataset = TempDir::new().unwrap();
    let root = dataset.path();
    description(root);
    write(
        root,
        "sub-001/ses-01/image/sub-001_ses-01_task-x_stim.png",
        "png",
    );
    write(
        root,
        "sub-001/ses-01/image/sub-001_ses-01_task-x_stim.json",
        "{}",
    );
    write(root, "sub-002/image/sub-002_task-x_stim.png", "png");
    write(root, "sub-002/image/sub-002_task-x_stim.json", "{}");

    let outcome = validate_dataset(root, &store).unwrap();
    let warnings: Vec<_> = outcome
        .issues
        .iter()
        .filter(|i| i.level == IssueLevel::Warning)
        .collect();
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].code, IssueCode::SessionStructure);
    assert!(warnings[0].message.contains("1 subject(s) have sessions"));

    let report = finalize(store.version(), "t".into(), &outcome.issues, &outcome.stats);
    assert!(report.valid);
    assert_eq!(report.summary.subjects, 2);
    assert_eq!(report.summary.sessions, Some(1));
}

#[test]
fn dataset_root_sidecar_satisfies_resolution() {
    let (_schemas, store) = minimal_store();
    let dataset = TempDir::new().unwrap();
    let root = dataset.path();
    description(root);
    write(root, "image-x.json", r#"{"Shared": true}"#);
    write(root, "sub-001/image/sub-001_task-x_stim.png", "png");
    write(root, "sub-002/image/sub-002_task-x_stim.png", "png");

    let outcome = validate_dataset(root, &store).unwrap();
    assert!(outcome.issues.is_empty(), "issues: {:?}", outcome.issues);
}

#[test]
fn sidecar_json_syntax_error_is_invalid_json_only() {
    let (_schemas, store) = minimal_store();
    let dataset = TempDir::new().unwrap();
    let root = dataset.path();
    description(root);
    write(root, "sub-001/image/sub-001_task-x_stim.png", "png");
    write(root, "sub-001/image/sub-001_task-x_stim.json", "{not json");

    let outcome = validate_dataset(root, &store).unwrap();
    assert_eq!(outcome.issues.len(), 1);
    assert_eq!(outcome.issues[0].code, IssueCode::InvalidJson);
}

#[test]
fn schema_violations_carry_json_pointers() {
    let (_schemas, store) = store_with(&[
        ("dataset_description", json!({"type": "object"})),
        (
            "image",
            json!({
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
        ),
    ]);
    let dataset = TempDir::new().unwrap();
    let root = dataset.path();
    description(root);
    write(root, "sub-001/image/sub-001_task-x_stim.png", "png");
    write(
        root,
        "sub-001/image/sub-001_task-x_stim.json",
        r#"{"Technical": {"Width": "wide", "Height": 600}}"#,
    );

    let outcome = validate_dataset(root, &store).unwrap();
    assert_eq!(outcome.issues.len(), 1);
    let issue = &outcome.issues[0];
    assert_eq!(issue.code, IssueCode::SchemaValidationError);
    assert!(issue.message.contains("/Technical/Width"));
}

#[test]
fn incompatible_declared_schema_version_is_a_warning() {
    let (_schemas, store) = store_with(&[
        ("dataset_description", json!({"type": "object"})),
        ("image", json!({"version": "1.2.0", "type": "object"})),
    ]);
    let dataset = TempDir::new().unwrap();
    let root = dataset.path();
    description(root);
    write(root, "sub-001/image/sub-001_task-x_stim.png", "png");
    write(
        root,
        "sub-001/image/sub-001_task-x_stim.json",
        r#"{"Metadata": {"SchemaVersion": "2.0.0"}}"#,
    );

    let outcome = validate_dataset(root, &store).unwrap();
    assert_eq!(outcome.issues.len(), 1);
    let issue = &outcome.issues[0];
    assert_eq!(issue.level, IssueLevel::Warning);
    assert_eq!(issue.code, IssueCode::SchemaVersionMismatch);
    assert!(issue.message.contains("2.0.0"));
    assert!(issue.message.contains("1.2.0"));

    let report = finalize(store.version(), "t".into(), &outcome.issues, &outcome.stats);
    assert!(report.valid, "version drift is a warning, never an error");
}

#[test]
fn compatible_declared_schema_version_is_silent() {
    let (_schemas, store) = store_with(&[
        ("dataset_description", json!({"type": "object"})),
        ("image", json!({"version": "1.2.0", "type": "object"})),
    ]);
    let dataset = TempDir::new().unwrap();
    let root = dataset.path();
    description(root);
    write(root, "sub-001/image/sub-001_task-x_stim.png", "png");
    write(
        root,
        "sub-001/image/sub-001_task-x_stim.json",
        r#"{"Metadata": {"SchemaVersion": "1.3.0"}}"#,
    );

    let outcome = validate_dataset(root, &store).unwrap();
    assert!(outcome.issues.is_empty(), "issues: {:?}", outcome.issues);
}

#[test]
fn missing_schema_skips_validation_but_not_structure() {
    // No eeg schema in the bundle: the sidecar content passes untouched,
    // structural checks still apply.
    let (_schemas, store) = minimal_store();
    let dataset = TempDir::new().unwrap();
    let root = dataset.path();
    description(root);
    write(root, "sub-001/eeg/sub-001_task-rest_eeg.edf", "edf");
    write(
        root,
        "sub-001/eeg/sub-001_task-rest_eeg.json",
        r#"{"Anything": "goes"}"#,
    );
    write(root, "sub-001/eeg/sub-001_rest.edf", "edf");

    let outcome = validate_dataset(root, &store).unwrap();
    // Only the task-less EEG filename is reported.
    assert_eq!(outcome.issues.len(), 1);
    assert_eq!(outcome.issues[0].code, IssueCode::InvalidBidsFilename);
    assert!(outcome.issues[0].message.contains("task-"));
}

#[test]
fn schema_version_selection_changes_error_sets() {
    let schemas = TempDir::new().unwrap();
    let stable = schemas.path().join("stable");
    let v01 = schemas.path().join("v0.1");
    std::fs::create_dir_all(&stable).unwrap();
    std::fs::create_dir_all(&v01).unwrap();
    std::fs::write(
        stable.join("dataset_description.schema.json"),
        r#"{"type": "object"}"#,
    )
    .unwrap();
    std::fs::write(
        v01.join("dataset_description.schema.json"),
        r#"{"type": "object"}"#,
    )
    .unwrap();
    std::fs::write(
        stable.join("image.schema.json"),
        serde_json::to_string(&json!({
            "type": "object",
            "required": ["Technical"]
        }))
        .unwrap(),
    )
    .unwrap();
    std::fs::write(
        v01.join("image.schema.json"),
        serde_json::to_string(&json!({
            "type": "object",
            "required": ["Width"]
        }))
        .unwrap(),
    )
    .unwrap();

    let dataset = TempDir::new().unwrap();
    let root = dataset.path();
    description(root);
    write(root, "sub-001/image/sub-001_task-x_stim.png", "png");
    write(
        root,
        "sub-001/image/sub-001_task-x_stim.json",
        r#"{"Width": 800}"#,
    );

    let stable_store = SchemaStore::load(schemas.path(), None).unwrap();
    let v01_store = SchemaStore::load(schemas.path(), Some("0.1")).unwrap();

    let stable_outcome = validate_dataset(root, &stable_store).unwrap();
    let v01_outcome = validate_dataset(root, &v01_store).unwrap();

    // The flat sidecar satisfies v0.1 but misses stable's Technical block.
    assert_eq!(stable_outcome.issues.len(), 1);
    assert_eq!(
        stable_outcome.issues[0].code,
        IssueCode::SchemaValidationError
    );
    assert!(v01_outcome.issues.is_empty());
}

#[test]
fn unrecognized_modality_directory_is_a_warning_per_occurrence() {
    let (_schemas, store) = minimal_store();
    let dataset = TempDir::new().unwrap();
    let root = dataset.path();
    description(root);
    write(root, "sub-001/anat/sub-001_T1w.nii.gz", "nii");
    write(root, "sub-001/func/sub-001_task-rest_bold.nii.gz", "nii");

    let outcome = validate_dataset(root, &store).unwrap();
    let warnings: Vec<_> = outcome
        .issues
        .iter()
        .filter(|i| i.code == IssueCode::UnrecognizedModality)
        .collect();
    assert_eq!(warnings.len(), 2);
    assert!(warnings[0].message.contains("sub-001/anat"));
    assert!(warnings[1].message.contains("sub-001/func"));
    // Nothing inside unrecognized directories is validated.
    assert_eq!(outcome.issues.len(), 2);
}

#[test]
fn missing_dataset_description_is_an_error() {
    let (_schemas, store) = minimal_store();
    let dataset = TempDir::new().unwrap();

    let outcome = validate_dataset(dataset.path(), &store).unwrap();
    assert_eq!(outcome.issues.len(), 1);
    assert_eq!(
        outcome.issues[0].code,
        IssueCode::MissingDatasetDescription
    );
}

#[test]
fn unreadable_root_aborts_the_run() {
    let (_schemas, store) = minimal_store();
    let err = validate_dataset(Path::new("/no/such/dataset"), &store).unwrap_err();
    assert!(matches!(err, ValidateError::RootNotFound { .. }));
}

#[test]
fn reports_are_deterministic_for_a_fixed_tree() {
    let (_schemas, store) = minimal_store();
    let dataset = TempDir::new().unwrap();
    let root = dataset.path();
    description(root);
    write(root, "sub-001/image/sub-001_task-x_stim.png", "png");
    write(root, "sub-002/audio/sub-002_task-y_sound.wav", "wav");

    let first = validate_dataset(root, &store).unwrap();
    let second = validate_dataset(root, &store).unwrap();
    let render = |outcome: &prism_validate::ValidationOutcome| {
        serde_json::to_string(&finalize(
            store.version(),
            "fixed".into(),
            &outcome.issues,
            &outcome.stats,
        ))
        .unwrap()
    };
    assert_eq!(render(&first), render(&second));
}

#[test]
fn system_files_are_skipped_silently() {
    let (_schemas, store) = minimal_store();
    let dataset = TempDir::new().unwrap();
    let root = dataset.path();
    description(root);
    write(root, "sub-001/image/sub-001_task-x_stim.png", "png");
    write(root, "sub-001/image/sub-001_task-x_stim.json", "{}");
    write(root, "sub-001/image/.DS_Store", "junk");
    write(root, "sub-001/image/._sub-001_task-x_stim.png", "fork");

    let outcome = validate_dataset(root, &store).unwrap();
    assert!(outcome.issues.is_empty(), "issues: {:?}", outcome.issues);
}

#[test]
fn participants_roster_mismatch_is_warned() {
    let (_schemas, store) = minimal_store();
    let dataset = TempDir::new().unwrap();
    let root = dataset.path();
    description(root);
    write(root, "participants.tsv", "participant_id\nsub-001\nsub-003\n");
    write(root, "sub-001/image/sub-001_task-x_stim.png", "png");
    write(root, "sub-001/image/sub-001_task-x_stim.json", "{}");

    let outcome = validate_dataset(root, &store).unwrap();
    let mismatches: Vec<_> = outcome
        .issues
        .iter()
        .filter(|i| i.code == IssueCode::ParticipantsMismatch)
        .collect();
    assert_eq!(mismatches.len(), 1);
    assert!(mismatches[0].message.contains("sub-003"));
}
