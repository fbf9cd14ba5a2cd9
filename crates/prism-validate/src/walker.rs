//! Dataset tree walk and per-file orchestration.
//!
//! Scopes nest as dataset → subject (`sub-*`) → optional session
//! (`ses-*`) → modality directory → file. Per-file failures are recorded
//! and recovered; only an unreadable root or an unknown schema version
//! aborts a run.

use std::collections::{BTreeSet, HashSet};
use std::fs::DirEntry;
use std::path::{Path, PathBuf};

use prism_model::{DatasetStats, IssueCode, Modality, ValidationIssue};
use prism_schema::{SchemaStore, declared_sidecar_version, is_compatible_version};
use tracing::{debug, info};

use crate::consistency::check_consistency;
use crate::dispatch::{Dispatch, dispatch};
use crate::error::{Result, ValidateError};
use crate::filename;
use crate::participants::check_participants;
use crate::sidecar;
use crate::system_files::is_system_file;

const DATASET_DESCRIPTION: &str = "dataset_description.json";
const SUBJECT_PREFIX: &str = "sub-";
const SESSION_PREFIX: &str = "ses-";

/// Everything a completed walk produced. Issues are in traversal order;
/// consistency warnings follow the per-file findings.
#[derive(Debug)]
pub struct ValidationOutcome {
    pub issues: Vec<ValidationIssue>,
    pub stats: DatasetStats,
}

/// Walk a dataset root and validate every file against the loaded
/// schema bundle.
pub fn validate_dataset(root: &Path, store: &SchemaStore) -> Result<ValidationOutcome> {
    if !root.is_dir() {
        return Err(ValidateError::RootNotFound {
            path: root.to_path_buf(),
        });
    }
    info!(root = %root.display(), version = store.version(), "validating dataset");

    let mut ctx = WalkContext {
        root,
        store,
        issues: Vec::new(),
        stats: DatasetStats::new(),
        validated_sidecars: HashSet::new(),
    };

    ctx.check_dataset_description();

    let mut subjects = BTreeSet::new();
    for entry in read_dir_sorted(root)? {
        let path = entry.path();
        let Some(name) = entry.file_name().to_str().map(str::to_string) else {
            continue;
        };
        if path.is_dir() && name.starts_with(SUBJECT_PREFIX) {
            subjects.insert(name.clone());
            ctx.walk_subject(&path, &name)?;
        }
    }

    ctx.issues.extend(check_participants(root, &subjects));
    ctx.issues.extend(check_consistency(&ctx.stats));

    info!(
        issues = ctx.issues.len(),
        files = ctx.stats.total_files(),
        "walk complete"
    );
    Ok(ValidationOutcome {
        issues: ctx.issues,
        stats: ctx.stats,
    })
}

struct WalkContext<'a> {
    root: &'a Path,
    store: &'a SchemaStore,
    issues: Vec<ValidationIssue>,
    stats: DatasetStats,
    /// Sidecars already schema-checked; a dataset-level sidecar shared by
    /// many files is validated once.
    validated_sidecars: HashSet<PathBuf>,
}

impl WalkContext<'_> {
    fn rel(&self, path: &Path) -> PathBuf {
        path.strip_prefix(self.root).unwrap_or(path).to_path_buf()
    }

    fn check_dataset_description(&mut self) {
        let path = self.root.join(DATASET_DESCRIPTION);
        if !path.is_file() {
            self.issues.push(ValidationIssue::error(
                IssueCode::MissingDatasetDescription,
                format!("missing {DATASET_DESCRIPTION} at the dataset root"),
                PathBuf::from(DATASET_DESCRIPTION),
            ));
            return;
        }
        self.validate_json_file(&path, "dataset_description");
    }

    fn walk_subject(&mut self, dir: &Path, subject: &str) -> Result<()> {
        debug!(subject, "walking subject");
        self.stats.touch_subject(subject);
        for entry in read_dir_sorted(dir)? {
            let path = entry.path();
            let Some(name) = entry.file_name().to_str().map(str::to_string) else {
                continue;
            };
            if !path.is_dir() || is_system_file(&name) {
                continue;
            }
            if name.starts_with(SESSION_PREFIX) {
                self.walk_session(&path, subject, &name)?;
            } else if let Some(modality) = Modality::from_dir_name(&name) {
                self.walk_modality_dir(&path, subject, None, modality)?;
            } else {
                self.issues.push(ValidationIssue::warning(
                    IssueCode::UnrecognizedModality,
                    format!(
                        "unrecognized modality directory: {}",
                        self.rel(&path).display()
                    ),
                ));
            }
        }
        Ok(())
    }

    fn walk_session(&mut self, dir: &Path, subject: &str, session: &str) -> Result<()> {
        for entry in read_dir_sorted(dir)? {
            let path = entry.path();
            let Some(name) = entry.file_name().to_str().map(str::to_string) else {
                continue;
            };
            if !path.is_dir() || is_system_file(&name) {
                continue;
            }
            if let Some(modality) = Modality::from_dir_name(&name) {
                self.walk_modality_dir(&path, subject, Some(session), modality)?;
            } else {
                self.issues.push(ValidationIssue::warning(
                    IssueCode::UnrecognizedModality,
                    format!(
                        "unrecognized modality directory: {}",
                        self.rel(&path).display()
                    ),
                ));
            }
        }
        Ok(())
    }

    fn walk_modality_dir(
        &mut self,
        dir: &Path,
        subject: &str,
        session: Option<&str>,
        modality: Modality,
    ) -> Result<()> {
        for entry in read_dir_sorted(dir)? {
            let path = entry.path();
            let Some(name) = entry.file_name().to_str().map(str::to_string) else {
                continue;
            };
            if !path.is_file() || is_system_file(&name) {
                continue;
            }
            self.validate_file(&path, &name, subject, session, modality);
        }
        Ok(())
    }

    /// Grammar → dispatch → sidecar → schema, short-circuiting the rest
    /// for this file on the first fatal step.
    fn validate_file(
        &mut self,
        path: &Path,
        name: &str,
        subject: &str,
        session: Option<&str>,
        modality: Modality,
    ) {
        let entities = match filename::parse(name) {
            Ok(entities) => entities,
            Err(error) => {
                self.issues.push(ValidationIssue::error(
                    IssueCode::InvalidBidsFilename,
                    format!("invalid filename {name}: {error}"),
                    self.rel(path),
                ));
                return;
            }
        };

        match dispatch(modality, &entities) {
            Dispatch::ExtensionMismatch => {
                self.issues.push(ValidationIssue::error(
                    IssueCode::FilenamePatternMismatch,
                    format!(
                        "{name} does not match the {modality} pattern (allowed extensions: {})",
                        modality.allowed_extensions().join(", ")
                    ),
                    self.rel(path),
                ));
            }
            Dispatch::MissingTask => {
                self.issues.push(ValidationIssue::error(
                    IssueCode::InvalidBidsFilename,
                    format!("invalid filename {name}: {modality} files require a task- entity"),
                    self.rel(path),
                ));
            }
            Dispatch::Sidecar => {
                self.stats
                    .add_file(subject, session, modality, entities.task.as_deref(), true);
            }
            Dispatch::Data => {
                self.stats
                    .add_file(subject, session, modality, entities.task.as_deref(), false);
                self.check_sidecar(path, modality, entities.task.as_deref());
            }
        }
    }

    fn check_sidecar(&mut self, data_file: &Path, modality: Modality, task: Option<&str>) {
        let Some(sidecar_path) = sidecar::resolve(data_file, modality, task, self.root) else {
            self.issues.push(ValidationIssue::error(
                IssueCode::MissingSidecar,
                format!("missing sidecar for {}", self.rel(data_file).display()),
                self.rel(data_file),
            ));
            return;
        };
        if self.validated_sidecars.insert(sidecar_path.clone()) {
            self.validate_json_file(&sidecar_path, modality.as_str());
        }
    }

    /// Parse a JSON file and, when the active version defines a schema
    /// for `schema_name`, report each schema violation. A parse failure
    /// is one issue and ends processing for this file.
    fn validate_json_file(&mut self, path: &Path, schema_name: &str) {
        let rel = self.rel(path);
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(error) => {
                self.issues.push(ValidationIssue::error(
                    IssueCode::InvalidJson,
                    format!("could not read {}: {error}", rel.display()),
                    rel,
                ));
                return;
            }
        };
        let value: serde_json::Value = match serde_json::from_str(&contents) {
            Ok(value) => value,
            Err(error) => {
                self.issues.push(ValidationIssue::error(
                    IssueCode::InvalidJson,
                    format!("{} is not valid JSON: {error}", rel.display()),
                    rel,
                ));
                return;
            }
        };

        let Some(field_errors) = self.store.validate(schema_name, &value) else {
            // No schema for this modality in the active version.
            debug!(schema = schema_name, "schema not defined, structural checks only");
            return;
        };
        for field_error in field_errors {
            self.issues.push(ValidationIssue::error(
                IssueCode::SchemaValidationError,
                format!("{}: schema error at {field_error}", rel.display()),
                rel.clone(),
            ));
        }

        if let (Some(required), Some(provided)) = (
            self.store.declared_version(schema_name),
            declared_sidecar_version(&value),
        ) && !is_compatible_version(required, provided)
        {
            self.issues.push(ValidationIssue::warning(
                IssueCode::SchemaVersionMismatch,
                format!(
                    "{} declares schema version {provided}, validator expects {required}",
                    rel.display()
                ),
            ));
        }
    }
}

fn read_dir_sorted(dir: &Path) -> Result<Vec<DirEntry>> {
    let entries = std::fs::read_dir(dir).map_err(|e| ValidateError::DirectoryRead {
        path: dir.to_path_buf(),
        source: e,
    })?;
    let mut entries: Vec<DirEntry> = entries
        .collect::<std::io::Result<_>>()
        .map_err(|e| ValidateError::DirectoryRead {
            path: dir.to_path_buf(),
            source: e,
        })?;
    // Filesystem enumeration order is arbitrary; sort for stable reports.
    entries.sort_by_key(DirEntry::file_name);
    Ok(entries)
}
