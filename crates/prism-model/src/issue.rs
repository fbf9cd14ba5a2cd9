//! Validation findings and their classification.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Severity of a validation finding.
///
/// Errors make a dataset unusable; warnings flag asymmetries that may be
/// legitimate (dropout, technical failure). Warnings never fail a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueLevel {
    Error,
    Warning,
}

/// First-class issue codes, attached at the point of detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IssueCode {
    // Errors
    MissingDatasetDescription,
    InvalidBidsFilename,
    FilenamePatternMismatch,
    MissingSidecar,
    InvalidJson,
    SchemaValidationError,
    // Warnings
    UnrecognizedModality,
    ModalityAsymmetry,
    TaskAsymmetry,
    MissingSession,
    SessionStructure,
    ParticipantsMismatch,
    SchemaVersionMismatch,
}

impl IssueCode {
    pub fn as_str(self) -> &'static str {
        match self {
            IssueCode::MissingDatasetDescription => "MISSING_DATASET_DESCRIPTION",
            IssueCode::InvalidBidsFilename => "INVALID_BIDS_FILENAME",
            IssueCode::FilenamePatternMismatch => "FILENAME_PATTERN_MISMATCH",
            IssueCode::MissingSidecar => "MISSING_SIDECAR",
            IssueCode::InvalidJson => "INVALID_JSON",
            IssueCode::SchemaValidationError => "SCHEMA_VALIDATION_ERROR",
            IssueCode::UnrecognizedModality => "UNRECOGNIZED_MODALITY",
            IssueCode::ModalityAsymmetry => "MODALITY_ASYMMETRY",
            IssueCode::TaskAsymmetry => "TASK_ASYMMETRY",
            IssueCode::MissingSession => "MISSING_SESSION",
            IssueCode::SessionStructure => "SESSION_STRUCTURE",
            IssueCode::ParticipantsMismatch => "PARTICIPANTS_MISMATCH",
            IssueCode::SchemaVersionMismatch => "SCHEMA_VERSION_MISMATCH",
        }
    }

    /// The level this code is always reported at.
    pub fn level(self) -> IssueLevel {
        match self {
            IssueCode::MissingDatasetDescription
            | IssueCode::InvalidBidsFilename
            | IssueCode::FilenamePatternMismatch
            | IssueCode::MissingSidecar
            | IssueCode::InvalidJson
            | IssueCode::SchemaValidationError => IssueLevel::Error,
            IssueCode::UnrecognizedModality
            | IssueCode::ModalityAsymmetry
            | IssueCode::TaskAsymmetry
            | IssueCode::MissingSession
            | IssueCode::SessionStructure
            | IssueCode::ParticipantsMismatch
            | IssueCode::SchemaVersionMismatch => IssueLevel::Warning,
        }
    }
}

/// One validation finding.
///
/// Issues are appended in directory-traversal order during the walk and
/// only partitioned by level at report time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationIssue {
    pub level: IssueLevel,
    pub code: IssueCode,
    pub message: String,
    /// Affected file, relative to the dataset root. Always set for errors;
    /// dataset-wide warnings carry no path.
    pub path: Option<PathBuf>,
}

impl ValidationIssue {
    pub fn error(code: IssueCode, message: impl Into<String>, path: PathBuf) -> Self {
        Self {
            level: IssueLevel::Error,
            code,
            message: message.into(),
            path: Some(path),
        }
    }

    pub fn warning(code: IssueCode, message: impl Into<String>) -> Self {
        Self {
            level: IssueLevel::Warning,
            code,
            message: message.into(),
            path: None,
        }
    }
}
