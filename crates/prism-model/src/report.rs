//! The machine-readable validation report.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::issue::IssueCode;

/// Final validation report, consumed by the CLI renderer and any
/// request/response surface layered on top of the engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    /// Schema bundle the run was validated against.
    pub schema_version: String,
    /// RFC 3339 timestamp of report creation. The only non-deterministic
    /// field: two runs over an unmodified tree differ here alone.
    pub generated_at: String,
    /// True iff the run produced zero errors. Warnings never fail a run.
    pub valid: bool,
    pub summary: ReportSummary,
    pub errors: Vec<ReportError>,
    pub warnings: Vec<ReportWarning>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportSummary {
    pub subjects: usize,
    /// Distinct subject/session pairs, `null` without a session layout.
    pub sessions: Option<usize>,
    /// Modality name → file count.
    pub modalities: BTreeMap<String, u64>,
    pub tasks: Vec<String>,
    pub data_files: u64,
    pub sidecar_files: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportError {
    pub code: IssueCode,
    pub message: String,
    pub path: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportWarning {
    pub code: IssueCode,
    pub message: String,
}

impl Report {
    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    pub fn warning_count(&self) -> usize {
        self.warnings.len()
    }

    /// Errors grouped by code, in code order. Used for the grouped
    /// human-readable listing; the serialized report stays flat.
    pub fn errors_by_code(&self) -> BTreeMap<IssueCode, Vec<&ReportError>> {
        let mut groups: BTreeMap<IssueCode, Vec<&ReportError>> = BTreeMap::new();
        for error in &self.errors {
            groups.entry(error.code).or_default().push(error);
        }
        groups
    }
}
