//! Issue aggregation into the final report.

use prism_model::{
    DatasetStats, IssueLevel, Report, ReportError, ReportSummary, ReportWarning, ValidationIssue,
};

use crate::walker::ValidationOutcome;

/// Fold the collected issues and statistics into a report.
///
/// Deterministic for fixed inputs; the caller supplies `generated_at` so
/// that two runs over an unmodified tree differ only there.
pub fn finalize(
    schema_version: &str,
    generated_at: String,
    issues: &[ValidationIssue],
    stats: &DatasetStats,
) -> Report {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();
    for issue in issues {
        match issue.level {
            IssueLevel::Error => errors.push(ReportError {
                code: issue.code,
                message: issue.message.clone(),
                path: issue
                    .path
                    .as_ref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_default(),
            }),
            IssueLevel::Warning => warnings.push(ReportWarning {
                code: issue.code,
                message: issue.message.clone(),
            }),
        }
    }

    let valid = errors.is_empty();
    Report {
        schema_version: schema_version.to_string(),
        generated_at,
        valid,
        summary: ReportSummary {
            subjects: stats.subject_count(),
            sessions: stats.session_count(),
            modalities: stats.modality_totals().clone(),
            tasks: stats.tasks().iter().cloned().collect(),
            data_files: stats.data_files(),
            sidecar_files: stats.sidecar_files(),
        },
        errors,
        warnings,
    }
}

impl ValidationOutcome {
    /// Finalize with a wall-clock timestamp.
    pub fn into_report(self, schema_version: &str) -> Report {
        finalize(
            schema_version,
            chrono::Utc::now().to_rfc3339(),
            &self.issues,
            &self.stats,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prism_model::{IssueCode, Modality};
    use std::path::PathBuf;

    #[test]
    fn partitions_by_level_and_computes_validity() {
        let mut stats = DatasetStats::new();
        stats.add_file("sub-01", None, Modality::Image, Some("faces"), false);
        let issues = vec![
            ValidationIssue::error(
                IssueCode::MissingSidecar,
                "missing sidecar",
                PathBuf::from("sub-01/image/sub-01_task-faces_stim.png"),
            ),
            ValidationIssue::warning(IssueCode::SessionStructure, "mixed"),
        ];
        let report = finalize("stable", "t".into(), &issues, &stats);
        assert!(!report.valid);
        assert_eq!(report.errors.len(), 1);
        assert_eq!(report.warnings.len(), 1);
        assert_eq!(report.summary.subjects, 1);
        assert_eq!(report.summary.sessions, None);
        assert_eq!(report.summary.modalities["image"], 1);
        assert_eq!(report.summary.tasks, vec!["faces".to_string()]);
    }

    #[test]
    fn warnings_alone_leave_the_dataset_valid() {
        let stats = DatasetStats::new();
        let issues = vec![ValidationIssue::warning(
            IssueCode::ModalityAsymmetry,
            "subject sub-02 missing audio data",
        )];
        let report = finalize("stable", "t".into(), &issues, &stats);
        assert!(report.valid);
        assert_eq!(report.warning_count(), 1);
    }
}
