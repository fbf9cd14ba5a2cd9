//! Cross-subject consistency analysis, run once after the walk.
//!
//! All findings here are warnings: a missing modality or session may be
//! legitimate dropout, but it is worth surfacing. Comparisons are
//! symmetric and naively pairwise over unions; dataset sizes (tens to
//! low hundreds of subjects) make that fine.

use std::collections::BTreeSet;

use prism_model::{DatasetStats, IssueCode, ScopeStats, SubjectStats, ValidationIssue};

/// Compare subjects pairwise and flag asymmetries in modalities, tasks,
/// and session structure.
pub fn check_consistency(stats: &DatasetStats) -> Vec<ValidationIssue> {
    // Nothing to compare against with fewer than two subjects.
    if stats.subject_count() < 2 {
        return Vec::new();
    }

    let mut sessioned: Vec<(&str, &SubjectStats)> = Vec::new();
    let mut sessionless: Vec<(&str, &SubjectStats)> = Vec::new();
    for (subject, subject_stats) in stats.subjects() {
        if subject_stats.has_sessions() {
            sessioned.push((subject, subject_stats));
        } else {
            sessionless.push((subject, subject_stats));
        }
    }

    let mut warnings = Vec::new();
    if sessionless.len() > 1 {
        check_flat_cohort(&sessionless, &mut warnings);
    }
    if sessioned.len() > 1 {
        check_sessioned_cohort(&sessioned, &mut warnings);
    }
    if !sessioned.is_empty() && !sessionless.is_empty() {
        warnings.push(ValidationIssue::warning(
            IssueCode::SessionStructure,
            format!(
                "mixed session structure: {} subject(s) have sessions, {} do not",
                sessioned.len(),
                sessionless.len()
            ),
        ));
    }
    warnings
}

/// Subjects without sessions: compare each against the cohort union.
fn check_flat_cohort(cohort: &[(&str, &SubjectStats)], warnings: &mut Vec<ValidationIssue>) {
    let scopes: Vec<(&str, &ScopeStats)> = cohort
        .iter()
        .map(|(subject, stats)| (*subject, &stats.sessionless))
        .collect();
    check_scope_asymmetry(&scopes, None, warnings);
}

/// Subjects with sessions: flag absent sessions, then compare modality
/// and task coverage within each shared session label.
fn check_sessioned_cohort(cohort: &[(&str, &SubjectStats)], warnings: &mut Vec<ValidationIssue>) {
    let all_sessions: BTreeSet<&str> = cohort
        .iter()
        .flat_map(|(_, stats)| stats.sessions.keys().map(String::as_str))
        .collect();

    for (subject, stats) in cohort {
        for session in &all_sessions {
            if !stats.sessions.contains_key(*session) {
                warnings.push(ValidationIssue::warning(
                    IssueCode::MissingSession,
                    format!("subject {subject} missing session {session}"),
                ));
            }
        }
    }

    for session in &all_sessions {
        let scopes: Vec<(&str, &ScopeStats)> = cohort
            .iter()
            .filter_map(|(subject, stats)| {
                stats.sessions.get(*session).map(|scope| (*subject, scope))
            })
            .collect();
        if scopes.len() > 1 {
            check_scope_asymmetry(&scopes, Some(session), warnings);
        }
    }
}

/// Within one comparable scope set, warn for every subject lacking a
/// modality or task some other subject has.
fn check_scope_asymmetry(
    scopes: &[(&str, &ScopeStats)],
    session: Option<&str>,
    warnings: &mut Vec<ValidationIssue>,
) {
    let all_modalities: BTreeSet<&str> = scopes
        .iter()
        .flat_map(|(_, scope)| scope.modalities())
        .collect();
    let all_tasks: BTreeSet<&str> = scopes.iter().flat_map(|(_, scope)| scope.tasks()).collect();

    let context = |subject: &str| match session {
        Some(session) => format!("subject {subject} session {session}"),
        None => format!("subject {subject}"),
    };

    for (subject, scope) in scopes {
        for modality in &all_modalities {
            if !scope.has_modality(modality) {
                warnings.push(ValidationIssue::warning(
                    IssueCode::ModalityAsymmetry,
                    format!("{} missing {modality} data", context(subject)),
                ));
            }
        }
        for task in &all_tasks {
            if !scope.has_task(task) {
                warnings.push(ValidationIssue::warning(
                    IssueCode::TaskAsymmetry,
                    format!("{} missing task {task}", context(subject)),
                ));
            }
        }
    }
}
