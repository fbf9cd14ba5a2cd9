//! Cross-check of `participants.tsv` against discovered subject
//! directories. The table is optional; when present it is treated as the
//! roster of record and disagreements are warnings, never errors.

use std::collections::BTreeSet;
use std::path::Path;

use prism_model::{IssueCode, ValidationIssue};
use tracing::debug;

const PARTICIPANTS_FILE: &str = "participants.tsv";
const ID_COLUMN: &str = "participant_id";

/// Compare the `participant_id` column against the `sub-*` directories
/// found during the walk.
pub fn check_participants(root: &Path, subjects: &BTreeSet<String>) -> Vec<ValidationIssue> {
    let path = root.join(PARTICIPANTS_FILE);
    if !path.is_file() {
        return Vec::new();
    }

    let mut reader = match csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .from_path(&path)
    {
        Ok(reader) => reader,
        Err(error) => {
            return vec![ValidationIssue::warning(
                IssueCode::ParticipantsMismatch,
                format!("could not read {PARTICIPANTS_FILE}: {error}"),
            )];
        }
    };

    let id_index = match reader.headers() {
        Ok(headers) => headers.iter().position(|h| h.trim() == ID_COLUMN),
        Err(error) => {
            return vec![ValidationIssue::warning(
                IssueCode::ParticipantsMismatch,
                format!("could not parse {PARTICIPANTS_FILE} header: {error}"),
            )];
        }
    };
    let Some(id_index) = id_index else {
        return vec![ValidationIssue::warning(
            IssueCode::ParticipantsMismatch,
            format!("{PARTICIPANTS_FILE} has no {ID_COLUMN} column"),
        )];
    };

    let mut listed = BTreeSet::new();
    for record in reader.records() {
        let Ok(record) = record else {
            continue;
        };
        if let Some(value) = record.get(id_index) {
            let value = value.trim();
            if !value.is_empty() {
                listed.insert(value.to_string());
            }
        }
    }
    debug!(listed = listed.len(), found = subjects.len(), "participants cross-check");

    let mut issues = Vec::new();
    for subject in listed.difference(subjects) {
        issues.push(ValidationIssue::warning(
            IssueCode::ParticipantsMismatch,
            format!("{PARTICIPANTS_FILE} lists {subject} but no such subject directory exists"),
        ));
    }
    for subject in subjects.difference(&listed) {
        issues.push(ValidationIssue::warning(
            IssueCode::ParticipantsMismatch,
            format!("subject directory {subject} is not listed in {PARTICIPANTS_FILE}"),
        ));
    }
    issues
}

#[cfg(test)]
mod tests {
    use super::*;

    fn subjects(names: &[&str]) -> BTreeSet<String> {
        names.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn absent_table_is_silent() {
        let dir = tempfile::tempdir().unwrap();
        assert!(check_participants(dir.path(), &subjects(&["sub-01"])).is_empty());
    }

    #[test]
    fn matching_roster_is_silent() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("participants.tsv"),
            "participant_id\tage\nsub-01\t31\nsub-02\t27\n",
        )
        .unwrap();
        assert!(check_participants(dir.path(), &subjects(&["sub-01", "sub-02"])).is_empty());
    }

    #[test]
    fn flags_both_directions_of_mismatch() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("participants.tsv"),
            "participant_id\nsub-01\nsub-03\n",
        )
        .unwrap();
        let issues = check_participants(dir.path(), &subjects(&["sub-01", "sub-02"]));
        assert_eq!(issues.len(), 2);
        assert!(issues[0].message.contains("sub-03"));
        assert!(issues[1].message.contains("sub-02"));
    }

    #[test]
    fn missing_id_column_is_one_warning() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("participants.tsv"), "id\nsub-01\n").unwrap();
        let issues = check_participants(dir.path(), &subjects(&["sub-01"]));
        assert_eq!(issues.len(), 1);
        assert!(issues[0].message.contains("participant_id"));
    }
}
