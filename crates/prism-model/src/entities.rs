//! Parsed filename identity.

use serde::{Deserialize, Serialize};

/// Extensions that span more than one dot and must be split as a unit.
pub const COMPOUND_EXTENSIONS: &[&str] = &[".nii.gz", ".tsv.gz", ".edf.gz"];

/// The parsed identity of a data file.
///
/// Entities appear in the filename in the fixed order
/// `sub → ses → task → run → suffix`. An `EntitySet` is computed once per
/// file during the walk and never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntitySet {
    /// Subject label (`sub-<label>`), always present.
    pub subject: String,
    /// Session label (`ses-<label>`), optional.
    pub session: Option<String>,
    /// Task label (`task-<label>`), required for most modalities.
    pub task: Option<String>,
    /// Run index (`run-<NN>`), a positive integer, optionally zero-padded.
    pub run: Option<u32>,
    /// Bare suffix, the last underscore-separated token (e.g. `stim`, `bold`).
    pub suffix: String,
    /// File extension including the leading dot, possibly compound (`.nii.gz`).
    pub extension: String,
}

impl EntitySet {
    /// Reconstruct the canonical filename for this entity set.
    ///
    /// Re-parsing the result yields an equal `EntitySet`.
    pub fn to_filename(&self) -> String {
        let mut name = format!("sub-{}", self.subject);
        if let Some(session) = &self.session {
            name.push_str(&format!("_ses-{session}"));
        }
        if let Some(task) = &self.task {
            name.push_str(&format!("_task-{task}"));
        }
        if let Some(run) = self.run {
            name.push_str(&format!("_run-{run}"));
        }
        name.push('_');
        name.push_str(&self.suffix);
        name.push_str(&self.extension);
        name
    }

    /// Extension without the leading dot, lowercased (`"nii.gz"`, `"png"`).
    pub fn extension_key(&self) -> String {
        self.extension.trim_start_matches('.').to_lowercase()
    }
}

/// Why a filename failed to parse.
///
/// Callers aggregate any variant into a single invalid-filename issue
/// carrying the offending name; partial entity sets are never accepted.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("filename has no underscore-separated tokens")]
    Empty,
    #[error("first entity must be sub-<label>")]
    MissingSubject,
    #[error("unknown entity key: {key}")]
    UnknownKey { key: String },
    #[error("duplicate entity key: {key}")]
    DuplicateKey { key: String },
    #[error("entity {key} out of order (expected sub, ses, task, run)")]
    OutOfOrder { key: String },
    #[error("invalid {key} label: {value} (labels are alphanumeric)")]
    InvalidLabel { key: String, value: String },
    #[error("invalid run index: {value} (must be a positive integer)")]
    InvalidRun { value: String },
    #[error("missing suffix after the last entity")]
    MissingSuffix,
}

/// Split a filename into `(stem, extension)`, treating compound
/// extensions such as `.nii.gz` as a single unit.
pub fn split_extension(filename: &str) -> (&str, &str) {
    for ext in COMPOUND_EXTENSIONS {
        let Some(split) = filename.len().checked_sub(ext.len()) else {
            continue;
        };
        // Byte-indexed tail check; full lowercasing can change byte
        // lengths and misalign the split for non-ASCII labels.
        let tail_matches = filename
            .get(split..)
            .is_some_and(|tail| tail.eq_ignore_ascii_case(ext));
        if tail_matches {
            return (&filename[..split], &filename[split..]);
        }
    }
    match filename.rfind('.') {
        // A leading dot is a hidden file, not an extension boundary.
        Some(0) | None => (filename, ""),
        Some(idx) => (&filename[..idx], &filename[idx..]),
    }
}
