//! Running dataset aggregates, built incrementally during the walk.

use std::collections::{BTreeMap, BTreeSet};

use crate::modality::Modality;

/// Per-scope file aggregates. A scope is either one subject/session pair
/// or a subject's session-less file set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScopeStats {
    /// Modality name → file count within this scope.
    pub modality_files: BTreeMap<String, u64>,
    /// Task label → file count within this scope.
    pub task_files: BTreeMap<String, u64>,
}

impl ScopeStats {
    pub fn modalities(&self) -> impl Iterator<Item = &str> {
        self.modality_files.keys().map(String::as_str)
    }

    pub fn tasks(&self) -> impl Iterator<Item = &str> {
        self.task_files.keys().map(String::as_str)
    }

    pub fn has_modality(&self, modality: &str) -> bool {
        self.modality_files.contains_key(modality)
    }

    pub fn has_task(&self, task: &str) -> bool {
        self.task_files.contains_key(task)
    }

    fn add(&mut self, modality: Modality, task: Option<&str>) {
        *self
            .modality_files
            .entry(modality.as_str().to_string())
            .or_default() += 1;
        if let Some(task) = task {
            *self.task_files.entry(task.to_string()).or_default() += 1;
        }
    }
}

/// Everything recorded for one subject.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubjectStats {
    /// Session label → aggregates, for the session layout.
    pub sessions: BTreeMap<String, ScopeStats>,
    /// Aggregates for files directly under modality directories.
    pub sessionless: ScopeStats,
}

impl SubjectStats {
    /// Whether this subject uses `ses-*` subdirectories.
    pub fn has_sessions(&self) -> bool {
        !self.sessions.is_empty()
    }
}

/// Aggregate counts keyed by subject → session → modality → task, plus
/// dataset-wide totals. Consumed once after the walk by the consistency
/// engine and the report summary.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DatasetStats {
    subjects: BTreeMap<String, SubjectStats>,
    modality_totals: BTreeMap<String, u64>,
    tasks: BTreeSet<String>,
    data_files: u64,
    sidecar_files: u64,
}

impl DatasetStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one successfully classified file.
    pub fn add_file(
        &mut self,
        subject: &str,
        session: Option<&str>,
        modality: Modality,
        task: Option<&str>,
        is_sidecar: bool,
    ) {
        let subject_stats = self.subjects.entry(subject.to_string()).or_default();
        let scope = match session {
            Some(session) => subject_stats
                .sessions
                .entry(session.to_string())
                .or_default(),
            None => &mut subject_stats.sessionless,
        };
        scope.add(modality, task);

        *self
            .modality_totals
            .entry(modality.as_str().to_string())
            .or_default() += 1;
        if let Some(task) = task {
            self.tasks.insert(task.to_string());
        }
        if is_sidecar {
            self.sidecar_files += 1;
        } else {
            self.data_files += 1;
        }
    }

    /// Record a subject directory even if no valid file was classified
    /// under it, so empty subjects still participate in consistency checks.
    pub fn touch_subject(&mut self, subject: &str) {
        self.subjects.entry(subject.to_string()).or_default();
    }

    pub fn subjects(&self) -> &BTreeMap<String, SubjectStats> {
        &self.subjects
    }

    pub fn subject_count(&self) -> usize {
        self.subjects.len()
    }

    /// Distinct subject/session pairs, `None` when no subject has sessions.
    pub fn session_count(&self) -> Option<usize> {
        let count: usize = self.subjects.values().map(|s| s.sessions.len()).sum();
        (count > 0).then_some(count)
    }

    pub fn modality_totals(&self) -> &BTreeMap<String, u64> {
        &self.modality_totals
    }

    pub fn tasks(&self) -> &BTreeSet<String> {
        &self.tasks
    }

    pub fn data_files(&self) -> u64 {
        self.data_files
    }

    pub fn sidecar_files(&self) -> u64 {
        self.sidecar_files
    }

    pub fn total_files(&self) -> u64 {
        self.data_files + self.sidecar_files
    }
}
