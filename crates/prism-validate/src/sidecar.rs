//! Sidecar resolution along the inheritance chain.
//!
//! Candidates, most specific first:
//! 1. same directory, same basename, `.json` extension
//! 2. dataset-root `<modality>-<task>.json` (one canonical sidecar
//!    shared by all subjects)
//!
//! Resolution stops at the first existing candidate. Partial sidecars
//! are never merged across levels.

use std::path::{Path, PathBuf};

use prism_model::Modality;
use prism_model::entities::split_extension;

/// Ordered candidate sidecar paths for a data file.
pub fn candidate_chain(
    data_file: &Path,
    modality: Modality,
    task: Option<&str>,
    root: &Path,
) -> Vec<PathBuf> {
    let mut candidates = Vec::with_capacity(2);
    if let Some(name) = data_file.file_name().and_then(|n| n.to_str()) {
        let (stem, _) = split_extension(name);
        let adjacent = data_file.with_file_name(format!("{stem}.json"));
        candidates.push(adjacent);
    }
    if let Some(task) = task {
        candidates.push(root.join(format!("{modality}-{task}.json")));
    }
    candidates
}

/// First existing candidate, or `None` (the caller reports a missing
/// sidecar). Existence and precedence only; no content checks here.
pub fn resolve(
    data_file: &Path,
    modality: Modality,
    task: Option<&str>,
    root: &Path,
) -> Option<PathBuf> {
    candidate_chain(data_file, modality, task, root)
        .into_iter()
        .find(|candidate| candidate.is_file())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chain_orders_adjacent_before_root() {
        let root = Path::new("/data/study");
        let file = root.join("sub-01/image/sub-01_task-faces_stim.png");
        let chain = candidate_chain(&file, Modality::Image, Some("faces"), root);
        assert_eq!(
            chain,
            vec![
                root.join("sub-01/image/sub-01_task-faces_stim.json"),
                root.join("image-faces.json"),
            ]
        );
    }

    #[test]
    fn chain_strips_compound_extensions() {
        let root = Path::new("/data/study");
        let file = root.join("sub-01/func/sub-01_task-rest_bold.nii.gz");
        let chain = candidate_chain(&file, Modality::Eeg, None, root);
        assert_eq!(
            chain,
            vec![root.join("sub-01/func/sub-01_task-rest_bold.json")]
        );
    }

    #[test]
    fn task_free_files_have_no_root_candidate() {
        let root = Path::new("/data/study");
        let file = root.join("sub-01/physiological/sub-01_physio.edf");
        let chain = candidate_chain(&file, Modality::Physiological, None, root);
        assert_eq!(chain.len(), 1);
    }

    #[test]
    fn resolves_first_existing_candidate() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        let modality_dir = root.join("sub-01/image");
        std::fs::create_dir_all(&modality_dir).unwrap();
        let data = modality_dir.join("sub-01_task-faces_stim.png");
        std::fs::write(&data, b"png").unwrap();

        assert_eq!(resolve(&data, Modality::Image, Some("faces"), root), None);

        // Dataset-root fallback.
        let shared = root.join("image-faces.json");
        std::fs::write(&shared, b"{}").unwrap();
        assert_eq!(
            resolve(&data, Modality::Image, Some("faces"), root),
            Some(shared.clone())
        );

        // Adjacent sidecar takes precedence once present.
        let adjacent = modality_dir.join("sub-01_task-faces_stim.json");
        std::fs::write(&adjacent, b"{}").unwrap();
        assert_eq!(
            resolve(&data, Modality::Image, Some("faces"), root),
            Some(adjacent)
        );
    }
}
