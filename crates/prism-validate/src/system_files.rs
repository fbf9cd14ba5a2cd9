//! OS cruft filtering.
//!
//! Datasets assembled on shared drives accumulate Finder/Explorer
//! artifacts; those are skipped silently instead of being reported as
//! invalid filenames.

const SYSTEM_FILES: &[&str] = &[
    ".DS_Store",
    "._.DS_Store",
    "Thumbs.db",
    "ehthumbs.db",
    "Desktop.ini",
    ".directory",
    ".gitignore",
];

/// Whether a directory entry name is an OS or tooling artifact to ignore.
pub fn is_system_file(name: &str) -> bool {
    if name.is_empty() {
        return true;
    }
    if SYSTEM_FILES.contains(&name) {
        return true;
    }
    // AppleDouble resource forks and editor lock/backup files.
    name.starts_with("._") || name.starts_with(".#") || name.ends_with('~')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filters_known_artifacts() {
        assert!(is_system_file(".DS_Store"));
        assert!(is_system_file("Thumbs.db"));
        assert!(is_system_file("._sub-01_task-x_stim.png"));
        assert!(is_system_file(".#lock"));
        assert!(!is_system_file("sub-01_task-x_stim.png"));
        assert!(!is_system_file("dataset_description.json"));
    }
}
