//! Modality dispatch: directory name first, extension cross-check second.

use prism_model::{EntitySet, Modality};

/// How a parsed file fits (or fails to fit) its modality directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// A data file with an allowed extension.
    Data,
    /// A JSON sidecar; exempt from extension and sidecar checks.
    Sidecar,
    /// Extension not in the modality's allowed set.
    ExtensionMismatch,
    /// The modality requires a `task-` entity and the name has none.
    MissingTask,
}

/// Classify a parsed file against the modality its directory declares.
///
/// The directory name is the primary signal: a `.mp4` inside `image/` is
/// a mismatch, never a silent reclassification to `movie`.
pub fn dispatch(modality: Modality, entities: &EntitySet) -> Dispatch {
    let is_sidecar = entities.extension_key() == "json";
    if !is_sidecar && !modality.allows_extension(&entities.extension_key()) {
        return Dispatch::ExtensionMismatch;
    }
    if modality.requires_task() && entities.task.is_none() {
        return Dispatch::MissingTask;
    }
    if is_sidecar {
        Dispatch::Sidecar
    } else {
        Dispatch::Data
    }
}
