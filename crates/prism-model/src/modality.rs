//! The closed set of supported modalities.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A category of stimulus or recording data.
///
/// Each modality owns a directory-name convention, an allowed extension
/// set, and a schema identifier. The set is closed: directories outside
/// it (standard-BIDS `anat/`, `func/`, ...) are tolerated with a warning
/// but never validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Modality {
    Image,
    Movie,
    Audio,
    Eeg,
    Eyetracking,
    Behavior,
    Biometrics,
    Events,
    Physiological,
}

impl Modality {
    /// All known modalities, in canonical order.
    pub const ALL: [Modality; 9] = [
        Modality::Image,
        Modality::Movie,
        Modality::Audio,
        Modality::Eeg,
        Modality::Eyetracking,
        Modality::Behavior,
        Modality::Biometrics,
        Modality::Events,
        Modality::Physiological,
    ];

    /// Canonical directory name, also the schema identifier.
    pub fn as_str(self) -> &'static str {
        match self {
            Modality::Image => "image",
            Modality::Movie => "movie",
            Modality::Audio => "audio",
            Modality::Eeg => "eeg",
            Modality::Eyetracking => "eyetracking",
            Modality::Behavior => "behavior",
            Modality::Biometrics => "biometrics",
            Modality::Events => "events",
            Modality::Physiological => "physiological",
        }
    }

    /// Resolve a directory name to a modality.
    ///
    /// `survey` is accepted as an alias for the behavior modality.
    pub fn from_dir_name(name: &str) -> Option<Modality> {
        match name {
            "image" => Some(Modality::Image),
            "movie" => Some(Modality::Movie),
            "audio" => Some(Modality::Audio),
            "eeg" => Some(Modality::Eeg),
            "eyetracking" => Some(Modality::Eyetracking),
            "behavior" | "survey" => Some(Modality::Behavior),
            "biometrics" => Some(Modality::Biometrics),
            "events" => Some(Modality::Events),
            "physiological" => Some(Modality::Physiological),
            _ => None,
        }
    }

    /// Data-file extensions accepted under this modality's directory,
    /// without the leading dot. JSON sidecars are always accepted.
    pub fn allowed_extensions(self) -> &'static [&'static str] {
        match self {
            Modality::Image => &["png", "jpg", "jpeg", "tiff"],
            Modality::Movie => &["mp4"],
            Modality::Audio => &["wav", "mp3"],
            Modality::Eeg => &["edf", "bdf", "eeg"],
            Modality::Eyetracking => &["tsv", "edf"],
            Modality::Behavior => &["tsv"],
            Modality::Biometrics => &["tsv", "csv"],
            Modality::Events => &["tsv"],
            Modality::Physiological => &["edf", "bdf", "txt", "csv"],
        }
    }

    /// Whether an extension (dotless, any case) is allowed here.
    pub fn allows_extension(self, extension: &str) -> bool {
        let key = extension.trim_start_matches('.').to_lowercase();
        self.allowed_extensions().contains(&key.as_str())
    }

    /// Whether filenames under this modality must carry a `task-` entity.
    ///
    /// Continuous recordings (biometrics, physiological) may be task-free.
    pub fn requires_task(self) -> bool {
        !matches!(self, Modality::Biometrics | Modality::Physiological)
    }
}

impl fmt::Display for Modality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
