use std::path::PathBuf;

use prism_schema::SchemaStoreError;

/// Run-level failures. These abort the run before any report is
/// produced, unlike per-file issues which are collected and recovered.
#[derive(Debug, thiserror::Error)]
pub enum ValidateError {
    #[error("dataset root not found: {path}")]
    RootNotFound { path: PathBuf },

    #[error("failed to read directory {path}: {source}")]
    DirectoryRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Schema(#[from] SchemaStoreError),
}

pub type Result<T> = std::result::Result<T, ValidateError>;
