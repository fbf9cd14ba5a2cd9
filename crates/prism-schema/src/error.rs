use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum SchemaStoreError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse schema {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("unknown schema version '{version}' (available: {available})")]
    UnknownVersion { version: String, available: String },

    #[error("schema directory not found: {path}")]
    RootNotFound { path: PathBuf },

    #[error("failed to compile schema {name}: {reason}")]
    Compile { name: String, reason: String },
}

impl SchemaStoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
