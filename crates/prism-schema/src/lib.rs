//! Versioned JSON Schema store for sidecar and dataset-description
//! validation.
//!
//! Schemas live under `schemas/<version>/<name>.schema.json` where
//! `<name>` is a modality identifier or `dataset_description`. A version
//! either defines a schema for a modality or that modality is treated as
//! "schema not yet defined" and receives structural checks only.

pub mod error;
pub mod paths;
pub mod store;
pub mod validate;

pub use error::SchemaStoreError;
pub use paths::{SCHEMAS_ENV_VAR, schemas_root};
pub use store::{DEFAULT_VERSION, SchemaStore, available_versions, normalize_version};
pub use validate::{FieldError, declared_sidecar_version, is_compatible_version};
