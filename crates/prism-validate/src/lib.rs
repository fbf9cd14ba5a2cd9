//! Dataset validation engine.
//!
//! Validates a research-data directory tree against a BIDS-inspired
//! naming and metadata convention: filename grammar, modality dispatch,
//! sidecar resolution with dataset-level fallback, versioned schema
//! validation, and cross-subject consistency analysis.
//!
//! The engine is single-threaded, read-only, and deterministic for a
//! fixed tree and schema version. One invocation owns all of its state;
//! nothing is shared across runs.

pub mod consistency;
pub mod dispatch;
pub mod error;
pub mod filename;
pub mod participants;
pub mod report;
pub mod sidecar;
pub mod system_files;
pub mod walker;

pub use consistency::check_consistency;
pub use dispatch::{Dispatch, dispatch};
pub use error::{Result, ValidateError};
pub use filename::parse;
pub use report::finalize;
pub use walker::{ValidationOutcome, validate_dataset};
