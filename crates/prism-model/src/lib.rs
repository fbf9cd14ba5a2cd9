pub mod entities;
pub mod issue;
pub mod modality;
pub mod report;
pub mod stats;

pub use entities::{EntitySet, ParseError};
pub use issue::{IssueCode, IssueLevel, ValidationIssue};
pub use modality::Modality;
pub use report::{Report, ReportError, ReportSummary, ReportWarning};
pub use stats::{DatasetStats, ScopeStats, SubjectStats};
