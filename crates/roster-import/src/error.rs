use thiserror::Error;

use roster_ingest::IngestError;

/// Fatal import failures. Row-level anomalies never surface here; they are
/// collected into `ImportResult::errors` and the import carries on.
#[derive(Debug, Error)]
pub enum ImportError {
    /// Unrecognized extension or unreadable source file.
    #[error(transparent)]
    Ingest(#[from] IngestError),
    /// A required canonical field has no mapped header. Raised only when
    /// `require_mandatory_fields` is set; demoted to a warning otherwise.
    #[error("missing required fields: {}", .0.join(", "))]
    MissingRequiredFields(Vec<String>),
    #[error("import cancelled")]
    Cancelled,
}

pub type Result<T> = std::result::Result<T, ImportError>;
