use serde::{Deserialize, Serialize};

use roster_model::{CanonicalRecord, HeaderMapping};

/// Statistics describing one import run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImportMetadata {
    /// Rows in the source file (header row excluded).
    pub original_row_count: usize,
    /// Rows that produced a canonical record.
    pub processed_row_count: usize,
    /// Rows that also passed validation.
    pub valid_row_count: usize,
    pub header_mapping: HeaderMapping,
    pub original_headers: Vec<String>,
    /// Mapped canonical fields over total schema fields.
    pub mapping_coverage: f64,
    /// Mean per-header mapping confidence over evaluated headers.
    pub mean_confidence: f64,
}

/// The sole contract surface consumed by callers. Created fresh on every
/// import call and owned by the caller afterwards.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImportResult {
    pub data: Vec<CanonicalRecord>,
    pub metadata: ImportMetadata,
    /// Recoverable row-level failures, formatted `"Row {n}: {message}"`.
    pub errors: Vec<String>,
    /// Non-fatal anomalies, e.g. unmapped optional fields.
    pub warnings: Vec<String>,
}
