use serde::{Deserialize, Serialize};

/// Per-column statistics gathered during ingest.
///
/// Used by the auto-mapper to penalize type-incompatible candidates.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ColumnHint {
    /// Every non-empty cell parses as a number.
    pub is_numeric: bool,
    /// Ratio of distinct values among non-empty cells (0.0 to 1.0).
    pub unique_ratio: f64,
    /// Ratio of empty cells (0.0 to 1.0).
    pub null_ratio: f64,
}
