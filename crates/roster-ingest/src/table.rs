use std::collections::{BTreeMap, BTreeSet};

use roster_model::{CellValue, ColumnHint};

/// An ingested table: one header row plus raw data rows.
///
/// Rows are positional and aligned with `headers`; a row may be shorter than
/// the header row (trailing cells absent) or longer (malformed source line --
/// the orchestrator decides what to do with those).
#[derive(Debug, Clone, Default)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<CellValue>>,
}

impl RawTable {
    pub fn cell(&self, row: usize, col: usize) -> &CellValue {
        self.rows
            .get(row)
            .and_then(|cells| cells.get(col))
            .unwrap_or(&CellValue::Empty)
    }

    pub fn row_is_empty(&self, row: usize) -> bool {
        self.rows
            .get(row)
            .is_none_or(|cells| cells.iter().all(CellValue::is_empty))
    }
}

/// Strips a UTF-8 BOM and collapses internal whitespace runs.
pub fn normalize_header(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('\u{feff}');
    trimmed.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Per-column statistics for the auto-mapper's type-compatibility penalty.
pub fn build_column_hints(table: &RawTable) -> BTreeMap<String, ColumnHint> {
    let mut hints = BTreeMap::new();
    let row_count = table.rows.len();
    for (col_idx, header) in table.headers.iter().enumerate() {
        let mut non_null = 0usize;
        let mut numeric = 0usize;
        let mut uniques = BTreeSet::new();
        for row_idx in 0..row_count {
            let cell = table.cell(row_idx, col_idx);
            if cell.is_empty() {
                continue;
            }
            non_null += 1;
            let text = cell.as_text();
            if matches!(cell, CellValue::Number(_)) || text.parse::<f64>().is_ok() {
                numeric += 1;
            }
            uniques.insert(text);
        }
        let null_ratio = if row_count == 0 {
            1.0
        } else {
            (row_count - non_null) as f64 / row_count as f64
        };
        let unique_ratio = if non_null == 0 {
            0.0
        } else {
            uniques.len() as f64 / non_null as f64
        };
        hints.insert(
            header.clone(),
            ColumnHint {
                is_numeric: non_null > 0 && numeric == non_null,
                unique_ratio,
                null_ratio,
            },
        );
    }
    hints
}
