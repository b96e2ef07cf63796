use std::path::Path;

use csv::ReaderBuilder;
use tracing::debug;

use roster_model::CellValue;

use crate::error::Result;
use crate::table::{RawTable, normalize_header};

/// Read a delimited-text file. The first record is the header row; every
/// later record becomes a raw data row with its source width preserved.
pub fn read_delimited(path: &Path, delimiter: u8) -> Result<RawTable> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .delimiter(delimiter)
        .flexible(true)
        .from_path(path)?;

    let mut headers: Vec<String> = Vec::new();
    let mut rows: Vec<Vec<CellValue>> = Vec::new();
    for (idx, record) in reader.records().enumerate() {
        let record = record?;
        if idx == 0 {
            headers = record.iter().map(normalize_header).collect();
            continue;
        }
        let row: Vec<CellValue> = record
            .iter()
            .map(|cell| CellValue::from(cell.trim_matches('\u{feff}')))
            .collect();
        rows.push(row);
    }
    debug!(
        path = %path.display(),
        headers = headers.len(),
        rows = rows.len(),
        "read delimited file"
    );
    Ok(RawTable { headers, rows })
}
