use std::path::Path;

use calamine::{Data, Reader, open_workbook_auto};
use tracing::debug;

use roster_model::CellValue;

use crate::error::{IngestError, Result};
use crate::table::{RawTable, normalize_header};

/// Read a spreadsheet workbook: first sheet, first row as headers.
///
/// Natively typed cells (numbers, booleans, dates) are preserved as typed
/// values so the normalizer can use them directly instead of re-parsing text.
pub fn read_workbook(path: &Path) -> Result<RawTable> {
    let mut workbook = open_workbook_auto(path)?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| IngestError::EmptyWorkbook(path.display().to_string()))??;

    let mut headers: Vec<String> = Vec::new();
    let mut rows: Vec<Vec<CellValue>> = Vec::new();
    for (idx, row) in range.rows().enumerate() {
        if idx == 0 {
            headers = row
                .iter()
                .map(|cell| normalize_header(&cell_to_value(cell).as_text()))
                .collect();
            continue;
        }
        rows.push(row.iter().map(cell_to_value).collect());
    }
    debug!(
        path = %path.display(),
        headers = headers.len(),
        rows = rows.len(),
        "read workbook sheet"
    );
    Ok(RawTable { headers, rows })
}

fn cell_to_value(cell: &Data) -> CellValue {
    match cell {
        Data::Empty | Data::Error(_) => CellValue::Empty,
        Data::String(text) => CellValue::from(text.as_str()),
        Data::Float(number) => CellValue::Number(*number),
        Data::Int(number) => CellValue::Number(*number as f64),
        Data::Bool(flag) => CellValue::Bool(*flag),
        Data::DateTime(stamp) => match stamp.as_datetime() {
            Some(datetime) => CellValue::Date(datetime.date()),
            None => CellValue::Empty,
        },
        Data::DateTimeIso(text) | Data::DurationIso(text) => CellValue::from(text.as_str()),
    }
}
