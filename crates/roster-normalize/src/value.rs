//! Type coercion for raw cells.
//!
//! Every function here is total: malformed input degrades to a
//! type-appropriate default instead of erroring. Dates are the one exception
//! to defaulting -- an unparseable date becomes `Missing`, never today's date
//! and never an empty string.

use chrono::{Duration, NaiveDate};

use roster_model::{CellValue, FieldType, FieldValue};

/// Truthy tokens accepted for boolean coercion (case-insensitive).
const TRUTHY_TOKENS: [&str; 6] = ["yes", "y", "true", "1", "on", "enabled"];

/// Date-only formats tried during the free-form parse step. Slash-delimited
/// day-first/month-first forms are deliberately absent here; the explicit
/// `M/D/YYYY` step resolves those without ambiguity.
const DATE_FORMATS: [&str; 7] = [
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%d-%b-%Y",
    "%d %b %Y",
    "%b %d, %Y",
    "%B %d, %Y",
    "%Y%m%d",
];

/// Coerce a raw cell to the target type.
pub fn normalize(cell: &CellValue, field_type: FieldType) -> FieldValue {
    match field_type {
        FieldType::Text => FieldValue::Text(normalize_text(cell)),
        FieldType::Number => FieldValue::Number(normalize_number(cell)),
        FieldType::Boolean => FieldValue::Bool(normalize_boolean(cell)),
        FieldType::Date => match parse_date_value(cell) {
            Some(date) => FieldValue::Date(date.format("%Y-%m-%d").to_string()),
            None => FieldValue::Missing,
        },
    }
}

fn normalize_text(cell: &CellValue) -> String {
    cell.as_text()
}

fn normalize_number(cell: &CellValue) -> f64 {
    let parsed = match cell {
        CellValue::Number(number) => Some(*number),
        CellValue::Bool(flag) => Some(if *flag { 1.0 } else { 0.0 }),
        CellValue::Text(text) => parse_numeric_text(text),
        CellValue::Date(_) | CellValue::Empty => None,
    };
    match parsed {
        Some(number) if number.is_finite() => number,
        _ => 0.0,
    }
}

/// Strip thousands separators, currency symbols, and surrounding whitespace
/// before parsing.
fn parse_numeric_text(text: &str) -> Option<f64> {
    let cleaned: String = text
        .trim()
        .chars()
        .filter(|ch| !matches!(ch, ',' | '$' | '\u{20ac}' | '\u{a3}' | '\u{a5}'))
        .collect();
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok()
}

fn normalize_boolean(cell: &CellValue) -> bool {
    match cell {
        CellValue::Bool(flag) => *flag,
        CellValue::Number(number) => *number == 1.0,
        CellValue::Text(text) => {
            let token = text.trim().to_lowercase();
            TRUTHY_TOKENS.contains(&token.as_str())
        }
        CellValue::Date(_) | CellValue::Empty => false,
    }
}

/// Date parse cascade: native value, spreadsheet serial, free-form formats,
/// then explicit `M/D/YYYY`. First success wins; total failure is `None`.
pub fn parse_date_value(cell: &CellValue) -> Option<NaiveDate> {
    match cell {
        CellValue::Date(date) => Some(*date),
        CellValue::Empty => None,
        CellValue::Bool(_) => None,
        CellValue::Number(number) => parse_serial_number(*number),
        CellValue::Text(text) => parse_date_text(text.trim()),
    }
}

fn parse_date_text(text: &str) -> Option<NaiveDate> {
    if text.is_empty() {
        return None;
    }
    if text.len() == 5 && text.bytes().all(|byte| byte.is_ascii_digit()) {
        if let Ok(serial) = text.parse::<i64>()
            && let Some(date) = serial_to_date(serial)
        {
            return Some(date);
        }
    }
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(text, format) {
            return Some(date);
        }
    }
    // Explicit US pattern last: M/D/YYYY or MM/DD/YYYY.
    NaiveDate::parse_from_str(text, "%m/%d/%Y").ok()
}

fn parse_serial_number(number: f64) -> Option<NaiveDate> {
    if number.fract() != 0.0 {
        return None;
    }
    let serial = number as i64;
    if (10_000..=99_999).contains(&serial) {
        serial_to_date(serial)
    } else {
        None
    }
}

/// Convert a spreadsheet date serial to a calendar date.
///
/// The nominal epoch is 1900-01-01 = serial 1, but the 1900 calendar in
/// spreadsheets contains a February 29 that never existed, so for all modern
/// serials the effective epoch is 1899-12-30. Serial 44197 -> 2021-01-01.
/// Kept exactly for bit-compatibility with previously imported datasets.
fn serial_to_date(serial: i64) -> Option<NaiveDate> {
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?;
    epoch.checked_add_signed(Duration::days(serial))
}
