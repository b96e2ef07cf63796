//! Row validation.
//!
//! Structural validity guards against fully blank rows; schema validation
//! enforces required-field presence, coerced types, and business rules.
//! Validation failures are an expected outcome, so callers drop failing rows
//! from the result without reporting them as errors -- the counts carry the
//! signal.

use tracing::debug;

use roster_model::{CanonicalRecord, FieldType, FieldValue, Schema};

/// One reason a row failed schema validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowIssue {
    pub field: String,
    pub reason: String,
}

impl RowIssue {
    fn new(field: &str, reason: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}

/// A row is structurally valid when it has at least one non-empty, non-zero
/// value anywhere, pass-throughs included.
pub fn is_structurally_valid(record: &CanonicalRecord) -> bool {
    record.has_any_value()
}

/// Check a structurally valid row against the schema. An empty issue list
/// means the row belongs in the result set.
pub fn check_record(record: &CanonicalRecord, schema: &Schema) -> Vec<RowIssue> {
    let mut issues = Vec::new();
    for field in schema.required_fields() {
        match record.get(&field.name) {
            None | Some(FieldValue::Missing) => {
                issues.push(RowIssue::new(&field.name, "required value missing"));
            }
            Some(value) => {
                if let Some(issue) = check_typed_value(&field.name, field.field_type, value) {
                    issues.push(issue);
                }
            }
        }
    }
    // Zero-hour entries carry no analytic weight and are dropped.
    if let Some(FieldValue::Number(hours)) = record.get("hours")
        && *hours <= 0.0
        && !issues.iter().any(|issue| issue.field == "hours")
    {
        issues.push(RowIssue::new("hours", "hours must be greater than zero"));
    }
    if !issues.is_empty() {
        debug!(issues = ?issues, "row failed validation");
    }
    issues
}

fn check_typed_value(name: &str, field_type: FieldType, value: &FieldValue) -> Option<RowIssue> {
    match (field_type, value) {
        (FieldType::Text, FieldValue::Text(text)) => {
            if text.trim().is_empty() {
                Some(RowIssue::new(name, "required text is empty"))
            } else {
                None
            }
        }
        (FieldType::Number, FieldValue::Number(number)) => {
            if *number < 0.0 {
                Some(RowIssue::new(name, "number must not be negative"))
            } else {
                None
            }
        }
        (FieldType::Boolean, FieldValue::Bool(_)) => None,
        (FieldType::Date, FieldValue::Date(_)) => None,
        _ => Some(RowIssue::new(name, "value has the wrong type")),
    }
}
