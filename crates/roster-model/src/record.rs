use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A value after type coercion against the canonical schema.
///
/// `Missing` is distinct from empty text: a date that failed every parse is
/// missing, never an empty string and never a fabricated default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value")]
pub enum FieldValue {
    Text(String),
    Number(f64),
    Bool(bool),
    /// ISO `YYYY-MM-DD`.
    Date(String),
    Missing,
}

impl FieldValue {
    pub fn is_missing(&self) -> bool {
        matches!(self, FieldValue::Missing)
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(text) => Some(text),
            FieldValue::Date(iso) => Some(iso),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Number(number) => Some(*number),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FieldValue::Bool(flag) => Some(*flag),
            _ => None,
        }
    }

    /// True when the value would count toward structural row validity:
    /// non-empty text, non-zero number, any boolean or date.
    pub fn is_populated(&self) -> bool {
        match self {
            FieldValue::Text(text) => !text.trim().is_empty(),
            FieldValue::Number(number) => *number != 0.0,
            FieldValue::Bool(_) | FieldValue::Date(_) => true,
            FieldValue::Missing => false,
        }
    }
}

/// One accepted source row, normalized onto the canonical schema.
///
/// `fields` only ever holds declared schema field names; columns with no
/// canonical counterpart are retained verbatim, in source order, in `extras`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CanonicalRecord {
    pub fields: BTreeMap<String, FieldValue>,
    pub extras: Vec<(String, String)>,
}

impl CanonicalRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.fields.get(field)
    }

    pub fn set(&mut self, field: &str, value: FieldValue) {
        self.fields.insert(field.to_string(), value);
    }

    pub fn push_extra(&mut self, key: &str, value: String) {
        self.extras.push((key.to_string(), value));
    }

    /// Text view of a field, if present and text-like.
    pub fn text(&self, field: &str) -> Option<&str> {
        self.fields.get(field).and_then(FieldValue::as_text)
    }

    /// At least one populated value anywhere, including pass-throughs.
    pub fn has_any_value(&self) -> bool {
        self.fields.values().any(FieldValue::is_populated)
            || self
                .extras
                .iter()
                .any(|(_, value)| !value.trim().is_empty())
    }
}
