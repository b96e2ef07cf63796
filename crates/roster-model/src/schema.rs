use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};

/// Target type a canonical field coerces to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Text,
    Number,
    Boolean,
    Date,
}

impl FieldType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::Text => "text",
            FieldType::Number => "number",
            FieldType::Boolean => "boolean",
            FieldType::Date => "date",
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for FieldType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "text" | "string" => Ok(FieldType::Text),
            "number" | "numeric" => Ok(FieldType::Number),
            "boolean" | "bool" => Ok(FieldType::Boolean),
            "date" => Ok(FieldType::Date),
            other => Err(format!("unknown field type: {other}")),
        }
    }
}

/// One canonical field the import pipeline normalizes toward.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchemaField {
    pub name: String,
    pub field_type: FieldType,
    pub required: bool,
    /// Known alternate header spellings, matched case-insensitively after
    /// whitespace normalization.
    #[serde(default)]
    pub aliases: Vec<String>,
}

impl SchemaField {
    pub fn new(name: &str, field_type: FieldType, required: bool, aliases: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            field_type,
            required,
            aliases: aliases.iter().map(|alias| (*alias).to_string()).collect(),
        }
    }
}

/// A fixed, ordered set of canonical fields. Deployment configuration:
/// built once, read everywhere.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Schema {
    pub name: String,
    pub fields: Vec<SchemaField>,
}

impl Schema {
    pub fn new(name: &str, fields: Vec<SchemaField>) -> Self {
        Self {
            name: name.to_string(),
            fields,
        }
    }

    /// Look up a field by canonical name (case-insensitive).
    pub fn field(&self, name: &str) -> Option<&SchemaField> {
        self.fields
            .iter()
            .find(|field| field.name.eq_ignore_ascii_case(name))
    }

    pub fn required_fields(&self) -> impl Iterator<Item = &SchemaField> {
        self.fields.iter().filter(|field| field.required)
    }

    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    /// Load a schema from a JSON file. Rejects duplicate field names.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let schema: Schema = serde_json::from_str(&raw)?;
        schema.check()?;
        Ok(schema)
    }

    fn check(&self) -> Result<()> {
        let mut seen = std::collections::BTreeSet::new();
        for field in &self.fields {
            let key = field.name.trim().to_lowercase();
            if key.is_empty() {
                return Err(ModelError::InvalidSchema("empty field name".to_string()));
            }
            if !seen.insert(key) {
                return Err(ModelError::InvalidSchema(format!(
                    "duplicate field name: {}",
                    field.name
                )));
            }
        }
        Ok(())
    }

    /// The built-in volunteer-activity schema every dashboard import
    /// normalizes toward.
    pub fn volunteer() -> Self {
        Schema::new(
            "volunteer",
            vec![
                SchemaField::new(
                    "branch",
                    FieldType::Text,
                    true,
                    &["branch", "branch name", "location", "site"],
                ),
                SchemaField::new(
                    "hours",
                    FieldType::Number,
                    true,
                    &["hours", "hrs", "total hours", "hours served", "volunteer hours"],
                ),
                SchemaField::new(
                    "assignee",
                    FieldType::Text,
                    true,
                    &[
                        "assignee",
                        "volunteer",
                        "volunteer name",
                        "full name",
                        "name",
                        "assigned to",
                    ],
                ),
                SchemaField::new(
                    "date",
                    FieldType::Date,
                    false,
                    &["date", "activity date", "service date", "shift date"],
                ),
                SchemaField::new(
                    "is_member",
                    FieldType::Boolean,
                    false,
                    &["is member", "member", "membership", "member flag"],
                ),
                SchemaField::new(
                    "project",
                    FieldType::Text,
                    false,
                    &["project", "project name", "program", "activity"],
                ),
                SchemaField::new(
                    "project_tag",
                    FieldType::Text,
                    false,
                    &["project tag", "tag", "project code"],
                ),
                SchemaField::new(
                    "department",
                    FieldType::Text,
                    false,
                    &["department", "dept", "division", "team"],
                ),
            ],
        )
    }

    /// Contact-shaped schema used when reconciling two rosters.
    pub fn contact() -> Self {
        Schema::new(
            "contact",
            vec![
                SchemaField::new(
                    "name",
                    FieldType::Text,
                    true,
                    &["name", "full name", "contact name", "volunteer name"],
                ),
                SchemaField::new(
                    "email",
                    FieldType::Text,
                    false,
                    &["email", "e-mail", "email address", "mail"],
                ),
                SchemaField::new(
                    "phone",
                    FieldType::Text,
                    false,
                    &["phone", "phone number", "telephone", "mobile", "cell"],
                ),
            ],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn volunteer_schema_has_expected_fields() {
        let schema = Schema::volunteer();
        assert_eq!(schema.field_count(), 8);
        assert!(schema.field("hours").is_some_and(|f| f.required));
        assert!(schema.field("HOURS").is_some());
        assert_eq!(schema.required_fields().count(), 3);
    }

    #[test]
    fn duplicate_field_names_rejected() {
        let schema = Schema::new(
            "bad",
            vec![
                SchemaField::new("hours", FieldType::Number, true, &[]),
                SchemaField::new("Hours", FieldType::Number, false, &[]),
            ],
        );
        assert!(schema.check().is_err());
    }

    #[test]
    fn schema_loads_from_json() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("schema.json");
        std::fs::write(
            &path,
            r#"{
                "name": "mini",
                "fields": [
                    {"name": "hours", "field_type": "number", "required": true, "aliases": ["hrs"]},
                    {"name": "note", "field_type": "text", "required": false}
                ]
            }"#,
        )
        .expect("write schema");
        let schema = Schema::from_json_file(&path).expect("load schema");
        assert_eq!(schema.name, "mini");
        assert_eq!(schema.fields[0].aliases, vec!["hrs".to_string()]);
        assert!(schema.fields[1].aliases.is_empty());
    }

    #[test]
    fn field_type_parses_synonyms() {
        assert_eq!("string".parse::<FieldType>(), Ok(FieldType::Text));
        assert_eq!("BOOL".parse::<FieldType>(), Ok(FieldType::Boolean));
        assert!("blob".parse::<FieldType>().is_err());
    }
}
