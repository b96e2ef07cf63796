//! The import orchestrator.
//!
//! Composes format dispatch, header auto-mapping, value normalization, and
//! row validation into a single pass over the source rows. Each call owns
//! its row buffer and error/warning lists; nothing is shared between
//! concurrent imports.

use std::path::Path;

use tracing::{debug, info, warn};

use roster_ingest::{RawTable, build_column_hints, read_table};
use roster_map::{AutoMapper, validate_mapping};
use roster_model::{CanonicalRecord, CellValue, FieldValue, HeaderMapping, Schema};
use roster_normalize::{normalize, standardize_field};
use roster_validate::{check_record, is_structurally_valid};

use crate::error::{ImportError, Result};
use crate::options::ImportOptions;
use crate::result::{ImportMetadata, ImportResult};

/// Rows between cancellation checks.
const CANCEL_CHECK_INTERVAL: usize = 128;

pub struct Importer {
    schema: Schema,
    options: ImportOptions,
}

impl Importer {
    pub fn new(schema: Schema) -> Self {
        Self {
            schema,
            options: ImportOptions::default(),
        }
    }

    #[must_use]
    pub fn with_options(mut self, options: ImportOptions) -> Self {
        self.options = options;
        self
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Import a file, dispatching on its extension.
    pub fn import_file(&self, path: &Path) -> Result<ImportResult> {
        info!(path = %path.display(), schema = %self.schema.name, "importing file");
        let table = read_table(path)?;
        self.import_table(&table)
    }

    /// Import an already-read table. The entry point for callers that do
    /// their own parsing.
    pub fn import_table(&self, table: &RawTable) -> Result<ImportResult> {
        let headers = table.headers.clone();
        let (mapping, mut warnings) = self.build_mapping(table, &headers)?;

        let mut errors: Vec<String> = Vec::new();
        let mut records: Vec<CanonicalRecord> = Vec::new();
        let original_row_count = table.rows.len();

        for (idx, row) in table.rows.iter().enumerate() {
            if idx % CANCEL_CHECK_INTERVAL == 0 && self.options.cancel.is_cancelled() {
                return Err(ImportError::Cancelled);
            }
            if self.options.skip_empty_rows && row.iter().all(CellValue::is_empty) {
                continue;
            }
            let row_number = idx + 1;
            match self.build_record(&headers, row, &mapping) {
                Ok(record) => {
                    // Blank-row guard for rows the empty-row skip missed.
                    if is_structurally_valid(&record) {
                        records.push(record);
                    }
                }
                Err(message) => {
                    debug!(row = row_number, message = %message, "row excluded");
                    errors.push(format!("Row {row_number}: {message}"));
                }
            }
        }

        let processed_row_count = records.len();
        let data: Vec<CanonicalRecord> = if self.options.validate_data {
            records
                .into_iter()
                .filter(|record| check_record(record, &self.schema).is_empty())
                .collect()
        } else {
            records
        };
        let valid_row_count = data.len();

        let mapped_field_count = mapping
            .mapped_fields()
            .iter()
            .filter(|field| self.schema.field(field).is_some())
            .count();
        let mapping_coverage = if self.schema.field_count() == 0 {
            0.0
        } else {
            mapped_field_count as f64 / self.schema.field_count() as f64
        };
        let mean_confidence = mapping.mean_confidence();

        self.warn_unmapped_optional(&mapping, &mut warnings);

        info!(
            original = original_row_count,
            processed = processed_row_count,
            valid = valid_row_count,
            coverage = mapping_coverage,
            "import finished"
        );

        Ok(ImportResult {
            data,
            metadata: ImportMetadata {
                original_row_count,
                processed_row_count,
                valid_row_count,
                header_mapping: mapping,
                original_headers: headers,
                mapping_coverage,
                mean_confidence,
            },
            errors,
            warnings,
        })
    }

    fn build_mapping(
        &self,
        table: &RawTable,
        headers: &[String],
    ) -> Result<(HeaderMapping, Vec<String>)> {
        let mut warnings = Vec::new();
        let mapping = if self.options.auto_map_headers {
            AutoMapper::new(self.schema.clone())
                .with_column_hints(build_column_hints(table))
                .auto_map(headers)
        } else {
            HeaderMapping::identity(headers)
        };

        let validation = validate_mapping(&mapping, &self.schema);
        if !validation.is_valid {
            if self.options.require_mandatory_fields {
                return Err(ImportError::MissingRequiredFields(
                    validation.missing_required,
                ));
            }
            warn!(missing = ?validation.missing_required, "required fields unmapped");
            warnings.push(format!(
                "no header mapped for required fields: {}",
                validation.missing_required.join(", ")
            ));
        }
        Ok((mapping, warnings))
    }

    /// Build one canonical record. The only recoverable failure left after
    /// total normalization is structural: a row wider than the header row.
    fn build_record(
        &self,
        headers: &[String],
        row: &[CellValue],
        mapping: &HeaderMapping,
    ) -> std::result::Result<CanonicalRecord, String> {
        if row.len() > headers.len() {
            return Err(format!(
                "row has {} cells but the file declares {} headers",
                row.len(),
                headers.len()
            ));
        }
        let mut record = CanonicalRecord::new();
        for (col_idx, header) in headers.iter().enumerate() {
            let cell = row.get(col_idx).unwrap_or(&CellValue::Empty);
            let target = mapping
                .target_for(header)
                .and_then(|target| self.schema.field(target));
            match target {
                Some(field) => {
                    let value = if self.options.normalize_data {
                        let normalized = normalize(cell, field.field_type);
                        match normalized {
                            FieldValue::Text(text) => {
                                FieldValue::Text(standardize_field(&field.name, &text))
                            }
                            other => other,
                        }
                    } else {
                        raw_field_value(cell)
                    };
                    record.set(&field.name, value);
                }
                None => {
                    // Pass-through: no canonical counterpart, kept verbatim
                    // as a normalized string under its own name.
                    record.push_extra(header, cell.as_text());
                }
            }
        }
        Ok(record)
    }

    fn warn_unmapped_optional(&self, mapping: &HeaderMapping, warnings: &mut Vec<String>) {
        let mapped = mapping.mapped_fields();
        let unmapped_optional: Vec<&str> = self
            .schema
            .fields
            .iter()
            .filter(|field| !field.required && !mapped.contains(field.name.as_str()))
            .map(|field| field.name.as_str())
            .collect();
        if !unmapped_optional.is_empty() {
            warnings.push(format!(
                "no header mapped for optional fields: {}",
                unmapped_optional.join(", ")
            ));
        }
    }
}

/// Wrap a raw cell without coercion, used when normalization is disabled.
fn raw_field_value(cell: &CellValue) -> FieldValue {
    match cell {
        CellValue::Text(text) => FieldValue::Text(text.trim().to_string()),
        CellValue::Number(number) => FieldValue::Number(*number),
        CellValue::Bool(flag) => FieldValue::Bool(*flag),
        CellValue::Date(date) => FieldValue::Date(date.format("%Y-%m-%d").to_string()),
        CellValue::Empty => FieldValue::Missing,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overflowing_row_is_an_error() {
        let importer = Importer::new(Schema::volunteer());
        let headers = vec!["Branch".to_string()];
        let row = vec![
            CellValue::Text("Downtown".to_string()),
            CellValue::Text("spill".to_string()),
        ];
        let mapping = HeaderMapping::identity(&headers);
        assert!(importer.build_record(&headers, &row, &mapping).is_err());
    }

    #[test]
    fn raw_values_preserve_native_types() {
        assert_eq!(
            raw_field_value(&CellValue::Number(2.5)),
            FieldValue::Number(2.5)
        );
        assert_eq!(raw_field_value(&CellValue::Empty), FieldValue::Missing);
    }
}
