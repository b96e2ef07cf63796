use std::path::PathBuf;

use roster_import::{ImportError, ImportOptions, Importer};
use roster_ingest::IngestError;
use roster_model::{CancelToken, FieldValue, Schema};

fn write_csv(name: &str, contents: &str) -> (tempfile::TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join(name);
    std::fs::write(&path, contents).expect("write file");
    (dir, path)
}

#[test]
fn imports_and_normalizes_a_volunteer_roster() {
    let (_dir, path) = write_csv(
        "roster.csv",
        "Full Name,Branch,Total Hours,Service Date,Member,Favorite Color\n\
         ada lovelace,downtown ymca,\"1,234.50\",44197,yes,mauve\n\
         Grace Hopper,nw community,4,3/9/2024,no,teal\n",
    );
    let result = Importer::new(Schema::volunteer())
        .import_file(&path)
        .expect("import");

    assert_eq!(result.metadata.original_row_count, 2);
    assert_eq!(result.metadata.processed_row_count, 2);
    assert_eq!(result.metadata.valid_row_count, 2);
    assert!(result.errors.is_empty());

    let first = &result.data[0];
    assert_eq!(first.get("hours"), Some(&FieldValue::Number(1234.5)));
    assert_eq!(
        first.get("date"),
        Some(&FieldValue::Date("2021-01-01".to_string()))
    );
    assert_eq!(first.get("is_member"), Some(&FieldValue::Bool(true)));
    assert_eq!(
        first.get("branch"),
        Some(&FieldValue::Text("Downtown YMCA".to_string()))
    );
    // Unmapped column passes through verbatim.
    assert_eq!(
        first.extras,
        vec![("Favorite Color".to_string(), "mauve".to_string())]
    );

    let second = &result.data[1];
    assert_eq!(
        second.get("date"),
        Some(&FieldValue::Date("2024-03-09".to_string()))
    );
    assert_eq!(second.get("is_member"), Some(&FieldValue::Bool(false)));
    assert_eq!(
        second.get("branch"),
        Some(&FieldValue::Text("NW Community".to_string()))
    );
}

#[test]
fn zero_hour_rows_drop_silently() {
    let (_dir, path) = write_csv(
        "roster.csv",
        "Full Name,Branch,Hours\nAda,Downtown,4\nGrace,Downtown,0\n",
    );
    let result = Importer::new(Schema::volunteer())
        .import_file(&path)
        .expect("import");
    assert_eq!(result.metadata.processed_row_count, 2);
    assert_eq!(result.metadata.valid_row_count, 1);
    assert_eq!(result.data.len(), 1);
    // Validation drops are expected outcomes, not errors.
    assert!(result.errors.is_empty());
}

#[test]
fn count_invariant_holds_with_blank_and_bad_rows() {
    let (_dir, path) = write_csv(
        "roster.csv",
        "Full Name,Branch,Hours\nAda,Downtown,4\n,,\nGrace,Downtown,0\nBee,Uptown,x\n",
    );
    let result = Importer::new(Schema::volunteer())
        .import_file(&path)
        .expect("import");
    let meta = &result.metadata;
    assert!(result.data.len() <= meta.processed_row_count);
    assert!(meta.processed_row_count <= meta.original_row_count);
    assert_eq!(meta.original_row_count, 4);
    // Blank row skipped; "x" hours normalizes to 0 and fails validation.
    assert_eq!(meta.processed_row_count, 3);
    assert_eq!(meta.valid_row_count, 1);
}

#[test]
fn unsupported_extension_fails_the_import() {
    let (_dir, path) = write_csv("roster.pdf", "not really a pdf");
    let error = Importer::new(Schema::volunteer())
        .import_file(&path)
        .expect_err("must fail");
    assert!(matches!(
        error,
        ImportError::Ingest(IngestError::UnsupportedFormat(_))
    ));
}

#[test]
fn missing_required_fields_fatal_only_when_requested() {
    let (_dir, path) = write_csv("roster.csv", "Favorite Color\nmauve\n");

    let lenient = Importer::new(Schema::volunteer())
        .import_file(&path)
        .expect("lenient import succeeds");
    assert!(
        lenient
            .warnings
            .iter()
            .any(|warning| warning.contains("required"))
    );

    let strict_options = ImportOptions {
        require_mandatory_fields: true,
        ..ImportOptions::default()
    };
    let error = Importer::new(Schema::volunteer())
        .with_options(strict_options)
        .import_file(&path)
        .expect_err("strict import fails");
    match error {
        ImportError::MissingRequiredFields(missing) => {
            assert!(missing.contains(&"branch".to_string()));
            assert!(missing.contains(&"hours".to_string()));
            assert!(missing.contains(&"assignee".to_string()));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn overlong_rows_are_reported_and_skipped() {
    let (_dir, path) = write_csv(
        "roster.csv",
        "Full Name,Branch,Hours\nAda,Downtown,4,spill\nGrace,Uptown,2\n",
    );
    let result = Importer::new(Schema::volunteer())
        .import_file(&path)
        .expect("import");
    assert_eq!(result.errors.len(), 1);
    assert!(result.errors[0].starts_with("Row 1:"));
    assert_eq!(result.metadata.processed_row_count, 1);
    assert_eq!(result.data.len(), 1);
}

#[test]
fn auto_map_off_passes_headers_through() {
    let (_dir, path) = write_csv(
        "roster.csv",
        "branch,hours,assignee,Shift Lead\nDowntown,4,Ada,Bee\n",
    );
    let options = ImportOptions {
        auto_map_headers: false,
        ..ImportOptions::default()
    };
    let result = Importer::new(Schema::volunteer())
        .with_options(options)
        .import_file(&path)
        .expect("import");
    // Verbatim headers matching schema fields still land in typed slots.
    let record = &result.data[0];
    assert_eq!(record.get("hours"), Some(&FieldValue::Number(4.0)));
    assert_eq!(
        record.extras,
        vec![("Shift Lead".to_string(), "Bee".to_string())]
    );
    // Nothing was scored, so confidence reads as unevaluated.
    assert_eq!(result.metadata.mean_confidence, 0.0);
}

#[test]
fn cancellation_aborts_between_batches() {
    let mut rows = String::from("Full Name,Branch,Hours\n");
    for idx in 0..500 {
        rows.push_str(&format!("Volunteer {idx},Downtown,1\n"));
    }
    let (_dir, path) = write_csv("roster.csv", &rows);
    let cancel = CancelToken::new();
    cancel.cancel();
    let options = ImportOptions {
        cancel: cancel.clone(),
        ..ImportOptions::default()
    };
    let error = Importer::new(Schema::volunteer())
        .with_options(options)
        .import_file(&path)
        .expect_err("cancelled import fails");
    assert!(matches!(error, ImportError::Cancelled));
}

#[test]
fn contact_schema_scenario_maps_exactly() {
    let (_dir, path) = write_csv(
        "contacts.csv",
        "Full Name,E-mail,Phone\nJane Smith,jane@x.com,(555) 123-4567\n",
    );
    let result = Importer::new(Schema::contact())
        .import_file(&path)
        .expect("import");
    let mapping = &result.metadata.header_mapping;
    assert_eq!(mapping.target_for("Full Name"), Some("name"));
    assert_eq!(mapping.target_for("E-mail"), Some("email"));
    assert_eq!(mapping.target_for("Phone"), Some("phone"));
    for confidence in mapping.confidence.values() {
        assert_eq!(*confidence, 1.0);
    }
    assert_eq!(result.metadata.mapping_coverage, 1.0);
    assert_eq!(result.metadata.mean_confidence, 1.0);
}
