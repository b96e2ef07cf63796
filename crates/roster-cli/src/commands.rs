use anyhow::{Context, Result};

use roster_import::{ImportOptions, ImportResult, Importer};
use roster_match::{MatchCandidate, MatchOptions, MatchRecord, MatchWeights, find_best_matches};
use roster_model::Schema;
use tracing::info_span;

use crate::cli::{ImportArgs, ReconcileArgs, SchemaArgs};
use crate::summary::{print_import_summary, print_match_summary, print_schema};

pub fn run_import(args: &ImportArgs) -> Result<()> {
    let span = info_span!("import", file = %args.file.display());
    let _guard = span.enter();

    let schema = match &args.schema {
        Some(path) => Schema::from_json_file(path)
            .with_context(|| format!("load schema: {}", path.display()))?,
        None => Schema::volunteer(),
    };
    let options = ImportOptions {
        auto_map_headers: !args.no_auto_map,
        normalize_data: !args.no_normalize,
        validate_data: !args.no_validate,
        skip_empty_rows: !args.keep_empty_rows,
        require_mandatory_fields: args.require_mandatory_fields,
        ..ImportOptions::default()
    };
    let result = Importer::new(schema)
        .with_options(options)
        .import_file(&args.file)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_import_summary(&result);
    }
    Ok(())
}

pub fn run_reconcile(args: &ReconcileArgs) -> Result<()> {
    let span = info_span!(
        "reconcile",
        file_a = %args.file_a.display(),
        file_b = %args.file_b.display()
    );
    let _guard = span.enter();

    let set_a = import_contacts(&args.file_a)?;
    let set_b = import_contacts(&args.file_b)?;
    let records_a: Vec<MatchRecord> = set_a.iter().map(contact_record).collect();
    let records_b: Vec<MatchRecord> = set_b.iter().map(contact_record).collect();

    let options = MatchOptions {
        threshold: args.threshold,
        max_matches: args.max_matches,
        weights: MatchWeights {
            name: args.name_weight,
            email: args.email_weight,
            phone: args.phone_weight,
        },
        ..MatchOptions::default()
    };
    let matches = find_best_matches(&records_a, &records_b, &options)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&matches)?);
    } else {
        print_match_summary(&matches, &records_a, &records_b);
    }
    Ok(())
}

pub fn run_schema(args: &SchemaArgs) -> Result<()> {
    let schema = if args.contact {
        Schema::contact()
    } else {
        Schema::volunteer()
    };
    print_schema(&schema);
    Ok(())
}

fn import_contacts(path: &std::path::Path) -> Result<Vec<roster_model::CanonicalRecord>> {
    let result: ImportResult = Importer::new(Schema::contact())
        .import_file(path)
        .with_context(|| format!("import roster: {}", path.display()))?;
    for warning in &result.warnings {
        tracing::warn!(path = %path.display(), "{warning}");
    }
    Ok(result.data)
}

fn contact_record(record: &roster_model::CanonicalRecord) -> MatchRecord {
    let field = |name: &str| {
        record
            .text(name)
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(str::to_string)
    };
    MatchRecord::new(field("name"), field("email"), field("phone"))
}

/// Shared helper so match output can show who matched whom.
pub fn record_label(record: &MatchRecord) -> String {
    record
        .name
        .clone()
        .or_else(|| record.email.clone())
        .or_else(|| record.phone.clone())
        .unwrap_or_else(|| "(no identity fields)".to_string())
}

pub fn candidate_labels(
    candidate: &MatchCandidate,
    set_a: &[MatchRecord],
    set_b: &[MatchRecord],
) -> (String, String) {
    let label_a = set_a
        .get(candidate.index_a)
        .map(record_label)
        .unwrap_or_default();
    let label_b = set_b
        .get(candidate.index_b)
        .map(record_label)
        .unwrap_or_default();
    (label_a, label_b)
}
