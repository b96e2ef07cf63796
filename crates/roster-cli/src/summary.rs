use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use roster_import::ImportResult;
use roster_match::{MatchCandidate, MatchRecord};
use roster_model::Schema;

use crate::commands::candidate_labels;

pub fn print_import_summary(result: &ImportResult) {
    let meta = &result.metadata;
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Rows"),
        header_cell("Processed"),
        header_cell("Valid"),
        header_cell("Coverage"),
        header_cell("Confidence"),
    ]);
    apply_table_style(&mut table);
    table.add_row(vec![
        Cell::new(meta.original_row_count),
        Cell::new(meta.processed_row_count),
        Cell::new(meta.valid_row_count),
        Cell::new(format!("{:.0}%", meta.mapping_coverage * 100.0)),
        Cell::new(format!("{:.0}%", meta.mean_confidence * 100.0)),
    ]);
    println!("{table}");

    print_mapping_table(result);

    if !result.warnings.is_empty() {
        println!();
        println!("Warnings:");
        for warning in &result.warnings {
            println!("- {warning}");
        }
    }
    if !result.errors.is_empty() {
        eprintln!();
        eprintln!("Row errors:");
        for error in &result.errors {
            eprintln!("- {error}");
        }
    }
}

fn print_mapping_table(result: &ImportResult) {
    let meta = &result.metadata;
    if meta.original_headers.is_empty() {
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Source header"),
        header_cell("Canonical field"),
        header_cell("Confidence"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    for header in &meta.original_headers {
        match meta.header_mapping.target_for(header) {
            Some(target) => {
                let confidence = meta
                    .header_mapping
                    .confidence
                    .get(header)
                    .copied()
                    .unwrap_or(0.0);
                table.add_row(vec![
                    Cell::new(header),
                    Cell::new(target).fg(Color::Green),
                    confidence_cell(confidence),
                ]);
            }
            None => {
                table.add_row(vec![
                    Cell::new(header),
                    dim_cell("(pass-through)"),
                    dim_cell("-"),
                ]);
            }
        }
    }
    println!();
    println!("Header mapping:");
    println!("{table}");
}

pub fn print_match_summary(
    matches: &[MatchCandidate],
    set_a: &[MatchRecord],
    set_b: &[MatchRecord],
) {
    if matches.is_empty() {
        println!("No matches above threshold.");
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Record A"),
        header_cell("Record B"),
        header_cell("Confidence"),
        header_cell("Fields"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    for candidate in matches {
        let (label_a, label_b) = candidate_labels(candidate, set_a, set_b);
        let fields = candidate
            .details
            .iter()
            .map(|(field, score)| format!("{field} {:.0}%", score * 100.0))
            .collect::<Vec<_>>()
            .join(", ");
        table.add_row(vec![
            Cell::new(label_a),
            Cell::new(label_b),
            confidence_cell(candidate.confidence),
            Cell::new(fields),
        ]);
    }
    println!("{table}");
    println!("{} match(es)", matches.len());
}

pub fn print_schema(schema: &Schema) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Field"),
        header_cell("Type"),
        header_cell("Required"),
        header_cell("Aliases"),
    ]);
    apply_table_style(&mut table);
    for field in &schema.fields {
        table.add_row(vec![
            Cell::new(&field.name).add_attribute(Attribute::Bold),
            Cell::new(field.field_type),
            if field.required {
                Cell::new("yes").fg(Color::Yellow)
            } else {
                dim_cell("no")
            },
            Cell::new(field.aliases.join(", ")),
        ]);
    }
    println!("Schema: {}", schema.name);
    println!("{table}");
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn confidence_cell(confidence: f64) -> Cell {
    let label = format!("{:.0}%", confidence * 100.0);
    if confidence >= 0.95 {
        Cell::new(label).fg(Color::Green)
    } else if confidence >= 0.8 {
        Cell::new(label).fg(Color::Yellow)
    } else {
        Cell::new(label).fg(Color::Red)
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
