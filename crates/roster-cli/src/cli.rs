//! CLI argument definitions for the roster tool.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "roster",
    version,
    about = "Smart import and fuzzy reconciliation for volunteer rosters",
    long_about = "Import arbitrary tabular volunteer data onto a canonical schema\n\
                  with header auto-mapping, value normalization, and validation,\n\
                  or reconcile two independently-sourced rosters into best-effort\n\
                  identity matches."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Import a tabular file onto the canonical volunteer schema.
    Import(ImportArgs),

    /// Reconcile two rosters into best-effort identity matches.
    Reconcile(ReconcileArgs),

    /// Show the canonical schema fields and their header aliases.
    Schema(SchemaArgs),
}

#[derive(Parser)]
pub struct ImportArgs {
    /// Source file (csv, tsv, txt, or a spreadsheet workbook).
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Load the canonical schema from a JSON file instead of the built-in
    /// volunteer schema.
    #[arg(long = "schema", value_name = "PATH")]
    pub schema: Option<PathBuf>,

    /// Use raw headers verbatim instead of auto-mapping them.
    #[arg(long = "no-auto-map")]
    pub no_auto_map: bool,

    /// Skip value normalization and field standardization.
    #[arg(long = "no-normalize")]
    pub no_normalize: bool,

    /// Keep rows that fail schema/business-rule validation.
    #[arg(long = "no-validate")]
    pub no_validate: bool,

    /// Process rows with no populated cells instead of skipping them.
    #[arg(long = "keep-empty-rows")]
    pub keep_empty_rows: bool,

    /// Fail the import when a required field has no mapped header.
    #[arg(long = "require-mandatory-fields")]
    pub require_mandatory_fields: bool,

    /// Emit the full import result as JSON instead of summary tables.
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Parser)]
pub struct ReconcileArgs {
    /// First roster file.
    #[arg(value_name = "FILE_A")]
    pub file_a: PathBuf,

    /// Second roster file.
    #[arg(value_name = "FILE_B")]
    pub file_b: PathBuf,

    /// Minimum pair confidence to report a match.
    #[arg(long = "threshold", default_value_t = 0.5)]
    pub threshold: f64,

    /// Maximum number of matches to report.
    #[arg(long = "max-matches", default_value_t = 50)]
    pub max_matches: usize,

    /// Weight of name similarity in the pair confidence.
    #[arg(long = "name-weight", default_value_t = 0.4)]
    pub name_weight: f64,

    /// Weight of email similarity in the pair confidence.
    #[arg(long = "email-weight", default_value_t = 0.4)]
    pub email_weight: f64,

    /// Weight of phone similarity in the pair confidence.
    #[arg(long = "phone-weight", default_value_t = 0.2)]
    pub phone_weight: f64,

    /// Emit the match list as JSON instead of a table.
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Parser)]
pub struct SchemaArgs {
    /// Show the contact schema used by reconcile instead of the volunteer one.
    #[arg(long = "contact")]
    pub contact: bool,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
