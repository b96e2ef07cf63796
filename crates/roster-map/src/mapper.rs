//! Header auto-mapping engine.
//!
//! Exact alias matches win at confidence 1.0; the remainder goes through
//! fuzzy scoring (Jaro-Winkler plus containment) with a greedy one-to-one
//! assignment by descending confidence. Headers that clear neither pass
//! stay unmapped and flow through the import verbatim.

use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};

use rapidfuzz::distance::jaro_winkler::similarity as jaro_similarity;
use tracing::debug;

use roster_model::{ColumnHint, FieldType, HeaderMapping, MappingValidation, Schema, SchemaField};

use crate::text::normalize_text;

/// Minimum fuzzy confidence for a mapping to be suggested at all.
pub const DEFAULT_MIN_CONFIDENCE: f64 = 0.6;

const CONTAINMENT_WEIGHT: f64 = 0.9;
const FUZZY_WEIGHT: f64 = 0.9;
const TYPE_MISMATCH_PENALTY: f64 = 0.85;

pub struct AutoMapper {
    schema: Schema,
    min_confidence: f64,
    column_hints: BTreeMap<String, ColumnHint>,
}

struct Candidate {
    header: String,
    field: String,
    confidence: f64,
}

impl AutoMapper {
    pub fn new(schema: Schema) -> Self {
        Self {
            schema,
            min_confidence: DEFAULT_MIN_CONFIDENCE,
            column_hints: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn with_min_confidence(mut self, min_confidence: f64) -> Self {
        self.min_confidence = min_confidence;
        self
    }

    #[must_use]
    pub fn with_column_hints(mut self, hints: BTreeMap<String, ColumnHint>) -> Self {
        self.column_hints = hints;
        self
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Propose a mapping for the given raw headers.
    ///
    /// Deterministic and order-independent: assignment iterates headers in
    /// sorted order for the exact pass and sorts fuzzy candidates with a
    /// full tie-break, so a shuffled header list maps identically.
    pub fn auto_map(&self, headers: &[String]) -> HeaderMapping {
        let mut mapping = BTreeMap::new();
        let mut confidence = BTreeMap::new();
        let mut assigned_fields: BTreeSet<String> = BTreeSet::new();

        let mut sorted_headers: Vec<&String> = headers.iter().collect();
        sorted_headers.sort();
        sorted_headers.dedup();

        // Exact alias pass.
        for header in &sorted_headers {
            let Some(field) = self.exact_match(header) else {
                continue;
            };
            if assigned_fields.contains(&field.name) {
                continue;
            }
            debug!(header = %header, field = %field.name, "exact alias match");
            assigned_fields.insert(field.name.clone());
            mapping.insert((*header).clone(), field.name.clone());
            confidence.insert((*header).clone(), 1.0);
        }

        // Fuzzy pass over whatever is left.
        let mut candidates: Vec<Candidate> = Vec::new();
        for header in &sorted_headers {
            if mapping.contains_key(*header) {
                continue;
            }
            for field in &self.schema.fields {
                if assigned_fields.contains(&field.name) {
                    continue;
                }
                let score = self.score(header, field);
                if score >= self.min_confidence {
                    candidates.push(Candidate {
                        header: (*header).clone(),
                        field: field.name.clone(),
                        confidence: score,
                    });
                }
            }
        }
        candidates.sort_by(|a, b| {
            b.confidence
                .partial_cmp(&a.confidence)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.header.cmp(&b.header))
                .then_with(|| a.field.cmp(&b.field))
        });
        for candidate in candidates {
            if mapping.contains_key(&candidate.header) || assigned_fields.contains(&candidate.field)
            {
                continue;
            }
            debug!(
                header = %candidate.header,
                field = %candidate.field,
                confidence = candidate.confidence,
                "fuzzy match"
            );
            assigned_fields.insert(candidate.field.clone());
            mapping.insert(candidate.header.clone(), candidate.field);
            confidence.insert(candidate.header, candidate.confidence);
        }

        HeaderMapping {
            mapping,
            confidence,
        }
    }

    fn exact_match(&self, header: &str) -> Option<&SchemaField> {
        let normalized = normalize_text(header);
        if normalized.is_empty() {
            return None;
        }
        self.schema.fields.iter().find(|field| {
            normalize_text(&field.name) == normalized
                || field
                    .aliases
                    .iter()
                    .any(|alias| normalize_text(alias) == normalized)
        })
    }

    /// Partial-match confidence in `[0, 1)`, proportional to match quality.
    fn score(&self, header: &str, field: &SchemaField) -> f64 {
        let normalized_header = normalize_text(header);
        if normalized_header.is_empty() {
            return 0.0;
        }
        let mut best: f64 = 0.0;
        for target in std::iter::once(&field.name).chain(field.aliases.iter()) {
            let normalized_target = normalize_text(target);
            if normalized_target.is_empty() {
                continue;
            }
            let containment = containment_score(&normalized_header, &normalized_target);
            let fuzzy = jaro_similarity(normalized_header.chars(), normalized_target.chars())
                * FUZZY_WEIGHT;
            best = best.max(containment).max(fuzzy);
        }
        if let Some(hint) = self.column_hints.get(header) {
            let expects_numeric = field.field_type == FieldType::Number;
            if expects_numeric != hint.is_numeric {
                best *= TYPE_MISMATCH_PENALTY;
            }
        }
        best.clamp(0.0, 1.0)
    }
}

/// Score for one string containing the other, scaled by length ratio so a
/// short fragment inside a long header scores lower than a near-complete one.
fn containment_score(a: &str, b: &str) -> f64 {
    let (shorter, longer) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    if shorter.is_empty() || !longer.contains(shorter) {
        return 0.0;
    }
    CONTAINMENT_WEIGHT * (shorter.len() as f64 / longer.len() as f64)
}

/// Check that every required schema field is covered by at least one header.
pub fn validate_mapping(mapping: &HeaderMapping, schema: &Schema) -> MappingValidation {
    let mapped = mapping.mapped_fields();
    let missing_required: Vec<String> = schema
        .required_fields()
        .filter(|field| !mapped.contains(field.name.as_str()))
        .map(|field| field.name.clone())
        .collect();
    MappingValidation {
        is_valid: missing_required.is_empty(),
        missing_required,
    }
}
