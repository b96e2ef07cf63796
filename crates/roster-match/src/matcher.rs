//! Weighted pair scoring and greedy best-match selection.

use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use roster_model::CancelToken;

use crate::similarity::{normalize_email, normalize_name, normalize_phone, similarity};

/// A record to reconcile: whatever identity fields the source had.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MatchRecord {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl MatchRecord {
    pub fn new(
        name: Option<String>,
        email: Option<String>,
        phone: Option<String>,
    ) -> Self {
        Self { name, email, phone }
    }
}

/// Relative weight of each identity field in the pair confidence.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MatchWeights {
    pub name: f64,
    pub email: f64,
    pub phone: f64,
}

impl Default for MatchWeights {
    fn default() -> Self {
        Self {
            name: 0.4,
            email: 0.4,
            phone: 0.2,
        }
    }
}

#[derive(Debug, Clone)]
pub struct MatchOptions {
    /// Minimum pair confidence to keep a candidate.
    pub threshold: f64,
    /// Candidate list is truncated to this length before selection.
    pub max_matches: usize,
    pub weights: MatchWeights,
    /// Checked between candidate-generation chunks.
    pub cancel: CancelToken,
}

impl Default for MatchOptions {
    fn default() -> Self {
        Self {
            threshold: 0.5,
            max_matches: 50,
            weights: MatchWeights::default(),
            cancel: CancelToken::new(),
        }
    }
}

/// A scored pairing of one record from each side.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchCandidate {
    pub index_a: usize,
    pub index_b: usize,
    /// Weighted mean similarity over the fields either record carries.
    pub confidence: f64,
    /// Per-field similarity that fed the confidence.
    pub details: BTreeMap<String, f64>,
}

/// The matcher itself has no fatal failure mode; cancellation is the one way
/// a run ends without a result.
#[derive(Debug, Error)]
#[error("matching cancelled")]
pub struct MatchCancelled;

/// Find the best non-overlapping matches between two record sets.
///
/// Candidates are generated over the full cartesian product, filtered by
/// threshold, sorted by descending confidence, truncated, then selected
/// greedily so that no index from either side is used twice. Greedy is a
/// deliberate trade-off against optimal assignment: conflicts are rare at
/// realistic thresholds and the sorted scan is simple and fast.
pub fn find_best_matches(
    set_a: &[MatchRecord],
    set_b: &[MatchRecord],
    options: &MatchOptions,
) -> Result<Vec<MatchCandidate>, MatchCancelled> {
    if set_a.is_empty() || set_b.is_empty() {
        return Ok(Vec::new());
    }

    let mut candidates: Vec<MatchCandidate> = Vec::new();
    for (index_a, record_a) in set_a.iter().enumerate() {
        if options.cancel.is_cancelled() {
            return Err(MatchCancelled);
        }
        for (index_b, record_b) in set_b.iter().enumerate() {
            let Some((confidence, details)) =
                pair_confidence(record_a, record_b, options.weights)
            else {
                continue;
            };
            if confidence >= options.threshold {
                candidates.push(MatchCandidate {
                    index_a,
                    index_b,
                    confidence,
                    details,
                });
            }
        }
    }

    candidates.sort_by(|a, b| {
        b.confidence
            .partial_cmp(&a.confidence)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.index_a.cmp(&b.index_a))
            .then_with(|| a.index_b.cmp(&b.index_b))
    });
    candidates.truncate(options.max_matches);

    let mut used_a: BTreeSet<usize> = BTreeSet::new();
    let mut used_b: BTreeSet<usize> = BTreeSet::new();
    let mut selected = Vec::new();
    for candidate in candidates {
        if used_a.contains(&candidate.index_a) || used_b.contains(&candidate.index_b) {
            continue;
        }
        used_a.insert(candidate.index_a);
        used_b.insert(candidate.index_b);
        selected.push(candidate);
    }
    debug!(matches = selected.len(), "greedy selection finished");
    Ok(selected)
}

/// Weighted confidence for one pair, `None` when the pair shares no
/// comparable field at all.
///
/// A field counts as comparable when either side has a non-empty normalized
/// value; fields absent from both are excluded from the weighted sum and
/// from the weight total rather than scored as zero.
fn pair_confidence(
    a: &MatchRecord,
    b: &MatchRecord,
    weights: MatchWeights,
) -> Option<(f64, BTreeMap<String, f64>)> {
    let mut weighted_sum = 0.0;
    let mut weight_total = 0.0;
    let mut details = BTreeMap::new();

    let name_a = a.name.as_deref().map(normalize_name).unwrap_or_default();
    let name_b = b.name.as_deref().map(normalize_name).unwrap_or_default();
    if !name_a.is_empty() || !name_b.is_empty() {
        let score = similarity(&name_a, &name_b);
        weighted_sum += score * weights.name;
        weight_total += weights.name;
        details.insert("name".to_string(), score);
    }

    let email_a = a.email.as_deref().map(normalize_email).unwrap_or_default();
    let email_b = b.email.as_deref().map(normalize_email).unwrap_or_default();
    if !email_a.is_empty() || !email_b.is_empty() {
        let score = exact_or_similarity(&email_a, &email_b);
        weighted_sum += score * weights.email;
        weight_total += weights.email;
        details.insert("email".to_string(), score);
    }

    let phone_a = a.phone.as_deref().map(normalize_phone).unwrap_or_default();
    let phone_b = b.phone.as_deref().map(normalize_phone).unwrap_or_default();
    if !phone_a.is_empty() || !phone_b.is_empty() {
        let score = exact_or_similarity(&phone_a, &phone_b);
        weighted_sum += score * weights.phone;
        weight_total += weights.phone;
        details.insert("phone".to_string(), score);
    }

    if weight_total == 0.0 {
        return None;
    }
    Some((weighted_sum / weight_total, details))
}

/// Post-normalization exact match pins the score at 1.0 regardless of what
/// the general metric would say about the raw forms.
fn exact_or_similarity(a: &str, b: &str) -> f64 {
    if !a.is_empty() && a == b {
        1.0
    } else {
        similarity(a, b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, email: &str, phone: &str) -> MatchRecord {
        MatchRecord::new(
            (!name.is_empty()).then(|| name.to_string()),
            (!email.is_empty()).then(|| email.to_string()),
            (!phone.is_empty()).then(|| phone.to_string()),
        )
    }

    #[test]
    fn identical_records_match_at_full_confidence() {
        let a = vec![record("Jane Smith", "jane@x.com", "")];
        let b = vec![record("Jane Smith", "jane@x.com", "")];
        let matches = find_best_matches(&a, &b, &MatchOptions::default()).unwrap();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].confidence, 1.0);
        assert_eq!(matches[0].details["name"], 1.0);
        assert_eq!(matches[0].details["email"], 1.0);
    }

    #[test]
    fn phone_formatting_differences_cost_nothing() {
        let a = vec![record("", "", "+1 (555) 123-4567")];
        let b = vec![record("", "", "555.123.4567")];
        let matches = find_best_matches(&a, &b, &MatchOptions::default()).unwrap();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].confidence, 1.0);
    }

    #[test]
    fn fields_absent_from_both_sides_are_excluded() {
        // Only names are comparable; a weak email would otherwise dilute it.
        let a = vec![record("Jane Smith", "", "")];
        let b = vec![record("Jane Smith", "", "")];
        let matches = find_best_matches(&a, &b, &MatchOptions::default()).unwrap();
        assert_eq!(matches[0].confidence, 1.0);
        assert!(!matches[0].details.contains_key("email"));
    }

    #[test]
    fn field_present_on_one_side_counts_against() {
        let a = vec![record("Jane Smith", "jane@x.com", "")];
        let b = vec![record("Jane Smith", "", "")];
        let matches = find_best_matches(&a, &b, &MatchOptions::default()).unwrap();
        // name 1.0 * 0.4 + email 0.0 * 0.4 over weight 0.8
        assert!((matches[0].confidence - 0.5).abs() < 1e-9);
    }

    #[test]
    fn conflicting_candidates_resolve_to_higher_confidence() {
        let a = vec![record("Jane Smith", "", "")];
        let b = vec![
            record("Jane Smyth", "", ""),
            record("Jane Smith", "", ""),
        ];
        let matches = find_best_matches(&a, &b, &MatchOptions::default()).unwrap();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].index_b, 1);
        assert_eq!(matches[0].confidence, 1.0);
    }

    #[test]
    fn no_index_repeats_in_the_selection() {
        let a = vec![
            record("Ada Lovelace", "ada@x.org", ""),
            record("Ada Lovelace", "", ""),
        ];
        let b = vec![
            record("Ada Lovelace", "ada@x.org", ""),
            record("Ada Lovelase", "", ""),
        ];
        let matches = find_best_matches(&a, &b, &MatchOptions::default()).unwrap();
        let mut seen_a = BTreeSet::new();
        let mut seen_b = BTreeSet::new();
        for candidate in &matches {
            assert!(seen_a.insert(candidate.index_a));
            assert!(seen_b.insert(candidate.index_b));
        }
    }

    #[test]
    fn empty_inputs_yield_empty_output() {
        let some = vec![record("Jane", "", "")];
        assert!(
            find_best_matches(&[], &some, &MatchOptions::default())
                .unwrap()
                .is_empty()
        );
        assert!(
            find_best_matches(&some, &[], &MatchOptions::default())
                .unwrap()
                .is_empty()
        );
    }

    #[test]
    fn below_threshold_pairs_are_dropped() {
        let a = vec![record("Jane Smith", "", "")];
        let b = vec![record("Robert Oppenheimer", "", "")];
        let matches = find_best_matches(&a, &b, &MatchOptions::default()).unwrap();
        assert!(matches.is_empty());
    }

    #[test]
    fn max_matches_caps_the_result() {
        let a: Vec<MatchRecord> = (0..5)
            .map(|idx| record(&format!("Volunteer {idx}"), "", ""))
            .collect();
        let b = a.clone();
        let options = MatchOptions {
            max_matches: 2,
            ..MatchOptions::default()
        };
        let matches = find_best_matches(&a, &b, &options).unwrap();
        assert_eq!(matches.len(), 2);
    }

    #[test]
    fn cancellation_stops_matching() {
        let a = vec![record("Jane", "", "")];
        let b = vec![record("Jane", "", "")];
        let options = MatchOptions::default();
        options.cancel.cancel();
        assert!(find_best_matches(&a, &b, &options).is_err());
    }

    proptest::proptest! {
        #[test]
        fn selection_is_always_injective_and_bounded(
            names_a in proptest::collection::vec("[a-z]{1,8}", 0..8),
            names_b in proptest::collection::vec("[a-z]{1,8}", 0..8),
        ) {
            let a: Vec<MatchRecord> = names_a.iter().map(|n| record(n, "", "")).collect();
            let b: Vec<MatchRecord> = names_b.iter().map(|n| record(n, "", "")).collect();
            let options = MatchOptions::default();
            let matches = find_best_matches(&a, &b, &options).unwrap();
            let mut seen_a = BTreeSet::new();
            let mut seen_b = BTreeSet::new();
            for candidate in &matches {
                proptest::prop_assert!((options.threshold..=1.0).contains(&candidate.confidence));
                proptest::prop_assert!(seen_a.insert(candidate.index_a));
                proptest::prop_assert!(seen_b.insert(candidate.index_b));
            }
            proptest::prop_assert!(matches.len() <= options.max_matches);
        }
    }

    #[test]
    fn records_with_no_comparable_fields_never_match() {
        let a = vec![MatchRecord::default()];
        let b = vec![record("Jane", "", "")];
        // The pair shares no field populated on both sides beyond name,
        // which is empty on one side: confidence degrades to 0.
        let matches = find_best_matches(&a, &b, &MatchOptions::default()).unwrap();
        assert!(matches.is_empty());
    }
}
