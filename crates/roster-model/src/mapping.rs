use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Result of auto-mapping raw headers onto canonical field names.
///
/// Built once per import and never mutated afterwards. Headers absent from
/// `mapping` pass through under their own name. `confidence` carries a score
/// in `[0, 1]` per mapped header; absence of an entry means "not evaluated".
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HeaderMapping {
    pub mapping: BTreeMap<String, String>,
    pub confidence: BTreeMap<String, f64>,
}

impl HeaderMapping {
    /// Identity mapping used when auto-mapping is disabled: every raw header
    /// maps to itself and nothing is scored.
    pub fn identity(headers: &[String]) -> Self {
        let mapping = headers
            .iter()
            .map(|header| (header.clone(), header.clone()))
            .collect();
        Self {
            mapping,
            confidence: BTreeMap::new(),
        }
    }

    pub fn target_for(&self, header: &str) -> Option<&str> {
        self.mapping.get(header).map(String::as_str)
    }

    /// Canonical fields covered by at least one header.
    pub fn mapped_fields(&self) -> std::collections::BTreeSet<&str> {
        self.mapping.values().map(String::as_str).collect()
    }

    /// Mean confidence over evaluated headers; 0.0 when nothing was evaluated.
    pub fn mean_confidence(&self) -> f64 {
        if self.confidence.is_empty() {
            return 0.0;
        }
        let sum: f64 = self.confidence.values().sum();
        sum / self.confidence.len() as f64
    }
}

/// Outcome of checking a mapping against the schema's required fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MappingValidation {
    pub is_valid: bool,
    pub missing_required: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mean_confidence_zero_when_unevaluated() {
        let mapping = HeaderMapping::identity(&["A".to_string(), "B".to_string()]);
        assert_eq!(mapping.mean_confidence(), 0.0);
    }

    #[test]
    fn mean_confidence_averages_entries() {
        let mut mapping = HeaderMapping::default();
        mapping.confidence.insert("A".to_string(), 1.0);
        mapping.confidence.insert("B".to_string(), 0.5);
        assert!((mapping.mean_confidence() - 0.75).abs() < f64::EPSILON);
    }
}
