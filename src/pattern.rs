//! Pattern evaluator.
//!
//! Digests structurally distinctive buffers (constant, reversed, rotated,
//! doubled, alternating) and reports which algorithms cannot tell them apart
//! from the baseline.

use serde::Serialize;
use tracing::debug;

use crate::compare::ComparisonMatrix;
use crate::error::{DigestLabError, Result};
use crate::fixtures::{self, CaseSet};
use crate::registry::Registry;

/// Pattern results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PatternReport {
    /// Comparison matrix; rendered pattern-per-row
    pub matrix: ComparisonMatrix,
}

impl PatternReport {
    /// Whether `algorithm` distinguishes pattern `label` from the baseline.
    #[must_use]
    pub fn differs(&self, algorithm: &str, label: &str) -> Option<bool> {
        self.matrix.lookup(algorithm, label)
    }

    /// Patterns `algorithm` confuses with the baseline.
    #[must_use]
    pub fn blind_spots(&self, algorithm: &str) -> Vec<&str> {
        let Some(row) = self.matrix.row(algorithm) else {
            return Vec::new();
        };
        self.matrix
            .case_labels
            .iter()
            .zip(&row.differs)
            .filter(|(_, &differs)| !differs)
            .map(|(label, _)| label.as_str())
            .collect()
    }
}

/// Check that every pattern has the baseline's length.
///
/// # Errors
///
/// Returns [`DigestLabError::InvalidConfig`] naming the first offending
/// pattern.
pub fn validate(patterns: &CaseSet) -> Result<()> {
    let expected = patterns.baseline().len();
    match patterns.cases().iter().find(|c| c.bytes().len() != expected) {
        Some(bad) => Err(DigestLabError::invalid(format!(
            "pattern {:?} is {} bytes, baseline is {expected}",
            bad.label(),
            bad.bytes().len()
        ))),
        None => Ok(()),
    }
}

/// Run every registered algorithm against `patterns`.
///
/// # Errors
///
/// Returns [`DigestLabError::InvalidConfig`] if a pattern's length differs
/// from the baseline's.
pub fn evaluate(registry: &Registry, patterns: &CaseSet) -> Result<PatternReport> {
    validate(patterns)?;
    debug!(
        algorithms = registry.len(),
        patterns = patterns.len(),
        "running pattern evaluator"
    );
    Ok(PatternReport {
        matrix: ComparisonMatrix::build(registry, patterns),
    })
}

/// Run against the six reference patterns.
///
/// # Errors
///
/// Propagates fixture construction errors.
pub fn evaluate_reference(registry: &Registry) -> Result<PatternReport> {
    evaluate(registry, &fixtures::reference_patterns()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::Case;

    fn report() -> PatternReport {
        evaluate_reference(&Registry::standard()).unwrap()
    }

    #[test]
    fn xor_blind_to_every_pattern() {
        // Baseline 00..07 XORs to zero, as does every reference pattern
        assert_eq!(report().blind_spots("xor"), fixtures::PATTERN_LABELS);
    }

    #[test]
    fn simple_sum_blind_to_permutations() {
        assert_eq!(report().blind_spots("simple-sum"), ["reversed", "rotated-left"]);
    }

    #[test]
    fn position_sensitive_algorithms_see_every_pattern() {
        let report = report();
        for name in [
            "rolling-hash",
            "pearson",
            "fletcher-16",
            "crc-32",
            "weighted-sum",
            "adler-32",
            "prime-hash",
        ] {
            assert!(report.blind_spots(name).is_empty(), "{name}");
        }
    }

    #[test]
    fn reversal_lookup() {
        let report = report();
        assert_eq!(report.differs("xor", "reversed"), Some(false));
        assert_eq!(report.differs("crc-32", "reversed"), Some(true));
    }

    #[test]
    fn length_mismatch_rejected() {
        let set = CaseSet::new(vec![0u8; 8], vec![Case::new("short", vec![0u8; 7])]).unwrap();
        let err = evaluate(&Registry::standard(), &set).unwrap_err();
        assert!(matches!(err, DigestLabError::InvalidConfig(msg) if msg.contains("short")));
    }

    #[test]
    fn blind_spots_unknown_algorithm_empty() {
        assert!(report().blind_spots("md5").is_empty());
    }
}
