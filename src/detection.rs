//! Error-detection evaluator.
//!
//! For each algorithm and corruption case, reports whether the corrupted
//! buffer's digest differs from the baseline's. Cases may be shorter or longer
//! than the baseline.

use serde::Serialize;
use tracing::debug;

use crate::compare::ComparisonMatrix;
use crate::error::Result;
use crate::fixtures::{self, CaseSet};
use crate::registry::Registry;

/// Detection results: one row per algorithm, one column per corruption case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetectionReport {
    /// Baseline buffer length in bytes
    pub baseline_len: usize,
    /// Detection matrix
    pub matrix: ComparisonMatrix,
}

impl DetectionReport {
    /// Whether `algorithm` detected corruption `label`.
    #[must_use]
    pub fn detected(&self, algorithm: &str, label: &str) -> Option<bool> {
        self.matrix.lookup(algorithm, label)
    }

    /// Algorithms that missed corruption `label`, in registry order.
    #[must_use]
    pub fn missed_by(&self, label: &str) -> Vec<&str> {
        let Some(column) = self.matrix.case_labels.iter().position(|l| l == label) else {
            return Vec::new();
        };
        self.matrix
            .rows
            .iter()
            .filter(|r| !r.differs[column])
            .map(|r| r.algorithm.as_str())
            .collect()
    }
}

/// Run every registered algorithm against `cases`.
#[must_use]
pub fn evaluate(registry: &Registry, cases: &CaseSet) -> DetectionReport {
    debug!(
        algorithms = registry.len(),
        cases = cases.len(),
        baseline_len = cases.baseline().len(),
        "running error-detection evaluator"
    );
    let matrix = ComparisonMatrix::build(registry, cases);
    DetectionReport {
        baseline_len: cases.baseline().len(),
        matrix,
    }
}

/// Run against the seven reference corruptions.
///
/// # Errors
///
/// Propagates fixture construction errors.
pub fn evaluate_reference(registry: &Registry) -> Result<DetectionReport> {
    let cases = fixtures::reference_corruptions()?;
    Ok(evaluate(registry, &cases))
}
