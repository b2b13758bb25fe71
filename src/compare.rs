//! Baseline-versus-case digest comparison shared by the detection and
//! pattern evaluators.

use serde::Serialize;

use crate::algorithm::Digest;
use crate::fixtures::CaseSet;
use crate::registry::Registry;

/// One algorithm's comparison results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComparisonRow {
    /// Registered algorithm name
    pub algorithm: String,
    /// Digest of the baseline buffer
    pub baseline: Digest,
    /// Per case, whether the case digest differs from `baseline`
    pub differs: Vec<bool>,
}

impl ComparisonRow {
    /// Number of cases whose digest differs from the baseline.
    #[must_use]
    pub fn differing(&self) -> usize {
        self.differs.iter().filter(|&&d| d).count()
    }
}

/// Algorithm × case matrix of "digest differs from baseline".
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComparisonMatrix {
    /// Case labels, one per column
    pub case_labels: Vec<String>,
    /// One row per algorithm, in registry order
    pub rows: Vec<ComparisonRow>,
}

impl ComparisonMatrix {
    /// Digest every case with every registered algorithm.
    #[must_use]
    pub fn build(registry: &Registry, cases: &CaseSet) -> Self {
        let rows = registry
            .all()
            .iter()
            .map(|descriptor| {
                let baseline = descriptor.compute(cases.baseline());
                let differs = cases
                    .cases()
                    .iter()
                    .map(|case| descriptor.compute(case.bytes()) != baseline)
                    .collect();
                ComparisonRow {
                    algorithm: descriptor.name().to_string(),
                    baseline,
                    differs,
                }
            })
            .collect();

        Self {
            case_labels: cases.labels().map(str::to_string).collect(),
            rows,
        }
    }

    /// Row for an algorithm.
    #[must_use]
    pub fn row(&self, algorithm: &str) -> Option<&ComparisonRow> {
        self.rows.iter().find(|r| r.algorithm == algorithm)
    }

    /// Whether `algorithm`'s digest of case `label` differs from the baseline.
    #[must_use]
    pub fn lookup(&self, algorithm: &str, label: &str) -> Option<bool> {
        let column = self.case_labels.iter().position(|l| l == label)?;
        self.row(algorithm).map(|r| r.differs[column])
    }

    /// Number of cases `algorithm` tells apart from the baseline.
    #[must_use]
    pub fn detection_count(&self, algorithm: &str) -> Option<usize> {
        self.row(algorithm).map(ComparisonRow::differing)
    }
}
