//! Labeled input buffers for the comparison evaluators.
//!
//! A [`Case`] is a full replacement buffer, not a diff against the baseline.

use serde::Serialize;

use crate::error::{DigestLabError, Result};

/// A labeled buffer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Case {
    label: String,
    bytes: Vec<u8>,
}

impl Case {
    /// Create a case.
    #[must_use]
    pub fn new(label: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            label: label.into(),
            bytes: bytes.into(),
        }
    }

    /// Case label.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Case buffer.
    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}

/// A baseline buffer and the ordered cases compared against it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CaseSet {
    baseline: Vec<u8>,
    cases: Vec<Case>,
}

impl CaseSet {
    /// Build a set from ready-made cases.
    ///
    /// # Errors
    ///
    /// Returns [`DigestLabError::InvalidConfig`] if `cases` is empty or two
    /// cases share a label.
    pub fn new(baseline: impl Into<Vec<u8>>, cases: Vec<Case>) -> Result<Self> {
        if cases.is_empty() {
            return Err(DigestLabError::invalid("case set has no cases"));
        }
        for (i, case) in cases.iter().enumerate() {
            if cases[..i].iter().any(|c| c.label == case.label) {
                return Err(DigestLabError::invalid(format!(
                    "duplicate case label {:?}",
                    case.label
                )));
            }
        }
        Ok(Self {
            baseline: baseline.into(),
            cases,
        })
    }

    /// Build a set by pairing `labels` with `buffers` positionally.
    ///
    /// # Errors
    ///
    /// Returns [`DigestLabError::FixtureMismatch`] if the two lists differ in
    /// length; nothing is silently dropped.
    ///
    /// # Example
    ///
    /// ```rust
    /// use digestlab::CaseSet;
    ///
    /// let err = CaseSet::from_parts(vec![1u8, 2], &["flip", "swap"], vec![vec![1, 3]]);
    /// assert!(err.is_err());
    /// ```
    pub fn from_parts<L: AsRef<str>>(
        baseline: impl Into<Vec<u8>>,
        labels: &[L],
        buffers: Vec<Vec<u8>>,
    ) -> Result<Self> {
        if labels.len() != buffers.len() {
            return Err(DigestLabError::FixtureMismatch {
                labels: labels.len(),
                buffers: buffers.len(),
            });
        }
        let cases = labels
            .iter()
            .zip(buffers)
            .map(|(label, bytes)| Case::new(label.as_ref(), bytes))
            .collect();
        Self::new(baseline, cases)
    }

    /// Baseline buffer.
    #[must_use]
    pub fn baseline(&self) -> &[u8] {
        &self.baseline
    }

    /// Cases in order.
    #[must_use]
    pub fn cases(&self) -> &[Case] {
        &self.cases
    }

    /// Number of cases.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cases.len()
    }

    /// Always `false` for a constructed set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }

    /// Labels in order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.cases.iter().map(Case::label)
    }
}

/// Baseline for the corruption cases.
pub const DETECTION_BASELINE: [u8; 8] = [0x12, 0x34, 0x56, 0x78, 0x9A, 0xBC, 0xDE, 0xF0];

/// Baseline for the pattern cases.
pub const PATTERN_BASELINE: [u8; 8] = [0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07];

/// Corruption case labels, in the order of [`reference_corruptions`].
pub const CORRUPTION_LABELS: [&str; 7] = [
    "adjacent-swap",
    "last-bit-flip",
    "middle-flip",
    "first-byte-flip",
    "distant-swap",
    "lost-byte",
    "extra-byte",
];

/// Pattern case labels, in the order of [`reference_patterns`].
pub const PATTERN_LABELS: [&str; 6] = [
    "all-zero",
    "all-ones",
    "reversed",
    "rotated-left",
    "doubled",
    "alternating",
];

/// The seven reference corruptions of [`DETECTION_BASELINE`].
///
/// # Errors
///
/// Never fails for the built-in tables; the `Result` comes from validated
/// construction.
pub fn reference_corruptions() -> Result<CaseSet> {
    let buffers = vec![
        vec![0x12, 0x56, 0x34, 0x78, 0x9A, 0xBC, 0xDE, 0xF0],
        vec![0x12, 0x34, 0x56, 0x78, 0x9A, 0xBC, 0xDE, 0xF1],
        vec![0x12, 0x34, 0x56, 0x78, 0x9A, 0xBC, 0xDF, 0xF0],
        vec![0x13, 0x34, 0x56, 0x78, 0x9A, 0xBC, 0xDE, 0xF0],
        vec![0x78, 0x34, 0x56, 0x12, 0x9A, 0xBC, 0xDE, 0xF0],
        vec![0x12, 0x34, 0x56, 0x78, 0x9A, 0xBC, 0xDE],
        vec![0x12, 0x34, 0x56, 0x78, 0x9A, 0xBC, 0xDE, 0xF0, 0x00],
    ];
    CaseSet::from_parts(DETECTION_BASELINE, &CORRUPTION_LABELS, buffers)
}

/// The six reference patterns, all the length of [`PATTERN_BASELINE`].
///
/// # Errors
///
/// Never fails for the built-in tables.
pub fn reference_patterns() -> Result<CaseSet> {
    let base = PATTERN_BASELINE.to_vec();
    let mut rotated = base.clone();
    rotated.rotate_left(1);
    let buffers = vec![
        vec![0x00; base.len()],
        vec![0xFF; base.len()],
        base.iter().rev().copied().collect(),
        rotated,
        base.iter().take(base.len() / 2).flat_map(|&b| [b, b]).collect(),
        (0..base.len()).map(|i| if i % 2 == 0 { 0x00 } else { 0xFF }).collect(),
    ];
    CaseSet::from_parts(base, &PATTERN_LABELS, buffers)
}
