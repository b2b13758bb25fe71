//! Error types for digestlab operations.

use thiserror::Error;

/// Errors that can occur while building or running the evaluation harness.
///
/// Digest functions themselves are total and never produce one of these.
#[derive(Error, Debug)]
pub enum DigestLabError {
    /// A harness parameter or fixture violates its precondition.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A fixture was assembled from label and buffer lists of different lengths.
    #[error("Fixture mismatch: {labels} labels but {buffers} buffers")]
    FixtureMismatch {
        /// Number of labels supplied
        labels: usize,
        /// Number of buffers supplied
        buffers: usize,
    },

    /// Algorithm name not known to the registry.
    #[error("Unknown algorithm: {0}")]
    UnknownAlgorithm(String),

    /// Evaluator name not recognised.
    #[error("Unknown evaluator: {0} (expected detection, throughput, collision or pattern)")]
    UnknownEvaluator(String),

    /// Output format name not recognised.
    #[error("Unknown output format: {0} (expected summary, tsv or json)")]
    UnknownFormat(String),

    /// The OS entropy source could not seed the random generator.
    #[error("Entropy source unavailable: {0}")]
    Entropy(String),

    /// The monotonic clock produced an unusable reading.
    #[error("Clock error: {0}")]
    Clock(String),

    /// I/O error while writing a report.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl DigestLabError {
    /// Shorthand for [`DigestLabError::InvalidConfig`].
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }
}

/// Result type for digestlab operations.
pub type Result<T> = std::result::Result<T, DigestLabError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_invalid_config() {
        let err = DigestLabError::invalid("trials must be positive");
        assert!(err.to_string().contains("Invalid configuration"));
        assert!(err.to_string().contains("trials must be positive"));
    }

    #[test]
    fn error_display_fixture_mismatch() {
        let err = DigestLabError::FixtureMismatch {
            labels: 7,
            buffers: 6,
        };
        let msg = err.to_string();
        assert!(msg.contains("7 labels"));
        assert!(msg.contains("6 buffers"));
    }

    #[test]
    fn error_display_unknown_algorithm() {
        let err = DigestLabError::UnknownAlgorithm("md5".to_string());
        assert!(err.to_string().contains("md5"));
    }

    #[test]
    fn error_display_unknown_evaluator() {
        let err = DigestLabError::UnknownEvaluator("fuzz".to_string());
        assert!(err.to_string().contains("Unknown evaluator: fuzz"));
    }

    #[test]
    fn error_display_unknown_format() {
        let err = DigestLabError::UnknownFormat("xml".to_string());
        assert!(err.to_string().contains("xml"));
    }

    #[test]
    fn error_display_entropy() {
        let err = DigestLabError::Entropy("getrandom failed".to_string());
        assert!(err.to_string().contains("Entropy source unavailable"));
    }

    #[test]
    fn error_display_clock() {
        let err = DigestLabError::Clock("went backwards".to_string());
        assert!(err.to_string().contains("Clock error"));
    }

    #[test]
    fn error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed");
        let err: DigestLabError = io_err.into();
        assert!(err.to_string().contains("I/O error"));
    }

    #[test]
    fn result_type_err() {
        let result: Result<i32> = Err(DigestLabError::invalid("x"));
        assert!(result.is_err());
    }
}
