//! Throughput evaluator.
//!
//! Times each algorithm over one large deterministic buffer. Elapsed time is
//! taken from the monotonic clock around each computation and averaged over
//! the configured number of trials.

use std::hint::black_box;
use std::time::{Duration, Instant};

use serde::Serialize;
use tracing::debug;

use crate::algorithm::Digest;
use crate::error::{DigestLabError, Result};
use crate::registry::{AlgorithmDescriptor, Registry};

/// Default buffer size in bytes.
pub const DEFAULT_BUFFER_LEN: usize = 1_000_000;

/// Largest accepted buffer size in bytes.
pub const MAX_BUFFER_LEN: usize = 1 << 30;

/// Throughput evaluator parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ThroughputConfig {
    /// Size of the digested buffer.
    pub buffer_len: usize,
    /// Timed computations per algorithm; the reported time is their mean.
    pub trials: u32,
}

impl Default for ThroughputConfig {
    fn default() -> Self {
        Self {
            buffer_len: DEFAULT_BUFFER_LEN,
            trials: 1,
        }
    }
}

impl ThroughputConfig {
    /// Check parameters.
    ///
    /// # Errors
    ///
    /// Returns [`DigestLabError::InvalidConfig`] if either field is zero or
    /// `buffer_len` exceeds [`MAX_BUFFER_LEN`].
    pub fn validate(&self) -> Result<()> {
        if self.buffer_len == 0 {
            return Err(DigestLabError::invalid("throughput buffer length must be positive"));
        }
        if self.buffer_len > MAX_BUFFER_LEN {
            return Err(DigestLabError::invalid(format!(
                "throughput buffer of {} bytes exceeds the {MAX_BUFFER_LEN}-byte limit",
                self.buffer_len
            )));
        }
        if self.trials == 0 {
            return Err(DigestLabError::invalid("throughput trial count must be positive"));
        }
        Ok(())
    }
}

/// Deterministic buffer whose byte `i` is `i mod 256`.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn reference_buffer(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i % 256) as u8).collect()
}

/// Timing for one algorithm.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ThroughputSample {
    /// Registered algorithm name
    pub algorithm: String,
    /// Mean elapsed time per computation, in microseconds
    pub elapsed_micros: u64,
    /// Number of timed computations averaged
    pub trials: u32,
    /// Resulting digest
    pub digest: Digest,
    /// Derived throughput in MiB/s; `None` when elapsed time rounds to zero
    pub mib_per_sec: Option<f64>,
}

/// Throughput results, in registry order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ThroughputReport {
    /// Buffer size in bytes
    pub buffer_len: usize,
    /// Trials per algorithm
    pub trials: u32,
    /// One sample per algorithm
    pub samples: Vec<ThroughputSample>,
}

impl ThroughputReport {
    /// Sample for an algorithm.
    #[must_use]
    pub fn sample(&self, algorithm: &str) -> Option<&ThroughputSample> {
        self.samples.iter().find(|s| s.algorithm == algorithm)
    }
}

/// Time every registered algorithm over [`reference_buffer`].
///
/// # Errors
///
/// Returns [`DigestLabError::InvalidConfig`] for bad parameters, or
/// [`DigestLabError::Clock`] if the clock cannot produce an elapsed time.
pub fn evaluate(registry: &Registry, config: &ThroughputConfig) -> Result<ThroughputReport> {
    config.validate()?;
    let data = reference_buffer(config.buffer_len);
    debug!(
        algorithms = registry.len(),
        buffer_len = config.buffer_len,
        trials = config.trials,
        "running throughput evaluator"
    );

    let samples = registry
        .all()
        .iter()
        .map(|descriptor| measure(descriptor, &data, config.trials))
        .collect::<Result<Vec<_>>>()?;

    Ok(ThroughputReport {
        buffer_len: config.buffer_len,
        trials: config.trials,
        samples,
    })
}

#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
fn measure(
    descriptor: &AlgorithmDescriptor,
    data: &[u8],
    trials: u32,
) -> Result<ThroughputSample> {
    let mut total = Duration::ZERO;
    let mut digest = descriptor.compute(&[]);

    for _ in 0..trials {
        let start = Instant::now();
        digest = black_box(descriptor.compute(black_box(data)));
        let end = Instant::now();
        let elapsed = end.checked_duration_since(start).ok_or_else(|| {
            DigestLabError::Clock(format!("clock went backwards timing {}", descriptor.name()))
        })?;
        total = total.checked_add(elapsed).ok_or_else(|| {
            DigestLabError::Clock(format!("elapsed time overflow timing {}", descriptor.name()))
        })?;
    }

    let mean = total / trials;
    let elapsed_micros = u64::try_from(mean.as_micros()).unwrap_or(u64::MAX);
    let secs = mean.as_secs_f64();
    let mib_per_sec = (secs > 0.0).then(|| data.len() as f64 / (1024.0 * 1024.0) / secs);

    debug!(
        algorithm = descriptor.name(),
        elapsed_micros,
        digest = %digest,
        "measured"
    );

    Ok(ThroughputSample {
        algorithm: descriptor.name().to_string(),
        elapsed_micros,
        trials,
        digest,
        mib_per_sec,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small() -> ThroughputConfig {
        ThroughputConfig {
            buffer_len: 4096,
            trials: 3,
        }
    }

    #[test]
    fn reference_buffer_pattern() {
        let data = reference_buffer(600);
        assert_eq!(data.len(), 600);
        assert_eq!(data[0], 0);
        assert_eq!(data[255], 255);
        assert_eq!(data[256], 0);
        assert_eq!(data[599], (599 % 256) as u8);
    }

    #[test]
    fn default_config_matches_reference() {
        let config = ThroughputConfig::default();
        assert_eq!(config.buffer_len, 1_000_000);
        assert_eq!(config.trials, 1);
    }

    #[test]
    fn one_sample_per_algorithm_in_order() {
        let registry = Registry::standard();
        let report = evaluate(&registry, &small()).unwrap();
        assert_eq!(report.samples.len(), registry.len());
        for (sample, descriptor) in report.samples.iter().zip(registry.all()) {
            assert_eq!(sample.algorithm, descriptor.name());
            assert_eq!(sample.trials, 3);
        }
    }

    #[test]
    fn reported_digest_matches_direct_computation() {
        let registry = Registry::standard();
        let report = evaluate(&registry, &small()).unwrap();
        let data = reference_buffer(4096);
        for descriptor in registry.all() {
            let sample = report.sample(descriptor.name()).unwrap();
            assert_eq!(sample.digest, descriptor.compute(&data));
        }
    }

    #[test]
    fn million_byte_reference_digests() {
        let registry = Registry::standard().select(&["crc-32", "adler-32", "xor"]).unwrap();
        let report = evaluate(&registry, &ThroughputConfig::default()).unwrap();
        assert_eq!(report.sample("crc-32").unwrap().digest.value(), 0x6182_291B);
        assert_eq!(report.sample("adler-32").unwrap().digest.value(), 0x0E27_D8D8);
        assert_eq!(report.sample("xor").unwrap().digest.value(), 0);
    }

    #[test]
    fn zero_trials_rejected() {
        let config = ThroughputConfig {
            buffer_len: 16,
            trials: 0,
        };
        assert!(matches!(
            evaluate(&Registry::standard(), &config),
            Err(DigestLabError::InvalidConfig(_))
        ));
    }

    #[test]
    fn zero_length_rejected() {
        let config = ThroughputConfig {
            buffer_len: 0,
            trials: 1,
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn oversized_buffer_rejected() {
        let config = ThroughputConfig {
            buffer_len: MAX_BUFFER_LEN + 1,
            trials: 1,
        };
        assert!(matches!(config.validate(), Err(DigestLabError::InvalidConfig(_))));
    }

    #[test]
    fn throughput_positive_when_measurable() {
        let report = evaluate(&Registry::standard(), &small()).unwrap();
        for sample in &report.samples {
            if let Some(rate) = sample.mib_per_sec {
                assert!(rate > 0.0);
            }
        }
    }
}
