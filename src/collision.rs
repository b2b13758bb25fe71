//! Collision evaluator.
//!
//! Draws `trials` independent random buffers of `buffer_len` bytes, digests
//! every buffer with every algorithm, and counts how many buffers land on a
//! digest value some earlier buffer already produced.
//!
//! Every algorithm sees the identical buffer set. Algorithms are tallied in
//! parallel, each into its own [`CollisionTally`]; results are reported in
//! registry order.
//!
//! Rates are only comparable between runs with the same `(trials, buffer_len)`.

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use rayon::prelude::*;
use rustc_hash::FxHashMap;
use serde::Serialize;
use tracing::debug;

use crate::algorithm::{Digest, DigestWidth};
use crate::error::{DigestLabError, Result};
use crate::registry::{AlgorithmDescriptor, Registry};

/// Default number of random buffers.
pub const DEFAULT_TRIALS: usize = 100_000;

/// Default random buffer length.
pub const DEFAULT_BUFFER_LEN: usize = 8;

/// Upper bound on `trials * buffer_len`, in bytes.
pub const MAX_TOTAL_BYTES: usize = 1 << 30;

/// Collision evaluator parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CollisionConfig {
    /// Number of random buffers.
    pub trials: usize,
    /// Bytes per buffer.
    pub buffer_len: usize,
    /// Generator seed; `None` seeds from OS entropy.
    pub seed: Option<u64>,
}

impl Default for CollisionConfig {
    fn default() -> Self {
        Self {
            trials: DEFAULT_TRIALS,
            buffer_len: DEFAULT_BUFFER_LEN,
            seed: None,
        }
    }
}

impl CollisionConfig {
    /// Config with a fixed seed, for reproducible runs.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Self::default()
        }
    }

    /// Check parameters.
    ///
    /// # Errors
    ///
    /// Returns [`DigestLabError::InvalidConfig`] if `trials` or `buffer_len`
    /// is zero, or the buffer set would exceed [`MAX_TOTAL_BYTES`].
    pub fn validate(&self) -> Result<()> {
        if self.trials == 0 {
            return Err(DigestLabError::invalid("collision trial count must be positive"));
        }
        if self.buffer_len == 0 {
            return Err(DigestLabError::invalid("collision buffer length must be positive"));
        }
        match self.trials.checked_mul(self.buffer_len) {
            Some(total) if total <= MAX_TOTAL_BYTES => Ok(()),
            _ => Err(DigestLabError::invalid(format!(
                "{} trials of {} bytes exceeds the {MAX_TOTAL_BYTES}-byte buffer limit",
                self.trials, self.buffer_len
            ))),
        }
    }
}

/// Occurrence counts for one algorithm.
#[derive(Debug, Clone, Default)]
pub struct CollisionTally {
    counts: FxHashMap<u32, u32>,
    observations: u64,
    excess: u64,
}

impl CollisionTally {
    /// Empty tally.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty tally sized for `capacity` distinct digests.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            counts: FxHashMap::with_capacity_and_hasher(capacity, rustc_hash::FxBuildHasher),
            ..Self::default()
        }
    }

    /// Record one digest. Returns `true` if the value was already seen.
    pub fn observe(&mut self, digest: Digest) -> bool {
        self.observations += 1;
        let count = self.counts.entry(digest.value()).or_insert(0);
        *count += 1;
        let collided = *count > 1;
        if collided {
            self.excess += 1;
        }
        collided
    }

    /// Observations beyond the first for each digest value.
    #[must_use]
    pub const fn excess(&self) -> u64 {
        self.excess
    }

    /// Number of distinct digest values observed.
    #[must_use]
    pub fn distinct(&self) -> usize {
        self.counts.len()
    }

    /// Total observations.
    #[must_use]
    pub const fn observations(&self) -> u64 {
        self.observations
    }

    /// Occurrences of a digest value.
    #[must_use]
    pub fn count(&self, value: u32) -> u32 {
        self.counts.get(&value).copied().unwrap_or(0)
    }

    /// Recompute the excess from the per-value counts.
    #[must_use]
    pub fn excess_from_counts(&self) -> u64 {
        self.counts
            .values()
            .map(|&c| u64::from(c.saturating_sub(1)))
            .sum()
    }
}

/// Collision statistics for one algorithm.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CollisionStats {
    /// Registered algorithm name
    pub algorithm: String,
    /// Digest width
    pub width: DigestWidth,
    /// Buffers that repeated an earlier buffer's digest
    pub excess_collisions: u64,
    /// Distinct digest values observed
    pub distinct_digests: usize,
    /// `excess_collisions / trials` as a percentage
    pub collision_rate: f64,
    /// Expected excess for an ideal uniform digest of this width
    pub expected_collisions: f64,
}

/// Collision results.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CollisionReport {
    /// Parameters of the run
    pub config: CollisionConfig,
    /// Seed actually used; drawn from OS entropy when `config.seed` is `None`
    pub seed: u64,
    /// One entry per algorithm, in registry order
    pub stats: Vec<CollisionStats>,
}

impl CollisionReport {
    /// Stats for an algorithm.
    #[must_use]
    pub fn stats(&self, algorithm: &str) -> Option<&CollisionStats> {
        self.stats.iter().find(|s| s.algorithm == algorithm)
    }
}

/// Expected number of excess observations when `trials` values are drawn
/// uniformly from `space` buckets: `n - s * (1 - (1 - 1/s)^n)`.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn expected_collisions(trials: usize, space: u64) -> f64 {
    let n = trials as f64;
    let s = space as f64;
    // ln_1p / exp_m1 keep the occupied fraction accurate for s = 2^32
    let occupied_fraction = -(n * (-1.0 / s).ln_1p()).exp_m1();
    n - s * occupied_fraction
}

/// The configured seed, or a fresh one from OS entropy.
///
/// # Errors
///
/// Returns [`DigestLabError::Entropy`] if the OS entropy source is
/// unavailable.
pub fn resolve_seed(config: &CollisionConfig) -> Result<u64> {
    match config.seed {
        Some(seed) => Ok(seed),
        None => StdRng::try_from_os_rng()
            .map(|mut rng| rng.next_u64())
            .map_err(|e| DigestLabError::Entropy(e.to_string())),
    }
}

/// Generate `trials * buffer_len` random bytes from `seed`.
///
/// # Errors
///
/// Returns [`DigestLabError::InvalidConfig`] for bad parameters or if the
/// buffer set cannot be allocated.
pub fn generate_buffers(config: &CollisionConfig, seed: u64) -> Result<Vec<u8>> {
    config.validate()?;
    let total = config.trials * config.buffer_len;
    let mut data = Vec::new();
    data.try_reserve_exact(total).map_err(|e| {
        DigestLabError::invalid(format!("cannot allocate {total} bytes of trial buffers: {e}"))
    })?;
    data.resize(total, 0);
    let mut rng = StdRng::seed_from_u64(seed);
    rng.fill_bytes(&mut data);
    Ok(data)
}

/// Run the collision evaluator.
///
/// # Errors
///
/// Returns [`DigestLabError::InvalidConfig`] for bad parameters or
/// [`DigestLabError::Entropy`] if OS seeding fails.
///
/// # Example
///
/// ```rust
/// use digestlab::{collision, CollisionConfig, Registry};
///
/// let registry = Registry::standard().select(&["pearson", "crc-32"])?;
/// let config = CollisionConfig { trials: 5_000, buffer_len: 8, seed: Some(7) };
/// let report = collision::evaluate(&registry, &config)?;
/// let pearson = report.stats("pearson").unwrap();
/// let crc = report.stats("crc-32").unwrap();
/// assert!(pearson.collision_rate > crc.collision_rate);
/// # Ok::<(), digestlab::DigestLabError>(())
/// ```
pub fn evaluate(registry: &Registry, config: &CollisionConfig) -> Result<CollisionReport> {
    config.validate()?;
    let seed = resolve_seed(config)?;
    let data = generate_buffers(config, seed)?;
    debug!(
        algorithms = registry.len(),
        trials = config.trials,
        buffer_len = config.buffer_len,
        seed,
        "running collision evaluator"
    );

    let stats = registry
        .all()
        .par_iter()
        .map(|descriptor| tally(descriptor, &data, config))
        .collect();

    Ok(CollisionReport {
        config: *config,
        seed,
        stats,
    })
}

#[allow(clippy::cast_precision_loss)]
fn tally(
    descriptor: &AlgorithmDescriptor,
    data: &[u8],
    config: &CollisionConfig,
) -> CollisionStats {
    let width = descriptor.width();
    let capacity = usize::try_from(width.space())
        .unwrap_or(usize::MAX)
        .min(config.trials);
    let mut tally = CollisionTally::with_capacity(capacity);

    for buffer in data.chunks_exact(config.buffer_len) {
        tally.observe(descriptor.compute(buffer));
    }

    debug!(
        algorithm = descriptor.name(),
        excess = tally.excess(),
        distinct = tally.distinct(),
        "tallied"
    );

    CollisionStats {
        algorithm: descriptor.name().to_string(),
        width,
        excess_collisions: tally.excess(),
        distinct_digests: tally.distinct(),
        collision_rate: tally.excess() as f64 / config.trials as f64 * 100.0,
        expected_collisions: expected_collisions(config.trials, width.space()),
    }
}
