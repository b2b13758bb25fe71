//! Evaluation harness.
//!
//! Ties the registry, fixtures and the four evaluators together. All
//! parameters are checked when the harness is built; at run time each
//! evaluator is an independent pass whose failure is recorded without
//! affecting the others.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use tracing::{debug, warn};

use crate::collision::{self, CollisionConfig, CollisionReport};
use crate::detection::{self, DetectionReport};
use crate::error::{DigestLabError, Result};
use crate::fixtures::{self, CaseSet};
use crate::pattern::{self, PatternReport};
use crate::registry::Registry;
use crate::throughput::{self, ThroughputConfig, ThroughputReport};

/// One of the four evaluation passes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Evaluator {
    /// Corruption detection against a baseline
    Detection,
    /// Timing over a large buffer
    Throughput,
    /// Empirical collisions over random buffers
    Collision,
    /// Structural pattern blindness
    Pattern,
}

impl Evaluator {
    /// All evaluators in default run order.
    pub const ALL: [Self; 4] = [Self::Detection, Self::Throughput, Self::Collision, Self::Pattern];

    /// Lowercase name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Detection => "detection",
            Self::Throughput => "throughput",
            Self::Collision => "collision",
            Self::Pattern => "pattern",
        }
    }
}

impl fmt::Display for Evaluator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Evaluator {
    type Err = DigestLabError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "detection" | "errors" | "corruption" => Ok(Self::Detection),
            "throughput" | "perf" | "performance" => Ok(Self::Throughput),
            "collision" | "collisions" => Ok(Self::Collision),
            "pattern" | "patterns" => Ok(Self::Pattern),
            _ => Err(DigestLabError::UnknownEvaluator(s.to_string())),
        }
    }
}

/// Harness configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HarnessConfig {
    /// Evaluators to run, in order.
    pub evaluators: Vec<Evaluator>,
    /// Registered algorithm names to include; `None` for all.
    pub algorithms: Option<Vec<String>>,
    /// Collision evaluator parameters.
    pub collision: CollisionConfig,
    /// Throughput evaluator parameters.
    pub throughput: ThroughputConfig,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            evaluators: Evaluator::ALL.to_vec(),
            algorithms: None,
            collision: CollisionConfig::default(),
            throughput: ThroughputConfig::default(),
        }
    }
}

/// Builder for a [`Harness`].
///
/// # Example
///
/// ```rust
/// use digestlab::{Evaluator, HarnessBuilder};
///
/// let harness = HarnessBuilder::new()
///     .evaluators([Evaluator::Detection, Evaluator::Collision])
///     .collision_trials(1_000)
///     .seed(42)
///     .build()?;
/// let report = harness.run();
/// assert!(report.is_success());
/// assert!(report.detection().is_some());
/// assert!(report.throughput().is_none());
/// # Ok::<(), digestlab::DigestLabError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct HarnessBuilder {
    config: HarnessConfig,
    corruptions: Option<CaseSet>,
    patterns: Option<CaseSet>,
}

impl HarnessBuilder {
    /// Builder with the reference configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing configuration.
    #[must_use]
    pub fn from_config(config: HarnessConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Evaluators to run, in order.
    #[must_use]
    pub fn evaluators(mut self, evaluators: impl IntoIterator<Item = Evaluator>) -> Self {
        self.config.evaluators = evaluators.into_iter().collect();
        self
    }

    /// Restrict the run to the named algorithms.
    #[must_use]
    pub fn algorithms<S: Into<String>>(mut self, names: impl IntoIterator<Item = S>) -> Self {
        self.config.algorithms = Some(names.into_iter().map(Into::into).collect());
        self
    }

    /// Number of random buffers for the collision evaluator.
    #[must_use]
    pub fn collision_trials(mut self, trials: usize) -> Self {
        self.config.collision.trials = trials;
        self
    }

    /// Length of each random buffer for the collision evaluator.
    #[must_use]
    pub fn collision_buffer_len(mut self, len: usize) -> Self {
        self.config.collision.buffer_len = len;
        self
    }

    /// Fix the collision evaluator's random seed.
    #[must_use]
    pub fn seed(mut self, seed: u64) -> Self {
        self.config.collision.seed = Some(seed);
        self
    }

    /// Size of the throughput buffer.
    #[must_use]
    pub fn throughput_buffer_len(mut self, len: usize) -> Self {
        self.config.throughput.buffer_len = len;
        self
    }

    /// Timed computations per algorithm.
    #[must_use]
    pub fn throughput_trials(mut self, trials: u32) -> Self {
        self.config.throughput.trials = trials;
        self
    }

    /// Replace the reference corruption fixtures.
    #[must_use]
    pub fn corruptions(mut self, cases: CaseSet) -> Self {
        self.corruptions = Some(cases);
        self
    }

    /// Replace the reference pattern fixtures.
    #[must_use]
    pub fn patterns(mut self, cases: CaseSet) -> Self {
        self.patterns = Some(cases);
        self
    }

    /// Validate the configuration and build the harness.
    ///
    /// # Errors
    ///
    /// Returns [`DigestLabError::InvalidConfig`] or a fixture error for any
    /// malformed parameter, and [`DigestLabError::UnknownAlgorithm`] for an
    /// unregistered algorithm name.
    pub fn build(self) -> Result<Harness> {
        let config = self.config;
        if config.evaluators.is_empty() {
            return Err(DigestLabError::invalid("no evaluators selected"));
        }
        for (i, evaluator) in config.evaluators.iter().enumerate() {
            if config.evaluators[..i].contains(evaluator) {
                return Err(DigestLabError::invalid(format!(
                    "evaluator {evaluator} selected twice"
                )));
            }
        }
        config.collision.validate()?;
        config.throughput.validate()?;

        let registry = match &config.algorithms {
            Some(names) => Registry::standard().select(names.as_slice())?,
            None => Registry::standard(),
        };

        let corruptions = match self.corruptions {
            Some(cases) => cases,
            None => fixtures::reference_corruptions()?,
        };
        let patterns = match self.patterns {
            Some(cases) => cases,
            None => fixtures::reference_patterns()?,
        };
        pattern::validate(&patterns)?;

        Ok(Harness {
            config,
            registry,
            corruptions,
            patterns,
        })
    }
}

/// Output of one evaluator.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SectionReport {
    /// Error-detection matrix
    Detection(DetectionReport),
    /// Timing samples
    Throughput(ThroughputReport),
    /// Collision statistics
    Collision(CollisionReport),
    /// Pattern matrix
    Pattern(PatternReport),
}

/// One evaluator's outcome.
#[derive(Debug)]
pub struct Section {
    /// Which evaluator ran
    pub evaluator: Evaluator,
    /// Its report, or the error that aborted it
    pub outcome: Result<SectionReport>,
}

/// Results of a harness run.
#[derive(Debug)]
pub struct HarnessReport {
    /// Algorithms that took part, in registry order
    pub algorithms: Vec<String>,
    /// One section per evaluator, in run order
    pub sections: Vec<Section>,
}

impl HarnessReport {
    fn find(&self, evaluator: Evaluator) -> Option<&SectionReport> {
        self.sections
            .iter()
            .find(|s| s.evaluator == evaluator)
            .and_then(|s| s.outcome.as_ref().ok())
    }

    /// Detection report, if that evaluator ran and succeeded.
    #[must_use]
    pub fn detection(&self) -> Option<&DetectionReport> {
        match self.find(Evaluator::Detection)? {
            SectionReport::Detection(r) => Some(r),
            _ => None,
        }
    }

    /// Throughput report, if that evaluator ran and succeeded.
    #[must_use]
    pub fn throughput(&self) -> Option<&ThroughputReport> {
        match self.find(Evaluator::Throughput)? {
            SectionReport::Throughput(r) => Some(r),
            _ => None,
        }
    }

    /// Collision report, if that evaluator ran and succeeded.
    #[must_use]
    pub fn collision(&self) -> Option<&CollisionReport> {
        match self.find(Evaluator::Collision)? {
            SectionReport::Collision(r) => Some(r),
            _ => None,
        }
    }

    /// Pattern report, if that evaluator ran and succeeded.
    #[must_use]
    pub fn pattern(&self) -> Option<&PatternReport> {
        match self.find(Evaluator::Pattern)? {
            SectionReport::Pattern(r) => Some(r),
            _ => None,
        }
    }

    /// Evaluators that failed and why.
    pub fn failures(&self) -> impl Iterator<Item = (Evaluator, &DigestLabError)> {
        self.sections
            .iter()
            .filter_map(|s| s.outcome.as_ref().err().map(|e| (s.evaluator, e)))
    }

    /// `true` if every evaluator succeeded.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.failures().next().is_none()
    }
}

/// A validated, ready-to-run harness.
#[derive(Debug, Clone)]
pub struct Harness {
    config: HarnessConfig,
    registry: Registry,
    corruptions: CaseSet,
    patterns: CaseSet,
}

impl Harness {
    /// Harness with the reference configuration.
    ///
    /// # Errors
    ///
    /// See [`HarnessBuilder::build`].
    pub fn reference() -> Result<Self> {
        HarnessBuilder::new().build()
    }

    /// Configuration in effect.
    #[must_use]
    pub const fn config(&self) -> &HarnessConfig {
        &self.config
    }

    /// Algorithms under evaluation.
    #[must_use]
    pub const fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Run one evaluator.
    ///
    /// # Errors
    ///
    /// Returns whatever error aborted the evaluator.
    pub fn run_one(&self, evaluator: Evaluator) -> Result<SectionReport> {
        match evaluator {
            Evaluator::Detection => Ok(SectionReport::Detection(detection::evaluate(
                &self.registry,
                &self.corruptions,
            ))),
            Evaluator::Throughput => {
                throughput::evaluate(&self.registry, &self.config.throughput)
                    .map(SectionReport::Throughput)
            }
            Evaluator::Collision => {
                collision::evaluate(&self.registry, &self.config.collision)
                    .map(SectionReport::Collision)
            }
            Evaluator::Pattern => {
                pattern::evaluate(&self.registry, &self.patterns).map(SectionReport::Pattern)
            }
        }
    }

    /// Run every configured evaluator in order.
    #[must_use]
    pub fn run(&self) -> HarnessReport {
        let sections = self
            .config
            .evaluators
            .iter()
            .map(|&evaluator| {
                debug!(%evaluator, "starting evaluator");
                let outcome = self.run_one(evaluator);
                if let Err(e) = &outcome {
                    warn!(%evaluator, error = %e, "evaluator failed");
                }
                debug!(%evaluator, success = outcome.is_ok(), "finished evaluator");
                Section { evaluator, outcome }
            })
            .collect();

        HarnessReport {
            algorithms: self
                .registry
                .all()
                .iter()
                .map(|d| d.name().to_string())
                .collect(),
            sections,
        }
    }
}
