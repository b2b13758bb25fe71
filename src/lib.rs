//! # digestlab
//!
//! Comparative evaluation of non-cryptographic checksum and hash algorithms.
//!
//! Nine 8/16/32-bit digest algorithms are run through four evaluators:
//!
//! - **Error detection**: which corruptions of a reference buffer change the digest
//! - **Throughput**: time to digest one large deterministic buffer
//! - **Collisions**: duplicate digests over many short random buffers
//! - **Pattern sensitivity**: which structured inputs digest like the baseline
//!
//! ## Example
//!
//! ```rust
//! use digestlab::{Evaluator, HarnessBuilder, OutputFormat, Report};
//!
//! let harness = HarnessBuilder::new()
//!     .evaluators([Evaluator::Detection, Evaluator::Pattern])
//!     .algorithms(["simple-sum", "crc-32"])
//!     .build()?;
//! let results = harness.run();
//!
//! let detection = results.detection().unwrap();
//! assert_eq!(detection.detected("simple-sum", "adjacent-swap"), Some(false));
//! assert_eq!(detection.detected("crc-32", "adjacent-swap"), Some(true));
//!
//! let mut report = Report::new(Vec::new(), OutputFormat::Summary);
//! report.write(&results)?;
//! # Ok::<(), digestlab::DigestLabError>(())
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]

mod algorithm;
pub mod checksum;
pub mod collision;
mod compare;
pub mod crc;
pub mod detection;
mod error;
pub mod fixtures;
pub mod harness;
pub mod hash;
pub mod pattern;
mod registry;
pub mod report;
pub mod throughput;

pub use algorithm::{compute, Algorithm, Digest, DigestWidth};
pub use collision::{CollisionConfig, CollisionReport, CollisionStats, CollisionTally};
pub use compare::{ComparisonMatrix, ComparisonRow};
pub use crc::{crc32, CrcTable};
pub use detection::DetectionReport;
pub use error::{DigestLabError, Result};
pub use fixtures::{Case, CaseSet};
pub use harness::{
    Evaluator, Harness, HarnessBuilder, HarnessConfig, HarnessReport, Section, SectionReport,
};
pub use pattern::PatternReport;
pub use registry::{AlgorithmDescriptor, Registry, RegistryBuilder};
pub use report::{OutputFormat, Report, Table};
pub use throughput::{ThroughputConfig, ThroughputReport, ThroughputSample};
