//! Named, ordered collection of digest algorithms.
//!
//! Evaluators iterate a [`Registry`] so report rows and columns come out in
//! the same order on every run. A registry is append-only while it is being
//! built and immutable afterwards.

use std::sync::Arc;

use serde::Serialize;

use crate::algorithm::{compute, Algorithm, Digest, DigestWidth};
use crate::crc::CrcTable;
use crate::error::{DigestLabError, Result};

/// A registered algorithm: display name, width and compute function.
#[derive(Debug, Clone, Serialize)]
pub struct AlgorithmDescriptor {
    name: String,
    algorithm: Algorithm,
    #[serde(skip)]
    crc: Arc<CrcTable>,
}

impl AlgorithmDescriptor {
    /// Name the algorithm was registered under.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Underlying algorithm variant.
    #[must_use]
    pub const fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Digest width.
    #[must_use]
    pub const fn width(&self) -> DigestWidth {
        self.algorithm.width()
    }

    /// Name comparison used for lookups: ASCII case-insensitive, ignoring
    /// surrounding whitespace.
    fn matches(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name.trim())
    }

    /// Compute this algorithm's digest of `data`.
    #[inline]
    #[must_use]
    pub fn compute(&self, data: &[u8]) -> Digest {
        compute(self.algorithm, &self.crc, data)
    }
}

/// Builder for a [`Registry`].
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use digestlab::{Algorithm, CrcTable, RegistryBuilder};
///
/// let registry = RegistryBuilder::new(Arc::new(CrcTable::ieee()))
///     .register("crc", Algorithm::Crc32)?
///     .register("adler", Algorithm::Adler32)?
///     .build();
/// assert_eq!(registry.len(), 2);
/// assert_eq!(registry.all()[0].name(), "crc");
/// # Ok::<(), digestlab::DigestLabError>(())
/// ```
#[derive(Debug, Clone)]
pub struct RegistryBuilder {
    crc: Arc<CrcTable>,
    entries: Vec<AlgorithmDescriptor>,
}

impl RegistryBuilder {
    /// Start an empty registry sharing `crc` with every entry.
    #[must_use]
    pub fn new(crc: Arc<CrcTable>) -> Self {
        Self {
            crc,
            entries: Vec::new(),
        }
    }

    /// Append an algorithm under `name`.
    ///
    /// # Errors
    ///
    /// Returns [`DigestLabError::InvalidConfig`] if `name` is empty or already
    /// registered under any letter case.
    pub fn register(mut self, name: impl Into<String>, algorithm: Algorithm) -> Result<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DigestLabError::invalid("algorithm name must not be empty"));
        }
        if self.entries.iter().any(|e| e.matches(&name)) {
            return Err(DigestLabError::invalid(format!(
                "algorithm {name:?} registered twice"
            )));
        }
        self.entries.push(AlgorithmDescriptor {
            name,
            algorithm,
            crc: Arc::clone(&self.crc),
        });
        Ok(self)
    }

    /// Freeze the registry.
    #[must_use]
    pub fn build(self) -> Registry {
        Registry {
            crc: self.crc,
            entries: self.entries,
        }
    }
}

/// Immutable, ordered set of algorithms.
#[derive(Debug, Clone)]
pub struct Registry {
    crc: Arc<CrcTable>,
    entries: Vec<AlgorithmDescriptor>,
}

impl Registry {
    /// All nine algorithms under their standard names, in reference order.
    #[must_use]
    pub fn standard() -> Self {
        let crc = Arc::new(CrcTable::ieee());
        let entries = Algorithm::ALL
            .into_iter()
            .map(|algorithm| AlgorithmDescriptor {
                name: algorithm.name().to_string(),
                algorithm,
                crc: Arc::clone(&crc),
            })
            .collect();
        Self { crc, entries }
    }

    /// Descriptors in registration order.
    #[must_use]
    pub fn all(&self) -> &[AlgorithmDescriptor] {
        &self.entries
    }

    /// Number of registered algorithms.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up a descriptor by registered name, ignoring ASCII case.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&AlgorithmDescriptor> {
        self.entries.iter().find(|e| e.matches(name))
    }

    /// Shared CRC table.
    #[must_use]
    pub fn crc_table(&self) -> &Arc<CrcTable> {
        &self.crc
    }

    /// Subset of this registry containing `names`, kept in registry order.
    ///
    /// # Errors
    ///
    /// Returns [`DigestLabError::UnknownAlgorithm`] for a name that is not
    /// registered, or [`DigestLabError::InvalidConfig`] if `names` is empty.
    pub fn select<S: AsRef<str>>(&self, names: &[S]) -> Result<Self> {
        if names.is_empty() {
            return Err(DigestLabError::invalid("algorithm selection is empty"));
        }
        if let Some(unknown) = names
            .iter()
            .map(AsRef::<str>::as_ref)
            .find(|n| self.get(n).is_none())
        {
            return Err(DigestLabError::UnknownAlgorithm(unknown.to_string()));
        }
        let entries = self
            .entries
            .iter()
            .filter(|e| names.iter().any(|n| e.matches(n.as_ref())))
            .cloned()
            .collect();
        Ok(Self {
            crc: Arc::clone(&self.crc),
            entries,
        })
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::standard()
    }
}
