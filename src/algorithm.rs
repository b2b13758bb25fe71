//! The closed set of digest algorithms and their dispatch.

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};

use crate::checksum::{adler32, fletcher16, simple_sum, weighted_sum, xor_checksum};
use crate::crc::CrcTable;
use crate::error::DigestLabError;
use crate::hash::{pearson_hash, prime_hash, rolling_hash};

/// Bit width of a digest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DigestWidth {
    /// 8-bit digest
    Bits8,
    /// 16-bit digest
    Bits16,
    /// 32-bit digest
    Bits32,
}

impl DigestWidth {
    /// Number of bits.
    #[must_use]
    pub const fn bits(self) -> u32 {
        match self {
            Self::Bits8 => 8,
            Self::Bits16 => 16,
            Self::Bits32 => 32,
        }
    }

    /// Number of distinct digest values, `2^bits`.
    #[must_use]
    pub const fn space(self) -> u64 {
        1u64 << self.bits()
    }

    /// Hex digits needed to print a full digest.
    #[must_use]
    pub const fn hex_digits(self) -> usize {
        (self.bits() / 4) as usize
    }
}

impl Serialize for DigestWidth {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_u32(self.bits())
    }
}

/// A fixed-width digest value.
///
/// The value is always below `width.space()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Digest {
    value: u32,
    width: DigestWidth,
}

impl Digest {
    /// 8-bit digest.
    #[must_use]
    pub const fn from_u8(value: u8) -> Self {
        Self {
            value: value as u32,
            width: DigestWidth::Bits8,
        }
    }

    /// 16-bit digest.
    #[must_use]
    pub const fn from_u16(value: u16) -> Self {
        Self {
            value: value as u32,
            width: DigestWidth::Bits16,
        }
    }

    /// 32-bit digest.
    #[must_use]
    pub const fn from_u32(value: u32) -> Self {
        Self {
            value,
            width: DigestWidth::Bits32,
        }
    }

    /// Digest value widened to 32 bits.
    #[must_use]
    pub const fn value(self) -> u32 {
        self.value
    }

    /// Digest width.
    #[must_use]
    pub const fn width(self) -> DigestWidth {
        self.width
    }
}

impl fmt::Display for Digest {
    /// Zero-padded lowercase hex, e.g. `0xcbf43926` or `0x0f`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:0width$x}", self.value, width = self.width.hex_digits())
    }
}

/// One of the nine supported digest algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Algorithm {
    /// Byte sum, wrapping at 2^32
    SimpleSum,
    /// Rabin-Karp polynomial hash mod 10^9 + 7
    RollingHash,
    /// Pearson 8-bit table hash
    Pearson,
    /// Fletcher-16
    Fletcher16,
    /// CRC-32 (IEEE 802.3)
    Crc32,
    /// Position-weighted byte sum
    WeightedSum,
    /// XOR of all bytes
    Xor,
    /// Adler-32
    Adler32,
    /// `hash * 31 + byte` polynomial hash
    PrimeHash,
}

impl Algorithm {
    /// Every algorithm, in reference registration order.
    pub const ALL: [Self; 9] = [
        Self::SimpleSum,
        Self::RollingHash,
        Self::Pearson,
        Self::Fletcher16,
        Self::Crc32,
        Self::WeightedSum,
        Self::Xor,
        Self::Adler32,
        Self::PrimeHash,
    ];

    /// Stable identifier used on the command line and in reports.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::SimpleSum => "simple-sum",
            Self::RollingHash => "rolling-hash",
            Self::Pearson => "pearson",
            Self::Fletcher16 => "fletcher-16",
            Self::Crc32 => "crc-32",
            Self::WeightedSum => "weighted-sum",
            Self::Xor => "xor",
            Self::Adler32 => "adler-32",
            Self::PrimeHash => "prime-hash",
        }
    }

    /// Width of the digest this algorithm produces.
    #[must_use]
    pub const fn width(self) -> DigestWidth {
        match self {
            Self::Pearson | Self::Xor => DigestWidth::Bits8,
            Self::Fletcher16 => DigestWidth::Bits16,
            Self::SimpleSum
            | Self::RollingHash
            | Self::Crc32
            | Self::WeightedSum
            | Self::Adler32
            | Self::PrimeHash => DigestWidth::Bits32,
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for Algorithm {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = DigestLabError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|alg| alg.name() == wanted)
            .ok_or_else(|| DigestLabError::UnknownAlgorithm(s.to_string()))
    }
}

/// Compute `algorithm`'s digest of `data`.
///
/// `crc` is only read by [`Algorithm::Crc32`].
///
/// # Example
///
/// ```rust
/// use digestlab::{compute, Algorithm, CrcTable};
///
/// let table = CrcTable::ieee();
/// let digest = compute(Algorithm::Crc32, &table, b"123456789");
/// assert_eq!(digest.value(), 0xCBF4_3926);
/// assert_eq!(digest.to_string(), "0xcbf43926");
/// ```
#[must_use]
pub fn compute(algorithm: Algorithm, crc: &CrcTable, data: &[u8]) -> Digest {
    match algorithm {
        Algorithm::SimpleSum => Digest::from_u32(simple_sum(data)),
        Algorithm::RollingHash => Digest::from_u32(rolling_hash(data)),
        Algorithm::Pearson => Digest::from_u8(pearson_hash(data)),
        Algorithm::Fletcher16 => Digest::from_u16(fletcher16(data)),
        Algorithm::Crc32 => Digest::from_u32(crc.checksum(data)),
        Algorithm::WeightedSum => Digest::from_u32(weighted_sum(data)),
        Algorithm::Xor => Digest::from_u8(xor_checksum(data)),
        Algorithm::Adler32 => Digest::from_u32(adler32(data)),
        Algorithm::PrimeHash => Digest::from_u32(prime_hash(data)),
    }
}
