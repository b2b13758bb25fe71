//! Table-driven CRC-32 (IEEE 802.3).
//!
//! The lookup table is an ordinary immutable value. [`CrcTable::ieee`] builds
//! it in a `const fn`, so it can live in a `const`, a `static`, or behind an
//! `Arc` shared by a [`Registry`](crate::Registry); callers never see a
//! partially built table.

/// Reflected IEEE 802.3 polynomial.
pub const IEEE_POLYNOMIAL: u32 = 0xEDB8_8320;

/// Initial register value and final XOR mask.
pub const CRC_INIT: u32 = 0xFFFF_FFFF;

/// 256-entry lookup table for byte-at-a-time reflected CRC-32.
#[derive(Clone, PartialEq, Eq)]
pub struct CrcTable {
    polynomial: u32,
    entries: [u32; 256],
}

impl CrcTable {
    /// Build a table for a reflected polynomial by bit-wise division of each
    /// byte value.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub const fn new(polynomial: u32) -> Self {
        let mut entries = [0u32; 256];
        let mut i = 0;
        while i < 256 {
            let mut crc = i as u32;
            let mut bit = 0;
            while bit < 8 {
                crc = if crc & 1 == 1 {
                    (crc >> 1) ^ polynomial
                } else {
                    crc >> 1
                };
                bit += 1;
            }
            entries[i] = crc;
            i += 1;
        }
        Self {
            polynomial,
            entries,
        }
    }

    /// Table for the IEEE 802.3 polynomial.
    ///
    /// # Example
    ///
    /// ```rust
    /// use digestlab::CrcTable;
    ///
    /// let table = CrcTable::ieee();
    /// assert_eq!(table.checksum(b"123456789"), 0xCBF4_3926);
    /// ```
    #[must_use]
    pub const fn ieee() -> Self {
        Self::new(IEEE_POLYNOMIAL)
    }

    /// Polynomial this table was built from.
    #[must_use]
    pub const fn polynomial(&self) -> u32 {
        self.polynomial
    }

    /// Table entry for a byte index.
    #[inline]
    #[must_use]
    pub const fn entry(&self, index: u8) -> u32 {
        self.entries[index as usize]
    }

    /// CRC-32 of `data`: init `0xFFFFFFFF`, reflected, final XOR `0xFFFFFFFF`.
    #[must_use]
    pub fn checksum(&self, data: &[u8]) -> u32 {
        let crc = data.iter().fold(CRC_INIT, |crc, &byte| {
            // Low byte of the register selects the entry
            #[allow(clippy::cast_possible_truncation)]
            let index = (crc ^ u32::from(byte)) as u8;
            self.entry(index) ^ (crc >> 8)
        });
        crc ^ CRC_INIT
    }
}

impl Default for CrcTable {
    fn default() -> Self {
        Self::ieee()
    }
}

impl std::fmt::Debug for CrcTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CrcTable")
            .field("polynomial", &format_args!("{:#010x}", self.polynomial))
            .finish_non_exhaustive()
    }
}

/// CRC-32 of `data` using the given table.
#[must_use]
pub fn crc32(table: &CrcTable, data: &[u8]) -> u32 {
    table.checksum(data)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TABLE: CrcTable = CrcTable::ieee();

    #[test]
    fn check_value() {
        assert_eq!(crc32(&TABLE, b"123456789"), 0xCBF4_3926);
    }

    #[test]
    fn empty_input_is_zero() {
        // init and final XOR cancel
        assert_eq!(crc32(&TABLE, b""), 0);
    }

    #[test]
    fn known_vectors() {
        assert_eq!(crc32(&TABLE, b"hello world"), 0x0D4A_1185);
        assert_eq!(crc32(&TABLE, b"abcde"), 0x8587_D865);
    }

    #[test]
    fn table_entries() {
        assert_eq!(TABLE.entry(0), 0);
        assert_eq!(TABLE.entry(1), 0x7707_3096);
        assert_eq!(TABLE.entry(255), 0x2D02_EF8D);
    }

    #[test]
    fn rebuilding_yields_same_table() {
        assert_eq!(CrcTable::ieee(), CrcTable::new(IEEE_POLYNOMIAL));
        assert_eq!(CrcTable::default(), TABLE);
    }

    #[test]
    fn debug_hides_entries() {
        let debug = format!("{TABLE:?}");
        assert!(debug.contains("0xedb88320"));
        assert!(!debug.contains("entries"));
    }

    #[test]
    fn polynomial_accessor() {
        assert_eq!(TABLE.polynomial(), IEEE_POLYNOMIAL);
    }
}
