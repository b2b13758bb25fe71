//! Sum-family checksums.
//!
//! These algorithms accumulate bytes into one or two running sums. They are
//! cheap but blind to some reorderings: the plain sum and the XOR checksum are
//! commutative, so any permutation of the input yields the same digest.

/// Largest prime below 2^16, the Adler-32 modulus.
pub const ADLER_MOD: u32 = 65521;

/// Fletcher-16 modulus.
pub const FLETCHER_MOD: u16 = 255;

/// Sum of all bytes, wrapping at 2^32.
///
/// # Example
///
/// ```rust
/// use digestlab::checksum::simple_sum;
///
/// assert_eq!(simple_sum(b""), 0);
/// assert_eq!(simple_sum(&[1, 2, 3]), 6);
/// ```
#[must_use]
pub fn simple_sum(data: &[u8]) -> u32 {
    data.iter()
        .fold(0u32, |sum, &byte| sum.wrapping_add(u32::from(byte)))
}

/// Position-weighted sum: each byte is multiplied by its 1-based index.
///
/// Unlike [`simple_sum`], swapping two distinct bytes changes the result.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn weighted_sum(data: &[u8]) -> u32 {
    data.iter().enumerate().fold(0u32, |sum, (i, &byte)| {
        // Truncation is intentional: weights wrap at 2^32 like the sum
        sum.wrapping_add(u32::from(byte).wrapping_mul((i as u32).wrapping_add(1)))
    })
}

/// XOR of all bytes.
///
/// # Example
///
/// ```rust
/// use digestlab::checksum::xor_checksum;
///
/// assert_eq!(xor_checksum(&[0x00, 0xFF, 0x00, 0xFF]), 0x00);
/// assert_eq!(xor_checksum(&[0x0F, 0xF0]), 0xFF);
/// ```
#[must_use]
pub fn xor_checksum(data: &[u8]) -> u8 {
    data.iter().fold(0u8, |acc, &byte| acc ^ byte)
}

/// Fletcher-16 over 8-bit words.
///
/// Result is `(sum2 << 8) | sum1` with both sums reduced mod 255.
#[must_use]
pub fn fletcher16(data: &[u8]) -> u16 {
    let mut sum1: u16 = 0;
    let mut sum2: u16 = 0;

    for &byte in data {
        sum1 = (sum1 + u16::from(byte)) % FLETCHER_MOD;
        sum2 = (sum2 + sum1) % FLETCHER_MOD;
    }

    (sum2 << 8) | sum1
}

/// Adler-32 as used by zlib.
///
/// The `a` component starts at 1, so the empty input digests to `0x00000001`.
///
/// # Example
///
/// ```rust
/// use digestlab::checksum::adler32;
///
/// assert_eq!(adler32(b""), 1);
/// assert_eq!(adler32(b"123456789"), 0x091E_01DE);
/// ```
#[must_use]
pub fn adler32(data: &[u8]) -> u32 {
    let mut a: u32 = 1;
    let mut b: u32 = 0;

    for &byte in data {
        a = (a + u32::from(byte)) % ADLER_MOD;
        b = (b + a) % ADLER_MOD;
    }

    (b << 16) | a
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Plain sum and XOR are invariant under any reversal
        #[test]
        fn commutative_sums_ignore_reversal(data in prop::collection::vec(any::<u8>(), 0..256)) {
            let reversed: Vec<u8> = data.iter().rev().copied().collect();
            prop_assert_eq!(simple_sum(&data), simple_sum(&reversed));
            prop_assert_eq!(xor_checksum(&data), xor_checksum(&reversed));
        }

        /// Appending a zero byte never changes the commutative sums
        #[test]
        fn zero_extension_invisible_to_sum_and_xor(
            data in prop::collection::vec(any::<u8>(), 0..256),
        ) {
            let mut extended = data.clone();
            extended.push(0);
            prop_assert_eq!(simple_sum(&data), simple_sum(&extended));
            prop_assert_eq!(xor_checksum(&data), xor_checksum(&extended));
            prop_assert_eq!(weighted_sum(&data), weighted_sum(&extended));
        }

        /// Adler components always reduced
        #[test]
        fn adler_always_bounded(data in prop::collection::vec(any::<u8>(), 0..2000)) {
            let digest = adler32(&data);
            prop_assert!(digest & 0xFFFF < ADLER_MOD);
            prop_assert!(digest >> 16 < ADLER_MOD);
        }

        /// Fletcher components always reduced
        #[test]
        fn fletcher_always_bounded(data in prop::collection::vec(any::<u8>(), 0..2000)) {
            let digest = fletcher16(&data);
            prop_assert!(digest & 0xFF < FLETCHER_MOD);
            prop_assert!(digest >> 8 < FLETCHER_MOD);
        }
    }
}
