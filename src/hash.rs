//! Hash-family digests.
//!
//! Non-cryptographic hashes that mix byte position into the result: a
//! Rabin-Karp style polynomial hash, Pearson's 8-bit table hash and the
//! classic multiply-by-31 string hash.

/// Modulus of the rolling hash, the prime 10^9 + 7.
pub const ROLLING_MOD: u64 = 1_000_000_007;

/// Base (radix) of the rolling hash polynomial.
pub const ROLLING_BASE: u64 = 256;

/// Multiplier of the prime-multiplier hash.
pub const PRIME_MULTIPLIER: u32 = 31;

/// Fixed permutation of `0..=255` driving [`pearson_hash`].
pub const PEARSON_TABLE: [u8; 256] = [
    98, 6, 85, 150, 36, 23, 112, 164, 135, 207, 169, 5, 26, 64, 165, 219, //
    61, 20, 68, 89, 130, 63, 52, 102, 24, 229, 132, 245, 80, 216, 195, 115, //
    90, 168, 156, 203, 177, 120, 2, 190, 188, 7, 100, 185, 174, 243, 162, 10, //
    237, 18, 253, 225, 8, 208, 172, 244, 255, 126, 101, 79, 145, 235, 228, 121, //
    123, 251, 67, 250, 161, 0, 107, 97, 241, 111, 181, 82, 249, 33, 69, 55, //
    59, 153, 29, 9, 213, 167, 84, 93, 30, 46, 94, 75, 151, 114, 73, 222, //
    197, 96, 210, 45, 16, 227, 248, 202, 51, 152, 252, 125, 81, 206, 215, 186, //
    39, 158, 178, 187, 131, 136, 1, 49, 50, 17, 141, 91, 47, 129, 60, 99, //
    154, 35, 86, 171, 105, 34, 38, 200, 147, 58, 77, 118, 173, 246, 76, 254, //
    133, 232, 196, 144, 198, 124, 53, 4, 108, 74, 223, 234, 134, 230, 157, 139, //
    189, 205, 199, 128, 176, 19, 211, 236, 127, 192, 231, 70, 233, 88, 146, 44, //
    183, 201, 22, 83, 13, 214, 116, 109, 159, 32, 95, 226, 140, 220, 57, 12, //
    221, 31, 209, 182, 143, 92, 149, 184, 148, 62, 113, 65, 37, 27, 106, 166, //
    3, 14, 204, 72, 21, 41, 56, 66, 28, 193, 40, 217, 25, 54, 179, 117, //
    238, 87, 240, 155, 180, 170, 242, 212, 191, 163, 78, 218, 137, 194, 175, 110, //
    43, 119, 224, 71, 122, 142, 42, 160, 104, 48, 247, 103, 15, 11, 138, 239, //
];

/// Rabin-Karp polynomial hash: `sum(byte[i] * 256^i) mod (10^9 + 7)`.
///
/// Products are formed in 64-bit so every term is reduced exactly; the
/// result always fits in 32 bits.
///
/// # Example
///
/// ```rust
/// use digestlab::hash::rolling_hash;
///
/// assert_eq!(rolling_hash(b""), 0);
/// assert_eq!(rolling_hash(&[1, 1]), 257);
/// ```
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn rolling_hash(data: &[u8]) -> u32 {
    let mut hash: u64 = 0;
    let mut power: u64 = 1;

    for &byte in data {
        hash = (hash + u64::from(byte) * power % ROLLING_MOD) % ROLLING_MOD;
        power = power * ROLLING_BASE % ROLLING_MOD;
    }

    // hash < ROLLING_MOD < 2^32
    hash as u32
}

/// Pearson 8-bit hash over [`PEARSON_TABLE`].
///
/// Every step is a bijection of the running state, so changing any single
/// byte always changes the result.
#[must_use]
pub fn pearson_hash(data: &[u8]) -> u8 {
    data.iter()
        .fold(0u8, |hash, &byte| PEARSON_TABLE[usize::from(hash ^ byte)])
}

/// Polynomial hash `hash = hash * 31 + byte`, wrapping at 2^32.
#[must_use]
pub fn prime_hash(data: &[u8]) -> u32 {
    data.iter().fold(0u32, |hash, &byte| {
        hash.wrapping_mul(PRIME_MULTIPLIER)
            .wrapping_add(u32::from(byte))
    })
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// A single changed byte always changes the Pearson hash
        #[test]
        fn pearson_detects_single_byte_change(
            data in prop::collection::vec(any::<u8>(), 1..64),
            index in any::<prop::sample::Index>(),
            delta in 1u8..=255
        ) {
            let i = index.index(data.len());
            let mut corrupted = data.clone();
            corrupted[i] ^= delta;
            prop_assert_ne!(pearson_hash(&data), pearson_hash(&corrupted));
        }

        #[test]
        fn rolling_always_bounded(data in prop::collection::vec(any::<u8>(), 0..1000)) {
            prop_assert!(u64::from(rolling_hash(&data)) < ROLLING_MOD);
        }

        /// Appending a byte to the prime hash is one multiply-add step
        #[test]
        fn prime_hash_extends(
            data in prop::collection::vec(any::<u8>(), 0..128),
            byte in any::<u8>(),
        ) {
            let mut extended = data.clone();
            extended.push(byte);
            prop_assert_eq!(
                prime_hash(&extended),
                prime_hash(&data).wrapping_mul(PRIME_MULTIPLIER).wrapping_add(u32::from(byte))
            );
        }
    }
}
