//! The djb2 string hash shared by both table variants

use std::num::NonZeroUsize;

/// Starting value of the djb2 accumulator
const DJB2_SEED: i64 = 5381;

/// Hashes `key` with djb2 (`h = h * 33 + c` over the key's characters).
///
/// The accumulator is a wrapping signed 64-bit integer; a negative result is folded back to
/// its magnitude so the hash is always non-negative.
#[must_use]
pub fn hash(key: &str) -> u64 {
    let hash = key.chars().fold(DJB2_SEED, |hash, ch| {
        hash.wrapping_shl(5).wrapping_add(hash).wrapping_add(i64::from(u32::from(ch)))
    });

    hash.unsigned_abs()
}

/// Returns the first slot of `key`'s probe sequence (or its bucket) in a table of `slots`
/// slots.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::arithmetic_side_effects)]
pub fn home_index(key: &str, slots: NonZeroUsize) -> usize {
    // The remainder is below `slots`, so it always fits back into a usize.
    (hash(key) % slots.get() as u64) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_values() {
        assert_eq!(hash(""), 5381);
        assert_eq!(hash("a"), 177_670);
        assert_eq!(hash("ab"), 5_863_208);
        assert_eq!(hash("hello"), 210_714_636_441);
    }

    #[test]
    fn test_overflowing_keys_stay_deterministic() {
        assert_eq!(hash("Ann Archer"), 8_244_602_703_180_506_007);
        assert_eq!(hash("Hank Hardy"), 8_244_909_395_778_042_559);
        assert_eq!(hash("Ann Archer"), hash("Ann Archer"));
    }

    #[test]
    fn test_home_index() {
        let ten = NonZeroUsize::new(10).unwrap();
        assert_eq!(home_index("Ann Archer", ten), 7);
        assert_eq!(home_index("Dan Deever", ten), 9);
        assert_eq!(home_index("Sally Owens", ten), 0);
        assert_eq!(home_index("anything", NonZeroUsize::MIN), 0);
    }

    #[test]
    fn test_non_ascii_keys_hash_by_code_point() {
        // 'é' is U+00E9
        assert_eq!(hash("é"), 5381 * 33 + 0xE9);
    }
}
