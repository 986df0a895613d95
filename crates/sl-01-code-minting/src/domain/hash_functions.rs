//! Hash-position generator for the shared Bloom filter
//!
//! Position `i` of an item is `SHA-256(item ++ decimal(i)) mod m`, reading
//! the full digest as a big-endian unsigned integer. There is no seed: the
//! bit array is shared by every process, so the mapping must be identical
//! everywhere and across restarts.
//!
//! When `m` is not a power of two the reduction has a small modulo bias.
//! It is accepted as is.

use sha2::{Digest, Sha256};

/// Reduce a big-endian unsigned integer modulo `m`
fn reduce_be(bytes: &[u8], m: u64) -> u64 {
    let m = m as u128;
    bytes
        .iter()
        .fold(0u128, |acc, &b| ((acc << 8) | b as u128) % m) as u64
}

/// Position of `item` for hash function `index` in a filter of `m` bits
///
/// `m` must be non-zero; [`FilterConfig`](super::FilterConfig) enforces it.
pub fn hash_position(item: &str, index: usize, m: u64) -> u64 {
    let mut hasher = Sha256::new();
    hasher.update(item.as_bytes());
    hasher.update(index.to_string().as_bytes());
    reduce_be(&hasher.finalize(), m)
}

/// Compute the k positions of `item`
pub fn compute_hash_positions(item: &str, k: usize, m: u64) -> Vec<u64> {
    (0..k).map(|i| hash_position(item, i, m)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positions_deterministic() {
        let first = compute_hash_positions("aZ3kP9q", 7, 10_000_000);
        let second = compute_hash_positions("aZ3kP9q", 7, 10_000_000);
        assert_eq!(first, second, "Same item must map to the same positions");
    }

    #[test]
    fn test_positions_within_bounds() {
        for m in [1u64, 2, 7, 1000, 10_000_000, u64::MAX] {
            for pos in compute_hash_positions("bounded", 9, m) {
                assert!(pos < m, "Position {} should be < m={}", pos, m);
            }
        }
    }

    #[test]
    fn test_index_acts_as_salt() {
        let positions = compute_hash_positions("salted_item", 7, 1 << 40);
        let unique: std::collections::HashSet<_> = positions.iter().collect();
        assert_eq!(unique.len(), 7, "Indices should yield distinct positions");
    }

    #[test]
    fn test_preimage_is_plain_concatenation() {
        // No separator between item and index: "a" ++ "11" == "a1" ++ "1".
        assert_eq!(
            hash_position("a", 11, u64::MAX),
            hash_position("a1", 1, u64::MAX)
        );
        assert_ne!(hash_position("a", 1, u64::MAX), hash_position("a", 2, u64::MAX));
    }

    #[test]
    fn test_reduce_be_matches_small_integers() {
        assert_eq!(reduce_be(&[0x01, 0x00], 1000), 256);
        assert_eq!(reduce_be(&[0xFF; 32], 1), 0);
        assert_eq!(reduce_be(&[0x00, 0x00, 0x07], 5), 2);
        let value = 0x0123_4567_89AB_CDEFu64;
        assert_eq!(reduce_be(&value.to_be_bytes(), 1_000_003), value % 1_000_003);
    }

    #[test]
    fn test_hash_uniformity() {
        let m = 1000;
        let k = 7;
        let mut counts = vec![0usize; 10];

        for i in 0..1000 {
            let item = format!("code_{}", i);
            for pos in compute_hash_positions(&item, k, m) {
                counts[(pos / 100) as usize] += 1;
            }
        }

        // 1000 * 7 / 10 per bucket, with 50% tolerance
        let expected = 700;
        for (i, count) in counts.iter().enumerate() {
            assert!(
                *count >= expected / 2 && *count <= expected * 3 / 2,
                "Bucket {} has {} entries, expected ~{}",
                i,
                count,
                expected
            );
        }
    }
}
