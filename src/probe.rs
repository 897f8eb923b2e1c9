//! Bucket occupancy shared by the outer and inner table builders.

use crate::hash::AffineHash;

/// Number of keys landing in each of `buckets` slots under `hash`.
pub(crate) fn count_per_bucket(keys: &[i32], hash: &AffineHash, buckets: usize) -> Vec<u32> {
    let mut counts = vec![0u32; buckets];
    if buckets == 0 {
        return counts;
    }
    for &key in keys {
        counts[hash.bucket(key, buckets)] += 1;
    }
    counts
}

/// Total inner-table slots if every bucket `i` were sized `counts[i]^2`.
#[inline]
pub(crate) fn memory_cost(counts: &[u32]) -> u64 {
    counts.iter().map(|&c| c as u64 * c as u64).sum()
}

#[inline]
pub(crate) fn is_collision_free(counts: &[u32]) -> bool {
    counts.iter().all(|&c| c <= 1)
}
