use crate::builder::FixedSetError;
use crate::hash::{AffineHash, FIELD_PRIME};
use crate::probe::{count_per_bucket, is_collision_free};
use log::trace;
use rand::Rng;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Slot {
    #[default]
    Empty,
    Occupied(i32),
}

/// Second-level table for one outer bucket: `k²` slots, no two of the
/// bucket's `k` keys sharing a slot.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InnerTable {
    hash: AffineHash,
    slots: Box<[Slot]>,
}

impl InnerTable {
    /// Resamples hash functions until the bucket's keys land in distinct
    /// slots. An empty bucket draws nothing from `rng`.
    pub(crate) fn build<R: Rng + ?Sized>(keys: &[i32], rng: &mut R) -> Result<Self, FixedSetError> {
        let k = keys.len();
        if k == 0 {
            return Ok(Self::default());
        }
        let size = k.checked_mul(k).ok_or(FixedSetError::CapacityOverflow(k))?;
        let mut slots = Vec::new();
        slots.try_reserve_exact(size)?;
        slots.resize(size, Slot::Empty);

        let mut attempts = 0u32;
        let hash = loop {
            attempts += 1;
            let candidate = AffineHash::random(rng, FIELD_PRIME);
            if is_collision_free(&count_per_bucket(keys, &candidate, size)) {
                break candidate;
            }
        };
        trace!("inner table: {k} keys, {size} slots, {attempts} attempts");

        for &key in keys {
            slots[hash.bucket(key, size)] = Slot::Occupied(key);
        }
        Ok(Self {
            hash,
            slots: slots.into_boxed_slice(),
        })
    }

    /// One slot lookup plus an equality check on the stored key.
    #[inline]
    pub fn contains(&self, value: i32) -> bool {
        if self.slots.is_empty() {
            return false;
        }
        let idx = self.hash.bucket(value, self.slots.len());
        self.slots[idx] == Slot::Occupied(value)
    }

    /// Number of slots (`k²`).
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn hash(&self) -> &AffineHash {
        &self.hash
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    /// Stored keys in slot order.
    pub fn keys(&self) -> impl Iterator<Item = i32> + '_ {
        self.slots.iter().filter_map(|s| match *s {
            Slot::Occupied(k) => Some(k),
            Slot::Empty => None,
        })
    }
}
