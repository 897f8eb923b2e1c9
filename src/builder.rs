use crate::hash::{AffineHash, FIELD_PRIME};
use crate::inner::InnerTable;
use crate::probe::{count_per_bucket, memory_cost};
use hashbrown::HashSet;
use log::{debug, trace};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::borrow::Borrow;
use std::collections::TryReserveError;
use thiserror::Error;

/// The outer hash is accepted once the inner tables it implies need at most
/// `MEMORY_FACTOR * n` slots in total.
pub const MEMORY_FACTOR: u64 = 4;

/// Immutable set of `i32` with worst-case O(1) lookups: one outer hash into
/// `n` buckets, one collision-free inner table per bucket.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FixedSet {
    hash: AffineHash,
    tables: Vec<InnerTable>,
}

impl FixedSet {
    /// Same as `Builder::new().build(keys)`.
    pub fn build<K, I>(keys: I) -> Result<Self, FixedSetError>
    where
        K: Borrow<i32>,
        I: IntoIterator<Item = K>,
    {
        Builder::new().build(keys)
    }

    /// Rebuilds the set from scratch out of **unique** keys. Random draws
    /// happen in a fixed order: outer hash selection first, then the inner
    /// tables by bucket index. On error the set is left empty.
    pub fn initialize<K, I, R>(&mut self, keys: I, rng: &mut R) -> Result<(), FixedSetError>
    where
        K: Borrow<i32>,
        I: IntoIterator<Item = K>,
        R: Rng + ?Sized,
    {
        self.hash = AffineHash::default();
        self.tables.clear();

        let keys = collect_unique(keys)?;
        let n = keys.len();
        if n == 0 {
            return Ok(());
        }

        // 1) Outer hash bounding total inner memory.
        let hash = select_outer_hash(&keys, rng);

        // 2) Partition, keeping encounter order inside each bucket.
        let mut buckets: Vec<Vec<i32>> = vec![Vec::new(); n];
        for &key in &keys {
            buckets[hash.bucket(key, n)].push(key);
        }

        // 3) Inner tables, in bucket order.
        let mut tables = Vec::with_capacity(n);
        for bucket in &buckets {
            tables.push(InnerTable::build(bucket, rng)?);
        }

        self.hash = hash;
        self.tables = tables;
        debug!(
            "built fixed set: {n} keys, {} inner slots",
            self.additional_memory()
        );
        Ok(())
    }

    /// Two hash evaluations and one comparison, whatever the input.
    #[inline]
    pub fn contains(&self, value: i32) -> bool {
        if self.tables.is_empty() {
            return false;
        }
        let idx = self.hash.bucket(value, self.tables.len());
        self.tables[idx].contains(value)
    }

    /// Number of keys (equal to the number of buckets).
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Total slots across all inner tables; at most `MEMORY_FACTOR * len()`.
    pub fn additional_memory(&self) -> usize {
        self.tables.iter().map(InnerTable::len).sum()
    }

    pub fn outer_hash(&self) -> &AffineHash {
        &self.hash
    }

    pub fn tables(&self) -> &[InnerTable] {
        &self.tables
    }

    /// Stored keys, bucket by bucket.
    pub fn keys(&self) -> impl Iterator<Item = i32> + '_ {
        self.tables.iter().flat_map(|t| t.keys())
    }
}

/// Build parameters.
#[derive(Debug, Clone)]
pub struct BuildConfig {
    /// Seed of the generator every hash function is drawn from.
    pub seed: u64,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self { seed: 333 }
    }
}

#[derive(Debug, Error)]
pub enum FixedSetError {
    #[error("duplicate key {0} detected during build")]
    DuplicateKey(i32),
    #[error("bucket of {0} keys needs more slots than usize can address")]
    CapacityOverflow(usize),
    #[error("allocation failed: {0}")]
    Alloc(#[from] TryReserveError),
}

#[derive(Debug, Clone, Default)]
pub struct Builder {
    cfg: BuildConfig,
}

impl Builder {
    pub fn new() -> Self {
        Self { cfg: BuildConfig::default() }
    }

    pub fn with_config(mut self, cfg: BuildConfig) -> Self {
        self.cfg = cfg;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.cfg.seed = seed;
        self
    }

    /// Build from **unique** keys with a generator seeded from the config.
    pub fn build<K, I>(self, keys: I) -> Result<FixedSet, FixedSetError>
    where
        K: Borrow<i32>,
        I: IntoIterator<Item = K>,
    {
        let mut rng = StdRng::seed_from_u64(self.cfg.seed);
        self.build_with_rng(keys, &mut rng)
    }

    /// Build drawing every hash function from `rng`.
    pub fn build_with_rng<K, I, R>(self, keys: I, rng: &mut R) -> Result<FixedSet, FixedSetError>
    where
        K: Borrow<i32>,
        I: IntoIterator<Item = K>,
        R: Rng + ?Sized,
    {
        let mut set = FixedSet::default();
        set.initialize(keys, rng)?;
        Ok(set)
    }
}

/// Collect keys in order, rejecting duplicates.
fn collect_unique<K, I>(keys: I) -> Result<Vec<i32>, FixedSetError>
where
    K: Borrow<i32>,
    I: IntoIterator<Item = K>,
{
    let iter = keys.into_iter();
    let mut uniq = Vec::with_capacity(iter.size_hint().0);
    let mut seen = HashSet::with_capacity(iter.size_hint().0);
    for k in iter {
        let k = *k.borrow();
        if !seen.insert(k) {
            return Err(FixedSetError::DuplicateKey(k));
        }
        uniq.push(k);
    }
    Ok(uniq)
}

/// Resample until `sum(count_i^2) <= MEMORY_FACTOR * n` over `n` buckets.
fn select_outer_hash<R: Rng + ?Sized>(keys: &[i32], rng: &mut R) -> AffineHash {
    let n = keys.len();
    let budget = MEMORY_FACTOR * n as u64;
    let mut rounds = 0u32;
    loop {
        rounds += 1;
        let candidate = AffineHash::random(rng, FIELD_PRIME);
        let cost = memory_cost(&count_per_bucket(keys, &candidate, n));
        if cost <= budget {
            debug!("outer hash accepted after {rounds} rounds: cost {cost}, budget {budget}");
            return candidate;
        }
        trace!("outer round {rounds} rejected: cost {cost} > {budget}");
    }
}
