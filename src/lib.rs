//! fks_fixed_set — static `i32` set on two-level (FKS) perfect hashing.
//!
//! - Build once on a set of **unique** keys.
//! - O(1) worst-case lookups: one outer hash, one inner hash, one comparison.
//! - Total inner storage is kept within `4n` slots; hash functions are
//!   resampled until that bound (outer) or zero collisions (inner) hold.
//! - Deterministic: the same seed and key order give the same tables.

mod builder;
mod hash;
mod inner;
mod probe;

pub use builder::{BuildConfig, Builder, FixedSet, FixedSetError, MEMORY_FACTOR};
pub use hash::{AffineHash, FIELD_PRIME};
pub use inner::{InnerTable, Slot};
