use rand::Rng;

/// Mersenne prime 2^61 - 1. Tables draw `a` from `[1, p)` and `b` from
/// `[0, p)`, apply under `p` and then reduce by their own size. Distinct `i32`
/// keys differ by less than `p`, so `a * (x - y)` is never `0 mod p`.
pub const FIELD_PRIME: i64 = (1 << 61) - 1;

/// Affine hash `h(x) = ((a * x) mod m + b) mod m`, always in `[0, m)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct AffineHash {
    a: i64,
    b: i64,
    modulus: i64,
}

impl Default for AffineHash {
    /// Maps every input to 0.
    fn default() -> Self {
        Self { a: 0, b: 0, modulus: 1 }
    }
}

impl AffineHash {
    /// A non-positive modulus is clamped to 1.
    pub fn new(a: i64, b: i64, modulus: i64) -> Self {
        Self { a, b, modulus: modulus.max(1) }
    }

    /// Draws `a` from `[1, modulus)` then `b` from `[0, modulus)`. A modulus
    /// below 2 yields the default function without drawing.
    pub fn random<R: Rng + ?Sized>(rng: &mut R, modulus: i64) -> Self {
        if modulus < 2 {
            return Self::default();
        }
        let a = rng.gen_range(1..modulus);
        let b = rng.gen_range(0..modulus);
        Self::new(a, b, modulus)
    }

    #[inline]
    pub fn apply(&self, x: i64) -> i64 {
        let m = self.modulus as i128;
        let ax = (self.a as i128 * x as i128).rem_euclid(m);
        ((ax + self.b as i128).rem_euclid(m)) as i64
    }

    /// Slot of `key` in a table of `buckets` slots: `apply(key) mod buckets`.
    #[inline]
    pub fn bucket(&self, key: i32, buckets: usize) -> usize {
        (self.apply(key as i64) as u64 % buckets.max(1) as u64) as usize
    }

    pub fn a(&self) -> i64 {
        self.a
    }

    pub fn b(&self) -> i64 {
        self.b
    }

    pub fn modulus(&self) -> i64 {
        self.modulus
    }
}
