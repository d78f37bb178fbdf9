//! Slot hashing for the open-addressing engines.
//!
//! A hasher maps a key straight to a home slot for a given capacity, so a
//! table can swap in a domain-specific mapping (integer keys, case folding)
//! without touching the probing code.

/// Maps keys to home slots.
pub trait SlotHasher<K: ?Sized> {
    /// Home slot of `key` in an array of `capacity` slots.
    ///
    /// Callers reduce the result modulo `capacity` again, so an out-of-range
    /// value is tolerated but wastes the distribution.
    fn slot(&self, key: &K, capacity: usize) -> usize;
}

/// Polynomial rolling hash over the characters of a string key.
///
/// The multiplier is itself advanced modulo `capacity - 1` at every step.
/// `seed` and `base` are reduced modulo `capacity - 1` first, so a large
/// seed gives the same slots as its residue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PolynomialHasher {
    base: u64,
    seed: u64,
}

impl PolynomialHasher {
    /// Multiplier growth factor used by [`Default`].
    pub const DEFAULT_BASE: u64 = 31;
    /// Initial multiplier used by [`Default`].
    pub const DEFAULT_SEED: u64 = 31415;

    /// Creates a hasher with a custom base and initial multiplier.
    #[must_use]
    pub const fn new(base: u64, seed: u64) -> Self {
        Self { base, seed }
    }
}

impl Default for PolynomialHasher {
    fn default() -> Self {
        Self::new(Self::DEFAULT_BASE, Self::DEFAULT_SEED)
    }
}

impl<K: AsRef<str> + ?Sized> SlotHasher<K> for PolynomialHasher {
    fn slot(&self, key: &K, capacity: usize) -> usize {
        let capacity = capacity as u64;
        let step_modulus = capacity.saturating_sub(1).max(1);
        let mut value = 0_u64;
        let base = self.base % step_modulus;
        let mut a = self.seed % step_modulus;
        for ch in key.as_ref().chars() {
            value = u64::from(ch).wrapping_add(a.wrapping_mul(value)) % capacity;
            a = a.wrapping_mul(base) % step_modulus;
        }
        value as usize
    }
}
