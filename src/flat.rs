//! Single-level open-addressing map.

use std::borrow::Borrow;
use std::fmt;
use std::ops;

use crate::config::Capacities;
use crate::error::Result;
use crate::hasher::{PolynomialHasher, SlotHasher};
use crate::iter::Iter;
use crate::raw::RawTable;

/// Linear-probing hash map from `K` to `V`.
///
/// Keys hash through `H`, by default a [`PolynomialHasher`] over string keys.
/// The slot array grows through a fixed [`Capacities`] sequence and never
/// shrinks; deletes repair the probe cluster instead of leaving tombstones.
pub struct FlatTable<K, V, H = PolynomialHasher> {
    raw: RawTable<K, V>,
    hasher: H,
}

// ---------------------------------------------------------------------------
// Construction & accessors
// ---------------------------------------------------------------------------

impl<K, V> FlatTable<K, V> {
    /// Creates an empty table with the default sizes and hasher.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacities(Capacities::default())
    }

    /// Creates an empty table growing through `capacities`.
    #[must_use]
    pub fn with_capacities(capacities: Capacities) -> Self {
        Self::with_hasher(capacities, PolynomialHasher::default())
    }
}

impl<K, V, H> FlatTable<K, V, H> {
    /// Creates an empty table with a custom key-to-slot mapping.
    #[must_use]
    pub fn with_hasher(capacities: Capacities, hasher: H) -> Self {
        Self {
            raw: RawTable::new(capacities),
            hasher,
        }
    }

    /// Number of live entries.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.raw.len()
    }

    /// Returns `true` if the table holds no entries.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Current slot-array size.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.raw.capacity()
    }

    /// Iterates `(&K, &V)` pairs in slot order.
    #[must_use]
    pub fn iter(&self) -> Iter<'_, K, V> {
        self.raw.iter()
    }

    /// Iterates keys in slot order.
    pub fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.iter().map(|(k, _)| k)
    }

    /// Iterates values in slot order.
    pub fn values(&self) -> impl Iterator<Item = &V> + '_ {
        self.iter().map(|(_, v)| v)
    }
}

// ---------------------------------------------------------------------------
// Keyed operations
// ---------------------------------------------------------------------------

impl<K: Eq, V, H: SlotHasher<K>> FlatTable<K, V, H> {
    /// Returns the value stored under `key`.
    ///
    /// # Errors
    ///
    /// [`KeyNotFound`](crate::TableError::KeyNotFound) if `key` is absent.
    pub fn get<Q>(&self, key: &Q) -> Result<&V>
    where
        K: Borrow<Q>,
        Q: Eq + ?Sized,
        H: SlotHasher<Q>,
    {
        self.raw.get(&self.hasher, key)
    }

    /// Returns a mutable reference to the value stored under `key`.
    ///
    /// # Errors
    ///
    /// [`KeyNotFound`](crate::TableError::KeyNotFound) if `key` is absent.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Result<&mut V>
    where
        K: Borrow<Q>,
        Q: Eq + ?Sized,
        H: SlotHasher<Q>,
    {
        self.raw.get_mut(&self.hasher, key)
    }

    /// Returns `true` if `key` is stored.
    #[must_use]
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Eq + ?Sized,
        H: SlotHasher<Q>,
    {
        self.get(key).is_ok()
    }

    /// Stores `value` under `key`, returning the value it replaced.
    ///
    /// # Errors
    ///
    /// [`TableFull`](crate::TableError::TableFull) once the largest capacity
    /// has no free slot; the table is left unchanged.
    pub fn insert(&mut self, key: K, value: V) -> Result<Option<V>> {
        self.raw.insert(&self.hasher, key, value)
    }

    /// Removes `key` and returns its value.
    ///
    /// # Errors
    ///
    /// [`KeyNotFound`](crate::TableError::KeyNotFound) if `key` is absent.
    pub fn remove<Q>(&mut self, key: &Q) -> Result<V>
    where
        K: Borrow<Q>,
        Q: Eq + ?Sized,
        H: SlotHasher<Q>,
    {
        self.raw.remove(&self.hasher, key)
    }
}

// ---------------------------------------------------------------------------
// Trait impls
// ---------------------------------------------------------------------------

impl<K, V> Default for FlatTable<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, H> fmt::Debug for FlatTable<K, V, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FlatTable")
            .field("len", &self.len())
            .field("capacity", &self.capacity())
            .finish_non_exhaustive()
    }
}

impl<K, V, H, Q> ops::Index<&Q> for FlatTable<K, V, H>
where
    K: Eq + Borrow<Q>,
    Q: Eq + ?Sized,
    H: SlotHasher<K> + SlotHasher<Q>,
{
    type Output = V;

    fn index(&self, key: &Q) -> &V {
        self.get(key).expect("key not found")
    }
}

impl<'a, K, V, H> IntoIterator for &'a FlatTable<K, V, H> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Iter<'a, K, V> {
        self.iter()
    }
}
