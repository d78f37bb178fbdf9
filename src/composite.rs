//! Two-level open-addressing map keyed by `(outer, inner)` pairs.

use std::borrow::Borrow;
use std::fmt;
use std::mem;

use log::debug;

use crate::config::Capacities;
use crate::error::{Result, TableError};
use crate::hasher::{PolynomialHasher, SlotHasher};
use crate::iter::{Entries, Iter, OuterKeys};
use crate::probe;
use crate::raw::RawTable;

/// An occupied outer slot: an outer key and the inner table it owns.
///
/// Invariant: `table` is never empty while the bucket sits in the array.
pub struct Bucket<K1, K2, V> {
    /// The outer key.
    pub key: K1,
    /// Inner table mapping inner keys to values.
    pub table: RawTable<K2, V>,
}

/// Hash table keyed by `(K1, K2)`, where every outer key owns a private
/// inner table for its inner keys.
///
/// Both levels use linear probing. The outer array grows through its own
/// [`Capacities`] sequence once more than half its slots hold outer keys;
/// each inner table grows independently through the inner sequence.
pub struct CompositeTable<K1, K2, V, H1 = PolynomialHasher, H2 = PolynomialHasher> {
    slots: Vec<Option<Bucket<K1, K2, V>>>,
    outer_capacities: Capacities,
    inner_capacities: Capacities,
    size_index: usize,
    outer_count: usize,
    total_count: usize,
    outer_hasher: H1,
    inner_hasher: H2,
}

// ---------------------------------------------------------------------------
// Construction & accessors
// ---------------------------------------------------------------------------

impl<K1, K2, V> CompositeTable<K1, K2, V> {
    /// Creates an empty table with default sizes at both levels.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacities(Capacities::default(), Capacities::default())
    }

    /// Creates an empty table with separate outer and inner size sequences.
    #[must_use]
    pub fn with_capacities(outer: Capacities, inner: Capacities) -> Self {
        Self::with_hashers(outer, inner, PolynomialHasher::default(), PolynomialHasher::default())
    }
}

impl<K1, K2, V, H1, H2> CompositeTable<K1, K2, V, H1, H2> {
    /// Creates an empty table with custom key-to-slot mappings per level.
    #[must_use]
    pub fn with_hashers(outer: Capacities, inner: Capacities, outer_hasher: H1, inner_hasher: H2) -> Self {
        Self {
            slots: probe::empty_slots(outer.get(0)),
            outer_capacities: outer,
            inner_capacities: inner,
            size_index: 0,
            outer_count: 0,
            total_count: 0,
            outer_hasher,
            inner_hasher,
        }
    }

    /// Total number of `(outer, inner)` entries.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.total_count
    }

    /// Number of distinct outer keys.
    #[must_use]
    pub const fn outer_len(&self) -> usize {
        self.outer_count
    }

    /// Returns `true` if no entries are stored.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.total_count == 0
    }

    /// Current outer slot-array size.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Iterates outer keys in outer slot order.
    #[must_use]
    pub fn keys(&self) -> OuterKeys<'_, K1, K2, V> {
        OuterKeys::new(&self.slots)
    }

    /// Iterates every `(&K1, &K2, &V)` entry: outer slots in array order,
    /// inner slots in array order within each.
    #[must_use]
    pub fn iter(&self) -> Entries<'_, K1, K2, V> {
        Entries::new(&self.slots)
    }

    /// Iterates every value, in the same order as [`iter`](Self::iter).
    pub fn values(&self) -> impl Iterator<Item = &V> + '_ {
        self.iter().map(|(_, _, v)| v)
    }
}

// ---------------------------------------------------------------------------
// Keyed operations
// ---------------------------------------------------------------------------

impl<K1, K2, V, H1, H2> CompositeTable<K1, K2, V, H1, H2>
where
    K1: Eq,
    K2: Eq,
    H1: SlotHasher<K1>,
    H2: SlotHasher<K2>,
{
    /// Outer slot holding `key1`.
    fn locate_outer<Q1>(&self, key1: &Q1) -> Result<usize>
    where
        K1: Borrow<Q1>,
        Q1: Eq + ?Sized,
        H1: SlotHasher<Q1>,
    {
        let home = <H1 as SlotHasher<Q1>>::slot(&self.outer_hasher, key1, self.capacity());
        probe::probe(&self.slots, home, |b| <K1 as Borrow<Q1>>::borrow(&b.key) == key1, false)
    }

    /// Inner table owned by `key1`.
    fn inner<Q1>(&self, key1: &Q1) -> Result<&RawTable<K2, V>>
    where
        K1: Borrow<Q1>,
        Q1: Eq + ?Sized,
        H1: SlotHasher<Q1>,
    {
        let pos = self.locate_outer(key1)?;
        self.slots[pos]
            .as_ref()
            .map(|b| &b.table)
            .ok_or(TableError::KeyNotFound)
    }

    /// Returns the value stored under `(key1, key2)`.
    ///
    /// # Errors
    ///
    /// [`TableError::KeyNotFound`] if either key is absent.
    pub fn get<Q1, Q2>(&self, key1: &Q1, key2: &Q2) -> Result<&V>
    where
        K1: Borrow<Q1>,
        K2: Borrow<Q2>,
        Q1: Eq + ?Sized,
        Q2: Eq + ?Sized,
        H1: SlotHasher<Q1>,
        H2: SlotHasher<Q2>,
    {
        self.inner(key1)?.get(&self.inner_hasher, key2)
    }

    /// Returns a mutable reference to the value stored under `(key1, key2)`.
    ///
    /// # Errors
    ///
    /// [`TableError::KeyNotFound`] if either key is absent.
    pub fn get_mut<Q1, Q2>(&mut self, key1: &Q1, key2: &Q2) -> Result<&mut V>
    where
        K1: Borrow<Q1>,
        K2: Borrow<Q2>,
        Q1: Eq + ?Sized,
        Q2: Eq + ?Sized,
        H1: SlotHasher<Q1>,
        H2: SlotHasher<Q2>,
    {
        let pos = self.locate_outer(key1)?;
        let bucket = self.slots[pos].as_mut().ok_or(TableError::KeyNotFound)?;
        bucket.table.get_mut(&self.inner_hasher, key2)
    }

    /// Returns `true` if `(key1, key2)` is stored.
    #[must_use]
    pub fn contains_key<Q1, Q2>(&self, key1: &Q1, key2: &Q2) -> bool
    where
        K1: Borrow<Q1>,
        K2: Borrow<Q2>,
        Q1: Eq + ?Sized,
        Q2: Eq + ?Sized,
        H1: SlotHasher<Q1>,
        H2: SlotHasher<Q2>,
    {
        self.get(key1, key2).is_ok()
    }

    /// Returns `true` if any entry has outer key `key1`.
    #[must_use]
    pub fn contains_outer<Q1>(&self, key1: &Q1) -> bool
    where
        K1: Borrow<Q1>,
        Q1: Eq + ?Sized,
        H1: SlotHasher<Q1>,
    {
        self.locate_outer(key1).is_ok()
    }

    /// Iterates `(&K2, &V)` pairs under `key1`, in inner slot order.
    ///
    /// # Errors
    ///
    /// [`TableError::KeyNotFound`] if `key1` is absent.
    pub fn inner_iter<Q1>(&self, key1: &Q1) -> Result<Iter<'_, K2, V>>
    where
        K1: Borrow<Q1>,
        Q1: Eq + ?Sized,
        H1: SlotHasher<Q1>,
    {
        Ok(self.inner(key1)?.iter())
    }

    /// Iterates inner keys under `key1`.
    ///
    /// # Errors
    ///
    /// [`TableError::KeyNotFound`] if `key1` is absent.
    pub fn inner_keys<Q1>(&self, key1: &Q1) -> Result<impl Iterator<Item = &K2> + '_>
    where
        K1: Borrow<Q1>,
        Q1: Eq + ?Sized,
        H1: SlotHasher<Q1>,
    {
        Ok(self.inner_iter(key1)?.map(|(k, _)| k))
    }

    /// Iterates values under `key1`.
    ///
    /// # Errors
    ///
    /// [`TableError::KeyNotFound`] if `key1` is absent.
    pub fn inner_values<Q1>(&self, key1: &Q1) -> Result<impl Iterator<Item = &V> + '_>
    where
        K1: Borrow<Q1>,
        Q1: Eq + ?Sized,
        H1: SlotHasher<Q1>,
    {
        Ok(self.inner_iter(key1)?.map(|(_, v)| v))
    }

    /// Stores `value` under `(key1, key2)`, returning the value it replaced.
    ///
    /// A new outer key gets a fresh inner table, populated before it is
    /// bound to the outer slot.
    ///
    /// # Errors
    ///
    /// [`TableError::TableFull`] if either level has no free slot at its
    /// largest capacity. Neither level is modified in that case.
    pub fn insert(&mut self, key1: K1, key2: K2, value: V) -> Result<Option<V>> {
        let home = self.outer_hasher.slot(&key1, self.capacity());
        let pos = probe::probe(&self.slots, home, |b| b.key == key1, true)?;

        let old = if let Some(bucket) = self.slots[pos].as_mut() {
            let old = bucket.table.insert(&self.inner_hasher, key2, value)?;
            if old.is_none() {
                self.total_count += 1;
            }
            old
        } else {
            let mut table = RawTable::new(self.inner_capacities.clone());
            table.insert(&self.inner_hasher, key2, value)?;
            self.slots[pos] = Some(Bucket { key: key1, table });
            self.outer_count += 1;
            self.total_count += 1;
            None
        };

        if self.outer_count * 2 > self.capacity() {
            self.rehash();
        }
        Ok(old)
    }

    /// Removes `(key1, key2)` and returns its value.
    ///
    /// An inner table left empty is dropped and the outer cluster after its
    /// slot is repaired.
    ///
    /// # Errors
    ///
    /// [`TableError::KeyNotFound`] if either key is absent.
    pub fn remove<Q1, Q2>(&mut self, key1: &Q1, key2: &Q2) -> Result<V>
    where
        K1: Borrow<Q1>,
        K2: Borrow<Q2>,
        Q1: Eq + ?Sized,
        Q2: Eq + ?Sized,
        H1: SlotHasher<Q1>,
        H2: SlotHasher<Q2>,
    {
        let pos = self.locate_outer(key1)?;
        let bucket = self.slots[pos].as_mut().ok_or(TableError::KeyNotFound)?;
        let value = bucket.table.remove(&self.inner_hasher, key2)?;
        let drained = bucket.table.is_empty();
        self.total_count -= 1;

        if drained {
            self.slots[pos] = None;
            self.outer_count -= 1;
            let capacity = self.capacity();
            let hasher = &self.outer_hasher;
            probe::repair_cluster(&mut self.slots, pos, |b| {
                <H1 as SlotHasher<K1>>::slot(hasher, &b.key, capacity)
            });
        }
        Ok(value)
    }

    /// Moves the outer array to the next size, re-seating every outer key
    /// and reconstructing its inner table.
    fn rehash(&mut self) {
        if self.size_index >= self.outer_capacities.last_index() {
            return;
        }
        let old_capacity = self.capacity();
        self.size_index += 1;
        let capacity = self.outer_capacities.get(self.size_index);
        debug!(
            "rehashing composite table from {old_capacity} to {capacity} outer slots \
             ({} outer keys, {} entries)",
            self.outer_count, self.total_count
        );

        let old = mem::replace(&mut self.slots, probe::empty_slots(capacity));
        for bucket in old.into_iter().flatten() {
            let home = self.outer_hasher.slot(&bucket.key, capacity);
            let pos = probe::vacant(&self.slots, home)
                .expect("grown outer array has a free slot for every outer key");
            let table = bucket.table.rebuild(&self.inner_hasher);
            self.slots[pos] = Some(Bucket { key: bucket.key, table });
        }
    }
}

// ---------------------------------------------------------------------------
// Trait impls
// ---------------------------------------------------------------------------

impl<K1, K2, V> Default for CompositeTable<K1, K2, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K1, K2, V, H1, H2> fmt::Debug for CompositeTable<K1, K2, V, H1, H2> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompositeTable")
            .field("len", &self.total_count)
            .field("outer_len", &self.outer_count)
            .field("capacity", &self.capacity())
            .finish_non_exhaustive()
    }
}

impl<'a, K1, K2, V, H1, H2> IntoIterator for &'a CompositeTable<K1, K2, V, H1, H2> {
    type Item = (&'a K1, &'a K2, &'a V);
    type IntoIter = Entries<'a, K1, K2, V>;

    fn into_iter(self) -> Entries<'a, K1, K2, V> {
        self.iter()
    }
}
