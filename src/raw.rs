//! Open-addressing engine behind [`FlatTable`](crate::FlatTable) and the
//! inner tables of [`CompositeTable`](crate::CompositeTable).
//!
//! A `RawTable` does not own a hasher: every operation is handed one by the
//! caller. A standalone [`FlatTable`](crate::FlatTable) passes its own, while
//! a composite table passes its shared inner hasher, so an inner table never
//! has to capture anything about its owner.

use std::borrow::Borrow;
use std::mem;

use log::debug;

use crate::config::Capacities;
use crate::error::{Result, TableError};
use crate::hasher::SlotHasher;
use crate::iter::Iter;
use crate::probe;

/// A live key-value pair in a slot.
pub struct Entry<K, V> {
    /// The key.
    pub key: K,
    /// The value.
    pub value: V,
}

/// Linear-probing slot array that grows through a [`Capacities`] sequence.
pub struct RawTable<K, V> {
    slots: Vec<Option<Entry<K, V>>>,
    capacities: Capacities,
    size_index: usize,
    count: usize,
}

impl<K, V> RawTable<K, V> {
    /// Creates an empty table at the smallest capacity of `capacities`.
    #[must_use]
    pub fn new(capacities: Capacities) -> Self {
        let slots = probe::empty_slots(capacities.get(0));
        Self {
            slots,
            capacities,
            size_index: 0,
            count: 0,
        }
    }

    /// Number of live entries.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.count
    }

    /// Returns `true` if no entries are stored.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Current slot-array size.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Iterates live entries in slot order.
    #[must_use]
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter::new(&self.slots)
    }

    /// Consumes the table, yielding entries in slot order.
    pub fn into_entries(self) -> impl Iterator<Item = Entry<K, V>> {
        self.slots.into_iter().flatten()
    }
}

impl<K: Eq, V> RawTable<K, V> {
    /// Slot position holding `key`.
    fn position<Q, H>(&self, hasher: &H, key: &Q) -> Result<usize>
    where
        K: Borrow<Q>,
        Q: Eq + ?Sized,
        H: SlotHasher<Q>,
    {
        let home = hasher.slot(key, self.capacity());
        probe::probe(&self.slots, home, |e| <K as Borrow<Q>>::borrow(&e.key) == key, false)
    }

    /// Returns the value stored under `key`.
    ///
    /// # Errors
    ///
    /// [`TableError::KeyNotFound`] if `key` is absent.
    pub fn get<Q, H>(&self, hasher: &H, key: &Q) -> Result<&V>
    where
        K: Borrow<Q>,
        Q: Eq + ?Sized,
        H: SlotHasher<Q>,
    {
        let pos = self.position(hasher, key)?;
        self.slots[pos]
            .as_ref()
            .map(|e| &e.value)
            .ok_or(TableError::KeyNotFound)
    }

    /// Returns a mutable reference to the value stored under `key`.
    ///
    /// # Errors
    ///
    /// [`TableError::KeyNotFound`] if `key` is absent.
    pub fn get_mut<Q, H>(&mut self, hasher: &H, key: &Q) -> Result<&mut V>
    where
        K: Borrow<Q>,
        Q: Eq + ?Sized,
        H: SlotHasher<Q>,
    {
        let pos = self.position(hasher, key)?;
        self.slots[pos]
            .as_mut()
            .map(|e| &mut e.value)
            .ok_or(TableError::KeyNotFound)
    }

    /// Stores `value` under `key`, returning the value it replaced.
    ///
    /// Grows to the next capacity once more than half the slots are live.
    ///
    /// # Errors
    ///
    /// [`TableError::TableFull`] if no slot is free and the table is already
    /// at its largest capacity. The table is left untouched.
    pub fn insert<H: SlotHasher<K>>(&mut self, hasher: &H, key: K, value: V) -> Result<Option<V>> {
        let home = hasher.slot(&key, self.capacity());
        let pos = probe::probe(&self.slots, home, |e| e.key == key, true)?;

        let slot = &mut self.slots[pos];
        let old = if let Some(entry) = slot {
            Some(mem::replace(&mut entry.value, value))
        } else {
            *slot = Some(Entry { key, value });
            self.count += 1;
            None
        };

        if self.count * 2 > self.capacity() {
            self.grow(hasher);
        }
        Ok(old)
    }

    /// Removes `key`, returning its value, then repairs the cluster after it.
    ///
    /// # Errors
    ///
    /// [`TableError::KeyNotFound`] if `key` is absent.
    pub fn remove<Q, H>(&mut self, hasher: &H, key: &Q) -> Result<V>
    where
        K: Borrow<Q>,
        Q: Eq + ?Sized,
        H: SlotHasher<Q> + SlotHasher<K>,
    {
        let pos = self.position(hasher, key)?;
        let entry = self.slots[pos].take().ok_or(TableError::KeyNotFound)?;
        self.count -= 1;

        let capacity = self.capacity();
        probe::repair_cluster(&mut self.slots, pos, |e| {
            <H as SlotHasher<K>>::slot(hasher, &e.key, capacity)
        });
        Ok(entry.value)
    }

    /// Reconstructs the table at its current capacity, placing every entry
    /// afresh from its home slot.
    #[must_use]
    pub fn rebuild<H: SlotHasher<K>>(self, hasher: &H) -> Self {
        let capacity = self.capacity();
        let mut fresh = Self {
            slots: probe::empty_slots(capacity),
            capacities: self.capacities.clone(),
            size_index: self.size_index,
            count: 0,
        };
        fresh.place_all(hasher, self.into_entries());
        fresh
    }

    /// Moves to the next size in the sequence and re-places every entry.
    /// A table already at its largest size stays as it is.
    fn grow<H: SlotHasher<K>>(&mut self, hasher: &H) {
        if self.size_index >= self.capacities.last_index() {
            return;
        }
        let old_capacity = self.capacity();
        self.size_index += 1;
        let capacity = self.capacities.get(self.size_index);
        debug!("growing flat table from {old_capacity} to {capacity} slots ({} live)", self.count);

        let old = mem::replace(&mut self.slots, probe::empty_slots(capacity));
        self.count = 0;
        self.place_all(hasher, old.into_iter().flatten());
    }

    /// Places entries with distinct keys into the current slot array.
    fn place_all<H: SlotHasher<K>>(&mut self, hasher: &H, entries: impl Iterator<Item = Entry<K, V>>) {
        let capacity = self.capacity();
        for entry in entries {
            let pos = probe::vacant(&self.slots, hasher.slot(&entry.key, capacity))
                .expect("target array holds at least as many slots as entries");
            self.slots[pos] = Some(entry);
            self.count += 1;
        }
    }
}
