//! Mountain registry grouped by difficulty, built on [`CompositeTable`].

use std::cmp::Ordering;

use crate::composite::CompositeTable;
use crate::config::Capacities;
use crate::error::Result;
use crate::hasher::{PolynomialHasher, SlotHasher};

/// A mountain on a trail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mountain {
    /// Display name, unique within a difficulty level.
    pub name: String,
    /// Difficulty level.
    pub difficulty: u32,
    /// Length of the climb.
    pub length: u32,
}

impl Mountain {
    /// Creates a mountain.
    #[must_use]
    pub fn new(name: impl Into<String>, difficulty: u32, length: u32) -> Self {
        Self {
            name: name.into(),
            difficulty,
            length,
        }
    }
}

/// Orders by difficulty, then name, then length.
impl Ord for Mountain {
    fn cmp(&self, other: &Self) -> Ordering {
        self.difficulty
            .cmp(&other.difficulty)
            .then_with(|| self.name.cmp(&other.name))
            .then_with(|| self.length.cmp(&other.length))
    }
}

impl PartialOrd for Mountain {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Maps an integer difficulty straight onto the outer array.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DifficultyHasher;

impl SlotHasher<u32> for DifficultyHasher {
    fn slot(&self, key: &u32, capacity: usize) -> usize {
        *key as usize % capacity
    }
}

/// Mountains keyed by `(difficulty, name)`.
#[derive(Debug)]
pub struct MountainRegistry {
    mountains: CompositeTable<u32, String, Mountain, DifficultyHasher, PolynomialHasher>,
}

impl MountainRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacities(Capacities::default(), Capacities::default())
    }

    /// Creates an empty registry with custom outer (difficulty) and inner
    /// (name) size sequences.
    #[must_use]
    pub fn with_capacities(difficulties: Capacities, names: Capacities) -> Self {
        Self {
            mountains: CompositeTable::with_hashers(
                difficulties,
                names,
                DifficultyHasher,
                PolynomialHasher::default(),
            ),
        }
    }

    /// Number of mountains.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.mountains.len()
    }

    /// Returns `true` if no mountains are registered.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.mountains.is_empty()
    }

    /// Returns `true` if a mountain with this difficulty and name is registered.
    #[must_use]
    pub fn contains(&self, mountain: &Mountain) -> bool {
        self.mountains
            .contains_key(&mountain.difficulty, mountain.name.as_str())
    }

    /// Registers `mountain`, replacing one with the same difficulty and name.
    ///
    /// # Errors
    ///
    /// [`TableFull`](crate::TableError::TableFull) if the registry cannot
    /// grow any further.
    pub fn add_mountain(&mut self, mountain: Mountain) -> Result<()> {
        self.mountains
            .insert(mountain.difficulty, mountain.name.clone(), mountain)?;
        Ok(())
    }

    /// Unregisters `mountain` and returns the stored copy.
    ///
    /// # Errors
    ///
    /// [`KeyNotFound`](crate::TableError::KeyNotFound) if it is not registered.
    pub fn remove_mountain(&mut self, mountain: &Mountain) -> Result<Mountain> {
        self.mountains
            .remove(&mountain.difficulty, mountain.name.as_str())
    }

    /// Replaces `old` with `new`, which may change difficulty or name.
    ///
    /// # Errors
    ///
    /// [`KeyNotFound`](crate::TableError::KeyNotFound) if `old` is not
    /// registered, or [`TableFull`](crate::TableError::TableFull) if `new`
    /// cannot be stored; `old` is then put back.
    pub fn edit_mountain(&mut self, old: &Mountain, new: Mountain) -> Result<()> {
        let previous = self.remove_mountain(old)?;
        if let Err(err) = self.add_mountain(new) {
            self.add_mountain(previous)?;
            return Err(err);
        }
        Ok(())
    }

    /// Mountains of one difficulty, sorted by name. Empty if there are none.
    #[must_use]
    pub fn mountains_with_difficulty(&self, difficulty: u32) -> Vec<&Mountain> {
        let mut found: Vec<&Mountain> = self
            .mountains
            .inner_values(&difficulty)
            .map(|values| values.collect())
            .unwrap_or_default();
        found.sort();
        found
    }

    /// Every mountain, grouped by difficulty in ascending order.
    #[must_use]
    pub fn group_by_difficulty(&self) -> Vec<Vec<&Mountain>> {
        let mut difficulties: Vec<u32> = self.mountains.keys().copied().collect();
        difficulties.sort_unstable();
        difficulties
            .into_iter()
            .map(|difficulty| self.mountains_with_difficulty(difficulty))
            .collect()
    }
}

impl Default for MountainRegistry {
    fn default() -> Self {
        Self::new()
    }
}
