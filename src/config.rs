//! Capacity sequences for the open-addressing engines.

use std::fmt;
use std::sync::Arc;

use crate::error::{Result, TableError};

/// Default growth sequence. Enough headroom for roughly a million entries.
pub const DEFAULT_TABLE_SIZES: [usize; 19] = [
    5, 13, 29, 53, 97, 193, 389, 769, 1543, 3079, 6151, 12289, 24593, 49157, 98317, 196613,
    393241, 786433, 1572869,
];

/// Ascending sequence of slot-array sizes a table grows through.
///
/// Immutable once built, so clones handed to different tables can never
/// alias a mutation.
#[derive(Clone, PartialEq, Eq)]
pub struct Capacities(Arc<[usize]>);

impl Capacities {
    /// Validates and wraps a size sequence.
    ///
    /// # Errors
    ///
    /// [`TableError::InvalidCapacities`] if `sizes` is empty, not strictly
    /// ascending, or contains a size below 2.
    pub fn new(sizes: impl Into<Vec<usize>>) -> Result<Self> {
        let sizes = sizes.into();
        if sizes.is_empty() {
            return Err(TableError::InvalidCapacities("sequence is empty"));
        }
        if sizes.iter().any(|&size| size < 2) {
            return Err(TableError::InvalidCapacities("every size must be at least 2"));
        }
        if sizes.windows(2).any(|pair| pair[0] >= pair[1]) {
            return Err(TableError::InvalidCapacities("sizes must be strictly ascending"));
        }
        Ok(Self(sizes.into()))
    }

    /// Size at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is past [`last_index`](Self::last_index).
    #[must_use]
    pub fn get(&self, index: usize) -> usize {
        self.0[index]
    }

    /// Number of sizes in the sequence.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always `false`: construction rejects empty sequences.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Index of the largest size.
    #[must_use]
    pub fn last_index(&self) -> usize {
        self.0.len() - 1
    }

    /// The sizes as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }
}

impl Default for Capacities {
    fn default() -> Self {
        Self(Arc::from(DEFAULT_TABLE_SIZES.as_slice()))
    }
}

impl fmt::Debug for Capacities {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.0.iter()).finish()
    }
}
