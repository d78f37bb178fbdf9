//! Error type shared by every table engine.

use thiserror::Error;

/// Result alias for table operations.
pub type Result<T> = std::result::Result<T, TableError>;

/// Failure of a table operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    /// The key (or, for two-level lookups, either half of it) is absent.
    #[error("key not found")]
    KeyNotFound,
    /// Probing visited every slot without finding room for a new key.
    #[error("table full: no free slot among {capacity} slots")]
    TableFull {
        /// Capacity of the array that ran out of room.
        capacity: usize,
    },
    /// A capacity sequence was rejected at construction.
    #[error("invalid capacity sequence: {0}")]
    InvalidCapacities(&'static str),
    /// A radix key contained a character outside `a..=z`.
    #[error("unsupported character {ch:?} in key {key:?}")]
    UnsupportedCharacter {
        /// The rejected key.
        key: String,
        /// First offending character.
        ch: char,
    },
}
