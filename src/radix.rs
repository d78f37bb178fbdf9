//! Subdividing hash table over string keys.

use std::fmt;
use std::ops;

use crate::error::{Result, TableError};
use crate::iter::SortedIter;
use crate::node::{self, Leaf, Node};
use crate::ops::get::{self, PrefixMatch};
use crate::ops::insert::insert_leaf;
use crate::ops::remove::remove_key;

/// Hash table whose node at depth `d` is keyed by the `d`-th character of
/// the key.
///
/// Each node has one slot per letter plus a terminal slot for keys that end
/// at that depth. A slot holds a single key directly until a second key
/// lands on it; the pair is then pushed into a child node keyed on the next
/// character. Removing keys folds any child left with a single key back into
/// its parent, so the same key set always yields the same shape.
///
/// Keys are lowercase ASCII (`a..=z`).
pub struct RadixTable<V> {
    root: Node<V>,
}

// ---------------------------------------------------------------------------
// Construction & accessors
// ---------------------------------------------------------------------------

impl<V> RadixTable<V> {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self { root: Node::new(0) }
    }

    /// Number of keys, counted by walking every node.
    #[must_use]
    pub fn len(&self) -> usize {
        self.root.len()
    }

    /// Returns `true` if the table contains no keys.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.root.is_empty()
    }

    #[cfg(test)]
    pub(crate) const fn root(&self) -> &Node<V> {
        &self.root
    }

    /// Deepest node level in use; `0` when only the root exists.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.root.depth()
    }

    /// Returns the value stored under `key`.
    ///
    /// # Errors
    ///
    /// [`TableError::KeyNotFound`] if `key` is absent.
    pub fn get(&self, key: &str) -> Result<&V> {
        get::lookup(&self.root, key).ok_or(TableError::KeyNotFound)
    }

    /// Returns a mutable reference to the value stored under `key`.
    ///
    /// # Errors
    ///
    /// [`TableError::KeyNotFound`] if `key` is absent.
    pub fn get_mut(&mut self, key: &str) -> Result<&mut V> {
        get::lookup_mut(&mut self.root, key).ok_or(TableError::KeyNotFound)
    }

    /// Returns `true` if `key` is stored.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_ok()
    }

    /// Slot indices visited from the root down to the slot holding `key`.
    ///
    /// # Errors
    ///
    /// [`TableError::KeyNotFound`] if the walk ends on an empty slot or on a
    /// different key.
    pub fn get_location(&self, key: &str) -> Result<Vec<usize>> {
        let mut path = Vec::new();
        if get::location(&self.root, key, &mut path) {
            Ok(path)
        } else {
            Err(TableError::KeyNotFound)
        }
    }

    /// Iterates `(&str, &V)` pairs in lexicographic key order.
    #[must_use]
    pub fn iter(&self) -> SortedIter<'_, V> {
        SortedIter::new(&self.root)
    }

    /// All keys in lexicographic order.
    #[must_use]
    pub fn sorted_keys(&self) -> Vec<String> {
        self.iter().map(|(k, _)| k.to_owned()).collect()
    }

    /// All keys starting with `prefix`, in lexicographic order.
    ///
    /// A prefix with characters outside `a..=z` matches nothing.
    #[must_use]
    pub fn keys_with_prefix(&self, prefix: &str) -> Vec<String> {
        if node::validate_key(prefix).is_err() {
            return Vec::new();
        }
        match get::prefix_subtree(&self.root, prefix) {
            None => Vec::new(),
            Some(PrefixMatch::Leaf(key)) => vec![key.to_owned()],
            Some(PrefixMatch::Subtree(subtree)) => SortedIter::new(subtree)
                .map(|(k, _)| k.to_owned())
                .collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// Write operations
// ---------------------------------------------------------------------------

impl<V> RadixTable<V> {
    /// Stores `value` under `key`, returning the value it replaced.
    ///
    /// # Errors
    ///
    /// [`TableError::UnsupportedCharacter`] if `key` has a character outside
    /// `a..=z`. The table is left unchanged.
    pub fn insert(&mut self, key: impl Into<String>, value: V) -> Result<Option<V>> {
        let key = key.into();
        node::validate_key(&key)?;
        Ok(insert_leaf(&mut self.root, Leaf { key, value }))
    }

    /// Removes `key` and returns its value, collapsing any node left with a
    /// single key.
    ///
    /// # Errors
    ///
    /// [`TableError::KeyNotFound`] if `key` is absent.
    pub fn remove(&mut self, key: &str) -> Result<V> {
        remove_key(&mut self.root, key).ok_or(TableError::KeyNotFound)
    }
}

// ---------------------------------------------------------------------------
// Trait impls
// ---------------------------------------------------------------------------

impl<V> Default for RadixTable<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> fmt::Debug for RadixTable<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RadixTable")
            .field("len", &self.len())
            .field("depth", &self.depth())
            .finish_non_exhaustive()
    }
}

impl<V: fmt::Debug> fmt::Display for RadixTable<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.root.write_tree(f)
    }
}

impl<V> ops::Index<&str> for RadixTable<V> {
    type Output = V;

    fn index(&self, key: &str) -> &V {
        self.get(key).expect("key not found")
    }
}

impl<'a, V> IntoIterator for &'a RadixTable<V> {
    type Item = (&'a str, &'a V);
    type IntoIter = SortedIter<'a, V>;

    fn into_iter(self) -> SortedIter<'a, V> {
        self.iter()
    }
}
