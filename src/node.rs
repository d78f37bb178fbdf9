//! Radix table node types and slot mapping helpers.

use std::fmt;

use crate::error::{Result, TableError};

/// Letter slots per node.
pub const LETTERS: usize = 26;

/// Slots per node: one per letter plus the terminal slot.
pub const ALPHABET_SIZE: usize = LETTERS + 1;

/// Slot for keys that are exhausted at a node's level.
pub const TERMINAL: usize = ALPHABET_SIZE - 1;

/// Slot of `'a'`. Walking letter slots from here visits `a..=z` in order.
pub const ROTATION: usize = b'a' as usize % LETTERS;

/// A key-value pair stored directly in a slot.
pub struct Leaf<V> {
    /// Full key, not just the remainder below this level.
    pub key: String,
    /// The value.
    pub value: V,
}

/// Contents of one node slot.
pub enum Slot<V> {
    /// Nothing stored.
    Empty,
    /// A single key stored directly.
    Leaf(Leaf<V>),
    /// Two or more keys sharing this slot, disambiguated one level down.
    Child {
        /// Character consumed to reach the child, `None` below a terminal slot.
        edge: Option<char>,
        /// The owned sub-table.
        node: Box<Node<V>>,
    },
}

// Manual impl: a derive would demand `V: Default`.
impl<V> Default for Slot<V> {
    fn default() -> Self {
        Self::Empty
    }
}

/// One level of a radix table.
///
/// Invariant: a non-root node never holds exactly one leaf and no children
/// once a remove has returned; such a node is folded into its parent slot.
///
/// No operation recurses per level, so key length is bounded by memory
/// rather than by stack depth.
pub struct Node<V> {
    /// Number of leading key characters consumed by ancestors.
    pub level: usize,
    /// Slots indexed by [`slot_index`].
    pub slots: [Slot<V>; ALPHABET_SIZE],
    /// Slots holding a [`Slot::Leaf`].
    pub direct_count: usize,
    /// Slots holding a [`Slot::Child`].
    pub child_count: usize,
}

// ---------------------------------------------------------------------------
// Slot mapping
// ---------------------------------------------------------------------------

/// Slot of `key` at depth `level`.
///
/// Letters map to `byte % 26`; a key with no character at `level` maps to
/// [`TERMINAL`].
#[inline]
#[must_use]
pub fn slot_index(key: &str, level: usize) -> usize {
    key.as_bytes()
        .get(level)
        .map_or(TERMINAL, |&b| usize::from(b) % LETTERS)
}

/// Slots in key order: the terminal slot, then `a` through `z`.
pub const SORTED_SLOTS: [usize; ALPHABET_SIZE] = {
    let mut order = [TERMINAL; ALPHABET_SIZE];
    let mut i = 0;
    while i < LETTERS {
        order[i + 1] = (ROTATION + i) % LETTERS;
        i += 1;
    }
    order
};

/// Character consumed when stepping from `level` to `level + 1`.
#[must_use]
pub fn edge_at(key: &str, level: usize) -> Option<char> {
    key.as_bytes().get(level).map(|&b| char::from(b))
}

/// Rejects keys that cannot be told apart by the slot mapping.
///
/// # Errors
///
/// [`TableError::UnsupportedCharacter`] for the first character outside
/// `a..=z`.
pub fn validate_key(key: &str) -> Result<()> {
    match key.chars().find(|ch| !ch.is_ascii_lowercase()) {
        Some(ch) => Err(TableError::UnsupportedCharacter {
            key: key.to_owned(),
            ch,
        }),
        None => Ok(()),
    }
}

// ---------------------------------------------------------------------------
// Node accessors
// ---------------------------------------------------------------------------

impl<V> Node<V> {
    /// Creates an empty node at depth `level`.
    #[must_use]
    pub fn new(level: usize) -> Self {
        Self {
            level,
            slots: std::array::from_fn(|_| Slot::Empty),
            direct_count: 0,
            child_count: 0,
        }
    }

    /// Returns `true` if the node should be folded into its parent.
    #[must_use]
    pub const fn is_collapsible(&self) -> bool {
        self.direct_count == 1 && self.child_count == 0
    }

    /// Returns `true` if the node holds nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.direct_count == 0 && self.child_count == 0
    }

    /// Mutable child node in slot `pos`.
    pub fn child_mut(&mut self, pos: usize) -> Option<&mut Self> {
        match &mut self.slots[pos] {
            Slot::Child { node, .. } => Some(node),
            Slot::Empty | Slot::Leaf(_) => None,
        }
    }

    /// Child nodes, in slot order.
    pub fn children(&self) -> impl Iterator<Item = &Self> {
        self.slots.iter().filter_map(|slot| match slot {
            Slot::Child { node, .. } => Some(&**node),
            Slot::Empty | Slot::Leaf(_) => None,
        })
    }

    /// Takes the leaf out of slot `pos`. Any other slot is left as it was.
    pub fn take_leaf(&mut self, pos: usize) -> Option<Leaf<V>> {
        match std::mem::take(&mut self.slots[pos]) {
            Slot::Leaf(leaf) => {
                self.direct_count -= 1;
                Some(leaf)
            }
            other => {
                self.slots[pos] = other;
                None
            }
        }
    }

    /// Detaches the child node in slot `pos`. Any other slot is left as it was.
    pub fn take_child(&mut self, pos: usize) -> Option<Box<Self>> {
        match std::mem::take(&mut self.slots[pos]) {
            Slot::Child { node, .. } => {
                self.child_count -= 1;
                Some(node)
            }
            other => {
                self.slots[pos] = other;
                None
            }
        }
    }

    /// Removes and returns the only leaf of a collapsible node.
    pub fn take_single_leaf(&mut self) -> Option<Leaf<V>> {
        if !self.is_collapsible() {
            return None;
        }
        let pos = self.slots.iter().position(|s| matches!(s, Slot::Leaf(_)))?;
        self.take_leaf(pos)
    }

    /// Number of keys in this subtree.
    #[must_use]
    pub fn len(&self) -> usize {
        let mut total = 0;
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            total += node.direct_count;
            stack.extend(node.children());
        }
        total
    }

    /// Deepest level reached by any node of this subtree.
    #[must_use]
    pub fn depth(&self) -> usize {
        let mut deepest = self.level;
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            deepest = deepest.max(node.level);
            stack.extend(node.children());
        }
        deepest
    }
}

/// Drops the subtree without recursion: child boxes are detached onto a work
/// list before each node goes.
impl<V> Drop for Node<V> {
    fn drop(&mut self) {
        let mut pending: Vec<Box<Self>> = Vec::new();
        let detach = |node: &mut Self, pending: &mut Vec<Box<Self>>| {
            for slot in &mut node.slots {
                if let Slot::Child { node: child, .. } = std::mem::take(slot) {
                    pending.push(child);
                }
            }
        };
        detach(self, &mut pending);
        while let Some(mut node) = pending.pop() {
            detach(&mut *node, &mut pending);
        }
    }
}

// ---------------------------------------------------------------------------
// Tree dump
// ---------------------------------------------------------------------------

impl<V: fmt::Debug> Node<V> {
    /// Writes the subtree in key order, one slot per line, children indented
    /// four spaces deeper than their parent.
    pub fn write_tree(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut stack: Vec<(&Self, usize)> = vec![(self, 0)];
        loop {
            let indent = stack.len().saturating_sub(1) * 4;
            let Some((node, cursor)) = stack.last_mut() else {
                return Ok(());
            };
            let Some(&pos) = SORTED_SLOTS.get(*cursor) else {
                stack.pop();
                continue;
            };
            *cursor += 1;
            let node = *node;
            match &node.slots[pos] {
                Slot::Empty => {}
                Slot::Leaf(leaf) => {
                    writeln!(f, "{:indent$}[{pos}] {} = {:?}", "", leaf.key, leaf.value)?;
                }
                Slot::Child { edge, node: child } => {
                    let edge = edge.map_or_else(|| "$".to_owned(), String::from);
                    writeln!(f, "{:indent$}[{pos}] {edge}* ({})", "", child.len())?;
                    stack.push((&**child, 0));
                }
            }
        }
    }
}
