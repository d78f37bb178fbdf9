//! Lookups follow one slot per level until a leaf decides.

use crate::node::{self, Node, Slot};

/// Searches for `key` below `root`.
pub fn lookup<'a, V>(root: &'a Node<V>, key: &str) -> Option<&'a V> {
    let mut node = root;
    loop {
        match &node.slots[node::slot_index(key, node.level)] {
            Slot::Empty => return None,
            Slot::Leaf(leaf) => return (leaf.key == key).then_some(&leaf.value),
            Slot::Child { node: child, .. } => node = child,
        }
    }
}

/// Mutable variant of [`lookup`].
pub fn lookup_mut<'a, V>(root: &'a mut Node<V>, key: &str) -> Option<&'a mut V> {
    let mut node = root;
    loop {
        let pos = node::slot_index(key, node.level);
        match &mut node.slots[pos] {
            Slot::Empty => return None,
            Slot::Leaf(leaf) => return (leaf.key == key).then_some(&mut leaf.value),
            Slot::Child { node: child, .. } => node = child,
        }
    }
}

/// Appends the slot taken at each level on the way to `key`.
///
/// Returns `false` if the walk ends on an empty slot or a different key;
/// `path` then holds the slots visited so far.
pub fn location<V>(root: &Node<V>, key: &str, path: &mut Vec<usize>) -> bool {
    let mut node = root;
    loop {
        let pos = node::slot_index(key, node.level);
        path.push(pos);
        match &node.slots[pos] {
            Slot::Empty => return false,
            Slot::Leaf(leaf) => return leaf.key == key,
            Slot::Child { node: child, .. } => node = child,
        }
    }
}

/// Descends to the subtree holding every key that starts with `prefix`.
///
/// Returns the node whose level equals `prefix.len()`, or the single leaf
/// met earlier, or `None` if no key can match.
pub fn prefix_subtree<'a, V>(root: &'a Node<V>, prefix: &str) -> Option<PrefixMatch<'a, V>> {
    let mut node = root;
    loop {
        if node.level >= prefix.len() {
            return Some(PrefixMatch::Subtree(node));
        }
        match &node.slots[node::slot_index(prefix, node.level)] {
            Slot::Empty => return None,
            Slot::Leaf(leaf) => {
                return leaf
                    .key
                    .starts_with(prefix)
                    .then_some(PrefixMatch::Leaf(leaf.key.as_str()));
            }
            Slot::Child { node: child, .. } => node = child,
        }
    }
}

/// Where a prefix search ended.
pub enum PrefixMatch<'a, V> {
    /// Every key below this node shares the prefix.
    Subtree(&'a Node<V>),
    /// Only this key can share the prefix.
    Leaf(&'a str),
}
