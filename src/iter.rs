//! Iterator types for the table engines.

use std::slice;

use crate::composite::Bucket;
use crate::node::{self, Node, Slot};
use crate::raw::Entry;

/// Iterator over `(&K, &V)` pairs of a single-level table, in slot order.
pub struct Iter<'a, K, V> {
    slots: slice::Iter<'a, Option<Entry<K, V>>>,
}

impl<'a, K, V> Iter<'a, K, V> {
    /// Creates an iterator over a slot array, skipping empty slots.
    pub fn new(slots: &'a [Option<Entry<K, V>>]) -> Self {
        Self { slots: slots.iter() }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        self.slots
            .by_ref()
            .flatten()
            .next()
            .map(|e| (&e.key, &e.value))
    }
}

/// Iterator over the outer keys of a [`CompositeTable`](crate::CompositeTable).
pub struct OuterKeys<'a, K1, K2, V> {
    buckets: slice::Iter<'a, Option<Bucket<K1, K2, V>>>,
}

impl<'a, K1, K2, V> OuterKeys<'a, K1, K2, V> {
    /// Creates an iterator over an outer slot array.
    pub fn new(buckets: &'a [Option<Bucket<K1, K2, V>>]) -> Self {
        Self {
            buckets: buckets.iter(),
        }
    }
}

impl<'a, K1, K2, V> Iterator for OuterKeys<'a, K1, K2, V> {
    type Item = &'a K1;

    fn next(&mut self) -> Option<Self::Item> {
        self.buckets.by_ref().flatten().next().map(|b| &b.key)
    }
}

/// Iterator over every `(&K1, &K2, &V)` entry of a
/// [`CompositeTable`](crate::CompositeTable).
pub struct Entries<'a, K1, K2, V> {
    buckets: slice::Iter<'a, Option<Bucket<K1, K2, V>>>,
    current: Option<(&'a K1, Iter<'a, K2, V>)>,
}

impl<'a, K1, K2, V> Entries<'a, K1, K2, V> {
    /// Creates an iterator over an outer slot array.
    pub fn new(buckets: &'a [Option<Bucket<K1, K2, V>>]) -> Self {
        Self {
            buckets: buckets.iter(),
            current: None,
        }
    }
}

impl<'a, K1, K2, V> Iterator for Entries<'a, K1, K2, V> {
    type Item = (&'a K1, &'a K2, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some((key1, inner)) = &mut self.current {
                if let Some((key2, value)) = inner.next() {
                    return Some((*key1, key2, value));
                }
            }
            let bucket = self.buckets.by_ref().flatten().next()?;
            self.current = Some((&bucket.key, bucket.table.iter()));
        }
    }
}

/// Iterator over `(&str, &V)` pairs of a [`RadixTable`](crate::RadixTable)
/// in lexicographic key order.
///
/// Walks the tree depth-first with an explicit stack of `(node, cursor)`
/// frames, where the cursor indexes [`node::SORTED_SLOTS`].
pub struct SortedIter<'a, V> {
    stack: Vec<(&'a Node<V>, usize)>,
    remaining: usize,
}

impl<'a, V> SortedIter<'a, V> {
    /// Creates an iterator over every leaf under `root`.
    pub fn new(root: &'a Node<V>) -> Self {
        Self {
            stack: vec![(root, 0)],
            remaining: root.len(),
        }
    }
}

impl<'a, V> Iterator for SortedIter<'a, V> {
    type Item = (&'a str, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let (node, cursor) = self.stack.last_mut()?;
            let Some(&pos) = node::SORTED_SLOTS.get(*cursor) else {
                self.stack.pop();
                continue;
            };
            *cursor += 1;
            let node = *node;
            match &node.slots[pos] {
                Slot::Empty => {}
                Slot::Leaf(leaf) => {
                    self.remaining -= 1;
                    return Some((leaf.key.as_str(), &leaf.value));
                }
                Slot::Child { node: child, .. } => self.stack.push((&**child, 0)),
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<V> ExactSizeIterator for SortedIter<'_, V> {}
