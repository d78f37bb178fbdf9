//! Insertion: promote a colliding leaf into a chain of child nodes.

use std::mem;

use log::debug;

use crate::node::{self, Leaf, Node, Slot};

/// Inserts `leaf` below `root`.
///
/// Returns the replaced value if the key was already present. The key must
/// have passed [`node::validate_key`], otherwise two distinct keys could keep
/// colliding at every depth.
pub fn insert_leaf<V>(root: &mut Node<V>, leaf: Leaf<V>) -> Option<V> {
    let mut node = root;
    let pos = loop {
        let pos = node::slot_index(&leaf.key, node.level);
        match node.slots[pos] {
            Slot::Child { node: ref mut child, .. } => node = child,
            Slot::Empty | Slot::Leaf(_) => break pos,
        }
    };

    match mem::take(&mut node.slots[pos]) {
        Slot::Empty => {
            node.slots[pos] = Slot::Leaf(leaf);
            node.direct_count += 1;
            None
        }
        Slot::Leaf(mut existing) if existing.key == leaf.key => {
            let old = mem::replace(&mut existing.value, leaf.value);
            node.slots[pos] = Slot::Leaf(existing);
            Some(old)
        }
        Slot::Leaf(existing) => {
            // Different key at same slot → push both down.
            let level = node.level;
            let edge = node::edge_at(&leaf.key, level);
            let child = split(level + 1, existing, leaf);
            node.direct_count -= 1;
            node.child_count += 1;
            node.slots[pos] = Slot::Child { edge, node: child };
            None
        }
        child @ Slot::Child { .. } => {
            node.slots[pos] = child;
            None
        }
    }
}

/// Builds the nodes separating two distinct keys that share every slot
/// above `level`.
///
/// The keys land in the first node where their slots differ; each level in
/// between gets a node holding only the next one.
fn split<V>(level: usize, a: Leaf<V>, b: Leaf<V>) -> Box<Node<V>> {
    let mut bottom = level;
    while node::slot_index(&a.key, bottom) == node::slot_index(&b.key, bottom) {
        bottom += 1;
    }
    debug!(
        "promoting {:?} and {:?} from level {} to level {bottom}",
        a.key,
        b.key,
        level - 1
    );

    let key = a.key.clone();
    let mut chain = Box::new(Node::new(bottom));
    let (pos_a, pos_b) = (node::slot_index(&a.key, bottom), node::slot_index(&b.key, bottom));
    chain.slots[pos_a] = Slot::Leaf(a);
    chain.slots[pos_b] = Slot::Leaf(b);
    chain.direct_count = 2;

    for above in (level..bottom).rev() {
        let mut parent = Box::new(Node::new(above));
        parent.slots[node::slot_index(&key, above)] = Slot::Child {
            edge: node::edge_at(&key, above),
            node: chain,
        };
        parent.child_count = 1;
        chain = parent;
    }
    chain
}
