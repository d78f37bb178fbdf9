//! Removal: delete a leaf, then fold single-leaf nodes upward.

use log::debug;

use crate::node::{self, Node, Slot};

/// What a remove does to the shape of the tree, decided before anything is
/// touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collapse {
    /// The leaf's node keeps its own level.
    Stable,
    /// The leaf's node is left with one leaf and no children. It dissolves,
    /// together with every ancestor below depth `into` that held nothing but
    /// the path, and the surviving leaf moves up to the node at depth `into`.
    Into(usize),
}

/// A located key: the slot taken at each depth, and the collapse it causes.
pub struct Plan {
    /// `path[d]` is the slot followed in the node at depth `d`; the last
    /// entry holds the leaf.
    pub path: Vec<usize>,
    /// Shape change caused by the remove.
    pub collapse: Collapse,
}

/// Finds `key` below `root` and works out how far the collapse reaches.
pub fn plan<V>(root: &Node<V>, key: &str) -> Option<Plan> {
    let mut path = Vec::new();
    // lone[d]: the node at depth d holds only the child on the path.
    let mut lone = Vec::new();
    let mut node = root;
    loop {
        let pos = node::slot_index(key, node.level);
        path.push(pos);
        match &node.slots[pos] {
            Slot::Leaf(leaf) if leaf.key == key => break,
            Slot::Empty | Slot::Leaf(_) => return None,
            Slot::Child { node: child, .. } => {
                lone.push(node.direct_count == 0 && node.child_count == 1);
                node = child;
            }
        }
    }

    let depth = path.len() - 1;
    if depth == 0 || node.direct_count != 2 || node.child_count != 0 {
        return Some(Plan { path, collapse: Collapse::Stable });
    }
    let mut into = depth - 1;
    while into > 0 && lone[into] {
        into -= 1;
    }
    Some(Plan { path, collapse: Collapse::Into(into) })
}

/// Removes `key` from the tree rooted at `root` and returns its value.
///
/// A collapse replaces the dissolving chain with its surviving leaf in one
/// step. The chain is detached first, so it is dropped as a unit.
pub fn remove_key<V>(root: &mut Node<V>, key: &str) -> Option<V> {
    let Plan { path, collapse } = plan(root, key)?;
    let depth = path.len() - 1;

    match collapse {
        Collapse::Stable => {
            let node = descend_mut(root, &path[..depth])?;
            node.take_leaf(path[depth]).map(|leaf| leaf.value)
        }
        Collapse::Into(into) => {
            let parent = descend_mut(root, &path[..into])?;
            let pos = path[into];
            let mut chain = parent.take_child(pos)?;
            let bottom = descend_mut(&mut chain, &path[into + 1..depth])?;
            let removed = bottom.take_leaf(path[depth])?;
            let survivor = bottom.take_single_leaf()?;
            debug!(
                "collapsing levels {}..={depth} into slot {pos} at level {}: {:?}",
                into + 1,
                parent.level,
                survivor.key
            );
            parent.slots[pos] = Slot::Leaf(survivor);
            parent.direct_count += 1;
            Some(removed.value)
        }
    }
}

/// Follows `path` down from `node`.
fn descend_mut<'a, V>(mut node: &'a mut Node<V>, path: &[usize]) -> Option<&'a mut Node<V>> {
    for &pos in path {
        node = node.child_mut(pos)?;
    }
    Some(node)
}
