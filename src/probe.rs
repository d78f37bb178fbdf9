//! Linear probing over a slot array, shared by the leaf engine and the
//! composite table's outer array.

use log::trace;

use crate::error::{Result, TableError};

/// Finds the slot for a key, starting at `home` and stepping forward.
///
/// Returns the first slot whose occupant satisfies `is_match`. When nothing
/// matches before an empty slot, an insert gets that empty slot and a lookup
/// gets [`TableError::KeyNotFound`]. At most `slots.len()` slots are visited.
///
/// # Errors
///
/// [`TableError::TableFull`] when an insert scans the whole array, and
/// [`TableError::KeyNotFound`] when a lookup misses.
pub fn probe<T>(
    slots: &[Option<T>],
    home: usize,
    is_match: impl Fn(&T) -> bool,
    for_insert: bool,
) -> Result<usize> {
    let capacity = slots.len();
    if capacity == 0 {
        return Err(if for_insert {
            TableError::TableFull { capacity }
        } else {
            TableError::KeyNotFound
        });
    }

    let mut pos = home % capacity;
    for _ in 0..capacity {
        match &slots[pos] {
            None if for_insert => return Ok(pos),
            None => return Err(TableError::KeyNotFound),
            Some(item) if is_match(item) => return Ok(pos),
            Some(_) => pos = (pos + 1) % capacity,
        }
    }

    if for_insert {
        Err(TableError::TableFull { capacity })
    } else {
        Err(TableError::KeyNotFound)
    }
}

/// First empty slot at or after `home`.
///
/// # Errors
///
/// [`TableError::TableFull`] if every slot is occupied.
pub fn vacant<T>(slots: &[Option<T>], home: usize) -> Result<usize> {
    probe(slots, home, |_| false, true)
}

/// Re-seats the contiguous run that follows a freshly emptied slot.
///
/// Clearing `freed` can cut the probe chain of any later occupant in the
/// same run, so each one is lifted out and placed again from its home slot,
/// in slot order. The walk stops at the first empty slot and never takes
/// more than `capacity - 1` steps. Returns the number of occupants that
/// ended up in a different slot.
pub fn repair_cluster<T>(
    slots: &mut [Option<T>],
    freed: usize,
    home_of: impl Fn(&T) -> usize,
) -> usize {
    let capacity = slots.len();
    let mut moved = 0;
    let mut pos = (freed + 1) % capacity.max(1);

    for _ in 1..capacity {
        let Some(item) = slots[pos].take() else {
            break;
        };
        // `pos` itself is vacant now, so this cannot come back full.
        let target = vacant(slots, home_of(&item)).unwrap_or(pos);
        if target != pos {
            moved += 1;
        }
        slots[target] = Some(item);
        pos = (pos + 1) % capacity;
    }

    trace!("cluster repair after slot {freed}: {moved} occupant(s) shifted");
    moved
}

/// Allocates `capacity` empty slots.
pub fn empty_slots<T>(capacity: usize) -> Vec<Option<T>> {
    std::iter::repeat_with(|| None).take(capacity).collect()
}
