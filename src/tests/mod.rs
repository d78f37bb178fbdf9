mod composite;
mod config;
mod traits;

use crate::hasher::SlotHasher;

/// Sends every key to the same home slot, forcing one long collision cluster.
#[derive(Debug, Clone, Copy)]
pub struct FixedHasher(pub usize);

impl<K: ?Sized> SlotHasher<K> for FixedHasher {
    fn slot(&self, _key: &K, capacity: usize) -> usize {
        self.0 % capacity
    }
}
