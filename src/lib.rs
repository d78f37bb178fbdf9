//! Associative-array engines for a hiking-trail editor.
//!
//! Two independent engines:
//!
//! - [`CompositeTable`]: a two-level open-addressing hash table keyed by
//!   `(outer, inner)` pairs. Every outer slot owns a private inner
//!   [`RawTable`](raw::RawTable); both levels use linear probing, grow through
//!   a fixed [`Capacities`] sequence, and repair their probe clusters on
//!   delete instead of leaving tombstones. [`FlatTable`] is the single-level
//!   engine on its own.
//! - [`RadixTable`]: a recursively subdividing table keyed by the
//!   characters of a string key. Colliding keys are pushed into a child
//!   node keyed on the next character; deletes fold single-key children
//!   back into their parents, keeping the shape canonical.
//!
//! [`MountainRegistry`] groups mountains by difficulty on top of a
//! [`CompositeTable`] with a custom [`SlotHasher`].
//!
//! # Key properties
//!
//! - **Exclusive ownership**: sub-tables live in their parent's slot array
//! - **No tombstones**: linear-probing deletes re-seat the rest of the cluster
//! - **Reportable exhaustion**: [`TableError::TableFull`] instead of a panic
//! - **Stack-safe depth**: radix operations loop one level at a time, so
//!   long shared prefixes never overflow the call stack
//! - **Zero `unsafe`**: enforced by `#![forbid(unsafe_code)]`
//!
//! None of the engines is synchronized; callers sharing one across threads
//! must serialize access themselves.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod hasher;
pub mod iter;
pub mod node;
pub mod probe;
pub mod raw;
pub mod registry;

mod composite;
mod flat;
mod ops;
mod radix;

#[cfg(test)]
mod tests;

pub use composite::CompositeTable;
pub use config::Capacities;
pub use error::{Result, TableError};
pub use flat::FlatTable;
pub use hasher::{PolynomialHasher, SlotHasher};
pub use radix::RadixTable;
pub use registry::{Mountain, MountainRegistry};
