//! Radix table operations. Each one walks the tree with a loop, one level
//! per step.

pub mod get;
pub mod insert;
pub mod remove;
