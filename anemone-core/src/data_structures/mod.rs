//! Concurrent set data structures.
//!
//! # Organization
//!
//! - [`sorted`] - the lock-free sorted set
//! - [`internal`] - implementation details (stamped pointers, the set trait)

pub(crate) mod internal;
pub mod sorted;

// Re-exports for convenience.
// StampedPtr stays pub(crate) - truly internal implementation detail.
// ConcurrentSet and SetNode are pub for external guard crates.
pub use internal::{ConcurrentSet, SetNode};
pub use sorted::{SortedSet, SortedSetNode};

pub(crate) use internal::{DELETED, LIVE, StampedPtr};
