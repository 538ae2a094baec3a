//! The lock-free sorted set.
//!
//! Parameterized by a guard type `G: Guard` that determines the memory
//! reclamation strategy:
//!
//! - `DeferredGuard`: testing - defers destruction until the set drops
//! - `EpochGuard`: production - epoch-based reclamation (anemone-crossbeam)

pub mod sorted_set;

pub use sorted_set::{SortedSet, SortedSetNode};
