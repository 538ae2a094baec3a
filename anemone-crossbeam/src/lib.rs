//! Crossbeam-based memory reclamation for anemone sets.
//!
//! This crate provides `EpochGuard`, an implementation of the `Guard` trait
//! using crossbeam-epoch.
//!
//! # Usage
//!
//! ```ignore
//! use anemone_core::{ConcurrentSet, SortedSet};
//! use anemone_crossbeam::EpochGuard;
//!
//! let set: SortedSet<i32, EpochGuard> = SortedSet::new();
//! set.add(42);
//! ```

pub mod epoch_guard;

// Export the Guard implementation
pub use epoch_guard::EpochGuard;
