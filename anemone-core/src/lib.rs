#![allow(dead_code)]

pub mod common_tests;
pub mod data_structures;
pub mod guard;

// Re-export the main types for convenience
pub use data_structures::{ConcurrentSet, SetNode, SortedSet};
pub use guard::{DeferredGuard, Guard};
