//! Epoch-based guard implementation using crossbeam-epoch.
//!
//! # Design
//!
//! `EpochGuard` is a zero-sized type: all state lives in the global epoch
//! collector. Sets parameterized with it get epoch-based reclamation:
//!
//! ```text
//! SortedSet<i32, EpochGuard>
//!     │
//!     └── Uses crossbeam-epoch for memory safety
//! ```
//!
//! Every public set operation pins the calling thread for its duration; a
//! node spliced out of the chain is deferred to the collector and freed only
//! after every thread pinned at splice time has unpinned. That closes the
//! use-after-free window of an in-flight traversal still holding the node,
//! and with it the ABA case where a recycled allocation could impersonate an
//! expected CAS word.

use crossbeam_epoch::{self as epoch, Guard as CrossbeamGuard};

use anemone_core::guard::Guard;

/// Epoch-based memory reclamation guard.
///
/// # Performance
///
/// - **Pin overhead**: very low (thread-local check)
/// - **Reclamation**: batched, amortized O(1) per node
/// - **Memory**: unlinked nodes may accumulate while threads stay pinned
///
#[derive(Clone, Copy, Default)]
pub struct EpochGuard {
    // Zero-sized - all state is in the global epoch collector
}

impl EpochGuard {
    pub fn new() -> Self {
        EpochGuard {}
    }
}

impl Guard for EpochGuard {
    /// An actual pinned crossbeam guard, held for the duration of each set
    /// operation.
    type ReadGuard = CrossbeamGuard;

    fn pin() -> Self::ReadGuard {
        epoch::pin()
    }

    unsafe fn defer_destroy<N>(&self, node: *mut N, dealloc: unsafe fn(*mut N)) {
        // Pin, schedule, unpin: the destruction runs once all threads have
        // advanced past the current epoch.
        let guard = epoch::pin();
        unsafe {
            guard.defer_unchecked(move || {
                dealloc(node);
            });
        }
    }
}
