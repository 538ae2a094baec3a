//! Guard trait for memory reclamation strategies.
//!
//! A lock-free set unlinks nodes while other threads may still be traversing
//! them, so a node spliced out of the chain cannot be freed immediately. The
//! `Guard` trait abstracts over *when* it becomes safe:
//!
//! ```text
//! SortedSet<T, G: Guard>
//!     │
//!     ├── SortedSet<T, DeferredGuard>   (testing: freed when the set drops)
//!     └── SortedSet<T, EpochGuard>      (production: crossbeam-epoch, in
//!                                        the anemone-crossbeam crate)
//! ```
//!
//! # Safety Contract
//!
//! Implementations must ensure that a node passed to `defer_destroy` is not
//! freed while any `ReadGuard` pinned before the defer is still alive.

mod deferred_guard;

pub use deferred_guard::DeferredGuard;

/// A memory reclamation guard that protects concurrent access to nodes.
///
/// The guard stored in a set is used for deferred destruction scheduling.
/// Actual read protection (for epoch-based guards, thread pinning) happens
/// per-operation via `pin()`, not when the stored guard is created.
///
pub trait Guard: Sized + Default + Send + Sync {
    /// An active guard that protects reads for its lifetime.
    ///
    /// For epoch-based guards, this holds a pinned `crossbeam_epoch::Guard`.
    /// For deferred guards, this is `()` since protection is provided by the
    /// set's stored guard.
    ///
    type ReadGuard: Sized;

    /// Pin an active read guard.
    ///
    /// Every operation that dereferences nodes holds one of these for its
    /// duration.
    ///
    fn pin() -> Self::ReadGuard;

    /// Schedule an unlinked node for deferred destruction.
    ///
    /// # Safety
    ///
    /// - `node` must be a valid pointer previously allocated by the set
    /// - `node` must be unlinked (not reachable by a fresh traversal)
    /// - `dealloc` must be the correct deallocation function for `node`
    /// - must be called at most once per node
    ///
    unsafe fn defer_destroy<N>(&self, node: *mut N, dealloc: unsafe fn(*mut N));
}
