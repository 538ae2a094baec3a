//! Deferred guard implementation for testing.

use std::sync::Mutex;

use super::Guard;

/// A guard that defers all node destruction until it is dropped.
///
/// Useful for tests and short-lived sets where predictable destruction timing
/// matters more than bounded memory. Not suitable for long-running processes:
/// unlinked nodes accumulate until the owning set drops.
///
/// # Thread Safety
///
/// Nodes are collected under a `Mutex` so any thread can defer; the lock is
/// only taken on the (cold) reclamation path, never during traversal.
///
pub struct DeferredGuard {
    deferred: Mutex<Vec<DeferredNode>>,
}

struct DeferredNode {
    ptr: *mut (),
    dealloc: unsafe fn(*mut ()),
}

// Safety: DeferredNode is only a pointer plus its deallocation function;
// access is synchronized by the Mutex.
unsafe impl Send for DeferredNode {}

impl DeferredGuard {
    pub fn new() -> Self {
        DeferredGuard {
            deferred: Mutex::new(Vec::new()),
        }
    }

    /// Number of nodes currently awaiting destruction.
    pub fn pending(&self) -> usize {
        self.deferred.lock().unwrap().len()
    }
}

impl Default for DeferredGuard {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for DeferredGuard {
    fn drop(&mut self) {
        let nodes = self.deferred.get_mut().unwrap();

        #[cfg(debug_assertions)]
        {
            // A node may be deferred at most once; duplicates here mean a
            // double splice upstream.
            let mut seen = std::collections::HashSet::new();
            for node in nodes.iter() {
                assert!(
                    seen.insert(node.ptr as usize),
                    "node {:#x} deferred twice",
                    node.ptr as usize
                );
            }
        }

        for node in nodes.drain(..) {
            unsafe {
                (node.dealloc)(node.ptr);
            }
        }
    }
}

impl Guard for DeferredGuard {
    /// No-op: all nodes stay valid until the set's stored guard drops.
    type ReadGuard = ();

    fn pin() -> Self::ReadGuard {}

    unsafe fn defer_destroy<N>(&self, node: *mut N, dealloc: unsafe fn(*mut N)) {
        let node = DeferredNode {
            ptr: node as *mut (),
            dealloc: unsafe {
                std::mem::transmute::<unsafe fn(*mut N), unsafe fn(*mut ())>(dealloc)
            },
        };
        self.deferred.lock().unwrap().push(node);
    }
}
