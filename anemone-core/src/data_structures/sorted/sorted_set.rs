use std::ptr;
use std::sync::atomic::{AtomicPtr, AtomicUsize, Ordering};

use crate::data_structures::ConcurrentSet;
use crate::data_structures::SetNode;
use crate::data_structures::{DELETED, LIVE, StampedPtr};
use crate::guard::Guard;

type NodePtr<T> = *mut SortedSetNode<T>;
type NextPtr<T> = StampedPtr<SortedSetNode<T>>;

///
/// Lock-free sorted set over an optimistic singly-linked chain with two-phase
/// deletion: a removal first flips the stamp on the victim's own
/// (successor, stamp) pair (logical delete), then makes one best-effort
/// attempt to splice the node out of the chain. Traversals finish the splice
/// for whoever lost that race.
///
// =============================================================================
// CHAIN STRUCTURE & DELETION PROTOCOL
// =============================================================================
//
// Chain (sorted ascending, permanent sentinel head):
// ┌──────┐    ┌──────┐    ┌──────┐    ┌──────┐    ┌──────┐
// │ HEAD │───►│  10  │───►│  20  │───►│  30  │───►│ NULL │
// │(sent)│    │      │    │      │    │      │    │      │
// └──────┘    └──────┘    └──────┘    └──────┘    └──────┘
//
// Every node's `next` field is one packed word holding the (successor, stamp)
// pair. stamp == DELETED on a node's OWN pair means that node is logically
// removed; the predecessor's pair stays clean.
//
// Phase 1: LOGICAL DELETE   CAS curr.next (succ, LIVE) -> (succ, DELETED)
// Phase 2: PHYSICAL SPLICE  CAS prev.next (curr, LIVE) -> (succ, LIVE)
//
// Phase 1 is the linearization point of `remove`; phase 2 is best-effort and
// may be completed by any later traversal.
//
// INVARIANTS:
// 1. Live values reachable from HEAD are strictly ascending, no duplicates
// 2. HEAD is never stamped and never removed
// 3. A stamped node is absent for `contains`, linked or not
// 4. A node's value never changes; only its own next pair is ever CASed
// 5. Exactly one CAS can splice a given node (the expected word (curr, LIVE)
//    exists only in its unique predecessor), so a node is handed to the
//    guard at most once
//
#[derive(Debug)]
pub struct SortedSetNode<T> {
    value: Option<T>,
    next: AtomicPtr<SortedSetNode<T>>,
}

impl<T> SortedSetNode<T> {
    fn new(value: T) -> Self {
        SortedSetNode {
            value: Some(value),
            next: AtomicPtr::new(ptr::null_mut()),
        }
    }

    fn new_sentinel() -> Self {
        SortedSetNode {
            value: None,
            next: AtomicPtr::new(ptr::null_mut()),
        }
    }

    fn is_sentinel(&self) -> bool {
        self.value.is_none()
    }

    // =========================================================================
    // (successor, stamp) pair accessors
    // =========================================================================

    /// Load the pair (Acquire ordering).
    #[inline]
    fn load_next(&self) -> NextPtr<T> {
        StampedPtr::from_raw(self.next.load(Ordering::Acquire))
    }

    /// Store the pair (Release ordering). Only used on unlinked nodes.
    #[inline]
    fn store_next(&self, next: NextPtr<T>) {
        self.next.store(next.raw(), Ordering::Release)
    }

    /// Joint CAS over the pair: fails if either the successor or the stamp
    /// differs from `expected` (Release/Relaxed ordering).
    #[inline]
    fn cas_next(&self, expected: NextPtr<T>, new: NextPtr<T>) -> Result<(), NextPtr<T>> {
        self.next
            .compare_exchange(
                expected.raw(),
                new.raw(),
                Ordering::Release,
                Ordering::Relaxed,
            )
            .map(|_| ())
            .map_err(StampedPtr::from_raw)
    }
}

impl<T> SetNode<T> for SortedSetNode<T> {
    fn value(&self) -> &T {
        self.value.as_ref().expect("sentinel head holds no value")
    }
}

// Adjacent nodes with prev.value < value <= curr.value.
// prev may be the sentinel; curr may be null (end of chain).
//
struct Interval<T> {
    prev: NodePtr<T>,
    curr: NodePtr<T>,
}

pub struct SortedSet<T, G: Guard> {
    head: AtomicPtr<SortedSetNode<T>>,
    /// Shared guard instance for deferred destruction.
    /// Spliced-out nodes are handed here and freed when the reclamation
    /// strategy decides no traversal can still observe them.
    guard: G,
    // Contention diagnostics: traversal restarts plus failed add/remove CAS
    // attempts. Relaxed on both ends; readers see a racy snapshot.
    retries: AtomicUsize,
}

impl<T, G> SortedSet<T, G>
where
    T: Eq + Ord,
    G: Guard,
{
    pub fn new() -> Self {
        // Permanent sentinel head without a value.
        //
        let head = Box::into_raw(Box::new(SortedSetNode::new_sentinel()));
        SortedSet {
            head: AtomicPtr::new(head),
            guard: G::default(),
            retries: AtomicUsize::new(0),
        }
    }

    /// Contention events so far: traversal restarts and failed CAS attempts
    /// in `add`/`remove`. Diagnostic only; there is no retry cap, capping
    /// would break the lock-free progress guarantee.
    pub fn retry_count(&self) -> usize {
        self.retries.load(Ordering::Relaxed)
    }

    // Core traversal: locate the interval for `value`, splicing out stamped
    // nodes met on the way.
    //
    // Any splice attempt, successful or not, restarts the traversal from the
    // head: after the CAS, `prev` may itself have been concurrently unlinked,
    // and restarting sidesteps validating it. Simplicity over throughput;
    // restarts are counted so the cost stays observable.
    //
    fn find_interval(&self, value: &T) -> Interval<T> {
        'restart: loop {
            let mut prev = self.head.load(Ordering::Acquire);
            let mut curr = unsafe { (*prev).load_next() }.ptr();

            loop {
                if curr.is_null() {
                    return Interval { prev, curr };
                }

                let next = unsafe { (*curr).load_next() };

                if next.is_stamped() {
                    // curr is logically deleted: one splice attempt.
                    //
                    let expected = StampedPtr::new(curr, LIVE);
                    let replacement = StampedPtr::new(next.ptr(), LIVE);

                    if unsafe { (*prev).cas_next(expected, replacement) }.is_ok() {
                        // curr is unreachable now; only this CAS could splice
                        // it, so it reaches the guard exactly once.
                        unsafe {
                            self.guard.defer_destroy(curr, SortedSetNode::dealloc_ptr);
                        }
                    }

                    self.retries.fetch_add(1, Ordering::Relaxed);
                    continue 'restart;
                }

                if unsafe { (*curr).value() >= value } {
                    // curr was unstamped when last observed.
                    //
                    return Interval { prev, curr };
                }

                prev = curr;
                curr = next.ptr();
            }
        }
    }
}

impl<T, G> ConcurrentSet<T> for SortedSet<T, G>
where
    T: Eq + Ord,
    G: Guard,
{
    type Guard = G;
    type Node = SortedSetNode<T>;

    fn guard(&self) -> &G {
        &self.guard
    }

    fn add_internal(&self, value: T) -> bool {
        let new_node = Box::into_raw(Box::new(SortedSetNode::new(value)));

        loop {
            let value = unsafe { (*new_node).value() };

            let Interval { prev, curr } = self.find_interval(value);

            if !curr.is_null() && unsafe { (*curr).value() == value } {
                // Already present; the candidate never became visible.
                //
                unsafe { SortedSetNode::dealloc_ptr(new_node) };
                return false;
            }

            unsafe { (*new_node).store_next(StampedPtr::new(curr, LIVE)) };

            // Link the candidate. Succeeding here is the linearization point
            // of the insertion.
            //
            let expected = StampedPtr::new(curr, LIVE);
            let linked = StampedPtr::new(new_node, LIVE);

            if unsafe { (*prev).cas_next(expected, linked) }.is_ok() {
                return true;
            }

            // prev.next changed under us (insert, splice, or prev itself got
            // stamped); take a fresh traversal.
            //
            self.retries.fetch_add(1, Ordering::Relaxed);
        }
    }

    fn remove_internal(&self, value: &T) -> bool {
        loop {
            let Interval { prev, curr } = self.find_interval(value);

            if curr.is_null() || unsafe { (*curr).value() != value } {
                return false;
            }

            let next = unsafe { (*curr).load_next() };

            if next.is_stamped() {
                // Another remover won the logical delete; retraverse so the
                // splice completes and the value reports absent.
                //
                self.retries.fetch_add(1, Ordering::Relaxed);
                continue;
            }

            // Logical removal: flip the stamp on curr's own pair, successor
            // unchanged. This is the linearization point of the removal.
            //
            if unsafe { (*curr).cas_next(next, next.with_stamp(DELETED)) }.is_err() {
                self.retries.fetch_add(1, Ordering::Relaxed);
                continue;
            }

            // One best-effort splice. A losing attempt leaves the node for
            // any later traversal to unlink; the removal already took effect.
            //
            let expected = StampedPtr::new(curr, LIVE);
            let replacement = StampedPtr::new(next.ptr(), LIVE);

            if unsafe { (*prev).cas_next(expected, replacement) }.is_ok() {
                unsafe {
                    self.guard.defer_destroy(curr, SortedSetNode::dealloc_ptr);
                }
            }

            return true;
        }
    }

    fn contains_internal(&self, value: &T) -> bool {
        let Interval { curr, .. } = self.find_interval(value);

        if curr.is_null() {
            return false;
        }

        // The stamp is authoritative: a logically deleted node reports
        // absent even while still physically linked.
        //
        unsafe { (*curr).value() == value && !(*curr).load_next().is_stamped() }
    }

    fn is_empty_internal(&self) -> bool {
        // Physical check of the first slot only: a stamped-but-linked first
        // node still reports non-empty.
        //
        let head = self.head.load(Ordering::Acquire);
        unsafe { (*head).load_next() }.ptr().is_null()
    }

    fn first_node_internal(&self) -> Option<NodePtr<T>> {
        let head = self.head.load(Ordering::Acquire);
        let mut curr = unsafe { (*head).load_next() }.ptr();

        while !curr.is_null() {
            let next = unsafe { (*curr).load_next() };
            if !next.is_stamped() {
                return Some(curr);
            }
            curr = next.ptr();
        }

        None
    }

    fn next_node_internal(&self, node: NodePtr<T>) -> Option<NodePtr<T>> {
        if node.is_null() {
            return None;
        }

        let mut curr = unsafe { (*node).load_next() }.ptr();

        while !curr.is_null() {
            let next = unsafe { (*curr).load_next() };
            if !next.is_stamped() {
                return Some(curr);
            }
            curr = next.ptr();
        }

        None
    }
}

impl<T, G> Default for SortedSet<T, G>
where
    T: Eq + Ord,
    G: Guard,
{
    fn default() -> Self {
        Self::new()
    }
}

// Safety: nodes move T across threads through shared memory; the guard bound
// already requires Send + Sync of G.
unsafe impl<T: Send, G: Guard> Send for SortedSet<T, G> {}
unsafe impl<T: Send + Sync, G: Guard> Sync for SortedSet<T, G> {}

impl<T, G: Guard> Drop for SortedSet<T, G> {
    fn drop(&mut self) {
        // Free every node still physically linked, the sentinel and stamped
        // nodes whose best-effort splice lost included. Spliced-out nodes are
        // unreachable from here and already belong to the guard.
        //
        let mut curr = self.head.load(Ordering::Acquire);

        while !curr.is_null() {
            unsafe {
                let next = (*curr).load_next().ptr();
                SortedSetNode::dealloc_ptr(curr);
                curr = next;
            }
        }
    }
}

// ============================================================================
// Tests - white-box tests that reach into the chain
// ============================================================================
// Note: Functional and stress batteries are in common_tests and run from
// tests/ with every guard type.
