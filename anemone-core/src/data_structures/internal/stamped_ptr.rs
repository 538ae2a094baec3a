// Packed (successor, stamp) word using the LSB as the stamp.
//
// The deletion protocol needs an atomic pair {next-node pointer, stamp} that
// can be compare-and-swapped jointly: a CAS must fail if *either* field
// differs from the expected pair. Packing the stamp into the low pointer bit
// makes a plain single-word compare_exchange exactly that joint CAS, and
// guards the classic ABA confusion: a word observed as (node, LIVE) never
// compares equal once the stamp flipped to DELETED.
//
// Stamp values:
//   0 (LIVE)    - the owning node is live
//   1 (DELETED) - the owning node is logically deleted
//
// The stamp marks the node that OWNS the word (its own next pair), not the
// node the pointer leads to.

pub(crate) const LIVE: usize = 0;
pub(crate) const DELETED: usize = 1;

const STAMP_MASK: usize = 0b1;

/// One packed (pointer, stamp) word.
pub(crate) struct StampedPtr<T> {
    raw: *mut T,
}

impl<T> Copy for StampedPtr<T> {}

impl<T> Clone for StampedPtr<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> std::fmt::Debug for StampedPtr<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "StampedPtr({:p}, stamp={})", self.ptr(), self.stamp())
    }
}

impl<T> StampedPtr<T> {
    /// Pack a clean pointer with a stamp.
    #[inline]
    pub(crate) fn new(ptr: *mut T, stamp: usize) -> Self {
        debug_assert!(stamp <= STAMP_MASK);
        debug_assert!(ptr as usize & STAMP_MASK == 0, "node pointer unaligned");
        StampedPtr {
            raw: (ptr as usize | stamp) as *mut T,
        }
    }

    /// Reinterpret a word read from an atomic (stamp bit included).
    #[inline]
    pub(crate) fn from_raw(raw: *mut T) -> Self {
        StampedPtr { raw }
    }

    /// The successor pointer without the stamp (the one you dereference).
    #[inline]
    pub(crate) fn ptr(&self) -> *mut T {
        (self.raw as usize & !STAMP_MASK) as *mut T
    }

    /// The packed word with the stamp intact (the one you CAS).
    #[inline]
    pub(crate) fn raw(&self) -> *mut T {
        self.raw
    }

    #[inline]
    pub(crate) fn stamp(&self) -> usize {
        self.raw as usize & STAMP_MASK
    }

    #[inline]
    pub(crate) fn is_stamped(&self) -> bool {
        self.stamp() == DELETED
    }

    /// Same successor, different stamp.
    #[inline]
    pub(crate) fn with_stamp(&self, stamp: usize) -> Self {
        StampedPtr::new(self.ptr(), stamp)
    }
}
